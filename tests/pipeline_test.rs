use salary_dashboard::dashboard::{ChartKind, Page, Route};
use salary_dashboard::stats::SummaryRow;
use salary_dashboard::{DashboardConfig, DashboardTables, Pipeline, PipelineError};
use std::io::Write;
use std::path::Path;
use tempfile::{NamedTempFile, TempDir};

const HEADER: &str =
    "work_year,experience_level,job_title,salary,salary_in_usd,employee_residence,remote_ratio,company_location";

fn write_csv(lines: &[String]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{}", HEADER).unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
    file.flush().unwrap();
    file
}

fn row(level: &str, job: &str, usd: &str, country: &str, remote: &str) -> String {
    format!("2024,{level},{job},{usd},{usd},{country},{remote},{country}")
}

fn config_for(path: &Path) -> DashboardConfig {
    DashboardConfig {
        data_path: path.to_path_buf(),
        ..DashboardConfig::default()
    }
}

fn sample_rows() -> Vec<String> {
    vec![
        row("SE", "Data Engineer", "100000", "US", "100"),
        row("SE", "Data Engineer", "120000", "US", "0"),
        row("MI", "Data Scientist", "80000", "DE", "50"),
        row("EN", "Data Analyst", "Non renseigné", "FR", "0"),
    ]
}

fn run(lines: &[String]) -> DashboardTables {
    let file = write_csv(lines);
    Pipeline::run(&config_for(file.path())).unwrap()
}

#[test]
fn end_to_end_drops_sentinel_rows_and_names_countries() {
    let tables = run(&sample_rows());

    assert_eq!(tables.record_count, 3);
    assert_eq!(
        tables.salary_by_location,
        vec![
            SummaryRow::new("Germany", 80000.0),
            SummaryRow::new("United States", 110000.0),
        ]
    );
    assert_eq!(
        tables.responses_by_country,
        vec![
            SummaryRow::new("United States", 2.0),
            SummaryRow::new("Germany", 1.0),
        ]
    );
    assert_eq!(tables.salary_histogram.total(), 3);
}

#[test]
fn remote_ratio_groups_use_labels() {
    let tables = run(&sample_rows());

    let mut keys: Vec<&str> = tables
        .salary_by_remote
        .iter()
        .map(|b| b.key.as_str())
        .collect();
    keys.sort();
    assert_eq!(keys, vec!["full remote", "no remote", "semi remote"]);
}

#[test]
fn rare_locations_are_merged_below_one_percent() {
    let mut lines: Vec<String> = (0..199)
        .map(|_| row("SE", "Data Engineer", "100000", "US", "100"))
        .collect();
    lines.push(row("MI", "Data Scientist", "90000", "FR", "0"));

    let tables = run(&lines);

    assert_eq!(tables.other_location_count, 1);
    assert_eq!(
        tables.responses_by_location,
        vec![
            SummaryRow::new("United States", 199.0),
            SummaryRow::new("Other 1", 1.0),
        ]
    );
}

#[test]
fn exactly_one_percent_is_kept() {
    let mut lines: Vec<String> = (0..99)
        .map(|_| row("SE", "Data Engineer", "100000", "US", "100"))
        .collect();
    lines.push(row("MI", "Data Scientist", "90000", "FR", "0"));

    let tables = run(&lines);

    assert_eq!(tables.other_location_count, 0);
    let total: f64 = tables.responses_by_location.iter().map(|r| r.value).sum();
    assert_eq!(total, 100.0);
    assert!(tables
        .responses_by_location
        .iter()
        .any(|r| r.key == "France"));
}

#[test]
fn missing_column_is_reported() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "work_year,experience_level,job_title,salary,salary_in_usd,employee_residence,remote_ratio").unwrap();
    writeln!(file, "2024,SE,Data Engineer,1,1,US,0").unwrap();
    file.flush().unwrap();

    match Pipeline::run(&config_for(file.path())) {
        Err(PipelineError::MissingColumn { column }) => assert_eq!(column, "company_location"),
        other => panic!("expected MissingColumn, got {:?}", other),
    }
}

#[test]
fn unparsable_number_is_a_type_error() {
    let file = write_csv(&[
        row("SE", "Data Engineer", "100000", "US", "100"),
        row("SE", "Data Engineer", "lots", "US", "100"),
    ]);

    match Pipeline::run(&config_for(file.path())) {
        Err(PipelineError::TypeCoercion { column, value, .. }) => {
            assert_eq!(column, "salary");
            assert_eq!(value, "lots");
        }
        other => panic!("expected TypeCoercion, got {:?}", other),
    }
}

#[test]
fn short_row_is_padded_and_dropped() {
    let tables = run(&[
        row("SE", "Data Engineer", "100000", "US", "100"),
        "2024,SE,Data Engineer,90000,90000,US".to_string(),
    ]);

    assert_eq!(tables.record_count, 1);
    assert_eq!(
        tables.salary_by_location,
        vec![SummaryRow::new("United States", 100000.0)]
    );
}

#[test]
fn long_row_is_a_data_source_error() {
    let file = write_csv(&[
        row("SE", "Data Engineer", "100000", "US", "100"),
        format!("{},extra", row("MI", "Data Scientist", "90000", "DE", "0")),
    ]);

    let result = Pipeline::run(&config_for(file.path()));
    assert!(matches!(result, Err(PipelineError::DataSource(_))));
}

#[test]
fn missing_file_is_a_data_source_error() {
    let dir = TempDir::new().unwrap();
    let result = Pipeline::run(&config_for(&dir.path().join("absent.csv")));
    assert!(matches!(result, Err(PipelineError::DataSource(_))));
}

#[test]
fn running_twice_gives_identical_tables() {
    let file = write_csv(&sample_rows());
    let config = config_for(file.path());

    let first = Pipeline::run(&config).unwrap();
    let second = Pipeline::run(&config).unwrap();
    assert_eq!(first, second);
}

#[test]
fn toml_config_with_custom_country_map() {
    let data = write_csv(&sample_rows());
    let mut map = NamedTempFile::new().unwrap();
    writeln!(map, "code,name").unwrap();
    writeln!(map, "US,USA").unwrap();
    map.flush().unwrap();

    let toml = format!(
        "data_path = {:?}\ncountry_map_path = {:?}\nunknown_label = \"Elsewhere\"\n",
        data.path().display().to_string(),
        map.path().display().to_string(),
    );
    let config = DashboardConfig::from_toml_str(&toml).unwrap();
    let tables = Pipeline::run(&config).unwrap();

    assert_eq!(
        tables.salary_by_location,
        vec![
            SummaryRow::new("Elsewhere", 80000.0),
            SummaryRow::new("USA", 110000.0),
        ]
    );
}

#[test]
fn pages_are_built_from_the_same_tables() {
    let tables = run(&sample_rows());

    let overview = Page::charts(Route::from_path("/"), &tables);
    assert_eq!(overview.len(), 7);

    let trust = Page::charts(Route::from_path("/trustData?ref=nav"), &tables);
    assert_eq!(trust[0].id, "job_barplot");
    match &trust[0].kind {
        ChartKind::HorizontalBar(rows) => {
            let keys: Vec<&str> = rows.iter().map(|r| r.key.as_str()).collect();
            assert_eq!(keys, vec!["Data Scientist", "Data Engineer"]);
        }
        other => panic!("unexpected chart kind {:?}", other),
    }

    let fallback = Page::charts(Route::from_path("/nowhere"), &tables);
    assert_eq!(fallback, overview);
}

#[test]
fn summary_serializes_to_json() {
    let tables = run(&sample_rows());
    let json = serde_json::to_value(&tables).unwrap();
    assert_eq!(json["record_count"], 3);
    assert_eq!(json["salary_by_location"][0]["key"], "Germany");
}
