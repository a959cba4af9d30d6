//! Enricher Module
//! Replaces coded survey fields (country codes, remote ratio) with display labels.

use crate::data::countries::ISO_COUNTRIES;
use crate::data::loader::read_text_csv;
use crate::data::schema::SurveyColumn;
use crate::error::{PipelineError, Result};
use polars::prelude::*;
use std::collections::{BTreeSet, HashMap};
use std::path::Path;

/// Label used for codes with no known display name.
pub const DEFAULT_UNKNOWN_LABEL: &str = "Unknown";

/// Remote ratio codes and their labels.
pub const REMOTE_RATIO_LABELS: [(i64, &str); 3] = [
    (0, "no remote"),
    (50, "semi remote"),
    (100, "full remote"),
];

/// Read-only mapping from country code to display name.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryCodeMap {
    names: HashMap<String, String>,
}

impl Default for CountryCodeMap {
    fn default() -> Self {
        Self::builtin()
    }
}

impl CountryCodeMap {
    /// The ISO 3166-1 alpha-2 table shipped with the crate.
    pub fn builtin() -> Self {
        Self::from_pairs(
            ISO_COUNTRIES
                .iter()
                .map(|(code, name)| (code.to_string(), name.to_string())),
        )
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            names: pairs.into_iter().collect(),
        }
    }

    /// Load a `code,name` CSV. The first two columns are used whatever their headers.
    pub fn from_csv(path: &Path) -> Result<Self> {
        let to_map_error = |message: String| PipelineError::CountryMap {
            path: path.display().to_string(),
            message,
        };

        let df = read_text_csv(path).map_err(|e| to_map_error(e.to_string()))?;
        if df.width() < 2 {
            return Err(to_map_error(format!(
                "expected 2 columns (code,name), found {}",
                df.width()
            )));
        }

        let columns = df.get_columns();
        let codes = columns[0].str().map_err(|e| to_map_error(e.to_string()))?;
        let names = columns[1].str().map_err(|e| to_map_error(e.to_string()))?;

        let map = Self::from_pairs(codes.into_iter().zip(names.into_iter()).filter_map(
            |(code, name)| Some((code?.trim().to_string(), name?.trim().to_string())),
        ));

        tracing::info!(path = %path.display(), entries = map.len(), "Loaded country map");
        Ok(map)
    }

    pub fn get(&self, code: &str) -> Option<&str> {
        self.names.get(code.trim()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Label for a remote ratio code, `None` for anything outside 0/50/100.
pub fn remote_ratio_label(ratio: i64) -> Option<&'static str> {
    REMOTE_RATIO_LABELS
        .iter()
        .find(|(code, _)| *code == ratio)
        .map(|(_, label)| *label)
}

/// Maps coded columns to labels; unknown codes fall into one unknown bucket.
pub struct Enricher<'a> {
    countries: &'a CountryCodeMap,
    unknown_label: String,
}

impl<'a> Enricher<'a> {
    pub fn new(countries: &'a CountryCodeMap, unknown_label: impl Into<String>) -> Self {
        Self {
            countries,
            unknown_label: unknown_label.into(),
        }
    }

    /// Relabel both country columns and the remote ratio column.
    pub fn enrich(&self, df: &DataFrame) -> Result<DataFrame> {
        let mut out = df.clone();
        for column in [
            SurveyColumn::EmployeeResidence,
            SurveyColumn::CompanyLocation,
        ] {
            let labelled = self.map_country_column(&out, column)?;
            out.with_column(labelled)?;
        }
        let remote = self.map_remote_ratio(&out)?;
        out.with_column(remote)?;
        Ok(out)
    }

    fn map_country_column(&self, df: &DataFrame, column: SurveyColumn) -> Result<Column> {
        let codes = df.column(column.name())?.str()?;
        let mut unknown: BTreeSet<String> = BTreeSet::new();

        let labels: Vec<String> = codes
            .into_iter()
            .map(|code| match code.and_then(|c| self.countries.get(c)) {
                Some(name) => name.to_string(),
                None => {
                    unknown.insert(code.unwrap_or("null").to_string());
                    self.unknown_label.clone()
                }
            })
            .collect();

        for code in &unknown {
            tracing::warn!(
                column = column.name(),
                code = %code,
                label = %self.unknown_label,
                "Country code not in map"
            );
        }

        Ok(Column::new(column.name().into(), labels))
    }

    fn map_remote_ratio(&self, df: &DataFrame) -> Result<Column> {
        let name = SurveyColumn::RemoteRatio.name();
        let ratios = df.column(name)?.cast(&DataType::Int64)?;
        let mut unknown: BTreeSet<String> = BTreeSet::new();

        let labels: Vec<String> = ratios
            .i64()?
            .into_iter()
            .map(|ratio| match ratio.and_then(remote_ratio_label) {
                Some(label) => label.to_string(),
                None => {
                    unknown.insert(ratio.map_or("null".to_string(), |r| r.to_string()));
                    self.unknown_label.clone()
                }
            })
            .collect();

        for ratio in &unknown {
            tracing::warn!(ratio = %ratio, label = %self.unknown_label, "Unexpected remote ratio");
        }

        Ok(Column::new(name.into(), labels))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::cleaner::DataCleaner;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn cleaned(residence: &[&str], location: &[&str], ratio: &[&str]) -> DataFrame {
        let n = residence.len();
        let raw = df!(
            "work_year" => vec!["2024"; n],
            "experience_level" => vec!["SE"; n],
            "job_title" => vec!["Data Engineer"; n],
            "salary" => vec!["1000"; n],
            "salary_in_usd" => vec!["1000"; n],
            "employee_residence" => residence,
            "remote_ratio" => ratio,
            "company_location" => location
        )
        .unwrap();
        DataCleaner::default().clean(&raw).unwrap()
    }

    fn strings(df: &DataFrame, name: &str) -> Vec<String> {
        df.column(name)
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .map(|v| v.unwrap().to_string())
            .collect()
    }

    #[test]
    fn maps_both_country_columns() {
        let map = CountryCodeMap::builtin();
        let df = cleaned(&["US", "FR"], &["DE", "US"], &["0", "100"]);
        let out = Enricher::new(&map, DEFAULT_UNKNOWN_LABEL).enrich(&df).unwrap();

        assert_eq!(strings(&out, "employee_residence"), vec!["United States", "France"]);
        assert_eq!(strings(&out, "company_location"), vec!["Germany", "United States"]);
    }

    #[test]
    fn unknown_codes_fall_into_unknown_bucket() {
        let map = CountryCodeMap::builtin();
        let df = cleaned(&["XX"], &["US"], &["75"]);
        let out = Enricher::new(&map, "Unknown").enrich(&df).unwrap();

        assert_eq!(strings(&out, "employee_residence"), vec!["Unknown"]);
        assert_eq!(strings(&out, "remote_ratio"), vec!["Unknown"]);
    }

    #[test]
    fn labels_remote_ratio_codes() {
        let map = CountryCodeMap::builtin();
        let df = cleaned(&["US", "US", "US"], &["US", "US", "US"], &["0", "50", "100"]);
        let out = Enricher::new(&map, "Unknown").enrich(&df).unwrap();

        assert_eq!(
            strings(&out, "remote_ratio"),
            vec!["no remote", "semi remote", "full remote"]
        );
    }

    #[test]
    fn country_map_loads_from_csv() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "code,name").unwrap();
        writeln!(file, "US,USA").unwrap();
        writeln!(file, "DE,Deutschland").unwrap();
        file.flush().unwrap();

        let map = CountryCodeMap::from_csv(file.path()).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("DE"), Some("Deutschland"));
        assert_eq!(map.get("FR"), None);
    }

    #[test]
    fn builtin_map_covers_common_codes() {
        let map = CountryCodeMap::builtin();
        assert_eq!(map.get("GB"), Some("United Kingdom"));
        assert_eq!(map.get("IN"), Some("India"));
        assert_eq!(remote_ratio_label(50), Some("semi remote"));
        assert_eq!(remote_ratio_label(25), None);
    }
}
