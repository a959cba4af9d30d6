//! Page composition: which charts each route shows, built from the dashboard tables.

use crate::dashboard::Route;
use crate::pipeline::DashboardTables;
use crate::stats::{BoxSummary, Histogram, SummaryRow};
use serde::Serialize;

/// What a chart draws. Each variant carries the table it is built from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ChartKind {
    Box(Vec<BoxSummary>),
    HorizontalBar(Vec<SummaryRow>),
    Histogram(Histogram),
    Pie(Vec<SummaryRow>),
    /// Per-country values drawn with a sequential colour scale.
    Choropleth(Vec<SummaryRow>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub id: &'static str,
    pub title: String,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub kind: ChartKind,
}

impl ChartSpec {
    fn new(id: &'static str, title: impl Into<String>, kind: ChartKind) -> Self {
        Self {
            id,
            title: title.into(),
            x_label: "",
            y_label: "",
            kind,
        }
    }

    fn labels(mut self, x_label: &'static str, y_label: &'static str) -> Self {
        self.x_label = x_label;
        self.y_label = y_label;
        self
    }
}

pub struct Page;

impl Page {
    /// Ordered charts for `route`.
    pub fn charts(route: Route, tables: &DashboardTables) -> Vec<ChartSpec> {
        match route {
            Route::Overview => Self::overview(tables),
            Route::TrustData => Self::trust_data(tables),
        }
    }

    fn overview(t: &DashboardTables) -> Vec<ChartSpec> {
        vec![
            Self::remote_boxplot(t),
            Self::experience_boxplot(t),
            ChartSpec::new(
                "choropleth_salary",
                "Average salary by country",
                ChartKind::Choropleth(t.salary_by_country.clone()),
            )
            .labels("salary_in_usd", "country"),
            Self::location_barplot(t),
            ChartSpec::new(
                "histogram",
                "Salary distribution",
                ChartKind::Histogram(t.salary_histogram.clone()),
            )
            .labels("salary_in_usd", "count"),
            Self::location_pie(t),
            ChartSpec::new(
                "choropleth_responses",
                "Responses by country",
                ChartKind::Choropleth(t.responses_by_country.clone()),
            )
            .labels("response_count", "country"),
        ]
    }

    fn trust_data(t: &DashboardTables) -> Vec<ChartSpec> {
        vec![
            ChartSpec::new(
                "job_barplot",
                format!(
                    "Top {} job titles by average salary (ascending)",
                    t.salary_by_job_top.len()
                ),
                ChartKind::HorizontalBar(t.salary_by_job_top.clone()),
            )
            .labels("salary_in_usd", "job_title"),
            Self::location_barplot(t),
            Self::location_pie(t),
            Self::experience_boxplot(t),
        ]
    }

    fn remote_boxplot(t: &DashboardTables) -> ChartSpec {
        ChartSpec::new(
            "remote_salary_boxplot",
            "Salaries by remote ratio",
            ChartKind::Box(t.salary_by_remote.clone()),
        )
        .labels("remote_ratio", "salary_in_usd")
    }

    fn experience_boxplot(t: &DashboardTables) -> ChartSpec {
        ChartSpec::new(
            "boxplot",
            "Salaries by experience level",
            ChartKind::Box(t.salary_by_experience.clone()),
        )
        .labels("experience_level", "salary_in_usd")
    }

    fn location_barplot(t: &DashboardTables) -> ChartSpec {
        ChartSpec::new(
            "barplot",
            "Average salary by location (ascending)",
            ChartKind::HorizontalBar(t.salary_by_location.clone()),
        )
        .labels("salary_in_usd", "company_location")
    }

    fn location_pie(t: &DashboardTables) -> ChartSpec {
        ChartSpec::new(
            "pie_chart",
            format!(
                "Responses by location (Other: {} countries)",
                t.other_location_count
            ),
            ChartKind::Pie(t.responses_by_location.clone()),
        )
    }
}

/// Percentage label for one pie slice, e.g. `"France: 12.5%"`.
pub fn slice_label(row: &SummaryRow, total: f64) -> String {
    let share = if total > 0.0 { row.value / total } else { 0.0 };
    format!("{}: {:.1}%", row.key, share * 100.0)
}
