//! Survey Schema Module
//! Declares the typed column list of a survey record and validates it once at load time.

use crate::error::{PipelineError, Result};
use polars::prelude::*;

/// Target type of a declared column after cleaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Integer,
    Float,
    Text,
}

/// Columns the pipeline reads. Extra CSV columns are carried along but never aggregated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurveyColumn {
    WorkYear,
    ExperienceLevel,
    JobTitle,
    Salary,
    SalaryInUsd,
    EmployeeResidence,
    RemoteRatio,
    CompanyLocation,
}

impl SurveyColumn {
    pub const ALL: [SurveyColumn; 8] = [
        SurveyColumn::WorkYear,
        SurveyColumn::ExperienceLevel,
        SurveyColumn::JobTitle,
        SurveyColumn::Salary,
        SurveyColumn::SalaryInUsd,
        SurveyColumn::EmployeeResidence,
        SurveyColumn::RemoteRatio,
        SurveyColumn::CompanyLocation,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SurveyColumn::WorkYear => "work_year",
            SurveyColumn::ExperienceLevel => "experience_level",
            SurveyColumn::JobTitle => "job_title",
            SurveyColumn::Salary => "salary",
            SurveyColumn::SalaryInUsd => "salary_in_usd",
            SurveyColumn::EmployeeResidence => "employee_residence",
            SurveyColumn::RemoteRatio => "remote_ratio",
            SurveyColumn::CompanyLocation => "company_location",
        }
    }

    pub fn kind(self) -> ColumnKind {
        match self {
            SurveyColumn::WorkYear | SurveyColumn::RemoteRatio => ColumnKind::Integer,
            SurveyColumn::Salary | SurveyColumn::SalaryInUsd => ColumnKind::Float,
            _ => ColumnKind::Text,
        }
    }

    /// Columns that must be coerced from text to a numeric type.
    pub fn numeric() -> impl Iterator<Item = SurveyColumn> {
        Self::ALL
            .into_iter()
            .filter(|c| c.kind() != ColumnKind::Text)
    }
}

impl std::fmt::Display for SurveyColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Fail with `MissingColumn` naming the first declared column absent from `df`.
pub fn validate_columns(df: &DataFrame) -> Result<()> {
    let present: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    for column in SurveyColumn::ALL {
        if !present.iter().any(|p| p == column.name()) {
            return Err(PipelineError::MissingColumn {
                column: column.name().to_string(),
            });
        }
    }
    Ok(())
}

/// One raw survey response, before cleaning and enrichment.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub work_year: i64,
    pub experience_level: String,
    pub job_title: String,
    pub salary: f64,
    pub salary_in_usd: f64,
    pub employee_residence: String,
    pub remote_ratio: i64,
    pub company_location: String,
}

fn text_column(records: &[Record], column: SurveyColumn, f: impl Fn(&Record) -> String) -> Column {
    let values: Vec<String> = records.iter().map(f).collect();
    Column::new(column.name().into(), values)
}

/// Build a text-typed table from records, shaped like a freshly loaded CSV.
pub fn records_to_frame(records: &[Record]) -> Result<DataFrame> {
    let df = DataFrame::new(vec![
        text_column(records, SurveyColumn::WorkYear, |r| r.work_year.to_string()),
        text_column(records, SurveyColumn::ExperienceLevel, |r| {
            r.experience_level.clone()
        }),
        text_column(records, SurveyColumn::JobTitle, |r| r.job_title.clone()),
        text_column(records, SurveyColumn::Salary, |r| r.salary.to_string()),
        text_column(records, SurveyColumn::SalaryInUsd, |r| {
            r.salary_in_usd.to_string()
        }),
        text_column(records, SurveyColumn::EmployeeResidence, |r| {
            r.employee_residence.clone()
        }),
        text_column(records, SurveyColumn::RemoteRatio, |r| {
            r.remote_ratio.to_string()
        }),
        text_column(records, SurveyColumn::CompanyLocation, |r| {
            r.company_location.clone()
        }),
    ])?;

    Ok(df)
}
