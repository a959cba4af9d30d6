//! Data Cleaner Module
//! Drops incomplete survey rows, then coerces numeric columns to their declared types.

use crate::data::schema::{ColumnKind, SurveyColumn};
use crate::error::{PipelineError, Result};
use polars::prelude::*;

/// Placeholder the survey uses for unanswered questions.
pub const DEFAULT_SENTINEL: &str = "Non renseigné";

/// Removes placeholder rows and types the numeric columns.
#[derive(Debug, Clone)]
pub struct DataCleaner {
    sentinel: String,
}

impl Default for DataCleaner {
    fn default() -> Self {
        Self::new(DEFAULT_SENTINEL)
    }
}

impl DataCleaner {
    pub fn new(sentinel: impl Into<String>) -> Self {
        Self {
            sentinel: sentinel.into(),
        }
    }

    pub fn sentinel(&self) -> &str {
        &self.sentinel
    }

    /// Filter then coerce. Filtering must come first: sentinels are not numbers.
    pub fn clean(&self, df: &DataFrame) -> Result<DataFrame> {
        let filtered = self.drop_incomplete(df)?;
        let dropped = df.height() - filtered.height();
        tracing::info!(
            kept = filtered.height(),
            dropped,
            sentinel = %self.sentinel,
            "Dropped incomplete survey rows"
        );
        Self::coerce_numeric(filtered)
    }

    /// Keep rows where every column is non-null, non-empty and not the sentinel.
    pub fn drop_incomplete(&self, df: &DataFrame) -> Result<DataFrame> {
        let predicate = df
            .get_column_names()
            .iter()
            .map(|name| {
                let text = col(name.as_str()).cast(DataType::String);
                text.clone()
                    .is_not_null()
                    .and(text.clone().neq(lit("")))
                    .and(text.neq(lit(self.sentinel.as_str())))
            })
            .reduce(|acc, e| acc.and(e));

        let Some(predicate) = predicate else {
            return Ok(df.clone());
        };

        let filtered = df.clone().lazy().filter(predicate).collect()?;
        Ok(filtered)
    }

    /// Parse the declared numeric columns.
    ///
    /// `row` in a `TypeCoercion` error is the 0-based position in the filtered table.
    pub fn coerce_numeric(mut df: DataFrame) -> Result<DataFrame> {
        for column in SurveyColumn::numeric() {
            let name = column.name();
            let coerced = match column.kind() {
                ColumnKind::Integer => {
                    Self::coerce_column(&df, column, DataType::Int64, |values| {
                        let parsed = parse_values::<i64>(name, values, "integer", |_| true)?;
                        Ok(Column::new(name.into(), parsed))
                    })?
                }
                ColumnKind::Float => {
                    Self::coerce_column(&df, column, DataType::Float64, |values| {
                        let parsed =
                            parse_values::<f64>(name, values, "finite float", |v| v.is_finite())?;
                        Ok(Column::new(name.into(), parsed))
                    })?
                }
                ColumnKind::Text => continue,
            };
            df.with_column(coerced)?;
        }
        Ok(df)
    }

    fn coerce_column(
        df: &DataFrame,
        column: SurveyColumn,
        target: DataType,
        parse: impl FnOnce(&StringChunked) -> Result<Column>,
    ) -> Result<Column> {
        let source = df.column(column.name())?;

        if source.dtype() == &DataType::String {
            return parse(source.str()?);
        }

        // Already typed (e.g. a frame built in memory): only a lossless cast is accepted.
        source
            .as_materialized_series()
            .strict_cast(&target)
            .map(|s| s.into_column())
            .map_err(|_| PipelineError::TypeCoercion {
                column: column.name().to_string(),
                row: 0,
                value: source.dtype().to_string(),
                expected: if target.is_float() { "float" } else { "integer" },
            })
    }
}

fn parse_values<T: std::str::FromStr>(
    column: &str,
    values: &StringChunked,
    expected: &'static str,
    accept: impl Fn(&T) -> bool,
) -> Result<Vec<T>> {
    let mut parsed = Vec::with_capacity(values.len());
    for (row, value) in values.into_iter().enumerate() {
        match value.and_then(|v| v.trim().parse::<T>().ok().filter(|v| accept(v))) {
            Some(v) => parsed.push(v),
            None => {
                return Err(PipelineError::TypeCoercion {
                    column: column.to_string(),
                    row,
                    value: value.unwrap_or("null").to_string(),
                    expected,
                })
            }
        }
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_frame(years: &[&str], usd: &[&str], ratio: &[&str]) -> DataFrame {
        let n = years.len();
        df!(
            "work_year" => years,
            "experience_level" => vec!["SE"; n],
            "job_title" => vec!["Data Engineer"; n],
            "salary" => usd,
            "salary_in_usd" => usd,
            "employee_residence" => vec!["US"; n],
            "remote_ratio" => ratio,
            "company_location" => vec!["US"; n]
        )
        .unwrap()
    }

    #[test]
    fn drops_sentinel_rows_in_any_column() {
        let df = raw_frame(
            &["2024", "Non renseigné", "2023"],
            &["100000", "90000", "Non renseigné"],
            &["0", "50", "100"],
        );
        let cleaned = DataCleaner::default().clean(&df).unwrap();

        assert_eq!(cleaned.height(), 1);
        let years = cleaned.column("work_year").unwrap().i64().unwrap();
        assert_eq!(years.get(0), Some(2024));
    }

    #[test]
    fn drops_empty_and_null_cells() {
        let df = df!(
            "work_year" => [Some("2024"), None, Some("2022")],
            "experience_level" => ["SE", "MI", ""],
            "job_title" => ["A", "B", "C"],
            "salary" => ["1", "2", "3"],
            "salary_in_usd" => ["1", "2", "3"],
            "employee_residence" => ["US", "US", "US"],
            "remote_ratio" => ["0", "0", "0"],
            "company_location" => ["US", "US", "US"]
        )
        .unwrap();

        let cleaned = DataCleaner::default().drop_incomplete(&df).unwrap();
        assert_eq!(cleaned.height(), 1);
        for column in cleaned.get_columns() {
            assert_eq!(column.null_count(), 0);
        }
    }

    #[test]
    fn coerces_declared_numeric_types() {
        let df = raw_frame(&["2024"], &[" 123456.5 "], &["50"]);
        let cleaned = DataCleaner::default().clean(&df).unwrap();

        assert_eq!(cleaned.column("work_year").unwrap().dtype(), &DataType::Int64);
        assert_eq!(cleaned.column("remote_ratio").unwrap().dtype(), &DataType::Int64);
        assert_eq!(cleaned.column("salary").unwrap().dtype(), &DataType::Float64);
        let usd = cleaned.column("salary_in_usd").unwrap().f64().unwrap();
        assert_eq!(usd.get(0), Some(123456.5));
    }

    #[test]
    fn unparsable_value_is_type_coercion_error() {
        let df = raw_frame(&["2024", "twenty"], &["1", "2"], &["0", "0"]);
        match DataCleaner::default().clean(&df) {
            Err(PipelineError::TypeCoercion { column, row, value, .. }) => {
                assert_eq!(column, "work_year");
                assert_eq!(row, 1);
                assert_eq!(value, "twenty");
            }
            other => panic!("expected TypeCoercion, got {:?}", other),
        }
    }

    #[test]
    fn non_finite_salary_is_rejected() {
        for bad in ["NaN", "inf", "-infinity"] {
            let df = raw_frame(&["2024", "2024"], &["1000", bad], &["0", "0"]);
            match DataCleaner::default().clean(&df) {
                Err(PipelineError::TypeCoercion { column, row, value, expected }) => {
                    assert_eq!(column, "salary");
                    assert_eq!(row, 1);
                    assert_eq!(value, bad);
                    assert_eq!(expected, "finite float");
                }
                other => panic!("expected TypeCoercion for {}, got {:?}", bad, other),
            }
        }
    }

    #[test]
    fn custom_sentinel_is_exact_match() {
        let df = raw_frame(&["2024", "2024"], &["1", "2"], &["0", "0"]);
        let df = df
            .lazy()
            .with_column(
                when(col("salary").eq(lit("2")))
                    .then(lit("n/a"))
                    .otherwise(col("job_title"))
                    .alias("job_title"),
            )
            .collect()
            .unwrap();

        let cleaned = DataCleaner::new("n/a").clean(&df).unwrap();
        assert_eq!(cleaned.height(), 1);

        let untouched = DataCleaner::new("N/A").drop_incomplete(&df).unwrap();
        assert_eq!(untouched.height(), 2);
    }
}
