//! Aggregator Module
//! Grouped summary tables: mean by group, count by group, long-tail bucketing and top-N.

use crate::error::{PipelineError, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Groups below this share of all responses are merged into "Other N".
pub const DEFAULT_OTHER_THRESHOLD: f64 = 0.01;
pub const DEFAULT_OTHER_LABEL: &str = "Other";

const COUNT_ALIAS: &str = "response_count";

/// One (group key, measure) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub key: String,
    pub value: f64,
}

impl SummaryRow {
    pub fn new(key: impl Into<String>, value: f64) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Result of long-tail bucketing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LongTail {
    pub rows: Vec<SummaryRow>,
    /// Number of groups merged into the synthetic Other row.
    pub merged: usize,
}

fn ascending(a: &SummaryRow, b: &SummaryRow) -> Ordering {
    a.value.total_cmp(&b.value).then_with(|| a.key.cmp(&b.key))
}

fn descending(a: &SummaryRow, b: &SummaryRow) -> Ordering {
    b.value.total_cmp(&a.value).then_with(|| a.key.cmp(&b.key))
}

/// Stateless grouped aggregations over a cleaned, enriched table.
pub struct Aggregator;

impl Aggregator {
    /// Mean of `value_col` per `group_col`, ascending by mean then by key.
    pub fn mean_by_group(
        df: &DataFrame,
        group_col: &str,
        value_col: &str,
    ) -> Result<Vec<SummaryRow>> {
        Self::require_columns(df, &[group_col, value_col])?;

        let grouped = df
            .clone()
            .lazy()
            .group_by([col(group_col)])
            .agg([col(value_col).cast(DataType::Float64).mean().alias(value_col)])
            .collect()?;

        let mut rows = Self::summary_rows(&grouped, group_col, value_col)?;
        rows.sort_by(ascending);

        tracing::debug!(group = group_col, value = value_col, groups = rows.len(), "mean_by_group");
        Ok(rows)
    }

    /// Row count per `group_col`, descending by count then ascending by key.
    pub fn count_by_group(df: &DataFrame, group_col: &str) -> Result<Vec<SummaryRow>> {
        Self::require_columns(df, &[group_col])?;

        let grouped = df
            .clone()
            .lazy()
            .group_by([col(group_col)])
            .agg([len().alias(COUNT_ALIAS)])
            .collect()?;

        let mut rows = Self::summary_rows(&grouped, group_col, COUNT_ALIAS)?;
        rows.sort_by(descending);

        tracing::debug!(group = group_col, groups = rows.len(), "count_by_group");
        Ok(rows)
    }

    /// Merge every group whose share of the total is strictly below `threshold`
    /// into one `"{other_label} {N}"` row.
    ///
    /// Kept rows stay in input order and the Other row comes last. Rows sharing a
    /// label after relabeling are summed, so the total is always preserved.
    pub fn bucket_long_tail(
        rows: &[SummaryRow],
        threshold: f64,
        other_label: &str,
    ) -> Result<LongTail> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(PipelineError::InvalidArgument(format!(
                "long-tail threshold must be within [0, 1], got {}",
                threshold
            )));
        }

        let total: f64 = rows.iter().map(|r| r.value).sum();
        if rows.is_empty() || total <= 0.0 {
            return Ok(LongTail {
                rows: rows.to_vec(),
                merged: 0,
            });
        }

        let (tail, kept): (Vec<&SummaryRow>, Vec<&SummaryRow>) =
            rows.iter().partition(|r| r.value / total < threshold);

        if tail.is_empty() {
            return Ok(LongTail {
                rows: rows.to_vec(),
                merged: 0,
            });
        }

        let merged = tail.len();
        let other = SummaryRow::new(
            format!("{} {}", other_label, merged),
            tail.iter().map(|r| r.value).sum(),
        );

        let mut out: Vec<SummaryRow> = Vec::with_capacity(kept.len() + 1);
        for row in kept.into_iter().cloned().chain(std::iter::once(other)) {
            match out.iter_mut().find(|r| r.key == row.key) {
                Some(existing) => existing.value += row.value,
                None => out.push(row),
            }
        }

        tracing::debug!(merged, threshold, "Bucketed long-tail groups");
        Ok(LongTail { rows: out, merged })
    }

    /// The `n` rows with the highest value, returned in ascending order.
    pub fn top_n(rows: &[SummaryRow], n: usize) -> Vec<SummaryRow> {
        let mut top = rows.to_vec();
        top.sort_by(descending);
        top.truncate(n);
        top.sort_by(ascending);
        top
    }

    fn require_columns(df: &DataFrame, names: &[&str]) -> Result<()> {
        for name in names {
            if df.column(name).is_err() {
                return Err(PipelineError::MissingColumn {
                    column: name.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Pull (key, value) pairs out of an aggregated frame, skipping null keys and values.
    fn summary_rows(df: &DataFrame, key_col: &str, value_col: &str) -> Result<Vec<SummaryRow>> {
        let keys = df.column(key_col)?.cast(&DataType::String)?;
        let values = df.column(value_col)?.cast(&DataType::Float64)?;

        let rows = keys
            .str()?
            .into_iter()
            .zip(values.f64()?.into_iter())
            .filter_map(|(k, v)| match (k, v) {
                (Some(k), Some(v)) if !v.is_nan() => Some(SummaryRow::new(k, v)),
                _ => None,
            })
            .collect();
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(pairs: &[(&str, f64)]) -> Vec<SummaryRow> {
        pairs.iter().map(|(k, v)| SummaryRow::new(*k, *v)).collect()
    }

    fn total(rows: &[SummaryRow]) -> f64 {
        rows.iter().map(|r| r.value).sum()
    }

    #[test]
    fn mean_by_group_sorts_ascending_with_key_tiebreak() {
        let df = df!(
            "company_location" => ["B", "A", "C", "C", "B"],
            "salary_in_usd" => [10.0, 10.0, 5.0, 7.0, 10.0]
        )
        .unwrap();

        let result = Aggregator::mean_by_group(&df, "company_location", "salary_in_usd").unwrap();
        assert_eq!(result, rows(&[("C", 6.0), ("A", 10.0), ("B", 10.0)]));
    }

    #[test]
    fn mean_by_group_output_is_non_decreasing() {
        let df = df!(
            "job_title" => ["x", "y", "z", "x", "w", "y", "v"],
            "salary_in_usd" => [3.0, 9.0, 1.0, 5.0, 4.0, 1.0, 4.0]
        )
        .unwrap();

        let result = Aggregator::mean_by_group(&df, "job_title", "salary_in_usd").unwrap();
        assert!(result.windows(2).all(|w| w[0].value <= w[1].value));
        assert_eq!(result.len(), 5);
    }

    #[test]
    fn count_by_group_sorts_descending() {
        let df = df!("company_location" => ["US", "FR", "US", "DE", "US", "FR"]).unwrap();

        let result = Aggregator::count_by_group(&df, "company_location").unwrap();
        assert_eq!(result, rows(&[("US", 3.0), ("FR", 2.0), ("DE", 1.0)]));
    }

    #[test]
    fn count_by_group_equal_counts_sorted_by_key() {
        let df = df!("company_location" => ["US", "FR", "DE", "US", "FR", "DE", "US", "GB"]).unwrap();

        let result = Aggregator::count_by_group(&df, "company_location").unwrap();
        assert_eq!(
            result,
            rows(&[("US", 3.0), ("DE", 2.0), ("FR", 2.0), ("GB", 1.0)])
        );
    }

    #[test]
    fn missing_group_column_is_reported() {
        let df = df!("salary_in_usd" => [1.0]).unwrap();
        let err = Aggregator::count_by_group(&df, "company_location").unwrap_err();
        assert!(matches!(err, PipelineError::MissingColumn { .. }));
    }

    #[test]
    fn bucket_long_tail_is_identity_when_nothing_is_rare() {
        let input = rows(&[("US", 50.0), ("FR", 30.0), ("DE", 20.0)]);
        let result = Aggregator::bucket_long_tail(&input, 0.01, "Other").unwrap();

        assert_eq!(result.rows, input);
        assert_eq!(result.merged, 0);
    }

    #[test]
    fn exactly_at_threshold_is_not_merged() {
        // FR is 1 of 100 responses: exactly 1.0%
        let input = rows(&[("US", 99.0), ("FR", 1.0)]);
        let result = Aggregator::bucket_long_tail(&input, 0.01, "Other").unwrap();

        assert_eq!(result.rows, input);
        assert_eq!(result.merged, 0);
    }

    #[test]
    fn below_threshold_is_merged_into_other() {
        let input = rows(&[("US", 199.0), ("FR", 1.0)]);
        let result = Aggregator::bucket_long_tail(&input, 0.01, "Other").unwrap();

        assert_eq!(result.rows, rows(&[("US", 199.0), ("Other 1", 1.0)]));
        assert_eq!(result.merged, 1);
    }

    #[test]
    fn bucketing_preserves_total_count() {
        let input = rows(&[
            ("US", 900.0),
            ("GB", 60.0),
            ("FR", 9.0),
            ("DE", 8.0),
            ("ES", 7.0),
            ("IT", 6.0),
            ("PT", 5.0),
            ("NL", 5.0),
        ]);
        let result = Aggregator::bucket_long_tail(&input, 0.01, "Other").unwrap();

        assert_eq!(result.merged, 6);
        assert_eq!(result.rows.last().unwrap(), &SummaryRow::new("Other 6", 40.0));
        assert_eq!(total(&result.rows), total(&input));
    }

    #[test]
    fn relabeled_rows_are_summed_into_existing_label() {
        let input = rows(&[("Other 1", 500.0), ("US", 499.0), ("FR", 1.0)]);
        let result = Aggregator::bucket_long_tail(&input, 0.01, "Other").unwrap();

        assert_eq!(result.rows, rows(&[("Other 1", 501.0), ("US", 499.0)]));
        assert_eq!(total(&result.rows), 1000.0);
    }

    #[test]
    fn invalid_threshold_is_rejected() {
        let err = Aggregator::bucket_long_tail(&rows(&[("US", 1.0)]), 1.5, "Other").unwrap_err();
        assert!(matches!(err, PipelineError::InvalidArgument(_)));
    }

    #[test]
    fn top_n_keeps_highest_in_ascending_order() {
        let input = rows(&[("a", 1.0), ("b", 5.0), ("c", 3.0), ("d", 4.0)]);
        assert_eq!(
            Aggregator::top_n(&input, 2),
            rows(&[("d", 4.0), ("b", 5.0)])
        );
        assert_eq!(Aggregator::top_n(&input, 10).len(), 4);
        assert!(Aggregator::top_n(&input, 0).is_empty());
    }

    #[test]
    fn top_n_tie_at_cutoff_keeps_smaller_key() {
        let input = rows(&[("d", 1.0), ("c", 4.0), ("b", 5.0), ("a", 4.0)]);
        assert_eq!(
            Aggregator::top_n(&input, 2),
            rows(&[("a", 4.0), ("b", 5.0)])
        );
    }
}
