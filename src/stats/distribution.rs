//! Distribution Module
//! Box-plot summaries per category and fixed-bin histograms.

use crate::error::{PipelineError, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use std::collections::BTreeMap;

/// Five-number summary plus whiskers for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxSummary {
    pub key: String,
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub lower_whisker: f64,
    pub upper_whisker: f64,
    pub mean: f64,
    pub std: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Histogram {
    pub bins: Vec<HistogramBin>,
}

impl Histogram {
    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }
}

/// Handles distribution statistics for the box and histogram charts.
pub struct DistributionCalculator;

impl DistributionCalculator {
    /// Box summary for an array of values; `None` when empty.
    pub fn box_summary(key: &str, values: &[f64]) -> Option<BoxSummary> {
        if values.is_empty() {
            return None;
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let q1 = Self::percentile(&sorted, 25.0);
        let median = Self::percentile(&sorted, 50.0);
        let q3 = Self::percentile(&sorted, 75.0);
        let iqr = q3 - q1;

        let lower_whisker = sorted
            .iter()
            .copied()
            .find(|&v| v >= q1 - 1.5 * iqr)
            .unwrap_or(q1);
        let upper_whisker = sorted
            .iter()
            .rev()
            .copied()
            .find(|&v| v <= q3 + 1.5 * iqr)
            .unwrap_or(q3);

        let std = if values.len() > 1 {
            values.iter().std_dev()
        } else {
            0.0
        };

        Some(BoxSummary {
            key: key.to_string(),
            count: values.len(),
            min: sorted[0],
            q1,
            median,
            q3,
            max: sorted[sorted.len() - 1],
            lower_whisker,
            upper_whisker,
            mean: values.iter().mean(),
            std,
        })
    }

    /// Calculate percentile using linear interpolation (NumPy compatible).
    fn percentile(sorted_values: &[f64], p: f64) -> f64 {
        let n = sorted_values.len();
        if n == 0 {
            return f64::NAN;
        }
        if n == 1 {
            return sorted_values[0];
        }

        let rank = (p / 100.0) * (n - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = (rank.ceil() as usize).min(n - 1);
        let frac = rank - lower as f64;

        if lower == upper {
            sorted_values[lower]
        } else {
            sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
        }
    }

    /// One box summary per distinct value of `group_col`, sorted by key.
    pub fn box_summary_by_group(
        df: &DataFrame,
        group_col: &str,
        value_col: &str,
    ) -> Result<Vec<BoxSummary>> {
        let keys = df.column(group_col)?.cast(&DataType::String)?;
        let values = df.column(value_col)?.cast(&DataType::Float64)?;

        let mut by_group: BTreeMap<String, Vec<f64>> = BTreeMap::new();
        for (k, v) in keys.str()?.into_iter().zip(values.f64()?.into_iter()) {
            if let (Some(k), Some(v)) = (k, v) {
                if !v.is_nan() {
                    by_group.entry(k.to_string()).or_default().push(v);
                }
            }
        }

        Ok(by_group
            .iter()
            .filter_map(|(key, vals)| Self::box_summary(key, vals))
            .collect())
    }

    /// Equal-width histogram of `value_col` over its observed range.
    pub fn histogram(df: &DataFrame, value_col: &str, bins: usize) -> Result<Histogram> {
        let values: Vec<f64> = df
            .column(value_col)?
            .cast(&DataType::Float64)?
            .f64()?
            .into_iter()
            .flatten()
            .filter(|v| !v.is_nan())
            .collect();
        Self::histogram_of(&values, bins)
    }

    pub fn histogram_of(values: &[f64], bins: usize) -> Result<Histogram> {
        if bins == 0 {
            return Err(PipelineError::InvalidArgument(
                "histogram needs at least one bin".to_string(),
            ));
        }
        if values.is_empty() {
            return Ok(Histogram::default());
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        if max == min {
            return Ok(Histogram {
                bins: vec![HistogramBin {
                    start: min,
                    end: max,
                    count: values.len(),
                }],
            });
        }

        let width = (max - min) / bins as f64;
        let mut counts = vec![0usize; bins];
        for &v in values {
            // Last bin is closed so `max` lands in it.
            let idx = (((v - min) / width).floor() as usize).min(bins - 1);
            counts[idx] += 1;
        }

        Ok(Histogram {
            bins: counts
                .into_iter()
                .enumerate()
                .map(|(i, count)| HistogramBin {
                    start: min + i as f64 * width,
                    end: min + (i + 1) as f64 * width,
                    count,
                })
                .collect(),
        })
    }
}
