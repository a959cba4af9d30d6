//! Dashboard configuration loaded from TOML.

use crate::data::{DEFAULT_SENTINEL, DEFAULT_UNKNOWN_LABEL};
use crate::error::{PipelineError, Result};
use crate::stats::{DEFAULT_OTHER_LABEL, DEFAULT_OTHER_THRESHOLD};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_TOP_JOBS: usize = 25;
pub const DEFAULT_HISTOGRAM_BINS: usize = 50;

/// Every field has a default, so an empty file is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    /// `code,name` CSV replacing the built-in country table.
    pub country_map_path: Option<PathBuf>,
    pub sentinel: String,
    pub unknown_label: String,
    pub other_label: String,
    pub other_threshold: f64,
    pub top_jobs: usize,
    pub histogram_bins: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data.csv"),
            country_map_path: None,
            sentinel: DEFAULT_SENTINEL.to_string(),
            unknown_label: DEFAULT_UNKNOWN_LABEL.to_string(),
            other_label: DEFAULT_OTHER_LABEL.to_string(),
            other_threshold: DEFAULT_OTHER_THRESHOLD,
            top_jobs: DEFAULT_TOP_JOBS,
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
        }
    }
}

impl DashboardConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| PipelineError::Config {
            message: format!("cannot read {}: {}", path.as_ref().display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| PipelineError::Config {
            message: format!("TOML parsing error: {}", e),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |message: String| Err(PipelineError::Config { message });

        if !(0.0..=1.0).contains(&self.other_threshold) {
            return invalid(format!(
                "other_threshold must be within [0, 1], got {}",
                self.other_threshold
            ));
        }
        if self.histogram_bins == 0 {
            return invalid("histogram_bins must be at least 1".to_string());
        }
        if self.top_jobs == 0 {
            return invalid("top_jobs must be at least 1".to_string());
        }
        if self.sentinel.is_empty() {
            return invalid("sentinel must not be empty".to_string());
        }
        Ok(())
    }
}
