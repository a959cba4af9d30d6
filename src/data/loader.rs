//! CSV Data Loader Module
//! Handles CSV file loading and schema validation using Polars.

use crate::data::schema::validate_columns;
use crate::error::{PipelineError, Result};
use polars::prelude::*;
use std::path::{Path, PathBuf};

/// Loads the survey CSV with every column kept as text.
///
/// Schema inference is disabled: sentinel placeholders live in numeric columns
/// and must survive until the cleaner has filtered them out.
pub struct DataLoader {
    file_path: PathBuf,
}

impl DataLoader {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
        }
    }

    /// Load the CSV and validate the declared columns.
    pub fn load(&self) -> Result<DataFrame> {
        let df = read_text_csv(&self.file_path)?;
        validate_columns(&df)?;

        tracing::info!(
            path = %self.file_path.display(),
            rows = df.height(),
            columns = df.width(),
            "Loaded survey CSV"
        );
        Ok(df)
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }
}

/// Read a CSV file with all columns typed as strings.
///
/// Missing files and rows longer than the header surface as `DataSource`.
/// Short rows are null-padded and left for the cleaner to drop.
pub(crate) fn read_text_csv(path: &Path) -> Result<DataFrame> {
    if !path.is_file() {
        return Err(PipelineError::DataSource(format!(
            "{} does not exist or is not a file",
            path.display()
        )));
    }

    LazyCsvReader::new(path)
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .with_ignore_errors(false)
        .finish()
        .and_then(|lazy| lazy.collect())
        .map_err(|e| PipelineError::DataSource(format!("{}: {}", path.display(), e)))
}
