//! Pipeline error types.

use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Failed to read data source: {0}")]
    DataSource(String),

    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),

    #[error("Missing required column: {column}")]
    MissingColumn { column: String },

    #[error("Column '{column}' row {row}: cannot parse '{value}' as {expected}")]
    TypeCoercion {
        column: String,
        row: usize,
        value: String,
        expected: &'static str,
    },

    #[error("Failed to load country map from {path}: {message}")]
    CountryMap { path: String, message: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
