//! Salary Dashboard - data-science salary survey explorer.
//!
//! Loads the survey CSV, cleans and enriches it, pre-computes every
//! aggregate once and serves two read-only dashboard pages.

pub mod charts;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod error;
pub mod gui;
pub mod logger;
pub mod pipeline;
pub mod stats;

pub use config::DashboardConfig;
pub use error::{PipelineError, Result};
pub use pipeline::{DashboardTables, Pipeline};
