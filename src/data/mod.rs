//! Data module - CSV loading, cleaning and enrichment

mod cleaner;
mod countries;
mod enricher;
mod loader;
mod schema;

pub use cleaner::{DataCleaner, DEFAULT_SENTINEL};
pub use enricher::{
    remote_ratio_label, CountryCodeMap, Enricher, DEFAULT_UNKNOWN_LABEL, REMOTE_RATIO_LABELS,
};
pub use loader::DataLoader;
pub use schema::{records_to_frame, validate_columns, ColumnKind, Record, SurveyColumn};
