//! Dashboard module - routing and page composition

mod page;
mod route;

pub use page::{slice_label, ChartKind, ChartSpec, Page};
pub use route::{Route, OVERVIEW_PATH, TRUST_DATA_PATH};
