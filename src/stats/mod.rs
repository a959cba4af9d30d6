//! Stats module - grouped summaries and distributions

mod aggregator;
mod distribution;

pub use aggregator::{
    Aggregator, LongTail, SummaryRow, DEFAULT_OTHER_LABEL, DEFAULT_OTHER_THRESHOLD,
};
pub use distribution::{BoxSummary, DistributionCalculator, Histogram, HistogramBin};
