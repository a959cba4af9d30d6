//! Charts module - Chart rendering

mod palette;
mod plotter;
mod renderer;

pub use plotter::ChartPlotter;
pub use renderer::{RenderError, StaticChartRenderer};

/// Label for a category axis tick, empty between categories.
pub(crate) fn category_label(keys: &[String], value: f64) -> String {
    let idx = value.round();
    if (value - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    keys.get(idx as usize).cloned().unwrap_or_default()
}
