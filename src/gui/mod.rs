//! GUI module - User interface components

mod app;
mod chart_viewer;
mod nav_bar;

pub use app::DashboardApp;
pub use chart_viewer::ChartViewer;
pub use nav_bar::{NavAction, NavBar};
