//! Salary Dashboard Main Application
//! Two-page viewer: a navigation bar on top, the current page's charts below.

use crate::dashboard::{Page, Route};
use crate::gui::{ChartViewer, NavAction, NavBar};
use crate::pipeline::DashboardTables;
use egui::TopBottomPanel;
use std::sync::Arc;

/// Main application window. Only reads the tables computed at startup.
pub struct DashboardApp {
    tables: Arc<DashboardTables>,
    route: Route,
    nav_bar: NavBar,
    chart_viewer: ChartViewer,
}

impl DashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, tables: Arc<DashboardTables>, path: &str) -> Self {
        Self::with_tables(tables, path)
    }

    fn with_tables(tables: Arc<DashboardTables>, path: &str) -> Self {
        let route = Route::default();
        let mut app = Self {
            nav_bar: NavBar::new(route, tables.record_count),
            tables,
            route,
            chart_viewer: ChartViewer::new(),
        };
        app.navigate(path);
        app
    }

    /// Switch to the page serving `path`.
    fn navigate(&mut self, path: &str) {
        self.route = Route::from_path(path);
        self.nav_bar.path_input = self.route.path().to_string();
        self.chart_viewer
            .set_charts(self.route.title(), Page::charts(self.route, &self.tables));
        tracing::debug!(path, route = ?self.route, "Navigated");
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        TopBottomPanel::top("nav_bar").show(ctx, |ui| {
            ui.add_space(4.0);
            if let NavAction::Navigate(path) = self.nav_bar.show(ui, self.route) {
                self.navigate(&path);
            }
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });
    }
}
