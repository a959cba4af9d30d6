//! Chart Viewer Widget
//! Scrollable panel showing the charts of the current page.
//! Supports responsive multi-column layout based on available width.

use crate::charts::ChartPlotter;
use crate::dashboard::ChartSpec;
use egui::{RichText, ScrollArea};

/// Chart card configuration
const CHART_SPACING: f32 = 15.0;
const CARD_HEIGHT: f32 = 480.0;
const CHART_WIDTH: f32 = 780.0;
const PLOT_HEIGHT: f32 = 400.0;

/// Scrollable chart display area with responsive multi-column layout.
#[derive(Default)]
pub struct ChartViewer {
    pub title: String,
    pub charts: Vec<ChartSpec>,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_charts(&mut self, title: &str, charts: Vec<ChartSpec>) {
        self.title = title.to_string();
        self.charts = charts;
    }

    /// Draw the chart viewer with responsive multi-column layout
    pub fn show(&self, ui: &mut egui::Ui) {
        ui.heading(&self.title);
        ui.add_space(8.0);

        if self.charts.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        }

        let avail_width = ui.available_width();
        let card_total_width = CHART_WIDTH + CHART_SPACING;
        let num_columns = ((avail_width / card_total_width).floor() as usize).max(1);

        let total_items = self.charts.len();
        let total_rows = total_items.div_ceil(num_columns);
        let row_height = CARD_HEIGHT + CHART_SPACING;

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show_rows(ui, row_height, total_rows, |ui, row_range| {
                for row in row_range {
                    ui.horizontal(|ui| {
                        for col in 0..num_columns {
                            let idx = row * num_columns + col;
                            if let Some(spec) = self.charts.get(idx) {
                                Self::draw_chart_card(ui, spec);
                                ui.add_space(CHART_SPACING);
                            }
                        }
                    });
                    ui.add_space(CHART_SPACING);
                }
            });
    }

    fn draw_chart_card(ui: &mut egui::Ui, spec: &ChartSpec) {
        let card_width = CHART_WIDTH - 20.0;

        egui::Frame::none()
            .rounding(8.0)
            .stroke(egui::Stroke::new(1.0, ui.visuals().widgets.noninteractive.bg_stroke.color))
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_width(card_width);
                ui.vertical(|ui| {
                    ui.label(RichText::new(&spec.title).size(16.0).strong());
                    ui.add_space(8.0);
                    ChartPlotter::draw_chart(ui, spec, PLOT_HEIGHT);
                });
            });
    }
}
