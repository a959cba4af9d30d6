//! Chart Plotter Module
//! Draws dashboard chart specifications with egui_plot.

use crate::charts::{category_label, palette};
use crate::dashboard::{slice_label, ChartKind, ChartSpec};
use crate::stats::{BoxSummary, Histogram, SummaryRow};
use egui::Color32;
use egui_plot::{
    Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Legend, Plot, PlotPoint, PlotPoints, Polygon,
    Text,
};
use std::f64::consts::TAU;

/// Largest arc drawn as one polygon; keeps every slice piece convex.
const MAX_SLICE_STEP: f64 = TAU / 16.0;

fn color32((r, g, b): (u8, u8, u8)) -> Color32 {
    Color32::from_rgb(r, g, b)
}

/// Draws charts with egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Draw one chart of the given height.
    pub fn draw_chart(ui: &mut egui::Ui, spec: &ChartSpec, height: f32) {
        match &spec.kind {
            ChartKind::Box(boxes) => Self::draw_box_chart(ui, spec, boxes, height),
            ChartKind::HorizontalBar(rows) => Self::draw_bar_chart(ui, spec, rows, height, false),
            ChartKind::Choropleth(rows) => Self::draw_bar_chart(ui, spec, rows, height, true),
            ChartKind::Histogram(hist) => Self::draw_histogram(ui, spec, hist, height),
            ChartKind::Pie(rows) => Self::draw_pie(ui, spec, rows, height),
        }
    }

    /// Boxplot per category. X-axis: categories, Y-axis: values.
    fn draw_box_chart(ui: &mut egui::Ui, spec: &ChartSpec, boxes: &[BoxSummary], height: f32) {
        let keys: Vec<String> = boxes.iter().map(|b| b.key.clone()).collect();

        Plot::new(spec.id)
            .height(height)
            .allow_scroll(false)
            .x_axis_label(spec.x_label)
            .y_axis_label(spec.y_label)
            .x_axis_formatter(move |mark, _range| category_label(&keys, mark.value))
            .show(ui, |plot_ui| {
                for (i, b) in boxes.iter().enumerate() {
                    let color = color32(palette::categorical(i));
                    let elem = BoxElem::new(
                        i as f64,
                        BoxSpread::new(b.lower_whisker, b.q1, b.median, b.q3, b.upper_whisker),
                    )
                    .name(format!("{} (n={}, mean={:.0})", b.key, b.count, b.mean))
                    .box_width(0.5)
                    .fill(color.gamma_multiply(0.3))
                    .stroke(egui::Stroke::new(1.5, color));

                    plot_ui.box_plot(BoxPlot::new(vec![elem]).name(&b.key));
                }
            });
    }

    /// Horizontal bars, one per row, first row at the bottom.
    ///
    /// With `sequential` the bars are coloured by value like a choropleth.
    fn draw_bar_chart(
        ui: &mut egui::Ui,
        spec: &ChartSpec,
        rows: &[SummaryRow],
        height: f32,
        sequential: bool,
    ) {
        let keys: Vec<String> = rows.iter().map(|r| r.key.clone()).collect();
        let (min, max) = palette::value_range(rows.iter().map(|r| r.value));
        let default_color = color32(palette::categorical(0));

        let bars: Vec<Bar> = rows
            .iter()
            .enumerate()
            .map(|(i, r)| {
                let fill = if sequential {
                    color32(palette::sequential(r.value, min, max))
                } else {
                    default_color
                };
                Bar::new(i as f64, r.value)
                    .name(&r.key)
                    .width(0.8)
                    .fill(fill)
            })
            .collect();

        Plot::new(spec.id)
            .height(height)
            .allow_scroll(false)
            .x_axis_label(spec.x_label)
            .y_axis_label(spec.y_label)
            .y_axis_formatter(move |mark, _range| category_label(&keys, mark.value))
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).horizontal().name(&spec.title));
            });
    }

    fn draw_histogram(ui: &mut egui::Ui, spec: &ChartSpec, hist: &Histogram, height: f32) {
        let color = color32(palette::categorical(0));
        let bars: Vec<Bar> = hist
            .bins
            .iter()
            .map(|bin| {
                let width = (bin.end - bin.start).max(1.0);
                Bar::new((bin.start + bin.end) / 2.0, bin.count as f64)
                    .width(width)
                    .fill(color)
                    .name(format!("{:.0} - {:.0}", bin.start, bin.end))
            })
            .collect();

        Plot::new(spec.id)
            .height(height)
            .allow_scroll(false)
            .x_axis_label(spec.x_label)
            .y_axis_label(spec.y_label)
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).name(&spec.title));
            });
    }

    /// Donut chart built from convex polygon pieces, with percentage labels.
    fn draw_pie(ui: &mut egui::Ui, spec: &ChartSpec, rows: &[SummaryRow], height: f32) {
        let total: f64 = rows.iter().map(|r| r.value).sum();

        Plot::new(spec.id)
            .height(height)
            .data_aspect(1.0)
            .show_axes(false)
            .show_grid(false)
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .legend(Legend::default())
            .show(ui, |plot_ui| {
                if total <= 0.0 {
                    return;
                }

                let mut start = 0.0;
                for (i, row) in rows.iter().enumerate() {
                    let sweep = row.value / total * TAU;
                    let color = color32(palette::categorical(i));
                    let label = slice_label(row, total);

                    for piece in Self::slice_pieces(start, sweep, 0.3, 1.0) {
                        plot_ui.polygon(
                            Polygon::new(PlotPoints::new(piece))
                                .fill_color(color)
                                .stroke(egui::Stroke::new(1.0, Color32::WHITE))
                                .name(&label),
                        );
                    }

                    let mid = start + sweep / 2.0;
                    if sweep > 0.15 {
                        plot_ui.text(Text::new(
                            PlotPoint::new(0.65 * mid.cos(), 0.65 * mid.sin()),
                            label,
                        ));
                    }
                    start += sweep;
                }
            });
    }

    /// Split an annular sector into quadrilaterals of at most `MAX_SLICE_STEP`.
    fn slice_pieces(start: f64, sweep: f64, inner: f64, outer: f64) -> Vec<Vec<[f64; 2]>> {
        let steps = (sweep / MAX_SLICE_STEP).ceil().max(1.0) as usize;
        let step = sweep / steps as f64;

        (0..steps)
            .map(|s| {
                let a0 = start + s as f64 * step;
                let a1 = a0 + step;
                vec![
                    [inner * a0.cos(), inner * a0.sin()],
                    [outer * a0.cos(), outer * a0.sin()],
                    [outer * a1.cos(), outer * a1.sin()],
                    [inner * a1.cos(), inner * a1.sin()],
                ]
            })
            .collect()
    }
}
