//! Static Chart Renderer
//! Renders dashboard chart specifications to PNG files with plotters.
//!
//! Layout per image:
//! 1. Title centered at the top
//! 2. Chart area with axis descriptions
//! 3. Category labels on the category axis, percentage labels on pie slices

use crate::charts::{category_label, palette};
use crate::dashboard::{slice_label, ChartKind, ChartSpec, Page, Route};
use crate::pipeline::DashboardTables;
use crate::stats::{BoxSummary, Histogram, SummaryRow};
use plotters::element::Pie;
use plotters::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Drawing failed: {0}")]
    Draw(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn draw_err<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Draw(e.to_string())
}

fn rgb((r, g, b): (u8, u8, u8)) -> RGBColor {
    RGBColor(r, g, b)
}

type Area<'a> = DrawingArea<BitMapBackend<'a>, plotters::coord::Shift>;

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render every chart of `route` into `out_dir`, one `<id>.png` per chart.
    pub fn render_page(
        route: Route,
        tables: &DashboardTables,
        out_dir: &Path,
        width: u32,
        height: u32,
    ) -> Result<Vec<PathBuf>, RenderError> {
        std::fs::create_dir_all(out_dir)?;

        let mut written = Vec::new();
        for spec in Page::charts(route, tables) {
            let path = out_dir.join(format!("{}.png", spec.id));
            Self::render_png(&spec, &path, width, height)?;
            tracing::debug!(chart = spec.id, path = %path.display(), "Rendered chart");
            written.push(path);
        }
        Ok(written)
    }

    /// Render one chart to a PNG file.
    pub fn render_png(
        spec: &ChartSpec,
        path: &Path,
        width: u32,
        height: u32,
    ) -> Result<(), RenderError> {
        let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;

        match &spec.kind {
            ChartKind::Box(boxes) => Self::draw_boxes(&root, spec, boxes)?,
            ChartKind::HorizontalBar(rows) => Self::draw_bars(&root, spec, rows, false)?,
            ChartKind::Choropleth(rows) => Self::draw_bars(&root, spec, rows, true)?,
            ChartKind::Histogram(hist) => Self::draw_histogram(&root, spec, hist)?,
            ChartKind::Pie(rows) => Self::draw_pie(&root, spec, rows)?,
        }

        root.present().map_err(draw_err)?;
        Ok(())
    }

    fn padded_range(min: f64, max: f64) -> (f64, f64) {
        if max > min {
            let pad = (max - min) * 0.1;
            (min - pad, max + pad)
        } else {
            (min - 1.0, max + 1.0)
        }
    }

    fn draw_boxes(root: &Area, spec: &ChartSpec, boxes: &[BoxSummary]) -> Result<(), RenderError> {
        let (lo, hi) = palette::value_range(
            boxes
                .iter()
                .flat_map(|b| [b.lower_whisker, b.upper_whisker]),
        );
        let (y_min, y_max) = Self::padded_range(lo, hi);
        let n = boxes.len().max(1);

        let mut chart = ChartBuilder::on(root)
            .caption(&spec.title, ("sans-serif", 24))
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(80)
            .build_cartesian_2d(-0.5f64..(n as f64 - 0.5), y_min..y_max)
            .map_err(draw_err)?;

        let keys: Vec<String> = boxes.iter().map(|b| b.key.clone()).collect();
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(n)
            .x_label_formatter(&|x| category_label(&keys, *x))
            .x_desc(spec.x_label)
            .y_desc(spec.y_label)
            .draw()
            .map_err(draw_err)?;

        for (i, b) in boxes.iter().enumerate() {
            let color = rgb(palette::categorical(i));
            let x = i as f64;
            let half = 0.25;

            chart
                .draw_series(std::iter::once(Rectangle::new(
                    [(x - half, b.q1), (x + half, b.q3)],
                    color.mix(0.3).filled(),
                )))
                .map_err(draw_err)?;

            let lines = vec![
                vec![
                    (x - half, b.q1),
                    (x + half, b.q1),
                    (x + half, b.q3),
                    (x - half, b.q3),
                    (x - half, b.q1),
                ],
                vec![(x - half, b.median), (x + half, b.median)],
                vec![(x, b.lower_whisker), (x, b.q1)],
                vec![(x, b.q3), (x, b.upper_whisker)],
                vec![(x - half / 2.0, b.lower_whisker), (x + half / 2.0, b.lower_whisker)],
                vec![(x - half / 2.0, b.upper_whisker), (x + half / 2.0, b.upper_whisker)],
            ];
            chart
                .draw_series(
                    lines
                        .into_iter()
                        .map(|points| PathElement::new(points, color.stroke_width(2))),
                )
                .map_err(draw_err)?;

            chart
                .draw_series(std::iter::once(Circle::new((x, b.mean), 4, BLACK.filled())))
                .map_err(draw_err)?;
        }
        Ok(())
    }

    /// Horizontal bars, first row at the bottom, keys on the category axis.
    fn draw_bars(
        root: &Area,
        spec: &ChartSpec,
        rows: &[SummaryRow],
        sequential: bool,
    ) -> Result<(), RenderError> {
        let (min, max) = palette::value_range(rows.iter().map(|r| r.value));
        let x_max = if max > 0.0 { max * 1.05 } else { 1.0 };
        let n = rows.len().max(1);

        let mut chart = ChartBuilder::on(root)
            .caption(&spec.title, ("sans-serif", 24))
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(200)
            .build_cartesian_2d(0f64..x_max, -0.5f64..(n as f64 - 0.5))
            .map_err(draw_err)?;

        let keys: Vec<String> = rows.iter().map(|r| r.key.clone()).collect();
        chart
            .configure_mesh()
            .disable_y_mesh()
            .y_labels(n)
            .y_label_formatter(&|y| category_label(&keys, *y))
            .x_desc(spec.x_label)
            .y_desc(spec.y_label)
            .draw()
            .map_err(draw_err)?;

        chart
            .draw_series(rows.iter().enumerate().map(|(i, r)| {
                let color = if sequential {
                    rgb(palette::sequential(r.value, min, max))
                } else {
                    rgb(palette::categorical(0))
                };
                let y = i as f64;
                Rectangle::new([(0.0, y - 0.4), (r.value, y + 0.4)], color.filled())
            }))
            .map_err(draw_err)?;
        Ok(())
    }

    fn draw_histogram(root: &Area, spec: &ChartSpec, hist: &Histogram) -> Result<(), RenderError> {
        let x_min = hist.bins.first().map_or(0.0, |b| b.start);
        let x_max = hist.bins.last().map_or(1.0, |b| b.end);
        let (x_min, x_max) = if x_max > x_min {
            (x_min, x_max)
        } else {
            Self::padded_range(x_min, x_max)
        };
        let y_max = hist.bins.iter().map(|b| b.count).max().unwrap_or(0).max(1) as f64 * 1.05;

        let mut chart = ChartBuilder::on(root)
            .caption(&spec.title, ("sans-serif", 24))
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(x_min..x_max, 0f64..y_max)
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_label_formatter(&|x| format!("{:.0}", x))
            .x_desc(spec.x_label)
            .y_desc(spec.y_label)
            .draw()
            .map_err(draw_err)?;

        let color = rgb(palette::categorical(0));
        chart
            .draw_series(hist.bins.iter().map(|bin| {
                let (start, end) = if bin.end > bin.start {
                    (bin.start, bin.end)
                } else {
                    (x_min, x_max)
                };
                Rectangle::new([(start, 0.0), (end, bin.count as f64)], color.filled())
            }))
            .map_err(draw_err)?;
        Ok(())
    }

    fn draw_pie(root: &Area, spec: &ChartSpec, rows: &[SummaryRow]) -> Result<(), RenderError> {
        let (width, height) = root.dim_in_pixel();
        let titled = root
            .titled(&spec.title, ("sans-serif", 24))
            .map_err(draw_err)?;

        let total: f64 = rows.iter().map(|r| r.value).sum();
        if total <= 0.0 {
            return Ok(());
        }

        let center = (width as i32 / 2, height as i32 / 2);
        let radius = (width.min(height) as f64) * 0.32;
        let sizes: Vec<f64> = rows.iter().map(|r| r.value).collect();
        let colors: Vec<RGBColor> = (0..rows.len())
            .map(|i| rgb(palette::categorical(i)))
            .collect();
        let labels: Vec<String> = rows.iter().map(|r| slice_label(r, total)).collect();

        let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
        pie.start_angle(-90.0);
        pie.label_style(("sans-serif", 14).into_font().color(&BLACK));
        titled.draw(&pie).map_err(draw_err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padded_range_widens_degenerate_ranges() {
        assert_eq!(StaticChartRenderer::padded_range(5.0, 5.0), (4.0, 6.0));
        let (lo, hi) = StaticChartRenderer::padded_range(0.0, 10.0);
        assert!(lo < 0.0 && hi > 10.0);
    }
}
