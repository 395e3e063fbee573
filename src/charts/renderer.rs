//! Static Chart Renderer
//! Writes the visualizations page to a PNG with plotters.
//!
//! Layout:
//! 1. Top left: Admissions by Course (bar)
//! 2. Top right: Admission Status (pie with percentages)
//! 3. Bottom, full width: Admissions Over Years (line with markers)

use crate::charts::summary::{pie_slices, ChartSummary};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;
use thiserror::Error;

const BAR_COLOR: RGBColor = RGBColor(59, 130, 246);
const LINE_COLOR: RGBColor = RGBColor(16, 185, 129);
const PIE_COLORS: [RGBColor; 10] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
    RGBColor(188, 189, 34),
    RGBColor(23, 190, 207),
];

const FONT: &str = "sans-serif";

#[derive(Error, Debug)]
pub enum RendererError {
    #[error("Nothing to render")]
    Empty,
    #[error("Drawing failed: {0}")]
    Draw(String),
}

fn draw_err<E: std::fmt::Display>(e: E) -> RendererError {
    RendererError::Draw(e.to_string())
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render all three charts into a single PNG at `path`.
    pub fn render_png(
        summary: &ChartSummary,
        path: &Path,
        size: (u32, u32),
    ) -> Result<(), RendererError> {
        if summary.is_empty() {
            return Err(RendererError::Empty);
        }

        let root = BitMapBackend::new(path, size).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;

        let (top, bottom) = root.split_vertically((size.1 / 2) as i32);
        let (left, right) = top.split_horizontally((size.0 / 2) as i32);

        Self::draw_bar(&left, summary)?;
        Self::draw_pie(&right, summary)?;
        Self::draw_line(&bottom, summary)?;

        root.present().map_err(draw_err)?;
        log::info!("Rendered charts to {}", path.display());
        Ok(())
    }

    fn draw_bar<DB: DrawingBackend>(
        area: &DrawingArea<DB, Shift>,
        summary: &ChartSummary,
    ) -> Result<(), RendererError> {
        let labels: Vec<String> = summary.by_course.iter().map(|(c, _)| c.clone()).collect();
        let n = labels.len().max(1) as u32;
        let y_max = summary.by_course.iter().map(|(_, c)| *c).max().unwrap_or(0) as u32 + 1;

        let mut chart = ChartBuilder::on(area)
            .caption("Admissions by Course", (FONT, 20))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(45)
            .build_cartesian_2d((0u32..n).into_segmented(), 0u32..y_max)
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc("Course")
            .y_desc("Count")
            .x_labels(labels.len().max(1))
            .x_label_formatter(&|v| match v {
                SegmentValue::CenterOf(i) => labels.get(*i as usize).cloned().unwrap_or_default(),
                _ => String::new(),
            })
            .draw()
            .map_err(draw_err)?;

        chart
            .draw_series(
                Histogram::vertical(&chart)
                    .style(BAR_COLOR.filled())
                    .margin(15)
                    .data(
                        summary
                            .by_course
                            .iter()
                            .enumerate()
                            .map(|(i, (_, c))| (i as u32, *c as u32)),
                    ),
            )
            .map_err(draw_err)?;

        Ok(())
    }

    fn draw_pie<DB: DrawingBackend>(
        area: &DrawingArea<DB, Shift>,
        summary: &ChartSummary,
    ) -> Result<(), RendererError> {
        let (w, h) = area.dim_in_pixel();
        let center = (w as f64 / 2.0, h as f64 / 2.0);
        let radius = (w.min(h) as f64 / 2.0 - 50.0).max(10.0);
        let point_at = |angle: f64, r: f64| {
            (
                (center.0 + r * angle.cos()).round() as i32,
                (center.1 - r * angle.sin()).round() as i32,
            )
        };

        let slices = pie_slices(&summary.by_status);
        for (i, slice) in slices.iter().enumerate() {
            let color = PIE_COLORS[i % PIE_COLORS.len()];
            let steps = ((slice.fraction * 120.0).ceil() as usize).max(1);
            let step = (slice.end_angle - slice.start_angle) / steps as f64;

            let mut points = vec![point_at(0.0, 0.0)];
            points.extend((0..=steps).map(|s| point_at(slice.start_angle + step * s as f64, radius)));
            area.draw(&Polygon::new(points, color.filled()))
                .map_err(draw_err)?;

            let mid = slice.mid_angle();
            let inner = point_at(mid, radius * 0.6);
            let pct_style = TextStyle::from((FONT, 14).into_font())
                .color(&WHITE)
                .pos(Pos::new(HPos::Center, VPos::Center));
            area.draw(&Text::new(slice.percent_label(), inner, pct_style))
                .map_err(draw_err)?;

            let h_pos = if mid.cos() >= 0.0 { HPos::Left } else { HPos::Right };
            let label_style = TextStyle::from((FONT, 15).into_font())
                .color(&BLACK)
                .pos(Pos::new(h_pos, VPos::Center));
            area.draw(&Text::new(slice.label.clone(), point_at(mid, radius * 1.1), label_style))
                .map_err(draw_err)?;
        }

        Ok(())
    }

    fn draw_line<DB: DrawingBackend>(
        area: &DrawingArea<DB, Shift>,
        summary: &ChartSummary,
    ) -> Result<(), RendererError> {
        let labels: Vec<String> = summary.by_year.iter().map(|(y, _)| y.clone()).collect();
        let x_max = (labels.len().max(2) - 1) as f64;
        let y_max = summary.by_year.iter().map(|(_, c)| *c).max().unwrap_or(0) as f64 + 1.0;

        let mut chart = ChartBuilder::on(area)
            .caption("Admissions Over Years", (FONT, 20))
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(45)
            .build_cartesian_2d(-0.25f64..x_max + 0.25, 0f64..y_max)
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .x_desc("Year")
            .y_desc("Count")
            .x_labels(labels.len().max(2) * 4)
            .x_label_formatter(&|v| {
                let idx = v.round();
                if idx < 0.0 || (v - idx).abs() > 1e-6 {
                    return String::new();
                }
                labels.get(idx as usize).cloned().unwrap_or_default()
            })
            .y_label_formatter(&|v| format!("{:.0}", v))
            .draw()
            .map_err(draw_err)?;

        let points: Vec<(f64, f64)> = summary
            .by_year
            .iter()
            .enumerate()
            .map(|(i, (_, c))| (i as f64, *c as f64))
            .collect();

        chart
            .draw_series(LineSeries::new(points.iter().copied(), LINE_COLOR.stroke_width(2)))
            .map_err(draw_err)?;
        chart
            .draw_series(
                points
                    .iter()
                    .map(|&p| Circle::new(p, 5, LINE_COLOR.filled())),
            )
            .map_err(draw_err)?;

        Ok(())
    }
}
