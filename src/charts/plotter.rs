//! Chart Plotter Module
//! Interactive bar, pie and line charts for the visualizations page.

use crate::charts::summary::{pie_slices, ChartSummary};
use egui::{pos2, vec2, Align2, Color32, FontId, Sense, Shape, Stroke};
use egui_plot::{Bar, BarChart, GridMark, Line, Plot, PlotPoints, Points};

pub const BAR_COLOR: Color32 = Color32::from_rgb(59, 130, 246); // #3b82f6
pub const LINE_COLOR: Color32 = Color32::from_rgb(16, 185, 129); // #10b981

/// Pie wedge palette
pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(31, 119, 180),  // Blue
    Color32::from_rgb(255, 127, 14),  // Orange
    Color32::from_rgb(44, 160, 44),   // Green
    Color32::from_rgb(214, 39, 40),   // Red
    Color32::from_rgb(148, 103, 189), // Purple
    Color32::from_rgb(140, 86, 75),   // Brown
    Color32::from_rgb(227, 119, 194), // Pink
    Color32::from_rgb(127, 127, 127), // Grey
    Color32::from_rgb(188, 189, 34),  // Olive
    Color32::from_rgb(23, 190, 207),  // Cyan
];

/// Segments used to approximate a full circle.
const PIE_SEGMENTS: f64 = 120.0;

pub fn slice_color(index: usize) -> Color32 {
    PALETTE[index % PALETTE.len()]
}

/// One grid mark per category so every bar / year gets its label.
fn category_marks(count: usize) -> Vec<GridMark> {
    (0..count)
        .map(|i| GridMark {
            value: i as f64,
            step_size: 1.0,
        })
        .collect()
}

fn category_label(labels: &[String], value: f64) -> String {
    let idx = value.round();
    if idx < 0.0 || (value - idx).abs() > 1e-6 {
        return String::new();
    }
    labels.get(idx as usize).cloned().unwrap_or_default()
}

/// Draws the admission charts with egui_plot and the egui painter.
pub struct ChartPlotter;

impl ChartPlotter {
    /// "Admissions by Course" bar chart.
    pub fn draw_bar_chart(ui: &mut egui::Ui, summary: &ChartSummary, height: f32) {
        let labels: Vec<String> = summary.by_course.iter().map(|(c, _)| c.clone()).collect();
        let count = labels.len();

        let bars: Vec<Bar> = summary
            .by_course
            .iter()
            .enumerate()
            .map(|(i, (course, n))| {
                Bar::new(i as f64, *n as f64)
                    .name(course)
                    .width(0.5)
                    .fill(BAR_COLOR)
            })
            .collect();

        ui.label(egui::RichText::new("Admissions by Course").strong());
        Plot::new("bar_by_course")
            .height(height)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .x_axis_label("Course")
            .y_axis_label("Count")
            .include_y(0.0)
            .x_grid_spacer(move |_input| category_marks(count))
            .x_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).color(BAR_COLOR).name("Count"));
            });
    }

    /// Admission status pie with outer labels and inner percentages.
    pub fn draw_pie_chart(ui: &mut egui::Ui, summary: &ChartSummary, height: f32) {
        let width = ui.available_width().max(height);
        let (rect, response) = ui.allocate_exact_size(vec2(width, height), Sense::hover());
        let painter = ui.painter_at(rect);

        let center = rect.center();
        let radius = (rect.width().min(rect.height()) / 2.0 - 30.0).max(10.0);
        let text_color = ui.visuals().text_color();
        let slices = pie_slices(&summary.by_status);
        let point_at = |angle: f64, r: f32| {
            pos2(
                center.x + r * angle.cos() as f32,
                center.y - r * angle.sin() as f32,
            )
        };

        let mut hovered: Option<usize> = None;
        let hover_pos = response.hover_pos();

        for (i, slice) in slices.iter().enumerate() {
            let color = slice_color(i);
            let steps = ((slice.fraction * PIE_SEGMENTS).ceil() as usize).max(1);
            let step = (slice.end_angle - slice.start_angle) / steps as f64;

            // Triangle fan keeps every piece convex for wide wedges
            for s in 0..steps {
                let a = slice.start_angle + step * s as f64;
                let b = a + step;
                painter.add(Shape::convex_polygon(
                    vec![center, point_at(a, radius), point_at(b, radius)],
                    color,
                    Stroke::NONE,
                ));
            }

            if let Some(pos) = hover_pos {
                let d = pos - center;
                if d.length() <= radius {
                    let angle = (-(d.y as f64)).atan2(d.x as f64).rem_euclid(std::f64::consts::TAU);
                    if angle >= slice.start_angle && angle < slice.end_angle {
                        hovered = Some(i);
                    }
                }
            }

            painter.text(
                point_at(slice.mid_angle(), radius * 0.6),
                Align2::CENTER_CENTER,
                slice.percent_label(),
                FontId::proportional(12.0),
                Color32::WHITE,
            );

            let mid = slice.mid_angle();
            let anchor = if mid.cos() >= 0.0 {
                Align2::LEFT_CENTER
            } else {
                Align2::RIGHT_CENTER
            };
            painter.text(
                point_at(mid, radius * 1.1),
                anchor,
                &slice.label,
                FontId::proportional(13.0),
                text_color,
            );
        }

        if let Some(slice) = hovered.and_then(|i| slices.get(i)) {
            response.on_hover_text(format!(
                "{}: {} ({})",
                slice.label,
                slice.count,
                slice.percent_label()
            ));
        }
    }

    /// "Admissions Over Years" line chart with markers.
    pub fn draw_line_chart(ui: &mut egui::Ui, summary: &ChartSummary, height: f32) {
        let labels: Vec<String> = summary.by_year.iter().map(|(y, _)| y.clone()).collect();
        let count = labels.len();

        let points_vec: Vec<[f64; 2]> = summary
            .by_year
            .iter()
            .enumerate()
            .map(|(i, (_, n))| [i as f64, *n as f64])
            .collect();

        ui.label(egui::RichText::new("Admissions Over Years").strong());
        Plot::new("line_by_year")
            .height(height)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .x_axis_label("Year")
            .y_axis_label("Count")
            .include_y(0.0)
            .x_grid_spacer(move |_input| category_marks(count))
            .x_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(PlotPoints::from_iter(points_vec.iter().copied()))
                        .color(LINE_COLOR)
                        .width(2.0)
                        .name("Count"),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from_iter(points_vec.iter().copied()))
                        .radius(4.0)
                        .color(LINE_COLOR),
                );
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_labels_only_on_whole_ticks() {
        let labels = vec!["CS".to_string(), "Math".to_string()];
        assert_eq!(category_label(&labels, 0.0), "CS");
        assert_eq!(category_label(&labels, 1.0), "Math");
        assert_eq!(category_label(&labels, 0.5), "");
        assert_eq!(category_label(&labels, 2.0), "");
        assert_eq!(category_label(&labels, -1.0), "");
    }

    #[test]
    fn palette_wraps_around() {
        assert_eq!(slice_color(0), slice_color(PALETTE.len()));
        assert_ne!(slice_color(0), slice_color(1));
    }

    #[test]
    fn one_grid_mark_per_category() {
        let marks = category_marks(3);
        let values: Vec<f64> = marks.iter().map(|m| m.value).collect();
        assert_eq!(values, vec![0.0, 1.0, 2.0]);
    }
}
