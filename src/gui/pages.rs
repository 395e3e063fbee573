//! Page bodies for the content area.

use crate::charts::ChartPlotter;
use crate::gui::theme::Theme;
use crate::state::AppState;
use egui::{Align, ComboBox, Layout, RichText};
use egui_extras::{Column as TableColumn, TableBuilder};

/// Actions triggered from a page.
#[derive(Debug, Clone, PartialEq)]
pub enum PageAction {
    None,
    Upload,
    ApplyFilters,
    ExportCharts,
    ExportTable,
}

const CHART_HEIGHT: f32 = 260.0;
const CARD_SPACING: f32 = 10.0;

fn primary_button(text: &str) -> egui::Button<'static> {
    egui::Button::new(RichText::new(text).size(14.0).strong().color(egui::Color32::WHITE))
        .fill(Theme::ACCENT)
        .min_size(egui::vec2(180.0, 36.0))
}

fn page_heading(ui: &mut egui::Ui, text: &str) {
    ui.vertical_centered(|ui| {
        ui.add_space(20.0);
        ui.label(RichText::new(text).size(20.0).strong().color(Theme::TEXT_DARK));
        ui.add_space(10.0);
    });
}

fn empty_notice(ui: &mut egui::Ui, text: &str) {
    ui.vertical_centered(|ui| {
        ui.add_space(30.0);
        ui.label(RichText::new(text).size(16.0).color(Theme::ERROR));
    });
}

/// Landing page with the upload button.
pub fn show_home(ui: &mut egui::Ui, is_loading: bool, status: &str) -> PageAction {
    let mut action = PageAction::None;
    let avail = ui.available_rect_before_wrap();
    let card_size = egui::vec2(avail.width() * 0.4, avail.height() * 0.3).max(egui::vec2(360.0, 180.0));
    let card_rect = egui::Rect::from_center_size(avail.center(), card_size);

    ui.allocate_new_ui(egui::UiBuilder::new().max_rect(card_rect), |ui| {
        egui::Frame::none()
            .fill(egui::Color32::WHITE)
            .rounding(8.0)
            .inner_margin(20.0)
            .show(ui, |ui| {
                ui.set_min_size(card_size - egui::vec2(40.0, 40.0));
                ui.vertical_centered(|ui| {
                    ui.label(
                        RichText::new("🎓 Admission Database Simulator")
                            .size(18.0)
                            .strong()
                            .color(Theme::TEXT_DARK),
                    );
                    ui.add_space(20.0);

                    ui.add_enabled_ui(!is_loading, |ui| {
                        if ui.add(primary_button("Upload CSV / Excel")).clicked() {
                            action = PageAction::Upload;
                        }
                    });

                    ui.add_space(10.0);
                    if is_loading {
                        ui.horizontal(|ui| {
                            ui.spinner();
                            ui.label(status);
                        });
                    } else if !status.is_empty() {
                        ui.label(RichText::new(status).size(11.0).color(egui::Color32::GRAY));
                    }
                });
            });
    });

    action
}

fn filter_combo(ui: &mut egui::Ui, id: &str, value: &mut Option<String>, options: &[String]) {
    ComboBox::from_id_salt(id)
        .width(180.0)
        .selected_text(value.as_deref().unwrap_or(""))
        .show_ui(ui, |ui| {
            // Empty entry means no filter
            if ui.selectable_label(value.is_none(), "").clicked() {
                *value = None;
            }
            for option in options {
                let selected = value.as_deref() == Some(option.as_str());
                if ui.selectable_label(selected, option).clicked() {
                    *value = Some(option.clone());
                }
            }
        });
}

/// Course and admission-status drop-downs.
pub fn show_filters(ui: &mut egui::Ui, state: &mut AppState) -> PageAction {
    let mut action = PageAction::None;
    page_heading(ui, "Filter Applicants");

    ui.vertical_centered(|ui| {
        egui::Grid::new("filter_grid")
            .num_columns(4)
            .spacing([10.0, 10.0])
            .show(ui, |ui| {
                ui.label(RichText::new("Course:").size(14.0));
                filter_combo(ui, "course_filter", &mut state.selection.course, &state.options.courses);
                ui.label(RichText::new("Admission Status:").size(14.0));
                filter_combo(ui, "status_filter", &mut state.selection.status, &state.options.statuses);
                ui.end_row();
            });

        ui.add_space(20.0);
        if ui.add(primary_button("Apply Filters")).clicked() {
            action = PageAction::ApplyFilters;
        }

        if !state.has_data() {
            ui.add_space(10.0);
            ui.label(RichText::new("Upload a file to populate the filters.").color(egui::Color32::GRAY));
        }
    });

    action
}

fn chart_card(ui: &mut egui::Ui, title: &str, add_contents: impl FnOnce(&mut egui::Ui)) {
    egui::Frame::group(ui.style())
        .fill(egui::Color32::WHITE)
        .inner_margin(8.0)
        .show(ui, |ui| {
            ui.label(RichText::new(title).size(12.0).color(egui::Color32::GRAY));
            add_contents(ui);
        });
}

/// Bar and pie side by side, line chart underneath.
pub fn show_visualizations(ui: &mut egui::Ui, state: &AppState) -> PageAction {
    if !state.has_rows() {
        empty_notice(ui, "No data loaded!");
        return PageAction::None;
    }

    let mut action = PageAction::None;
    page_heading(ui, "📊 Data Visualizations");

    ui.horizontal(|ui| {
        ui.label(RichText::new(format!("{} records", state.summary.total)).strong());
        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            if ui.button("🖼 Export Charts (PNG)").clicked() {
                action = PageAction::ExportCharts;
            }
        });
    });

    let summary = &state.summary;
    egui::ScrollArea::vertical().show(ui, |ui| {
        let half = ((ui.available_width() - CARD_SPACING) / 2.0 - 20.0).max(200.0);

        ui.horizontal_top(|ui| {
            ui.vertical(|ui| {
                ui.set_width(half);
                chart_card(ui, "Bar Chart", |ui| {
                    ChartPlotter::draw_bar_chart(ui, summary, CHART_HEIGHT)
                });
            });
            ui.add_space(CARD_SPACING);
            ui.vertical(|ui| {
                ui.set_width(half);
                chart_card(ui, "Pie Chart", |ui| {
                    ChartPlotter::draw_pie_chart(ui, summary, CHART_HEIGHT)
                });
            });
        });

        ui.add_space(CARD_SPACING);
        chart_card(ui, "Line Chart", |ui| {
            ChartPlotter::draw_line_chart(ui, summary, CHART_HEIGHT)
        });
    });

    action
}

/// Every column of the filtered set.
pub fn show_table(ui: &mut egui::Ui, state: &AppState, row_height: f32) -> PageAction {
    if !state.has_rows() {
        empty_notice(ui, "No data to display!");
        return PageAction::None;
    }

    let mut action = PageAction::None;
    let table = &state.table;

    ui.add_space(10.0);
    ui.horizontal(|ui| {
        ui.label(RichText::new(format!("{} rows", table.rows.len())).strong());
        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            if ui.button("💾 Export Table (CSV)").clicked() {
                action = PageAction::ExportTable;
            }
        });
    });
    ui.add_space(10.0);

    egui::ScrollArea::horizontal().show(ui, |ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(Layout::centered_and_justified(egui::Direction::LeftToRight))
            .columns(TableColumn::initial(120.0).at_least(60.0), table.headers.len())
            .header(row_height + 4.0, |mut header| {
                for name in &table.headers {
                    header.col(|ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|body| {
                body.rows(row_height, table.rows.len(), |mut row| {
                    if let Some(cells) = table.rows.get(row.index()) {
                        for cell in cells {
                            row.col(|ui| {
                                ui.label(cell);
                            });
                        }
                    }
                });
            });
    });

    action
}
