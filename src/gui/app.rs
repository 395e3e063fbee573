//! Admission Viewer Main Application
//! Header, sidebar navigation and the page content area.

use crate::charts::StaticChartRenderer;
use crate::config::AppConfig;
use crate::data::{export_csv, DataLoader};
use crate::gui::pages::{self, PageAction};
use crate::gui::theme::Theme;
use crate::gui::Sidebar;
use crate::state::{AppState, Page};
use egui::{RichText, SidePanel, TextureHandle, TopBottomPanel};
use polars::prelude::DataFrame;
use rfd::{MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};
use std::thread;

/// Spreadsheet loading result from background thread
enum LoadResult {
    Progress(String),
    Complete { df: DataFrame, path: PathBuf },
    Error(String),
}

/// Main application window.
pub struct AdmissionApp {
    config: AppConfig,
    state: AppState,
    background: Option<TextureHandle>,
    status: String,

    // Background loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
}

impl AdmissionApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        Theme::apply(&cc.egui_ctx);
        let background = config
            .background_image
            .as_deref()
            .and_then(|path| Self::load_background(&cc.egui_ctx, path));

        Self {
            config,
            state: AppState::default(),
            background,
            status: String::new(),
            load_rx: None,
            is_loading: false,
        }
    }

    /// Background picture for every page. Missing files are skipped.
    fn load_background(ctx: &egui::Context, path: &Path) -> Option<TextureHandle> {
        if !path.exists() {
            log::debug!("No background image at {}", path.display());
            return None;
        }

        match image::open(path) {
            Ok(img) => {
                let rgba = img.to_rgba8();
                let size = [rgba.width() as usize, rgba.height() as usize];
                let color_image = egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
                Some(ctx.load_texture("page_background", color_image, egui::TextureOptions::LINEAR))
            }
            Err(e) => {
                log::warn!("Failed to load background {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Pick a spreadsheet and load it on a background thread.
    fn handle_upload(&mut self) {
        if self.is_loading {
            return;
        }

        let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV files", &["csv"])
            .add_filter("Excel files", &["xls", "xlsx"])
            .pick_file()
        else {
            return;
        };

        self.status = "Loading file...".to_string();
        self.is_loading = true;

        let (tx, rx) = channel();
        self.load_rx = Some(rx);

        thread::spawn(move || {
            let _ = tx.send(LoadResult::Progress(format!(
                "Reading {}...",
                path.file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default()
            )));

            let result = match DataLoader::load_file(&path) {
                Ok(df) => LoadResult::Complete { df, path },
                Err(e) => {
                    log::error!("Failed to load {}: {}", path.display(), e);
                    LoadResult::Error(e.to_string())
                }
            };
            let _ = tx.send(result);
        });
    }

    /// Check for loading results
    fn check_load_results(&mut self) {
        let Some(rx) = self.load_rx.take() else {
            return;
        };
        let mut should_keep_receiver = true;

        while let Ok(result) = rx.try_recv() {
            match result {
                LoadResult::Progress(status) => {
                    self.status = status;
                }
                LoadResult::Complete { df, path } => {
                    self.state.set_dataset(df, path);
                    let file_name = self
                        .state
                        .loader
                        .get_file_path()
                        .and_then(|p| p.file_name())
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_default();
                    self.status = format!(
                        "Loaded {} rows, {} columns from {}",
                        self.state.loader.get_row_count(),
                        self.state.loader.get_columns().len(),
                        file_name
                    );
                    self.is_loading = false;
                    should_keep_receiver = false;

                    Self::show_message(MessageLevel::Info, "Success", "File loaded successfully!");
                }
                LoadResult::Error(error) => {
                    self.status = format!("Error: {}", error);
                    self.is_loading = false;
                    should_keep_receiver = false;

                    Self::show_message(MessageLevel::Error, "Error", &error);
                }
            }
        }

        if should_keep_receiver {
            self.load_rx = Some(rx);
        }
    }

    fn handle_apply_filters(&mut self) {
        if let Err(e) = self.state.apply_selection() {
            log::error!("Filtering failed: {}", e);
            Self::show_message(MessageLevel::Error, "Error", &e.to_string());
        }
    }

    fn handle_export_charts(&self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG image", &["png"])
            .set_file_name("admission_charts.png")
            .save_file()
        else {
            return;
        };

        let [w, h] = self.config.export_size;
        match StaticChartRenderer::render_png(&self.state.summary, &path, (w, h)) {
            Ok(()) => Self::offer_to_open(&path),
            Err(e) => {
                log::error!("Chart export failed: {}", e);
                Self::show_message(MessageLevel::Error, "Export failed", &e.to_string());
            }
        }
    }

    fn handle_export_table(&self) {
        let Some(df) = self.state.filtered.as_ref() else {
            return;
        };
        let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV files", &["csv"])
            .set_file_name("admissions_filtered.csv")
            .save_file()
        else {
            return;
        };

        match export_csv(df, &path) {
            Ok(()) => Self::offer_to_open(&path),
            Err(e) => {
                log::error!("Table export failed: {}", e);
                Self::show_message(MessageLevel::Error, "Export failed", &e.to_string());
            }
        }
    }

    fn offer_to_open(path: &Path) {
        let answer = MessageDialog::new()
            .set_level(MessageLevel::Info)
            .set_title("Export complete")
            .set_description(format!("Saved {}.\nOpen it now?", path.display()))
            .set_buttons(MessageButtons::YesNo)
            .show();

        if matches!(answer, MessageDialogResult::Yes) {
            if let Err(e) = open::that(path) {
                log::warn!("Could not open {}: {}", path.display(), e);
            }
        }
    }

    fn show_message(level: MessageLevel, title: &str, text: &str) {
        MessageDialog::new()
            .set_level(level)
            .set_title(title)
            .set_description(text)
            .set_buttons(MessageButtons::Ok)
            .show();
    }

    fn paint_background(&self, ui: &egui::Ui) {
        let rect = ui.max_rect();
        match &self.background {
            Some(texture) => {
                ui.painter().image(
                    texture.id(),
                    rect,
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE,
                );
            }
            None => {
                ui.painter().rect_filled(rect, 0.0, Theme::PAGE_BG);
            }
        }
    }
}

impl eframe::App for AdmissionApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load_results();

        if self.is_loading {
            ctx.request_repaint();
        }

        // Left panel - navigation
        SidePanel::left("sidebar")
            .exact_width(220.0)
            .resizable(false)
            .frame(egui::Frame::none().fill(Theme::SIDEBAR_BG).inner_margin(10.0))
            .show(ctx, |ui| {
                if let Some(page) = Sidebar::show(ui, self.state.page) {
                    self.state.page = page;
                }
            });

        // Header over the content area only
        TopBottomPanel::top("header")
            .exact_height(70.0)
            .frame(egui::Frame::none().fill(Theme::HEADER_BG))
            .show(ctx, |ui| {
                ui.centered_and_justified(|ui| {
                    ui.label(
                        RichText::new("🎓 Admission Database Simulator")
                            .size(22.0)
                            .strong()
                            .color(egui::Color32::WHITE),
                    );
                });
            });

        let mut action = PageAction::None;
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(Theme::CONTENT_BG).inner_margin(10.0))
            .show(ctx, |ui| {
                self.paint_background(ui);

                action = match self.state.page {
                    Page::Home => pages::show_home(ui, self.is_loading, &self.status),
                    Page::Filters => pages::show_filters(ui, &mut self.state),
                    Page::Visualizations => pages::show_visualizations(ui, &self.state),
                    Page::Table => {
                        pages::show_table(ui, &self.state, self.config.table_row_height)
                    }
                };
            });

        match action {
            PageAction::Upload => self.handle_upload(),
            PageAction::ApplyFilters => self.handle_apply_filters(),
            PageAction::ExportCharts => self.handle_export_charts(),
            PageAction::ExportTable => self.handle_export_table(),
            PageAction::None => {}
        }
    }
}
