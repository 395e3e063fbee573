//! Admission Database Simulator
//!
//! Loads admission spreadsheets, filters them by course and admission
//! status, and shows the result as charts and a table.

mod charts;
mod config;
mod data;
mod gui;
mod state;

use config::AppConfig;
use eframe::egui;
use gui::AdmissionApp;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::load();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size)
            .with_title(config.window_title.clone()),
        ..Default::default()
    };

    let title = config.window_title.clone();
    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| Ok(Box::new(AdmissionApp::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to start GUI: {e}"))?;

    log::info!("Exiting");
    Ok(())
}
