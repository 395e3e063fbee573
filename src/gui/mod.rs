//! GUI module - window, navigation and pages

mod app;
mod pages;
mod sidebar;
mod theme;

pub use app::AdmissionApp;
pub use sidebar::Sidebar;
