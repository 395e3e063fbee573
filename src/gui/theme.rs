//! Colors and light visuals for the simulator window.

use egui::{Color32, Visuals};

pub struct Theme;

impl Theme {
    pub const SIDEBAR_BG: Color32 = Color32::from_rgb(30, 41, 59); // #1e293b
    pub const SIDEBAR_BUTTON: Color32 = Color32::from_rgb(51, 65, 85); // #334155
    pub const SIDEBAR_ACTIVE: Color32 = Color32::from_rgb(71, 85, 105); // #475569
    pub const HEADER_BG: Color32 = Color32::from_rgb(30, 58, 138); // #1e3a8a
    pub const CONTENT_BG: Color32 = Color32::from_rgb(248, 250, 252); // #f8fafc
    pub const PAGE_BG: Color32 = Color32::from_rgb(241, 245, 249); // #f1f5f9
    pub const ACCENT: Color32 = Color32::from_rgb(59, 130, 246); // #3b82f6
    pub const ERROR: Color32 = Color32::from_rgb(239, 68, 68); // #ef4444
    pub const TEXT_DARK: Color32 = Color32::from_rgb(30, 41, 59);

    /// Light visuals with the slate content background.
    pub fn apply(ctx: &egui::Context) {
        let mut visuals = Visuals::light();
        visuals.panel_fill = Self::CONTENT_BG;
        visuals.extreme_bg_color = Color32::WHITE;
        ctx.set_visuals(visuals);
    }
}
