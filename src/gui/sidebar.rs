//! Sidebar Widget
//! Left navigation panel with one button per page.

use crate::gui::theme::Theme;
use crate::state::Page;
use egui::{Color32, RichText};

/// Left side navigation panel.
pub struct Sidebar;

impl Sidebar {
    /// Draw the sidebar. Returns the page the user clicked, if any.
    pub fn show(ui: &mut egui::Ui, active: Page) -> Option<Page> {
        let mut clicked = None;

        ui.vertical_centered(|ui| {
            ui.add_space(20.0);
            ui.label(
                RichText::new("Admission\nSimulator")
                    .size(18.0)
                    .strong()
                    .color(Color32::WHITE),
            );
            ui.add_space(20.0);
        });

        for page in Page::ALL {
            let fill = if page == active {
                Theme::SIDEBAR_ACTIVE
            } else {
                Theme::SIDEBAR_BUTTON
            };
            let button = egui::Button::new(RichText::new(page.title()).size(14.0).color(Color32::WHITE))
                .fill(fill)
                .stroke(egui::Stroke::NONE)
                .min_size(egui::vec2(ui.available_width(), 38.0));

            if ui.add(button).clicked() {
                clicked = Some(page);
            }
            ui.add_space(5.0);
        }

        clicked
    }
}
