mod departures;
mod flight;
mod flight_card;
mod navigation;
mod notice;
mod search;
mod tracking;
pub use departures::WidgetDepartures;
pub use flight::{DetailsModel, LivePanel, WidgetFlight};
pub use navigation::tab_bar;
pub use notice::{show_notice, Notice};
pub use search::WidgetSearch;
pub use tracking::WidgetTracking;

use egui::{Color32, RichText};

use crate::state::Navigation;

pub(crate) const MUTED: Color32 = Color32::from_gray(0x99);
pub(crate) const ACCENT: Color32 = Color32::from_rgb(0x3B, 0x82, 0xF6);

/// A full screen of the application.
pub trait View {
    /// Draws the screen. Selections and back actions are reported through
    /// `navigation`.
    fn ui(&mut self, ui: &mut egui::Ui, navigation: &mut Navigation);

    /// Whether a simulated load is still running.
    fn is_loading(&self) -> bool {
        false
    }
}

pub(crate) fn screen_header(ui: &mut egui::Ui, title: &str, subtitle: &str) {
    ui.add_space(16.0);
    ui.label(RichText::new(title).size(30.0).strong().color(Color32::WHITE));
    ui.label(RichText::new(subtitle).size(15.0).color(MUTED));
    ui.add_space(16.0);
}

pub(crate) fn empty_state(ui: &mut egui::Ui, title: &str, text: &str) {
    ui.vertical_centered(|ui| {
        ui.add_space(48.0);
        ui.label(RichText::new("✈").size(48.0).color(Color32::from_gray(0x33)));
        ui.label(RichText::new(title).size(20.0).strong().color(Color32::WHITE));
        ui.label(RichText::new(text).size(14.0).color(MUTED));
    });
}
