use egui::Align2;

use crate::types::InputError;

/// A message the user has to acknowledge before continuing.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn new(title: &str, message: &str) -> Self {
        Self {
            title: title.to_string(),
            message: message.to_string(),
        }
    }

    pub fn from_input_error(err: &InputError) -> Self {
        Self::new(err.title(), &err.to_string())
    }

    pub fn no_results() -> Self {
        Self::new("No Results", "No flights found for this flight number")
    }
}

/// Shows the notice centered over the screen. Returns `false` once dismissed.
pub fn show_notice(ctx: &egui::Context, notice: &Notice) -> bool {
    let mut open = true;

    egui::Window::new(notice.title.as_str())
        .collapsible(false)
        .resizable(false)
        .movable(false)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(notice.message.as_str());
            ui.add_space(8.0);
            ui.vertical_centered(|ui| {
                if ui.button("OK").clicked() {
                    open = false;
                }
            });
        });

    open
}
