use egui::{Color32, RichText};

use super::{ACCENT, MUTED};
use crate::state::Tab;

/// Bottom tab bar. Returns the id of the tab the user tapped, if any.
pub fn tab_bar(ui: &mut egui::Ui, active: Option<Tab>) -> Option<&'static str> {
    let mut tapped = None;

    ui.add_space(6.0);
    ui.columns(Tab::ALL.len(), |columns| {
        for (column, tab) in columns.iter_mut().zip(Tab::ALL) {
            column.vertical_centered(|ui| {
                let is_active = active == Some(tab);
                let color = if is_active { ACCENT } else { MUTED };
                let icon = match tab {
                    Tab::Search => "🔍",
                    Tab::Tracking => "✈",
                    Tab::Departures => "☰",
                };

                let text = RichText::new(format!("{}\n{}", icon, tab.title()))
                    .size(13.0)
                    .color(color);
                let text = if is_active { text.strong() } else { text };

                if ui
                    .add(egui::Button::new(text).fill(Color32::TRANSPARENT))
                    .clicked()
                {
                    tapped = Some(tab.id());
                }
            });
        }
    });
    ui.add_space(6.0);

    tapped
}
