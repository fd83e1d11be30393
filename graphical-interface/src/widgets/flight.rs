use egui::{Color32, RichText};

use super::{
    flight_card::{route_progress, status_badge},
    View, ACCENT, MUTED,
};
use crate::{
    state::Navigation,
    types::{FlightRecord, FlightStatus, LiveData, SharedFlight},
};

const GATE_FALLBACK: &str = "TBA";
const SPEED_FALLBACK: &str = "545 mph";
const ALTITUDE_FALLBACK: &str = "35,000 ft";

/// The live information panel, only present for airborne flights.
#[derive(Debug, Clone, PartialEq)]
pub struct LivePanel {
    pub current_location: String,
    pub speed: String,
    pub altitude: String,
    pub time_to_destination: String,
}

/// Everything the details screen shows, resolved from the flight and the
/// live data placeholders.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailsModel {
    pub flight_number: String,
    pub airline: String,
    pub status: FlightStatus,
    pub aircraft: Option<String>,
    pub gate: String,
    pub terminal: Option<String>,
    pub progress: f32,
    pub live: Option<LivePanel>,
    pub next_waypoint: String,
    pub fuel_remaining: String,
    pub weather_at_destination: String,
}

pub struct WidgetFlight {
    pub selected_flight: Option<SharedFlight>,
    live_data: LiveData,
}

impl WidgetFlight {
    pub fn new(selected_flight: Option<SharedFlight>) -> Self {
        Self {
            selected_flight,
            live_data: LiveData::default(),
        }
    }

    /// `None` when no flight was selected.
    pub fn details(&self) -> Option<DetailsModel> {
        let flight = self.selected_flight.as_ref()?;

        let live = flight.is_in_flight().then(|| LivePanel {
            current_location: self.live_data.current_location.clone(),
            speed: flight
                .speed
                .clone()
                .unwrap_or_else(|| SPEED_FALLBACK.to_string()),
            altitude: flight
                .altitude
                .clone()
                .unwrap_or_else(|| ALTITUDE_FALLBACK.to_string()),
            time_to_destination: self.live_data.time_to_destination.clone(),
        });

        let gate = flight
            .gate
            .clone()
            .filter(|gate| !gate.is_empty())
            .unwrap_or_else(|| GATE_FALLBACK.to_string());

        Some(DetailsModel {
            flight_number: flight.flight_number.clone(),
            airline: flight.airline.clone(),
            status: flight.status(),
            aircraft: flight.aircraft.clone(),
            gate,
            terminal: flight.terminal.clone(),
            progress: flight.progress_fraction(),
            live,
            next_waypoint: self.live_data.next_waypoint.clone(),
            fuel_remaining: self.live_data.fuel_remaining.clone(),
            weather_at_destination: self.live_data.weather_at_destination.clone(),
        })
    }

    fn section(ui: &mut egui::Ui, title: &str, add_contents: impl FnOnce(&mut egui::Ui)) {
        egui::Frame::none()
            .fill(Color32::from_rgb(0x1A, 0x1A, 0x1A))
            .rounding(16.0)
            .inner_margin(16.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(RichText::new(title).size(17.0).strong().color(Color32::WHITE));
                ui.add_space(8.0);
                add_contents(ui);
            });
        ui.add_space(12.0);
    }

    fn field(ui: &mut egui::Ui, name: &str, value: &str) {
        ui.horizontal(|ui| {
            ui.label(RichText::new(name).size(14.0).color(MUTED));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(RichText::new(value).size(14.0).strong().color(Color32::WHITE));
            });
        });
    }

    fn route(ui: &mut egui::Ui, flight: &FlightRecord, progress: f32) {
        ui.columns(2, |columns| {
            columns[0].label(
                RichText::new(flight.departure.airport.as_str())
                    .size(28.0)
                    .strong()
                    .color(Color32::WHITE),
            );
            columns[0].label(RichText::new(flight.departure.city.as_str()).color(MUTED));
            columns[0].label(RichText::new(flight.departure.time.as_str()).color(Color32::WHITE));

            columns[1].with_layout(egui::Layout::top_down(egui::Align::Max), |ui| {
                ui.label(
                    RichText::new(flight.arrival.airport.as_str())
                        .size(28.0)
                        .strong()
                        .color(Color32::WHITE),
                );
                ui.label(RichText::new(flight.arrival.city.as_str()).color(MUTED));
                ui.label(RichText::new(flight.arrival.time.as_str()).color(Color32::WHITE));
            });
        });
        ui.add_space(8.0);
        route_progress(ui, flight, 24.0);
        ui.label(
            RichText::new(format!("{:.0}% Complete", progress * 100.0))
                .size(12.0)
                .color(MUTED),
        );
    }
}

impl View for WidgetFlight {
    fn ui(&mut self, ui: &mut egui::Ui, navigation: &mut Navigation) {
        let (Some(flight), Some(details)) = (self.selected_flight.clone(), self.details()) else {
            ui.vertical_centered(|ui| {
                ui.add_space(64.0);
                ui.label(RichText::new("Flight not found").size(18.0).color(MUTED));
            });
            return;
        };

        ui.add_space(12.0);
        if ui
            .add(egui::Button::new(RichText::new("← Back").color(ACCENT)).frame(false))
            .clicked()
        {
            navigation.back();
            return;
        }

        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label(
                        RichText::new(details.flight_number.as_str())
                            .size(30.0)
                            .strong()
                            .color(Color32::WHITE),
                    );
                    ui.label(RichText::new(details.airline.as_str()).size(15.0).color(MUTED));
                });
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                    status_badge(ui, &flight);
                });
            });
            ui.add_space(16.0);

            Self::section(ui, "Route", |ui| Self::route(ui, &flight, details.progress));

            Self::section(ui, "Flight Information", |ui| {
                Self::field(ui, "Gate", &details.gate);
                if let Some(terminal) = &details.terminal {
                    Self::field(ui, "Terminal", terminal);
                }
                if let Some(aircraft) = &details.aircraft {
                    Self::field(ui, "Aircraft", aircraft);
                }
                Self::field(ui, "Status", details.status.as_str());
            });

            if let Some(live) = &details.live {
                Self::section(ui, "Live Information", |ui| {
                    Self::field(ui, "Current Location", &live.current_location);
                    Self::field(ui, "Speed", &live.speed);
                    Self::field(ui, "Altitude", &live.altitude);
                    Self::field(ui, "Time to Destination", &live.time_to_destination);
                });
            }

            Self::section(ui, "Additional Information", |ui| {
                Self::field(ui, "Next Waypoint", &details.next_waypoint);
                Self::field(ui, "Fuel Remaining", &details.fuel_remaining);
                Self::field(ui, "Weather at Destination", &details.weather_at_destination);
            });

            // Neither action is wired to a backend yet.
            ui.vertical_centered_justified(|ui| {
                let _ = ui.button("🔔 Enable Notifications");
                ui.add_space(6.0);
                let _ = ui.button("📤 Share Flight");
            });
            ui.add_space(24.0);
        });
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        provider::{MockProvider, Provider},
        state::Screen,
    };

    fn tracked(index: usize) -> SharedFlight {
        let provider = MockProvider::new().unwrap();
        provider.list_tracked_flights().unwrap().remove(index)
    }

    #[test]
    fn no_flight_has_no_details() {
        assert!(WidgetFlight::new(None).details().is_none());
    }

    fn rendered_text(widget: &mut WidgetFlight, navigation: &mut Navigation) -> Vec<String> {
        let ctx = egui::Context::default();
        let output = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| widget.ui(ui, navigation));
        });
        output
            .shapes
            .iter()
            .filter_map(|clipped| match &clipped.shape {
                egui::Shape::Text(text) => Some(text.galley.text().to_string()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn missing_flight_renders_placeholder() {
        let mut widget = WidgetFlight::new(None);
        let mut navigation = Navigation::new();

        let text = rendered_text(&mut widget, &mut navigation);
        assert!(text.iter().any(|t| t == "Flight not found"));
        assert_eq!(*navigation.screen(), Screen::Search);
    }

    #[test]
    fn selected_flight_renders_its_number() {
        let mut widget = WidgetFlight::new(Some(tracked(0)));
        let mut navigation = Navigation::new();

        let text = rendered_text(&mut widget, &mut navigation);
        assert!(text.iter().any(|t| t.contains("AA123")));
        assert!(!text.iter().any(|t| t == "Flight not found"));
    }

    #[test]
    fn airborne_flight_shows_live_panel() {
        let widget = WidgetFlight::new(Some(tracked(0)));
        let details = widget.details().unwrap();

        assert_eq!(details.flight_number, "AA123");
        assert_eq!(details.status, FlightStatus::InFlight);
        let live = details.live.unwrap();
        assert_eq!(live.speed, "545 mph");
        assert_eq!(live.altitude, "35,000 ft");
        assert_eq!(live.current_location, "Over Kansas");
        assert_eq!(live.time_to_destination, "2h 15m");
    }

    #[test]
    fn landed_flight_has_no_live_panel() {
        let details = WidgetFlight::new(Some(tracked(1))).details().unwrap();
        assert!(details.live.is_none());
        assert_eq!(details.progress, 1.0);
    }

    #[test]
    fn missing_gate_reads_tba() {
        let details = WidgetFlight::new(Some(tracked(1))).details().unwrap();
        assert_eq!(details.gate, "TBA");
    }

    #[test]
    fn airborne_flight_without_telemetry_uses_fallbacks() {
        let mut record = (*tracked(0)).clone();
        record.speed = None;
        record.altitude = None;
        let details = WidgetFlight::new(Some(Arc::new(record))).details().unwrap();

        let live = details.live.unwrap();
        assert_eq!(live.speed, "545 mph");
        assert_eq!(live.altitude, "35,000 ft");
    }

    #[test]
    fn search_flight_shows_aircraft_and_gate() {
        let provider = MockProvider::new().unwrap();
        let flight = provider.search_by_number("DL789").unwrap().remove(0);
        let details = WidgetFlight::new(Some(flight)).details().unwrap();

        assert_eq!(details.gate, "C15");
        assert_eq!(details.aircraft.as_deref(), Some("Boeing 757-200"));
        assert!(details.live.is_none());
        assert_eq!(details.weather_at_destination, "Clear, 72°F");
    }
}
