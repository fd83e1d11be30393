use std::sync::Arc;

use egui::{Align, Color32, Layout, RichText};
use logger::{Color, Logger};

use super::{
    empty_state,
    flight_card::{card, card_header, route_row},
    screen_header, View, MUTED,
};
use crate::{
    loader::{LoadPoll, LoadRunner, PendingLoad},
    provider::{Provider, ProviderError},
    state::Navigation,
    types::{format_delay, FlightRecord, SharedFlight},
};

const LIVE: Color32 = Color32::from_rgb(0xEF, 0x44, 0x44);

pub struct WidgetTracking {
    flights: Vec<SharedFlight>,
    pending: Option<PendingLoad<Result<Vec<SharedFlight>, ProviderError>>>,
    error: Option<String>,
    provider: Arc<dyn Provider>,
    runner: LoadRunner,
    logger: Logger,
}

impl WidgetTracking {
    /// Creates the screen and starts loading the tracked flights.
    pub fn new(provider: Arc<dyn Provider>, runner: LoadRunner, logger: Logger) -> Self {
        let mut widget = Self {
            flights: Vec::new(),
            pending: None,
            error: None,
            provider,
            runner,
            logger,
        };
        widget.refresh();
        widget
    }

    /// Reloads the tracked flights. Ignored while a load is running.
    pub fn refresh(&mut self) {
        if self.pending.is_some() {
            return;
        }

        let _ = self.logger.info("Loading tracked flights", Color::Cyan);
        let provider = Arc::clone(&self.provider);
        self.pending = Some(
            self.runner
                .spawn("tracking", move || provider.list_tracked_flights()),
        );
    }

    pub fn poll(&mut self) {
        let outcome = match &self.pending {
            Some(pending) => pending.poll(),
            None => return,
        };

        match outcome {
            LoadPoll::Pending => return,
            LoadPoll::Ready(Ok(flights)) => {
                let _ = self
                    .logger
                    .debug(&format!("Loaded {} tracked flight(s)", flights.len()));
                self.flights = flights;
                self.error = None;
            }
            LoadPoll::Ready(Err(err)) => {
                let _ = self
                    .logger
                    .error(&format!("Could not load tracked flights: {}", err));
                self.error = Some(err.to_string());
            }
            LoadPoll::Abandoned => {
                let _ = self.logger.warn("Tracked flights load ended without a result");
            }
        }
        self.pending = None;
    }

    pub fn flights(&self) -> &[SharedFlight] {
        &self.flights
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn flight_card(ui: &mut egui::Ui, flight: &FlightRecord) -> egui::Response {
        let delay = format_delay(flight.delay_minutes());

        card(ui, |ui| {
            card_header(ui, flight, Some(delay.as_str()));
            ui.add_space(12.0);
            route_row(ui, flight, flight.arrival_estimate());

            if let Some(telemetry) = flight.live_telemetry() {
                ui.add_space(10.0);
                ui.separator();
                ui.horizontal(|ui| {
                    if let Some(speed) = telemetry.speed {
                        ui.label(RichText::new(format!("⏱ {}", speed)).size(12.0).color(MUTED));
                    }
                    if let Some(altitude) = telemetry.altitude {
                        ui.label(
                            RichText::new(format!("⬆ {}", altitude))
                                .size(12.0)
                                .color(MUTED),
                        );
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(RichText::new("● LIVE").size(12.0).strong().color(LIVE));
                    });
                });
            }
        })
    }
}

impl View for WidgetTracking {
    fn ui(&mut self, ui: &mut egui::Ui, navigation: &mut Navigation) {
        self.poll();

        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                screen_header(ui, "Tracked Flights", "Real-time flight tracking");
            });
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                let loading = self.is_loading();
                let label = if loading { "Refreshing..." } else { "⟳ Refresh" };
                if ui.add_enabled(!loading, egui::Button::new(label)).clicked() {
                    self.refresh();
                }
            });
        });

        if let Some(error) = &self.error {
            ui.label(RichText::new(error.as_str()).color(LIVE));
        }

        let mut selected = None;
        egui::ScrollArea::vertical().show(ui, |ui| {
            for flight in &self.flights {
                if Self::flight_card(ui, flight).clicked() {
                    selected = Some(Arc::clone(flight));
                }
            }

            if self.is_loading() && self.flights.is_empty() {
                ui.vertical_centered(|ui| {
                    ui.add_space(48.0);
                    ui.spinner();
                });
            } else if self.flights.is_empty() {
                empty_state(
                    ui,
                    "No Tracked Flights",
                    "Search for flights to start tracking them",
                );
            }
        });

        if let Some(flight) = selected {
            navigation.select_flight(flight);
        }
    }

    fn is_loading(&self) -> bool {
        self.pending.is_some()
    }
}
