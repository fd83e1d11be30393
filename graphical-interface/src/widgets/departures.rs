use std::sync::Arc;

use egui::{Color32, RichText};
use egui_extras::{Column, TableBuilder};
use logger::{Color, Logger};

use super::{empty_state, screen_header, View, ACCENT, MUTED};
use crate::{
    loader::{LoadPoll, LoadRunner, PendingLoad},
    provider::{Provider, ProviderError},
    state::Navigation,
    types::{delay_badge, Airport, SharedFlight},
};

pub struct WidgetDepartures {
    selected_airport: String,
    airports: Vec<Airport>,
    departures: Vec<SharedFlight>,
    pending: Option<PendingLoad<Result<Vec<SharedFlight>, ProviderError>>>,
    error: Option<String>,
    provider: Arc<dyn Provider>,
    runner: LoadRunner,
    logger: Logger,
}

impl WidgetDepartures {
    /// Creates the board for `airport` and starts loading its departures.
    pub fn new(
        airport: &str,
        provider: Arc<dyn Provider>,
        runner: LoadRunner,
        logger: Logger,
    ) -> Self {
        let airports = match provider.list_airports() {
            Ok(airports) => airports,
            Err(err) => {
                let _ = logger.error(&format!("Could not list airports: {}", err));
                Vec::new()
            }
        };

        let mut widget = Self {
            selected_airport: airport.to_string(),
            airports,
            departures: Vec::new(),
            pending: None,
            error: None,
            provider,
            runner,
            logger,
        };
        widget.load();
        widget
    }

    pub fn selected_airport(&self) -> &str {
        &self.selected_airport
    }

    pub fn airports(&self) -> &[Airport] {
        &self.airports
    }

    /// Switches the board to another airport. Choosing the airport already
    /// shown does nothing.
    pub fn select_airport(&mut self, code: &str) {
        if code == self.selected_airport {
            return;
        }
        let _ = self
            .logger
            .info(&format!("Departures board switched to {}", code), Color::Cyan);
        self.selected_airport = code.to_string();
        self.load();
    }

    /// Reloads the departures of the selected airport. Ignored while a load
    /// is running.
    pub fn refresh(&mut self) {
        if self.pending.is_some() {
            return;
        }
        self.load();
    }

    // Replacing the handle cancels a load still running for a previous airport.
    fn load(&mut self) {
        let provider = Arc::clone(&self.provider);
        let airport = self.selected_airport.clone();
        self.pending = Some(self.runner.spawn("departures", move || {
            provider.list_departures_for(&airport)
        }));
    }

    pub fn poll(&mut self) {
        let outcome = match &self.pending {
            Some(pending) => pending.poll(),
            None => return,
        };

        match outcome {
            LoadPoll::Pending => return,
            LoadPoll::Ready(Ok(departures)) => {
                let _ = self.logger.debug(&format!(
                    "Loaded {} departure(s) from {}",
                    departures.len(),
                    self.selected_airport
                ));
                self.departures = departures;
                self.error = None;
            }
            LoadPoll::Ready(Err(err)) => {
                let _ = self.logger.error(&format!(
                    "Could not load departures from {}: {}",
                    self.selected_airport, err
                ));
                self.error = Some(err.to_string());
            }
            LoadPoll::Abandoned => {
                let _ = self.logger.warn("Departures load ended without a result");
            }
        }
        self.pending = None;
    }

    pub fn departures(&self) -> &[SharedFlight] {
        &self.departures
    }

    pub fn shows_empty_state(&self) -> bool {
        self.departures.is_empty() && !self.is_loading()
    }

    pub fn empty_state_message(&self) -> String {
        format!(
            "No flights departing from {} at this time",
            self.selected_airport
        )
    }

    fn airport_selector(&mut self, ui: &mut egui::Ui) {
        let mut chosen = None;

        egui::ScrollArea::horizontal()
            .id_salt("airport_selector")
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    for airport in &self.airports {
                        let selected = airport.code == self.selected_airport;
                        let text = RichText::new(format!("{}\n{}", airport.code, airport.name))
                            .size(13.0)
                            .color(if selected { Color32::WHITE } else { MUTED });
                        if ui.selectable_label(selected, text).clicked() {
                            chosen = Some(airport.code.clone());
                        }
                    }
                });
            });

        if let Some(code) = chosen {
            self.select_airport(&code);
        }
    }

    fn board(&self, ui: &mut egui::Ui) -> Option<SharedFlight> {
        let mut clicked = None;

        ui.group(|ui| {
            TableBuilder::new(ui)
                .striped(true)
                .sense(egui::Sense::click())
                .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                .column(Column::remainder().at_least(80.0))
                .column(Column::auto().at_least(50.0))
                .column(Column::remainder().at_least(80.0))
                .column(Column::auto().at_least(70.0))
                .column(Column::remainder().at_least(80.0))
                .header(25.0, |mut header| {
                    for title in ["Flight", "Time", "To", "Gate", "Status"] {
                        header.col(|ui| {
                            ui.strong(RichText::new(title).color(MUTED).size(13.0));
                        });
                    }
                })
                .body(|body| {
                    body.rows(48.0, self.departures.len(), |mut row| {
                        let flight = &self.departures[row.index()];

                        row.col(|ui| {
                            ui.vertical(|ui| {
                                ui.label(
                                    RichText::new(flight.flight_number.as_str())
                                        .strong()
                                        .color(Color32::WHITE),
                                );
                                ui.label(
                                    RichText::new(flight.airline.as_str())
                                        .size(11.0)
                                        .color(MUTED),
                                );
                            });
                        });
                        row.col(|ui| {
                            ui.label(
                                RichText::new(flight.departure.time.as_str())
                                    .strong()
                                    .color(Color32::WHITE),
                            );
                        });
                        row.col(|ui| {
                            ui.vertical(|ui| {
                                ui.label(
                                    RichText::new(flight.arrival.airport.as_str())
                                        .color(Color32::WHITE),
                                );
                                ui.label(
                                    RichText::new(flight.arrival.city.as_str())
                                        .size(11.0)
                                        .color(MUTED),
                                );
                            });
                        });
                        row.col(|ui| {
                            ui.vertical(|ui| {
                                let gate = flight.gate.as_deref().unwrap_or("TBA");
                                ui.label(RichText::new(gate).color(ACCENT));
                                if let Some(terminal) = &flight.terminal {
                                    ui.label(
                                        RichText::new(terminal.as_str())
                                            .size(11.0)
                                            .color(MUTED),
                                    );
                                }
                            });
                        });
                        row.col(|ui| {
                            ui.vertical(|ui| {
                                ui.label(
                                    RichText::new(flight.status.as_str())
                                        .strong()
                                        .color(flight.status().color()),
                                );
                                if let Some(badge) = delay_badge(flight.delay) {
                                    ui.label(
                                        RichText::new(badge)
                                            .size(11.0)
                                            .color(Color32::from_rgb(0xF5, 0x9E, 0x0B)),
                                    );
                                }
                            });
                        });

                        if row.response().clicked() {
                            clicked = Some(Arc::clone(flight));
                        }
                    });
                });
        });

        clicked
    }
}

impl View for WidgetDepartures {
    fn ui(&mut self, ui: &mut egui::Ui, navigation: &mut Navigation) {
        self.poll();

        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                screen_header(ui, "Departures", "Live departure information");
            });
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let loading = self.is_loading();
                let label = if loading { "Refreshing..." } else { "⟳ Refresh" };
                if ui.add_enabled(!loading, egui::Button::new(label)).clicked() {
                    self.refresh();
                }
            });
        });

        self.airport_selector(ui);
        ui.add_space(12.0);

        if let Some(error) = &self.error {
            ui.label(RichText::new(error.as_str()).color(Color32::from_rgb(0xEF, 0x44, 0x44)));
        }

        if self.shows_empty_state() {
            empty_state(ui, "No Departures", &self.empty_state_message());
        } else if self.departures.is_empty() {
            ui.vertical_centered(|ui| {
                ui.add_space(48.0);
                ui.spinner();
            });
        } else if let Some(flight) = self.board(ui) {
            navigation.select_flight(flight);
        }
    }

    fn is_loading(&self) -> bool {
        self.pending.is_some()
    }
}
