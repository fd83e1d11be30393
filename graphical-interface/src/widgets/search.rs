use std::sync::Arc;

use egui::{Color32, RichText};
use logger::{Color, Logger};

use super::{
    empty_state,
    flight_card::{card, card_header, route_row},
    notice::{show_notice, Notice},
    screen_header, View, MUTED,
};
use crate::{
    loader::{LoadPoll, LoadRunner, PendingLoad},
    provider::{Provider, ProviderError},
    state::Navigation,
    types::{validate_flight_number, InputError, SharedFlight},
};

type SearchLoad = PendingLoad<Result<Vec<SharedFlight>, ProviderError>>;

pub struct WidgetSearch {
    flight_number: String,
    results: Vec<SharedFlight>,
    pending: Option<SearchLoad>,
    // Input at submit time; the text box may have changed since.
    submitted: String,
    notice: Option<Notice>,
    provider: Arc<dyn Provider>,
    runner: LoadRunner,
    logger: Logger,
}

impl WidgetSearch {
    pub fn new(provider: Arc<dyn Provider>, runner: LoadRunner, logger: Logger) -> Self {
        Self {
            flight_number: String::new(),
            results: Vec::new(),
            pending: None,
            submitted: String::new(),
            notice: None,
            provider,
            runner,
            logger,
        }
    }

    pub fn flight_number(&self) -> &str {
        &self.flight_number
    }

    pub fn set_flight_number(&mut self, flight_number: &str) {
        self.flight_number = flight_number.to_string();
    }

    /// Starts a search for the current input.
    ///
    /// Blank input raises a notice and nothing is loaded. A search submitted
    /// while another is pending replaces it; the older one is cancelled.
    pub fn submit(&mut self) -> Result<(), InputError> {
        let query = match validate_flight_number(&self.flight_number) {
            Ok(query) => query.to_string(),
            Err(err) => {
                let _ = self.logger.warn(&format!("Search rejected: {}", err));
                self.notice = Some(Notice::from_input_error(&err));
                return Err(err);
            }
        };

        let _ = self
            .logger
            .info(&format!("Searching flights matching '{}'", query), Color::Cyan);

        let provider = Arc::clone(&self.provider);
        self.submitted = query.clone();
        self.pending = Some(
            self.runner
                .spawn("search", move || provider.search_by_number(&query)),
        );
        Ok(())
    }

    /// Applies the result of the pending search, if it has arrived.
    pub fn poll(&mut self) {
        let outcome = match &self.pending {
            Some(pending) => pending.poll(),
            None => return,
        };

        match outcome {
            LoadPoll::Pending => return,
            LoadPoll::Ready(Ok(results)) => {
                let _ = self.logger.debug(&format!(
                    "Search for '{}' returned {} flight(s)",
                    self.submitted,
                    results.len()
                ));
                if results.is_empty() {
                    self.notice = Some(Notice::no_results());
                }
                self.results = results;
            }
            LoadPoll::Ready(Err(err)) => {
                let _ = self.logger.error(&format!("Search failed: {}", err));
                self.notice = Some(Notice::new("Error", &err.to_string()));
            }
            LoadPoll::Abandoned => {
                let _ = self.logger.warn("Search ended without a result");
            }
        }
        self.pending = None;
    }

    pub fn results(&self) -> &[SharedFlight] {
        &self.results
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    fn show_results(&self, ui: &mut egui::Ui) -> Option<SharedFlight> {
        let mut selected = None;

        if !self.results.is_empty() {
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new("Search Results")
                        .size(18.0)
                        .strong()
                        .color(Color32::WHITE),
                );
                ui.label(
                    RichText::new(format!("{} flight(s) found", self.results.len()))
                        .size(13.0)
                        .color(MUTED),
                );
            });
            ui.add_space(8.0);
        }

        for flight in &self.results {
            let response = card(ui, |ui| {
                card_header(ui, flight, None);
                ui.add_space(12.0);
                route_row(ui, flight, &flight.arrival.time);
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if let Some(gate) = &flight.gate {
                        ui.label(RichText::new(format!("Gate {}", gate)).size(12.0).color(MUTED));
                    }
                    if let Some(aircraft) = &flight.aircraft {
                        ui.label(RichText::new(aircraft.as_str()).size(12.0).color(MUTED));
                    }
                });
            });
            if response.clicked() {
                selected = Some(Arc::clone(flight));
            }
        }

        if self.results.is_empty() && !self.is_loading() {
            empty_state(
                ui,
                "Search for Flights",
                "Enter a flight number above to get real-time information",
            );
        }

        selected
    }
}

impl View for WidgetSearch {
    fn ui(&mut self, ui: &mut egui::Ui, navigation: &mut Navigation) {
        self.poll();

        screen_header(ui, "Flight Search", "Track flights in real-time");

        let blocked = self.notice.is_some();
        ui.add_enabled_ui(!blocked, |ui| {
            ui.horizontal(|ui| {
                let loading = self.is_loading();
                let input = ui.add(
                    egui::TextEdit::singleline(&mut self.flight_number)
                        .hint_text("Enter flight number (e.g., AA123)")
                        .desired_width(ui.available_width() - 110.0),
                );
                let entered =
                    input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

                let label = if loading { "Searching..." } else { "Search" };
                let clicked = ui
                    .add_enabled(!loading, egui::Button::new(label))
                    .clicked();

                if (entered || clicked) && !loading {
                    let _ = self.submit();
                }
            });
        });
        ui.add_space(16.0);

        let selected = egui::ScrollArea::vertical()
            .show(ui, |ui| self.show_results(ui))
            .inner;
        if let Some(flight) = selected {
            navigation.select_flight(flight);
        }

        if let Some(notice) = &self.notice {
            if !show_notice(ui.ctx(), notice) {
                self.dismiss_notice();
            }
        }
    }

    fn is_loading(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{logger, provider, runner, settle};

    fn widget() -> WidgetSearch {
        WidgetSearch::new(provider(), runner(), logger())
    }

    fn finish(widget: &mut WidgetSearch) {
        settle(|| {
            widget.poll();
            widget.is_loading()
        });
    }

    #[test]
    fn blank_input_raises_notice_without_loading() {
        let mut widget = widget();
        widget.set_flight_number("   ");

        assert_eq!(widget.submit(), Err(InputError::EmptyFlightNumber));
        assert!(!widget.is_loading());
        assert_eq!(
            widget.notice(),
            Some(&Notice::new("Error", "Please enter a flight number"))
        );
        assert!(widget.results().is_empty());
    }

    #[test]
    fn blank_resubmit_keeps_previous_results() {
        let mut widget = widget();
        widget.set_flight_number("A");
        widget.submit().unwrap();
        finish(&mut widget);
        let before: Vec<SharedFlight> = widget.results().to_vec();
        assert_eq!(before.len(), 2);

        widget.set_flight_number("   ");
        assert_eq!(widget.submit(), Err(InputError::EmptyFlightNumber));
        assert!(!widget.is_loading());
        assert_eq!(
            widget.notice(),
            Some(&Notice::new("Error", "Please enter a flight number"))
        );

        let after = widget.results();
        assert_eq!(after.len(), before.len());
        for (old, new) in before.iter().zip(after) {
            assert!(Arc::ptr_eq(old, new));
        }
    }

    #[test]
    fn completion_is_logged_with_the_submitted_query() {
        let dir = tempfile::tempdir().unwrap();
        let file_logger = Logger::new(dir.path(), "search")
            .unwrap()
            .with_console(false)
            .with_level(::logger::LogLevel::Debug);
        let mut widget = WidgetSearch::new(provider(), runner(), file_logger);

        widget.set_flight_number("UA");
        widget.submit().unwrap();
        widget.set_flight_number("DL7");
        finish(&mut widget);

        let log = std::fs::read_to_string(dir.path().join("search.log")).unwrap();
        assert!(log.contains("Search for 'UA' returned 1 flight(s)"));
        assert!(!log.contains("Search for 'DL7'"));
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let mut widget = widget();
        widget.set_flight_number("aa1");
        widget.submit().unwrap();
        assert!(widget.is_loading());

        finish(&mut widget);
        let numbers: Vec<&str> = widget
            .results()
            .iter()
            .map(|f| f.flight_number.as_str())
            .collect();
        assert_eq!(numbers, vec!["AA123"]);
        assert!(widget.notice().is_none());
    }

    #[test]
    fn no_match_keeps_empty_results_and_notifies() {
        let mut widget = widget();
        widget.set_flight_number("ZZ999");
        widget.submit().unwrap();
        finish(&mut widget);

        assert!(widget.results().is_empty());
        assert_eq!(widget.notice(), Some(&Notice::no_results()));

        widget.dismiss_notice();
        assert!(widget.notice().is_none());
    }

    #[test]
    fn results_are_replaced_by_the_next_search() {
        let mut widget = widget();
        widget.set_flight_number("UA");
        widget.submit().unwrap();
        finish(&mut widget);
        assert_eq!(widget.results().len(), 1);

        widget.set_flight_number("A");
        widget.submit().unwrap();
        finish(&mut widget);
        assert_eq!(widget.results().len(), 2);
    }

    #[test]
    fn resubmitting_supersedes_pending_search() {
        let mut widget = widget();
        widget.set_flight_number("DL");
        widget.submit().unwrap();
        widget.set_flight_number("UA456");
        widget.submit().unwrap();
        finish(&mut widget);

        assert_eq!(widget.results().len(), 1);
        assert_eq!(widget.results()[0].flight_number, "UA456");
    }
}
