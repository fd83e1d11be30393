use std::{sync::Arc, time::Duration};

use logger::{Color, Logger};

use crate::{
    config::AppConfig,
    loader::LoadRunner,
    provider::Provider,
    state::{Navigation, Screen},
    widgets::{self, View, WidgetDepartures, WidgetFlight, WidgetSearch, WidgetTracking},
};

const REPAINT_TICK_MS: u64 = 100;

/// The widget behind the screen currently on display.
///
/// A new widget is mounted every time the screen changes, so each visit
/// starts from fresh state and dropping the old one cancels its loads.
pub enum ActiveScreen {
    Search(WidgetSearch),
    Tracking(WidgetTracking),
    Departures(WidgetDepartures),
    Details(WidgetFlight),
}

impl ActiveScreen {
    fn shows(&self, screen: &Screen) -> bool {
        match (self, screen) {
            (ActiveScreen::Search(_), Screen::Search)
            | (ActiveScreen::Tracking(_), Screen::Tracking)
            | (ActiveScreen::Departures(_), Screen::Departures) => true,
            (ActiveScreen::Details(widget), Screen::Details(flight)) => widget
                .selected_flight
                .as_ref()
                .is_some_and(|shown| Arc::ptr_eq(shown, flight)),
            _ => false,
        }
    }

    fn view(&mut self) -> &mut dyn View {
        match self {
            ActiveScreen::Search(widget) => widget,
            ActiveScreen::Tracking(widget) => widget,
            ActiveScreen::Departures(widget) => widget,
            ActiveScreen::Details(widget) => widget,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ActiveScreen::Search(_) => "search",
            ActiveScreen::Tracking(_) => "tracking",
            ActiveScreen::Departures(_) => "departures",
            ActiveScreen::Details(_) => "details",
        }
    }
}

/// Top level application: owns the navigation state and the mounted screen.
pub struct FlightApp {
    navigation: Navigation,
    active: ActiveScreen,
    provider: Arc<dyn Provider>,
    runner: LoadRunner,
    default_airport: String,
    logger: Logger,
}

impl FlightApp {
    pub fn new(config: &AppConfig, provider: Arc<dyn Provider>, logger: Logger) -> Self {
        let runner = LoadRunner::new(config.loader_workers, config.load_delay, logger.clone());
        let active = ActiveScreen::Search(WidgetSearch::new(
            Arc::clone(&provider),
            runner.clone(),
            logger.clone(),
        ));

        Self {
            navigation: Navigation::new(),
            active,
            provider,
            runner,
            default_airport: config.default_airport.clone(),
            logger,
        }
    }

    pub fn navigation(&self) -> &Navigation {
        &self.navigation
    }

    pub fn navigation_mut(&mut self) -> &mut Navigation {
        &mut self.navigation
    }

    pub fn active_screen(&self) -> &ActiveScreen {
        &self.active
    }

    pub fn active_screen_mut(&mut self) -> &mut ActiveScreen {
        &mut self.active
    }

    /// Switches screens by tab id, logging ids that are not recognised.
    pub fn change_screen(&mut self, id: &str) {
        if !self.navigation.change_screen(id) {
            let _ = self
                .logger
                .warn(&format!("Unknown screen '{}', showing search", id));
        }
        self.sync_screen();
    }

    /// Mounts the widget for the current screen if it changed. Returns whether
    /// a new widget was mounted.
    pub fn sync_screen(&mut self) -> bool {
        let screen = self.navigation.screen();
        if self.active.shows(screen) {
            return false;
        }

        let active = match screen {
            Screen::Search => ActiveScreen::Search(WidgetSearch::new(
                Arc::clone(&self.provider),
                self.runner.clone(),
                self.logger.clone(),
            )),
            Screen::Tracking => ActiveScreen::Tracking(WidgetTracking::new(
                Arc::clone(&self.provider),
                self.runner.clone(),
                self.logger.clone(),
            )),
            Screen::Departures => ActiveScreen::Departures(WidgetDepartures::new(
                &self.default_airport,
                Arc::clone(&self.provider),
                self.runner.clone(),
                self.logger.clone(),
            )),
            Screen::Details(flight) => {
                ActiveScreen::Details(WidgetFlight::new(Some(Arc::clone(flight))))
            }
        };

        let _ = match screen {
            Screen::Details(flight) => self.logger.info(
                &format!("Showing details of {}", flight.flight_number),
                Color::Blue,
            ),
            _ => self
                .logger
                .info(&format!("Showing {} screen", screen.name()), Color::Blue),
        };
        self.active = active;
        true
    }
}

impl eframe::App for FlightApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.sync_screen();

        if self.navigation.shows_bottom_navigation() {
            egui::TopBottomPanel::bottom("bottom_navigation").show(ctx, |ui| {
                if let Some(id) = widgets::tab_bar(ui, self.navigation.screen().tab()) {
                    self.change_screen(id);
                }
            });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.active.view().ui(ui, &mut self.navigation);
        });

        if self.sync_screen() {
            ctx.request_repaint();
        } else if self.active.view().is_loading() {
            ctx.request_repaint_after(Duration::from_millis(REPAINT_TICK_MS));
        }
    }
}
