use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    thread,
    time::{Duration, Instant},
};

use graphical_interface::{
    app::{ActiveScreen, FlightApp},
    config::AppConfig,
    loader::LoadRunner,
    provider::{MockProvider, Provider, ProviderError},
    state::Screen,
    types::{Airport, SharedFlight},
    widgets::{View, WidgetDepartures, WidgetSearch, WidgetTracking},
};
use logger::Logger;

fn quiet_logger() -> Logger {
    Logger::detached().with_console(false)
}

fn test_config() -> AppConfig {
    AppConfig {
        load_delay: Duration::from_millis(5),
        log_to_console: false,
        ..AppConfig::default()
    }
}

fn shared_provider() -> Arc<dyn Provider> {
    Arc::new(MockProvider::new().expect("bundled data should parse"))
}

// Counts how many tracked-flight queries actually reach the data source.
struct CountingProvider {
    inner: MockProvider,
    tracked_queries: AtomicUsize,
}

impl CountingProvider {
    fn new() -> Self {
        Self {
            inner: MockProvider::new().expect("bundled data should parse"),
            tracked_queries: AtomicUsize::new(0),
        }
    }

    fn tracked_queries(&self) -> usize {
        self.tracked_queries.load(Ordering::SeqCst)
    }
}

impl Provider for CountingProvider {
    fn search_by_number(&self, query: &str) -> Result<Vec<SharedFlight>, ProviderError> {
        self.inner.search_by_number(query)
    }

    fn list_tracked_flights(&self) -> Result<Vec<SharedFlight>, ProviderError> {
        self.tracked_queries.fetch_add(1, Ordering::SeqCst);
        self.inner.list_tracked_flights()
    }

    fn list_departures_for(&self, airport: &str) -> Result<Vec<SharedFlight>, ProviderError> {
        self.inner.list_departures_for(airport)
    }

    fn list_airports(&self) -> Result<Vec<Airport>, ProviderError> {
        self.inner.list_airports()
    }
}

// Polls until the given screen reports it is idle.
fn wait_idle<V: View>(view: &mut V, mut poll: impl FnMut(&mut V)) {
    let deadline = Instant::now() + Duration::from_secs(2);
    loop {
        poll(view);
        if !view.is_loading() {
            return;
        }
        assert!(Instant::now() < deadline, "load did not finish in time");
        thread::sleep(Duration::from_millis(2));
    }
}

#[test]
fn search_select_and_return() {
    let provider = shared_provider();
    let config = test_config();
    let mut app = FlightApp::new(&config, Arc::clone(&provider), quiet_logger());

    let selected = match app.active_screen_mut() {
        ActiveScreen::Search(search) => {
            search.set_flight_number("ua4");
            search.submit().expect("non blank input");
            wait_idle(&mut *search, WidgetSearch::poll);
            assert_eq!(search.results().len(), 1);
            Arc::clone(&search.results()[0])
        }
        _ => panic!("application should start on search"),
    };

    app.navigation_mut().select_flight(Arc::clone(&selected));
    assert!(app.sync_screen());
    assert!(!app.navigation().shows_bottom_navigation());

    match app.active_screen() {
        ActiveScreen::Details(details) => {
            let model = details.details().expect("a flight is selected");
            assert_eq!(model.flight_number, "UA456");
            assert_eq!(model.gate, "B7");
            assert!(model.live.is_none());
        }
        _ => panic!("details should be mounted"),
    }

    let shown = app.navigation().selected_flight().expect("selection");
    assert!(Arc::ptr_eq(shown, &selected));

    app.navigation_mut().back();
    app.sync_screen();
    assert_eq!(*app.navigation().screen(), Screen::Search);
    assert!(app.navigation().selected_flight().is_none());
}

#[test]
fn tracked_flight_opens_live_details() {
    let config = test_config();
    let mut app = FlightApp::new(&config, shared_provider(), quiet_logger());
    app.change_screen("tracking");

    let airborne = match app.active_screen_mut() {
        ActiveScreen::Tracking(tracking) => {
            wait_idle(&mut *tracking, WidgetTracking::poll);
            Arc::clone(&tracking.flights()[0])
        }
        _ => panic!("tracking should be mounted"),
    };

    app.navigation_mut().select_flight(airborne);
    app.sync_screen();

    match app.active_screen() {
        ActiveScreen::Details(details) => {
            let live = details.details().and_then(|d| d.live).expect("live panel");
            assert_eq!(live.speed, "545 mph");
            assert_eq!(live.current_location, "Over Kansas");
        }
        _ => panic!("details should be mounted"),
    }
}

#[test]
fn departures_board_follows_configured_airport() {
    let config = AppConfig {
        default_airport: "LAX".to_string(),
        ..test_config()
    };
    let mut app = FlightApp::new(&config, shared_provider(), quiet_logger());
    app.change_screen("departures");

    match app.active_screen_mut() {
        ActiveScreen::Departures(board) => {
            wait_idle(&mut *board, WidgetDepartures::poll);
            assert_eq!(board.selected_airport(), "LAX");
            assert_eq!(board.departures()[0].flight_number, "AA321");
        }
        _ => panic!("departures should be mounted"),
    }
}

#[test]
fn unknown_airport_board_is_empty() {
    let runner = LoadRunner::new(1, Duration::from_millis(5), quiet_logger());
    let mut board = WidgetDepartures::new("ATL", shared_provider(), runner, quiet_logger());

    wait_idle(&mut board, WidgetDepartures::poll);
    assert!(board.shows_empty_state());
    assert_eq!(
        board.empty_state_message(),
        "No flights departing from ATL at this time"
    );
}

fn slow_config() -> AppConfig {
    AppConfig {
        load_delay: Duration::from_millis(150),
        ..test_config()
    }
}

#[test]
fn leaving_a_screen_cancels_its_load() {
    let counting = Arc::new(CountingProvider::new());
    let provider: Arc<dyn Provider> = counting.clone();
    let mut app = FlightApp::new(&slow_config(), provider, quiet_logger());

    app.change_screen("tracking");
    assert!(matches!(app.active_screen(), ActiveScreen::Tracking(t) if t.is_loading()));
    app.change_screen("search");

    thread::sleep(Duration::from_millis(400));
    assert_eq!(counting.tracked_queries(), 0);
}

#[test]
fn staying_on_a_screen_lets_its_load_run() {
    let counting = Arc::new(CountingProvider::new());
    let provider: Arc<dyn Provider> = counting.clone();
    let mut app = FlightApp::new(&slow_config(), provider, quiet_logger());

    app.change_screen("tracking");
    thread::sleep(Duration::from_millis(400));
    assert_eq!(counting.tracked_queries(), 1);

    match app.active_screen_mut() {
        ActiveScreen::Tracking(tracking) => {
            wait_idle(&mut *tracking, WidgetTracking::poll);
            assert_eq!(tracking.flights().len(), 2);
        }
        _ => panic!("tracking should be mounted"),
    }
}
