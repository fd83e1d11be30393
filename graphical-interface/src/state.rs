use std::sync::Arc;

use crate::types::SharedFlight;

/// Screens reachable from the bottom navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Search,
    Tracking,
    Departures,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Search, Tab::Tracking, Tab::Departures];

    pub fn id(&self) -> &'static str {
        match self {
            Tab::Search => "search",
            Tab::Tracking => "tracking",
            Tab::Departures => "departures",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Search => "Search",
            Tab::Tracking => "Track",
            Tab::Departures => "Board",
        }
    }

    pub fn from_id(id: &str) -> Option<Tab> {
        Tab::ALL.into_iter().find(|tab| tab.id() == id)
    }
}

/// What the application is currently showing. The details view carries its
/// flight, so it can never be rendered without one.
#[derive(Debug, Clone)]
pub enum Screen {
    Search,
    Tracking,
    Departures,
    Details(SharedFlight),
}

impl Screen {
    pub fn name(&self) -> &'static str {
        match self {
            Screen::Search => "search",
            Screen::Tracking => "tracking",
            Screen::Departures => "departures",
            Screen::Details(_) => "details",
        }
    }

    /// The tab highlighted in the navigation bar, if any.
    pub fn tab(&self) -> Option<Tab> {
        match self {
            Screen::Search => Some(Tab::Search),
            Screen::Tracking => Some(Tab::Tracking),
            Screen::Departures => Some(Tab::Departures),
            Screen::Details(_) => None,
        }
    }
}

impl From<Tab> for Screen {
    fn from(tab: Tab) -> Self {
        match tab {
            Tab::Search => Screen::Search,
            Tab::Tracking => Screen::Tracking,
            Tab::Departures => Screen::Departures,
        }
    }
}

impl PartialEq for Screen {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Screen::Details(a), Screen::Details(b)) => Arc::ptr_eq(a, b),
            _ => self.tab() == other.tab() && self.tab().is_some(),
        }
    }
}

/// Tracks which screen is shown and which flight was selected.
pub struct Navigation {
    screen: Screen,
}

impl Default for Navigation {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigation {
    pub fn new() -> Navigation {
        Self { screen: Screen::Search }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn select_flight(&mut self, flight: SharedFlight) {
        self.screen = Screen::Details(flight);
    }

    pub fn open_tab(&mut self, tab: Tab) {
        self.screen = tab.into();
    }

    /// Switches to the screen with the given tab id. Ids that do not name a
    /// tab show the search screen instead and return `false`.
    ///
    /// "details" is one of them: the details screen needs a flight, so it is
    /// only entered through [`Navigation::select_flight`]. Its "Flight not
    /// found" placeholder is only reached by mounting `WidgetFlight` without
    /// a flight.
    pub fn change_screen(&mut self, id: &str) -> bool {
        match Tab::from_id(id) {
            Some(tab) => {
                self.open_tab(tab);
                true
            }
            None => {
                self.open_tab(Tab::Search);
                false
            }
        }
    }

    pub fn back(&mut self) {
        self.screen = Screen::Search;
    }

    pub fn selected_flight(&self) -> Option<&SharedFlight> {
        match &self.screen {
            Screen::Details(flight) => Some(flight),
            _ => None,
        }
    }

    pub fn shows_bottom_navigation(&self) -> bool {
        !matches!(self.screen, Screen::Details(_))
    }
}
