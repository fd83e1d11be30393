use std::{collections::HashMap, fmt, sync::Arc};

use chrono::NaiveTime;
use serde::Deserialize;

use crate::types::{Airport, Endpoint, FlightRecord, SharedFlight};

const FLIGHTS_CSV: &str = include_str!("../data/flights.csv");
const AIRPORTS_CSV: &str = include_str!("../data/airports.csv");

#[derive(Debug, Clone, PartialEq)]
pub enum ProviderError {
    Parse(String),
    InvalidRecord(String),
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::Parse(msg) => write!(f, "Could not parse flight data: {}", msg),
            ProviderError::InvalidRecord(msg) => write!(f, "Invalid flight record: {}", msg),
        }
    }
}

impl std::error::Error for ProviderError {}

impl From<csv::Error> for ProviderError {
    fn from(err: csv::Error) -> Self {
        ProviderError::Parse(err.to_string())
    }
}

/// A trait that defines the data a screen may ask for. Screens only talk to
/// this trait, so a live source can replace the mock datasets without
/// touching any view code.
///
/// Providers are queried from the load worker threads, hence `Send + Sync`.
pub trait Provider: Send + Sync {
    /// Flights whose number contains `query`, ignoring case.
    fn search_by_number(&self, query: &str) -> Result<Vec<SharedFlight>, ProviderError>;

    fn list_tracked_flights(&self) -> Result<Vec<SharedFlight>, ProviderError>;

    /// Departures from the given airport. Unknown codes yield an empty list.
    fn list_departures_for(&self, airport: &str) -> Result<Vec<SharedFlight>, ProviderError>;

    fn list_airports(&self) -> Result<Vec<Airport>, ProviderError>;
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "lowercase")]
enum Dataset {
    Search,
    Tracking,
    Departures,
}

#[derive(Debug, Deserialize)]
struct FlightRow {
    dataset: Dataset,
    airport: Option<String>,
    id: String,
    flight_number: String,
    airline: String,
    departure_airport: String,
    departure_city: String,
    departure_time: String,
    arrival_airport: String,
    arrival_city: String,
    arrival_time: String,
    status: String,
    gate: Option<String>,
    terminal: Option<String>,
    aircraft: Option<String>,
    progress: Option<f64>,
    delay: Option<i32>,
    altitude: Option<String>,
    speed: Option<String>,
    eta: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AirportRow {
    code: String,
    name: String,
}

fn check_time(flight: &str, time: &str) -> Result<(), ProviderError> {
    NaiveTime::parse_from_str(time, "%H:%M")
        .map(|_| ())
        .map_err(|_| ProviderError::InvalidRecord(format!("{flight}: bad time '{time}'")))
}

impl TryFrom<FlightRow> for FlightRecord {
    type Error = ProviderError;

    fn try_from(row: FlightRow) -> Result<Self, Self::Error> {
        check_time(&row.flight_number, &row.departure_time)?;
        check_time(&row.flight_number, &row.arrival_time)?;
        if let Some(eta) = &row.eta {
            check_time(&row.flight_number, eta)?;
        }

        Ok(FlightRecord {
            id: row.id,
            flight_number: row.flight_number,
            airline: row.airline,
            departure: Endpoint {
                airport: row.departure_airport,
                city: row.departure_city,
                time: row.departure_time,
            },
            arrival: Endpoint {
                airport: row.arrival_airport,
                city: row.arrival_city,
                time: row.arrival_time,
            },
            status: row.status,
            gate: row.gate,
            terminal: row.terminal,
            aircraft: row.aircraft,
            progress: row.progress,
            delay: row.delay,
            altitude: row.altitude,
            speed: row.speed,
            eta: row.eta,
        })
    }
}

/// Fixed datasets standing in for a live flight source.
///
/// Every record is parsed once and handed out as a shared handle, so the
/// flight a screen reports on selection is the same allocation the provider
/// holds.
pub struct MockProvider {
    search: Vec<SharedFlight>,
    tracked: Vec<SharedFlight>,
    departures: HashMap<String, Vec<SharedFlight>>,
    airports: Vec<Airport>,
}

impl MockProvider {
    /// Loads the datasets bundled with the application.
    pub fn new() -> Result<Self, ProviderError> {
        Self::from_csv(FLIGHTS_CSV, AIRPORTS_CSV)
    }

    pub fn from_csv(flights: &str, airports: &str) -> Result<Self, ProviderError> {
        let mut provider = MockProvider {
            search: Vec::new(),
            tracked: Vec::new(),
            departures: HashMap::new(),
            airports: Vec::new(),
        };

        let mut reader = csv::Reader::from_reader(flights.as_bytes());
        for row in reader.deserialize::<FlightRow>() {
            let row = row?;
            let dataset = row.dataset;
            let board_airport = row.airport.clone();
            let flight = Arc::new(FlightRecord::try_from(row)?);

            match dataset {
                Dataset::Search => provider.search.push(flight),
                Dataset::Tracking => provider.tracked.push(flight),
                Dataset::Departures => {
                    let code = board_airport.ok_or_else(|| {
                        ProviderError::InvalidRecord(format!(
                            "{}: departure without airport",
                            flight.flight_number
                        ))
                    })?;
                    provider.departures.entry(code).or_default().push(flight);
                }
            }
        }

        let mut reader = csv::Reader::from_reader(airports.as_bytes());
        for row in reader.deserialize::<AirportRow>() {
            let row = row?;
            provider.airports.push(Airport::new(row.code, row.name));
        }

        Ok(provider)
    }
}

impl Provider for MockProvider {
    fn search_by_number(&self, query: &str) -> Result<Vec<SharedFlight>, ProviderError> {
        Ok(self
            .search
            .iter()
            .filter(|flight| flight.matches_number(query))
            .cloned()
            .collect())
    }

    fn list_tracked_flights(&self) -> Result<Vec<SharedFlight>, ProviderError> {
        Ok(self.tracked.clone())
    }

    fn list_departures_for(&self, airport: &str) -> Result<Vec<SharedFlight>, ProviderError> {
        Ok(self.departures.get(airport).cloned().unwrap_or_default())
    }

    fn list_airports(&self) -> Result<Vec<Airport>, ProviderError> {
        Ok(self.airports.clone())
    }
}
