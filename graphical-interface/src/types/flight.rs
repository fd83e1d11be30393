use std::sync::Arc;

use super::FlightStatus;

/// Raw status that enables live telemetry. Compared exactly, unlike colors.
pub const IN_FLIGHT: &str = "In Flight";

/// Flight records are never mutated after loading, so screens and the
/// navigation state share them.
pub type SharedFlight = Arc<FlightRecord>;

/// One end of a route.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    pub airport: String,
    pub city: String,
    pub time: String,
}

/// Represents a flight as displayed by the search, tracking, departures and
/// details screens.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightRecord {
    pub id: String,
    pub flight_number: String,
    pub airline: String,
    pub departure: Endpoint,
    pub arrival: Endpoint,
    pub status: String,
    pub gate: Option<String>,
    pub terminal: Option<String>,
    pub aircraft: Option<String>,
    pub progress: Option<f64>,
    pub delay: Option<i32>,
    pub altitude: Option<String>,
    pub speed: Option<String>,
    pub eta: Option<String>,
}

/// Speed and altitude of an airborne flight.
#[derive(Debug, PartialEq)]
pub struct Telemetry<'a> {
    pub speed: Option<&'a str>,
    pub altitude: Option<&'a str>,
}

impl FlightRecord {
    pub fn status(&self) -> FlightStatus {
        FlightStatus::parse(&self.status)
    }

    pub fn is_in_flight(&self) -> bool {
        self.status == IN_FLIGHT
    }

    /// Case-insensitive substring match on the flight number.
    pub fn matches_number(&self, query: &str) -> bool {
        self.flight_number
            .to_lowercase()
            .contains(&query.to_lowercase())
    }

    /// Route completion in [0, 1].
    pub fn progress_fraction(&self) -> f32 {
        match self.progress {
            Some(progress) if !progress.is_nan() => progress.clamp(0.0, 1.0) as f32,
            _ => 0.0,
        }
    }

    /// Horizontal position of the plane marker along the route line, in [0, 0.9].
    pub fn marker_position(&self) -> f32 {
        let percent = self.progress.filter(|p| !p.is_nan()).unwrap_or(0.0) * 100.0 - 5.0;
        (percent.clamp(0.0, 90.0) / 100.0) as f32
    }

    pub fn delay_minutes(&self) -> i32 {
        self.delay.unwrap_or(0)
    }

    pub fn live_telemetry(&self) -> Option<Telemetry<'_>> {
        if !self.is_in_flight() {
            return None;
        }
        Some(Telemetry {
            speed: self.speed.as_deref(),
            altitude: self.altitude.as_deref(),
        })
    }

    /// Estimated arrival when known, otherwise the scheduled one.
    pub fn arrival_estimate(&self) -> &str {
        self.eta.as_deref().unwrap_or(&self.arrival.time)
    }
}

/// Delay text used by the tracking cards.
pub fn format_delay(delay: i32) -> String {
    match delay {
        0 => "On Time".to_string(),
        d if d > 0 => format!("+{} min", d),
        d => format!("{} min", d),
    }
}

/// Compact delay badge used by the departures board. No badge when on time.
pub fn delay_badge(delay: Option<i32>) -> Option<String> {
    match delay {
        Some(minutes) if minutes != 0 => Some(format!("+{}m", minutes)),
        _ => None,
    }
}
