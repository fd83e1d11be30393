use egui::Color32;

const GREEN: Color32 = Color32::from_rgb(0x10, 0xB9, 0x81);
const AMBER: Color32 = Color32::from_rgb(0xF5, 0x9E, 0x0B);
const BLUE: Color32 = Color32::from_rgb(0x3B, 0x82, 0xF6);
const RED: Color32 = Color32::from_rgb(0xEF, 0x44, 0x44);
const GRAY: Color32 = Color32::from_rgb(0x6B, 0x72, 0x80);

/// Represents the statuses a flight can be displayed with.
///
/// The set is open: any status string the data source produces that is not
/// recognised is kept verbatim in `Other`.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum FlightStatus {
    OnTime,
    Delayed,
    Boarding,
    InFlight,
    Landed,
    Cancelled,
    Departed,
    Other(String),
}

impl FlightStatus {
    /// Converts the `FlightStatus` variant to its display string.
    pub fn as_str(&self) -> &str {
        match self {
            FlightStatus::OnTime => "On Time",
            FlightStatus::Delayed => "Delayed",
            FlightStatus::Boarding => "Boarding",
            FlightStatus::InFlight => "In Flight",
            FlightStatus::Landed => "Landed",
            FlightStatus::Cancelled => "Cancelled",
            FlightStatus::Departed => "Departed",
            FlightStatus::Other(status) => status,
        }
    }

    /// Creates a `FlightStatus` from a status string, ignoring case.
    pub fn parse(status: &str) -> FlightStatus {
        match status.to_lowercase().as_str() {
            "on time" => FlightStatus::OnTime,
            "delayed" => FlightStatus::Delayed,
            "boarding" => FlightStatus::Boarding,
            "in flight" => FlightStatus::InFlight,
            "landed" => FlightStatus::Landed,
            "cancelled" => FlightStatus::Cancelled,
            "departed" => FlightStatus::Departed,
            _ => FlightStatus::Other(status.to_string()),
        }
    }

    /// Badge color for the status.
    pub fn color(&self) -> Color32 {
        match self {
            FlightStatus::OnTime | FlightStatus::InFlight => GREEN,
            FlightStatus::Delayed => AMBER,
            FlightStatus::Boarding => BLUE,
            FlightStatus::Cancelled => RED,
            FlightStatus::Landed | FlightStatus::Departed | FlightStatus::Other(_) => GRAY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_ignores_case() {
        assert_eq!(FlightStatus::parse("On Time"), FlightStatus::OnTime);
        assert_eq!(FlightStatus::parse("IN FLIGHT"), FlightStatus::InFlight);
        assert_eq!(FlightStatus::parse("cancelled"), FlightStatus::Cancelled);
    }

    #[test]
    fn unknown_status_is_kept_verbatim() {
        let status = FlightStatus::parse("Diverted");
        assert_eq!(status, FlightStatus::Other("Diverted".to_string()));
        assert_eq!(status.as_str(), "Diverted");
        assert_eq!(status.color(), GRAY);
    }

    #[test]
    fn colors_follow_status() {
        assert_eq!(FlightStatus::parse("on time").color(), GREEN);
        assert_eq!(FlightStatus::parse("In Flight").color(), GREEN);
        assert_eq!(FlightStatus::parse("Delayed").color(), AMBER);
        assert_eq!(FlightStatus::parse("Boarding").color(), BLUE);
        assert_eq!(FlightStatus::parse("CANCELLED").color(), RED);
        assert_eq!(FlightStatus::parse("Landed").color(), GRAY);
    }
}
