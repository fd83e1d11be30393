/// Supplementary data shown for airborne flights on the details screen.
/// There is no live source yet, so the values are fixed placeholders.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveData {
    pub current_location: String,
    pub next_waypoint: String,
    pub time_to_destination: String,
    pub fuel_remaining: String,
    pub weather_at_destination: String,
}

impl Default for LiveData {
    fn default() -> Self {
        LiveData {
            current_location: String::from("Over Kansas"),
            next_waypoint: String::from("Denver, CO"),
            time_to_destination: String::from("2h 15m"),
            fuel_remaining: String::from("68%"),
            weather_at_destination: String::from("Clear, 72°F"),
        }
    }
}
