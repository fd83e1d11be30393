use std::env;

use graphical_interface::config::AppConfig;

/// Launches the flight tracker.
///
/// # Usage
///
/// ```sh
/// cargo run -- [default_airport] [log_dir]
/// ```
///
/// The simulated load latency, log level and console echo are read from
/// `FLIGHT_TRACKER_LOAD_DELAY_MS`, `FLIGHT_TRACKER_LOG_LEVEL` and
/// `FLIGHT_TRACKER_LOG_CONSOLE`.
fn main() -> Result<(), String> {
    let args: Vec<String> = env::args().collect();

    let config = AppConfig::from_env_args(&args).map_err(|e| e.to_string())?;

    graphical_interface::run(config).map_err(|e| e.to_string())
}
