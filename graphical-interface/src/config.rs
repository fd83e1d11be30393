use std::{fmt, path::PathBuf, time::Duration};

use logger::LogLevel;

pub const DEFAULT_AIRPORT: &str = "JFK";
pub const LOG_SESSION: &str = "flight_tracker";
const LOAD_DELAY_MILLIS: u64 = 1000;
const MAX_LOAD_DELAY_MILLIS: u64 = 60_000;
const LOADER_WORKERS: usize = 2;

const ENV_LOAD_DELAY: &str = "FLIGHT_TRACKER_LOAD_DELAY_MS";
const ENV_LOG_LEVEL: &str = "FLIGHT_TRACKER_LOG_LEVEL";
const ENV_LOG_CONSOLE: &str = "FLIGHT_TRACKER_LOG_CONSOLE";

const USAGE: &str = "Usage: flight-tracker [default_airport] [log_dir]";

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    Usage(String),
    InvalidAirport(String),
    InvalidDelay(String),
    InvalidLogLevel(String),
    InvalidFlag(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Usage(msg) => write!(f, "{}", msg),
            ConfigError::InvalidAirport(code) => {
                write!(f, "Invalid airport code '{}': expected three letters", code)
            }
            ConfigError::InvalidDelay(value) => write!(
                f,
                "Invalid load delay '{}': expected milliseconds up to {}",
                value, MAX_LOAD_DELAY_MILLIS
            ),
            ConfigError::InvalidLogLevel(level) => write!(f, "Invalid log level '{}'", level),
            ConfigError::InvalidFlag(value) => {
                write!(f, "Invalid flag '{}': expected true or false", value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Runtime settings for the flight tracker.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub default_airport: String,
    pub log_dir: PathBuf,
    pub load_delay: Duration,
    pub loader_workers: usize,
    pub log_level: LogLevel,
    pub log_to_console: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_airport: DEFAULT_AIRPORT.to_string(),
            log_dir: PathBuf::from("."),
            load_delay: Duration::from_millis(LOAD_DELAY_MILLIS),
            loader_workers: LOADER_WORKERS,
            log_level: LogLevel::Info,
            log_to_console: true,
        }
    }
}

impl AppConfig {
    /// Builds the configuration from the process arguments and environment.
    pub fn from_env_args(args: &[String]) -> Result<Self, ConfigError> {
        Self::from_sources(args, |key| std::env::var(key).ok())
    }

    /// Builds the configuration from `args` (program name first) and an
    /// environment lookup.
    ///
    /// # Errors
    ///
    /// - More than two positional arguments.
    /// - An airport code that is not three ASCII letters.
    /// - A malformed delay, log level or console flag in the environment.
    pub fn from_sources<E>(args: &[String], env: E) -> Result<Self, ConfigError>
    where
        E: Fn(&str) -> Option<String>,
    {
        if args.len() > 3 {
            return Err(ConfigError::Usage(USAGE.to_string()));
        }

        let mut config = AppConfig::default();

        if let Some(code) = args.get(1) {
            config.default_airport = parse_airport(code)?;
        }

        if let Some(dir) = args.get(2) {
            config.log_dir = PathBuf::from(dir);
        }

        if let Some(delay) = env(ENV_LOAD_DELAY) {
            config.load_delay = parse_delay(&delay)?;
        }

        if let Some(level) = env(ENV_LOG_LEVEL) {
            config.log_level =
                LogLevel::parse(&level).map_err(|_| ConfigError::InvalidLogLevel(level.clone()))?;
        }

        if let Some(flag) = env(ENV_LOG_CONSOLE) {
            config.log_to_console = parse_flag(&flag)?;
        }

        Ok(config)
    }
}

fn parse_airport(code: &str) -> Result<String, ConfigError> {
    let code = code.trim();
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ConfigError::InvalidAirport(code.to_string()));
    }
    Ok(code.to_ascii_uppercase())
}

fn parse_delay(value: &str) -> Result<Duration, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(millis) if millis <= MAX_LOAD_DELAY_MILLIS => Ok(Duration::from_millis(millis)),
        _ => Err(ConfigError::InvalidDelay(value.to_string())),
    }
}

fn parse_flag(value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidFlag(value.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_without_arguments() {
        let config = AppConfig::from_sources(&args(&["flight-tracker"]), no_env).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.default_airport, "JFK");
        assert_eq!(config.load_delay, Duration::from_millis(1000));
    }

    #[test]
    fn positional_arguments_override_defaults() {
        let config =
            AppConfig::from_sources(&args(&["flight-tracker", "mia", "/tmp/logs"]), no_env)
                .unwrap();
        assert_eq!(config.default_airport, "MIA");
        assert_eq!(config.log_dir, PathBuf::from("/tmp/logs"));
    }

    #[test]
    fn environment_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_LOAD_DELAY, "250"),
            (ENV_LOG_LEVEL, "debug"),
            (ENV_LOG_CONSOLE, "false"),
        ]);
        let config = AppConfig::from_sources(&args(&["flight-tracker"]), |key| {
            env.get(key).map(|v| v.to_string())
        })
        .unwrap();

        assert_eq!(config.load_delay, Duration::from_millis(250));
        assert_eq!(config.log_level, LogLevel::Debug);
        assert!(!config.log_to_console);
    }

    #[test]
    fn rejects_bad_values() {
        assert_eq!(
            AppConfig::from_sources(&args(&["flight-tracker", "JF1"]), no_env),
            Err(ConfigError::InvalidAirport("JF1".to_string()))
        );
        assert!(matches!(
            AppConfig::from_sources(&args(&["flight-tracker", "a", "b", "c"]), no_env),
            Err(ConfigError::Usage(_))
        ));
        assert!(matches!(
            AppConfig::from_sources(&args(&["flight-tracker"]), |_| Some("soon".to_string())),
            Err(ConfigError::InvalidDelay(_))
        ));
        assert!(matches!(
            AppConfig::from_sources(&args(&["flight-tracker"]), |key| {
                (key == ENV_LOG_LEVEL).then(|| "loud".to_string())
            }),
            Err(ConfigError::InvalidLogLevel(_))
        ));
    }
}
