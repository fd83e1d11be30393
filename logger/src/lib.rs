use chrono::Utc;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Severity of a log entry. Entries below the logger's minimum level are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    /// Parses a level name, ignoring case.
    pub fn parse(level: &str) -> Result<LogLevel, LoggerError> {
        match level.trim().to_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(LoggerError::InvalidLevel(level.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Blue,
    Yellow,
    Cyan,
    Magenta,
    White,
}

impl Color {
    fn to_ansi_code(self) -> &'static str {
        match self {
            Color::Red => "\x1b[31m",
            Color::Green => "\x1b[32m",
            Color::Blue => "\x1b[34m",
            Color::Yellow => "\x1b[33m",
            Color::Cyan => "\x1b[36m",
            Color::Magenta => "\x1b[35m",
            Color::White => "\x1b[37m",
        }
    }
}

/// Application logger writing timestamped lines to a session log file and,
/// optionally, echoing them to the console with colors.
///
/// A logger without a file (see [`Logger::detached`]) still honours the
/// console flag, which keeps it usable when the log directory is unavailable.
#[derive(Debug, Clone)]
pub struct Logger {
    log_file: Option<PathBuf>,
    min_level: LogLevel,
    to_console: bool,
}

impl Logger {
    /// Creates a new `Logger` that writes to `<log_dir>/<session>.log`.
    ///
    /// # Parameters
    /// - `log_dir`: Existing directory where the log file should be created.
    /// - `session`: Base name of the log file.
    ///
    /// The file is truncated, so every run starts with an empty log.
    pub fn new(log_dir: &Path, session: &str) -> Result<Self, LoggerError> {
        if !log_dir.is_dir() {
            return Err(LoggerError::InvalidPath(format!(
                "{} is not a directory.",
                log_dir.display()
            )));
        }

        let sanitized = session.replace(&[':', '/', '\\'][..], "_");
        let log_file = log_dir.join(format!("{}.log", sanitized));

        OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&log_file)
            .map_err(LoggerError::from)?;

        Ok(Logger {
            log_file: Some(log_file),
            min_level: LogLevel::Info,
            to_console: false,
        })
    }

    /// A logger that writes nowhere until console output is enabled.
    pub fn detached() -> Self {
        Logger {
            log_file: None,
            min_level: LogLevel::Info,
            to_console: false,
        }
    }

    pub fn with_level(mut self, min_level: LogLevel) -> Self {
        self.min_level = min_level;
        self
    }

    pub fn with_console(mut self, to_console: bool) -> Self {
        self.to_console = to_console;
        self
    }

    pub fn log_file(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    fn log(&self, level: LogLevel, color: Option<Color>, message: &str) -> Result<(), LoggerError> {
        if level < self.min_level {
            return Ok(());
        }

        let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let log_message = format!("[{}] [{}]: {}\n", level.as_str(), timestamp, message);

        if self.to_console {
            let colored_message = match (level, color) {
                (LogLevel::Warn, _) => format!("\x1b[93m{}\x1b[0m", log_message),
                (LogLevel::Error, _) => format!("\x1b[91m{}\x1b[0m", log_message),
                (_, Some(color)) => format!("{}{}\x1b[0m", color.to_ansi_code(), log_message),
                (_, None) => log_message.clone(),
            };
            print!("{}", colored_message);
            io::stdout().flush().map_err(LoggerError::from)?;
        }

        if let Some(path) = &self.log_file {
            let mut file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(LoggerError::from)?;
            file.write_all(log_message.as_bytes())
                .map_err(LoggerError::from)?;
            file.flush().map_err(LoggerError::from)?;
        }

        Ok(())
    }

    pub fn debug(&self, message: &str) -> Result<(), LoggerError> {
        self.log(LogLevel::Debug, None, message)
    }

    /// Logs an informational message.
    ///
    /// # Parameters
    /// - `message`: The informational message to log.
    /// - `color`: The color to use for the console output.
    pub fn info(&self, message: &str, color: Color) -> Result<(), LoggerError> {
        self.log(LogLevel::Info, Some(color), message)
    }

    /// Logs a warning message.
    pub fn warn(&self, message: &str) -> Result<(), LoggerError> {
        self.log(LogLevel::Warn, None, message)
    }

    /// Logs an error message.
    pub fn error(&self, message: &str) -> Result<(), LoggerError> {
        self.log(LogLevel::Error, None, message)
    }
}

#[derive(Debug)]
pub enum LoggerError {
    IoError(std::io::Error),
    InvalidPath(String),
    InvalidLevel(String),
}

impl std::fmt::Display for LoggerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoggerError::IoError(e) => write!(f, "I/O Error: {}", e),
            LoggerError::InvalidPath(msg) => write!(f, "Invalid Path: {}", msg),
            LoggerError::InvalidLevel(level) => write!(f, "Invalid log level: {}", level),
        }
    }
}

impl std::error::Error for LoggerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoggerError::IoError(e) => Some(e),
            LoggerError::InvalidPath(_) | LoggerError::InvalidLevel(_) => None,
        }
    }
}

impl From<std::io::Error> for LoggerError {
    fn from(err: std::io::Error) -> Self {
        LoggerError::IoError(err)
    }
}
