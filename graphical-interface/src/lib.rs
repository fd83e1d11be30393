use std::{fmt, sync::Arc};

use egui_extras::install_image_loaders;
use logger::{Color, Logger};

pub mod app;
pub mod config;
pub mod loader;
pub mod provider;
pub mod state;
pub mod types;
pub mod widgets;

#[cfg(test)]
mod test_support;

use app::FlightApp;
use config::{AppConfig, LOG_SESSION};
use provider::{MockProvider, Provider, ProviderError};

const WINDOW_SIZE: [f32; 2] = [420.0, 820.0];
const MIN_WINDOW_SIZE: [f32; 2] = [360.0, 600.0];

#[derive(Debug)]
pub enum AppError {
    Provider(ProviderError),
    Gui(eframe::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Provider(err) => write!(f, "Could not load flight data: {}", err),
            AppError::Gui(err) => write!(f, "Window error: {}", err),
        }
    }
}

impl std::error::Error for AppError {}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        AppError::Provider(err)
    }
}

impl From<eframe::Error> for AppError {
    fn from(err: eframe::Error) -> Self {
        AppError::Gui(err)
    }
}

/// Opens the flight tracker window and blocks until it is closed.
pub fn run(config: AppConfig) -> Result<(), AppError> {
    let logger = session_logger(&config);
    let _ = logger.info(
        &format!(
            "Starting flight tracker (airport {}, load delay {} ms)",
            config.default_airport,
            config.load_delay.as_millis()
        ),
        Color::Green,
    );

    let provider: Arc<dyn Provider> = match MockProvider::new() {
        Ok(provider) => Arc::new(provider),
        Err(err) => {
            let _ = logger.error(&format!("Bundled flight data is invalid: {}", err));
            return Err(err.into());
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Flight Tracker")
            .with_inner_size(WINDOW_SIZE)
            .with_min_inner_size(MIN_WINDOW_SIZE),
        ..Default::default()
    };

    let app_logger = logger.clone();
    let result = eframe::run_native(
        "Flight Tracker",
        options,
        Box::new(move |cc| {
            install_image_loaders(&cc.egui_ctx);
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
            Ok(Box::new(FlightApp::new(&config, provider, app_logger)))
        }),
    );

    let _ = logger.info("Flight tracker closed", Color::Green);
    result.map_err(AppError::from)
}

// Falls back to a console-only logger when the log directory is unusable.
fn session_logger(config: &AppConfig) -> Logger {
    let logger = match Logger::new(&config.log_dir, LOG_SESSION) {
        Ok(logger) => logger.with_console(config.log_to_console),
        Err(err) => {
            let logger = Logger::detached().with_console(true);
            let _ = logger.warn(&format!(
                "Logging to console only, {} is unusable: {}",
                config.log_dir.display(),
                err
            ));
            logger
        }
    };
    logger.with_level(config.log_level)
}
