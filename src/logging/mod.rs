//! Logging setup.
//!
//! Installs a human-readable stderr layer at `logLevel` and, when `logFile`
//! is configured, a JSON layer appending to that file at `logFileLevel`.
//! `RUST_LOG` overrides the stderr level.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::filter::ParseError;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::LogSettings;

/// Errors raised while installing the subscriber.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Invalid log level: {0}")]
    InvalidLevel(#[from] ParseError),

    #[error("Failed to open log file '{}': {source}", path.display())]
    LogFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Logging already initialized: {0}")]
    Init(#[from] TryInitError),
}

/// Install the global subscriber for `settings`.
pub fn init_logging(settings: &LogSettings) -> Result<(), LoggingError> {
    let stderr_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => level_filter(&settings.log_level)?,
    };
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(stderr_filter);

    let file_layer = match &settings.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|source| LoggingError::LogFile {
                    path: PathBuf::from(path),
                    source,
                })?;
            Some(
                fmt::layer()
                    .json()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file))
                    .with_filter(level_filter(&settings.log_file_level)?),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .try_init()?;

    tracing::debug!(
        level = %settings.log_level,
        file = ?settings.log_file,
        "Logging initialized"
    );
    Ok(())
}

/// Filter for a configured level name. `fatal` maps to `error`.
fn level_filter(level: &str) -> Result<EnvFilter, LoggingError> {
    let directive = match level.trim().to_lowercase().as_str() {
        "fatal" => "error".to_string(),
        other => other.to_string(),
    };
    Ok(EnvFilter::try_new(directive)?)
}
