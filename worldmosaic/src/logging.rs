//! Logging setup.
//!
//! Installs a `tracing` subscriber writing human-readable lines to stderr
//! and, when a log directory is configured, to `worldmosaic.log` through a
//! non-blocking writer.

use std::fs;
use std::path::PathBuf;

use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Log file name inside the log directory.
pub const LOG_FILE_NAME: &str = "worldmosaic.log";

/// Errors installing the logging subscriber.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The configured level is not a valid filter directive.
    #[error("Invalid log level '{level}': {reason}")]
    InvalidLevel { level: String, reason: String },

    /// The log directory could not be created.
    #[error("Failed to create log directory {path}: {source}")]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A global subscriber is already installed.
    #[error("Logging already initialized: {0}")]
    AlreadyInitialized(String),
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is not set (e.g. `info`, `worldmosaic=debug`).
    pub level: String,
    /// Directory for the log file; stderr only when `None`.
    pub directory: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}

/// Keeps the file writer alive. Dropping it flushes buffered log lines.
#[must_use = "dropping the guard stops file logging"]
pub struct LoggingGuard {
    _file: Option<WorkerGuard>,
}

/// Build the filter for a configured level.
fn level_filter(level: &str) -> Result<EnvFilter, LoggingError> {
    EnvFilter::try_new(level).map_err(|e| LoggingError::InvalidLevel {
        level: level.to_string(),
        reason: e.to_string(),
    })
}

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence over `config.level`.
pub fn init_logging(config: &LoggingConfig) -> Result<LoggingGuard, LoggingError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => level_filter(&config.level)?,
    };

    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    let (file_layer, guard) = match &config.directory {
        Some(dir) => {
            fs::create_dir_all(dir).map_err(|source| LoggingError::Directory {
                path: dir.clone(),
                source,
            })?;
            let appender = tracing_appender::rolling::never(dir, LOG_FILE_NAME);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))?;

    Ok(LoggingGuard { _file: guard })
}
