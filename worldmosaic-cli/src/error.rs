//! CLI error type.

use std::fmt;

use worldmosaic::app::AppError;
use worldmosaic::config::ConfigError;
use worldmosaic::logging::LoggingError;

/// Errors surfaced to the user by a command.
#[derive(Debug)]
pub enum CliError {
    /// Invalid arguments or configuration.
    Config(String),
    /// The render pipeline failed.
    App(AppError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "{}", msg),
            CliError::App(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(_) => None,
            CliError::App(e) => Some(e),
        }
    }
}

impl From<AppError> for CliError {
    fn from(e: AppError) -> Self {
        CliError::App(e)
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::App(AppError::Config(e))
    }
}

impl From<LoggingError> for CliError {
    fn from(e: LoggingError) -> Self {
        CliError::App(AppError::Logging(e))
    }
}
