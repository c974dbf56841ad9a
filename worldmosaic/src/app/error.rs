//! Application error types.

use std::fmt;
use std::path::PathBuf;

use crate::codec::CodecError;
use crate::config::ConfigError;
use crate::logging::LoggingError;
use crate::orchestrator::MosaicError;
use crate::texture::TextureError;
use crate::world::StoreError;

/// Errors that abort a render run.
#[derive(Debug)]
pub enum AppError {
    /// The world save could not be opened.
    StoreOpen(StoreError),

    /// The resource pack manifest could not be loaded.
    ResourcePack(TextureError),

    /// Configuration error.
    Config(ConfigError),

    /// Logging could not be initialized.
    Logging(LoggingError),

    /// Mosaic assembly failed.
    Mosaic(MosaicError),

    /// The finished canvas could not be encoded.
    Encode(CodecError),

    /// The output file could not be written.
    Output {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl AppError {
    /// Whether the error happened before any chunk was rendered.
    pub fn is_setup(&self) -> bool {
        matches!(
            self,
            AppError::StoreOpen(_)
                | AppError::ResourcePack(_)
                | AppError::Config(_)
                | AppError::Logging(_)
        )
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::StoreOpen(e) => write!(f, "Failed to open world: {}", e),
            AppError::ResourcePack(e) => write!(f, "Failed to load resource pack: {}", e),
            AppError::Config(e) => write!(f, "Configuration error: {}", e),
            AppError::Logging(e) => write!(f, "Failed to initialize logging: {}", e),
            AppError::Mosaic(e) => write!(f, "Mosaic failed: {}", e),
            AppError::Encode(e) => write!(f, "Failed to encode image: {}", e),
            AppError::Output { path, source } => {
                write!(f, "Failed to write {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::StoreOpen(e) => Some(e),
            AppError::ResourcePack(e) => Some(e),
            AppError::Config(e) => Some(e),
            AppError::Logging(e) => Some(e),
            AppError::Mosaic(e) => Some(e),
            AppError::Encode(e) => Some(e),
            AppError::Output { source, .. } => Some(source),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        AppError::Config(e)
    }
}

impl From<LoggingError> for AppError {
    fn from(e: LoggingError) -> Self {
        AppError::Logging(e)
    }
}
