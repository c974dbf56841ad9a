//! Error types for texture catalog operations.

use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::block::BlockId;

/// Errors that can occur while resolving, loading or registering textures.
///
/// Absence of a texture is not an error for callers that only ask
/// [`TextureCatalog::has_texture`](super::TextureCatalog::has_texture); these
/// variants surface when a texture was requested and could not be produced.
#[derive(Debug)]
pub enum TextureError {
    /// No path is registered for the identifier or any canonical it aliases.
    NotFound { id: BlockId },
    /// A path is registered but no file exists there.
    MissingFile { id: BlockId, path: PathBuf },
    /// The texture file exists but could not be read.
    Read { path: PathBuf, source: io::Error },
    /// The texture file was read but is not a decodable image.
    Decode { path: PathBuf, reason: String },
    /// The resource-pack manifest could not be read.
    ManifestRead { path: PathBuf, source: io::Error },
    /// The resource-pack manifest is not a JSON object.
    ManifestParse { path: PathBuf, reason: String },
}

impl TextureError {
    /// True when the texture could not be located or read, as opposed to a
    /// file that was read but failed to decode.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            TextureError::NotFound { .. }
                | TextureError::MissingFile { .. }
                | TextureError::Read { .. }
        )
    }
}

impl fmt::Display for TextureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextureError::NotFound { id } => write!(f, "No texture registered for {}", id),
            TextureError::MissingFile { id, path } => {
                write!(f, "Texture file for {} not found: {}", id, path.display())
            }
            TextureError::Read { path, source } => {
                write!(f, "Failed to read texture {}: {}", path.display(), source)
            }
            TextureError::Decode { path, reason } => {
                write!(f, "Failed to decode texture {}: {}", path.display(), reason)
            }
            TextureError::ManifestRead { path, source } => {
                write!(f, "Failed to read manifest {}: {}", path.display(), source)
            }
            TextureError::ManifestParse { path, reason } => {
                write!(f, "Invalid manifest {}: {}", path.display(), reason)
            }
        }
    }
}

impl std::error::Error for TextureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TextureError::Read { source, .. } => Some(source),
            TextureError::ManifestRead { source, .. } => Some(source),
            _ => None,
        }
    }
}
