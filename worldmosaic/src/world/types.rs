//! World store traits and errors.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use crate::block::BlockId;
use crate::coord::{ChunkCoord, WORLD_HEIGHT};

/// Errors raised while querying a world store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The directory does not look like a world save.
    #[error("Not a world save: {0} (missing region directory)")]
    NotAWorld(PathBuf),

    /// I/O error reading world files.
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A region file could not be parsed.
    #[error("Invalid region file {path}: {reason}")]
    Region { path: PathBuf, reason: String },

    /// Chunk data exists but could not be decoded.
    #[error("Failed to decode chunk {coord}: {reason}")]
    ChunkDecode { coord: ChunkCoord, reason: String },

    /// The chunk was requested but is not stored.
    #[error("Chunk {0} is not present")]
    ChunkMissing(ChunkCoord),
}

/// Errors raised while reading a single cell of a chunk.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// The requested cell lies outside the chunk volume.
    #[error("Block position ({x}, {level}, {z}) is outside the chunk")]
    OutOfBounds { x: usize, level: usize, z: usize },

    /// The stored palette index does not refer to a palette entry.
    #[error("Palette index {index} out of range (palette has {len} entries)")]
    PaletteIndex { index: usize, len: usize },
}

/// One chunk's block volume: 16×16 horizontally, [`BlockGrid::height`] levels.
pub trait BlockGrid: Send {
    /// Identifier of the block at local `(x, level, z)`.
    fn block_at(&self, x: usize, level: usize, z: usize) -> Result<BlockId, GridError>;

    /// Number of vertical levels, scanned as `0..height()`.
    fn height(&self) -> usize {
        WORLD_HEIGHT
    }
}

impl<G: BlockGrid + Sync + ?Sized> BlockGrid for Arc<G> {
    fn block_at(&self, x: usize, level: usize, z: usize) -> Result<BlockId, GridError> {
        (**self).block_at(x, level, z)
    }

    fn height(&self) -> usize {
        (**self).height()
    }
}

/// Read access to a world save.
///
/// Implementations must be thread-safe: the mosaic assembler queries one
/// store from many worker threads at once.
pub trait WorldStore: Send + Sync {
    /// Whether a chunk has been generated at `coord`.
    fn has_chunk(&self, coord: ChunkCoord) -> Result<bool, StoreError>;

    /// Load the block volume of the chunk at `coord`.
    fn read_chunk(&self, coord: ChunkCoord) -> Result<Box<dyn BlockGrid>, StoreError>;
}
