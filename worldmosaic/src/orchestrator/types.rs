//! Mosaic assembly types and errors

use std::fmt;

use image::RgbaImage;

use crate::codec::{CodecError, ImageCodec};
use crate::coord::{ChunkCoord, LocalOffset};
use crate::tile::{GenerateError, Tile};

/// Errors that can occur while assembling a mosaic.
#[derive(Debug)]
pub enum MosaicError {
    /// Scale is zero or the canvas would not fit in memory
    InvalidScale { scale: u32 },
    /// Some chunk coordinate of the region is outside the `i32` range
    CoordinateOverflow { origin: ChunkCoord, scale: u32 },
    /// The worker pool could not be created
    ThreadPool(String),
    /// Strict mode: at least one chunk failed
    PartialFailure {
        total: usize,
        failures: Vec<ChunkFailure>,
    },
}

impl fmt::Display for MosaicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MosaicError::InvalidScale { scale } => {
                write!(f, "Invalid scale {}: must be between 1 and {}", scale, super::MAX_SCALE)
            }
            MosaicError::CoordinateOverflow { origin, scale } => write!(
                f,
                "Region of {}×{} chunks from {} exceeds the coordinate range",
                scale, scale, origin
            ),
            MosaicError::ThreadPool(msg) => write!(f, "Failed to create worker pool: {}", msg),
            MosaicError::PartialFailure { total, failures } => {
                write!(f, "{} of {} chunks failed", failures.len(), total)?;
                if let Some(first) = failures.first() {
                    write!(f, " (first: chunk {}: {})", first.coord, first.error)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for MosaicError {}

/// Result of generating a single chunk.
#[derive(Debug)]
pub struct ChunkResult {
    /// Position of the chunk's tile in the mosaic
    pub offset: LocalOffset,
    /// Absolute chunk coordinate
    pub coord: ChunkCoord,
    /// Tile, absence, or the error that prevented rendering
    pub outcome: Result<Option<Tile>, GenerateError>,
}

/// How one chunk finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkStatus {
    Rendered,
    Absent,
    Failed,
}

impl ChunkResult {
    pub fn status(&self) -> ChunkStatus {
        match &self.outcome {
            Ok(Some(_)) => ChunkStatus::Rendered,
            Ok(None) => ChunkStatus::Absent,
            Err(_) => ChunkStatus::Failed,
        }
    }
}

/// A chunk that could not be rendered; its tile position stays blank.
#[derive(Debug)]
pub struct ChunkFailure {
    pub offset: LocalOffset,
    pub coord: ChunkCoord,
    pub error: GenerateError,
}

/// Statistics about a mosaic assembly.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MosaicStats {
    /// Chunks in the region (`scale²`)
    pub total: usize,
    /// Chunks drawn onto the canvas
    pub rendered: usize,
    /// Chunks not present in the world
    pub absent: usize,
    /// Chunks that failed to render
    pub failed: usize,
    /// Total time elapsed in seconds
    pub elapsed_secs: f64,
}

/// An assembled mosaic.
#[derive(Debug)]
pub struct Mosaic {
    /// The `(scale*16)²` canvas
    pub canvas: RgbaImage,
    pub stats: MosaicStats,
    /// Per-chunk failures, in no particular order
    pub failures: Vec<ChunkFailure>,
}

impl Mosaic {
    /// Whether every chunk was either rendered or absent.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Encode the canvas with `codec`.
    pub fn encode(&self, codec: &dyn ImageCodec) -> Result<Vec<u8>, CodecError> {
        codec.encode(&self.canvas)
    }
}
