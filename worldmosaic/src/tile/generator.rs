//! ChunkGenerator trait for abstracting chunk tile generation.
//!
//! The mosaic assembler only needs "give me the tile for this chunk", so it
//! talks to a [`ChunkGenerator`] and never to the world store or rasterizer
//! directly.
//!
//! # Example
//!
//! ```
//! use worldmosaic::coord::ChunkCoord;
//! use worldmosaic::tile::ChunkGenerator;
//!
//! fn count_present(generator: &dyn ChunkGenerator, coords: &[ChunkCoord]) -> usize {
//!     coords
//!         .iter()
//!         .filter(|c| matches!(generator.generate(**c), Ok(Some(_))))
//!         .count()
//! }
//! ```

use std::fmt;
use std::sync::Arc;

use crate::coord::ChunkCoord;
use crate::raster::{ChunkRasterizer, RasterError};
use crate::tile::Tile;
use crate::world::{StoreError, WorldStore};

/// Errors from generating one chunk's tile.
#[derive(Debug)]
pub enum GenerateError {
    /// The world store could not be queried or the chunk could not be read.
    Store(StoreError),
    /// The chunk was read but could not be rasterized.
    Raster(RasterError),
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerateError::Store(e) => write!(f, "World store error: {}", e),
            GenerateError::Raster(e) => write!(f, "Rasterization failed: {}", e),
        }
    }
}

impl std::error::Error for GenerateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GenerateError::Store(e) => Some(e),
            GenerateError::Raster(e) => Some(e),
        }
    }
}

impl From<StoreError> for GenerateError {
    fn from(e: StoreError) -> Self {
        GenerateError::Store(e)
    }
}

impl From<RasterError> for GenerateError {
    fn from(e: RasterError) -> Self {
        GenerateError::Raster(e)
    }
}

/// Trait for chunk tile generation strategies.
///
/// Implementations must be thread-safe (`Send + Sync`): the assembler calls
/// one generator from every worker thread.
///
/// # Implementors
///
/// - [`DefaultChunkGenerator`] - Reads chunks from a [`WorldStore`] and
///   rasterizes them
pub trait ChunkGenerator: Send + Sync {
    /// Generate the tile for the chunk at `coord`.
    ///
    /// # Returns
    ///
    /// `Ok(None)` when no chunk exists at `coord`. Sparse worlds are normal,
    /// so absence is not an error.
    ///
    /// # Errors
    ///
    /// Returns `GenerateError` if the store cannot be queried, the chunk
    /// cannot be read, or rasterization fails.
    fn generate(&self, coord: ChunkCoord) -> Result<Option<Tile>, GenerateError>;
}

/// Generator backed by a world store and a rasterizer.
pub struct DefaultChunkGenerator {
    store: Arc<dyn WorldStore>,
    rasterizer: ChunkRasterizer,
}

impl DefaultChunkGenerator {
    pub fn new(store: Arc<dyn WorldStore>, rasterizer: ChunkRasterizer) -> Self {
        Self { store, rasterizer }
    }

    /// Rasterizer used for present chunks.
    pub fn rasterizer(&self) -> &ChunkRasterizer {
        &self.rasterizer
    }
}

impl ChunkGenerator for DefaultChunkGenerator {
    fn generate(&self, coord: ChunkCoord) -> Result<Option<Tile>, GenerateError> {
        if !self.store.has_chunk(coord)? {
            return Ok(None);
        }

        let grid = self.store.read_chunk(coord)?;
        let tile = self.rasterizer.rasterize(grid.as_ref())?;
        Ok(Some(tile))
    }
}
