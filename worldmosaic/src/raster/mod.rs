//! Top-down chunk rasterization.
//!
//! Levels are scanned bottom to top and every drawable block overwrites the
//! pixel of its column, so a finished tile shows the highest block with a
//! texture at each column.

mod rasterizer;

pub use rasterizer::{ChunkRasterizer, RasterError, RasterStats};
