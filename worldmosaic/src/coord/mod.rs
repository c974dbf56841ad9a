//! Chunk coordinate types.
//!
//! A world is addressed horizontally by chunk coordinates; each chunk spans
//! [`CHUNK_WIDTH`]×[`CHUNK_WIDTH`] blocks and the full [`WORLD_HEIGHT`]
//! vertically.

mod types;

pub use types::{ChunkCoord, LocalOffset, CHUNK_WIDTH, TILE_SIZE, WORLD_HEIGHT};

/// Enumerates every local offset of a square region of `scale` chunks per side.
///
/// Offsets are produced column-major (`i` outer, `j` inner), matching the
/// dispatch order of the mosaic assembler. The order carries no meaning for
/// the rendered output.
pub fn region_offsets(scale: u32) -> impl Iterator<Item = LocalOffset> {
    (0..scale).flat_map(move |i| (0..scale).map(move |j| LocalOffset::new(i, j)))
}
