//! Chunk tiles and the generators that produce them.

mod generator;
mod types;

pub use generator::{ChunkGenerator, DefaultChunkGenerator, GenerateError};
pub use types::{Tile, BACKGROUND};
