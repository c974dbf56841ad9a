//! In-memory world store.

use std::collections::HashMap;
use std::sync::Arc;

use crate::block::BlockId;
use crate::coord::{ChunkCoord, CHUNK_WIDTH, WORLD_HEIGHT};

use super::types::{BlockGrid, GridError, StoreError, WorldStore};

const CELLS: usize = CHUNK_WIDTH * CHUNK_WIDTH * WORLD_HEIGHT;

/// Palette-backed chunk held entirely in memory.
///
/// Every cell starts as `minecraft:air`.
#[derive(Debug, Clone)]
pub struct DenseChunk {
    palette: Vec<BlockId>,
    cells: Vec<u16>,
}

impl DenseChunk {
    /// Create a chunk filled with air.
    pub fn new() -> Self {
        Self {
            palette: vec![BlockId::from("minecraft:air")],
            cells: vec![0; CELLS],
        }
    }

    fn index(x: usize, level: usize, z: usize) -> Option<usize> {
        if x >= CHUNK_WIDTH || z >= CHUNK_WIDTH || level >= WORLD_HEIGHT {
            return None;
        }
        Some((level * CHUNK_WIDTH + z) * CHUNK_WIDTH + x)
    }

    fn palette_index(&mut self, block: BlockId) -> u16 {
        match self.palette.iter().position(|b| *b == block) {
            Some(i) => i as u16,
            None => {
                self.palette.push(block);
                (self.palette.len() - 1) as u16
            }
        }
    }

    /// Set one cell. Returns `false` when the position is outside the chunk.
    pub fn set_block(&mut self, x: usize, level: usize, z: usize, block: impl Into<BlockId>) -> bool {
        let Some(idx) = Self::index(x, level, z) else {
            return false;
        };
        let palette_idx = self.palette_index(block.into());
        self.cells[idx] = palette_idx;
        true
    }

    /// Set every cell of one level.
    pub fn fill_level(&mut self, level: usize, block: impl Into<BlockId>) -> bool {
        if level >= WORLD_HEIGHT {
            return false;
        }
        let palette_idx = self.palette_index(block.into());
        let start = level * CHUNK_WIDTH * CHUNK_WIDTH;
        self.cells[start..start + CHUNK_WIDTH * CHUNK_WIDTH].fill(palette_idx);
        true
    }
}

impl Default for DenseChunk {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockGrid for DenseChunk {
    fn block_at(&self, x: usize, level: usize, z: usize) -> Result<BlockId, GridError> {
        let idx = Self::index(x, level, z).ok_or(GridError::OutOfBounds { x, level, z })?;
        let palette_idx = self.cells[idx] as usize;
        self.palette
            .get(palette_idx)
            .cloned()
            .ok_or(GridError::PaletteIndex {
                index: palette_idx,
                len: self.palette.len(),
            })
    }
}

/// World store backed by a map of in-memory chunks.
#[derive(Debug, Default)]
pub struct MemoryWorld {
    chunks: HashMap<ChunkCoord, Arc<DenseChunk>>,
}

impl MemoryWorld {
    /// Create an empty world.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a chunk at `coord`, replacing any previous one.
    pub fn insert(&mut self, coord: ChunkCoord, chunk: DenseChunk) {
        self.chunks.insert(coord, Arc::new(chunk));
    }

    /// Number of stored chunks.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Returns true if no chunk is stored.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

impl WorldStore for MemoryWorld {
    fn has_chunk(&self, coord: ChunkCoord) -> Result<bool, StoreError> {
        Ok(self.chunks.contains_key(&coord))
    }

    fn read_chunk(&self, coord: ChunkCoord) -> Result<Box<dyn BlockGrid>, StoreError> {
        self.chunks
            .get(&coord)
            .map(|chunk| Box::new(Arc::clone(chunk)) as Box<dyn BlockGrid>)
            .ok_or(StoreError::ChunkMissing(coord))
    }
}
