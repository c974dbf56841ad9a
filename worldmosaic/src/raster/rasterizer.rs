//! Chunk rasterizer.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::block::{BlockId, LegacyRemap};
use crate::coord::CHUNK_WIDTH;
use crate::texture::{Texture, TextureCatalog, TextureError};
use crate::tile::Tile;
use crate::world::{BlockGrid, GridError};

/// Errors that abort rasterization of one chunk.
#[derive(Debug)]
pub enum RasterError {
    /// The block grid could not be read.
    BlockRead(GridError),
    /// A block reported as textured failed to load its texture.
    Texture { id: BlockId, source: TextureError },
}

impl fmt::Display for RasterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RasterError::BlockRead(e) => write!(f, "Block read failed: {}", e),
            RasterError::Texture { id, source } => {
                write!(f, "Texture for {} failed to load: {}", id, source)
            }
        }
    }
}

impl std::error::Error for RasterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RasterError::BlockRead(e) => Some(e),
            RasterError::Texture { source, .. } => Some(source),
        }
    }
}

impl From<GridError> for RasterError {
    fn from(e: GridError) -> Self {
        RasterError::BlockRead(e)
    }
}

/// Counters from one rasterization run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RasterStats {
    /// Texels written, including ones later overwritten by higher blocks.
    pub drawn: usize,
    /// Distinct identifiers with a texture.
    pub palette_size: usize,
    /// Distinct identifiers found without a texture.
    pub ignored: usize,
}

/// Renders one chunk's block grid into a [`Tile`].
///
/// The rasterizer itself is stateless between runs; the palette and ignore
/// set live only for one call, while decoded textures are shared through the
/// catalog.
pub struct ChunkRasterizer {
    catalog: Arc<TextureCatalog>,
    legacy: Arc<dyn LegacyRemap>,
}

impl ChunkRasterizer {
    pub fn new(catalog: Arc<TextureCatalog>, legacy: Arc<dyn LegacyRemap>) -> Self {
        Self { catalog, legacy }
    }

    /// Catalog textures are looked up in.
    pub fn catalog(&self) -> &Arc<TextureCatalog> {
        &self.catalog
    }

    /// Render `grid` into a tile.
    ///
    /// # Errors
    ///
    /// - [`RasterError::BlockRead`] if any cell cannot be read
    /// - [`RasterError::Texture`] if a block with a registered texture file
    ///   fails to load it
    pub fn rasterize(&self, grid: &dyn BlockGrid) -> Result<Tile, RasterError> {
        self.rasterize_with_stats(grid).map(|(tile, _)| tile)
    }

    /// Render `grid` into a tile and report what was drawn.
    pub fn rasterize_with_stats(
        &self,
        grid: &dyn BlockGrid,
    ) -> Result<(Tile, RasterStats), RasterError> {
        let mut tile = Tile::new();
        let mut palette: HashMap<BlockId, Texture> = HashMap::new();
        let mut ignored: HashSet<BlockId> = HashSet::new();
        let mut drawn = 0;

        // Bottom to top: a higher drawable block always overwrites a lower one.
        for level in 0..grid.height() {
            for z in 0..CHUNK_WIDTH {
                for x in 0..CHUNK_WIDTH {
                    let id = self.legacy.remap(&grid.block_at(x, level, z)?);
                    if id.is_void() || ignored.contains(&id) {
                        continue;
                    }

                    let texture = match palette.get(&id) {
                        Some(texture) => Arc::clone(texture),
                        None => {
                            if !self.catalog.has_texture(&id) {
                                debug!(block = %id, "No texture, ignoring block");
                                ignored.insert(id);
                                continue;
                            }
                            let texture = self.catalog.get_texture(&id).map_err(|source| {
                                RasterError::Texture {
                                    id: id.clone(),
                                    source,
                                }
                            })?;
                            palette.insert(id, Arc::clone(&texture));
                            texture
                        }
                    };

                    tile.paint(x as u32, z as u32, &texture);
                    drawn += 1;
                }
            }
        }

        let stats = RasterStats {
            drawn,
            palette_size: palette.len(),
            ignored: ignored.len(),
        };
        Ok((tile, stats))
    }
}
