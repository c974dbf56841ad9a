//! Anvil region file world store (`<world>/region/r.X.Z.mca`).
//!
//! Chunk presence is answered from the region header alone; chunk contents
//! are decoded with `fastanvil` and `fastnbt`. Two on-disk layouts are read:
//!
//! - 1.18+: `sections[].block_states.{palette,data}` at the chunk root
//! - 1.13 to 1.17: `Level.Sections[].{Palette,BlockStates}`, including the
//!   pre-1.16 packing where entries span two longs
//!
//! Only sections 0..15 (levels 0..255) are kept; absent sections read as air.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use fastnbt::{ByteArray, LongArray};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::block::BlockId;
use crate::coord::{ChunkCoord, CHUNK_WIDTH, WORLD_HEIGHT};

use super::types::{BlockGrid, GridError, StoreError, WorldStore};

/// Location table (4 KiB) plus timestamp table (4 KiB).
const REGION_HEADER_BYTES: u64 = 8192;

const SECTION_CELLS: usize = 4096;
const SECTION_COUNT: usize = WORLD_HEIGHT / 16;

#[derive(Serialize, Deserialize, Debug, Default)]
struct ChunkNbt {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    sections: Vec<SectionNbt>,
    #[serde(rename = "Level", skip_serializing_if = "Option::is_none")]
    level: Option<LevelNbt>,
}

#[derive(Serialize, Deserialize, Debug)]
struct SectionNbt {
    #[serde(rename = "Y")]
    y: i8,
    #[serde(skip_serializing_if = "Option::is_none")]
    block_states: Option<BlockStatesNbt>,
}

#[derive(Serialize, Deserialize, Debug)]
struct BlockStatesNbt {
    palette: Vec<PaletteEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<LongArray>,
}

#[derive(Serialize, Deserialize, Debug, Default)]
struct LevelNbt {
    #[serde(rename = "Sections", default)]
    sections: Vec<LegacySectionNbt>,
}

#[derive(Serialize, Deserialize, Debug)]
struct LegacySectionNbt {
    #[serde(rename = "Y")]
    y: i8,
    #[serde(rename = "Palette", skip_serializing_if = "Option::is_none")]
    palette: Option<Vec<PaletteEntry>>,
    #[serde(rename = "BlockStates", skip_serializing_if = "Option::is_none")]
    block_states: Option<LongArray>,
    /// Pre-1.13 numeric block ids.
    #[serde(rename = "Blocks", skip_serializing_if = "Option::is_none")]
    blocks: Option<ByteArray>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
struct PaletteEntry {
    #[serde(rename = "Name")]
    name: String,
}

/// World store reading Java-edition Anvil region files.
#[derive(Debug, Clone)]
pub struct AnvilStore {
    world_dir: PathBuf,
    region_dir: PathBuf,
}

impl AnvilStore {
    /// Open the world save at `world_dir`.
    ///
    /// Fails with [`StoreError::NotAWorld`] when `world_dir/region` is not a directory.
    pub fn open(world_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let world_dir = world_dir.into();
        let region_dir = world_dir.join("region");
        if !region_dir.is_dir() {
            return Err(StoreError::NotAWorld(world_dir));
        }
        debug!(path = %world_dir.display(), "Opened Anvil world");
        Ok(Self {
            world_dir,
            region_dir,
        })
    }

    /// Root directory of the world save.
    pub fn world_dir(&self) -> &Path {
        &self.world_dir
    }

    fn region_path(&self, coord: ChunkCoord) -> PathBuf {
        let (rx, rz) = coord.region();
        self.region_dir.join(format!("r.{}.{}.mca", rx, rz))
    }
}

impl WorldStore for AnvilStore {
    fn has_chunk(&self, coord: ChunkCoord) -> Result<bool, StoreError> {
        let path = self.region_path(coord);
        let mut file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        let io_err = |source| StoreError::Io {
            path: path.clone(),
            source,
        };

        // Empty region files are left behind by the game; they hold no chunks.
        let len = file.metadata().map_err(io_err)?.len();
        if len < REGION_HEADER_BYTES {
            return Ok(false);
        }

        let (lx, lz) = coord.region_local();
        let entry_offset = 4 * (lx + lz * 32) as u64;
        let mut entry = [0u8; 4];
        file.seek(SeekFrom::Start(entry_offset)).map_err(io_err)?;
        file.read_exact(&mut entry).map_err(io_err)?;

        Ok(entry != [0; 4])
    }

    fn read_chunk(&self, coord: ChunkCoord) -> Result<Box<dyn BlockGrid>, StoreError> {
        let path = self.region_path(coord);
        let file = File::open(&path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => StoreError::ChunkMissing(coord),
            _ => StoreError::Io {
                path: path.clone(),
                source,
            },
        })?;

        let mut region = fastanvil::Region::from_stream(file).map_err(|e| StoreError::Region {
            path: path.clone(),
            reason: e.to_string(),
        })?;

        let (lx, lz) = coord.region_local();
        let bytes = region
            .read_chunk(lx, lz)
            .map_err(|e| StoreError::Region {
                path: path.clone(),
                reason: e.to_string(),
            })?
            .ok_or(StoreError::ChunkMissing(coord))?;

        let nbt: ChunkNbt =
            fastnbt::from_bytes(&bytes).map_err(|e| StoreError::ChunkDecode {
                coord,
                reason: e.to_string(),
            })?;

        let chunk = PalettedChunk::from_nbt(nbt).map_err(|reason| StoreError::ChunkDecode {
            coord,
            reason,
        })?;
        Ok(Box::new(chunk))
    }
}

/// One decoded 16×16×16 section.
#[derive(Debug)]
struct Section {
    palette: Vec<BlockId>,
    /// `None` when the section holds a single block type.
    indices: Option<Box<[u16]>>,
}

impl Section {
    fn decode(palette: &[PaletteEntry], data: Option<&[i64]>) -> Result<Option<Self>, String> {
        if palette.is_empty() {
            return Ok(None);
        }
        let palette: Vec<BlockId> = palette.iter().map(|p| BlockId::new(&p.name)).collect();
        let indices = match data {
            Some(data) if palette.len() > 1 => Some(unpack_indices(data, palette.len())?),
            _ => None,
        };
        Ok(Some(Self { palette, indices }))
    }

    fn block_at(&self, idx: usize) -> Result<BlockId, GridError> {
        let palette_idx = match &self.indices {
            Some(indices) => indices[idx] as usize,
            None => 0,
        };
        self.palette
            .get(palette_idx)
            .cloned()
            .ok_or(GridError::PaletteIndex {
                index: palette_idx,
                len: self.palette.len(),
            })
    }
}

/// Chunk decoded from Anvil NBT.
#[derive(Debug)]
struct PalettedChunk {
    sections: Vec<Option<Section>>,
    air: BlockId,
}

impl PalettedChunk {
    fn from_nbt(nbt: ChunkNbt) -> Result<Self, String> {
        let mut sections: Vec<Option<Section>> = (0..SECTION_COUNT).map(|_| None).collect();

        for section in &nbt.sections {
            let Some(slot) = section_slot(section.y) else {
                continue;
            };
            if let Some(states) = &section.block_states {
                sections[slot] = Section::decode(&states.palette, states.data.as_deref())?;
            }
        }

        if let Some(level) = &nbt.level {
            for section in &level.sections {
                let Some(slot) = section_slot(section.y) else {
                    continue;
                };
                match (&section.palette, &section.blocks) {
                    (Some(palette), _) => {
                        sections[slot] =
                            Section::decode(palette, section.block_states.as_deref())?;
                    }
                    (None, Some(_)) => {
                        return Err("pre-1.13 numeric block format is not supported".to_string());
                    }
                    (None, None) => {}
                }
            }
        }

        Ok(Self {
            sections,
            air: BlockId::from("minecraft:air"),
        })
    }
}

fn section_slot(y: i8) -> Option<usize> {
    usize::try_from(y).ok().filter(|&slot| slot < SECTION_COUNT)
}

impl BlockGrid for PalettedChunk {
    fn block_at(&self, x: usize, level: usize, z: usize) -> Result<BlockId, GridError> {
        if x >= CHUNK_WIDTH || z >= CHUNK_WIDTH || level >= WORLD_HEIGHT {
            return Err(GridError::OutOfBounds { x, level, z });
        }
        match &self.sections[level >> 4] {
            Some(section) => section.block_at(((level & 15) * 16 + z) * 16 + x),
            None => Ok(self.air.clone()),
        }
    }
}

/// Bits per palette entry (minimum 4).
fn bits_per_entry(palette_len: usize) -> usize {
    let raw = if palette_len <= 1 {
        0
    } else {
        (usize::BITS - (palette_len - 1).leading_zeros()) as usize
    };
    raw.max(4)
}

/// Unpack 4096 palette indices, detecting the packing from the array length.
fn unpack_indices(data: &[i64], palette_len: usize) -> Result<Box<[u16]>, String> {
    let bits = bits_per_entry(palette_len);
    let mask = (1u64 << bits) - 1;
    let per_long = 64 / bits;
    let padded_len = SECTION_CELLS.div_ceil(per_long);
    let spanning_len = SECTION_CELLS * bits / 64;

    let mut indices = vec![0u16; SECTION_CELLS];
    if data.len() == padded_len {
        for (i, idx) in indices.iter_mut().enumerate() {
            let long = data[i / per_long] as u64;
            *idx = ((long >> ((i % per_long) * bits)) & mask) as u16;
        }
    } else if data.len() == spanning_len {
        for (i, idx) in indices.iter_mut().enumerate() {
            let bit = i * bits;
            let (word, offset) = (bit / 64, bit % 64);
            let mut value = (data[word] as u64) >> offset;
            if offset + bits > 64 {
                value |= (data[word + 1] as u64) << (64 - offset);
            }
            *idx = (value & mask) as u16;
        }
    } else {
        return Err(format!(
            "block state array has {} longs, expected {} or {} for {} bits",
            data.len(),
            padded_len,
            spanning_len,
            bits
        ));
    }
    Ok(indices.into_boxed_slice())
}
