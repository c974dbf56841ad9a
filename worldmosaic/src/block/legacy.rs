//! Legacy block name compatibility.

use std::collections::HashMap;

use super::BlockId;

/// Maps an identifier to its current spelling.
///
/// Implementations must return the input unchanged when no mapping exists.
pub trait LegacyRemap: Send + Sync {
    /// Returns the canonical identifier for `id`.
    fn remap(&self, id: &BlockId) -> BlockId;
}

/// Pre-flattening names with an unambiguous modern equivalent.
const BUILTIN_RENAMES: &[(&str, &str)] = &[
    ("minecraft:stonebrick", "minecraft:stone_bricks"),
    ("minecraft:planks", "minecraft:oak_planks"),
    ("minecraft:log", "minecraft:oak_log"),
    ("minecraft:log2", "minecraft:acacia_log"),
    ("minecraft:leaves", "minecraft:oak_leaves"),
    ("minecraft:leaves2", "minecraft:acacia_leaves"),
    ("minecraft:snow_layer", "minecraft:snow"),
    ("minecraft:red_flower", "minecraft:poppy"),
    ("minecraft:yellow_flower", "minecraft:dandelion"),
    ("minecraft:lit_pumpkin", "minecraft:jack_o_lantern"),
    ("minecraft:web", "minecraft:cobweb"),
    ("minecraft:wool", "minecraft:white_wool"),
    ("minecraft:hardened_clay", "minecraft:terracotta"),
    ("minecraft:stained_hardened_clay", "minecraft:white_terracotta"),
    ("minecraft:brick_block", "minecraft:bricks"),
    ("minecraft:quartz_ore", "minecraft:nether_quartz_ore"),
    ("minecraft:flowing_water", "minecraft:water"),
    ("minecraft:flowing_lava", "minecraft:lava"),
    ("minecraft:noteblock", "minecraft:note_block"),
    ("minecraft:magma", "minecraft:magma_block"),
    ("minecraft:melon_block", "minecraft:melon"),
    ("minecraft:waterlily", "minecraft:lily_pad"),
    ("minecraft:reeds", "minecraft:sugar_cane"),
    ("minecraft:deadbush", "minecraft:dead_bush"),
    ("minecraft:golden_rail", "minecraft:powered_rail"),
    ("minecraft:nether_brick", "minecraft:nether_bricks"),
    ("minecraft:red_nether_brick", "minecraft:red_nether_bricks"),
    ("minecraft:end_bricks", "minecraft:end_stone_bricks"),
    ("minecraft:slime", "minecraft:slime_block"),
];

/// Table-driven [`LegacyRemap`] implementation.
#[derive(Debug, Clone, Default)]
pub struct LegacyTable {
    renames: HashMap<BlockId, BlockId>,
}

impl LegacyTable {
    /// Create an empty table (every identifier maps to itself).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table preloaded with the built-in rename list.
    pub fn builtin() -> Self {
        let mut table = Self::new();
        table.extend(
            BUILTIN_RENAMES
                .iter()
                .map(|(from, to)| (BlockId::from(*from), BlockId::from(*to))),
        );
        table
    }

    /// Add or replace a single mapping.
    pub fn insert(&mut self, legacy: BlockId, canonical: BlockId) {
        self.renames.insert(legacy, canonical);
    }

    /// Number of mappings.
    pub fn len(&self) -> usize {
        self.renames.len()
    }

    /// Returns true if the table has no mappings.
    pub fn is_empty(&self) -> bool {
        self.renames.is_empty()
    }
}

impl Extend<(BlockId, BlockId)> for LegacyTable {
    fn extend<T: IntoIterator<Item = (BlockId, BlockId)>>(&mut self, iter: T) {
        self.renames.extend(iter);
    }
}

impl LegacyRemap for LegacyTable {
    fn remap(&self, id: &BlockId) -> BlockId {
        self.renames.get(id).cloned().unwrap_or_else(|| id.clone())
    }
}
