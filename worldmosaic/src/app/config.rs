//! Application configuration for MosaicApp.
//!
//! `AppConfig` gathers everything needed to bootstrap one render: where the
//! world and resource pack live, which region to draw, and the catalog
//! compatibility tables. It is usually built from a [`ConfigFile`] and then
//! adjusted with CLI overrides.

use std::path::{Path, PathBuf};

use crate::block::BlockId;
use crate::config::ConfigFile;
use crate::coord::ChunkCoord;
use crate::orchestrator::MosaicConfig;
use crate::texture::ResourcePack;

/// Application configuration for one render run.
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// World save directory.
    pub world: PathBuf,

    /// Resource pack to load textures from.
    pub resource_pack: ResourcePack,

    /// Output image path.
    pub output: PathBuf,

    /// Top-left chunk of the rendered region.
    pub origin: ChunkCoord,

    /// Chunks per side of the rendered region.
    pub scale: u32,

    /// Worker pool and failure policy.
    pub mosaic: MosaicConfig,

    /// Canonical identifier → aliases, in registration order.
    pub aliases: Vec<(BlockId, Vec<BlockId>)>,

    /// Manual texture paths, applied after the resource pack manifest.
    pub texture_overrides: Vec<(BlockId, PathBuf)>,

    /// Legacy identifier → canonical identifier, on top of the built-in list.
    pub legacy: Vec<(BlockId, BlockId)>,
}

impl AppConfig {
    /// Build from a configuration file.
    ///
    /// Bare block names get the `minecraft:` namespace. Relative texture
    /// override paths resolve against the resource pack root.
    pub fn from_config_file(file: &ConfigFile) -> Self {
        let resource_pack = ResourcePack::new(&file.resources.path)
            .with_texture_dir(file.resources.texture_dir.as_str())
            .with_default_face(file.resources.default_face.as_str());

        let aliases = file
            .aliases
            .iter()
            .map(|(canonical, list)| {
                (
                    BlockId::namespaced(canonical),
                    list.iter().map(|a| BlockId::namespaced(a)).collect(),
                )
            })
            .collect();

        let texture_overrides = file
            .textures
            .iter()
            .map(|(block, path)| (BlockId::namespaced(block), resource_pack.resolve_path(path)))
            .collect();

        let legacy = file
            .legacy
            .iter()
            .map(|(old, new)| (BlockId::namespaced(old), BlockId::namespaced(new)))
            .collect();

        Self {
            world: file.world.path.clone(),
            resource_pack,
            output: file.output.path.clone(),
            origin: ChunkCoord::new(file.render.min_x, file.render.min_z),
            scale: file.render.scale,
            mosaic: MosaicConfig {
                threads: file.render.threads,
                strict: file.render.strict,
            },
            aliases,
            texture_overrides,
            legacy,
        }
    }

    /// Default configuration for a world and resource pack.
    pub fn new(world: impl Into<PathBuf>, resources: impl AsRef<Path>) -> Self {
        let mut file = ConfigFile::default();
        file.world.path = world.into();
        file.resources.path = resources.as_ref().to_path_buf();
        Self::from_config_file(&file)
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    pub fn with_origin(mut self, origin: ChunkCoord) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_mosaic(mut self, mosaic: MosaicConfig) -> Self {
        self.mosaic = mosaic;
        self
    }
}
