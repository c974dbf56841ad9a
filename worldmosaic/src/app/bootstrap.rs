//! Application bootstrap implementation.
//!
//! `MosaicApp` wires the components in dependency order: world store first,
//! then the texture catalog and its tables, then the rasterizer, generator and
//! assembler. Every failure during that sequence is a setup error and happens
//! before any chunk is rendered.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info};

use super::config::AppConfig;
use super::error::AppError;
use crate::block::LegacyTable;
use crate::codec::{ImageCodec, PngCodec};
use crate::coord::ChunkCoord;
use crate::orchestrator::{MosaicAssembler, MosaicStats, ProgressObserver};
use crate::raster::ChunkRasterizer;
use crate::texture::TextureCatalog;
use crate::tile::DefaultChunkGenerator;
use crate::world::{AnvilStore, WorldStore};

/// Outcome of a successful render run.
#[derive(Debug, Clone)]
pub struct RenderSummary {
    /// Where the image was written.
    pub output: PathBuf,
    /// Encoded image size in bytes.
    pub bytes_written: usize,
    /// Canvas side in pixels.
    pub canvas_size: u32,
    pub stats: MosaicStats,
    /// Chunks that failed and were left blank, with the reason.
    pub skipped: Vec<(ChunkCoord, String)>,
}

/// A fully wired render pipeline.
///
/// # Example
///
/// ```ignore
/// use worldmosaic::app::{AppConfig, MosaicApp};
/// use worldmosaic::orchestrator::NoProgress;
///
/// let config = AppConfig::new("./world", "./resources/vanilla").with_scale(8);
/// let app = MosaicApp::prepare(config)?;
/// let summary = app.run(&NoProgress)?;
/// println!("{} chunks rendered", summary.stats.rendered);
/// ```
pub struct MosaicApp {
    config: AppConfig,
    catalog: Arc<TextureCatalog>,
    assembler: MosaicAssembler,
    codec: Arc<dyn ImageCodec>,
}

impl MosaicApp {
    /// Open the configured world save and wire the pipeline.
    pub fn prepare(config: AppConfig) -> Result<Self, AppError> {
        let store = AnvilStore::open(&config.world).map_err(AppError::StoreOpen)?;
        info!(world = %config.world.display(), "Opened world save");
        Self::with_store(config, Arc::new(store))
    }

    /// Wire the pipeline around an already opened world store.
    pub fn with_store(config: AppConfig, store: Arc<dyn WorldStore>) -> Result<Self, AppError> {
        let codec: Arc<dyn ImageCodec> = Arc::new(PngCodec);
        let catalog = Arc::new(TextureCatalog::new(Arc::clone(&codec)));

        catalog
            .load_resource_pack(&config.resource_pack)
            .map_err(AppError::ResourcePack)?;

        for (canonical, aliases) in &config.aliases {
            catalog.add_alias(canonical.clone(), aliases.iter().cloned());
        }

        let overrides = catalog.load_path_table(config.texture_overrides.iter().cloned());
        debug!(overrides, "Applied texture overrides");

        let mut legacy = LegacyTable::builtin();
        legacy.extend(config.legacy.iter().cloned());

        info!(
            textures = catalog.path_count(),
            aliases = config.aliases.len(),
            legacy = legacy.len(),
            "Texture catalog ready"
        );

        let rasterizer = ChunkRasterizer::new(Arc::clone(&catalog), Arc::new(legacy));
        let generator = DefaultChunkGenerator::new(store, rasterizer);
        let assembler = MosaicAssembler::new(Arc::new(generator), config.mosaic);

        Ok(Self {
            config,
            catalog,
            assembler,
            codec,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Arc<TextureCatalog> {
        &self.catalog
    }

    /// Render the configured region and write the encoded image.
    pub fn run(&self, progress: &dyn ProgressObserver) -> Result<RenderSummary, AppError> {
        let mosaic = self
            .assembler
            .assemble_with_progress(self.config.origin, self.config.scale, progress)
            .map_err(AppError::Mosaic)?;

        let bytes = mosaic
            .encode(self.codec.as_ref())
            .map_err(AppError::Encode)?;

        let output = &self.config.output;
        let output_error = |source| AppError::Output {
            path: output.clone(),
            source,
        };
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(output_error)?;
        }
        fs::write(output, &bytes).map_err(output_error)?;

        info!(
            output = %output.display(),
            bytes = bytes.len(),
            decoded_textures = self.catalog.cached_count(),
            "Wrote mosaic"
        );

        Ok(RenderSummary {
            output: output.clone(),
            bytes_written: bytes.len(),
            canvas_size: mosaic.canvas.width(),
            stats: mosaic.stats,
            skipped: mosaic
                .failures
                .iter()
                .map(|f| (f.coord, f.error.to_string()))
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::NoProgress;
    use crate::world::{DenseChunk, MemoryWorld};
    use image::{Rgba, RgbaImage};
    use std::path::Path;

    fn write_pack(root: &Path) {
        fs::create_dir_all(root.join("colors")).unwrap();
        fs::write(
            root.join("blocks.json"),
            r#"{ "stone": { "textures": "stone" } }"#,
        )
        .unwrap();
        RgbaImage::from_pixel(1, 1, Rgba([100, 100, 100, 255]))
            .save(root.join("colors/stone.png"))
            .unwrap();
        RgbaImage::from_pixel(1, 1, Rgba([40, 60, 220, 255]))
            .save(root.join("colors/water_placeholder.png"))
            .unwrap();
    }

    #[test]
    fn test_prepare_missing_world() {
        let dir = tempfile::tempdir().unwrap();
        write_pack(dir.path());
        let config = AppConfig::new(dir.path().join("no-world"), dir.path());

        let err = MosaicApp::prepare(config).err().unwrap();
        assert!(matches!(err, AppError::StoreOpen(_)));
        assert!(err.is_setup());
    }

    #[test]
    fn test_missing_resource_pack() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::new("./world", dir.path().join("no-pack"));

        let err = MosaicApp::with_store(config, Arc::new(MemoryWorld::new()))
            .err()
            .unwrap();
        assert!(matches!(err, AppError::ResourcePack(_)));
    }

    #[test]
    fn test_overrides_applied() {
        let dir = tempfile::tempdir().unwrap();
        write_pack(dir.path());
        let config = AppConfig::new("./world", dir.path());

        let app = MosaicApp::with_store(config, Arc::new(MemoryWorld::new())).unwrap();
        assert_eq!(
            app.catalog().path_for(&"minecraft:water".into()),
            Some(dir.path().join("colors/water_placeholder.png"))
        );
        assert!(app.catalog().has_texture(&"minecraft:water".into()));
        // cave_air is an alias of air by default; air has no texture.
        assert!(!app.catalog().has_texture(&"minecraft:cave_air".into()));
    }

    #[test]
    fn test_run_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        write_pack(dir.path());

        let mut chunk = DenseChunk::new();
        chunk.fill_level(0, "minecraft:stone");
        chunk.set_block(3, 1, 4, "minecraft:water");
        let mut world = MemoryWorld::new();
        world.insert(ChunkCoord::new(0, 0), chunk);

        let output = dir.path().join("out").join("mosaic.png");
        let config = AppConfig::new("./world", dir.path())
            .with_scale(2)
            .with_output(&output);

        let app = MosaicApp::with_store(config, Arc::new(world)).unwrap();
        let summary = app.run(&NoProgress).unwrap();

        assert_eq!(summary.stats.rendered, 1);
        assert_eq!(summary.stats.absent, 3);
        assert_eq!(summary.canvas_size, 32);
        assert!(summary.skipped.is_empty());

        let image = image::open(&output).unwrap().to_rgba8();
        assert_eq!(image.dimensions(), (32, 32));
        assert_eq!(image.get_pixel(0, 0), &Rgba([100, 100, 100, 255]));
        assert_eq!(image.get_pixel(3, 4), &Rgba([40, 60, 220, 255]));
        assert_eq!(image.get_pixel(20, 20), &Rgba([0, 0, 0, 0]));
    }
}
