//! worldmosaic - top-down mosaic rendering for voxel world saves
//!
//! This library renders a rectangular region of a world save into a single
//! image: every 16×16 chunk becomes a 16×16 pixel tile colored by the highest
//! visible block in each column, and tiles are composited into one canvas.
//!
//! # Architecture
//!
//! ```text
//! MosaicAssembler ──► ChunkGenerator ──► WorldStore (external)
//!   (rayon pool)          │
//!                         ▼
//!                  ChunkRasterizer ──► TextureCatalog ──► ImageCodec
//! ```

pub mod app;
pub mod block;
pub mod codec;
pub mod config;
pub mod coord;
pub mod logging;
pub mod orchestrator;
pub mod raster;
pub mod texture;
pub mod tile;
pub mod world;

/// Library version, used in banners and the generated config file.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
