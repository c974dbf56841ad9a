//! Application bootstrap.
//!
//! [`MosaicApp`] turns an [`AppConfig`] into a ready-to-run render pipeline
//! and performs the run: assemble, encode, write.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                        MosaicApp                          │
//! │                                                           │
//! │  1. AnvilStore::open ───────────► Arc<dyn WorldStore>     │
//! │  2. TextureCatalog                                        │
//! │     ├── load_resource_pack (blocks.json)                  │
//! │     ├── add_alias          ([aliases])                    │
//! │     └── load_path_table    ([textures] overrides)         │
//! │  3. ChunkRasterizer ◄── LegacyTable (builtin + [legacy])  │
//! │  4. DefaultChunkGenerator ──► MosaicAssembler             │
//! │  5. run: assemble → PngCodec::encode → output file        │
//! └──────────────────────────────────────────────────────────┘
//! ```

mod bootstrap;
mod config;
mod error;

pub use bootstrap::{MosaicApp, RenderSummary};
pub use config::AppConfig;
pub use error::AppError;
