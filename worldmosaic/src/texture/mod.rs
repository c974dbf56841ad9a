//! Block textures.
//!
//! A [`TextureCatalog`] answers two questions for the rasterizer: does a
//! block have a texture, and what does it look like. Identifiers resolve
//! through the path table first, then through registered aliases.
//!
//! ```text
//! blocks.json ──► parse_manifest ──► path table ─┐
//! [textures] overrides ───────────► path table ─┤
//! [aliases] ──────────────────────► alias list ─┤
//!                                                ▼
//!                                        TextureCatalog
//!                                                │ get_texture (decode once)
//!                                                ▼
//!                                        Arc<RgbaImage>
//! ```

mod catalog;
mod error;
mod manifest;

pub use catalog::{Texture, TextureCatalog};
pub use error::TextureError;
pub use manifest::{
    parse_manifest, strip_comment_lines, Manifest, ManifestEntry, ManifestSummary, ResourcePack,
    TextureField, DEFAULT_FACE, MANIFEST_FILE,
};
