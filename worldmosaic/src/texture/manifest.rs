//! Resource-pack manifest parsing.
//!
//! A resource pack ships a `blocks.json` manifest mapping block names to
//! texture names:
//!
//! ```text
//! {
//!   "format_version": [1, 1, 0],
//!   // comment lines are allowed by the game, not by JSON
//!   "stone": { "textures": "stone", "sound": "stone" },
//!   "grass": { "textures": { "up": "grass_carried", "down": "dirt", "side": "grass_side" } }
//! }
//! ```
//!
//! Comments are stripped from the raw text first, then the document is
//! decoded leniently: anything that is not a block entry with a usable
//! `textures` field is skipped, never an error.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;
use tracing::debug;

use crate::block::BlockId;

/// Manifest file name inside a resource pack.
pub const MANIFEST_FILE: &str = "blocks.json";

/// Face used when a block lists one texture per face.
pub const DEFAULT_FACE: &str = "up";

/// Location and layout of an unpacked resource pack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourcePack {
    root: PathBuf,
    texture_dir: String,
    extension: String,
    default_face: String,
}

impl ResourcePack {
    /// Describe a pack rooted at `root`, with textures in `colors/*.png`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            texture_dir: "colors".to_string(),
            extension: "png".to_string(),
            default_face: DEFAULT_FACE.to_string(),
        }
    }

    /// Set the texture directory, relative to the pack root.
    pub fn with_texture_dir(mut self, dir: impl Into<String>) -> Self {
        self.texture_dir = dir.into();
        self
    }

    /// Set the texture file extension (without the dot).
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Set the face used for per-face texture entries.
    pub fn with_default_face(mut self, face: impl Into<String>) -> Self {
        self.default_face = face.into();
        self
    }

    /// Pack root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Face used for per-face texture entries.
    pub fn default_face(&self) -> &str {
        &self.default_face
    }

    /// Path of the pack's manifest file.
    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(MANIFEST_FILE)
    }

    /// Path of the texture file for a texture name.
    pub fn texture_path(&self, texture: &str) -> PathBuf {
        self.root
            .join(&self.texture_dir)
            .join(format!("{}.{}", texture, self.extension))
    }

    /// Resolve a user-supplied path: relative paths are taken from the pack root.
    pub fn resolve_path(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

/// The `textures` field of a manifest entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TextureField {
    /// One texture for every face.
    Single(String),
    /// One texture per face name (`up`, `down`, `side`, ...).
    PerFace(BTreeMap<String, String>),
}

impl TextureField {
    /// Texture name to use for a top-down view.
    pub fn texture_name(&self, face: &str) -> Option<&str> {
        match self {
            TextureField::Single(name) => Some(name),
            TextureField::PerFace(faces) => faces.get(face).map(String::as_str),
        }
    }
}

#[derive(Debug, Deserialize)]
struct BlockEntry {
    textures: Option<TextureField>,
}

/// One block registered by a manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// Canonical identifier (`minecraft:<name>`).
    pub id: BlockId,
    /// Texture name, without directory or extension.
    pub texture: String,
}

/// Decoded manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    /// Block entries with a usable texture, in key order.
    pub entries: Vec<ManifestEntry>,
    /// Top-level keys that were not usable block entries.
    pub skipped: usize,
}

/// Counts reported after loading a resource pack.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ManifestSummary {
    /// Identifiers written to the path table.
    pub registered: usize,
    /// Manifest keys skipped as metadata or unusable entries.
    pub skipped: usize,
}

fn comment_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // String literals are matched too so that `//` inside them is skipped over.
    PATTERN.get_or_init(|| Regex::new(r#""(?:[^"\\]|\\.)*"|//[^\n]*"#).unwrap())
}

/// Remove `//` comments so the text can be parsed as JSON.
///
/// A comment runs from `//` to the end of the line, either on its own line
/// or after a value. `//` inside a string value (URLs) is kept.
pub fn strip_comment_lines(text: &str) -> Cow<'_, str> {
    if !text.contains("//") {
        return Cow::Borrowed(text);
    }
    comment_pattern().replace_all(text, |caps: &regex::Captures<'_>| {
        let matched = &caps[0];
        if matched.starts_with('"') {
            matched.to_string()
        } else {
            String::new()
        }
    })
}

/// Parse manifest text into block entries.
///
/// Fails only when the document (after comment stripping) is not a JSON
/// object. Individual entries that are not objects, have no `textures`
/// field, have a `textures` field of any other shape, or lack `face` in a
/// per-face map are skipped.
pub fn parse_manifest(text: &str, face: &str) -> Result<Manifest, serde_json::Error> {
    let stripped = strip_comment_lines(text);
    let document: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&stripped)?;

    let mut manifest = Manifest::default();
    for (name, value) in document {
        if !value.is_object() {
            // format_version and other metadata
            manifest.skipped += 1;
            continue;
        }

        let entry: BlockEntry = match serde_json::from_value(value) {
            Ok(entry) => entry,
            Err(e) => {
                debug!(block = %name, error = %e, "Skipping manifest entry with unknown texture shape");
                manifest.skipped += 1;
                continue;
            }
        };

        let Some(texture) = entry.textures.as_ref().and_then(|t| t.texture_name(face)) else {
            manifest.skipped += 1;
            continue;
        };

        manifest.entries.push(ManifestEntry {
            id: BlockId::namespaced(&name),
            texture: texture.to_string(),
        });
    }

    Ok(manifest)
}
