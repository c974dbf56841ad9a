//! Block texture catalog with aliasing and a lazily filled decode cache.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use image::RgbaImage;
use parking_lot::RwLock;
use tracing::{debug, info};

use crate::block::BlockId;
use crate::codec::{ImageCodec, PngCodec};

use super::error::TextureError;
use super::manifest::{parse_manifest, ManifestSummary, ResourcePack};

/// A decoded texture, shared between the cache and every palette using it.
pub type Texture = Arc<RgbaImage>;

#[derive(Debug, Default)]
struct Tables {
    /// Canonical identifier → texture file.
    paths: HashMap<BlockId, PathBuf>,
    /// Canonical identifier → aliases, in registration order.
    aliases: Vec<(BlockId, Vec<BlockId>)>,
}

/// Maps block identifiers to decoded textures.
///
/// The catalog owns three tables:
///
/// - a path table (canonical identifier → texture file)
/// - an alias list (canonical identifier → alternate identifiers)
/// - a decode cache (canonical identifier → decoded image)
///
/// Tables are filled during setup. While rendering, the only mutation is
/// insertion into the decode cache. Decoding happens outside any lock; the
/// write lock is held only to insert. Two threads missing the same key may
/// both decode, but the first insertion wins and every caller receives that
/// cached image, so the mapping never changes once populated.
pub struct TextureCatalog {
    tables: RwLock<Tables>,
    textures: RwLock<HashMap<BlockId, Texture>>,
    codec: Arc<dyn ImageCodec>,
    decodes: AtomicUsize,
    lookups: AtomicUsize,
}

impl TextureCatalog {
    /// Create an empty catalog decoding through `codec`.
    pub fn new(codec: Arc<dyn ImageCodec>) -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            textures: RwLock::new(HashMap::new()),
            codec,
            decodes: AtomicUsize::new(0),
            lookups: AtomicUsize::new(0),
        }
    }

    /// Resolve an identifier to its canonical identifier.
    ///
    /// An identifier with its own path entry is canonical. Otherwise the
    /// alias lists are scanned in registration order and the first canonical
    /// listing `id` wins.
    pub fn resolve(&self, id: &BlockId) -> Option<BlockId> {
        let tables = self.tables.read();
        if tables.paths.contains_key(id) {
            return Some(id.clone());
        }
        tables
            .aliases
            .iter()
            .find(|(_, aliases)| aliases.contains(id))
            .map(|(canonical, _)| canonical.clone())
    }

    fn resolve_path(&self, id: &BlockId) -> Option<(BlockId, PathBuf)> {
        let canonical = self.resolve(id)?;
        let path = self.tables.read().paths.get(&canonical)?.clone();
        Some((canonical, path))
    }

    /// Whether `id` resolves to a registered texture file that exists on disk.
    ///
    /// Never fails: any lookup problem is reported as `false`.
    pub fn has_texture(&self, id: &BlockId) -> bool {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        self.resolve_path(id)
            .map(|(_, path)| path.is_file())
            .unwrap_or(false)
    }

    /// Get the decoded texture for `id`, decoding and caching it on first use.
    ///
    /// # Errors
    ///
    /// - [`TextureError::NotFound`] if `id` resolves to no path entry
    /// - [`TextureError::MissingFile`] if the registered file does not exist
    /// - [`TextureError::Read`] if the file cannot be read
    /// - [`TextureError::Decode`] if the file is not a decodable image
    ///
    /// The first three all report [`TextureError::is_not_found`].
    pub fn get_texture(&self, id: &BlockId) -> Result<Texture, TextureError> {
        let canonical = self
            .resolve(id)
            .ok_or_else(|| TextureError::NotFound { id: id.clone() })?;

        if let Some(texture) = self.textures.read().get(&canonical) {
            return Ok(Arc::clone(texture));
        }

        let path = self
            .tables
            .read()
            .paths
            .get(&canonical)
            .cloned()
            .ok_or_else(|| TextureError::NotFound { id: id.clone() })?;

        if !path.is_file() {
            return Err(TextureError::MissingFile {
                id: canonical,
                path,
            });
        }

        let bytes = fs::read(&path).map_err(|source| TextureError::Read {
            path: path.clone(),
            source,
        })?;
        let image = self
            .codec
            .decode(&bytes)
            .map_err(|e| TextureError::Decode {
                path: path.clone(),
                reason: e.to_string(),
            })?;
        self.decodes.fetch_add(1, Ordering::Relaxed);

        debug!(
            block = %canonical,
            path = %path.display(),
            width = image.width(),
            height = image.height(),
            "Decoded texture"
        );

        let mut textures = self.textures.write();
        let texture = textures
            .entry(canonical)
            .or_insert_with(|| Arc::new(image));
        Ok(Arc::clone(texture))
    }

    /// Register `aliases` as alternate names for `canonical`.
    ///
    /// Appends to any aliases already registered; duplicates are harmless.
    pub fn add_alias<I, A>(&self, canonical: impl Into<BlockId>, aliases: I)
    where
        I: IntoIterator<Item = A>,
        A: Into<BlockId>,
    {
        let canonical = canonical.into();
        let aliases: Vec<BlockId> = aliases.into_iter().map(Into::into).collect();
        debug!(block = %canonical, count = aliases.len(), "Registering aliases");

        let mut tables = self.tables.write();
        match tables.aliases.iter_mut().find(|(c, _)| *c == canonical) {
            Some((_, existing)) => existing.extend(aliases),
            None => tables.aliases.push((canonical, aliases)),
        }
    }

    /// Insert or overwrite a single path entry.
    pub fn insert_path(&self, id: impl Into<BlockId>, path: impl Into<PathBuf>) {
        self.tables.write().paths.insert(id.into(), path.into());
    }

    /// Insert or overwrite many path entries. Returns the number of entries given.
    pub fn load_path_table<I>(&self, entries: I) -> usize
    where
        I: IntoIterator<Item = (BlockId, PathBuf)>,
    {
        let mut tables = self.tables.write();
        let mut count = 0;
        for (id, path) in entries {
            tables.paths.insert(id, path);
            count += 1;
        }
        count
    }

    /// Load a resource pack manifest into the path table.
    ///
    /// Entries overwrite existing paths, so loading the same pack twice
    /// leaves the path table unchanged.
    pub fn load_resource_pack(&self, pack: &ResourcePack) -> Result<ManifestSummary, TextureError> {
        let manifest_path = pack.manifest_path();
        let text = fs::read_to_string(&manifest_path).map_err(|source| TextureError::ManifestRead {
            path: manifest_path.clone(),
            source,
        })?;

        let manifest =
            parse_manifest(&text, pack.default_face()).map_err(|e| TextureError::ManifestParse {
                path: manifest_path.clone(),
                reason: e.to_string(),
            })?;

        let registered = self.load_path_table(
            manifest
                .entries
                .into_iter()
                .map(|entry| (entry.id, pack.texture_path(&entry.texture))),
        );

        info!(
            pack = %pack.root().display(),
            registered,
            skipped = manifest.skipped,
            "Loaded resource pack manifest"
        );

        Ok(ManifestSummary {
            registered,
            skipped: manifest.skipped,
        })
    }

    /// Path registered directly for `id` (no alias resolution).
    pub fn path_for(&self, id: &BlockId) -> Option<PathBuf> {
        self.tables.read().paths.get(id).cloned()
    }

    /// Number of path entries.
    pub fn path_count(&self) -> usize {
        self.tables.read().paths.len()
    }

    /// Number of decoded textures in the cache.
    pub fn cached_count(&self) -> usize {
        self.textures.read().len()
    }

    /// Number of decodes performed so far, including duplicate racing decodes.
    pub fn decode_count(&self) -> usize {
        self.decodes.load(Ordering::Relaxed)
    }

    /// Number of [`has_texture`](Self::has_texture) calls so far.
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::Relaxed)
    }
}

impl Default for TextureCatalog {
    fn default() -> Self {
        Self::new(Arc::new(PngCodec))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use std::path::Path;

    fn write_swatch(path: &Path, color: [u8; 4]) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        RgbaImage::from_pixel(1, 1, Rgba(color)).save(path).unwrap();
    }

    fn id(name: &str) -> BlockId {
        BlockId::from(name)
    }

    #[test]
    fn test_resolve_direct_and_alias() {
        let catalog = TextureCatalog::default();
        catalog.insert_path("minecraft:grass_block", "/x/grass.png");
        catalog.add_alias("minecraft:grass_block", ["minecraft:grass"]);

        assert_eq!(
            catalog.resolve(&id("minecraft:grass_block")),
            Some(id("minecraft:grass_block"))
        );
        assert_eq!(
            catalog.resolve(&id("minecraft:grass")),
            Some(id("minecraft:grass_block"))
        );
        assert_eq!(catalog.resolve(&id("minecraft:stone")), None);
    }

    #[test]
    fn test_resolve_first_alias_wins() {
        let catalog = TextureCatalog::default();
        catalog.add_alias("minecraft:a", ["minecraft:shared"]);
        catalog.add_alias("minecraft:b", ["minecraft:shared"]);
        assert_eq!(catalog.resolve(&id("minecraft:shared")), Some(id("minecraft:a")));
    }

    #[test]
    fn test_add_alias_appends() {
        let catalog = TextureCatalog::default();
        catalog.add_alias("minecraft:air", ["minecraft:cave_air"]);
        catalog.add_alias("minecraft:air", ["minecraft:void_air", "minecraft:cave_air"]);
        assert_eq!(catalog.resolve(&id("minecraft:cave_air")), Some(id("minecraft:air")));
        assert_eq!(catalog.resolve(&id("minecraft:void_air")), Some(id("minecraft:air")));
    }

    #[test]
    fn test_direct_path_beats_alias() {
        let catalog = TextureCatalog::default();
        catalog.add_alias("minecraft:grass_block", ["minecraft:grass"]);
        catalog.insert_path("minecraft:grass", "/x/tall_grass.png");
        assert_eq!(catalog.resolve(&id("minecraft:grass")), Some(id("minecraft:grass")));
    }

    #[test]
    fn test_has_texture() {
        let dir = tempfile::tempdir().unwrap();
        let stone = dir.path().join("stone.png");
        write_swatch(&stone, [128, 128, 128, 255]);

        let catalog = TextureCatalog::default();
        catalog.insert_path("minecraft:stone", &stone);
        catalog.insert_path("minecraft:ghost", dir.path().join("ghost.png"));

        assert!(catalog.has_texture(&id("minecraft:stone")));
        assert!(!catalog.has_texture(&id("minecraft:ghost")));
        assert!(!catalog.has_texture(&id("minecraft:unknown")));
    }

    #[test]
    fn test_get_texture_errors() {
        let dir = tempfile::tempdir().unwrap();
        let garbage = dir.path().join("garbage.png");
        fs::write(&garbage, b"definitely not a png").unwrap();

        let catalog = TextureCatalog::default();
        catalog.insert_path("minecraft:ghost", dir.path().join("ghost.png"));
        catalog.insert_path("minecraft:garbage", &garbage);

        assert!(matches!(
            catalog.get_texture(&id("minecraft:unknown")),
            Err(TextureError::NotFound { .. })
        ));
        let ghost = catalog.get_texture(&id("minecraft:ghost")).unwrap_err();
        assert!(matches!(ghost, TextureError::MissingFile { .. }));
        assert!(ghost.is_not_found());
        assert!(matches!(
            catalog.get_texture(&id("minecraft:garbage")),
            Err(TextureError::Decode { .. })
        ));
        assert_eq!(catalog.cached_count(), 0);
    }

    #[test]
    fn test_alias_equivalence() {
        let dir = tempfile::tempdir().unwrap();
        let grass = dir.path().join("grass.png");
        write_swatch(&grass, [0, 200, 0, 255]);

        let catalog = TextureCatalog::default();
        catalog.insert_path("minecraft:grass_block", &grass);
        catalog.add_alias("minecraft:grass_block", ["minecraft:grass"]);

        assert!(catalog.has_texture(&id("minecraft:grass_block")));
        assert!(catalog.has_texture(&id("minecraft:grass")));

        let canonical = catalog.get_texture(&id("minecraft:grass_block")).unwrap();
        let alias = catalog.get_texture(&id("minecraft:grass")).unwrap();
        assert!(Arc::ptr_eq(&canonical, &alias));
        assert_eq!(catalog.cached_count(), 1);
        assert_eq!(catalog.decode_count(), 1);
    }

    #[test]
    fn test_cache_is_stable() {
        let dir = tempfile::tempdir().unwrap();
        let sand = dir.path().join("sand.png");
        write_swatch(&sand, [220, 210, 160, 255]);

        let catalog = TextureCatalog::default();
        catalog.insert_path("minecraft:sand", &sand);

        let first = catalog.get_texture(&id("minecraft:sand")).unwrap();
        fs::remove_file(&sand).unwrap();
        let second = catalog.get_texture(&id("minecraft:sand")).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(catalog.decode_count(), 1);
        assert_eq!(first.get_pixel(0, 0), &Rgba([220, 210, 160, 255]));
    }

    #[test]
    fn test_missing_then_added_path() {
        let dir = tempfile::tempdir().unwrap();
        let clay = dir.path().join("clay.png");

        let catalog = TextureCatalog::default();
        catalog.insert_path("minecraft:clay", &clay);
        assert!(catalog.get_texture(&id("minecraft:clay")).is_err());

        write_swatch(&clay, [160, 166, 179, 255]);
        let first = catalog.get_texture(&id("minecraft:clay")).unwrap();
        let second = catalog.get_texture(&id("minecraft:clay")).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_concurrent_get_texture() {
        let dir = tempfile::tempdir().unwrap();
        let ore = dir.path().join("ore.png");
        write_swatch(&ore, [1, 2, 3, 255]);

        let catalog = TextureCatalog::default();
        catalog.insert_path("minecraft:ore", &ore);

        let results: Vec<Texture> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| s.spawn(|| catalog.get_texture(&id("minecraft:ore")).unwrap()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let cached = catalog.get_texture(&id("minecraft:ore")).unwrap();
        assert!(results.iter().all(|t| Arc::ptr_eq(t, &cached)));
        assert_eq!(catalog.cached_count(), 1);
        assert!((1..=8).contains(&catalog.decode_count()));
    }

    #[test]
    fn test_load_path_table_overwrites() {
        let catalog = TextureCatalog::default();
        catalog.insert_path("minecraft:water", "/old/water.png");
        let count = catalog.load_path_table(vec![
            (id("minecraft:water"), PathBuf::from("/new/water.png")),
            (id("minecraft:lava"), PathBuf::from("/new/lava.png")),
        ]);

        assert_eq!(count, 2);
        assert_eq!(catalog.path_count(), 2);
        assert_eq!(
            catalog.path_for(&id("minecraft:water")),
            Some(PathBuf::from("/new/water.png"))
        );
    }

    #[test]
    fn test_load_resource_pack() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("blocks.json"),
            r#"{
  "format_version": [1, 1, 0],
  // blocks
  "stone": { "textures": "stone" },
  "grass": { "textures": { "up": "grass_carried", "side": "grass_side" } },
  "air": {}
}"#,
        )
        .unwrap();

        let pack = ResourcePack::new(dir.path());
        let catalog = TextureCatalog::default();
        let summary = catalog.load_resource_pack(&pack).unwrap();

        assert_eq!(summary.registered, 2);
        assert_eq!(summary.skipped, 2);
        assert_eq!(
            catalog.path_for(&id("minecraft:grass")),
            Some(dir.path().join("colors").join("grass_carried.png"))
        );
        assert_eq!(
            catalog.path_for(&id("minecraft:stone")),
            Some(dir.path().join("colors").join("stone.png"))
        );
    }

    #[test]
    fn test_load_resource_pack_twice_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("blocks.json"),
            r#"{ "stone": { "textures": "stone" }, "dirt": { "textures": "dirt" } }"#,
        )
        .unwrap();

        let pack = ResourcePack::new(dir.path());
        let catalog = TextureCatalog::default();
        catalog.load_resource_pack(&pack).unwrap();
        let first: Vec<_> = ["minecraft:stone", "minecraft:dirt"]
            .iter()
            .map(|n| catalog.path_for(&id(n)))
            .collect();

        catalog.load_resource_pack(&pack).unwrap();
        let second: Vec<_> = ["minecraft:stone", "minecraft:dirt"]
            .iter()
            .map(|n| catalog.path_for(&id(n)))
            .collect();

        assert_eq!(catalog.path_count(), 2);
        assert_eq!(first, second);
    }

    #[test]
    fn test_load_resource_pack_missing_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = TextureCatalog::default();
        let result = catalog.load_resource_pack(&ResourcePack::new(dir.path()));
        assert!(matches!(result, Err(TextureError::ManifestRead { .. })));
    }

    #[test]
    fn test_load_resource_pack_invalid_manifest() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("blocks.json"), "[]").unwrap();
        let catalog = TextureCatalog::default();
        let result = catalog.load_resource_pack(&ResourcePack::new(dir.path()));
        assert!(matches!(result, Err(TextureError::ManifestParse { .. })));
    }

    #[test]
    fn test_catalog_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TextureCatalog>();
    }
}
