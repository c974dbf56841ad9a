//! The `BlockId` identifier type.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// Namespace prepended to bare block names.
pub const DEFAULT_NAMESPACE: &str = "minecraft";

/// Identifiers that never produce a pixel: empty space and invisible boundaries.
const VOID_BLOCKS: &[&str] = &[
    "minecraft:air",
    "minecraft:cave_air",
    "minecraft:void_air",
    "minecraft:barrier",
];

/// Opaque, immutable block type identifier.
///
/// Cloning is cheap (reference counted), so identifiers can be handed out
/// per cell while rasterizing without allocating.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(Arc<str>);

impl BlockId {
    /// Create an identifier from any string.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    /// Create an identifier, prefixing `minecraft:` when the name has no namespace.
    ///
    /// ```
    /// use worldmosaic::block::BlockId;
    ///
    /// assert_eq!(BlockId::namespaced("stone").as_str(), "minecraft:stone");
    /// assert_eq!(BlockId::namespaced("mod:ore").as_str(), "mod:ore");
    /// ```
    pub fn namespaced(name: &str) -> Self {
        if name.contains(':') {
            Self::new(name)
        } else {
            Self::new(format!("{}:{}", DEFAULT_NAMESPACE, name))
        }
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for empty space and invisible boundary blocks.
    pub fn is_void(&self) -> bool {
        VOID_BLOCKS.contains(&self.as_str())
    }
}

impl fmt::Debug for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlockId({})", self.0)
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BlockId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for BlockId {
    fn from(name: String) -> Self {
        Self(Arc::from(name))
    }
}

impl Borrow<str> for BlockId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for BlockId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_void_blocks() {
        assert!(BlockId::from("minecraft:air").is_void());
        assert!(BlockId::from("minecraft:cave_air").is_void());
        assert!(BlockId::from("minecraft:barrier").is_void());
        assert!(!BlockId::from("minecraft:stone").is_void());
        assert!(!BlockId::from("air").is_void());
    }

    #[test]
    fn test_namespaced() {
        assert_eq!(BlockId::namespaced("dirt"), BlockId::from("minecraft:dirt"));
        assert_eq!(BlockId::namespaced("minecraft:dirt").as_str(), "minecraft:dirt");
    }

    #[test]
    fn test_lookup_by_str() {
        let mut map = HashMap::new();
        map.insert(BlockId::from("minecraft:sand"), 1);
        assert_eq!(map.get("minecraft:sand"), Some(&1));
    }

    #[test]
    fn test_display_and_debug() {
        let id = BlockId::from("minecraft:gravel");
        assert_eq!(id.to_string(), "minecraft:gravel");
        assert_eq!(format!("{:?}", id), "BlockId(minecraft:gravel)");
    }
}
