//! Coordinate value types.

use std::fmt;

/// Width of a chunk in blocks along both horizontal axes.
pub const CHUNK_WIDTH: usize = 16;

/// Number of vertical levels scanned per chunk (levels `0..WORLD_HEIGHT`).
pub const WORLD_HEIGHT: usize = 256;

/// Side length of a rendered tile in pixels (one pixel per block column).
pub const TILE_SIZE: u32 = CHUNK_WIDTH as u32;

/// Absolute position of a chunk in the world's horizontal chunk grid.
///
/// # Example
///
/// ```
/// use worldmosaic::coord::{ChunkCoord, LocalOffset};
///
/// let origin = ChunkCoord::new(-2, 5);
/// let coord = origin.offset(LocalOffset::new(3, 1)).unwrap();
/// assert_eq!(coord, ChunkCoord::new(1, 6));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkCoord {
    /// Chunk X (east/west)
    pub x: i32,
    /// Chunk Z (north/south)
    pub z: i32,
}

impl ChunkCoord {
    /// Create a new chunk coordinate.
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Returns the coordinate displaced by a local offset, or `None` on overflow.
    pub fn offset(&self, offset: LocalOffset) -> Option<Self> {
        let dx = i32::try_from(offset.i).ok()?;
        let dz = i32::try_from(offset.j).ok()?;
        Some(Self {
            x: self.x.checked_add(dx)?,
            z: self.z.checked_add(dz)?,
        })
    }

    /// Region file coordinates containing this chunk (32×32 chunks per region).
    pub fn region(&self) -> (i32, i32) {
        (self.x.div_euclid(32), self.z.div_euclid(32))
    }

    /// Position of this chunk inside its region (0-31 on each axis).
    pub fn region_local(&self) -> (usize, usize) {
        (self.x.rem_euclid(32) as usize, self.z.rem_euclid(32) as usize)
    }
}

impl fmt::Display for ChunkCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

/// Position of a chunk relative to the origin of a render region.
///
/// A tile for offset `(i, j)` lands at pixel `(i * 16, j * 16)` on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocalOffset {
    /// Offset along X
    pub i: u32,
    /// Offset along Z
    pub j: u32,
}

impl LocalOffset {
    /// Create a new local offset.
    pub fn new(i: u32, j: u32) -> Self {
        Self { i, j }
    }

    /// Top-left pixel of this offset's tile on the canvas.
    pub fn pixel_origin(&self) -> (u32, u32) {
        (self.i * TILE_SIZE, self.j * TILE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let coord = ChunkCoord::new(12, -7);
        assert_eq!(coord.x, 12);
        assert_eq!(coord.z, -7);
    }

    #[test]
    fn test_offset_overflow() {
        let coord = ChunkCoord::new(i32::MAX, 0);
        assert!(coord.offset(LocalOffset::new(1, 0)).is_none());
        assert!(coord.offset(LocalOffset::new(0, 1)).is_some());
    }

    #[test]
    fn test_offset_too_large_for_i32() {
        let coord = ChunkCoord::new(0, 0);
        assert!(coord.offset(LocalOffset::new(u32::MAX, 0)).is_none());
    }

    #[test]
    fn test_region_positive() {
        let coord = ChunkCoord::new(33, 64);
        assert_eq!(coord.region(), (1, 2));
        assert_eq!(coord.region_local(), (1, 0));
    }

    #[test]
    fn test_region_negative() {
        let coord = ChunkCoord::new(-1, -33);
        assert_eq!(coord.region(), (-1, -2));
        assert_eq!(coord.region_local(), (31, 31));
    }

    #[test]
    fn test_pixel_origin() {
        assert_eq!(LocalOffset::new(0, 0).pixel_origin(), (0, 0));
        assert_eq!(LocalOffset::new(2, 3).pixel_origin(), (32, 48));
    }

    #[test]
    fn test_display() {
        assert_eq!(ChunkCoord::new(3, -4).to_string(), "(3, -4)");
    }

    #[test]
    fn test_hash() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(ChunkCoord::new(1, 2));
        set.insert(ChunkCoord::new(1, 2));
        set.insert(ChunkCoord::new(2, 1));

        assert_eq!(set.len(), 2);
    }
}
