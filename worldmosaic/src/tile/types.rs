//! Rendered chunk tile.

use image::{Rgba, RgbaImage};

use crate::coord::TILE_SIZE;

/// Pixel value of every position nothing was drawn at.
pub const BACKGROUND: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// The 16×16 pixel image of one chunk.
///
/// Pixel `(x, y)` shows block column `(x, z = y)` of the chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    image: RgbaImage,
}

impl Tile {
    /// Create a tile filled with [`BACKGROUND`].
    pub fn new() -> Self {
        Self {
            image: RgbaImage::from_pixel(TILE_SIZE, TILE_SIZE, BACKGROUND),
        }
    }

    /// Create a tile filled with one color.
    pub fn filled(color: Rgba<u8>) -> Self {
        Self {
            image: RgbaImage::from_pixel(TILE_SIZE, TILE_SIZE, color),
        }
    }

    /// Overwrite the pixel of column `(x, z)` with the texture's texel at
    /// `(x mod width, z mod height)`.
    ///
    /// Empty textures and out-of-range columns are ignored.
    pub fn paint(&mut self, x: u32, z: u32, texture: &RgbaImage) {
        let (w, h) = texture.dimensions();
        if w == 0 || h == 0 || x >= TILE_SIZE || z >= TILE_SIZE {
            return;
        }
        self.image.put_pixel(x, z, *texture.get_pixel(x % w, z % h));
    }

    /// Pixel of column `(x, z)`.
    pub fn pixel(&self, x: u32, z: u32) -> Rgba<u8> {
        *self.image.get_pixel(x, z)
    }

    /// Underlying image.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tile_is_background() {
        let tile = Tile::new();
        assert_eq!(tile.image().dimensions(), (16, 16));
        assert!(tile.image().pixels().all(|p| *p == BACKGROUND));
    }

    #[test]
    fn test_paint_swatch() {
        let swatch = RgbaImage::from_pixel(1, 1, Rgba([9, 8, 7, 255]));
        let mut tile = Tile::new();
        tile.paint(3, 12, &swatch);
        assert_eq!(tile.pixel(3, 12), Rgba([9, 8, 7, 255]));
        assert_eq!(tile.pixel(12, 3), BACKGROUND);
    }

    #[test]
    fn test_paint_samples_texture_by_position() {
        let mut texture = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 255]));
        texture.put_pixel(1, 0, Rgba([255, 0, 0, 255]));
        texture.put_pixel(0, 1, Rgba([0, 255, 0, 255]));

        let mut tile = Tile::new();
        tile.paint(5, 0, &texture);
        tile.paint(0, 7, &texture);
        tile.paint(4, 4, &texture);

        assert_eq!(tile.pixel(5, 0), Rgba([255, 0, 0, 255]));
        assert_eq!(tile.pixel(0, 7), Rgba([0, 255, 0, 255]));
        assert_eq!(tile.pixel(4, 4), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_paint_overwrites_including_alpha() {
        let mut tile = Tile::filled(Rgba([1, 1, 1, 255]));
        let glass = RgbaImage::from_pixel(1, 1, Rgba([200, 200, 255, 0]));
        tile.paint(0, 0, &glass);
        assert_eq!(tile.pixel(0, 0), Rgba([200, 200, 255, 0]));
    }

    #[test]
    fn test_paint_ignores_out_of_range() {
        let swatch = RgbaImage::from_pixel(1, 1, Rgba([1, 2, 3, 4]));
        let mut tile = Tile::new();
        tile.paint(16, 0, &swatch);
        tile.paint(0, 0, &RgbaImage::new(0, 0));
        assert_eq!(tile, Tile::new());
    }
}
