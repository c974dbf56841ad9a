//! Raster image encode/decode.
//!
//! The catalog and the application never call the `image` crate directly for
//! file formats; they go through [`ImageCodec`] so tests and embedders can
//! swap the codec.

use std::io::Cursor;

use image::{ImageFormat, RgbaImage};
use thiserror::Error;

/// Errors from image encoding or decoding.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Bytes could not be decoded into an image.
    #[error("Decode failed: {0}")]
    Decode(String),

    /// Image could not be encoded.
    #[error("Encode failed: {0}")]
    Encode(String),
}

/// Encodes and decodes RGBA rasters.
pub trait ImageCodec: Send + Sync {
    /// Decode an encoded image into RGBA pixels.
    fn decode(&self, bytes: &[u8]) -> Result<RgbaImage, CodecError>;

    /// Encode RGBA pixels.
    fn encode(&self, image: &RgbaImage) -> Result<Vec<u8>, CodecError>;

    /// File extension of the encoded format, without the dot.
    fn extension(&self) -> &str;
}

/// PNG codec using the `image` crate.
///
/// Decoding accepts any format `image` can sniff from the bytes, so texture
/// packs shipping TGA or JPEG swatches still load.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngCodec;

impl ImageCodec for PngCodec {
    fn decode(&self, bytes: &[u8]) -> Result<RgbaImage, CodecError> {
        image::load_from_memory(bytes)
            .map(|img| img.to_rgba8())
            .map_err(|e| CodecError::Decode(e.to_string()))
    }

    fn encode(&self, image: &RgbaImage) -> Result<Vec<u8>, CodecError> {
        let mut out = Cursor::new(Vec::new());
        image
            .write_to(&mut out, ImageFormat::Png)
            .map_err(|e| CodecError::Encode(e.to_string()))?;
        Ok(out.into_inner())
    }

    fn extension(&self) -> &str {
        "png"
    }
}
