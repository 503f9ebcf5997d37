//! PNG snapshot encode/decode for host persistence.
//!
//! The host store persists the paint surface as opaque encoded bytes at
//! commit time and hands the same bytes back on restore. PNG keeps the
//! snapshot compact and lossless.

use std::io::Cursor;

use image::{ImageFormat, RgbaImage};
use thiserror::Error;

use crate::surface::PixelSurface;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("png codec: {0}")]
    Codec(#[from] image::ImageError),
    #[error("snapshot is {actual_width}x{actual_height}, surface is {expected_width}x{expected_height}")]
    DimensionMismatch {
        expected_width: u32,
        expected_height: u32,
        actual_width: u32,
        actual_height: u32,
    },
    #[error("surface dimensions do not form a valid image")]
    InvalidSurface,
}

/// Encode a surface as PNG bytes.
pub fn encode(surface: &PixelSurface) -> Result<Vec<u8>, SnapshotError> {
    let image = RgbaImage::from_raw(surface.width, surface.height, surface.to_rgba8())
        .ok_or(SnapshotError::InvalidSurface)?;
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Decode PNG bytes back into a surface of the expected dimensions.
///
/// A snapshot whose dimensions disagree with the live surface is rejected
/// wholesale; the caller falls back to a neutral fill.
pub fn decode(bytes: &[u8], width: u32, height: u32) -> Result<PixelSurface, SnapshotError> {
    let decoded = image::load_from_memory_with_format(bytes, ImageFormat::Png)?;
    let rgba = decoded.to_rgba8();
    let (actual_width, actual_height) = rgba.dimensions();
    if (actual_width, actual_height) != (width, height) {
        return Err(SnapshotError::DimensionMismatch {
            expected_width: width,
            expected_height: height,
            actual_width,
            actual_height,
        });
    }
    PixelSurface::from_rgba8(width, height, rgba.as_raw()).ok_or(SnapshotError::InvalidSurface)
}
