//! src/snapshot.rs
//!
//! PNG export of a rendered frame.

use std::path::Path;

use image::{ImageError, RgbaImage};
use tracing::info;

use crate::raster::PixelBuffer;

/// Copy a frame into an `image` RGBA buffer.
pub fn to_image(frame: &PixelBuffer) -> RgbaImage {
    // length always matches width * height * 4
    RgbaImage::from_raw(frame.width(), frame.height(), frame.to_rgba_bytes())
        .unwrap_or_else(|| RgbaImage::new(frame.width(), frame.height()))
}

/// Write a frame as a PNG file.
pub fn save_png(frame: &PixelBuffer, path: impl AsRef<Path>) -> Result<(), ImageError> {
    let path = path.as_ref();
    to_image(frame).save(path)?;
    info!(path = %path.display(), width = frame.width(), height = frame.height(), "saved snapshot");
    Ok(())
}
