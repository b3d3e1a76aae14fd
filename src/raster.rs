//! src/raster.rs
//!
//! Pixel buffer and line rasterization.

pub mod line;
pub mod pixels;

pub use line::draw_line;
pub use pixels::{Color, PixelBuffer};
