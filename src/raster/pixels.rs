//! src/raster/pixels.rs
//!
//! RGBA color cells and the owned, row-major pixel buffer the engine draws into.
//!
//! Row 0 is the visual top of the graph. Writes outside the buffer are ignored.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A single RGBA8 color cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    /// Opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// True when the cell shows nothing (alpha == 0).
    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }

    /// Parse `#rrggbb` or `#rrggbbaa` (leading `#` optional).
    pub fn from_hex(text: &str) -> Result<Self, ConfigError> {
        let hex = text.trim().trim_start_matches('#');
        let bad = || ConfigError::InvalidColor(text.to_string());
        if !(hex.len() == 6 || hex.len() == 8) || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(bad());
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| bad());
        let a = if hex.len() == 8 { byte(6)? } else { 255 };
        Ok(Color::rgba(byte(0)?, byte(2)?, byte(4)?, a))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl TryFrom<String> for Color {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(value: Color) -> Self {
        value.to_string()
    }
}

/// Owned `width × height` grid of color cells, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    cells: Vec<Color>,
}

impl PixelBuffer {
    /// Allocate a buffer filled with `fill`.
    pub fn new(width: u32, height: u32, fill: Color) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![fill; len],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Overwrite every cell with `color`.
    pub fn fill(&mut self, color: Color) {
        self.cells.fill(color);
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Color at `(x, y)`, or `None` outside the buffer.
    pub fn get(&self, x: i64, y: i64) -> Option<Color> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Write one cell. Returns `false` (and writes nothing) when out of bounds.
    pub fn set(&mut self, x: i64, y: i64, color: Color) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.cells[i] = color;
                true
            }
            None => false,
        }
    }

    /// Row-major cells.
    pub fn cells(&self) -> &[Color] {
        &self.cells
    }

    /// Number of cells not equal to `color`.
    pub fn count_not(&self, color: Color) -> usize {
        self.cells.iter().filter(|&&c| c != color).count()
    }

    /// Flat `[r, g, b, a, ...]` bytes, row-major.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.cells.len() * 4);
        for c in &self.cells {
            out.extend_from_slice(&[c.r, c.g, c.b, c.a]);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colors_parse_and_print() {
        assert_eq!(Color::from_hex("#ff8000").unwrap(), Color::rgb(255, 128, 0));
        assert_eq!(
            Color::from_hex("00ff0080").unwrap(),
            Color::rgba(0, 255, 0, 128)
        );
        assert_eq!(Color::rgb(1, 2, 3).to_string(), "#010203");
        assert_eq!(Color::TRANSPARENT.to_string(), "#00000000");
        assert!(Color::from_hex("#12345").is_err());
        assert!(Color::from_hex("#gg0000").is_err());
        assert!(Color::from_hex("#+f+f+f").is_err());
        assert!(Color::from_hex("-1-1-1").is_err());
    }

    #[test]
    fn writes_outside_are_dropped() {
        let mut buf = PixelBuffer::new(4, 3, Color::TRANSPARENT);
        assert!(buf.set(3, 2, Color::WHITE));
        assert!(!buf.set(4, 0, Color::WHITE));
        assert!(!buf.set(0, -1, Color::WHITE));
        assert_eq!(buf.get(3, 2), Some(Color::WHITE));
        assert_eq!(buf.get(-1, 0), None);
        assert_eq!(buf.count_not(Color::TRANSPARENT), 1);
    }

    #[test]
    fn rgba_bytes_are_row_major() {
        let mut buf = PixelBuffer::new(2, 2, Color::BLACK);
        buf.set(1, 0, Color::rgb(9, 8, 7));
        let bytes = buf.to_rgba_bytes();
        assert_eq!(bytes.len(), 16);
        assert_eq!(&bytes[4..8], &[9, 8, 7, 255]);
    }
}
