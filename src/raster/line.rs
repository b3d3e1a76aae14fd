//! src/raster/line.rs
//!
//! Integer Bresenham line drawing with a vertical-offset stroke.
//!
//! Thickness is not a brush: every primary pixel gets one extra pixel above it
//! when `width > 1` and one below when `width > 2`, whatever the slope.

use super::pixels::{Color, PixelBuffer};

/// Plot the primary pixel plus its thickness rows. Out-of-range cells are clipped.
fn plot(buf: &mut PixelBuffer, x: i64, y: i64, color: Color, width: u32) {
    buf.set(x, y, color);
    if width > 1 {
        buf.set(x, y - 1, color);
    }
    if width > 2 {
        buf.set(x, y + 1, color);
    }
}

/// Draw a line from `(x0, y0)` to `(x1, y1)` inclusive.
///
/// Both endpoints are plotted. No floating point is involved, so the same
/// endpoints always produce the same pixels.
pub fn draw_line(
    buf: &mut PixelBuffer,
    from: (i32, i32),
    to: (i32, i32),
    color: Color,
    width: u32,
) {
    let (mut x, mut y) = (from.0 as i64, from.1 as i64);
    let (x1, y1) = (to.0 as i64, to.1 as i64);

    let step_x = if x1 < x { -1 } else { 1 };
    let step_y = if y1 < y { -1 } else { 1 };
    let dx = (x1 - x).abs() << 1;
    let dy = (y1 - y).abs() << 1;

    plot(buf, x, y, color, width);

    if dx > dy {
        let mut fraction = dy - (dx >> 1);
        while x != x1 {
            if fraction >= 0 {
                y += step_y;
                fraction -= dx;
            }
            x += step_x;
            fraction += dy;
            plot(buf, x, y, color, width);
        }
    } else {
        let mut fraction = dx - (dy >> 1);
        while y != y1 {
            if fraction >= 0 {
                x += step_x;
                fraction -= dy;
            }
            y += step_y;
            fraction += dx;
            plot(buf, x, y, color, width);
        }
    }
}
