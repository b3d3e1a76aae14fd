//! src/panels/trend.rs
//!
//! Trend panel: shows the presented pixel buffer inside the terminal, framed
//! by the axis labels.
//!
//! Each terminal cell covers two vertically stacked pixel blocks drawn with an
//! upper half-block glyph. A block shows ink if any pixel in it differs from the
//! background, so one-pixel lines survive downscaling.

use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color as TermColor, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use super::view::TerminalView;
use crate::raster::{Color, PixelBuffer};

fn term_color(c: Color) -> TermColor {
    if c.is_transparent() {
        TermColor::Reset
    } else {
        TermColor::Rgb(c.r, c.g, c.b)
    }
}

/// Scaled half-block rendering of a pixel buffer.
pub struct PixelView<'a> {
    frame: &'a PixelBuffer,
    background: Color,
}

impl<'a> PixelView<'a> {
    pub fn new(frame: &'a PixelBuffer, background: Color) -> Self {
        Self { frame, background }
    }

    /// Color for the pixel block `[x0, x1) x [y0, y1)`: first ink pixel, else background.
    fn block_color(&self, x0: u32, x1: u32, y0: u32, y1: u32) -> Color {
        for y in y0..y1.max(y0 + 1) {
            for x in x0..x1.max(x0 + 1) {
                if let Some(c) = self.frame.get(x as i64, y as i64)
                    && c != self.background
                {
                    return c;
                }
            }
        }
        self.background
    }
}

/// Frame coordinate where terminal step `i` of `steps` begins.
fn span_start(i: u32, len: u32, steps: u32) -> u32 {
    (u64::from(i) * u64::from(len) / u64::from(steps)) as u32
}

impl Widget for PixelView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let (fw, fh) = self.frame.dimensions();
        let cols = u32::from(area.width);
        let rows = u32::from(area.height) * 2;

        for cy in 0..area.height {
            for cx in 0..area.width {
                let x0 = span_start(u32::from(cx), fw, cols);
                let x1 = span_start(u32::from(cx) + 1, fw, cols);
                let row = u32::from(cy) * 2;
                let top = self.block_color(
                    x0,
                    x1,
                    span_start(row, fh, rows),
                    span_start(row + 1, fh, rows),
                );
                let bottom = self.block_color(
                    x0,
                    x1,
                    span_start(row + 1, fh, rows),
                    span_start(row + 2, fh, rows),
                );
                if let Some(cell) = buf.cell_mut((area.x + cx, area.y + cy)) {
                    cell.set_symbol("▀")
                        .set_fg(term_color(top))
                        .set_bg(term_color(bottom));
                }
            }
        }
    }
}

pub struct TrendPanel<'a> {
    pub view: &'a TerminalView,
}

impl<'a> TrendPanel<'a> {
    pub fn new(view: &'a TerminalView) -> Self {
        Self { view }
    }
}

impl crate::panels::Panel for TrendPanel<'_> {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let axis = &self.view.labels.axis;
        let title = Line::from(vec![
            Span::raw(" Trend "),
            Span::styled(
                format!("{} {} ", self.view.labels.value, axis.units),
                Style::default()
                    .fg(TermColor::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        let block = Block::default().title(title).borders(Borders::ALL);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let label_w = axis.y_max.len().max(axis.y_min.len()).max(1) as u16 + 1;
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(inner);
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(label_w), Constraint::Min(1)])
            .split(rows[0]);

        // y labels: max at the top row, min at the bottom row
        let label_area = cols[0];
        if label_area.height > 0 {
            f.render_widget(
                Paragraph::new(axis.y_max.as_str()),
                Rect {
                    height: 1,
                    ..label_area
                },
            );
            if label_area.height > 1 {
                f.render_widget(
                    Paragraph::new(axis.y_min.as_str()),
                    Rect {
                        y: label_area.y + label_area.height - 1,
                        height: 1,
                        ..label_area
                    },
                );
            }
        }

        // time axis: window edge on the left, "now" on the right
        let time_row = Rect {
            x: cols[1].x,
            width: cols[1].width,
            ..rows[1]
        };
        f.render_widget(
            Paragraph::new(Line::from(axis.timebase.as_str())),
            time_row,
        );
        f.render_widget(
            Paragraph::new(Line::from("now").right_aligned()),
            time_row,
        );

        match &self.view.screen.frame {
            Some(frame) => f.render_widget(PixelView::new(frame, self.view.background()), cols[1]),
            None => f.render_widget(
                Paragraph::new("waiting for samples...")
                    .style(Style::default().fg(TermColor::DarkGray)),
                cols[1],
            ),
        }
    }
}
