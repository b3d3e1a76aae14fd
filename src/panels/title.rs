//! src/panels/title.rs
//!
//! Header line with the graph name and the status message of the last action.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

pub struct TitlePanel<'a> {
    pub title: &'a str,
    pub message: &'a str,
}

impl<'a> TitlePanel<'a> {
    pub fn new(title: &'a str, message: &'a str) -> Self {
        Self { title, message }
    }
}

impl crate::panels::Panel for TitlePanel<'_> {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let line = Line::from(vec![
            Span::raw(self.title),
            Span::raw("  "),
            Span::styled(self.message, Style::default().fg(Color::Green)),
        ]);
        f.render_widget(Paragraph::new(line).block(Block::default().borders(Borders::ALL)), area);
    }
}
