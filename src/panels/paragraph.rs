//! src/panels/paragraph.rs
//!
//! Titled, wrapped text block for help and footer lines.

use ratatui::{
    Frame,
    layout::Rect,
    widgets::{Block, Borders, Paragraph, Wrap},
};

pub struct ParagraphPanel {
    pub text: String,
    pub title: String,
}

impl ParagraphPanel {
    pub fn new(text: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            title: title.into(),
        }
    }
}

impl crate::panels::Panel for ParagraphPanel {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let p = Paragraph::new(self.text.as_str())
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .title(self.title.as_str())
                    .borders(Borders::ALL),
            );
        f.render_widget(p, area);
    }
}
