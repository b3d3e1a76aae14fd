//! src/panels/info.rs
//!
//! Graph info panel: live value, retained samples, and what the last pass did.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::view::TerminalView;
use crate::trend::RenderOutcome;

/// Read-only info panel.
pub struct InfoPanel<'a> {
    pub view: &'a TerminalView,
}

impl<'a> InfoPanel<'a> {
    pub fn new(view: &'a TerminalView) -> Self {
        Self { view }
    }

    fn status_lines(&self) -> Vec<Line<'a>> {
        let Some(status) = &self.view.status else {
            return vec![Line::from("no frame yet")];
        };
        let outcome = match status.outcome {
            RenderOutcome::Drawn { segments } => format!("drawn ({} segments)", segments),
            RenderOutcome::Skipped { retained } => format!("skipped ({} retained)", retained),
        };
        let reference = status
            .reference
            .map(|t| t.format("%H:%M:%S%.3f").to_string())
            .unwrap_or_else(|| "-".to_string());
        vec![
            Line::from(format!(
                "samples={}  line_width={}",
                status.samples, status.line_width
            )),
            Line::from(format!("reference={}  pass={}", reference, outcome)),
            Line::from(format!(
                "evicted old={} future={}  frames={}",
                status.eviction.too_old, status.eviction.from_future, self.view.screen.presented
            )),
        ]
    }
}

impl crate::panels::Panel for InfoPanel<'_> {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let mut lines = vec![Line::from(vec![
            Span::raw("value "),
            Span::styled(
                self.view.labels.value.clone(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(" {}", self.view.labels.axis.units)),
        ])];
        lines.extend(self.status_lines());

        let block = Block::default().title("Info").borders(Borders::ALL);
        f.render_widget(Paragraph::new(lines).block(block), area);
    }
}
