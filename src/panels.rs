//! src/panels.rs
//!
//! Terminal panels and the presenter/label sink they draw from.

pub mod info;
pub mod paragraph;
pub mod title;
pub mod trend;
pub mod view;

use ratatui::{Frame, layout::Rect};

pub use info::InfoPanel;
pub use paragraph::ParagraphPanel;
pub use title::TitlePanel;
pub use trend::{PixelView, TrendPanel};
pub use view::{FrameSlot, LabelSlot, TerminalView, TickStatus};

/// Panel trait: any renderable surface implements this.
pub trait Panel {
    fn draw(&self, f: &mut Frame<'_>, area: Rect);
}
