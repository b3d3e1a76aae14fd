//! src/panels/view.rs
//!
//! Terminal-side collaborators: slots that receive frames and labels from the
//! engine and hold them for the panels to draw.

use chrono::{DateTime, Utc};

use crate::raster::{Color, PixelBuffer};
use crate::sinks::{AxisLabels, LabelSink, Presenter};
use crate::trend::{Eviction, RenderOutcome};

/// Per-tick engine state copied out while the graph lock is held.
#[derive(Clone, Debug)]
pub struct TickStatus {
    pub samples: usize,
    pub reference: Option<DateTime<Utc>>,
    pub outcome: RenderOutcome,
    pub eviction: Eviction,
    pub line_width: u32,
    pub background: Color,
}

/// Presenter half: the last frame handed over by the engine.
#[derive(Debug, Default)]
pub struct FrameSlot {
    pub frame: Option<PixelBuffer>,
    pub presented: u64,
}

impl Presenter for FrameSlot {
    fn present(&mut self, frame: &PixelBuffer) {
        match &mut self.frame {
            Some(held) => held.clone_from(frame),
            None => self.frame = Some(frame.clone()),
        }
        self.presented += 1;
    }
}

/// Label-sink half: value and axis captions.
#[derive(Debug, Default)]
pub struct LabelSlot {
    pub value: String,
    pub axis: AxisLabels,
}

impl LabelSink for LabelSlot {
    fn set_value_label(&mut self, text: &str) {
        self.value.clear();
        self.value.push_str(text);
    }

    fn set_axis_labels(&mut self, labels: &AxisLabels) {
        self.axis = labels.clone();
    }
}

/// Everything the panels draw from.
#[derive(Debug, Default)]
pub struct TerminalView {
    pub screen: FrameSlot,
    pub labels: LabelSlot,
    pub status: Option<TickStatus>,
}

impl TerminalView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Background of the presented frame, used to tell ink from empty cells.
    pub fn background(&self) -> Color {
        self.status
            .as_ref()
            .map(|s| s.background)
            .unwrap_or(Color::TRANSPARENT)
    }
}
