//! src/sinks.rs
//!
//! Output collaborators the engine publishes to: a presenter for finished
//! frames and a sink for label text.

use crate::raster::PixelBuffer;

/// Axis captions derived from the view configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AxisLabels {
    pub y_max: String,
    pub y_min: String,
    pub timebase: String,
    pub units: String,
}

/// Receives each completed frame as a read-only snapshot.
pub trait Presenter {
    fn present(&mut self, frame: &PixelBuffer);
}

/// Receives label text for the live value and the axes.
pub trait LabelSink {
    fn set_value_label(&mut self, text: &str);
    fn set_axis_labels(&mut self, labels: &AxisLabels);
}
