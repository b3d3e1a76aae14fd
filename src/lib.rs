//! Scrolling real-time trend graph.
//!
//! Samples are pushed with [`TrendGraph::add`]; once per frame the host calls
//! [`TrendGraph::render`] (or [`TrendGraph::publish`]) which sorts and windows
//! the samples and rasterizes them as a polyline into an owned pixel buffer.
//!
//! Modules:
//! - `trend`: sample buffer, view config, coordinate mapping, engine
//! - `raster`: pixel buffer and Bresenham line drawing
//! - `sinks`: presenter / label-sink traits the engine publishes to
//! - `panels`, `app`, `cli`: the ratatui viewer binary
//! - `source`, `net`: sample producers (synthetic, serial, TCP control)

pub mod app;
pub mod cli;
pub mod error;
pub mod logging;
pub mod net;
pub mod panels;
pub mod raster;
pub mod sinks;
pub mod snapshot;
pub mod source;
pub mod trend;

pub use error::{CommandError, ConfigError};
pub use raster::{Color, PixelBuffer};
pub use sinks::{AxisLabels, LabelSink, Presenter};
pub use trend::{
    RenderOutcome, Sample, SampleBuffer, SharedTrend, TrendGraph, ValueFormat, ViewConfig,
};
