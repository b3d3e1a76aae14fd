//! src/trend.rs
//!
//! Top-level `trend` module: samples, view configuration, coordinate mapping
//! and the render engine.

pub mod buffer;
pub mod config;
pub mod engine;
pub mod format;
pub mod mapper;
pub mod shared;

/// Re-exports
pub use buffer::{Eviction, Sample, SampleBuffer};
pub use config::{MAX_PIXEL_SIDE, ViewConfig};
pub use engine::{RenderOutcome, TrendGraph};
pub use format::ValueFormat;
pub use shared::SharedTrend;
