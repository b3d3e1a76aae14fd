//! src/error.rs
//!
//! Error types reported at configuration time and by the control protocol.

use std::path::PathBuf;

use thiserror::Error;

/// Rejected configuration. Raised when a config is built, loaded or swapped,
/// never during a render pass.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("y range is empty: y_max ({y_max}) must be greater than y_min ({y_min})")]
    EmptyValueRange { y_min: f64, y_max: f64 },

    #[error("timebase must be a positive number of seconds, got {0}")]
    Timebase(f64),

    #[error("pixel dimensions must be within 1..=4096 per side, got {width}x{height}")]
    Dimensions { width: u32, height: u32 },

    #[error("line width must be at least 1")]
    LineWidth,

    #[error("sample cap must be at least 2, got {0}")]
    SampleCap(usize),

    #[error("unknown value format `{0}` (expected F<n>, D<n>, E<n> or G)")]
    ValueFormat(String),

    #[error("invalid color `{0}` (expected #rrggbb or #rrggbbaa)")]
    InvalidColor(String),

    #[error("cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// A control line that could not be understood or applied.
#[derive(Debug, Error, PartialEq)]
pub enum CommandError {
    #[error("empty")]
    Empty,

    #[error("unknown {0}")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("bad number `{0}`")]
    Number(String),

    #[error("bad timestamp `{0}`")]
    Timestamp(String),

    #[error("unknown field `{0}`")]
    Field(String),

    #[error("config {0}")]
    Config(String),
}
