//! src/cli.rs
//!
//! Command-line options for the terminal trend viewer.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "trendgraph", version, about = "Scrolling real-time trend graph in the terminal")]
pub struct Cli {
    /// TOML view configuration (range, timebase, colors, size)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Read samples from this serial port instead of the synthetic signal
    #[arg(long)]
    pub serial: Option<String>,

    #[arg(long, default_value_t = 115_200)]
    pub baud: u32,

    /// Address for the line-based control server
    #[arg(long, default_value = "127.0.0.1:4000")]
    pub remote: String,

    /// Do not start the control server
    #[arg(long)]
    pub no_remote: bool,

    /// Frame clock period in milliseconds
    #[arg(long, default_value_t = 100)]
    pub tick_ms: u64,

    /// Synthetic signal rate in samples per second
    #[arg(long, default_value_t = 20.0)]
    pub rate_hz: f64,

    /// Where `p` writes the PNG snapshot
    #[arg(long, default_value = "trendgraph.png")]
    pub snapshot: PathBuf,

    /// Write logs to this file (the terminal belongs to the UI)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}
