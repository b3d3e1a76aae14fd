//! src/logging.rs
//!
//! tracing subscriber setup.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Logs go to `path` when given and are
/// discarded otherwise; `RUST_LOG` overrides the default `info` filter.
pub fn init(path: Option<&Path>) -> std::io::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_ansi(false);

    // a second init (e.g. from tests) keeps the first subscriber
    match path {
        Some(path) => {
            let file = File::create(path)?;
            let _ = builder.with_writer(Mutex::new(file)).try_init();
        }
        None => {
            let _ = builder.with_writer(std::io::sink).try_init();
        }
    }
    Ok(())
}
