//! src/source.rs
//!
//! Sample producers that push into a shared graph from their own threads.

pub mod serial;
pub mod synthetic;

pub use serial::{parse_value_line, start_serial_reader};
pub use synthetic::{SyntheticSource, start_synthetic};
