//! src/source/serial.rs
//!
//! Serial-port reader: one numeric reading per line, timestamped on arrival.

use std::io::{BufRead, BufReader};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use chrono::Utc;
use tracing::{info, warn};

use crate::trend::shared::{SharedTrend, lock};

/// Extract the reading from a line.
///
/// Accepts a bare number (`-94.5`), a labelled value (`RSSI: -94.5 dBm`) or a
/// `key=value` pair; the first token that parses as a finite number wins.
pub fn parse_value_line(line: &str) -> Option<f64> {
    let body = match line.split_once(':') {
        Some((_, rest)) => rest,
        None => line,
    };
    body.split(|c: char| c.is_whitespace() || c == '=' || c == ',')
        .filter(|tok| !tok.is_empty())
        .filter_map(|tok| tok.parse::<f64>().ok())
        .find(|v| v.is_finite())
}

/// Spawn a thread that reads `port_name` and adds every parsed value to the graph.
pub fn start_serial_reader(port_name: &str, baud_rate: u32, graph: SharedTrend) -> JoinHandle<()> {
    let port_name = port_name.to_string();
    thread::spawn(move || {
        info!(port = %port_name, baud_rate, "opening serial port");
        let port = match serialport::new(&port_name, baud_rate)
            .timeout(Duration::from_secs(10))
            .open()
        {
            Ok(p) => p,
            Err(e) => {
                warn!(port = %port_name, error = %e, "failed to open serial port");
                return;
            }
        };

        let reader = BufReader::new(port);
        for line_res in reader.lines() {
            match line_res {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    match parse_value_line(trimmed) {
                        Some(value) => lock(&graph).add(Utc::now(), value),
                        None => warn!(line = trimmed, "no value in serial line"),
                    }
                }
                Err(e) => {
                    warn!(error = %e, "error reading serial data");
                    break;
                }
            }
        }
        info!(port = %port_name, "serial reader exiting");
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_line_shapes() {
        assert_eq!(parse_value_line("42"), Some(42.0));
        assert_eq!(parse_value_line("  -94.5 "), Some(-94.5));
        assert_eq!(parse_value_line("RSSI_PACKET: -93.5 dBm"), Some(-93.5));
        assert_eq!(parse_value_line("temp=21.25"), Some(21.25));
        assert_eq!(parse_value_line("a,b,3.5"), Some(3.5));
    }

    #[test]
    fn rejects_lines_without_numbers() {
        assert_eq!(parse_value_line("ACK sent back automatically."), None);
        assert_eq!(parse_value_line("value: NaN"), None);
        assert_eq!(parse_value_line(""), None);
    }
}
