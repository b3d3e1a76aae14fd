//! src/net/remote.rs
//!
//! Tiny line-based TCP control server for feeding and tuning a trend graph.
//!
//! Commands (one per line, whitespace separated, case-insensitive keywords):
//! - `add <value>`: sample stamped with the current wall-clock time
//! - `add <rfc3339> <value>`: sample with an explicit timestamp
//! - `set <ymin|ymax|timebase|width|height|linewidth> <value>`
//! - `clear`
//! - `status`
//! - `quit`
//!
//! Every line gets one reply: `OK[ detail]` or `ERR <msg>`.

use std::io::{BufRead, BufReader, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::thread;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::error::CommandError;
use crate::trend::shared::{SharedTrend, lock};

/// Config field addressable by `set`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    YMin,
    YMax,
    Timebase,
    Width,
    Height,
    LineWidth,
}

impl Field {
    fn parse(name: &str) -> Result<Self, CommandError> {
        match name.to_ascii_lowercase().as_str() {
            "ymin" => Ok(Field::YMin),
            "ymax" => Ok(Field::YMax),
            "timebase" => Ok(Field::Timebase),
            "width" => Ok(Field::Width),
            "height" => Ok(Field::Height),
            "linewidth" => Ok(Field::LineWidth),
            _ => Err(CommandError::Field(name.to_string())),
        }
    }

    fn is_integer(&self) -> bool {
        matches!(self, Field::Width | Field::Height | Field::LineWidth)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Add {
        timestamp: Option<DateTime<Utc>>,
        value: f64,
    },
    Set {
        field: Field,
        value: f64,
    },
    Clear,
    Status,
    Quit,
}

fn number(tok: &str) -> Result<f64, CommandError> {
    tok.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| CommandError::Number(tok.to_string()))
}

/// Parse one control line.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let Some(head) = parts.first() else {
        return Err(CommandError::Empty);
    };

    match (head.to_ascii_lowercase().as_str(), parts.len()) {
        ("add", 2) => Ok(Command::Add {
            timestamp: None,
            value: number(parts[1])?,
        }),
        ("add", 3) => {
            let ts = DateTime::parse_from_rfc3339(parts[1])
                .map_err(|_| CommandError::Timestamp(parts[1].to_string()))?;
            Ok(Command::Add {
                timestamp: Some(ts.with_timezone(&Utc)),
                value: number(parts[2])?,
            })
        }
        ("add", _) => Err(CommandError::Usage("add [rfc3339] <value>")),
        ("set", 3) => {
            let field = Field::parse(parts[1])?;
            let value = number(parts[2])?;
            let in_u32 = value.fract() == 0.0 && (0.0..=u32::MAX as f64).contains(&value);
            if field.is_integer() && !in_u32 {
                return Err(CommandError::Number(parts[2].to_string()));
            }
            Ok(Command::Set { field, value })
        }
        ("set", _) => Err(CommandError::Usage("set <field> <value>")),
        ("clear", 1) => Ok(Command::Clear),
        ("status", 1) => Ok(Command::Status),
        ("quit", 1) => Ok(Command::Quit),
        _ => Err(CommandError::Unknown(parts.join(" "))),
    }
}

/// Apply a command to the graph and return the reply detail (after `OK`).
pub fn apply_command(cmd: &Command, graph: &SharedTrend) -> Result<String, CommandError> {
    let mut g = lock(graph);
    match *cmd {
        Command::Add { timestamp, value } => {
            g.add(timestamp.unwrap_or_else(Utc::now), value);
            Ok(String::new())
        }
        Command::Set { field, value } => {
            let mut cfg = g.config().clone();
            match field {
                Field::YMin => cfg.y_min = value,
                Field::YMax => cfg.y_max = value,
                Field::Timebase => cfg.timebase = value,
                Field::Width => cfg.pixel_width = value as u32,
                Field::Height => cfg.pixel_height = value as u32,
                Field::LineWidth => cfg.line_width = value as u32,
            }
            g.set_config(cfg)
                .map_err(|e| CommandError::Config(e.to_string()))?;
            Ok(String::new())
        }
        Command::Clear => {
            g.clear();
            Ok(String::new())
        }
        Command::Status => {
            let reference = g
                .reference_time()
                .map(|t| t.to_rfc3339())
                .unwrap_or_else(|| "none".to_string());
            let last = g.value_label().unwrap_or_else(|| "none".to_string());
            Ok(format!(
                "samples={} reference={} last={}",
                g.len(),
                reference,
                last
            ))
        }
        Command::Quit => Ok("bye".to_string()),
    }
}

/// Bind `addr` and serve clients until the process exits.
pub fn remote_server(addr: &str, graph: SharedTrend) {
    let listener = match TcpListener::bind(addr) {
        Ok(l) => l,
        Err(e) => {
            warn!(addr, error = %e, "remote_server: bind failed");
            return;
        }
    };
    info!(addr, "remote control listening");
    serve(listener, graph);
}

/// Accept loop on an already-bound listener; one thread per client.
pub fn serve(listener: TcpListener, graph: SharedTrend) {
    for stream in listener.incoming() {
        match stream {
            Ok(s) => {
                let g = graph.clone();
                thread::spawn(move || handle_remote_client(s, g));
            }
            Err(e) => warn!(error = %e, "remote_server: accept failed"),
        }
    }
}

/// Handle a single client until it sends `quit` or disconnects.
pub fn handle_remote_client(mut s: TcpStream, graph: SharedTrend) {
    let peer = s
        .peer_addr()
        .map(|a| a.to_string())
        .unwrap_or_else(|_| "<peer?>".into());
    let mut rdr = match s.try_clone() {
        Ok(read_half) => BufReader::new(read_half),
        Err(e) => {
            warn!(peer = %peer, error = %e, "cannot clone client stream");
            return;
        }
    };
    debug!(peer = %peer, "remote client connected");

    let mut line = String::new();
    loop {
        line.clear();
        match rdr.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let raw = line.trim();
        if raw.is_empty() {
            continue;
        }

        let result = parse_command(raw).and_then(|cmd| {
            let detail = apply_command(&cmd, &graph)?;
            Ok((cmd, detail))
        });
        let (reply, quit) = match result {
            Ok((cmd, detail)) if detail.is_empty() => ("OK\n".to_string(), cmd == Command::Quit),
            Ok((cmd, detail)) => (format!("OK {}\n", detail), cmd == Command::Quit),
            Err(e) => {
                warn!(peer = %peer, command = raw, error = %e, "rejected control command");
                (format!("ERR {}\n", e), false)
            }
        };
        if s.write_all(reply.as_bytes()).is_err() || quit {
            break;
        }
    }

    debug!(peer = %peer, "remote client disconnected");
    let _ = s.shutdown(Shutdown::Both);
}
