//! src/app.rs
//!
//! Terminal trend viewer: builds the shared graph, starts the sample source and
//! control server, then drives the frame clock.
//!
//! # Running
//!
//! ```text
//! cargo run --release -- --config view.toml
//! cargo run --release -- --serial /dev/ttyACM0 --baud 115200
//! ```
//!
//! Without `--serial` a synthetic sine-plus-noise signal feeds the graph from
//! its own simulated clock.
//!
//! # Keyboard Controls
//!
//! - **q**: quit and restore the terminal.
//! - **r**: rewind the synthetic clock by 10 s. The next samples are older than
//!   what is on screen, so the graph drops everything newer on its next pass.
//! - **+** / **-**: change the line width (1 to 3 rows).
//! - **c**: clear all samples; the last frame stays until two new samples arrive.
//! - **p**: save the current frame as a PNG (`--snapshot`).
//!
//! # Remote Control
//!
//! A line-based TCP server (default `127.0.0.1:4000`) accepts `add`, `set`,
//! `clear`, `status` and `quit`; see [`crate::net::remote`].
//!
//! ```text
//! $ nc 127.0.0.1 4000
//! set ymax 2
//! OK
//! add 1.5
//! OK
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use chrono::{TimeDelta, Utc};
use color_eyre::eyre::{WrapErr, eyre};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::layout::{Constraint, Direction, Layout};
use tracing::{info, warn};

use crate::cli::Cli;
use crate::net::remote::remote_server;
use crate::panels::{
    InfoPanel, Panel, ParagraphPanel, TerminalView, TickStatus, TitlePanel, TrendPanel,
};
use crate::snapshot::save_png;
use crate::source::{SyntheticSource, start_serial_reader, start_synthetic};
use crate::trend::shared::{SharedTrend, lock, share};
use crate::trend::{TrendGraph, ViewConfig};

const CONTROLS: &str = "Q=Quit  R=Rewind 10s  +/-=Line width  C=Clear  P=Snapshot";

/// One frame tick: lock the graph, publish into the view, copy out status.
fn tick(graph: &SharedTrend, view: &mut TerminalView) {
    let mut g = lock(graph);
    let outcome = g.publish(&mut view.screen, &mut view.labels);
    view.status = Some(TickStatus {
        samples: g.len(),
        reference: g.reference_time(),
        outcome,
        eviction: g.last_eviction(),
        line_width: g.config().line_width,
        background: g.config().background,
    });
}

/// Step the line width within 1..=3 and apply it through the validated path.
fn adjust_line_width(graph: &SharedTrend, delta: i32) -> String {
    let mut g = lock(graph);
    let mut cfg = g.config().clone();
    cfg.line_width = (cfg.line_width as i32 + delta).clamp(1, 3) as u32;
    let width = cfg.line_width;
    match g.set_config(cfg) {
        Ok(()) => format!("line width {}", width),
        Err(e) => format!("line width rejected: {}", e),
    }
}

fn load_config(cli: &Cli) -> color_eyre::Result<ViewConfig> {
    match &cli.config {
        Some(path) => ViewConfig::load(path)
            .wrap_err_with(|| format!("loading view config {}", path.display())),
        None => Ok(ViewConfig {
            y_min: -1.0,
            y_max: 1.0,
            timebase: 30.0,
            timebase_label: "-30 s".to_string(),
            units_label: "V".to_string(),
            value_format: crate::trend::ValueFormat::Fixed(3),
            line_color: crate::raster::Color::rgb(0, 220, 255),
            line_width: 2,
            pixel_width: 240,
            pixel_height: 120,
            ..ViewConfig::default()
        }),
    }
}

pub fn run(cli: Cli) -> color_eyre::Result<()> {
    let config = load_config(&cli)?;
    let y_range = (config.y_min, config.y_max);
    let graph: SharedTrend = share(TrendGraph::new(config)?);

    if cli.tick_ms == 0 {
        return Err(eyre!("--tick-ms must be at least 1"));
    }
    let frame_time = Duration::from_millis(cli.tick_ms);
    let running = Arc::new(AtomicBool::new(true));

    // Remote control thread
    if !cli.no_remote {
        let g = graph.clone();
        let addr = cli.remote.clone();
        thread::spawn(move || remote_server(&addr, g));
    }

    // Sample source: serial port, or the synthetic signal with a rewindable clock
    let synthetic = match &cli.serial {
        Some(port) => {
            start_serial_reader(port, cli.baud, graph.clone());
            None
        }
        None => {
            if !(cli.rate_hz.is_finite() && cli.rate_hz > 0.0) {
                return Err(eyre!("--rate-hz must be positive, got {}", cli.rate_hz));
            }
            let period = Duration::from_secs_f64(1.0 / cli.rate_hz);
            let step = TimeDelta::from_std(period).wrap_err("sample period out of range")?;
            let source = Arc::new(Mutex::new(SyntheticSource::new(
                Utc::now(),
                step,
                y_range,
                0x5eed,
            )));
            start_synthetic(graph.clone(), source.clone(), period, running.clone());
            Some(source)
        }
    };

    info!(tick_ms = cli.tick_ms, serial = ?cli.serial, "starting frame loop");

    let mut terminal = ratatui::init();
    let mut view = TerminalView::new();
    let mut message = String::from("ready");

    while running.load(Ordering::Relaxed) {
        let frame_start = Instant::now();

        tick(&graph, &mut view);

        terminal.draw(|f| {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3),
                    Constraint::Min(8),
                    Constraint::Length(6),
                ])
                .split(f.area());
            let bottom = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
                .split(rows[2]);

            TitlePanel::new("Trend Graph", &message).draw(f, rows[0]);
            TrendPanel::new(&view).draw(f, rows[1]);
            InfoPanel::new(&view).draw(f, bottom[0]);
            ParagraphPanel::new(CONTROLS, "Controls").draw(f, bottom[1]);
        })?;

        // Keyboard controls
        while event::poll(Duration::from_millis(0))? {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('q') => running.store(false, Ordering::Relaxed),
                KeyCode::Char('r') => {
                    message = match &synthetic {
                        Some(source) => {
                            source
                                .lock()
                                .unwrap_or_else(|poisoned| poisoned.into_inner())
                                .rewind(TimeDelta::seconds(10));
                            "clock rewound 10 s".to_string()
                        }
                        None => "rewind needs the synthetic source".to_string(),
                    };
                }
                KeyCode::Char('+') | KeyCode::Char('=') => {
                    message = adjust_line_width(&graph, 1);
                }
                KeyCode::Char('-') => {
                    message = adjust_line_width(&graph, -1);
                }
                KeyCode::Char('c') => {
                    lock(&graph).clear();
                    message = "samples cleared".to_string();
                }
                KeyCode::Char('p') => {
                    message = match &view.screen.frame {
                        Some(frame) => match save_png(frame, &cli.snapshot) {
                            Ok(()) => format!("saved {}", cli.snapshot.display()),
                            Err(e) => {
                                warn!(error = %e, "snapshot failed");
                                format!("snapshot failed: {}", e)
                            }
                        },
                        None => "nothing drawn yet".to_string(),
                    };
                }
                _ => {}
            }
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }

    ratatui::restore();
    info!("frame loop stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    #[test]
    fn tick_publishes_into_view() {
        let graph = share(
            TrendGraph::new(ViewConfig {
                timebase: 10.0,
                pixel_width: 32,
                pixel_height: 16,
                ..ViewConfig::default()
            })
            .unwrap(),
        );
        let base = DateTime::from_timestamp(10_000, 0).unwrap();
        let mut view = TerminalView::new();

        tick(&graph, &mut view);
        assert!(view.screen.frame.is_none());
        assert_eq!(view.labels.axis.timebase, "-5 min");

        lock(&graph).add(base, 0.2);
        lock(&graph).add(base + TimeDelta::seconds(5), 0.8);
        tick(&graph, &mut view);

        assert_eq!(view.screen.presented, 1);
        assert_eq!(view.labels.value, "001");
        let status = view.status.as_ref().unwrap();
        assert_eq!(status.samples, 2);
        assert!(status.outcome.is_drawn());
    }

    #[test]
    fn line_width_stays_within_supported_rows() {
        let graph = share(TrendGraph::new(ViewConfig::default()).unwrap());
        for _ in 0..5 {
            adjust_line_width(&graph, 1);
        }
        assert_eq!(lock(&graph).config().line_width, 3);
        for _ in 0..5 {
            adjust_line_width(&graph, -1);
        }
        assert_eq!(lock(&graph).config().line_width, 1);
    }
}
