//! src/source/synthetic.rs
//!
//! Simulated signal with its own clock: a slow sine plus uniform noise.
//!
//! The clock can be rewound to mimic a scrubbed or restarted time source; the
//! graph then drops everything newer than the rewound time on its next pass.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::trend::shared::{SharedTrend, lock};

pub struct SyntheticSource {
    clock: DateTime<Utc>,
    step: TimeDelta,
    center: f64,
    amplitude: f64,
    noise: f64,
    period_secs: f64,
    rng: StdRng,
}

impl SyntheticSource {
    /// Signal centred in `[y_min, y_max]`, swinging over 80% of it.
    pub fn new(start: DateTime<Utc>, step: TimeDelta, y_range: (f64, f64), seed: u64) -> Self {
        let (lo, hi) = y_range;
        let span = hi - lo;
        Self {
            clock: start,
            step,
            center: (lo + hi) / 2.0,
            amplitude: span * 0.4,
            noise: span * 0.05,
            period_secs: 20.0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn clock(&self) -> DateTime<Utc> {
        self.clock
    }

    /// Produce the sample at the current clock, then advance it one step.
    pub fn next_sample(&mut self) -> (DateTime<Utc>, f64) {
        let ts = self.clock;
        let secs = ts.timestamp_millis() as f64 / 1000.0;
        let angle = secs / self.period_secs * std::f64::consts::TAU;
        let jitter = if self.noise > 0.0 {
            self.rng.random_range(-self.noise..=self.noise)
        } else {
            0.0
        };
        self.clock += self.step;
        (ts, self.center + self.amplitude * angle.sin() + jitter)
    }

    /// Move the clock back by `by`.
    pub fn rewind(&mut self, by: TimeDelta) {
        self.clock -= by;
        info!(clock = %self.clock, "synthetic clock rewound");
    }
}

/// Feed the graph from `source` every `period` until `running` clears.
pub fn start_synthetic(
    graph: SharedTrend,
    source: Arc<Mutex<SyntheticSource>>,
    period: Duration,
    running: Arc<AtomicBool>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        while running.load(Ordering::Relaxed) {
            let (ts, value) = source
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .next_sample();
            lock(&graph).add(ts, value);
            thread::sleep(period);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> DateTime<Utc> {
        DateTime::from_timestamp(2_000_000, 0).unwrap()
    }

    #[test]
    fn clock_advances_and_values_stay_in_range() {
        let mut src = SyntheticSource::new(start(), TimeDelta::milliseconds(250), (-1.0, 1.0), 7);
        let mut last = None;
        for _ in 0..200 {
            let (ts, v) = src.next_sample();
            if let Some(prev) = last {
                assert_eq!(ts - prev, TimeDelta::milliseconds(250));
            }
            assert!((-1.0..=1.0).contains(&v), "value {} escaped range", v);
            last = Some(ts);
        }
    }

    #[test]
    fn same_seed_same_signal() {
        let mut a = SyntheticSource::new(start(), TimeDelta::seconds(1), (0.0, 10.0), 42);
        let mut b = SyntheticSource::new(start(), TimeDelta::seconds(1), (0.0, 10.0), 42);
        for _ in 0..20 {
            assert_eq!(a.next_sample(), b.next_sample());
        }
    }

    #[test]
    fn rewind_moves_clock_back() {
        let mut src = SyntheticSource::new(start(), TimeDelta::seconds(1), (0.0, 1.0), 1);
        for _ in 0..30 {
            src.next_sample();
        }
        src.rewind(TimeDelta::seconds(10));
        assert_eq!(src.clock(), start() + TimeDelta::seconds(20));
    }
}
