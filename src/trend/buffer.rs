//! src/trend/buffer.rs
//!
//! Time-windowed sample storage.
//!
//! `add` only appends and moves the reference time; all ordering and eviction
//! happens in [`SampleBuffer::evict_and_sort`] at the start of a render pass.

use std::collections::VecDeque;

use chrono::{DateTime, TimeDelta, Utc};
use tracing::debug;

/// One `(timestamp, value)` observation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

impl Sample {
    pub fn new(timestamp: DateTime<Utc>, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// `later - earlier` as fractional seconds (negative when `earlier` is later).
pub fn seconds_between(later: DateTime<Utc>, earlier: DateTime<Utc>) -> f64 {
    let delta: TimeDelta = later - earlier;
    match delta.num_nanoseconds() {
        Some(ns) => ns as f64 * 1e-9,
        // beyond ~292 years nanoseconds overflow
        None => delta.num_milliseconds() as f64 * 1e-3,
    }
}

/// What one eviction pass removed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Eviction {
    pub too_old: usize,
    pub from_future: usize,
}

#[derive(Debug, Default)]
pub struct SampleBuffer {
    samples: VecDeque<Sample>,

    /// Timestamp of the most recently added sample; `None` until the first add.
    reference: Option<DateTime<Utc>>,

    /// Drop the oldest-inserted sample once this many are buffered.
    max_samples: Option<usize>,
}

impl SampleBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cap(max_samples: Option<usize>) -> Self {
        Self {
            max_samples,
            ..Self::default()
        }
    }

    pub fn set_cap(&mut self, max_samples: Option<usize>) {
        self.max_samples = max_samples;
        self.enforce_cap();
    }

    /// Append a sample and make its timestamp the new reference time, even when
    /// it is earlier than samples already buffered.
    pub fn add(&mut self, timestamp: DateTime<Utc>, value: f64) {
        self.samples.push_back(Sample::new(timestamp, value));
        self.reference = Some(timestamp);
        self.enforce_cap();
    }

    fn enforce_cap(&mut self) {
        if let Some(cap) = self.max_samples {
            while self.samples.len() > cap {
                self.samples.pop_front();
            }
        }
    }

    pub fn reference_time(&self) -> Option<DateTime<Utc>> {
        self.reference
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Drop every sample and forget the reference time.
    pub fn clear(&mut self) {
        self.samples.clear();
        self.reference = None;
    }

    /// Buffered samples in their current (not necessarily sorted) order.
    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }

    /// Stable-sort by timestamp, then drop samples older than `reference - timebase`
    /// from the head and samples newer than `reference` from the tail.
    ///
    /// Returns the retained samples in ascending timestamp order. An unset
    /// reference leaves the buffer empty-handed: nothing was ever added.
    pub fn evict_and_sort(
        &mut self,
        reference: Option<DateTime<Utc>>,
        timebase: f64,
    ) -> (&[Sample], Eviction) {
        let mut eviction = Eviction::default();
        let Some(reference) = reference else {
            return (&*self.samples.make_contiguous(), eviction);
        };

        self.samples
            .make_contiguous()
            .sort_by(|a, b| a.timestamp.cmp(&b.timestamp));

        while let Some(first) = self.samples.front() {
            if seconds_between(reference, first.timestamp) > timebase {
                self.samples.pop_front();
                eviction.too_old += 1;
            } else {
                break;
            }
        }

        while let Some(last) = self.samples.back() {
            if last.timestamp > reference {
                self.samples.pop_back();
                eviction.from_future += 1;
            } else {
                break;
            }
        }

        if eviction != Eviction::default() {
            debug!(
                too_old = eviction.too_old,
                from_future = eviction.from_future,
                retained = self.samples.len(),
                "evicted samples"
            );
        }

        (&*self.samples.make_contiguous(), eviction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000 + secs, 0).unwrap()
    }

    fn stamps(samples: &[Sample]) -> Vec<DateTime<Utc>> {
        samples.iter().map(|s| s.timestamp).collect()
    }

    #[test]
    fn add_moves_reference_even_backwards() {
        let mut buf = SampleBuffer::new();
        assert_eq!(buf.reference_time(), None);
        buf.add(t(10), 1.0);
        buf.add(t(5), 2.0);
        assert_eq!(buf.reference_time(), Some(t(5)));
        assert_eq!(buf.len(), 2);
    }

    #[test]
    fn sorts_out_of_order_arrivals() {
        let mut buf = SampleBuffer::new();
        for s in [3, 1, 4, 2, 5] {
            buf.add(t(s), s as f64);
        }
        buf.add(t(6), 6.0);
        let (kept, ev) = buf.evict_and_sort(buf.reference_time(), 100.0);
        assert_eq!(stamps(kept), (1..=6).map(t).collect::<Vec<_>>());
        assert_eq!(ev, Eviction::default());
    }

    #[test]
    fn head_eviction_drops_samples_outside_window() {
        let mut buf = SampleBuffer::new();
        for s in [0, 10, 50, 100, 160] {
            buf.add(t(s), 0.0);
        }
        let (kept, ev) = buf.evict_and_sort(buf.reference_time(), 100.0);
        assert_eq!(stamps(kept), vec![t(100), t(160)]);
        assert_eq!(ev.too_old, 3);
    }

    #[test]
    fn sample_exactly_at_window_edge_is_kept() {
        let mut buf = SampleBuffer::new();
        buf.add(t(0), 0.0);
        buf.add(t(100), 1.0);
        let (kept, _) = buf.evict_and_sort(buf.reference_time(), 100.0);
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn rewound_reference_tail_evicts_future_samples() {
        let mut buf = SampleBuffer::new();
        for s in (0..=100).step_by(10) {
            buf.add(t(s), 0.0);
        }
        buf.add(t(50), 0.5);
        buf.add(t(40), 0.4);

        let reference = buf.reference_time();
        let (kept, ev) = buf.evict_and_sort(reference, 100.0);
        assert!(kept.iter().all(|s| s.timestamp <= t(40)));
        assert_eq!(stamps(kept), vec![t(0), t(10), t(20), t(30), t(40), t(40)]);
        assert_eq!(ev.from_future, 7);
    }

    #[test]
    fn retained_samples_satisfy_window_invariant() {
        let mut buf = SampleBuffer::new();
        let offsets = [17, -40, 250, 3, 99, 120, -5, 60, 61, 400, 180, 7];
        for (i, off) in offsets.iter().enumerate() {
            buf.add(t(*off), i as f64);
        }
        let reference = buf.reference_time().unwrap();
        let (kept, _) = buf.evict_and_sort(Some(reference), 90.0);
        for pair in kept.windows(2) {
            assert!(pair[0].timestamp <= pair[1].timestamp);
        }
        for s in kept {
            let age = seconds_between(reference, s.timestamp);
            assert!((0.0..=90.0).contains(&age), "age {} out of window", age);
        }
    }

    #[test]
    fn cap_drops_oldest_inserted() {
        let mut buf = SampleBuffer::with_cap(Some(3));
        for s in 0..5 {
            buf.add(t(s), s as f64);
        }
        assert_eq!(buf.len(), 3);
        let values: Vec<f64> = buf.iter().map(|s| s.value).collect();
        assert_eq!(values, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn unset_reference_keeps_nothing_to_draw() {
        let mut buf = SampleBuffer::new();
        let (kept, ev) = buf.evict_and_sort(None, 10.0);
        assert!(kept.is_empty());
        assert_eq!(ev, Eviction::default());
    }

    #[test]
    fn fractional_seconds() {
        let a = t(0);
        let b = a + TimeDelta::milliseconds(1500);
        assert!((seconds_between(b, a) - 1.5).abs() < 1e-12);
        assert!((seconds_between(a, b) + 1.5).abs() < 1e-12);
    }
}
