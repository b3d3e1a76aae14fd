//! src/trend/mapper.rs
//!
//! Pure mapping from `(time, value)` samples to pixel coordinates.

use chrono::{DateTime, Utc};

use super::buffer::{Sample, seconds_between};
use super::config::ViewConfig;

/// Clamp into `[0, 1]`. Infinities saturate to their edge; NaN pins to 0.
fn clamp01(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

/// Normalized position: `(time, value)` both in `[0, 1]`.
///
/// Time is 0 at the oldest edge of the window and 1 at `reference`.
/// Value is 0 at `y_min` and 1 at `y_max`.
pub fn normalize(sample: &Sample, reference: DateTime<Utc>, config: &ViewConfig) -> (f64, f64) {
    let age = seconds_between(reference, sample.timestamp);
    let norm_time = clamp01(1.0 - age / config.timebase);

    let span = config.value_span();
    let norm_value = if span > 0.0 {
        clamp01((sample.value - config.y_min) / span)
    } else {
        0.0
    };

    (norm_time, norm_value)
}

/// Pixel coordinates of a sample. Row 0 is the top, so the value axis is flipped.
///
/// Results always fall inside `[0, pixel_width) x [0, pixel_height)`: the
/// full-scale edge (`norm == 1`) lands on the last column/row.
pub fn map(sample: &Sample, reference: DateTime<Utc>, config: &ViewConfig) -> (i32, i32) {
    let (norm_time, norm_value) = normalize(sample, reference, config);
    let w = config.pixel_width.max(1);
    let h = config.pixel_height.max(1);

    let px = (w as f64 * norm_time).round() as i64;
    let py = (h as f64 * (1.0 - norm_value)).round() as i64;

    let px = px.clamp(0, w as i64 - 1) as i32;
    let py = py.clamp(0, h as i64 - 1) as i32;
    (px, py)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(1_600_000_000 + secs, 0).unwrap()
    }

    fn cfg() -> ViewConfig {
        ViewConfig {
            y_min: 0.0,
            y_max: 1.0,
            timebase: 100.0,
            pixel_width: 200,
            pixel_height: 100,
            ..ViewConfig::default()
        }
    }

    #[test]
    fn window_corners_map_to_buffer_corners() {
        let c = cfg();
        let oldest_low = map(&Sample::new(t(0), 0.0), t(100), &c);
        let newest_high = map(&Sample::new(t(100), 1.0), t(100), &c);
        assert_eq!(oldest_low, (0, 99));
        assert_eq!(newest_high, (199, 0));
    }

    #[test]
    fn midpoint_rounds() {
        let c = cfg();
        assert_eq!(map(&Sample::new(t(50), 0.5), t(100), &c), (100, 50));
        let (nt, nv) = normalize(&Sample::new(t(75), 0.25), t(100), &c);
        assert!((nt - 0.75).abs() < 1e-12);
        assert!((nv - 0.25).abs() < 1e-12);
    }

    #[test]
    fn out_of_window_samples_are_pinned_inside() {
        let c = cfg();
        let cases = [
            Sample::new(t(-500), 9.0),
            Sample::new(t(400), -9.0),
            Sample::new(t(50), f64::NAN),
            Sample::new(t(50), f64::INFINITY),
        ];
        for s in cases {
            let (x, y) = map(&s, t(100), &c);
            assert!((0..200).contains(&x), "x {} for {:?}", x, s);
            assert!((0..100).contains(&y), "y {} for {:?}", y, s);
        }
    }

    #[test]
    fn infinities_saturate_to_their_edge() {
        let c = cfg();
        assert_eq!(map(&Sample::new(t(100), f64::INFINITY), t(100), &c), (199, 0));
        assert_eq!(map(&Sample::new(t(100), f64::NEG_INFINITY), t(100), &c), (199, 99));
        assert_eq!(map(&Sample::new(t(100), f64::NAN), t(100), &c), (199, 99));
    }

    #[test]
    fn mapping_is_deterministic() {
        let c = cfg();
        let s = Sample::new(t(33), 0.417);
        let first = map(&s, t(100), &c);
        for _ in 0..10 {
            assert_eq!(map(&s, t(100), &c), first);
        }
    }
}
