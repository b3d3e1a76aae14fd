//! src/trend/engine.rs
//!
//! The trend graph: owns the sample buffer and the pixel buffer and turns one
//! into the other once per frame.
//!
//! The canvas starts `Idle` (nothing allocated) and becomes `Ready` on the
//! first pass that has a line to draw. It is reallocated only when the
//! configured pixel size no longer matches.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use super::buffer::{Eviction, SampleBuffer};
use super::config::ViewConfig;
use super::mapper;
use crate::error::ConfigError;
use crate::raster::{PixelBuffer, draw_line};
use crate::sinks::{AxisLabels, LabelSink, Presenter};

/// Result of one render pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The buffer was cleared and redrawn with this many segments.
    Drawn { segments: usize },
    /// Fewer than two samples survived eviction; the previous frame stands.
    Skipped { retained: usize },
}

impl RenderOutcome {
    pub fn is_drawn(&self) -> bool {
        matches!(self, RenderOutcome::Drawn { .. })
    }
}

#[derive(Debug)]
pub struct TrendGraph {
    config: ViewConfig,
    samples: SampleBuffer,
    /// `None` while idle; sized to the configured dimensions once ready.
    canvas: Option<PixelBuffer>,
    last_value: Option<f64>,
    value_dirty: bool,
    axis_dirty: bool,
    last_eviction: Eviction,
}

impl TrendGraph {
    /// Build an idle graph. Fails if the configuration is degenerate.
    pub fn new(config: ViewConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            samples: SampleBuffer::with_cap(config.max_samples),
            config,
            canvas: None,
            last_value: None,
            value_dirty: false,
            axis_dirty: true,
            last_eviction: Eviction::default(),
        })
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// Swap in a new configuration. A size change reallocates on the next pass.
    pub fn set_config(&mut self, config: ViewConfig) -> Result<(), ConfigError> {
        config.validate()?;
        info!(
            y_min = config.y_min,
            y_max = config.y_max,
            timebase = config.timebase,
            width = config.pixel_width,
            height = config.pixel_height,
            "trend config updated"
        );
        self.samples.set_cap(config.max_samples);
        self.config = config;
        self.axis_dirty = true;
        self.value_dirty = self.last_value.is_some();
        Ok(())
    }

    /// Record a sample; its timestamp becomes "now" for the graph.
    pub fn add(&mut self, timestamp: DateTime<Utc>, value: f64) {
        self.samples.add(timestamp, value);
        self.last_value = Some(value);
        self.value_dirty = true;
    }

    /// Drop all samples. The last drawn frame is kept.
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn reference_time(&self) -> Option<DateTime<Utc>> {
        self.samples.reference_time()
    }

    pub fn last_value(&self) -> Option<f64> {
        self.last_value
    }

    pub fn last_eviction(&self) -> Eviction {
        self.last_eviction
    }

    /// The most recently drawn frame, if any pass has drawn yet.
    pub fn frame(&self) -> Option<&PixelBuffer> {
        self.canvas.as_ref()
    }

    pub fn is_ready(&self) -> bool {
        self.canvas.is_some()
    }

    pub fn axis_labels(&self) -> AxisLabels {
        AxisLabels {
            y_max: self.config.y_max.to_string(),
            y_min: self.config.y_min.to_string(),
            timebase: self.config.timebase_label.clone(),
            units: self.config.units_label.clone(),
        }
    }

    /// Latest raw value formatted for display.
    pub fn value_label(&self) -> Option<String> {
        self.last_value.map(|v| self.config.value_format.format(v))
    }

    /// Render using the reference time set by the latest `add`.
    pub fn render(&mut self) -> RenderOutcome {
        let reference = self.samples.reference_time();
        self.render_pass(reference)
    }

    /// Render with an explicit reference time for this pass only.
    pub fn render_at(&mut self, now: DateTime<Utc>) -> RenderOutcome {
        self.render_pass(Some(now))
    }

    fn render_pass(&mut self, reference: Option<DateTime<Utc>>) -> RenderOutcome {
        let (samples, eviction) = self.samples.evict_and_sort(reference, self.config.timebase);
        self.last_eviction = eviction;

        let Some(reference) = reference.filter(|_| samples.len() >= 2) else {
            return RenderOutcome::Skipped {
                retained: samples.len(),
            };
        };

        let (w, h) = (self.config.pixel_width, self.config.pixel_height);
        if self
            .canvas
            .as_ref()
            .is_some_and(|buf| buf.dimensions() != (w, h))
        {
            self.canvas = None;
        }
        let background = self.config.background;
        let buf = self.canvas.get_or_insert_with(|| {
            debug!(width = w, height = h, "allocating trend canvas");
            PixelBuffer::new(w, h, background)
        });
        buf.fill(background);

        let mut prev = mapper::map(&samples[0], reference, &self.config);
        for sample in &samples[1..] {
            let next = mapper::map(sample, reference, &self.config);
            draw_line(buf, prev, next, self.config.line_color, self.config.line_width);
            prev = next;
        }

        RenderOutcome::Drawn {
            segments: samples.len() - 1,
        }
    }

    /// One frame tick: push pending labels, render, and present drawn frames.
    pub fn publish<P, L>(&mut self, presenter: &mut P, labels: &mut L) -> RenderOutcome
    where
        P: Presenter + ?Sized,
        L: LabelSink + ?Sized,
    {
        if self.axis_dirty {
            labels.set_axis_labels(&self.axis_labels());
            self.axis_dirty = false;
        }
        if self.value_dirty {
            if let Some(text) = self.value_label() {
                labels.set_value_label(&text);
            }
            self.value_dirty = false;
        }

        let outcome = self.render();
        if outcome.is_drawn()
            && let Some(frame) = self.frame()
        {
            presenter.present(frame);
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::Color;

    fn t(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(1_650_000_000 + secs, 0).unwrap()
    }

    fn small() -> ViewConfig {
        ViewConfig {
            timebase: 10.0,
            pixel_width: 20,
            pixel_height: 10,
            ..ViewConfig::default()
        }
    }

    #[test]
    fn rejects_bad_config_up_front() {
        let cfg = ViewConfig {
            y_min: 1.0,
            y_max: 1.0,
            ..ViewConfig::default()
        };
        assert!(TrendGraph::new(cfg).is_err());
    }

    #[test]
    fn stays_idle_until_a_line_can_be_drawn() {
        let mut g = TrendGraph::new(small()).unwrap();
        assert_eq!(g.render(), RenderOutcome::Skipped { retained: 0 });
        g.add(t(0), 0.5);
        assert_eq!(g.render(), RenderOutcome::Skipped { retained: 1 });
        assert!(!g.is_ready());
        g.add(t(5), 0.5);
        assert_eq!(g.render(), RenderOutcome::Drawn { segments: 1 });
        assert!(g.is_ready());
    }

    #[test]
    fn reallocates_on_size_change_only() {
        let mut g = TrendGraph::new(small()).unwrap();
        g.add(t(0), 0.0);
        g.add(t(1), 1.0);
        g.render();
        assert_eq!(g.frame().unwrap().dimensions(), (20, 10));

        let cfg = ViewConfig {
            pixel_width: 40,
            pixel_height: 30,
            ..small()
        };
        g.set_config(cfg).unwrap();
        // still the old frame until a pass draws
        assert_eq!(g.frame().unwrap().dimensions(), (20, 10));
        g.render();
        assert_eq!(g.frame().unwrap().dimensions(), (40, 30));
    }

    #[test]
    fn set_config_rejects_and_keeps_old() {
        let mut g = TrendGraph::new(small()).unwrap();
        let bad = ViewConfig {
            timebase: -1.0,
            ..small()
        };
        assert!(g.set_config(bad).is_err());
        assert_eq!(g.config().timebase, 10.0);
    }

    #[test]
    fn render_at_overrides_reference_for_the_pass() {
        let mut g = TrendGraph::new(small()).unwrap();
        for s in 0..=8 {
            g.add(t(s), 0.5);
        }
        // pretend "now" is t(4): samples after it are from the future
        let outcome = g.render_at(t(4));
        assert_eq!(outcome, RenderOutcome::Drawn { segments: 4 });
        assert_eq!(g.last_eviction().from_future, 4);
        assert_eq!(g.reference_time(), Some(t(8)));
    }

    #[test]
    fn background_fill_is_used_on_clear() {
        let cfg = ViewConfig {
            background: Color::BLACK,
            line_color: Color::rgb(255, 0, 0),
            ..small()
        };
        let mut g = TrendGraph::new(cfg).unwrap();
        g.add(t(0), 0.0);
        g.add(t(10), 0.0);
        g.render();
        let frame = g.frame().unwrap();
        assert_eq!(frame.get(0, 0), Some(Color::BLACK));
        assert_eq!(frame.get(0, 9), Some(Color::rgb(255, 0, 0)));
        assert_eq!(frame.get(19, 9), Some(Color::rgb(255, 0, 0)));
    }

    #[test]
    fn value_label_uses_configured_format() {
        let cfg = ViewConfig {
            value_format: "F1".parse().unwrap(),
            ..small()
        };
        let mut g = TrendGraph::new(cfg).unwrap();
        assert_eq!(g.value_label(), None);
        g.add(t(0), 0.456);
        assert_eq!(g.value_label().as_deref(), Some("0.5"));
    }
}
