//! src/trend/config.rs
//!
//! View configuration for a trend graph: value range, time window, label text,
//! stroke, and target pixel size.
//!
//! Set once or rarely by the host. Every constructor path goes through
//! [`ViewConfig::validate`] so degenerate ranges are reported up front and never
//! reach a render pass.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::format::ValueFormat;
use crate::error::ConfigError;
use crate::raster::Color;

/// Largest accepted pixel width or height.
pub const MAX_PIXEL_SIDE: u32 = 4096;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Value mapped to the bottom row.
    pub y_min: f64,

    /// Value mapped to the top row.
    pub y_max: f64,

    /// Visible window length, in seconds, ending at the reference time.
    pub timebase: f64,

    /// Caption for the oldest edge of the window (e.g. "-5 min"). Kept in
    /// sync with `timebase` by whoever writes the config.
    pub timebase_label: String,

    /// Units caption shown next to the value.
    pub units_label: String,

    /// Format for the live value label.
    pub value_format: ValueFormat,

    pub line_color: Color,

    /// Fill used when a pass clears the buffer.
    pub background: Color,

    /// Stroke thickness: 1 = single row, 2 adds a row above, 3+ adds one below too.
    pub line_width: u32,

    pub pixel_width: u32,
    pub pixel_height: u32,

    /// Optional memory bound on buffered samples between render passes.
    pub max_samples: Option<usize>,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            y_min: 0.0,
            y_max: 1.0,
            timebase: 300.0,
            timebase_label: "-5 min".to_string(),
            units_label: "F".to_string(),
            value_format: ValueFormat::Integer(3),
            line_color: Color::WHITE,
            background: Color::TRANSPARENT,
            line_width: 1,
            pixel_width: 256,
            pixel_height: 256,
            max_samples: None,
        }
    }
}

impl ViewConfig {
    /// Check the invariants the mapper and rasterizer rely on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.y_min.is_finite() && self.y_max.is_finite() && self.y_max > self.y_min) {
            return Err(ConfigError::EmptyValueRange {
                y_min: self.y_min,
                y_max: self.y_max,
            });
        }
        if !(self.timebase.is_finite() && self.timebase > 0.0) {
            return Err(ConfigError::Timebase(self.timebase));
        }
        let side = 1..=MAX_PIXEL_SIDE;
        if !(side.contains(&self.pixel_width) && side.contains(&self.pixel_height)) {
            return Err(ConfigError::Dimensions {
                width: self.pixel_width,
                height: self.pixel_height,
            });
        }
        if self.line_width == 0 {
            return Err(ConfigError::LineWidth);
        }
        if let Some(cap) = self.max_samples
            && cap < 2
        {
            return Err(ConfigError::SampleCap(cap));
        }
        Ok(())
    }

    /// Parse a TOML document; missing keys fall back to defaults.
    pub fn from_toml(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let cfg: ViewConfig = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read and validate a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text, path)
    }

    /// Height of the value range (`y_max - y_min`).
    pub fn value_span(&self) -> f64 {
        self.y_max - self.y_min
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        ViewConfig::default().validate().unwrap();
    }

    #[test]
    fn rejects_degenerate_values() {
        let base = ViewConfig::default();

        let cfg = ViewConfig {
            y_max: 0.0,
            ..base.clone()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::EmptyValueRange { .. })));

        let cfg = ViewConfig {
            y_min: 2.0,
            ..base.clone()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::EmptyValueRange { .. })));

        let cfg = ViewConfig {
            timebase: 0.0,
            ..base.clone()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::Timebase(_))));

        let cfg = ViewConfig {
            timebase: f64::NAN,
            ..base.clone()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::Timebase(_))));

        let cfg = ViewConfig {
            pixel_height: 0,
            ..base.clone()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::Dimensions { .. })));

        let cfg = ViewConfig {
            line_width: 0,
            ..base.clone()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::LineWidth)));

        let cfg = ViewConfig {
            max_samples: Some(1),
            ..base
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::SampleCap(1))));
    }

    #[test]
    fn caps_pixel_dimensions() {
        let base = ViewConfig::default();

        let cfg = ViewConfig {
            pixel_width: u32::MAX,
            ..base.clone()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::Dimensions { .. })));

        let cfg = ViewConfig {
            pixel_height: MAX_PIXEL_SIDE + 1,
            ..base.clone()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::Dimensions { .. })));

        let cfg = ViewConfig {
            pixel_width: MAX_PIXEL_SIDE,
            pixel_height: MAX_PIXEL_SIDE,
            ..base
        };
        cfg.validate().unwrap();

        let err = ViewConfig::from_toml("pixel_width = 100000\n", Path::new("x.toml"));
        assert!(matches!(err, Err(ConfigError::Dimensions { .. })));
    }

    #[test]
    fn loads_partial_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r##"
y_min = -120.0
y_max = 0.0
timebase = 60.0
timebase_label = "-1 min"
units_label = "dBm"
value_format = "F1"
line_color = "#00ff00"
line_width = 2
"##
        )
        .unwrap();

        let cfg = ViewConfig::load(file.path()).unwrap();
        assert_eq!(cfg.y_min, -120.0);
        assert_eq!(cfg.timebase_label, "-1 min");
        assert_eq!(cfg.value_format, ValueFormat::Fixed(1));
        assert_eq!(cfg.line_color, Color::rgb(0, 255, 0));
        assert_eq!(cfg.line_width, 2);
        // untouched keys keep their defaults
        assert_eq!(cfg.pixel_width, 256);
        assert_eq!(cfg.background, Color::TRANSPARENT);
    }

    #[test]
    fn load_reports_bad_values_and_missing_files() {
        let err = ViewConfig::from_toml("y_min = 1.0\ny_max = 1.0\n", Path::new("x.toml"));
        assert!(matches!(err, Err(ConfigError::EmptyValueRange { .. })));

        let err = ViewConfig::from_toml("value_format = \"Q\"\n", Path::new("x.toml"));
        assert!(matches!(err, Err(ConfigError::Parse { .. })));

        let err = ViewConfig::load("/definitely/not/here.toml");
        assert!(matches!(err, Err(ConfigError::Read { .. })));
    }
}
