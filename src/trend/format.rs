//! src/trend/format.rs
//!
//! Numeric format used for the live value label.
//!
//! The accepted vocabulary is a short letter + precision code:
//! `F2` -> `3.14`, `D3` -> `003`, `E2` -> `3.14e0`, `G` -> shortest form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ValueFormat {
    /// Fixed number of decimals.
    Fixed(usize),
    /// Rounded to an integer, zero-padded to at least this many digits.
    Integer(usize),
    /// Scientific notation with this many decimals.
    Exponent(usize),
    /// Shortest representation that round-trips.
    General,
}

impl ValueFormat {
    pub fn format(&self, value: f64) -> String {
        if !value.is_finite() {
            return value.to_string();
        }
        match *self {
            ValueFormat::Fixed(n) => format!("{:.*}", n, value),
            ValueFormat::Integer(n) => {
                let rounded = value.round() as i64;
                if rounded < 0 {
                    format!("-{:0width$}", rounded.unsigned_abs(), width = n)
                } else {
                    format!("{:0width$}", rounded, width = n)
                }
            }
            ValueFormat::Exponent(n) => format!("{:.*e}", n, value),
            ValueFormat::General => value.to_string(),
        }
    }
}

impl Default for ValueFormat {
    fn default() -> Self {
        ValueFormat::Integer(3)
    }
}

impl FromStr for ValueFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let spec = s.trim();
        let bad = || ConfigError::ValueFormat(s.to_string());
        let mut chars = spec.chars();
        let kind = chars.next().ok_or_else(bad)?.to_ascii_uppercase();
        let digits = chars.as_str();
        let precision = |default: usize| -> Result<usize, ConfigError> {
            if digits.is_empty() {
                Ok(default)
            } else {
                digits.parse::<usize>().ok().filter(|&n| n <= 17).ok_or_else(bad)
            }
        };
        match kind {
            'F' => Ok(ValueFormat::Fixed(precision(2)?)),
            'D' => Ok(ValueFormat::Integer(precision(1)?)),
            'E' => Ok(ValueFormat::Exponent(precision(6)?)),
            'G' if digits.is_empty() => Ok(ValueFormat::General),
            _ => Err(bad()),
        }
    }
}

impl fmt::Display for ValueFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueFormat::Fixed(n) => write!(f, "F{}", n),
            ValueFormat::Integer(n) => write!(f, "D{}", n),
            ValueFormat::Exponent(n) => write!(f, "E{}", n),
            ValueFormat::General => f.write_str("G"),
        }
    }
}

impl TryFrom<String> for ValueFormat {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ValueFormat> for String {
    fn from(value: ValueFormat) -> Self {
        value.to_string()
    }
}
