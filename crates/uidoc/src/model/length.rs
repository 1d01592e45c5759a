//! CSS-ish length values used by layer styles and font-size definitions.

use std::fmt;
use std::str::FromStr;

use serde::de::{Deserialize, Deserializer, Error as DeError};
use serde::ser::{Serialize, Serializer};
use thiserror::Error;

/// A dimension value: `16px`, `50%`, `1.5em`, or `auto`.
///
/// Serialized as its display string at the JSON boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    Px(f64),
    Percent(f64),
    Em(f64),
    Auto,
}

/// Error for unparseable length strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid length: {0:?}")]
pub struct LengthParseError(pub String);

impl FromStr for Length {
    type Err = LengthParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("auto") {
            return Ok(Length::Auto);
        }
        let (number, unit) = if let Some(n) = s.strip_suffix("px") {
            (n, Length::Px as fn(f64) -> Length)
        } else if let Some(n) = s.strip_suffix('%') {
            (n, Length::Percent as fn(f64) -> Length)
        } else if let Some(n) = s.strip_suffix("em") {
            (n, Length::Em as fn(f64) -> Length)
        } else {
            return Err(LengthParseError(s.to_string()));
        };
        let value: f64 = number
            .trim()
            .parse()
            .map_err(|_| LengthParseError(s.to_string()))?;
        if !value.is_finite() {
            return Err(LengthParseError(s.to_string()));
        }
        Ok(unit(value))
    }
}

/// Formats a number without a trailing `.0` for whole values.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Length::Px(v) => write!(f, "{}px", format_number(*v)),
            Length::Percent(v) => write!(f, "{}%", format_number(*v)),
            Length::Em(v) => write!(f, "{}em", format_number(*v)),
            Length::Auto => write!(f, "auto"),
        }
    }
}

impl Serialize for Length {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Length {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(DeError::custom)
    }
}
