//! Length values and unit-to-pixel resolution

use rustc_hash::FxHashMap;
use serde::Deserialize;
use std::fmt;

/// A physical or CSS length as configured by the host.
///
/// Bare numbers carry pixel semantics; strings carry a magnitude and a
/// trailing unit token (`"8.5in"`, `"30px"`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Length {
    Px(f64),
    Css(String),
}

impl Length {
    /// Split a CSS length string into magnitude and unit token.
    ///
    /// Returns `None` when no leading numeric magnitude can be parsed.
    fn split(value: &str) -> Option<(f32, &str)> {
        let value = value.trim();
        let unit_start = value
            .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-' || c == '+'))
            .unwrap_or(value.len());
        let (magnitude, unit) = value.split_at(unit_start);
        let magnitude: f32 = magnitude.parse().ok()?;
        Some((magnitude, unit.trim()))
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Length::Px(n) => write!(f, "{}", n),
            Length::Css(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Length {
    fn from(px: f64) -> Self {
        Length::Px(px)
    }
}

impl From<&str> for Length {
    fn from(css: &str) -> Self {
        Length::Css(css.to_string())
    }
}

/// Resolves lengths to pixels against the live rendering environment.
///
/// The probe callback reports how many pixels one unit of a token measures in
/// the current environment (the rendering surface realizes a reference element
/// of exactly that size and reads back its resolved extent). Results are
/// cached per unit token so repeated conversions are stable within one
/// converter's lifetime.
#[derive(Debug, Default)]
pub struct UnitConverter {
    px_per_unit: FxHashMap<String, f32>,
}

impl UnitConverter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a length to pixels.
    ///
    /// Unparseable input and unknown units yield `NaN`, which callers must
    /// treat as "no pagination possible" rather than coercing to zero.
    pub fn to_pixels(&mut self, length: &Length, probe: impl Fn(&str) -> f32) -> f32 {
        match length {
            Length::Px(n) => *n as f32,
            Length::Css(value) => match Length::split(value) {
                None => f32::NAN,
                Some((magnitude, "")) => magnitude,
                Some((magnitude, unit)) => {
                    let per_unit = *self
                        .px_per_unit
                        .entry(unit.to_string())
                        .or_insert_with(|| probe(unit));
                    magnitude * per_unit
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn probe_96(unit: &str) -> f32 {
        match unit {
            "in" => 96.0,
            "px" => 1.0,
            _ => f32::NAN,
        }
    }

    #[test]
    fn test_bare_number_passthrough() {
        let mut converter = UnitConverter::new();
        assert_eq!(converter.to_pixels(&Length::Px(42.5), probe_96), 42.5);
    }

    #[test]
    fn test_css_lengths() {
        let mut converter = UnitConverter::new();
        assert_eq!(converter.to_pixels(&"8.5in".into(), probe_96), 816.0);
        assert_eq!(converter.to_pixels(&"30px".into(), probe_96), 30.0);
        // Unitless string keeps pixel semantics
        assert_eq!(converter.to_pixels(&"12".into(), probe_96), 12.0);
    }

    #[test]
    fn test_unparseable_yields_nan() {
        let mut converter = UnitConverter::new();
        assert!(converter.to_pixels(&"in".into(), probe_96).is_nan());
        assert!(converter.to_pixels(&"".into(), probe_96).is_nan());
        assert!(converter.to_pixels(&"10wat".into(), probe_96).is_nan());
    }

    #[test]
    fn test_probe_result_is_cached() {
        let calls = Cell::new(0);
        let probe = |unit: &str| {
            calls.set(calls.get() + 1);
            probe_96(unit)
        };

        let mut converter = UnitConverter::new();
        assert_eq!(converter.to_pixels(&"1in".into(), probe), 96.0);
        assert_eq!(converter.to_pixels(&"2in".into(), probe), 192.0);
        assert_eq!(converter.to_pixels(&"0.5in".into(), probe), 48.0);
        assert_eq!(calls.get(), 1);
    }
}
