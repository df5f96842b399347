//! # Length Units
//!
//! Every length leaves the pipeline in millimeters. Measurements arrive as form
//! text in one of five units and are normalized here with a fixed factor table.
//!
//! ## Fail-to-zero
//!
//! [`parse_and_convert`] never fails: text that does not parse as a finite
//! number converts as `0`. Validation belongs to the form layer (see
//! [`crate::validation`]) and to the external engine.
//!
//! ## Example
//!
//! ```rust
//! use fenestra_core::units::{parse_and_convert, to_millimeters, LengthUnit};
//!
//! assert_eq!(to_millimeters(2.0, LengthUnit::M).0, 2000.0);
//! assert_eq!(parse_and_convert("90", LengthUnit::Cm).0, 900.0);
//! assert_eq!(parse_and_convert("abc", LengthUnit::Ft).0, 0.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{GlazingError, GlazingResult};

/// Length unit chosen for a whole measurement batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    /// Millimeters (canonical)
    #[default]
    Mm,
    /// Centimeters
    Cm,
    /// Meters
    M,
    /// Feet
    Ft,
    /// Inches
    In,
}

impl LengthUnit {
    /// All units for UI selection
    pub const ALL: [LengthUnit; 5] = [
        LengthUnit::Mm,
        LengthUnit::Cm,
        LengthUnit::M,
        LengthUnit::Ft,
        LengthUnit::In,
    ];

    /// Multiplicative factor to millimeters
    pub fn factor_to_mm(self) -> f64 {
        match self {
            LengthUnit::Mm => 1.0,
            LengthUnit::Cm => 10.0,
            LengthUnit::M => 1000.0,
            LengthUnit::Ft => 304.8,
            LengthUnit::In => 25.4,
        }
    }

    /// Short symbol (e.g., "mm")
    pub fn symbol(self) -> &'static str {
        match self {
            LengthUnit::Mm => "mm",
            LengthUnit::Cm => "cm",
            LengthUnit::M => "m",
            LengthUnit::Ft => "ft",
            LengthUnit::In => "in",
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> GlazingResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "mm" | "millimeter" | "millimeters" | "millimetre" | "millimetres" => Ok(LengthUnit::Mm),
            "cm" | "centimeter" | "centimeters" | "centimetre" | "centimetres" => Ok(LengthUnit::Cm),
            "m" | "meter" | "meters" | "metre" | "metres" => Ok(LengthUnit::M),
            "ft" | "foot" | "feet" | "'" => Ok(LengthUnit::Ft),
            "in" | "inch" | "inches" | "\"" => Ok(LengthUnit::In),
            _ => Err(GlazingError::unknown_unit(s)),
        }
    }
}

impl std::fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl std::str::FromStr for LengthUnit {
    type Err = GlazingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LengthUnit::from_str_flexible(s)
    }
}

/// Length in millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

impl Millimeters {
    /// Get the raw f64 value
    pub fn value(self) -> f64 {
        self.0
    }
}

/// Convert a value in `unit` to millimeters.
pub fn to_millimeters(value: f64, unit: LengthUnit) -> Millimeters {
    Millimeters(value * unit.factor_to_mm())
}

/// Parse form text as a number and convert it; unparseable text converts as zero.
///
/// The text must be a bare number: a trailing unit such as `"120cm"` or
/// `"4'"` does not parse and also yields `0`. The unit comes from `unit` alone.
pub fn parse_and_convert(text: &str, unit: LengthUnit) -> Millimeters {
    let value = parse_number(text).unwrap_or_else(|| {
        if !text.trim().is_empty() {
            tracing::debug!(text, "unparseable length, using 0");
        }
        0.0
    });
    to_millimeters(value, unit)
}

/// Parse trimmed form text as a finite number.
pub fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a count field, falling back to `default` when the text is
/// unparseable or zero.
pub fn parse_count_or(text: &str, default: f64) -> f64 {
    match parse_number(text) {
        Some(v) if v != 0.0 => v,
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factor_table() {
        assert_eq!(to_millimeters(1.0, LengthUnit::Mm).0, 1.0);
        assert_eq!(to_millimeters(1.0, LengthUnit::Cm).0, 10.0);
        assert_eq!(to_millimeters(1.0, LengthUnit::M).0, 1000.0);
        assert_eq!(to_millimeters(1.0, LengthUnit::Ft).0, 304.8);
        assert_eq!(to_millimeters(1.0, LengthUnit::In).0, 25.4);
    }

    #[test]
    fn test_conversion_is_linear() {
        for unit in LengthUnit::ALL {
            for v in [0.5, 1.0, 37.0, 1234.5] {
                let single = to_millimeters(v, unit).0;
                let double = to_millimeters(2.0 * v, unit).0;
                assert!((double - 2.0 * single).abs() < 1e-9, "{unit} {v}");
            }
        }
    }

    #[test]
    fn test_fail_to_zero() {
        for unit in LengthUnit::ALL {
            assert_eq!(parse_and_convert("", unit).0, 0.0);
            assert_eq!(parse_and_convert("abc", unit).0, 0.0);
            assert_eq!(parse_and_convert("NaN", unit).0, 0.0);
            assert_eq!(parse_and_convert("12abc", unit).0, 0.0);
        }
    }

    #[test]
    fn test_trailing_unit_suffix_yields_zero() {
        assert_eq!(parse_and_convert("120cm", LengthUnit::Cm).0, 0.0);
        assert_eq!(parse_and_convert("4'", LengthUnit::Ft).0, 0.0);
        assert_eq!(parse_and_convert("120", LengthUnit::Cm).0, 1200.0);
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(parse_and_convert("  1.5 ", LengthUnit::M).0, 1500.0);
    }

    #[test]
    fn test_parse_count_or() {
        assert_eq!(parse_count_or("3", 1.0), 3.0);
        assert_eq!(parse_count_or("", 1.0), 1.0);
        assert_eq!(parse_count_or("0", 1.0), 1.0);
        assert_eq!(parse_count_or("x", 4.0), 4.0);
    }

    #[test]
    fn test_flexible_parsing() {
        assert_eq!(LengthUnit::from_str_flexible("Feet").unwrap(), LengthUnit::Ft);
        assert_eq!(LengthUnit::from_str_flexible(" CM ").unwrap(), LengthUnit::Cm);
        assert_eq!("\"".parse::<LengthUnit>().unwrap(), LengthUnit::In);
        assert!(LengthUnit::from_str_flexible("yd").is_err());
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&LengthUnit::Ft).unwrap();
        assert_eq!(json, "\"ft\"");
        let mm = Millimeters(1200.0);
        assert_eq!(serde_json::to_string(&mm).unwrap(), "1200.0");
    }
}
