use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Millimetres per inch.
pub const MM_PER_INCH: f64 = 25.4;

/// Millimetres per foot.
pub const MM_PER_FOOT: f64 = 304.8;

/// A non-negative length quantity.
///
/// Stored in millimetres, the host's internal length unit. Parsed from
/// quantity strings such as `"8 ft"`, `"3.5 in"`, `"38.1mm"` or `"2'"`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Length(f64);

/// Length units accepted by the quantity parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LengthUnit {
    Millimetre,
    Centimetre,
    Metre,
    Inch,
    Foot,
}

impl LengthUnit {
    /// Size of one unit in millimetres.
    pub fn mm_per_unit(self) -> f64 {
        match self {
            LengthUnit::Millimetre => 1.0,
            LengthUnit::Centimetre => 10.0,
            LengthUnit::Metre => 1000.0,
            LengthUnit::Inch => MM_PER_INCH,
            LengthUnit::Foot => MM_PER_FOOT,
        }
    }

    fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "" | "mm" => Some(LengthUnit::Millimetre),
            "cm" => Some(LengthUnit::Centimetre),
            "m" => Some(LengthUnit::Metre),
            "in" | "\"" => Some(LengthUnit::Inch),
            "ft" | "'" => Some(LengthUnit::Foot),
            _ => None,
        }
    }
}

/// Errors from parsing or constructing a length.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LengthParseError {
    #[error("empty length quantity")]
    Empty,

    #[error("invalid number in length quantity: {input}")]
    InvalidNumber { input: String },

    #[error("unknown length unit: {unit}")]
    UnknownUnit { unit: String },

    #[error("length must be finite and non-negative, got {value} mm")]
    OutOfRange { value: f64 },
}

impl Length {
    /// Zero length.
    pub const ZERO: Length = Length(0.0);

    /// Construct from millimetres.
    pub fn from_mm(mm: f64) -> Result<Self, LengthParseError> {
        if !mm.is_finite() || mm < 0.0 {
            return Err(LengthParseError::OutOfRange { value: mm });
        }
        Ok(Length(mm))
    }

    /// Construct from inches.
    pub fn from_inches(inches: f64) -> Result<Self, LengthParseError> {
        Self::from_mm(inches * MM_PER_INCH)
    }

    /// Construct from feet.
    pub fn from_feet(feet: f64) -> Result<Self, LengthParseError> {
        Self::from_mm(feet * MM_PER_FOOT)
    }

    pub fn as_mm(self) -> f64 {
        self.0
    }

    pub fn as_inches(self) -> f64 {
        self.0 / MM_PER_INCH
    }

    pub fn as_feet(self) -> f64 {
        self.0 / MM_PER_FOOT
    }

    /// Compare two lengths within an absolute millimetre tolerance.
    pub fn approx_eq(self, other: Length, tol_mm: f64) -> bool {
        (self.0 - other.0).abs() <= tol_mm
    }
}

impl FromStr for Length {
    type Err = LengthParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(LengthParseError::Empty);
        }

        let split = s
            .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-' || c == '+'))
            .unwrap_or(s.len());
        let (number, unit) = s.split_at(split);

        let value: f64 = number
            .parse()
            .map_err(|_| LengthParseError::InvalidNumber {
                input: s.to_string(),
            })?;
        let unit = unit.trim();
        let unit = LengthUnit::from_suffix(unit).ok_or_else(|| LengthParseError::UnknownUnit {
            unit: unit.to_string(),
        })?;

        Length::from_mm(value * unit.mm_per_unit())
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = format!("{:.6}", self.0);
        let text = text.trim_end_matches('0').trim_end_matches('.');
        write!(f, "{} mm", text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_feet_and_inches() {
        let eight_feet: Length = "8 ft".parse().unwrap();
        assert!((eight_feet.as_inches() - 96.0).abs() < 1e-9);

        let stud_width: Length = "3.5 in".parse().unwrap();
        assert!((stud_width.as_mm() - 88.9).abs() < 1e-9);

        let quote_feet: Length = "2'".parse().unwrap();
        assert!((quote_feet.as_inches() - 24.0).abs() < 1e-9);
    }

    #[test]
    fn bare_number_is_millimetres() {
        let l: Length = "12.5".parse().unwrap();
        assert_eq!(l.as_mm(), 12.5);
    }

    #[test]
    fn rejects_unknown_unit() {
        let err = "3 furlongs".parse::<Length>().unwrap_err();
        assert_eq!(
            err,
            LengthParseError::UnknownUnit {
                unit: "furlongs".to_string()
            }
        );
    }

    #[test]
    fn rejects_negative() {
        assert!(matches!(
            "-1 in".parse::<Length>(),
            Err(LengthParseError::OutOfRange { .. })
        ));
    }

    #[test]
    fn display_trims_trailing_zeros() {
        let l = Length::from_inches(1.5).unwrap();
        assert_eq!(l.to_string(), "38.1 mm");
        assert_eq!(Length::ZERO.to_string(), "0 mm");
    }
}
