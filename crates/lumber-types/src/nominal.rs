//! Nominal lumber sizes and their actual finished dimensions.
//!
//! A nominal code such as `2x4` names a rough-cut size. The finished board is
//! smaller: a 2x4 is 1.5" x 3.5". The first token is the depth code (the
//! board's height), the second is the width code.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Nominal code to actual finished dimension in inches.
pub const NOMINAL_TO_ACTUAL: [(&str, f64); 8] = [
    ("1", 0.75),
    ("2", 1.5),
    ("3", 2.5),
    ("4", 3.5),
    ("6", 5.5),
    ("8", 7.25),
    ("10", 9.25),
    ("12", 11.25),
];

/// Look up the actual inch dimension for a single nominal code.
pub fn actual_inches(code: &str) -> Option<f64> {
    NOMINAL_TO_ACTUAL
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, inches)| *inches)
}

/// Standard nominal lumber size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum NominalSize {
    L1x2,
    L1x3,
    L1x4,
    L1x6,
    L1x8,
    L1x10,
    L1x12,
    L2x2,
    L2x3,
    #[default]
    L2x4,
    L2x6,
    L2x8,
    L2x10,
    L2x12,
    L4x4,
    L4x6,
    L6x6,
}

/// Error from parsing a nominal size code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown nominal lumber size: {code}")]
pub struct SizeParseError {
    pub code: String,
}

impl NominalSize {
    /// Every supported size, in the order offered to the property editor.
    pub const ALL: [NominalSize; 17] = [
        NominalSize::L1x2,
        NominalSize::L1x3,
        NominalSize::L1x4,
        NominalSize::L1x6,
        NominalSize::L1x8,
        NominalSize::L1x10,
        NominalSize::L1x12,
        NominalSize::L2x2,
        NominalSize::L2x3,
        NominalSize::L2x4,
        NominalSize::L2x6,
        NominalSize::L2x8,
        NominalSize::L2x10,
        NominalSize::L2x12,
        NominalSize::L4x4,
        NominalSize::L4x6,
        NominalSize::L6x6,
    ];

    /// The nominal code, e.g. `"2x4"`.
    pub fn code(self) -> &'static str {
        match self {
            NominalSize::L1x2 => "1x2",
            NominalSize::L1x3 => "1x3",
            NominalSize::L1x4 => "1x4",
            NominalSize::L1x6 => "1x6",
            NominalSize::L1x8 => "1x8",
            NominalSize::L1x10 => "1x10",
            NominalSize::L1x12 => "1x12",
            NominalSize::L2x2 => "2x2",
            NominalSize::L2x3 => "2x3",
            NominalSize::L2x4 => "2x4",
            NominalSize::L2x6 => "2x6",
            NominalSize::L2x8 => "2x8",
            NominalSize::L2x10 => "2x10",
            NominalSize::L2x12 => "2x12",
            NominalSize::L4x4 => "4x4",
            NominalSize::L4x6 => "4x6",
            NominalSize::L6x6 => "6x6",
        }
    }

    /// All codes as owned strings, for enumeration properties.
    pub fn codes() -> Vec<String> {
        Self::ALL.iter().map(|s| s.code().to_string()).collect()
    }

    /// Depth (first) token of the code.
    pub fn depth_code(self) -> &'static str {
        self.split().0
    }

    /// Width (second) token of the code.
    pub fn width_code(self) -> &'static str {
        self.split().1
    }

    /// Actual finished height in inches (from the depth code).
    pub fn actual_height_inches(self) -> f64 {
        actual_inches(self.depth_code()).unwrap_or_default()
    }

    /// Actual finished width in inches (from the width code).
    pub fn actual_width_inches(self) -> f64 {
        actual_inches(self.width_code()).unwrap_or_default()
    }

    fn split(self) -> (&'static str, &'static str) {
        // Every code contains exactly one 'x'.
        self.code().split_once('x').unwrap_or(("", ""))
    }
}

impl fmt::Display for NominalSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for NominalSize {
    type Err = SizeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|size| size.code() == s)
            .ok_or_else(|| SizeParseError {
                code: s.to_string(),
            })
    }
}
