//! SEMI standard wafer presets.
//!
//! Each [`WaferStandard`] variant names a common wafer size together with the
//! orientation feature and edge exclusion usually specified for it. Wafers of
//! 200 mm and larger use a notch; smaller wafers use a primary flat.

use std::{fmt, str::FromStr};

use thiserror::Error;

use crate::wafer::WaferSpec;

/// Error returned when a preset name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown wafer standard `{name}` (expected one of: {expected})")]
pub struct ParseStandardError {
    name: String,
    expected: String,
}

/// A SEMI standard wafer size.
///
/// # Examples
///
/// ```
/// # use waferplan_core::standard::WaferStandard;
/// let standard: WaferStandard = "150mm".parse().unwrap();
/// let wafer = standard.to_wafer_spec();
///
/// assert_eq!(wafer.diameter_mm(), 150.0);
/// assert_eq!(wafer.flat_length_mm(), 47.5);
/// assert_eq!(wafer.notch_depth_mm(), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WaferStandard {
    Mm300,
    Mm200,
    Mm150,
    Mm125,
    Mm100,
    Mm76,
    Mm50,
}

impl WaferStandard {
    /// All presets, largest first.
    pub const ALL: [WaferStandard; 7] = [
        WaferStandard::Mm300,
        WaferStandard::Mm200,
        WaferStandard::Mm150,
        WaferStandard::Mm125,
        WaferStandard::Mm100,
        WaferStandard::Mm76,
        WaferStandard::Mm50,
    ];

    /// Returns the preset name, for example `"150mm"`.
    pub fn name(self) -> &'static str {
        match self {
            WaferStandard::Mm300 => "300mm",
            WaferStandard::Mm200 => "200mm",
            WaferStandard::Mm150 => "150mm",
            WaferStandard::Mm125 => "125mm",
            WaferStandard::Mm100 => "100mm",
            WaferStandard::Mm76 => "76mm",
            WaferStandard::Mm50 => "50mm",
        }
    }

    pub fn diameter_mm(self) -> f64 {
        match self {
            WaferStandard::Mm300 => 300.0,
            WaferStandard::Mm200 => 200.0,
            WaferStandard::Mm150 => 150.0,
            WaferStandard::Mm125 => 125.0,
            WaferStandard::Mm100 => 100.0,
            WaferStandard::Mm76 => 76.2,
            WaferStandard::Mm50 => 50.8,
        }
    }

    /// Primary flat length, zero for notched sizes.
    pub fn flat_length_mm(self) -> f64 {
        match self {
            WaferStandard::Mm300 | WaferStandard::Mm200 => 0.0,
            WaferStandard::Mm150 => 47.5,
            WaferStandard::Mm125 => 42.5,
            WaferStandard::Mm100 => 32.5,
            WaferStandard::Mm76 => 22.2,
            WaferStandard::Mm50 => 15.9,
        }
    }

    /// Notch depth, zero for flatted sizes.
    pub fn notch_depth_mm(self) -> f64 {
        match self {
            WaferStandard::Mm300 | WaferStandard::Mm200 => 1.0,
            _ => 0.0,
        }
    }

    pub fn edge_exclusion_mm(self) -> f64 {
        match self {
            WaferStandard::Mm76 | WaferStandard::Mm50 => 2.5,
            _ => 3.0,
        }
    }

    /// Builds the [`WaferSpec`] described by this preset.
    pub fn to_wafer_spec(self) -> WaferSpec {
        WaferSpec::new(self.diameter_mm(), self.edge_exclusion_mm())
            .with_flat_length(self.flat_length_mm())
            .with_notch_depth(self.notch_depth_mm())
    }
}

impl fmt::Display for WaferStandard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WaferStandard {
    type Err = ParseStandardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        WaferStandard::ALL
            .into_iter()
            .find(|standard| standard.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseStandardError {
                name: s.to_string(),
                expected: WaferStandard::ALL
                    .iter()
                    .map(|standard| standard.name())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}
