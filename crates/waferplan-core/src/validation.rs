//! Range validation for raw placement inputs.
//!
//! The placement engine assumes that its inputs have been checked against the
//! ranges below. [`validate`] performs those checks at the input boundary and
//! reports the first parameter that falls outside its range.
//!
//! # Example
//!
//! ```
//! # use waferplan_core::{validation::{self, ValidationError}, wafer::{DieSpec, WaferSpec}};
//! let wafer = WaferSpec::new(500.0, 3.0);
//! let die = DieSpec::new(10.0, 10.0).with_scribe(0.1);
//!
//! let err = validation::validate(&wafer, &die).unwrap_err();
//! assert!(matches!(err, ValidationError::OutOfRange { parameter: "wafer diameter", .. }));
//! ```

use std::ops::RangeInclusive;

use log::debug;
use thiserror::Error;

use crate::wafer::{DieSpec, WaferSpec};

pub const WAFER_DIAMETER_RANGE: RangeInclusive<f64> = 20.0..=450.0;
pub const DIE_SIZE_RANGE: RangeInclusive<f64> = 0.1..=200.0;
pub const SCRIBE_RANGE: RangeInclusive<f64> = 0.0..=5.0;
pub const EDGE_EXCLUSION_RANGE: RangeInclusive<f64> = 0.0..=20.0;

/// A raw input that the placement engine must not be called with.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{parameter} must be a finite number")]
    NotFinite { parameter: &'static str },

    #[error("{parameter} out of range: {value} mm")]
    OutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{parameter} must not be negative: {value} mm")]
    Negative { parameter: &'static str, value: f64 },
}

impl ValidationError {
    /// Returns the name of the offending parameter.
    pub fn parameter(&self) -> &'static str {
        match self {
            Self::NotFinite { parameter }
            | Self::OutOfRange { parameter, .. }
            | Self::Negative { parameter, .. } => parameter,
        }
    }

    /// Returns a short hint describing the accepted values.
    pub fn help(&self) -> String {
        match self {
            Self::NotFinite { parameter } => format!("provide {parameter} as a decimal number"),
            Self::OutOfRange {
                parameter,
                min,
                max,
                ..
            } => format!("{parameter} must be between {min} and {max} mm"),
            Self::Negative { parameter, .. } => format!("{parameter} must be 0 mm or more"),
        }
    }
}

/// Checks wafer and die dimensions against the supported ranges.
///
/// # Errors
///
/// Returns the first [`ValidationError`] found, checking diameter, die
/// width, die height, scribe, edge exclusion, flat length and notch depth in
/// that order.
pub fn validate(wafer: &WaferSpec, die: &DieSpec) -> Result<(), ValidationError> {
    check_range("wafer diameter", wafer.diameter_mm(), WAFER_DIAMETER_RANGE)?;
    check_range("die width", die.width_mm(), DIE_SIZE_RANGE)?;
    check_range("die height", die.height_mm(), DIE_SIZE_RANGE)?;
    check_range("scribe", die.scribe_mm(), SCRIBE_RANGE)?;
    check_range(
        "edge exclusion",
        wafer.edge_exclusion_mm(),
        EDGE_EXCLUSION_RANGE,
    )?;
    check_non_negative("flat length", wafer.flat_length_mm())?;
    check_non_negative("notch depth", wafer.notch_depth_mm())?;

    debug!(
        diameter = wafer.diameter_mm(),
        die_width = die.width_mm(),
        die_height = die.height_mm();
        "Inputs validated"
    );
    Ok(())
}

fn check_range(
    parameter: &'static str,
    value: f64,
    range: RangeInclusive<f64>,
) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite { parameter });
    }
    if !range.contains(&value) {
        return Err(ValidationError::OutOfRange {
            parameter,
            value,
            min: *range.start(),
            max: *range.end(),
        });
    }
    Ok(())
}

fn check_non_negative(parameter: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite { parameter });
    }
    if value < 0.0 {
        return Err(ValidationError::Negative { parameter, value });
    }
    Ok(())
}
