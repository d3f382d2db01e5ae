//! Export functionality for wafer layouts.
//!
//! This module provides the [`Exporter`] trait that defines the interface for
//! converting a computed [`LayoutResult`] into an output format. It is the
//! final stage of the waferplan pipeline.
//!
//! # Pipeline Position
//!
//! ```text
//! WaferSpec + DieSpec
//!     ↓ validate
//! Checked Inputs
//!     ↓ place
//! LayoutResult
//!     ↓ export (this module)
//! Output File
//! ```
//!
//! # Available Backends
//!
//! - [`gds`]: GDSII stream output via [`gds::GdsEncoder`] and [`gds::Gds`]
//! - [`svg`]: SVG wafer map via [`svg::SvgBuilder`] and [`svg::Svg`]
//!
//! # Error Handling
//!
//! Export operations return [`Error`], covering rendering failures,
//! coordinates that do not fit the target format and I/O errors. [`Error`]
//! converts into [`WaferplanError::Export`] at the crate boundary.
//!
//! [`WaferplanError::Export`]: crate::WaferplanError::Export

/// GDSII stream export backend.
pub mod gds;

/// SVG wafer map backend.
pub mod svg;

use crate::placement::LayoutResult;

/// Abstraction for layout export backends.
///
/// Implementors convert a [`LayoutResult`] into a specific output format and
/// write it to their configured destination.
pub trait Exporter {
    /// Exports a placement result to the backend's output format.
    ///
    /// # Arguments
    ///
    /// * `result` - The placement to export. Only its recorded positions are
    ///   drawn.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] or [`Error::Overflow`] if the result cannot
    /// be converted to the target format, or [`Error::Io`] if writing the
    /// output fails.
    fn export_layout(&mut self, result: &LayoutResult) -> Result<(), Error>;
}

/// Errors that can occur during layout export.
///
/// This type is converted into [`WaferplanError::Export`] at the crate
/// boundary via the [`From`] implementation in [`crate::error`].
///
/// [`WaferplanError::Export`]: crate::WaferplanError::Export
#[derive(Debug)]
pub enum Error {
    /// A rendering or conversion failure described by `message`.
    Render(String),
    /// A coordinate in millimeters that does not fit a database unit.
    Overflow(f64),
    /// An I/O error encountered while writing output.
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Overflow(value) => {
                write!(f, "Coordinate {value} mm does not fit a database unit")
            }
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) | Self::Overflow(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}
