//! Error adapter for converting WaferplanError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use waferplan::WaferplanError;

/// Adapter giving a [`WaferplanError`] a diagnostic code and help text.
pub struct ErrorAdapter<'a>(pub &'a WaferplanError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            WaferplanError::Io(_) => "waferplan::io",
            WaferplanError::Validation(_) => "waferplan::validation",
            WaferplanError::Placement(_) => "waferplan::placement",
            WaferplanError::Config(_) => "waferplan::config",
            WaferplanError::Export(_) => "waferplan::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.0 {
            WaferplanError::Validation(err) => Some(Box::new(err.help())),
            WaferplanError::Config(_) => Some(Box::new(
                "check the file given with --config, waferplan/config.toml or the user config directory",
            )),
            _ => None,
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// Convert a [`WaferplanError`] into a reportable diagnostic.
pub fn to_reportable(err: &WaferplanError) -> ErrorAdapter<'_> {
    ErrorAdapter(err)
}
