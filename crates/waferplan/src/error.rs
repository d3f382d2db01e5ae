//! Error types for waferplan operations.
//!
//! This module provides the main error type [`WaferplanError`] which wraps
//! the error conditions that can occur while validating inputs, placing dies
//! and exporting layouts.

use std::io;

use thiserror::Error;

use waferplan_core::validation::ValidationError;

/// The main error type for waferplan operations.
#[derive(Debug, Error)]
pub enum WaferplanError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("Placement error: {0}")]
    Placement(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),
}

impl From<crate::export::Error> for WaferplanError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl WaferplanError {
    /// Returns the validation failure, if this error is one.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}
