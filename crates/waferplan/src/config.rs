//! Configuration types for wafer layout generation.
//!
//! This module provides configuration structures that control how dies are
//! placed, which layers the layout file uses and how wafer maps are styled.
//! All types implement [`serde::Deserialize`] for loading from external
//! sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration combining every section.
//! - [`PlacementConfig`] - Position limit, partial dies and grid alignment.
//! - [`LayerConfig`] - Layer/datatype pairs for the GDSII output.
//! - [`StyleConfig`] - Colors and scale of the SVG wafer map.
//!
//! # Example
//!
//! ```
//! # use waferplan::config::AppConfig;
//! // Use default configuration
//! let config = AppConfig::default();
//! assert!(config.style().full_die_color().is_ok());
//! assert_eq!(config.placement().max_positions(), 1200);
//! ```

use serde::Deserialize;

pub use waferplan_core::{layer::LayerConfig, placement::PlacementConfig};

use waferplan_core::color::Color;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Placement configuration section.
    #[serde(default)]
    placement: PlacementConfig,

    /// Layout-file layer section.
    #[serde(default)]
    layers: LayerConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Returns the placement configuration.
    pub fn placement(&self) -> &PlacementConfig {
        &self.placement
    }

    /// Returns the layer configuration.
    pub fn layers(&self) -> &LayerConfig {
        &self.layers
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Visual styling configuration for SVG wafer maps.
///
/// Colors are kept as strings and parsed on access so that a bad value is
/// reported when it is used.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    full_die_color: String,
    partial_die_color: String,
    wafer_color: String,
    background_color: Option<String>,
    /// Pixels per millimeter.
    scale: f64,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            full_die_color: "#84cc16".to_string(),
            partial_die_color: "#f97316".to_string(),
            wafer_color: "#a0a0a0".to_string(),
            background_color: None,
            scale: 4.0,
        }
    }
}

impl StyleConfig {
    /// Returns a copy with a different scale in pixels per millimeter.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Returns a copy with the given background color string.
    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    /// Returns the fill [`Color`] of full dies.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn full_die_color(&self) -> Result<Color, String> {
        parse_color("full die", &self.full_die_color)
    }

    /// Returns the fill [`Color`] of partial dies.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn partial_die_color(&self) -> Result<Color, String> {
        parse_color("partial die", &self.partial_die_color)
    }

    /// Returns the stroke [`Color`] of the wafer and usable outlines.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn wafer_color(&self) -> Result<Color, String> {
        parse_color("wafer", &self.wafer_color)
    }

    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| parse_color("background", color))
            .transpose()
    }

    /// Returns the scale in pixels per millimeter.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Returns the scale, rejecting values that are not a positive number.
    ///
    /// # Errors
    ///
    /// Returns an error for a zero, negative or non-finite scale.
    pub fn checked_scale(&self) -> Result<f64, String> {
        if self.scale.is_finite() && self.scale > 0.0 {
            Ok(self.scale)
        } else {
            Err(format!(
                "scale must be a positive number of pixels per mm, got {}",
                self.scale
            ))
        }
    }

    /// Checks every color and the scale, reporting the first bad value.
    ///
    /// # Errors
    ///
    /// Returns the message of the first setting that cannot be used.
    pub fn check(&self) -> Result<(), String> {
        self.full_die_color()?;
        self.partial_die_color()?;
        self.wafer_color()?;
        self.background_color()?;
        self.checked_scale()?;
        Ok(())
    }
}

fn parse_color(role: &str, value: &str) -> Result<Color, String> {
    Color::new(value).map_err(|err| format!("Invalid {role} color in config: {err}"))
}
