//! Waferplan - die-per-wafer placement for semiconductor wafers.
//!
//! Centered-grid die placement on circular wafers with edge exclusion and an
//! optional flat or notch, together with GDSII and SVG export of the result.
//!
//! The crate re-exports the input types from `waferplan-core`, so most users
//! only need this crate.

pub mod config;
pub mod export;
pub mod placement;
pub mod report;

mod error;

pub use waferplan_core::{color, geometry, layer, standard, validation, wafer};

pub use error::WaferplanError;

use log::{debug, info};

use config::AppConfig;
use export::{Exporter, gds, svg::SvgBuilder};
use placement::{LayoutResult, PlacementConfig};
use wafer::{DieSpec, WaferSpec};

/// Builder for computing and exporting wafer layouts.
///
/// This provides an API for taking wafer and die descriptions through
/// validation, placement and export.
///
/// # Examples
///
/// ```rust
/// use waferplan::{WaferPlanner, config::AppConfig, wafer::{DieSpec, WaferSpec}};
///
/// let planner = WaferPlanner::new(AppConfig::default());
///
/// let wafer = WaferSpec::new(150.0, 3.0).with_flat_length(47.5);
/// let die = DieSpec::new(20.0, 15.0).with_scribe(0.1);
///
/// // Validate the inputs and place dies
/// let result = planner.calculate(&wafer, &die)
///     .expect("Failed to calculate");
///
/// // Render the layout as a wafer map
/// let svg = planner.render_svg(&result)
///     .expect("Failed to render");
/// assert!(svg.starts_with("<svg"));
/// ```
#[derive(Debug, Default)]
pub struct WaferPlanner {
    config: AppConfig,
}

impl WaferPlanner {
    /// Create a new planner with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including placement, layer and style settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration this planner uses.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Validate the inputs and place dies with the configured placement options.
    ///
    /// # Errors
    ///
    /// Returns [`WaferplanError::Validation`] if an input is out of range.
    pub fn calculate(
        &self,
        wafer: &WaferSpec,
        die: &DieSpec,
    ) -> Result<LayoutResult, WaferplanError> {
        self.calculate_with(wafer, die, self.config.placement())
    }

    /// Validate the inputs and place dies with explicit placement options.
    ///
    /// # Errors
    ///
    /// Returns [`WaferplanError::Validation`] if an input is out of range.
    pub fn calculate_with(
        &self,
        wafer: &WaferSpec,
        die: &DieSpec,
        placement: &PlacementConfig,
    ) -> Result<LayoutResult, WaferplanError> {
        info!(
            diameter = wafer.diameter_mm(),
            die_width = die.width_mm(),
            die_height = die.height_mm();
            "Calculating wafer layout"
        );
        validation::validate(wafer, die)?;

        let result = placement::place(wafer, die, placement)?;
        debug!(
            full_dies = result.full_dies(),
            partial_dies = result.partial_dies();
            "Layout calculated"
        );
        Ok(result)
    }

    /// Encode a layout as a GDSII stream using the configured layers.
    ///
    /// Only the recorded positions are written; calculate with an unlimited
    /// [`PlacementConfig`] to export every die.
    ///
    /// # Errors
    ///
    /// Returns [`WaferplanError::Export`] if a coordinate cannot be
    /// represented in the stream.
    pub fn render_gds(&self, result: &LayoutResult) -> Result<Vec<u8>, WaferplanError> {
        let bytes = gds::encode(result, self.config.layers())?;
        info!(bytes = bytes.len(); "GDSII rendered successfully");
        Ok(bytes)
    }

    /// Render a layout as an SVG wafer map string.
    ///
    /// # Errors
    ///
    /// Returns [`WaferplanError::Export`] for an invalid style or a write
    /// failure.
    pub fn render_svg(&self, result: &LayoutResult) -> Result<String, WaferplanError> {
        let mut svg_exporter = SvgBuilder::new(Vec::<u8>::new())
            .with_style(self.config.style())
            .build()?;

        svg_exporter.export_layout(result)?;

        let svg_string = String::from_utf8(svg_exporter.into_inner())
            .map_err(|err| WaferplanError::Export(Box::new(err)))?;

        info!("SVG rendered successfully");
        Ok(svg_string)
    }
}
