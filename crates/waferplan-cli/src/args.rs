//! Command-line argument definitions for the waferplan CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments describe the wafer and die, tune the placement,
//! select output files and control logging verbosity.
//!
//! Dimensions resolve in three steps: explicit flags win over the
//! `--standard` preset, which wins over the built-in defaults.

use clap::Parser;

use waferplan::{
    placement::PlacementConfig,
    standard::WaferStandard,
    wafer::{DieSpec, WaferSpec},
};

pub const DEFAULT_DIAMETER_MM: f64 = 100.0;
pub const DEFAULT_DIE_SIZE_MM: f64 = 10.0;
pub const DEFAULT_SCRIBE_MM: f64 = 0.1;
pub const DEFAULT_EDGE_EXCLUSION_MM: f64 = 3.0;

/// Command-line arguments for the waferplan tool
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Standard wafer preset (300mm, 200mm, 150mm, 125mm, 100mm, 76mm, 50mm)
    #[arg(long, value_name = "PRESET")]
    pub standard: Option<WaferStandard>,

    /// Wafer diameter in mm
    #[arg(long, value_name = "MM")]
    pub diameter: Option<f64>,

    /// Die width in mm
    #[arg(long, value_name = "MM")]
    pub die_width: Option<f64>,

    /// Die height in mm
    #[arg(long, value_name = "MM")]
    pub die_height: Option<f64>,

    /// Scribe line width in mm
    #[arg(long, value_name = "MM")]
    pub scribe: Option<f64>,

    /// Edge exclusion in mm
    #[arg(long, value_name = "MM")]
    pub edge: Option<f64>,

    /// Flat length in mm
    #[arg(long, value_name = "MM")]
    pub flat_length: Option<f64>,

    /// Notch depth in mm, takes precedence over the flat
    #[arg(long, value_name = "MM")]
    pub notch_depth: Option<f64>,

    /// Maximum number of die positions listed (0 lists all)
    #[arg(long, value_name = "N")]
    pub max_positions: Option<usize>,

    /// Leave partial dies out of the layout
    #[arg(long)]
    pub no_partial: bool,

    /// Shift the grid by half a pitch along X
    #[arg(long)]
    pub align_x: bool,

    /// Shift the grid by half a pitch along Y
    #[arg(long)]
    pub align_y: bool,

    /// Write the layout as GDSII to this path
    #[arg(long, value_name = "PATH")]
    pub gds: Option<String>,

    /// Write an SVG wafer map to this path
    #[arg(long, value_name = "PATH")]
    pub svg: Option<String>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Builds the wafer from the preset and the explicit dimension flags.
    pub fn wafer_spec(&self) -> WaferSpec {
        let base = self.standard.map_or_else(
            || WaferSpec::new(DEFAULT_DIAMETER_MM, DEFAULT_EDGE_EXCLUSION_MM),
            WaferStandard::to_wafer_spec,
        );

        let mut wafer = WaferSpec::new(
            self.diameter.unwrap_or(base.diameter_mm()),
            self.edge.unwrap_or(base.edge_exclusion_mm()),
        )
        .with_flat_length(self.flat_length.unwrap_or(base.flat_length_mm()))
        .with_notch_depth(self.notch_depth.unwrap_or(base.notch_depth_mm()));

        // A flat given on the command line replaces the preset's notch.
        if self.flat_length.is_some() && self.notch_depth.is_none() {
            wafer = wafer.with_notch_depth(0.0);
        }
        wafer
    }

    pub fn die_spec(&self) -> DieSpec {
        DieSpec::new(
            self.die_width.unwrap_or(DEFAULT_DIE_SIZE_MM),
            self.die_height.unwrap_or(DEFAULT_DIE_SIZE_MM),
        )
        .with_scribe(self.scribe.unwrap_or(DEFAULT_SCRIBE_MM))
    }

    /// Applies the placement flags on top of the configured options.
    pub fn placement(&self, base: &PlacementConfig) -> PlacementConfig {
        let mut placement = *base;
        if let Some(max_positions) = self.max_positions {
            placement = placement.with_max_positions(max_positions);
        }
        if self.no_partial {
            placement = placement.with_include_partial(false);
        }
        if self.align_x {
            placement = placement.with_align_x(true);
        }
        if self.align_y {
            placement = placement.with_align_y(true);
        }
        placement
    }
}
