//! CLI logic for the waferplan tool.
//!
//! This module contains the core CLI logic: it resolves the wafer and die
//! from the arguments, runs the placement and writes the requested outputs.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{
    fs,
    io::{self, Write},
};

use log::info;

use waferplan::{WaferPlanner, WaferplanError, report::LayoutReport};

/// Run the waferplan CLI application, printing the report to stdout.
///
/// # Errors
///
/// Returns `WaferplanError` for:
/// - Configuration loading errors
/// - Out-of-range dimensions
/// - Export errors
/// - File I/O errors
pub fn run(args: &Args) -> Result<(), WaferplanError> {
    let stdout = io::stdout();
    run_with_output(args, &mut stdout.lock())
}

/// Run the waferplan CLI application, printing the report to `out`.
///
/// # Errors
///
/// See [`run`].
pub fn run_with_output(args: &Args, out: &mut impl Write) -> Result<(), WaferplanError> {
    let app_config = config::load_config(args.config.as_ref())?;
    let placement = args.placement(app_config.placement());
    let planner = WaferPlanner::new(app_config);

    let wafer = args.wafer_spec();
    let die = args.die_spec();
    info!(
        diameter = wafer.diameter_mm(),
        die_width = die.width_mm(),
        die_height = die.height_mm();
        "Processing wafer"
    );

    let result = planner.calculate_with(&wafer, &die, &placement)?;

    if let Some(path) = &args.gds {
        // The layout file always carries every die.
        let bytes = if placement.is_unlimited() {
            planner.render_gds(&result)?
        } else {
            let unlimited = placement.with_max_positions(0);
            planner.render_gds(&planner.calculate_with(&wafer, &die, &unlimited)?)?
        };
        fs::write(path, bytes)?;
        info!(output_file = path; "GDSII exported successfully");
    }

    if let Some(path) = &args.svg {
        let svg = planner.render_svg(&result)?;
        fs::write(path, svg)?;
        info!(output_file = path; "SVG exported successfully");
    }

    let report = LayoutReport::from(&result);
    if args.json {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|err| WaferplanError::Export(Box::new(err)))?;
        writeln!(out, "{json}")?;
    } else {
        writeln!(out, "{report}")?;
    }

    Ok(())
}
