use std::fs;

use tempfile::{TempDir, tempdir};

use waferplan::standard::WaferStandard;
use waferplan_cli::{Args, run_with_output};

/// Arguments pointing at an empty config file in a fresh directory, so no
/// local or user configuration takes part in the run.
fn isolated_args() -> (TempDir, Args) {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "").expect("Failed to write config");

    let args = Args {
        config: Some(config_path.to_string_lossy().to_string()),
        log_level: "off".to_string(),
        ..Args::default()
    };
    (temp_dir, args)
}

fn run_to_string(args: &Args) -> String {
    let mut out = Vec::new();
    run_with_output(args, &mut out).expect("run should succeed");
    String::from_utf8(out).unwrap()
}

#[test]
fn e2e_summary_for_defaults() {
    let (_dir, args) = isolated_args();
    let output = run_to_string(&args);

    assert!(output.contains("Wafer diameter:     100 mm"));
    assert!(output.contains("Full dies:          49"));
    assert!(output.contains("Partial dies:       40"));
}

#[test]
fn e2e_json_report() {
    let (_dir, base) = isolated_args();
    let args = Args {
        standard: Some(WaferStandard::Mm150),
        die_width: Some(20.0),
        die_height: Some(15.0),
        json: true,
        ..base
    };
    let output = run_to_string(&args);

    let json: serde_json::Value = serde_json::from_str(&output).expect("valid JSON");
    assert_eq!(json["full_dies"], 35);
    assert_eq!(json["partial_dies"], 36);
    assert_eq!(json["wafer_diameter"], 150.0);
}

#[test]
fn e2e_writes_gds_and_svg() {
    let (temp_dir, base) = isolated_args();
    let gds_path = temp_dir.path().join("wafer.gds");
    let svg_path = temp_dir.path().join("wafer.svg");

    let args = Args {
        max_positions: Some(10),
        gds: Some(gds_path.to_string_lossy().to_string()),
        svg: Some(svg_path.to_string_lossy().to_string()),
        ..base
    };
    run_to_string(&args);

    // The layout file ignores the position limit.
    let gds = fs::read(&gds_path).unwrap();
    assert_eq!(gds.len(), 124 + 2 * (24 + 65 * 8) + 89 * (24 + 5 * 8));

    let svg = fs::read_to_string(&svg_path).unwrap();
    assert_eq!(svg.matches("<rect").count(), 10);
}

#[test]
fn e2e_config_file_and_flags() {
    let (temp_dir, base) = isolated_args();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(
        &config_path,
        "[placement]\ninclude_partial = false\nmax_positions = 0\n",
    )
    .unwrap();

    let args = Args {
        json: true,
        ..base
    };
    let json: serde_json::Value = serde_json::from_str(&run_to_string(&args)).unwrap();
    assert_eq!(json["partial_dies"], 0);
    assert_eq!(json["die_positions"].as_array().unwrap().len(), 49);
}

#[test]
fn e2e_rejects_out_of_range_die() {
    let (_dir, base) = isolated_args();
    let args = Args {
        die_width: Some(250.0),
        ..base
    };
    let mut out = Vec::new();
    let err = run_with_output(&args, &mut out).unwrap_err();

    assert!(err.to_string().contains("die width"));
    assert!(out.is_empty());
}

#[test]
fn e2e_missing_config_file() {
    let (temp_dir, base) = isolated_args();
    let missing = temp_dir.path().join("does/not/exist.toml");
    let args = Args {
        config: Some(missing.to_string_lossy().to_string()),
        ..base
    };
    assert!(run_with_output(&args, &mut Vec::new()).is_err());
}

#[test]
fn e2e_config_style_error_is_reported_before_placement() {
    let (temp_dir, base) = isolated_args();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "[style]\nwafer_color = \"silver-ish\"\n").unwrap();

    let mut out = Vec::new();
    let err = run_with_output(&base, &mut out).unwrap_err();

    assert!(err.to_string().contains("Invalid style"));
    assert!(out.is_empty());
}
