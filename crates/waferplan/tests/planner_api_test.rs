//! Integration tests for the WaferPlanner API
//!
//! These tests drive the public API from inputs to exported output.

use waferplan::{
    WaferPlanner, WaferplanError,
    config::AppConfig,
    placement::PlacementConfig,
    report::LayoutReport,
    standard::WaferStandard,
    wafer::{DieSpec, WaferSpec},
};

fn die() -> DieSpec {
    DieSpec::new(10.0, 10.0).with_scribe(0.1)
}

#[test]
fn test_planner_api_exists() {
    let _planner = WaferPlanner::default();
}

#[test]
fn test_calculate_standard_wafer() {
    let planner = WaferPlanner::default();
    let wafer = WaferStandard::Mm100.to_wafer_spec();

    let result = planner.calculate(&wafer, &die()).expect("Failed to calculate");
    assert_eq!(result.full_dies(), 49);
    assert_eq!(result.partial_dies(), 40);
    assert_eq!(result.theoretical_max(), 68);
}

#[test]
fn test_calculate_rejects_out_of_range_input() {
    let planner = WaferPlanner::default();
    let wafer = WaferSpec::new(500.0, 3.0);

    let err = planner.calculate(&wafer, &die()).unwrap_err();
    assert!(matches!(err, WaferplanError::Validation(_)));
    assert_eq!(err.as_validation().map(|e| e.parameter()), Some("wafer diameter"));
}

#[test]
fn test_calculate_uses_configured_placement() {
    let config: AppConfig = toml::from_str(
        r#"
        [placement]
        include_partial = false
        "#,
    )
    .unwrap();
    let planner = WaferPlanner::new(config);
    let wafer = WaferStandard::Mm100.to_wafer_spec();

    let result = planner.calculate(&wafer, &die()).unwrap();
    assert_eq!(result.partial_dies(), 0);

    let result = planner
        .calculate_with(&wafer, &die(), &PlacementConfig::default())
        .unwrap();
    assert_eq!(result.partial_dies(), 40);
}

#[test]
fn test_render_gds() {
    let planner = WaferPlanner::default();
    let wafer = WaferStandard::Mm100.to_wafer_spec();
    let unlimited = PlacementConfig::default().with_max_positions(0);
    let result = planner.calculate_with(&wafer, &die(), &unlimited).unwrap();

    let bytes = planner.render_gds(&result).expect("Failed to encode");
    assert_eq!(&bytes[..6], &[0x00, 0x06, 0x00, 0x02, 0x00, 0x05]);
    assert_eq!(&bytes[bytes.len() - 4..], &[0x00, 0x04, 0x04, 0x00]);

    // 124 bytes of fixed records, two 64-gons and one rectangle per die.
    let expected = 124 + 2 * (24 + 65 * 8) + 89 * (24 + 5 * 8);
    assert_eq!(bytes.len(), expected);
}

#[test]
fn test_render_svg() {
    let planner = WaferPlanner::default();
    let wafer = WaferStandard::Mm150.to_wafer_spec();
    let result = planner.calculate(&wafer, &die()).unwrap();

    let svg = planner.render_svg(&result).expect("Failed to render");
    assert!(svg.contains("<svg"), "Output should contain SVG tag");
    assert!(svg.contains("</svg>"), "Output should be complete SVG");
}

#[test]
fn test_render_svg_reports_bad_style() {
    let config: AppConfig = toml::from_str(
        r#"
        [style]
        full_die_color = "not a color"
        "#,
    )
    .unwrap();
    let planner = WaferPlanner::new(config);
    let wafer = WaferStandard::Mm100.to_wafer_spec();
    let result = planner.calculate(&wafer, &die()).unwrap();

    let err = planner.render_svg(&result).unwrap_err();
    assert!(matches!(err, WaferplanError::Export(_)));
}

#[test]
fn test_report_serializes() {
    let planner = WaferPlanner::default();
    let wafer = WaferStandard::Mm300.to_wafer_spec();
    let result = planner.calculate(&wafer, &die()).unwrap();

    let json = serde_json::to_value(LayoutReport::from(&result)).unwrap();
    assert_eq!(json["full_dies"], 597);
    assert_eq!(json["partial_dies"], 120);
    assert_eq!(json["theoretical_max"], 665);
    assert_eq!(json["die_positions_limited"], false);
    assert_eq!(json["sagitta"], 1.0);
}
