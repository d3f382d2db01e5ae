//! Serializable summaries of a placement.
//!
//! [`LayoutReport`] flattens a [`LayoutResult`] into the field names used by
//! JSON consumers and rounds the derived statistics for display.

use std::fmt;

use serde::Serialize;

use crate::placement::{LayoutResult, round_to};

/// One die site as reported to consumers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionReport {
    x: f64,
    y: f64,
    w: f64,
    h: f64,
    full: bool,
    center_x: f64,
    center_y: f64,
}

/// A flat, serializable view of a [`LayoutResult`].
///
/// # Examples
///
/// ```
/// # use waferplan::{placement::{self, PlacementConfig}, report::LayoutReport, wafer::{DieSpec, WaferSpec}};
/// let wafer = WaferSpec::new(100.0, 3.0).with_flat_length(32.5);
/// let die = DieSpec::new(10.0, 10.0).with_scribe(0.1);
/// let result = placement::place(&wafer, &die, &PlacementConfig::default()).unwrap();
///
/// let report = LayoutReport::from(&result);
/// assert_eq!(report.sagitta(), 2.71);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutReport {
    full_dies: usize,
    partial_dies: usize,
    total_sites: usize,
    die_utilization: f64,
    usable_area: f64,
    die_positions: Vec<PositionReport>,
    die_positions_limited: bool,
    total_die_positions: usize,
    usable_radius: f64,
    wafer_radius: f64,
    wafer_diameter: f64,
    sagitta: f64,
    flat_length: f64,
    notch_depth: f64,
    effective_width: f64,
    effective_height: f64,
    theoretical_max: u64,
}

impl LayoutReport {
    /// Sagitta rounded to two decimals.
    pub fn sagitta(&self) -> f64 {
        self.sagitta
    }

    /// Usable area rounded to one decimal.
    pub fn usable_area(&self) -> f64 {
        self.usable_area
    }

    pub fn die_utilization(&self) -> f64 {
        self.die_utilization
    }

    pub fn die_positions(&self) -> &[PositionReport] {
        &self.die_positions
    }
}

impl From<&LayoutResult> for LayoutReport {
    fn from(result: &LayoutResult) -> Self {
        let die_positions = result
            .positions()
            .iter()
            .map(|position| PositionReport {
                x: position.x(),
                y: position.y(),
                w: position.width(),
                h: position.height(),
                full: position.is_full(),
                center_x: position.center().x(),
                center_y: position.center().y(),
            })
            .collect();
        let pitch = result.pitch();

        Self {
            full_dies: result.full_dies(),
            partial_dies: result.partial_dies(),
            total_sites: result.total_sites(),
            die_utilization: result.die_utilization_pct(),
            usable_area: round_to(result.usable_area(), 1),
            die_positions,
            die_positions_limited: result.positions_truncated(),
            total_die_positions: result.total_die_positions(),
            usable_radius: result.usable_radius(),
            wafer_radius: result.wafer_radius(),
            wafer_diameter: result.wafer().diameter_mm(),
            sagitta: round_to(result.sagitta(), 2),
            flat_length: result.wafer().flat_length_mm(),
            notch_depth: result.wafer().notch_depth_mm(),
            effective_width: pitch.width(),
            effective_height: pitch.height(),
            theoretical_max: result.theoretical_max(),
        }
    }
}

impl fmt::Display for LayoutReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Wafer diameter:     {} mm", self.wafer_diameter)?;
        writeln!(f, "Usable radius:      {} mm", self.usable_radius)?;
        if self.sagitta > 0.0 {
            writeln!(f, "Flat/notch depth:   {} mm", self.sagitta)?;
        }
        writeln!(
            f,
            "Die pitch:          {} x {} mm",
            self.effective_width, self.effective_height
        )?;
        writeln!(f, "Full dies:          {}", self.full_dies)?;
        writeln!(f, "Partial dies:       {}", self.partial_dies)?;
        writeln!(f, "Total sites:        {}", self.total_sites)?;
        writeln!(f, "Die utilization:    {:.1}%", self.die_utilization)?;
        writeln!(f, "Usable area:        {:.1} mm²", self.usable_area)?;
        write!(f, "Theoretical max:    {}", self.theoretical_max)?;
        if self.die_positions_limited {
            write!(
                f,
                "\nPositions listed:   {} of {}",
                self.die_positions.len(),
                self.total_die_positions
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use serde_json::Value;

    use waferplan_core::wafer::{DieSpec, WaferSpec};

    use super::*;
    use crate::placement::{self, PlacementConfig};

    fn report(max_positions: usize) -> LayoutReport {
        let wafer = WaferSpec::new(100.0, 3.0).with_flat_length(32.5);
        let die = DieSpec::new(10.0, 10.0).with_scribe(0.1);
        let config = PlacementConfig::default().with_max_positions(max_positions);
        LayoutReport::from(&placement::place(&wafer, &die, &config).unwrap())
    }

    #[test]
    fn test_rounded_statistics() {
        let report = report(0);
        assert_approx_eq!(f64, report.sagitta(), 2.71);
        assert_approx_eq!(f64, report.usable_area(), 6939.8);
        assert_approx_eq!(f64, report.die_utilization(), 70.6);
    }

    #[test]
    fn test_json_schema() {
        let json = serde_json::to_value(report(5)).unwrap();
        let object = json.as_object().unwrap();

        for key in [
            "full_dies",
            "partial_dies",
            "total_sites",
            "die_utilization",
            "usable_area",
            "die_positions",
            "die_positions_limited",
            "total_die_positions",
            "usable_radius",
            "wafer_radius",
            "wafer_diameter",
            "sagitta",
            "flat_length",
            "notch_depth",
            "effective_width",
            "effective_height",
            "theoretical_max",
        ] {
            assert!(object.contains_key(key), "missing {key}");
        }

        assert_eq!(json["full_dies"], Value::from(49));
        assert_eq!(json["total_die_positions"], Value::from(89));
        assert_eq!(json["die_positions_limited"], Value::Bool(true));
        assert_eq!(json["die_positions"].as_array().unwrap().len(), 5);

        let first = json["die_positions"][0].as_object().unwrap();
        let mut keys: Vec<_> = first.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["center_x", "center_y", "full", "h", "w", "x", "y"]);
    }

    #[test]
    fn test_summary_mentions_limit_only_when_truncated() {
        let limited = report(5).to_string();
        assert!(limited.contains("Full dies:          49"));
        assert!(limited.contains("Positions listed:   5 of 89"));

        let complete = report(0).to_string();
        assert!(!complete.contains("Positions listed"));
        assert!(complete.contains("Flat/notch depth:   2.71 mm"));
    }
}
