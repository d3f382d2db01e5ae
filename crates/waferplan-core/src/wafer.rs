//! Wafer blank and die descriptions.
//!
//! [`WaferSpec`] describes the circular blank, including its edge exclusion
//! ring and the optional flat or notch that marks its orientation.
//! [`DieSpec`] describes the rectangular die stepped across it.
//!
//! Both types only carry dimensions. Range checks live in
//! [`validation`](crate::validation) and are applied at the input boundary.

use crate::geometry::Size;

/// Geometry of a circular wafer blank, in millimeters.
///
/// Both `flat_length_mm` and `notch_depth_mm` are always present. When the
/// notch depth is positive it takes precedence over the flat when the
/// placement engine derives the cut depth.
///
/// # Examples
///
/// ```
/// # use waferplan_core::wafer::WaferSpec;
/// let wafer = WaferSpec::new(100.0, 3.0).with_flat_length(32.5);
///
/// assert_eq!(wafer.radius(), 50.0);
/// assert_eq!(wafer.usable_radius(), 47.0);
/// assert_eq!(wafer.notch_depth_mm(), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaferSpec {
    diameter_mm: f64,
    edge_exclusion_mm: f64,
    flat_length_mm: f64,
    notch_depth_mm: f64,
}

impl WaferSpec {
    /// Creates a wafer without a flat or notch.
    ///
    /// # Arguments
    ///
    /// * `diameter_mm` - Total wafer diameter.
    /// * `edge_exclusion_mm` - Width of the unusable ring at the wafer edge.
    pub fn new(diameter_mm: f64, edge_exclusion_mm: f64) -> Self {
        Self {
            diameter_mm,
            edge_exclusion_mm,
            flat_length_mm: 0.0,
            notch_depth_mm: 0.0,
        }
    }

    /// Sets the chord length of the orientation flat.
    pub fn with_flat_length(mut self, flat_length_mm: f64) -> Self {
        self.flat_length_mm = flat_length_mm;
        self
    }

    /// Sets the depth of the orientation notch.
    pub fn with_notch_depth(mut self, notch_depth_mm: f64) -> Self {
        self.notch_depth_mm = notch_depth_mm;
        self
    }

    /// Sets the edge exclusion width.
    pub fn with_edge_exclusion(mut self, edge_exclusion_mm: f64) -> Self {
        self.edge_exclusion_mm = edge_exclusion_mm;
        self
    }

    pub fn diameter_mm(&self) -> f64 {
        self.diameter_mm
    }

    pub fn edge_exclusion_mm(&self) -> f64 {
        self.edge_exclusion_mm
    }

    pub fn flat_length_mm(&self) -> f64 {
        self.flat_length_mm
    }

    pub fn notch_depth_mm(&self) -> f64 {
        self.notch_depth_mm
    }

    /// Returns half of the diameter.
    pub fn radius(&self) -> f64 {
        self.diameter_mm / 2.0
    }

    /// Returns the radius inside the edge exclusion ring.
    ///
    /// This may be zero or negative when the exclusion exceeds the radius.
    pub fn usable_radius(&self) -> f64 {
        self.radius() - self.edge_exclusion_mm
    }
}

/// Dimensions of a single die and the scribe lane around it, in millimeters.
///
/// # Examples
///
/// ```
/// # use waferplan_core::wafer::DieSpec;
/// let die = DieSpec::new(10.0, 5.0).with_scribe(0.5);
/// let pitch = die.pitch();
///
/// assert_eq!(pitch.width(), 10.5);
/// assert_eq!(pitch.height(), 5.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DieSpec {
    width_mm: f64,
    height_mm: f64,
    scribe_mm: f64,
}

impl DieSpec {
    /// Creates a die with no scribe lane.
    pub fn new(width_mm: f64, height_mm: f64) -> Self {
        Self {
            width_mm,
            height_mm,
            scribe_mm: 0.0,
        }
    }

    /// Sets the scribe (kerf) width added to each dimension.
    pub fn with_scribe(mut self, scribe_mm: f64) -> Self {
        self.scribe_mm = scribe_mm;
        self
    }

    pub fn width_mm(&self) -> f64 {
        self.width_mm
    }

    pub fn height_mm(&self) -> f64 {
        self.height_mm
    }

    pub fn scribe_mm(&self) -> f64 {
        self.scribe_mm
    }

    /// Returns the die's own size, without the scribe lane.
    pub fn size(&self) -> Size {
        Size::new(self.width_mm, self.height_mm)
    }

    /// Returns the center-to-center grid spacing (die size plus scribe).
    pub fn pitch(&self) -> Size {
        self.size().grow(self.scribe_mm)
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_wafer_defaults_have_no_cut() {
        let wafer = WaferSpec::new(200.0, 3.0);
        assert_eq!(wafer.flat_length_mm(), 0.0);
        assert_eq!(wafer.notch_depth_mm(), 0.0);
    }

    #[test]
    fn test_wafer_usable_radius_can_be_negative() {
        let wafer = WaferSpec::new(20.0, 15.0);
        assert_approx_eq!(f64, wafer.usable_radius(), -5.0);
    }

    #[test]
    fn test_wafer_builders() {
        let wafer = WaferSpec::new(150.0, 0.0)
            .with_edge_exclusion(2.5)
            .with_flat_length(47.5)
            .with_notch_depth(1.0);

        assert_approx_eq!(f64, wafer.edge_exclusion_mm(), 2.5);
        assert_approx_eq!(f64, wafer.flat_length_mm(), 47.5);
        assert_approx_eq!(f64, wafer.notch_depth_mm(), 1.0);
    }

    #[test]
    fn test_die_pitch_includes_scribe() {
        let die = DieSpec::new(20.0, 15.0).with_scribe(0.25);
        assert_approx_eq!(f64, die.pitch().width(), 20.25);
        assert_approx_eq!(f64, die.pitch().height(), 15.25);
        assert_approx_eq!(f64, die.size().area(), 300.0);
    }
}
