//! Centered-grid die placement.
//!
//! The engine steps a rectangular grid of die pitches across the wafer,
//! anchored so that either a die center or a pitch boundary sits exactly at
//! the wafer center. Every grid cell is classified by its four corners:
//!
//! - **full** when every corner lies strictly inside the usable circle and
//!   strictly above the flat/notch line,
//! - **partial** when at least one corner lies on or inside both limits,
//! - **excluded** otherwise.
//!
//! When the wafer has a flat or notch, cells whose point reflection through
//! the wafer center would not be kept are dropped as well, so the result
//! stays symmetric about the origin. The grid is centered, so the reflection
//! of a cell is another cell of the same grid and is classified directly.
//!
//! [`place`] is a pure function: it reads only its arguments and allocates
//! only the returned [`LayoutResult`]. At most the configured number of
//! positions is ever stored, however many cells the scan visits.

use std::f64::consts::PI;

use log::{debug, info, trace, warn};

pub use waferplan_core::placement::{DEFAULT_MAX_POSITIONS, PlacementConfig};

use waferplan_core::{
    geometry::{Bounds, Point, Size},
    wafer::{DieSpec, WaferSpec},
};

use crate::error::WaferplanError;

/// Cells kept beyond `usable_radius / pitch` on every side of the grid.
const GRID_MARGIN: i64 = 2;

/// A single die site on the wafer.
///
/// Coordinates are wafer-local millimeters with +Y pointing toward the flat.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiePosition {
    bounds: Bounds,
    is_full: bool,
}

impl DiePosition {
    fn new(center: Point, pitch: Size, is_full: bool) -> Self {
        Self {
            bounds: Bounds::new_from_center(center, pitch),
            is_full,
        }
    }

    /// Left edge of the site.
    pub fn x(&self) -> f64 {
        self.bounds.min_x()
    }

    /// Top edge of the site (the edge farthest from the flat).
    pub fn y(&self) -> f64 {
        self.bounds.min_y()
    }

    pub fn width(&self) -> f64 {
        self.bounds.width()
    }

    pub fn height(&self) -> f64 {
        self.bounds.height()
    }

    pub fn center(&self) -> Point {
        self.bounds.center()
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Returns `true` if the whole site lies inside the usable area.
    pub fn is_full(&self) -> bool {
        self.is_full
    }
}

/// The outcome of one placement run.
///
/// Counts and statistics always describe the complete placement, even when
/// the recorded [`positions`](Self::positions) were cut short by the
/// configured limit.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutResult {
    wafer: WaferSpec,
    die: DieSpec,
    sagitta: f64,
    full_dies: usize,
    partial_dies: usize,
    total_die_positions: usize,
    usable_area: f64,
    die_utilization_pct: f64,
    theoretical_max: u64,
    positions: Vec<DiePosition>,
    positions_truncated: bool,
}

impl LayoutResult {
    /// The wafer this layout was computed for.
    pub fn wafer(&self) -> &WaferSpec {
        &self.wafer
    }

    /// The die this layout was computed for.
    pub fn die(&self) -> &DieSpec {
        &self.die
    }

    pub fn wafer_radius(&self) -> f64 {
        self.wafer.radius()
    }

    pub fn usable_radius(&self) -> f64 {
        self.wafer.usable_radius()
    }

    /// Effective die pitch (die size plus scribe).
    pub fn pitch(&self) -> Size {
        self.die.pitch()
    }

    /// Depth of the flat or notch cut, zero without one.
    pub fn sagitta(&self) -> f64 {
        self.sagitta
    }

    pub fn full_dies(&self) -> usize {
        self.full_dies
    }

    pub fn partial_dies(&self) -> usize {
        self.partial_dies
    }

    /// Full plus partial dies.
    pub fn total_sites(&self) -> usize {
        self.full_dies + self.partial_dies
    }

    /// Number of grid cells that touch the usable area.
    ///
    /// Without a flat or notch this also counts partial cells that were
    /// discarded because partial dies are not included.
    pub fn total_die_positions(&self) -> usize {
        self.total_die_positions
    }

    /// Area of the usable circle in mm².
    pub fn usable_area(&self) -> f64 {
        self.usable_area
    }

    /// Share of the usable area covered by full dies, in percent with one
    /// decimal.
    pub fn die_utilization_pct(&self) -> f64 {
        self.die_utilization_pct
    }

    /// Upper bound from dividing the usable area by the pitch area.
    pub fn theoretical_max(&self) -> u64 {
        self.theoretical_max
    }

    /// Recorded die sites in row-major scan order.
    pub fn positions(&self) -> &[DiePosition] {
        &self.positions
    }

    /// Returns `true` if the position limit cut the recorded sites short.
    pub fn positions_truncated(&self) -> bool {
        self.positions_truncated
    }
}

/// Returns how deep the flat or notch cuts into the wafer.
///
/// A flat of length `L` on a wafer of radius `R` cuts
/// `R - sqrt(R² - (L/2)²)`. A flat longer than the diameter is ignored. A
/// positive notch depth always replaces the flat-derived value.
///
/// # Examples
///
/// ```
/// # use waferplan::{placement::sagitta, wafer::WaferSpec};
/// let flatted = WaferSpec::new(100.0, 3.0).with_flat_length(32.5);
/// assert!((sagitta(&flatted) - 2.7143).abs() < 1e-4);
///
/// let notched = flatted.with_notch_depth(1.0);
/// assert_eq!(sagitta(&notched), 1.0);
/// ```
pub fn sagitta(wafer: &WaferSpec) -> f64 {
    let radius = wafer.radius();
    let flat_length = wafer.flat_length_mm();

    let from_flat = if flat_length > 0.0 && flat_length <= 2.0 * radius {
        let half_flat = flat_length / 2.0;
        radius - (radius * radius - half_flat * half_flat).sqrt()
    } else {
        0.0
    };

    if wafer.notch_depth_mm() > 0.0 {
        wafer.notch_depth_mm()
    } else {
        from_flat
    }
}

/// Places dies on the wafer and classifies every site.
///
/// # Arguments
///
/// * `wafer` - Wafer blank geometry.
/// * `die` - Die size and scribe width.
/// * `config` - Limit, partial-die and alignment options.
///
/// # Errors
///
/// Returns [`WaferplanError::Placement`] if a dimension is not finite, a die
/// dimension is not positive or the scribe is negative. Range limits are not
/// checked here; see [`validation`](crate::validation).
///
/// A usable radius of zero or less is not an error and yields an empty
/// layout.
///
/// # Examples
///
/// ```
/// # use waferplan::{placement::{self, PlacementConfig}, wafer::{DieSpec, WaferSpec}};
/// let wafer = WaferSpec::new(100.0, 3.0).with_flat_length(32.5);
/// let die = DieSpec::new(10.0, 10.0).with_scribe(0.1);
///
/// let result = placement::place(&wafer, &die, &PlacementConfig::default()).unwrap();
/// assert_eq!(result.usable_radius(), 47.0);
/// assert_eq!(result.total_sites(), result.full_dies() + result.partial_dies());
/// ```
pub fn place(
    wafer: &WaferSpec,
    die: &DieSpec,
    config: &PlacementConfig,
) -> Result<LayoutResult, WaferplanError> {
    check_dimensions(wafer, die)?;

    debug!(
        diameter = wafer.diameter_mm(),
        edge_exclusion = wafer.edge_exclusion_mm(),
        die_width = die.width_mm(),
        die_height = die.height_mm(),
        scribe = die.scribe_mm();
        "Placing dies"
    );

    if wafer.flat_length_mm() > 0.0 && wafer.notch_depth_mm() > 0.0 {
        warn!(
            flat_length = wafer.flat_length_mm(),
            notch_depth = wafer.notch_depth_mm();
            "Both flat and notch given, notch depth takes precedence"
        );
    }

    let cut_depth = sagitta(wafer);
    let usable_radius = wafer.usable_radius();

    if usable_radius <= 0.0 {
        info!(usable_radius; "Edge exclusion leaves no usable area");
        return Ok(LayoutResult {
            wafer: *wafer,
            die: *die,
            sagitta: cut_depth,
            full_dies: 0,
            partial_dies: 0,
            total_die_positions: 0,
            usable_area: 0.0,
            die_utilization_pct: 0.0,
            theoretical_max: 0,
            positions: Vec::new(),
            positions_truncated: false,
        });
    }

    let region = UsableRegion::new(wafer, cut_depth);
    let pitch = die.pitch();
    let GridScan {
        positions,
        full_dies,
        partial_dies,
        total_die_positions,
    } = scan_grid(&region, pitch, config);

    let usable_area = PI * usable_radius * usable_radius;
    let die_utilization_pct = round_to(
        full_dies as f64 * die.size().area() / usable_area * 100.0,
        1,
    );
    let theoretical_max = (usable_area / pitch.area()).floor() as u64;

    let positions_truncated =
        !config.is_unlimited() && total_die_positions > config.max_positions();

    info!(
        full_dies,
        partial_dies,
        total_die_positions,
        positions_truncated;
        "Placement complete"
    );

    Ok(LayoutResult {
        wafer: *wafer,
        die: *die,
        sagitta: cut_depth,
        full_dies,
        partial_dies,
        total_die_positions,
        usable_area,
        die_utilization_pct,
        theoretical_max,
        positions,
        positions_truncated,
    })
}

fn check_dimensions(wafer: &WaferSpec, die: &DieSpec) -> Result<(), WaferplanError> {
    let values = [
        ("wafer diameter", wafer.diameter_mm()),
        ("edge exclusion", wafer.edge_exclusion_mm()),
        ("flat length", wafer.flat_length_mm()),
        ("notch depth", wafer.notch_depth_mm()),
        ("die width", die.width_mm()),
        ("die height", die.height_mm()),
        ("scribe", die.scribe_mm()),
    ];
    if let Some((name, value)) = values.iter().find(|(_, value)| !value.is_finite()) {
        return Err(WaferplanError::Placement(format!(
            "{name} is not a finite number: {value}"
        )));
    }
    if die.width_mm() <= 0.0 || die.height_mm() <= 0.0 {
        return Err(WaferplanError::Placement(format!(
            "die size must be positive, got {} x {} mm",
            die.width_mm(),
            die.height_mm()
        )));
    }
    if die.scribe_mm() < 0.0 {
        return Err(WaferplanError::Placement(format!(
            "scribe must not be negative, got {} mm",
            die.scribe_mm()
        )));
    }
    Ok(())
}

/// The usable circle, cut by the flat/notch line at `flat_y`.
struct UsableRegion {
    radius: f64,
    flat_y: f64,
    has_cut: bool,
}

impl UsableRegion {
    fn new(wafer: &WaferSpec, cut_depth: f64) -> Self {
        let flat_y = if cut_depth > 0.0 {
            wafer.radius() - cut_depth
        } else {
            2.0 * wafer.radius()
        };
        Self {
            radius: wafer.usable_radius(),
            flat_y,
            has_cut: cut_depth > 0.0,
        }
    }

    /// On or inside both limits.
    fn touches(&self, corner: Point) -> bool {
        corner.hypot() <= self.radius && corner.y() <= self.flat_y
    }

    /// Strictly inside both limits.
    fn contains(&self, corner: Point) -> bool {
        corner.hypot() < self.radius && corner.y() < self.flat_y
    }

    /// Returns `None` for an excluded cell, otherwise whether it is full.
    fn classify(&self, cell: Bounds) -> Option<bool> {
        let corners = cell.corners();
        if !corners.iter().any(|&corner| self.touches(corner)) {
            return None;
        }
        Some(corners.iter().all(|&corner| self.contains(corner)))
    }
}

/// What the grid does with one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Site {
    /// No corner touches the usable area.
    Outside,
    /// A partial cell while partial dies are not included.
    Discarded,
    Kept { is_full: bool },
}

/// The centered placement grid over a usable region.
struct Grid<'a> {
    region: &'a UsableRegion,
    pitch: Size,
    x_offset: f64,
    y_offset: f64,
    include_partial: bool,
    /// Index shift of the point reflection, one cell per half-pitch offset.
    mirror_shift: (i64, i64),
}

impl<'a> Grid<'a> {
    fn new(region: &'a UsableRegion, pitch: Size, config: &PlacementConfig) -> Self {
        Self {
            region,
            pitch,
            x_offset: config.x_offset(),
            y_offset: config.y_offset(),
            include_partial: config.include_partial(),
            mirror_shift: (i64::from(config.align_x()), i64::from(config.align_y())),
        }
    }

    fn center(&self, col: i64, row: i64) -> Point {
        Point::new(
            (col as f64 + self.x_offset) * self.pitch.width(),
            (row as f64 + self.y_offset) * self.pitch.height(),
        )
    }

    fn site(&self, col: i64, row: i64) -> Site {
        let cell = Bounds::new_from_center(self.center(col, row), self.pitch);
        match self.region.classify(cell) {
            None => Site::Outside,
            Some(false) if !self.include_partial => Site::Discarded,
            Some(is_full) => Site::Kept { is_full },
        }
    }

    /// Whether the reflection of the cell through the wafer center is kept.
    ///
    /// `-(col + xo) == (-col - 2·xo) + xo`, so with `xo ∈ {0, 0.5}` the
    /// reflected center is exactly the center of cell `-col - 2·xo`.
    fn mirror_is_kept(&self, col: i64, row: i64) -> bool {
        let (shift_x, shift_y) = self.mirror_shift;
        matches!(self.site(-col - shift_x, -row - shift_y), Site::Kept { .. })
    }
}

/// Counts and recorded sites of one grid scan.
#[derive(Debug, Default)]
struct GridScan {
    positions: Vec<DiePosition>,
    full_dies: usize,
    partial_dies: usize,
    total_die_positions: usize,
}

impl GridScan {
    fn record(&mut self, position: DiePosition, limit: usize) {
        if position.is_full() {
            self.full_dies += 1;
        } else {
            self.partial_dies += 1;
        }
        if self.positions.len() < limit {
            self.positions.push(position);
        }
    }
}

/// Walks the grid row by row, counting every kept site and recording the
/// first `max_positions` of them.
///
/// Without a flat or notch every cell touching the usable area counts as a
/// die position, discarded partials included. With one, only the sites that
/// survive the symmetry check count.
fn scan_grid(region: &UsableRegion, pitch: Size, config: &PlacementConfig) -> GridScan {
    let grid = Grid::new(region, pitch, config);
    let max_cols = grid_extent(region.radius, pitch.width());
    let max_rows = grid_extent(region.radius, pitch.height());
    let limit = if config.is_unlimited() {
        usize::MAX
    } else {
        config.max_positions()
    };

    trace!(max_cols, max_rows; "Scanning placement grid");

    let mut scan = GridScan::default();
    let mut asymmetric = 0usize;

    for row in -max_rows..=max_rows {
        for col in -max_cols..=max_cols {
            let is_full = match grid.site(col, row) {
                Site::Outside => continue,
                Site::Discarded => {
                    if !region.has_cut {
                        scan.total_die_positions += 1;
                    }
                    continue;
                }
                Site::Kept { is_full } => is_full,
            };

            if region.has_cut && !grid.mirror_is_kept(col, row) {
                asymmetric += 1;
                continue;
            }

            scan.total_die_positions += 1;
            scan.record(DiePosition::new(grid.center(col, row), pitch, is_full), limit);
        }
    }

    if region.has_cut {
        debug!(removed = asymmetric; "Removed asymmetric sites");
    }
    scan
}

fn grid_extent(radius: f64, pitch: f64) -> i64 {
    (radius / pitch).floor() as i64 + GRID_MARGIN
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    fn wafer_strategy() -> impl Strategy<Value = WaferSpec> {
        (
            20.0f64..160.0,
            0.0f64..10.0,
            prop_oneof![Just(0.0), 5.0f64..60.0],
            prop_oneof![Just(0.0), 0.5f64..3.0],
        )
            .prop_map(|(diameter, edge, flat, notch)| {
                WaferSpec::new(diameter, edge)
                    .with_flat_length(flat)
                    .with_notch_depth(notch)
            })
    }

    fn die_strategy() -> impl Strategy<Value = DieSpec> {
        (2.0f64..30.0, 2.0f64..30.0, 0.0f64..1.0)
            .prop_map(|(w, h, scribe)| DieSpec::new(w, h).with_scribe(scribe))
    }

    fn config_strategy() -> impl Strategy<Value = PlacementConfig> {
        (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(partial, align_x, align_y)| {
            PlacementConfig::default()
                .with_max_positions(0)
                .with_include_partial(partial)
                .with_align_x(align_x)
                .with_align_y(align_y)
        })
    }

    /// Site counts are consistent with each other and with the recorded sites.
    fn check_counts_are_consistent(
        wafer: WaferSpec,
        die: DieSpec,
        config: PlacementConfig,
    ) -> Result<(), TestCaseError> {
        let result = place(&wafer, &die, &config).unwrap();

        prop_assert_eq!(result.total_sites(), result.full_dies() + result.partial_dies());
        prop_assert!(result.total_sites() <= result.total_die_positions());
        prop_assert_eq!(result.positions().len(), result.total_sites());
        if !config.include_partial() {
            prop_assert_eq!(result.partial_dies(), 0);
        }
        if result.usable_radius() <= 0.0 {
            prop_assert_eq!(result.total_sites(), 0);
        }
        Ok(())
    }

    /// With a flat or notch, every off-center site has its mirror.
    fn check_cut_wafers_are_symmetric(
        wafer: WaferSpec,
        die: DieSpec,
        config: PlacementConfig,
    ) -> Result<(), TestCaseError> {
        let result = place(&wafer, &die, &config).unwrap();
        if result.sagitta() <= 0.0 {
            return Ok(());
        }

        for position in result.positions() {
            let center = position.center();
            let mirror = center.mirror();
            let found = result.positions().iter().any(|other| {
                (other.center().x() - mirror.x()).abs() < 1e-6
                    && (other.center().y() - mirror.y()).abs() < 1e-6
            });
            prop_assert!(found, "missing mirror of {:?}", center);
        }
        Ok(())
    }

    /// Full sites never have a corner outside the usable circle.
    fn check_full_sites_fit(
        wafer: WaferSpec,
        die: DieSpec,
        config: PlacementConfig,
    ) -> Result<(), TestCaseError> {
        let result = place(&wafer, &die, &config).unwrap();
        for position in result.positions().iter().filter(|p| p.is_full()) {
            for corner in position.bounds().corners() {
                prop_assert!(corner.hypot() < result.usable_radius());
            }
        }
        Ok(())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn counts_are_consistent(
            wafer in wafer_strategy(),
            die in die_strategy(),
            config in config_strategy(),
        ) {
            check_counts_are_consistent(wafer, die, config)?;
        }

        #[test]
        fn cut_wafers_are_symmetric(
            wafer in wafer_strategy(),
            die in die_strategy(),
            config in config_strategy(),
        ) {
            check_cut_wafers_are_symmetric(wafer, die, config)?;
        }

        #[test]
        fn full_sites_fit(
            wafer in wafer_strategy(),
            die in die_strategy(),
            config in config_strategy(),
        ) {
            check_full_sites_fit(wafer, die, config)?;
        }
    }
}
