//! Options controlling grid placement.

use serde::Deserialize;

/// Default number of die positions recorded in a layout result.
pub const DEFAULT_MAX_POSITIONS: usize = 1200;

/// Options for the centered-grid placement.
///
/// All fields are optional when deserialized; missing ones take the
/// [`Default`] values.
///
/// # Examples
///
/// ```
/// # use waferplan_core::placement::PlacementConfig;
/// let config = PlacementConfig::default()
///     .with_max_positions(0)
///     .with_align_x(true);
///
/// assert!(config.is_unlimited());
/// assert!(config.include_partial());
/// assert!(config.align_x());
/// assert!(!config.align_y());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Maximum number of positions recorded; `0` records all of them.
    max_positions: usize,

    /// Whether partially usable dies are counted and recorded.
    include_partial: bool,

    /// Shift the grid by half a pitch along X.
    align_x: bool,

    /// Shift the grid by half a pitch along Y.
    align_y: bool,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            max_positions: DEFAULT_MAX_POSITIONS,
            include_partial: true,
            align_x: false,
            align_y: false,
        }
    }
}

impl PlacementConfig {
    pub fn with_max_positions(mut self, max_positions: usize) -> Self {
        self.max_positions = max_positions;
        self
    }

    pub fn with_include_partial(mut self, include_partial: bool) -> Self {
        self.include_partial = include_partial;
        self
    }

    pub fn with_align_x(mut self, align_x: bool) -> Self {
        self.align_x = align_x;
        self
    }

    pub fn with_align_y(mut self, align_y: bool) -> Self {
        self.align_y = align_y;
        self
    }

    pub fn max_positions(&self) -> usize {
        self.max_positions
    }

    /// Returns `true` when no position limit applies.
    pub fn is_unlimited(&self) -> bool {
        self.max_positions == 0
    }

    pub fn include_partial(&self) -> bool {
        self.include_partial
    }

    pub fn align_x(&self) -> bool {
        self.align_x
    }

    pub fn align_y(&self) -> bool {
        self.align_y
    }

    /// Grid offset along X, in pitches.
    pub fn x_offset(&self) -> f64 {
        if self.align_x { 0.5 } else { 0.0 }
    }

    /// Grid offset along Y, in pitches.
    pub fn y_offset(&self) -> f64 {
        if self.align_y { 0.5 } else { 0.0 }
    }
}
