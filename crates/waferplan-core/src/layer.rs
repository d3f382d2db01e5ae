//! Layer and datatype assignments for layout-file export.
//!
//! A layout file tags every polygon with a `(layer, datatype)` pair. The
//! wafer outline, the usable-area outline and the die rectangles each get
//! their own pair through [`LayerConfig`].

use serde::Deserialize;
use thiserror::Error;

/// Largest layer or datatype number a layout file can hold.
pub const MAX_NUMBER: u16 = i16::MAX as u16;

/// A layer or datatype number above [`MAX_NUMBER`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{field} number {value} exceeds {MAX_NUMBER}")]
pub struct LayerError {
    field: &'static str,
    value: u16,
}

/// A `(layer, datatype)` pair.
///
/// Both numbers are at most [`MAX_NUMBER`], which makes them valid 16-bit
/// signed record values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "RawLayerSpec")]
pub struct LayerSpec {
    layer: i16,
    datatype: i16,
}

#[derive(Deserialize)]
struct RawLayerSpec {
    layer: u16,
    #[serde(default)]
    datatype: u16,
}

impl TryFrom<RawLayerSpec> for LayerSpec {
    type Error = LayerError;

    fn try_from(raw: RawLayerSpec) -> Result<Self, Self::Error> {
        Self::new(raw.layer, raw.datatype)
    }
}

impl LayerSpec {
    /// Creates a pair, rejecting numbers above [`MAX_NUMBER`].
    pub fn new(layer: u16, datatype: u16) -> Result<Self, LayerError> {
        Ok(Self {
            layer: number("layer", layer)?,
            datatype: number("datatype", datatype)?,
        })
    }

    const fn known(layer: i16, datatype: i16) -> Self {
        Self { layer, datatype }
    }

    pub fn layer(&self) -> i16 {
        self.layer
    }

    pub fn datatype(&self) -> i16 {
        self.datatype
    }
}

fn number(field: &'static str, value: u16) -> Result<i16, LayerError> {
    i16::try_from(value).map_err(|_| LayerError { field, value })
}

/// Layer assignments for each polygon category.
///
/// Full and partial dies share the [`die`](Self::die) entry.
///
/// # Examples
///
/// ```
/// # use waferplan_core::layer::{LayerConfig, LayerSpec};
/// let layers = LayerConfig::default().with_die(LayerSpec::new(10, 2).unwrap());
///
/// assert_eq!(layers.wafer(), LayerSpec::new(0, 0).unwrap());
/// assert_eq!(layers.usable(), LayerSpec::new(1, 0).unwrap());
/// assert_eq!(layers.die().layer(), 10);
/// assert_eq!(layers.die().datatype(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LayerConfig {
    wafer: LayerSpec,
    usable: LayerSpec,
    die: LayerSpec,
}

impl Default for LayerConfig {
    fn default() -> Self {
        Self {
            wafer: LayerSpec::known(0, 0),
            usable: LayerSpec::known(1, 0),
            die: LayerSpec::known(2, 0),
        }
    }
}

impl LayerConfig {
    pub fn with_wafer(mut self, wafer: LayerSpec) -> Self {
        self.wafer = wafer;
        self
    }

    pub fn with_usable(mut self, usable: LayerSpec) -> Self {
        self.usable = usable;
        self
    }

    pub fn with_die(mut self, die: LayerSpec) -> Self {
        self.die = die;
        self
    }

    /// Layer for the wafer edge outline.
    pub fn wafer(&self) -> LayerSpec {
        self.wafer
    }

    /// Layer for the usable-area outline.
    pub fn usable(&self) -> LayerSpec {
        self.usable
    }

    /// Layer for die rectangles.
    pub fn die(&self) -> LayerSpec {
        self.die
    }
}
