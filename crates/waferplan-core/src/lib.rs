//! Waferplan Core Types and Definitions
//!
//! This crate provides the foundational types shared by the waferplan
//! placement engine and its exporters. It includes:
//!
//! - **Geometry**: Basic geometric types in millimeters ([`geometry`] module)
//! - **Wafer**: Wafer blank and die descriptions ([`wafer`] module)
//! - **Standards**: SEMI standard wafer presets ([`standard::WaferStandard`])
//! - **Placement**: Grid placement options ([`placement::PlacementConfig`])
//! - **Layers**: Layout-file layer/datatype assignments ([`layer::LayerConfig`])
//! - **Validation**: Range checks for raw inputs ([`validation`] module)
//! - **Colors**: Color handling with CSS color support ([`color::Color`])

pub mod color;
pub mod geometry;
pub mod layer;
pub mod placement;
pub mod standard;
pub mod validation;
pub mod wafer;
