//! Color handling for wafer map rendering
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate, so style settings can be written as CSS color strings.

use std::{fmt, str::FromStr};

use color::DynamicColor;

/// A CSS color used when rendering wafer maps.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Color {
    /// Parses a CSS color string such as `"#84cc16"`, `"rgb(249, 115, 22)"`
    /// or `"gray"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use waferplan_core::color::Color;
    ///
    /// let lime = Color::new("#84cc16").unwrap();
    /// assert!(Color::new("not-a-color").is_err());
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        Self::from(color.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_new() {
        assert!(Color::new("#f97316").is_ok());
        assert!(Color::new("rgb(10, 10, 10)").is_ok());

        let err = Color::new("bright-ish").unwrap_err();
        assert!(err.contains("bright-ish"));
    }

    #[test]
    fn test_color_into_svg_value() {
        let color = Color::new("red").unwrap();
        let value: svg::node::Value = (&color).into();
        assert_eq!(value.to_string(), color.to_string());
    }
}
