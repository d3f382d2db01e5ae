//! SVG wafer map rendering.
//!
//! The document uses millimeters as user units through its `viewBox` and
//! scales to pixels with the configured [`StyleConfig::scale`]. Wafer
//! coordinates map directly to SVG coordinates, so the flat ends up at the
//! bottom of the picture like in a layout viewer.

use std::io::Write;

use log::{debug, info};
use svg::{Document, node::element as svg_element};

use waferplan_core::{color::Color, geometry::Size};

use super::{Error, Exporter};
use crate::{
    config::StyleConfig,
    placement::{DiePosition, LayoutResult},
};

/// Space around the wafer outline, in millimeters.
const MARGIN_MM: f64 = 5.0;

/// Outline stroke width, in millimeters.
const OUTLINE_WIDTH_MM: f64 = 0.4;

/// Die border stroke width, in millimeters.
const DIE_STROKE_MM: f64 = 0.1;

/// Builder for an [`Svg`] exporter.
///
/// # Examples
///
/// ```
/// # use waferplan::{config::StyleConfig, export::svg::SvgBuilder};
/// let style = StyleConfig::default().with_scale(2.0);
/// let svg = SvgBuilder::new(Vec::<u8>::new()).with_style(&style).build().unwrap();
/// ```
pub struct SvgBuilder<W: Write> {
    writer: W,
    style: StyleConfig,
}

impl<W: Write> SvgBuilder<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            style: StyleConfig::default(),
        }
    }

    pub fn with_style(mut self, style: &StyleConfig) -> Self {
        self.style = style.clone();
        self
    }

    /// Resolves the style into an exporter.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if a configured color cannot be parsed or
    /// the scale is not a positive number.
    pub fn build(self) -> Result<Svg<W>, Error> {
        let scale = self.style.checked_scale().map_err(Error::Render)?;

        Ok(Svg {
            writer: self.writer,
            scale,
            full_die_color: self.style.full_die_color().map_err(Error::Render)?,
            partial_die_color: self.style.partial_die_color().map_err(Error::Render)?,
            wafer_color: self.style.wafer_color().map_err(Error::Render)?,
            background_color: self.style.background_color().map_err(Error::Render)?,
        })
    }
}

/// SVG exporter writing a wafer map to any [`Write`] destination.
pub struct Svg<W: Write> {
    writer: W,
    scale: f64,
    full_die_color: Color,
    partial_die_color: Color,
    wafer_color: Color,
    background_color: Option<Color>,
}

impl<W: Write> Svg<W> {
    /// Renders the wafer map for `result` into a document.
    pub fn render_layout(&self, result: &LayoutResult) -> Document {
        let radius = result.wafer_radius();
        let extent = radius + MARGIN_MM;
        let canvas = Size::new(2.0 * extent, 2.0 * extent);

        let mut doc = Document::new()
            .set(
                "viewBox",
                format!("{} {} {} {}", -extent, -extent, canvas.width(), canvas.height()),
            )
            .set("width", canvas.width() * self.scale)
            .set("height", canvas.height() * self.scale);

        if let Some(background) = &self.background_color {
            doc = doc.add(
                svg_element::Rectangle::new()
                    .set("x", -extent)
                    .set("y", -extent)
                    .set("width", canvas.width())
                    .set("height", canvas.height())
                    .set("fill", background),
            );
        }

        doc = doc.add(self.render_dies(result.positions()));
        doc = doc.add(
            self.outline_circle(radius)
                .set("fill", "none")
                .set("stroke-width", OUTLINE_WIDTH_MM),
        );
        doc = doc.add(
            self.outline_circle(result.usable_radius().max(0.0))
                .set("fill", "none")
                .set("stroke-width", OUTLINE_WIDTH_MM / 2.0)
                .set("stroke-dasharray", "2 1"),
        );

        if result.sagitta() > 0.0 {
            doc = doc.add(self.flat_line(radius, result.sagitta()));
        }

        debug!(dies = result.positions().len(); "Wafer map rendered");
        doc
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn outline_circle(&self, radius: f64) -> svg_element::Circle {
        svg_element::Circle::new()
            .set("cx", 0.0)
            .set("cy", 0.0)
            .set("r", radius)
            .set("stroke", &self.wafer_color)
    }

    /// The chord where the flat or notch line crosses the wafer.
    fn flat_line(&self, radius: f64, sagitta: f64) -> svg_element::Line {
        let flat_y = radius - sagitta;
        let half_chord = (radius * radius - flat_y * flat_y).max(0.0).sqrt();

        svg_element::Line::new()
            .set("x1", -half_chord)
            .set("y1", flat_y)
            .set("x2", half_chord)
            .set("y2", flat_y)
            .set("stroke", &self.wafer_color)
            .set("stroke-width", OUTLINE_WIDTH_MM)
    }

    fn render_dies(&self, positions: &[DiePosition]) -> svg_element::Group {
        positions.iter().fold(
            svg_element::Group::new()
                .set("class", "dies")
                .set("stroke-width", DIE_STROKE_MM),
            |group, position| {
                let fill = if position.is_full() {
                    &self.full_die_color
                } else {
                    &self.partial_die_color
                };
                group.add(
                    svg_element::Rectangle::new()
                        .set("x", position.x())
                        .set("y", position.y())
                        .set("width", position.width())
                        .set("height", position.height())
                        .set("fill", fill)
                        .set("stroke", &self.wafer_color),
                )
            },
        )
    }
}

impl<W: Write> Exporter for Svg<W> {
    fn export_layout(&mut self, result: &LayoutResult) -> Result<(), Error> {
        let doc = self.render_layout(result);
        svg::write(&mut self.writer, &doc)?;
        self.writer.flush()?;
        info!(dies = result.positions().len(); "SVG exported");
        Ok(())
    }
}
