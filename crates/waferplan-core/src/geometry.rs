//! Geometric primitives for wafer-local coordinates.
//!
//! All values are in millimeters and use `f64`, since die positions are
//! later converted to nanometer database units and must not lose precision.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate relative to the wafer center
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - An axis-aligned rectangle defined by minimum and maximum coordinates
//!
//! # Coordinate System
//!
//! The origin sits at the wafer center. The Y axis points toward the flat or
//! notch, which is drawn at the bottom of the wafer:
//!
//! ```text
//!             -Y
//!              ▲
//!              │
//!   -X ◄───── (0,0) ─────► +X
//!              │
//!              ▼
//!             +Y   (flat / notch side)
//! ```
//!
//! Exporters whose viewers use a +Y-up convention flip the Y axis with
//! [`Point::flip_y`].

/// A 2D point in wafer-local millimeters.
///
/// # Examples
///
/// ```
/// # use waferplan_core::geometry::Point;
/// let corner = Point::new(3.0, 4.0);
/// assert_eq!(corner.hypot(), 5.0);
///
/// let mirrored = corner.mirror();
/// assert_eq!(mirrored.x(), -3.0);
/// assert_eq!(mirrored.y(), -4.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f64 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f64 {
        self.y
    }

    /// Distance from the wafer center
    pub fn hypot(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Point reflection through the wafer center.
    pub fn mirror(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }

    /// Negates the y-coordinate, converting between the wafer-local +Y-down
    /// convention and a +Y-up viewer convention.
    pub fn flip_y(self) -> Self {
        Self {
            x: self.x,
            y: -self.y,
        }
    }
}

/// Represents the dimensions of a rectangle with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f64,
    height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f64 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f64 {
        self.height
    }

    /// Returns the area covered by this size
    pub fn area(self) -> f64 {
        self.width * self.height
    }

    /// Grows both dimensions by the same amount
    pub fn grow(self, amount: f64) -> Self {
        Self {
            width: self.width + amount,
            height: self.height + amount,
        }
    }
}

/// Represents an axis-aligned rectangle with minimum and maximum coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl Bounds {
    /// Creates a new bounds from a center point and a size
    pub fn new_from_center(center: Point, size: Size) -> Self {
        let half_width = size.width / 2.0;
        let half_height = size.height / 2.0;
        Self {
            min_x: center.x - half_width,
            min_y: center.y - half_height,
            max_x: center.x + half_width,
            max_y: center.y + half_height,
        }
    }

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f64 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f64 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> f64 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> f64 {
        self.max_y
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f64 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f64 {
        self.max_y - self.min_y
    }

    /// Returns the center point of the bounds
    pub fn center(self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Returns the four corners in the order top-left, top-right,
    /// bottom-left, bottom-right.
    ///
    /// # Examples
    ///
    /// ```
    /// # use waferplan_core::geometry::{Bounds, Point, Size};
    /// let bounds = Bounds::new_from_center(Point::new(0.0, 0.0), Size::new(2.0, 4.0));
    /// let [top_left, top_right, bottom_left, bottom_right] = bounds.corners();
    ///
    /// assert_eq!(top_left, Point::new(-1.0, -2.0));
    /// assert_eq!(top_right, Point::new(1.0, -2.0));
    /// assert_eq!(bottom_left, Point::new(-1.0, 2.0));
    /// assert_eq!(bottom_right, Point::new(1.0, 2.0));
    /// ```
    pub fn corners(self) -> [Point; 4] {
        [
            Point::new(self.min_x, self.min_y),
            Point::new(self.max_x, self.min_y),
            Point::new(self.min_x, self.max_y),
            Point::new(self.max_x, self.max_y),
        ]
    }

    /// Returns the closed outline `top-left → top-right → bottom-right →
    /// bottom-left → top-left`.
    pub fn closed_outline(self) -> [Point; 5] {
        [
            Point::new(self.min_x, self.min_y),
            Point::new(self.max_x, self.min_y),
            Point::new(self.max_x, self.max_y),
            Point::new(self.min_x, self.max_y),
            Point::new(self.min_x, self.min_y),
        ]
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_point_new() {
        let point = Point::new(10.0, 20.0);
        assert_eq!(point.x(), 10.0);
        assert_eq!(point.y(), 20.0);
    }

    #[test]
    fn test_point_hypot() {
        assert_approx_eq!(f64, Point::new(3.0, 4.0).hypot(), 5.0);
        assert_approx_eq!(f64, Point::new(-3.0, -4.0).hypot(), 5.0);
    }

    #[test]
    fn test_point_mirror() {
        let point = Point::new(12.5, -7.25);
        let mirrored = point.mirror();
        assert_eq!(mirrored, Point::new(-12.5, 7.25));
        assert_eq!(mirrored.mirror(), point);
    }

    #[test]
    fn test_point_flip_y() {
        let point = Point::new(1.0, 2.0).flip_y();
        assert_eq!(point, Point::new(1.0, -2.0));
    }

    #[test]
    fn test_size_area_and_grow() {
        let size = Size::new(10.0, 5.0);
        assert_approx_eq!(f64, size.area(), 50.0);

        let pitch = size.grow(0.1);
        assert_approx_eq!(f64, pitch.width(), 10.1);
        assert_approx_eq!(f64, pitch.height(), 5.1);
    }

    #[test]
    fn test_bounds_new_from_center() {
        let bounds = Bounds::new_from_center(Point::new(10.0, -5.0), Size::new(4.0, 2.0));

        assert_approx_eq!(f64, bounds.min_x(), 8.0);
        assert_approx_eq!(f64, bounds.min_y(), -6.0);
        assert_approx_eq!(f64, bounds.max_x(), 12.0);
        assert_approx_eq!(f64, bounds.max_y(), -4.0);
        assert_eq!(bounds.center(), Point::new(10.0, -5.0));
    }

    #[test]
    fn test_bounds_corners_are_distinct() {
        let bounds = Bounds::new_from_center(Point::new(0.0, 0.0), Size::new(6.0, 2.0));
        let corners = bounds.corners();

        for (i, a) in corners.iter().enumerate() {
            for b in corners.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_bounds_closed_outline() {
        let bounds = Bounds::new_from_center(Point::new(1.0, 1.5), Size::new(2.0, 3.0));
        let outline = bounds.closed_outline();

        assert_eq!(outline[0], Point::new(0.0, 0.0));
        assert_eq!(outline[0], outline[4]);
        assert_eq!(outline[1], Point::new(2.0, 0.0));
        assert_eq!(outline[2], Point::new(2.0, 3.0));
        assert_eq!(outline[3], Point::new(0.0, 3.0));
    }
}
