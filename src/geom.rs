//! Geometric primitives used by the chart pipeline.
//!
//! Public types in this module represent data-space coordinates and chart
//! margins. Screen-space types are internal to render backends.

/// A point in data space.
///
/// Use this when providing explicit X/Y values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// X value in data coordinates.
    pub x: f64,
    /// Y value in data coordinates.
    pub y: f64,
}

impl Point {
    /// Create a new data point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Check whether both coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A point in screen space (pixel coordinates).
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ScreenPoint {
    /// X value in screen pixels.
    pub(crate) x: f32,
    /// Y value in screen pixels.
    pub(crate) y: f32,
}

impl ScreenPoint {
    /// Create a new screen point.
    pub(crate) fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub(crate) fn lerp(self, other: Self, t: f32) -> Self {
        Self::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    pub(crate) fn distance(self, other: Self) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A rectangle in screen space (pixel coordinates).
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ScreenRect {
    /// Top-left corner.
    pub(crate) min: ScreenPoint,
    /// Bottom-right corner.
    pub(crate) max: ScreenPoint,
}

impl ScreenRect {
    /// Create a new screen rectangle from corners.
    pub(crate) fn new(min: ScreenPoint, max: ScreenPoint) -> Self {
        Self { min, max }
    }

    /// Create a rectangle from an origin and a size.
    pub(crate) fn from_origin_size(origin: ScreenPoint, width: f32, height: f32) -> Self {
        Self::new(
            origin,
            ScreenPoint::new(origin.x + width, origin.y + height),
        )
    }

    /// Rectangle width in pixels.
    pub(crate) fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Rectangle height in pixels.
    pub(crate) fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Check whether the rectangle has positive area.
    pub(crate) fn is_valid(&self) -> bool {
        self.width() > 0.0 && self.height() > 0.0
    }

    /// Check whether the point lies inside the rectangle (edges inclusive).
    pub(crate) fn contains(&self, point: ScreenPoint) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Center of the rectangle.
    pub(crate) fn center(&self) -> ScreenPoint {
        ScreenPoint::new(
            (self.min.x + self.max.x) * 0.5,
            (self.min.y + self.max.y) * 0.5,
        )
    }

    /// Shrink the rectangle by a margin.
    pub(crate) fn inset(&self, margin: Margin) -> Self {
        Self::new(
            ScreenPoint::new(self.min.x + margin.left, self.min.y + margin.top),
            ScreenPoint::new(self.max.x - margin.right, self.max.y - margin.bottom),
        )
    }
}

/// Space reserved around the plot area for axes, titles and legends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margin {
    /// Top margin in pixels.
    pub top: f32,
    /// Right margin in pixels.
    pub right: f32,
    /// Bottom margin in pixels.
    pub bottom: f32,
    /// Left margin in pixels.
    pub left: f32,
}

impl Margin {
    /// Create a margin in CSS order (top, right, bottom, left).
    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Same margin on every side.
    pub const fn all(value: f32) -> Self {
        Self::new(value, value, value, value)
    }
}

impl Default for Margin {
    fn default() -> Self {
        Self::new(20.0, 20.0, 40.0, 40.0)
    }
}
