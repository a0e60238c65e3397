//! Data series configuration and storage.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::curve::Curve;
use crate::geom::Point;
use crate::render::{Color, LineStyle, MarkerStyle};

static SERIES_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeriesId(u64);

impl SeriesId {
    fn next() -> Self {
        Self(SERIES_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// A line series with its points kept sorted by x.
#[derive(Debug, Clone)]
pub struct Series {
    id: SeriesId,
    name: String,
    style: LineStyle,
    opacity: f32,
    curve: Curve,
    markers: Option<MarkerStyle>,
    points: Vec<Point>,
    visible: bool,
}

impl Series {
    /// Create an empty line series.
    pub fn line(name: impl Into<String>) -> Self {
        Self {
            id: SeriesId::next(),
            name: name.into(),
            style: LineStyle::default(),
            opacity: 1.0,
            curve: Curve::default(),
            markers: None,
            points: Vec::new(),
            visible: true,
        }
    }

    /// Set the stroke style.
    pub fn with_style(mut self, style: LineStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the stroke opacity.
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    /// Set the interpolation curve.
    pub fn with_curve(mut self, curve: Curve) -> Self {
        self.curve = curve;
        self
    }

    /// Draw a marker on every point.
    pub fn with_markers(mut self, markers: MarkerStyle) -> Self {
        self.markers = Some(markers);
        self
    }

    /// Replace the points. Non-finite points are dropped.
    pub fn with_points<I>(mut self, points: I) -> Self
    where
        I: IntoIterator<Item = Point>,
    {
        self.set_points(points);
        self
    }

    /// Access the series identifier.
    pub fn id(&self) -> SeriesId {
        self.id
    }

    /// Access the series name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Access the stroke style.
    pub fn style(&self) -> LineStyle {
        self.style
    }

    /// Series color.
    pub fn color(&self) -> Color {
        self.style.color
    }

    /// Stroke opacity.
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Access the interpolation curve.
    pub fn curve(&self) -> Curve {
        self.curve
    }

    /// Access the marker style.
    pub fn markers(&self) -> Option<MarkerStyle> {
        self.markers
    }

    /// Points sorted by x.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Replace the points. Non-finite points are dropped.
    pub fn set_points<I>(&mut self, points: I)
    where
        I: IntoIterator<Item = Point>,
    {
        self.points = points.into_iter().filter(Point::is_finite).collect();
        self.points.sort_by(|a, b| a.x.total_cmp(&b.x));
    }

    /// Check if the series is visible.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Set series visibility.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_are_sorted_and_filtered() {
        let series = Series::line("s").with_points([
            Point::new(3.0, 1.0),
            Point::new(1.0, 2.0),
            Point::new(f64::NAN, 0.0),
            Point::new(2.0, 3.0),
        ]);
        let xs: Vec<f64> = series.points().iter().map(|point| point.x).collect();
        assert_eq!(xs, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn ids_are_unique() {
        assert_ne!(Series::line("a").id(), Series::line("b").id());
    }
}
