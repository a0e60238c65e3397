//! Coordinate transforms between data and screen space.

use crate::geom::{Point, ScreenPoint, ScreenRect};
use crate::scale::LinearScale;
use crate::view::Viewport;

/// Transform from data coordinates into screen coordinates.
///
/// The Y scale runs from the bottom of the screen rectangle to its top.
#[derive(Debug, Clone)]
pub(crate) struct Transform {
    screen: ScreenRect,
    x_scale: LinearScale,
    y_scale: LinearScale,
}

impl Transform {
    /// Create a transform for the given domains and screen rectangle.
    pub(crate) fn new(domains: Viewport, screen: ScreenRect) -> Option<Self> {
        if !screen.is_valid() || !domains.is_finite() {
            return None;
        }
        let x_scale = LinearScale::new(domains.x, (screen.min.x as f64, screen.max.x as f64));
        let y_scale = LinearScale::new(domains.y, (screen.max.y as f64, screen.min.y as f64));
        Some(Self {
            screen,
            x_scale,
            y_scale,
        })
    }

    /// Access the screen rectangle.
    pub(crate) fn screen(&self) -> ScreenRect {
        self.screen
    }

    pub(crate) fn x_scale(&self) -> &LinearScale {
        &self.x_scale
    }

    pub(crate) fn y_scale(&self) -> &LinearScale {
        &self.y_scale
    }

    pub(crate) fn x_to_screen(&self, x: f64) -> f32 {
        self.x_scale.map(x) as f32
    }

    pub(crate) fn y_to_screen(&self, y: f64) -> f32 {
        self.y_scale.map(y) as f32
    }

    /// Map a data point into screen space.
    pub(crate) fn data_to_screen(&self, point: Point) -> Option<ScreenPoint> {
        if !point.is_finite() {
            return None;
        }
        Some(ScreenPoint::new(
            self.x_to_screen(point.x),
            self.y_to_screen(point.y),
        ))
    }

    /// Map a screen point into data space.
    pub(crate) fn screen_to_data(&self, point: ScreenPoint) -> Option<Point> {
        let x = self.x_scale.invert(point.x as f64);
        let y = self.y_scale.invert(point.y as f64);
        let point = Point::new(x, y);
        point.is_finite().then_some(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::Range;

    fn transform() -> Transform {
        let domains = Viewport::new(Range::new(0.0, 10.0), Range::new(0.0, 10.0));
        let screen = ScreenRect::new(ScreenPoint::new(50.0, 20.0), ScreenPoint::new(150.0, 120.0));
        Transform::new(domains, screen).expect("valid transform")
    }

    #[test]
    fn linear_roundtrip() {
        let transform = transform();
        let point = Point::new(5.0, 7.5);
        let screen_point = transform.data_to_screen(point).expect("finite point");
        let roundtrip = transform.screen_to_data(screen_point).expect("finite point");
        assert!((roundtrip.x - point.x).abs() < 1e-5);
        assert!((roundtrip.y - point.y).abs() < 1e-5);
    }

    #[test]
    fn y_axis_points_up() {
        let transform = transform();
        let bottom = transform.data_to_screen(Point::new(0.0, 0.0)).expect("point");
        let top = transform.data_to_screen(Point::new(10.0, 10.0)).expect("point");
        assert_eq!(bottom, ScreenPoint::new(50.0, 120.0));
        assert_eq!(top, ScreenPoint::new(150.0, 20.0));
    }

    #[test]
    fn rejects_empty_screen() {
        let domains = Viewport::new(Range::new(0.0, 1.0), Range::new(0.0, 1.0));
        let screen = ScreenRect::new(ScreenPoint::new(0.0, 0.0), ScreenPoint::new(0.0, 10.0));
        assert!(Transform::new(domains, screen).is_none());
    }

    #[test]
    fn non_finite_points_do_not_map() {
        assert!(transform().data_to_screen(Point::new(f64::NAN, 1.0)).is_none());
    }
}
