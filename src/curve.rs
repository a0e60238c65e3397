//! Line interpolation between data points.
//!
//! Curves are evaluated in screen space and flattened into polylines so that
//! every backend only has to stroke straight segments.

use crate::geom::ScreenPoint;

const BEZIER_STEPS: usize = 16;

/// Interpolation used between consecutive points of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Curve {
    /// Straight segments.
    #[default]
    Linear,
    /// Cubic interpolation that preserves monotonicity in y, assuming
    /// points are sorted by x.
    MonotoneX,
}

impl Curve {
    /// Flatten the curve through `points` into a polyline.
    pub(crate) fn flatten(self, points: &[ScreenPoint]) -> Vec<ScreenPoint> {
        match self {
            Self::Linear => points.to_vec(),
            Self::MonotoneX if points.len() < 3 => points.to_vec(),
            Self::MonotoneX => flatten_monotone(points),
        }
    }
}

fn flatten_monotone(points: &[ScreenPoint]) -> Vec<ScreenPoint> {
    let tangents = monotone_tangents(points);
    let mut out = Vec::with_capacity((points.len() - 1) * BEZIER_STEPS + 1);
    out.push(points[0]);
    for index in 0..points.len() - 1 {
        let p0 = points[index];
        let p1 = points[index + 1];
        let dx = (p1.x - p0.x) / 3.0;
        let c0 = ScreenPoint::new(p0.x + dx, p0.y + dx * tangents[index]);
        let c1 = ScreenPoint::new(p1.x - dx, p1.y - dx * tangents[index + 1]);
        for step in 1..=BEZIER_STEPS {
            let t = step as f32 / BEZIER_STEPS as f32;
            out.push(cubic(p0, c0, c1, p1, t));
        }
    }
    out
}

/// Tangent slope at every point. Interior tangents follow the
/// Fritsch-Carlson constraint; the ends use a one-sided estimate.
pub(crate) fn monotone_tangents(points: &[ScreenPoint]) -> Vec<f32> {
    let n = points.len();
    let mut tangents = vec![0.0_f32; n];
    if n < 2 {
        return tangents;
    }
    if n == 2 {
        let slope = secant(points[0], points[1]);
        tangents[0] = slope;
        tangents[1] = slope;
        return tangents;
    }
    for index in 1..n - 1 {
        tangents[index] = interior_slope(points[index - 1], points[index], points[index + 1]);
    }
    tangents[0] = end_slope(points[0], points[1], tangents[1]);
    tangents[n - 1] = end_slope(points[n - 2], points[n - 1], tangents[n - 2]);
    tangents
}

fn secant(p0: ScreenPoint, p1: ScreenPoint) -> f32 {
    let h = p1.x - p0.x;
    if h == 0.0 { 0.0 } else { (p1.y - p0.y) / h }
}

fn interior_slope(p0: ScreenPoint, p1: ScreenPoint, p2: ScreenPoint) -> f32 {
    let h0 = p1.x - p0.x;
    let h1 = p2.x - p1.x;
    let s0 = (p1.y - p0.y) / h0;
    let s1 = (p2.y - p1.y) / h1;
    let p = (s0 * h1 + s1 * h0) / (h0 + h1);
    let slope = (sign(s0) + sign(s1)) * s0.abs().min(s1.abs()).min(0.5 * p.abs());
    if slope.is_finite() { slope } else { 0.0 }
}

fn end_slope(p0: ScreenPoint, p1: ScreenPoint, tangent: f32) -> f32 {
    let h = p1.x - p0.x;
    if h == 0.0 {
        tangent
    } else {
        (3.0 * (p1.y - p0.y) / h - tangent) / 2.0
    }
}

fn sign(value: f32) -> f32 {
    if value < 0.0 { -1.0 } else { 1.0 }
}

fn cubic(p0: ScreenPoint, c0: ScreenPoint, c1: ScreenPoint, p1: ScreenPoint, t: f32) -> ScreenPoint {
    let mt = 1.0 - t;
    let a = mt * mt * mt;
    let b = 3.0 * mt * mt * t;
    let c = 3.0 * mt * t * t;
    let d = t * t * t;
    ScreenPoint::new(
        a * p0.x + b * c0.x + c * c1.x + d * p1.x,
        a * p0.y + b * c0.y + c * c1.y + d * p1.y,
    )
}

/// Total length of a polyline.
pub(crate) fn polyline_length(points: &[ScreenPoint]) -> f32 {
    points
        .windows(2)
        .map(|pair| pair[0].distance(pair[1]))
        .sum()
}

/// Keep the leading part of a polyline up to `length` pixels.
pub(crate) fn truncate_polyline(points: &[ScreenPoint], length: f32) -> Vec<ScreenPoint> {
    let mut out = Vec::with_capacity(points.len());
    let Some(first) = points.first() else {
        return out;
    };
    if length <= 0.0 {
        return out;
    }
    out.push(*first);
    let mut remaining = length;
    for pair in points.windows(2) {
        let segment = pair[0].distance(pair[1]);
        if segment >= remaining {
            let t = if segment > 0.0 { remaining / segment } else { 1.0 };
            out.push(pair[0].lerp(pair[1], t));
            return out;
        }
        remaining -= segment;
        out.push(pair[1]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(values: &[(f32, f32)]) -> Vec<ScreenPoint> {
        values.iter().map(|&(x, y)| ScreenPoint::new(x, y)).collect()
    }

    #[test]
    fn two_points_stay_straight() {
        let points = pts(&[(0.0, 0.0), (10.0, 5.0)]);
        assert_eq!(Curve::MonotoneX.flatten(&points), points);
    }

    #[test]
    fn monotone_passes_through_points() {
        let points = pts(&[(0.0, 10.0), (10.0, 20.0), (20.0, 15.0), (30.0, 25.0)]);
        let flat = Curve::MonotoneX.flatten(&points);
        for point in &points {
            assert!(
                flat.iter()
                    .any(|p| (p.x - point.x).abs() < 1e-3 && (p.y - point.y).abs() < 1e-3)
            );
        }
    }

    #[test]
    fn monotone_does_not_overshoot_neighbours() {
        let points = pts(&[(0.0, 0.0), (10.0, 100.0), (20.0, 100.0), (30.0, 0.0), (40.0, 50.0)]);
        let flat = Curve::MonotoneX.flatten(&points);
        for pair in points.windows(2) {
            let lo = pair[0].y.min(pair[1].y) - 1e-3;
            let hi = pair[0].y.max(pair[1].y) + 1e-3;
            for p in flat.iter().filter(|p| p.x >= pair[0].x && p.x <= pair[1].x) {
                assert!(p.y >= lo && p.y <= hi, "{p:?} outside [{lo}, {hi}]");
            }
        }
    }

    #[test]
    fn flat_neighbours_get_zero_tangent() {
        let points = pts(&[(0.0, 0.0), (10.0, 5.0), (20.0, 5.0), (30.0, 9.0)]);
        let tangents = monotone_tangents(&points);
        assert_eq!(tangents[1], 0.0);
        assert_eq!(tangents[2], 0.0);
    }

    #[test]
    fn truncation_stops_mid_segment() {
        let points = pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
        assert_eq!(polyline_length(&points), 20.0);
        let half = truncate_polyline(&points, 15.0);
        assert_eq!(half.last().copied(), Some(ScreenPoint::new(10.0, 5.0)));
        assert!(truncate_polyline(&points, 0.0).is_empty());
        assert_eq!(truncate_polyline(&points, 50.0), points);
    }
}
