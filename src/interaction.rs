//! Nearest-point lookup and hit testing.
//!
//! These helpers are shared by every hover behavior so that all demos snap
//! to data the same way.

use crate::geom::{Point, ScreenPoint, ScreenRect};
use crate::series::{Series, SeriesId};

/// Interaction hit regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HitRegion {
    /// Plot data area.
    Plot,
    /// A legend row.
    Legend(SeriesId),
    /// Anywhere else.
    Outside,
}

/// A clickable legend row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct LegendHit {
    pub(crate) series_id: SeriesId,
    pub(crate) rect: ScreenRect,
}

/// Screen regions for hit testing.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct PlotRegions {
    /// Plot data area.
    pub(crate) plot: Option<ScreenRect>,
    /// Legend rows.
    pub(crate) legend: Vec<LegendHit>,
}

impl PlotRegions {
    /// Determine which region contains the point. Legend rows win over the
    /// plot area.
    pub(crate) fn hit_test(&self, point: ScreenPoint) -> HitRegion {
        if let Some(hit) = self.legend.iter().find(|hit| hit.rect.contains(point)) {
            return HitRegion::Legend(hit.series_id);
        }
        match self.plot {
            Some(plot) if plot.contains(point) => HitRegion::Plot,
            _ => HitRegion::Outside,
        }
    }
}

/// Index of the first point whose x is not less than `x`.
pub fn bisect_left(points: &[Point], x: f64) -> usize {
    points.partition_point(|point| point.x < x)
}

/// The points on either side of `x`, or `None` when `x` falls outside the
/// data.
pub fn bracket(points: &[Point], x: f64) -> Option<(usize, usize)> {
    let index = bisect_left(points, x);
    if index == 0 || index >= points.len() {
        return None;
    }
    Some((index - 1, index))
}

/// Index of the point closest to `x` along the x axis.
///
/// Ties go to the earlier point. Queries before the first or after the last
/// point snap to that point.
pub fn nearest_index(points: &[Point], x: f64) -> Option<usize> {
    if points.is_empty() || x.is_nan() {
        return None;
    }
    match bracket(points, x) {
        Some((before, after)) => {
            let d0 = x - points[before].x;
            let d1 = points[after].x - x;
            Some(if d0 > d1 { after } else { before })
        }
        None if bisect_left(points, x) == 0 => Some(0),
        None => Some(points.len() - 1),
    }
}

/// The nearest point of one series.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SeriesReading {
    pub(crate) series_id: SeriesId,
    pub(crate) name: String,
    pub(crate) color: crate::render::Color,
    pub(crate) index: usize,
    pub(crate) point: Point,
}

/// Look up the nearest point of every visible, non-empty series.
///
/// Readings are returned in series order.
pub(crate) fn lookup_series(series: &[Series], x: f64) -> Vec<SeriesReading> {
    series
        .iter()
        .filter(|series| series.is_visible())
        .filter_map(|series| {
            let index = nearest_index(series.points(), x)?;
            Some(SeriesReading {
                series_id: series.id(),
                name: series.name().to_string(),
                color: series.color(),
                index,
                point: series.points()[index],
            })
        })
        .collect()
}

/// Flip the visibility of a series. Returns the new visibility.
pub(crate) fn toggle_series(series: &mut [Series], id: SeriesId) -> Option<bool> {
    let series = series.iter_mut().find(|series| series.id() == id)?;
    let visible = !series.is_visible();
    series.set_visible(visible);
    Some(visible)
}
