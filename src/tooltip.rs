//! Hover readouts.
//!
//! A [`HoverMode`] turns the pointer position into a [`HoverInfo`]: the
//! overlays a frame draws on top of the series. Nothing here draws; the
//! frame builder lays the readout out and emits render commands.

use crate::chart::LineChart;
use crate::geom::ScreenPoint;
use crate::interaction::{SeriesReading, lookup_series, nearest_index};
use crate::render::Color;
use crate::transform::Transform;

/// Vertical distance between a per-series label and its point.
pub(crate) const SERIES_LABEL_OFFSET: f32 = 40.0;

/// How a chart reacts to the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoverMode {
    /// No hover readout.
    #[default]
    None,
    /// Snap to the nearest point of the first visible series.
    Nearest {
        /// Draw a dashed vertical line through the point.
        hover_line: bool,
        /// Draw a glyph on the point.
        marker: bool,
        /// Keep the tooltip box inside the plot area.
        clamp_to_plot: bool,
    },
    /// One tooltip listing the nearest value of every visible series.
    AllSeries,
    /// One label per series above its nearest point, plus a timestamp
    /// along the top edge.
    PerSeries,
}

/// A row of tooltip text.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TooltipLine {
    pub(crate) text: String,
    pub(crate) swatch: Option<Color>,
}

impl TooltipLine {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            swatch: None,
        }
    }
}

/// A tooltip box anchored at a screen position.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TooltipBox {
    pub(crate) anchor: ScreenPoint,
    pub(crate) lines: Vec<TooltipLine>,
}

/// A label filled with the series color, centered horizontally on `anchor`
/// and sitting above it.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SeriesLabel {
    pub(crate) anchor: ScreenPoint,
    pub(crate) text: String,
    pub(crate) color: Color,
}

/// Everything a frame needs to draw the hover state.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct HoverInfo {
    /// Screen x of the dashed hover line.
    pub(crate) line_x: Option<f32>,
    /// Glyphs drawn on hovered points.
    pub(crate) markers: Vec<(ScreenPoint, Color)>,
    pub(crate) tooltip: Option<TooltipBox>,
    pub(crate) labels: Vec<SeriesLabel>,
    /// Timestamp drawn along the top edge, centered on the given x.
    pub(crate) top_label: Option<(f32, String)>,
    pub(crate) clamp_to_plot: bool,
}

/// Compute the hover readout for a cursor position.
///
/// Returns `None` when the cursor is outside the plot area, the chart has no
/// hover behavior or there is nothing to read.
pub(crate) fn compute_hover(
    chart: &LineChart,
    transform: &Transform,
    cursor: ScreenPoint,
) -> Option<HoverInfo> {
    if !transform.screen().contains(cursor) {
        return None;
    }
    let x = transform.screen_to_data(cursor)?.x;
    match *chart.hover() {
        HoverMode::None => None,
        HoverMode::Nearest {
            hover_line,
            marker,
            clamp_to_plot,
        } => nearest(chart, transform, x, hover_line, marker, clamp_to_plot),
        HoverMode::AllSeries => all_series(chart, transform, cursor, x),
        HoverMode::PerSeries => per_series(chart, transform, cursor, x),
    }
}

fn nearest(
    chart: &LineChart,
    transform: &Transform,
    x: f64,
    hover_line: bool,
    marker: bool,
    clamp_to_plot: bool,
) -> Option<HoverInfo> {
    let series = chart.series().iter().find(|series| series.is_visible())?;
    let index = nearest_index(series.points(), x)?;
    let point = series.points()[index];
    let screen = transform.data_to_screen(point)?;

    let mut info = HoverInfo {
        line_x: hover_line.then_some(screen.x),
        clamp_to_plot,
        ..HoverInfo::default()
    };
    if marker {
        info.markers.push((screen, series.color()));
    }
    info.tooltip = Some(TooltipBox {
        anchor: screen,
        lines: vec![
            TooltipLine::plain(chart.x_format().format(point.x)),
            TooltipLine::plain(format!("Value: {:.2}", point.y)),
        ],
    });
    Some(info)
}

fn all_series(
    chart: &LineChart,
    transform: &Transform,
    cursor: ScreenPoint,
    x: f64,
) -> Option<HoverInfo> {
    let readings = lookup_series(chart.series(), x);
    if readings.is_empty() {
        return None;
    }
    let mut lines = vec![TooltipLine::plain(chart.x_format().format(x))];
    lines.extend(readings.iter().map(|reading| TooltipLine {
        text: format!("{}: {:.2}", reading.name, reading.point.y),
        swatch: Some(reading.color),
    }));
    Some(HoverInfo {
        line_x: Some(cursor.x),
        markers: reading_markers(&readings, transform),
        tooltip: Some(TooltipBox {
            anchor: cursor,
            lines,
        }),
        ..HoverInfo::default()
    })
}

fn per_series(
    chart: &LineChart,
    transform: &Transform,
    cursor: ScreenPoint,
    x: f64,
) -> Option<HoverInfo> {
    let readings = lookup_series(chart.series(), x);
    if readings.is_empty() {
        return None;
    }
    let labels = readings
        .iter()
        .filter_map(|reading| {
            let screen = transform.data_to_screen(reading.point)?;
            Some(SeriesLabel {
                anchor: ScreenPoint::new(screen.x, screen.y - SERIES_LABEL_OFFSET),
                text: format!("{} {:.2}", reading.name, reading.point.y),
                color: reading.color,
            })
        })
        .collect();
    Some(HoverInfo {
        line_x: Some(cursor.x),
        markers: reading_markers(&readings, transform),
        labels,
        top_label: Some((cursor.x, chart.x_format().format(x))),
        ..HoverInfo::default()
    })
}

fn reading_markers(readings: &[SeriesReading], transform: &Transform) -> Vec<(ScreenPoint, Color)> {
    readings
        .iter()
        .filter_map(|reading| Some((transform.data_to_screen(reading.point)?, reading.color)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::{Point, ScreenRect};
    use crate::series::Series;

    fn chart(hover: HoverMode) -> LineChart {
        LineChart::builder()
            .hover(hover)
            .series(Series::line("a").with_points([
                Point::new(0.0, 0.0),
                Point::new(10.0, 10.0),
                Point::new(20.0, 5.0),
            ]))
            .series(Series::line("b").with_points([Point::new(0.0, 2.0), Point::new(20.0, 4.0)]))
            .build()
    }

    fn transform(chart: &LineChart) -> Transform {
        let screen = ScreenRect::new(ScreenPoint::new(0.0, 0.0), ScreenPoint::new(200.0, 100.0));
        Transform::new(chart.domains().expect("domains"), screen).expect("transform")
    }

    const NEAREST: HoverMode = HoverMode::Nearest {
        hover_line: true,
        marker: true,
        clamp_to_plot: false,
    };

    #[test]
    fn nearest_snaps_to_point() {
        let chart = chart(NEAREST);
        let info = compute_hover(&chart, &transform(&chart), ScreenPoint::new(60.0, 50.0))
            .expect("hover info");
        assert_eq!(info.line_x, Some(100.0));
        assert_eq!(info.markers.len(), 1);
        assert_eq!(info.markers[0].0, ScreenPoint::new(100.0, 0.0));
        let tooltip = info.tooltip.expect("tooltip");
        let lines: Vec<&str> = tooltip.lines.iter().map(|line| line.text.as_str()).collect();
        assert_eq!(lines, vec!["10", "Value: 10.00"]);
    }

    #[test]
    fn outside_plot_hides_everything() {
        let chart = chart(NEAREST);
        assert!(compute_hover(&chart, &transform(&chart), ScreenPoint::new(250.0, 50.0)).is_none());
    }

    #[test]
    fn no_hover_mode_reads_nothing() {
        let chart = chart(HoverMode::None);
        assert!(compute_hover(&chart, &transform(&chart), ScreenPoint::new(60.0, 50.0)).is_none());
    }

    #[test]
    fn all_series_lists_active_series() {
        let mut chart = chart(HoverMode::AllSeries);
        let transform = transform(&chart);
        let info = compute_hover(&chart, &transform, ScreenPoint::new(20.0, 30.0)).expect("info");
        let tooltip = info.tooltip.expect("tooltip");
        assert_eq!(tooltip.anchor, ScreenPoint::new(20.0, 30.0));
        assert_eq!(tooltip.lines.len(), 3);
        assert_eq!(tooltip.lines[1].text, "a: 0.00");
        assert_eq!(tooltip.lines[2].text, "b: 2.00");
        assert!(tooltip.lines[1].swatch.is_some());

        let id = chart.series()[0].id();
        chart.toggle_series(id);
        let info = compute_hover(&chart, &transform, ScreenPoint::new(20.0, 30.0)).expect("info");
        let tooltip = info.tooltip.expect("tooltip");
        assert_eq!(tooltip.lines.len(), 2);
        assert_eq!(tooltip.lines[1].text, "b: 2.00");
    }

    #[test]
    fn all_series_hidden_reads_nothing() {
        let mut chart = chart(HoverMode::AllSeries);
        let transform = transform(&chart);
        let ids: Vec<_> = chart.series().iter().map(Series::id).collect();
        for id in ids {
            chart.toggle_series(id);
        }
        assert!(compute_hover(&chart, &transform, ScreenPoint::new(20.0, 30.0)).is_none());
    }

    #[test]
    fn per_series_labels_sit_above_points() {
        let chart = chart(HoverMode::PerSeries);
        let info = compute_hover(&chart, &transform(&chart), ScreenPoint::new(190.0, 30.0))
            .expect("info");
        assert_eq!(info.labels.len(), 2);
        assert_eq!(info.labels[0].anchor, ScreenPoint::new(200.0, 50.0 - SERIES_LABEL_OFFSET));
        assert_eq!(info.top_label.as_ref().map(|(x, _)| *x), Some(190.0));
        assert_eq!(info.line_x, Some(190.0));
    }
}
