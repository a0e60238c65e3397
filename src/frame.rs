//! Frame building: chart model + UI state -> render commands.

use crate::axis::{AxisConfig, AxisPosition, TextMeasurer, tick_values};
use crate::chart::LineChart;
use crate::curve::{polyline_length, truncate_polyline};
use crate::geom::{Point, ScreenPoint, ScreenRect};
use crate::interaction::{LegendHit, PlotRegions};
use crate::render::{
    Color, LineSegment, LineStyle, MarkerShape, MarkerStyle, RectStyle, RenderCommand, RenderList,
    TextStyle, polyline_segments,
};
use crate::series::Series;
use crate::style::Theme;
use crate::tooltip::{HoverInfo, compute_hover};
use crate::transform::Transform;

const TICK_LENGTH: f32 = 6.0;
const TICK_LABEL_GAP: f32 = 3.0;
const TITLE_SIZE: f32 = 12.0;
const TOOLTIP_FONT_SIZE: f32 = 12.0;
const TOOLTIP_PADDING: f32 = 8.0;
const TOOLTIP_OFFSET: f32 = 12.0;
const TOOLTIP_LINE_GAP: f32 = 4.0;
const SWATCH_SIZE: f32 = 8.0;
const SWATCH_GAP: f32 = 6.0;
const GLYPH_SIZE: f32 = 10.0;
const GLYPH_RING_SIZE: f32 = 13.0;
const LEGEND_ROW_HEIGHT: f32 = 20.0;
const LEGEND_OFFSET: f32 = 16.0;
const LEGEND_SWATCH_WIDTH: f32 = 16.0;
const LEGEND_FONT_SIZE: f32 = 12.0;
const NOTICE_SIZE: f32 = 14.0;

/// Render output for one chart frame.
#[derive(Debug, Clone, Default)]
pub(crate) struct ChartFrame {
    pub(crate) render: RenderList,
}

/// Per-view interaction state, updated by pointer events and frame builds.
#[derive(Debug, Clone, Default)]
pub(crate) struct ChartUiState {
    pub(crate) regions: PlotRegions,
    pub(crate) transform: Option<Transform>,
    pub(crate) hover: Option<ScreenPoint>,
}

/// Blend from previous data towards the current data.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Morph {
    /// Previous points, one list per series in chart order.
    pub(crate) previous: Vec<Vec<Point>>,
    /// Blend progress, 0 at the previous data and 1 at the current data.
    pub(crate) progress: f32,
}

/// Animation state applied while building a frame.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FrameAnimation {
    /// Fraction of every stroke that is drawn.
    pub(crate) reveal: f32,
    /// Opacity multiplier for point markers.
    pub(crate) marker_opacity: f32,
    pub(crate) morph: Option<Morph>,
}

impl Default for FrameAnimation {
    fn default() -> Self {
        Self {
            reveal: 1.0,
            marker_opacity: 1.0,
            morph: None,
        }
    }
}

pub(crate) fn build_frame(
    chart: &LineChart,
    state: &mut ChartUiState,
    bounds: ScreenRect,
    measurer: &dyn TextMeasurer,
    anim: &FrameAnimation,
) -> ChartFrame {
    let mut render = RenderList::new();
    state.regions = PlotRegions::default();
    state.transform = None;

    let Some((outer, plot_rect)) = chart.plot_rect(bounds) else {
        return ChartFrame { render };
    };
    let theme = chart.theme();
    render.push(RenderCommand::Rect {
        rect: outer,
        style: RectStyle {
            fill: theme.background,
            stroke: Color::TRANSPARENT,
            stroke_width: 0.0,
            radius: 0.0,
        },
    });

    let Some(transform) = chart
        .domains()
        .and_then(|domains| Transform::new(domains, plot_rect))
    else {
        build_notice(&mut render, theme, plot_rect, measurer);
        return ChartFrame { render };
    };

    state.regions.plot = Some(plot_rect);
    build_grid(&mut render, chart, &transform, plot_rect);
    build_series(&mut render, chart, &transform, plot_rect, anim);
    for axis in [chart.x_axis(), chart.y_axis()].into_iter().flatten() {
        build_axis(&mut render, axis, theme, &transform, plot_rect, outer, measurer);
    }
    if let Some(cursor) = state.hover
        && let Some(info) = compute_hover(chart, &transform, cursor)
    {
        build_hover(&mut render, &info, theme, plot_rect, outer, measurer);
    }
    if chart.has_legend() {
        state.regions.legend = build_legend(&mut render, chart, plot_rect, outer);
    }

    state.transform = Some(transform);
    ChartFrame { render }
}

fn build_notice(
    render: &mut RenderList,
    theme: &Theme,
    plot_rect: ScreenRect,
    measurer: &dyn TextMeasurer,
) {
    let text = "No data";
    let (width, height) = measurer.measure(text, NOTICE_SIZE);
    let center = plot_rect.center();
    render.push_text(
        ScreenPoint::new(center.x - width * 0.5, center.y - height * 0.5),
        text,
        TextStyle {
            color: theme.muted_text,
            size: NOTICE_SIZE,
        },
    );
}

fn build_grid(render: &mut RenderList, chart: &LineChart, transform: &Transform, plot_rect: ScreenRect) {
    let Some(grid) = chart.grid() else {
        return;
    };
    let mut segments = Vec::new();
    if grid.rows {
        for value in transform.y_scale().ticks(grid.row_ticks) {
            let y = transform.y_to_screen(value);
            segments.push(LineSegment::new(
                ScreenPoint::new(plot_rect.min.x, y),
                ScreenPoint::new(plot_rect.max.x, y),
            ));
        }
    }
    if grid.columns {
        let dates = chart.x_format().is_date();
        for value in tick_values(transform.x_scale(), grid.column_ticks, dates) {
            let x = transform.x_to_screen(value);
            segments.push(LineSegment::new(
                ScreenPoint::new(x, plot_rect.min.y),
                ScreenPoint::new(x, plot_rect.max.y),
            ));
        }
    }
    let color = grid.color.unwrap_or(chart.theme().grid).fade(grid.opacity);
    render.push(RenderCommand::ClipRect(plot_rect));
    render.push_line(segments, LineStyle::solid(color, 1.0));
    render.push(RenderCommand::ClipEnd);
}

fn build_series(
    render: &mut RenderList,
    chart: &LineChart,
    transform: &Transform,
    plot_rect: ScreenRect,
    anim: &FrameAnimation,
) {
    let mut markers = Vec::new();
    render.push(RenderCommand::ClipRect(plot_rect));
    for (index, series) in chart.series().iter().enumerate() {
        if !series.is_visible() {
            continue;
        }
        let previous = anim.morph.as_ref().map(|morph| {
            let previous: &[Point] = morph.previous.get(index).map_or(&[], Vec::as_slice);
            (previous, morph.progress)
        });
        let points = series_screen_points(series, transform, previous);
        if points.is_empty() {
            continue;
        }

        let mut path = series.curve().flatten(&points);
        if anim.reveal < 1.0 {
            path = truncate_polyline(&path, polyline_length(&path) * anim.reveal.max(0.0));
        }
        let mut style = series.style();
        style.color = style.color.fade(series.opacity());
        render.push_line(polyline_segments(&path, None), style);

        if let Some(marker) = series.markers()
            && anim.marker_opacity > 0.0
        {
            let style = MarkerStyle {
                color: marker.color.fade(anim.marker_opacity),
                ..marker
            };
            markers.push((points, style));
        }
    }
    render.push(RenderCommand::ClipEnd);

    for (points, style) in markers {
        render.push(RenderCommand::Points { points, style });
    }
}

/// Screen points of a series, blended from its previous data when morphing.
///
/// A previous point missing for an index starts at y = 0 at the same x.
fn series_screen_points(
    series: &Series,
    transform: &Transform,
    previous: Option<(&[Point], f32)>,
) -> Vec<ScreenPoint> {
    series
        .points()
        .iter()
        .enumerate()
        .filter_map(|(index, point)| {
            let target = transform.data_to_screen(*point)?;
            let Some((previous, progress)) = previous else {
                return Some(target);
            };
            let start = previous
                .get(index)
                .copied()
                .unwrap_or_else(|| Point::new(point.x, 0.0));
            let start = transform.data_to_screen(start).unwrap_or(target);
            Some(start.lerp(target, progress))
        })
        .collect()
}

fn build_axis(
    render: &mut RenderList,
    axis: &AxisConfig,
    theme: &Theme,
    transform: &Transform,
    plot_rect: ScreenRect,
    outer: ScreenRect,
    measurer: &dyn TextMeasurer,
) {
    let color = axis.color().unwrap_or(theme.axis);
    let label_style = TextStyle {
        color,
        size: axis.label_size(),
    };
    let position = axis.position();
    let scale = if position.is_vertical() {
        transform.y_scale()
    } else {
        transform.x_scale()
    };

    let mut lines = Vec::new();
    match position {
        AxisPosition::Bottom => {
            let y = plot_rect.max.y;
            lines.push(LineSegment::new(
                ScreenPoint::new(plot_rect.min.x, y),
                ScreenPoint::new(plot_rect.max.x, y),
            ));
            let mut last_right = f32::NEG_INFINITY;
            for tick in axis.ticks(scale) {
                let x = transform.x_to_screen(tick.value);
                lines.push(LineSegment::new(
                    ScreenPoint::new(x, y),
                    ScreenPoint::new(x, y + TICK_LENGTH),
                ));
                let (width, _) = measurer.measure(&tick.label, axis.label_size());
                let left = x - width * 0.5;
                if left < last_right + TICK_LABEL_GAP {
                    continue;
                }
                last_right = left + width;
                render.push_text(
                    ScreenPoint::new(left, y + TICK_LENGTH + TICK_LABEL_GAP),
                    tick.label,
                    label_style.clone(),
                );
            }
        }
        AxisPosition::Left | AxisPosition::Right => {
            let (x, direction) = match position {
                AxisPosition::Left => (plot_rect.min.x, -1.0),
                _ => (plot_rect.max.x, 1.0),
            };
            lines.push(LineSegment::new(
                ScreenPoint::new(x, plot_rect.min.y),
                ScreenPoint::new(x, plot_rect.max.y),
            ));
            for tick in axis.ticks(scale) {
                let y = transform.y_to_screen(tick.value);
                lines.push(LineSegment::new(
                    ScreenPoint::new(x, y),
                    ScreenPoint::new(x + TICK_LENGTH * direction, y),
                ));
                let (width, height) = measurer.measure(&tick.label, axis.label_size());
                let offset = TICK_LENGTH + TICK_LABEL_GAP;
                let left = if direction < 0.0 {
                    x - offset - width
                } else {
                    x + offset
                };
                render.push_text(
                    ScreenPoint::new(left, y - height * 0.5),
                    tick.label,
                    label_style.clone(),
                );
            }
        }
    }
    render.push_line(lines, LineStyle::solid(color, 1.0));

    if let Some(title) = axis.title() {
        build_axis_title(render, axis, title, color, plot_rect, outer, measurer);
    }
}

/// Axis titles are drawn horizontally: centered below a bottom axis, and
/// above the plot next to a vertical axis.
fn build_axis_title(
    render: &mut RenderList,
    axis: &AxisConfig,
    title: &str,
    color: Color,
    plot_rect: ScreenRect,
    outer: ScreenRect,
    measurer: &dyn TextMeasurer,
) {
    let (width, height) = measurer.measure(title, TITLE_SIZE);
    let position = match axis.position() {
        AxisPosition::Bottom => ScreenPoint::new(
            plot_rect.center().x - width * 0.5,
            plot_rect.max.y + axis.title_offset(),
        ),
        AxisPosition::Left => ScreenPoint::new(
            plot_rect.min.x - axis.title_offset(),
            plot_rect.min.y - height - TICK_LABEL_GAP,
        ),
        AxisPosition::Right => ScreenPoint::new(
            plot_rect.max.x + axis.title_offset() - width,
            plot_rect.min.y - height - TICK_LABEL_GAP,
        ),
    };
    render.push_text(
        clamp_point(position, outer, (width, height)),
        title,
        TextStyle {
            color,
            size: TITLE_SIZE,
        },
    );
}

fn build_hover(
    render: &mut RenderList,
    info: &HoverInfo,
    theme: &Theme,
    plot_rect: ScreenRect,
    outer: ScreenRect,
    measurer: &dyn TextMeasurer,
) {
    if let Some(x) = info.line_x {
        render.push_line(
            vec![LineSegment::new(
                ScreenPoint::new(x, plot_rect.min.y),
                ScreenPoint::new(x, plot_rect.max.y),
            )],
            LineStyle::dashed(theme.hover_line, 1.0, 4.0, 4.0),
        );
    }

    for (point, color) in &info.markers {
        render.push(RenderCommand::Points {
            points: vec![*point],
            style: MarkerStyle {
                color: *color,
                size: GLYPH_SIZE,
                shape: MarkerShape::Circle,
            },
        });
        render.push(RenderCommand::Points {
            points: vec![*point],
            style: MarkerStyle {
                color: theme.background,
                size: GLYPH_RING_SIZE,
                shape: MarkerShape::Ring,
            },
        });
    }

    for label in &info.labels {
        let (width, height) = measurer.measure(&label.text, TOOLTIP_FONT_SIZE);
        let size = (width + TOOLTIP_PADDING, height + TOOLTIP_PADDING * 0.5);
        let origin = clamp_point(
            ScreenPoint::new(label.anchor.x - size.0 * 0.5, label.anchor.y - size.1),
            outer,
            size,
        );
        push_chip(render, &label.text, origin, size, label.color, Color::WHITE);
    }

    if let Some((x, text)) = &info.top_label {
        let (width, height) = measurer.measure(text, TOOLTIP_FONT_SIZE);
        let size = (width + TOOLTIP_PADDING, height + TOOLTIP_PADDING * 0.5);
        let origin = clamp_point(
            ScreenPoint::new(x - size.0 * 0.5, plot_rect.min.y - size.1 - TICK_LABEL_GAP),
            outer,
            size,
        );
        push_chip(render, text, origin, size, theme.text, theme.background);
    }

    if let Some(tooltip) = &info.tooltip {
        let mut text_width: f32 = 0.0;
        let mut line_height: f32 = 0.0;
        for line in &tooltip.lines {
            let (width, height) = measurer.measure(&line.text, TOOLTIP_FONT_SIZE);
            let swatch = if line.swatch.is_some() {
                SWATCH_SIZE + SWATCH_GAP
            } else {
                0.0
            };
            text_width = text_width.max(width + swatch);
            line_height = line_height.max(height);
        }
        let rows = tooltip.lines.len() as f32;
        let size = (
            text_width + TOOLTIP_PADDING * 2.0,
            rows * line_height + (rows - 1.0).max(0.0) * TOOLTIP_LINE_GAP + TOOLTIP_PADDING * 2.0,
        );
        let anchor = tooltip.anchor;
        let area = if info.clamp_to_plot { plot_rect } else { outer };
        let mut origin = ScreenPoint::new(anchor.x + TOOLTIP_OFFSET, anchor.y + TOOLTIP_OFFSET);
        if origin.x + size.0 > area.max.x {
            origin.x = anchor.x - size.0 - TOOLTIP_OFFSET;
        }
        if origin.y + size.1 > area.max.y {
            origin.y = anchor.y - size.1 - TOOLTIP_OFFSET;
        }
        let origin = clamp_point(origin, area, size);
        push_box(render, theme, origin, size);

        let mut y = origin.y + TOOLTIP_PADDING;
        for line in &tooltip.lines {
            let mut x = origin.x + TOOLTIP_PADDING;
            if let Some(swatch) = line.swatch {
                let top = y + (line_height - SWATCH_SIZE) * 0.5;
                render.push(RenderCommand::Rect {
                    rect: ScreenRect::from_origin_size(
                        ScreenPoint::new(x, top),
                        SWATCH_SIZE,
                        SWATCH_SIZE,
                    ),
                    style: RectStyle {
                        fill: swatch,
                        stroke: swatch,
                        stroke_width: 0.0,
                        radius: 2.0,
                    },
                });
                x += SWATCH_SIZE + SWATCH_GAP;
            }
            render.push_text(
                ScreenPoint::new(x, y),
                line.text.clone(),
                TextStyle {
                    color: theme.tooltip_text,
                    size: TOOLTIP_FONT_SIZE,
                },
            );
            y += line_height + TOOLTIP_LINE_GAP;
        }
    }
}

fn push_chip(
    render: &mut RenderList,
    text: &str,
    origin: ScreenPoint,
    size: (f32, f32),
    fill: Color,
    text_color: Color,
) {
    render.push(RenderCommand::Rect {
        rect: ScreenRect::from_origin_size(origin, size.0, size.1),
        style: RectStyle {
            fill,
            stroke: fill,
            stroke_width: 0.0,
            radius: 4.0,
        },
    });
    render.push_text(
        ScreenPoint::new(origin.x + TOOLTIP_PADDING * 0.5, origin.y + TOOLTIP_PADDING * 0.25),
        text,
        TextStyle {
            color: text_color,
            size: TOOLTIP_FONT_SIZE,
        },
    );
}

fn push_box(render: &mut RenderList, theme: &Theme, origin: ScreenPoint, size: (f32, f32)) {
    render.push(RenderCommand::Rect {
        rect: ScreenRect::from_origin_size(origin, size.0, size.1),
        style: RectStyle {
            fill: theme.tooltip_bg,
            stroke: theme.tooltip_border,
            stroke_width: 1.0,
            radius: 4.0,
        },
    });
}

fn build_legend(
    render: &mut RenderList,
    chart: &LineChart,
    plot_rect: ScreenRect,
    outer: ScreenRect,
) -> Vec<LegendHit> {
    let theme = chart.theme();
    let left = plot_rect.max.x + LEGEND_OFFSET;
    let mut hits = Vec::with_capacity(chart.series().len());
    for (index, series) in chart.series().iter().enumerate() {
        let top = plot_rect.min.y + index as f32 * LEGEND_ROW_HEIGHT;
        let alpha = if series.is_visible() {
            1.0
        } else {
            theme.legend_inactive_alpha
        };
        let mid = top + LEGEND_ROW_HEIGHT * 0.5;
        render.push_line(
            vec![LineSegment::new(
                ScreenPoint::new(left, mid),
                ScreenPoint::new(left + LEGEND_SWATCH_WIDTH, mid),
            )],
            LineStyle::solid(series.color().fade(alpha), 3.0),
        );
        render.push_text(
            ScreenPoint::new(left + LEGEND_SWATCH_WIDTH + SWATCH_GAP, mid - LEGEND_FONT_SIZE * 0.6),
            series.name(),
            TextStyle {
                color: theme.text.fade(alpha),
                size: LEGEND_FONT_SIZE,
            },
        );
        hits.push(LegendHit {
            series_id: series.id(),
            rect: ScreenRect::new(
                ScreenPoint::new(left, top),
                ScreenPoint::new(outer.max.x.max(left + 1.0), top + LEGEND_ROW_HEIGHT),
            ),
        });
    }
    hits
}

/// Shift a box of `size` at `origin` so it stays inside `rect` where possible.
fn clamp_point(origin: ScreenPoint, rect: ScreenRect, size: (f32, f32)) -> ScreenPoint {
    let max_x = (rect.max.x - size.0).max(rect.min.x);
    let max_y = (rect.max.y - size.1).max(rect.min.y);
    ScreenPoint::new(origin.x.clamp(rect.min.x, max_x), origin.y.clamp(rect.min.y, max_y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::GridConfig;
    use crate::geom::Margin;
    use crate::interaction::HitRegion;
    use crate::tooltip::HoverMode;

    struct FixedMeasurer;

    impl TextMeasurer for FixedMeasurer {
        fn measure(&self, text: &str, size: f32) -> (f32, f32) {
            (text.chars().count() as f32 * size * 0.5, size)
        }
    }

    fn bounds() -> ScreenRect {
        ScreenRect::from_origin_size(ScreenPoint::new(0.0, 0.0), 800.0, 600.0)
    }

    fn series(name: &str, values: &[f64]) -> Series {
        Series::line(name).with_points(
            values
                .iter()
                .enumerate()
                .map(|(i, &y)| Point::new(i as f64, y)),
        )
    }

    fn texts(frame: &ChartFrame) -> Vec<String> {
        frame
            .render
            .commands()
            .iter()
            .filter_map(|command| match command {
                RenderCommand::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    fn stroked(frame: &ChartFrame) -> Vec<(LineStyle, Vec<LineSegment>)> {
        frame
            .render
            .commands()
            .iter()
            .filter_map(|command| match command {
                RenderCommand::LineSegments { segments, style } => Some((*style, segments.clone())),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn empty_chart_shows_notice() {
        let chart = LineChart::builder().build();
        let mut state = ChartUiState::default();
        let frame = build_frame(&chart, &mut state, bounds(), &FixedMeasurer, &FrameAnimation::default());
        assert_eq!(texts(&frame), vec!["No data".to_string()]);
        assert!(state.transform.is_none());
        assert!(state.regions.plot.is_none());
    }

    #[test]
    fn records_plot_rect_and_transform() {
        let chart = LineChart::builder()
            .fixed_size(500.0, 300.0)
            .series(series("a", &[1.0, 3.0, 2.0]))
            .build();
        let mut state = ChartUiState::default();
        build_frame(&chart, &mut state, bounds(), &FixedMeasurer, &FrameAnimation::default());
        let plot = state.regions.plot.expect("plot rect");
        assert_eq!(plot.min, ScreenPoint::new(40.0, 20.0));
        assert_eq!(plot.max, ScreenPoint::new(480.0, 260.0));
        assert!(state.transform.is_some());
    }

    #[test]
    fn reveal_shortens_the_stroke() {
        let chart = LineChart::builder().series(series("a", &[0.0, 10.0, 0.0, 10.0])).build();
        let mut state = ChartUiState::default();
        let full = build_frame(&chart, &mut state, bounds(), &FixedMeasurer, &FrameAnimation::default());
        let half = build_frame(
            &chart,
            &mut state,
            bounds(),
            &FixedMeasurer,
            &FrameAnimation {
                reveal: 0.5,
                ..FrameAnimation::default()
            },
        );
        let length = |frame: &ChartFrame| -> f32 {
            stroked(frame)
                .iter()
                .flat_map(|(_, segments)| segments.iter())
                .map(|segment| segment.start.distance(segment.end))
                .sum()
        };
        assert!((length(&half) * 2.0 - length(&full)).abs() < 0.5);
    }

    #[test]
    fn hidden_markers_are_skipped() {
        let chart = LineChart::builder()
            .series(series("a", &[1.0, 2.0]).with_markers(MarkerStyle::default()))
            .build();
        let mut state = ChartUiState::default();
        let frame = build_frame(
            &chart,
            &mut state,
            bounds(),
            &FixedMeasurer,
            &FrameAnimation {
                marker_opacity: 0.0,
                ..FrameAnimation::default()
            },
        );
        assert!(
            !frame
                .render
                .commands()
                .iter()
                .any(|command| matches!(command, RenderCommand::Points { .. }))
        );
    }

    #[test]
    fn morph_starts_from_previous_points() {
        let chart = LineChart::builder().series(series("a", &[10.0, 10.0])).build();
        let mut state = ChartUiState::default();
        let frame = build_frame(
            &chart,
            &mut state,
            bounds(),
            &FixedMeasurer,
            &FrameAnimation {
                morph: Some(Morph {
                    previous: vec![vec![Point::new(0.0, 0.0)]],
                    progress: 0.0,
                }),
                ..FrameAnimation::default()
            },
        );
        let plot = state.regions.plot.expect("plot rect");
        let (_, segments) = &stroked(&frame)[0];
        assert_eq!(segments[0].start.y, plot.max.y);
        assert_eq!(segments[0].end.y, plot.max.y);
    }

    #[test]
    fn axes_and_grid_are_drawn() {
        let chart = LineChart::builder()
            .x_axis(AxisConfig::builder(AxisPosition::Bottom).title("Time").build())
            .y_axis(AxisConfig::left())
            .grid(GridConfig::default())
            .series(series("a", &[0.0, 50.0, 100.0]))
            .build();
        let mut state = ChartUiState::default();
        let frame = build_frame(&chart, &mut state, bounds(), &FixedMeasurer, &FrameAnimation::default());
        let labels = texts(&frame);
        assert!(labels.contains(&"Time".to_string()));
        assert!(labels.contains(&"100".to_string()));
        assert!(matches!(frame.render.commands()[1], RenderCommand::ClipRect(_)));
    }

    #[test]
    fn legend_rows_are_hit_regions() {
        let mut chart = LineChart::builder()
            .margin(Margin::new(20.0, 120.0, 40.0, 50.0))
            .legend(true)
            .series(series("a", &[1.0, 2.0]))
            .series(series("b", &[2.0, 1.0]))
            .build();
        let mut state = ChartUiState::default();
        build_frame(&chart, &mut state, bounds(), &FixedMeasurer, &FrameAnimation::default());
        assert_eq!(state.regions.legend.len(), 2);
        let second = state.regions.legend[1].rect.center();
        let HitRegion::Legend(id) = state.regions.hit_test(second) else {
            panic!("expected legend hit");
        };
        assert_eq!(chart.toggle_series(id), Some(false));
        assert_eq!(id, chart.series()[1].id());
    }

    #[test]
    fn hover_draws_tooltip_inside_chart() {
        let chart = LineChart::builder()
            .hover(HoverMode::Nearest {
                hover_line: true,
                marker: true,
                clamp_to_plot: true,
            })
            .series(series("a", &[1.0, 2.0, 3.0]))
            .build();
        let mut state = ChartUiState {
            hover: Some(ScreenPoint::new(470.0, 30.0)),
            ..ChartUiState::default()
        };
        let frame = build_frame(&chart, &mut state, bounds(), &FixedMeasurer, &FrameAnimation::default());
        assert!(texts(&frame).contains(&"Value: 3.00".to_string()));
        let plot = state.regions.plot.expect("plot rect");
        let boxes: Vec<ScreenRect> = frame
            .render
            .commands()
            .iter()
            .filter_map(|command| match command {
                RenderCommand::Rect { rect, style } if style.radius > 0.0 => Some(*rect),
                _ => None,
            })
            .collect();
        assert_eq!(boxes.len(), 1);
        assert!(plot.contains(boxes[0].min) && plot.contains(boxes[0].max));
    }

    #[test]
    fn clamp_keeps_box_inside() {
        let rect = ScreenRect::from_origin_size(ScreenPoint::new(0.0, 0.0), 100.0, 100.0);
        let clamped = clamp_point(ScreenPoint::new(90.0, -5.0), rect, (30.0, 10.0));
        assert_eq!(clamped, ScreenPoint::new(70.0, 0.0));
    }
}
