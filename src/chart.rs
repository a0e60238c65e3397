//! Line chart model and builder.

use crate::axis::{AxisConfig, AxisFormatter};
use crate::geom::{Margin, ScreenRect};
use crate::interaction::toggle_series;
use crate::render::Color;
use crate::scale::nice_range;
use crate::series::{Series, SeriesId};
use crate::style::Theme;
use crate::tooltip::HoverMode;
use crate::view::{Range, Viewport};

const DEFAULT_NICE_COUNT: usize = 10;

/// How a chart is sized inside its container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SizePolicy {
    /// Fixed size anchored at the container origin.
    Fixed {
        /// Width in pixels.
        width: f32,
        /// Height in pixels.
        height: f32,
    },
    /// Fill the container; nothing is drawn below `min` pixels on either side.
    Fill {
        /// Minimum width and height.
        min: f32,
    },
}

impl SizePolicy {
    /// Outer chart rectangle inside `container`, if it can be drawn.
    pub(crate) fn layout(&self, container: ScreenRect) -> Option<ScreenRect> {
        match *self {
            Self::Fixed { width, height } => {
                let rect = ScreenRect::from_origin_size(container.min, width, height);
                rect.is_valid().then_some(rect)
            }
            Self::Fill { min } => {
                (container.width() >= min && container.height() >= min).then_some(container)
            }
        }
    }
}

/// Policy used to derive the y domain from the data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum YDomain {
    /// Minimum to maximum.
    Extent {
        /// Round the domain to tick boundaries.
        nice: bool,
    },
    /// Extent widened by a fraction of its span on both ends.
    Padded {
        /// Fraction of the span added to each end.
        fraction: f64,
        /// Round the domain to tick boundaries.
        nice: bool,
    },
    /// Zero to the maximum.
    ZeroToMax {
        /// Round the domain to tick boundaries.
        nice: bool,
    },
    /// Zero to the maximum plus a fixed headroom; `fallback` is used as the
    /// upper bound when the maximum is zero.
    ZeroToMaxPlus {
        /// Added to the maximum.
        headroom: f64,
        /// Upper bound for all-zero data.
        fallback: f64,
    },
}

impl YDomain {
    fn resolve(&self, extent: Range) -> Range {
        match *self {
            Self::Extent { nice } => maybe_nice(extent, nice),
            Self::Padded { fraction, nice } => maybe_nice(extent.padded(fraction), nice),
            Self::ZeroToMax { nice } => maybe_nice(Range::new(0.0, extent.max), nice),
            Self::ZeroToMaxPlus { headroom, fallback } => {
                if extent.max == 0.0 {
                    Range::new(0.0, fallback)
                } else {
                    Range::new(0.0, extent.max + headroom)
                }
            }
        }
    }
}

fn maybe_nice(range: Range, nice: bool) -> Range {
    if nice {
        nice_range(range, DEFAULT_NICE_COUNT)
    } else {
        range
    }
}

/// Grid line configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridConfig {
    /// Horizontal lines at y ticks.
    pub rows: bool,
    /// Vertical lines at x ticks.
    pub columns: bool,
    /// Requested number of row ticks.
    pub row_ticks: usize,
    /// Requested number of column ticks.
    pub column_ticks: usize,
    /// Line color; the theme grid color when `None`.
    pub color: Option<Color>,
    /// Line opacity.
    pub opacity: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: true,
            columns: true,
            row_ticks: 10,
            column_ticks: 10,
            color: None,
            opacity: 1.0,
        }
    }
}

/// A line chart: series, layout and decoration.
#[derive(Debug, Clone)]
pub struct LineChart {
    size: SizePolicy,
    margin: Margin,
    theme: Theme,
    x_axis: Option<AxisConfig>,
    y_axis: Option<AxisConfig>,
    grid: Option<GridConfig>,
    x_nice: bool,
    y_domain: YDomain,
    y_include: Vec<f64>,
    x_format: AxisFormatter,
    hover: HoverMode,
    legend: bool,
    series: Vec<Series>,
}

impl LineChart {
    /// Start building a chart.
    pub fn builder() -> LineChartBuilder {
        LineChartBuilder::default()
    }

    /// Access the size policy.
    pub fn size(&self) -> SizePolicy {
        self.size
    }

    /// Access the margin.
    pub fn margin(&self) -> Margin {
        self.margin
    }

    /// Access the current theme.
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Access the x axis, if drawn.
    pub fn x_axis(&self) -> Option<&AxisConfig> {
        self.x_axis.as_ref()
    }

    /// Access the y axis, if drawn.
    pub fn y_axis(&self) -> Option<&AxisConfig> {
        self.y_axis.as_ref()
    }

    /// Access the grid configuration, if drawn.
    pub fn grid(&self) -> Option<&GridConfig> {
        self.grid.as_ref()
    }

    /// Formatter used for x values in tooltips.
    pub fn x_format(&self) -> &AxisFormatter {
        &self.x_format
    }

    /// Access the hover behavior.
    pub fn hover(&self) -> &HoverMode {
        &self.hover
    }

    /// Whether a legend is drawn in the right margin.
    pub fn has_legend(&self) -> bool {
        self.legend
    }

    /// Access all series.
    pub fn series(&self) -> &[Series] {
        &self.series
    }

    /// Access all series mutably.
    pub fn series_mut(&mut self) -> &mut [Series] {
        &mut self.series
    }

    /// Flip the visibility of a series. Returns the new visibility.
    pub fn toggle_series(&mut self, id: SeriesId) -> Option<bool> {
        toggle_series(&mut self.series, id)
    }

    /// Extra values the y domain must cover, such as the previous data of a
    /// transition.
    pub fn set_y_include(&mut self, values: Vec<f64>) {
        self.y_include = values;
    }

    /// Compute the x and y domains.
    ///
    /// Domains cover every series, hidden or not, so toggling a series does
    /// not rescale the chart. Returns `None` when there is no data.
    pub fn domains(&self) -> Option<Viewport> {
        let points = self.series.iter().flat_map(|series| series.points());
        let x = Range::extent(points.clone().map(|point| point.x))?;
        let y = Range::extent(
            points
                .map(|point| point.y)
                .chain(self.y_include.iter().copied()),
        )?;
        let x = maybe_nice(x, self.x_nice);
        Some(Viewport::new(x, self.y_domain.resolve(y)))
    }

    /// Inner plot rectangle for a container, after sizing and margins.
    pub(crate) fn plot_rect(&self, container: ScreenRect) -> Option<(ScreenRect, ScreenRect)> {
        let outer = self.size.layout(container)?;
        let inner = outer.inset(self.margin);
        inner.is_valid().then_some((outer, inner))
    }
}

/// Builder for configuring a chart before construction.
#[derive(Debug)]
pub struct LineChartBuilder {
    chart: LineChart,
}

impl Default for LineChartBuilder {
    fn default() -> Self {
        Self {
            chart: LineChart {
                size: SizePolicy::Fixed {
                    width: 500.0,
                    height: 300.0,
                },
                margin: Margin::default(),
                theme: Theme::default(),
                x_axis: None,
                y_axis: None,
                grid: None,
                x_nice: false,
                y_domain: YDomain::ZeroToMax { nice: false },
                y_include: Vec::new(),
                x_format: AxisFormatter::default(),
                hover: HoverMode::None,
                legend: false,
                series: Vec::new(),
            },
        }
    }
}

impl LineChartBuilder {
    /// Fixed chart size.
    pub fn fixed_size(mut self, width: f32, height: f32) -> Self {
        self.chart.size = SizePolicy::Fixed { width, height };
        self
    }

    /// Fill the container, skipping rendering below `min` pixels.
    pub fn fill(mut self, min: f32) -> Self {
        self.chart.size = SizePolicy::Fill { min };
        self
    }

    /// Set the margin around the plot area.
    pub fn margin(mut self, margin: Margin) -> Self {
        self.chart.margin = margin;
        self
    }

    /// Set the theme used by the chart.
    pub fn theme(mut self, theme: Theme) -> Self {
        self.chart.theme = theme;
        self
    }

    /// Draw an x axis.
    pub fn x_axis(mut self, axis: AxisConfig) -> Self {
        self.chart.x_axis = Some(axis);
        self
    }

    /// Draw a y axis.
    pub fn y_axis(mut self, axis: AxisConfig) -> Self {
        self.chart.y_axis = Some(axis);
        self
    }

    /// Draw grid lines.
    pub fn grid(mut self, grid: GridConfig) -> Self {
        self.chart.grid = Some(grid);
        self
    }

    /// Round the x domain to tick boundaries.
    pub fn x_nice(mut self, nice: bool) -> Self {
        self.chart.x_nice = nice;
        self
    }

    /// Set the y domain policy.
    pub fn y_domain(mut self, domain: YDomain) -> Self {
        self.chart.y_domain = domain;
        self
    }

    /// Set the formatter used for x values in tooltips.
    pub fn x_format(mut self, formatter: AxisFormatter) -> Self {
        self.chart.x_format = formatter;
        self
    }

    /// Set the hover behavior.
    pub fn hover(mut self, hover: HoverMode) -> Self {
        self.chart.hover = hover;
        self
    }

    /// Draw a clickable legend in the right margin.
    pub fn legend(mut self, legend: bool) -> Self {
        self.chart.legend = legend;
        self
    }

    /// Add a series.
    pub fn series(mut self, series: Series) -> Self {
        self.chart.series.push(series);
        self
    }

    /// Build the chart.
    pub fn build(self) -> LineChart {
        self.chart
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::{Point, ScreenPoint};

    fn chart(domain: YDomain, values: &[f64]) -> LineChart {
        LineChart::builder()
            .y_domain(domain)
            .series(
                Series::line("s").with_points(
                    values
                        .iter()
                        .enumerate()
                        .map(|(i, &y)| Point::new(i as f64, y)),
                ),
            )
            .build()
    }

    #[test]
    fn zero_to_max_starts_at_zero() {
        let domains = chart(YDomain::ZeroToMax { nice: false }, &[12.0, 37.5]).domains();
        assert_eq!(domains.map(|d| d.y), Some(Range::new(0.0, 37.5)));
    }

    #[test]
    fn zero_to_max_nice_rounds_up() {
        let domains = chart(YDomain::ZeroToMax { nice: true }, &[12.0, 37.5]).domains();
        assert_eq!(domains.map(|d| d.y), Some(Range::new(0.0, 40.0)));
    }

    #[test]
    fn headroom_and_fallback() {
        let with_data = chart(
            YDomain::ZeroToMaxPlus {
                headroom: 10.0,
                fallback: 100.0,
            },
            &[4.0, 90.0],
        );
        assert_eq!(with_data.domains().map(|d| d.y), Some(Range::new(0.0, 100.0)));
        let all_zero = chart(
            YDomain::ZeroToMaxPlus {
                headroom: 10.0,
                fallback: 100.0,
            },
            &[0.0, 0.0],
        );
        assert_eq!(all_zero.domains().map(|d| d.y), Some(Range::new(0.0, 100.0)));
    }

    #[test]
    fn padded_extent() {
        let domains = chart(
            YDomain::Padded {
                fraction: 0.1,
                nice: false,
            },
            &[100.0, 200.0],
        )
        .domains()
        .expect("domains");
        assert!((domains.y.min - 90.0).abs() < 1e-9);
        assert!((domains.y.max - 210.0).abs() < 1e-9);
    }

    #[test]
    fn y_include_widens_domain() {
        let mut chart = chart(YDomain::Extent { nice: false }, &[10.0, 20.0]);
        chart.set_y_include(vec![5.0, 50.0]);
        assert_eq!(chart.domains().map(|d| d.y), Some(Range::new(5.0, 50.0)));
    }

    #[test]
    fn empty_chart_has_no_domain() {
        assert!(LineChart::builder().build().domains().is_none());
    }

    #[test]
    fn fill_skips_tiny_containers() {
        let policy = SizePolicy::Fill { min: 10.0 };
        let tiny = ScreenRect::from_origin_size(ScreenPoint::new(0.0, 0.0), 9.0, 300.0);
        let ok = ScreenRect::from_origin_size(ScreenPoint::new(0.0, 0.0), 10.0, 10.0);
        assert!(policy.layout(tiny).is_none());
        assert_eq!(policy.layout(ok), Some(ok));
    }

    #[test]
    fn hidden_series_still_define_domain() {
        let mut chart = chart(YDomain::Extent { nice: false }, &[1.0, 9.0]);
        let id = chart.series()[0].id();
        chart.toggle_series(id);
        assert!(chart.domains().is_some());
    }
}
