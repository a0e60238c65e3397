//! Axis configuration, tick generation, and formatting.

use std::sync::Arc;

use chrono::DateTime;

use crate::render::Color;
use crate::scale::{LinearScale, format_grouped, precision_for_step, ticks};

/// Milliseconds in one day, the unit of date axes.
pub const MS_PER_DAY: f64 = 86_400_000.0;

/// Where an axis is drawn relative to the plot area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisPosition {
    /// Vertical axis on the left edge.
    Left,
    /// Vertical axis on the right edge.
    Right,
    /// Horizontal axis along the bottom edge.
    Bottom,
}

impl AxisPosition {
    /// Whether the axis maps the vertical data dimension.
    pub fn is_vertical(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

/// Formatter for axis tick labels.
#[derive(Clone, Default)]
pub enum AxisFormatter {
    /// Fixed precision derived from the tick step, with thousands separators.
    #[default]
    Number,
    /// Values are Unix epoch milliseconds, formatted with a chrono pattern.
    Date(String),
    /// Custom formatter callback.
    Custom(Arc<dyn Fn(f64) -> String + Send + Sync>),
}

impl AxisFormatter {
    /// Date formatter using `YYYY-MM-DD`.
    pub fn iso_date() -> Self {
        Self::Date("%Y-%m-%d".to_string())
    }

    /// Whether the formatter expects epoch milliseconds.
    pub fn is_date(&self) -> bool {
        matches!(self, Self::Date(_))
    }

    /// Format a tick value given the spacing between ticks.
    pub fn format_tick(&self, value: f64, step: f64) -> String {
        match self {
            Self::Number => format_grouped(value, precision_for_step(step)),
            _ => self.format(value),
        }
    }

    /// Format a single value for display.
    pub fn format(&self, value: f64) -> String {
        match self {
            Self::Number => {
                let precision = if value.fract() == 0.0 { 0 } else { 2 };
                format_grouped(value, precision)
            }
            Self::Date(pattern) => format_date(value, pattern),
            Self::Custom(formatter) => formatter(value),
        }
    }
}

impl std::fmt::Debug for AxisFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number => write!(f, "AxisFormatter::Number"),
            Self::Date(pattern) => write!(f, "AxisFormatter::Date({pattern:?})"),
            Self::Custom(_) => write!(f, "AxisFormatter::Custom(..)"),
        }
    }
}

fn format_date(value: f64, pattern: &str) -> String {
    if !value.is_finite() {
        return String::new();
    }
    match DateTime::from_timestamp_millis(value.round() as i64) {
        Some(datetime) => datetime.format(pattern).to_string(),
        None => String::new(),
    }
}

/// A tick value with its label.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Tick {
    pub(crate) value: f64,
    pub(crate) label: String,
}

/// Text measurement used for layout.
pub(crate) trait TextMeasurer {
    /// Return the (width, height) of a single line of text.
    fn measure(&self, text: &str, size: f32) -> (f32, f32);
}

/// Axis configuration.
#[derive(Debug, Clone)]
pub struct AxisConfig {
    position: AxisPosition,
    title: Option<String>,
    title_offset: f32,
    tick_count: usize,
    label_size: f32,
    color: Option<Color>,
    formatter: AxisFormatter,
}

impl AxisConfig {
    /// Start building an axis at the given position.
    pub fn builder(position: AxisPosition) -> AxisConfigBuilder {
        AxisConfigBuilder {
            axis: Self {
                position,
                title: None,
                title_offset: 25.0,
                tick_count: 10,
                label_size: 11.0,
                color: None,
                formatter: AxisFormatter::default(),
            },
        }
    }

    /// Default left axis.
    pub fn left() -> Self {
        Self::builder(AxisPosition::Left).build()
    }

    /// Access the axis position.
    pub fn position(&self) -> AxisPosition {
        self.position
    }

    /// Access the axis title.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Distance between the axis line and its title.
    pub fn title_offset(&self) -> f32 {
        self.title_offset
    }

    /// Requested number of ticks.
    pub fn tick_count(&self) -> usize {
        self.tick_count
    }

    /// Tick label font size.
    pub fn label_size(&self) -> f32 {
        self.label_size
    }

    /// Color override for the axis line, ticks and labels.
    pub fn color(&self) -> Option<Color> {
        self.color
    }

    /// Access the formatter.
    pub fn formatter(&self) -> &AxisFormatter {
        &self.formatter
    }

    /// Generate ticks for a scale.
    pub(crate) fn ticks(&self, scale: &LinearScale) -> Vec<Tick> {
        let step = scale.tick_step(self.tick_count);
        tick_values(scale, self.tick_count, self.formatter.is_date())
            .into_iter()
            .map(|value| Tick {
                value,
                label: self.formatter.format_tick(value, step),
            })
            .collect()
    }
}

/// Tick positions for a scale. Date scales place ticks on whole days.
pub(crate) fn tick_values(scale: &LinearScale, count: usize, dates: bool) -> Vec<f64> {
    if !dates {
        return scale.ticks(count);
    }
    let domain = scale.domain();
    ticks(domain.min / MS_PER_DAY, domain.max / MS_PER_DAY, count)
        .into_iter()
        .map(|day| day * MS_PER_DAY)
        .collect()
}

/// Builder for [`AxisConfig`].
#[derive(Debug, Clone)]
pub struct AxisConfigBuilder {
    axis: AxisConfig,
}

impl AxisConfigBuilder {
    /// Set the axis title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.axis.title = Some(title.into());
        self
    }

    /// Set the distance between the axis line and its title.
    pub fn title_offset(mut self, offset: f32) -> Self {
        self.axis.title_offset = offset;
        self
    }

    /// Set the requested tick count.
    pub fn tick_count(mut self, count: usize) -> Self {
        self.axis.tick_count = count;
        self
    }

    /// Set the tick label font size.
    pub fn label_size(mut self, size: f32) -> Self {
        self.axis.label_size = size;
        self
    }

    /// Override the axis color.
    pub fn color(mut self, color: Color) -> Self {
        self.axis.color = Some(color);
        self
    }

    /// Set the label formatter.
    pub fn formatter(mut self, formatter: AxisFormatter) -> Self {
        self.axis.formatter = formatter;
        self
    }

    /// Build the axis configuration.
    pub fn build(self) -> AxisConfig {
        self.axis
    }
}
