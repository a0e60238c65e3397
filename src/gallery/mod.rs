//! The demo catalogue.
//!
//! Every demo is a [`DemoKind`]; [`Demo`] owns the live state of the one
//! currently shown.

mod demo;

pub use demo::Demo;

use chrono::NaiveDate;
use tracing::warn;

use crate::config::{GalleryConfig, StreamConfig};
use crate::datasource::GeneratorOptions;
use crate::error::GalleryError;
use crate::style::Theme;

/// Picker group a demo is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DemoCategory {
    /// Static charts.
    Basic,
    /// Single-series charts with animation or hover readouts.
    Interactive,
    /// Several series sharing one chart.
    MultiSeries,
    /// Charts fed by the background stream.
    Streaming,
}

impl DemoCategory {
    /// Every category in picker order.
    pub const ALL: [Self; 4] = [
        Self::Basic,
        Self::Interactive,
        Self::MultiSeries,
        Self::Streaming,
    ];

    /// Heading shown in the picker.
    pub fn label(self) -> &'static str {
        match self {
            Self::Basic => "Basic",
            Self::Interactive => "Interactive",
            Self::MultiSeries => "Multi-series",
            Self::Streaming => "Streaming",
        }
    }
}

/// One entry of the gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DemoKind {
    Basic,
    AxisAndGrid,
    Responsive,
    Drawing,
    Interactive,
    Animated,
    SingleTooltip,
    GlyphTooltip,
    MultiSeries,
    MultiSeriesTooltips,
    Streaming,
}

impl DemoKind {
    /// Every demo in picker order.
    pub const ALL: [Self; 11] = [
        Self::Basic,
        Self::AxisAndGrid,
        Self::Responsive,
        Self::Drawing,
        Self::Interactive,
        Self::Animated,
        Self::SingleTooltip,
        Self::GlyphTooltip,
        Self::MultiSeries,
        Self::MultiSeriesTooltips,
        Self::Streaming,
    ];

    /// Stable kebab-case name used on the command line and in config files.
    pub fn name(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::AxisAndGrid => "axis-and-grid",
            Self::Responsive => "responsive",
            Self::Drawing => "drawing",
            Self::Interactive => "interactive",
            Self::Animated => "animated",
            Self::SingleTooltip => "single-tooltip",
            Self::GlyphTooltip => "glyph-tooltip",
            Self::MultiSeries => "multi-series",
            Self::MultiSeriesTooltips => "multi-series-tooltips",
            Self::Streaming => "streaming",
        }
    }

    /// Heading shown above the chart.
    pub fn title(self) -> &'static str {
        match self {
            Self::Basic => "Basic line chart",
            Self::AxisAndGrid => "Axis and grid",
            Self::Responsive => "Responsive chart",
            Self::Drawing => "Line drawing",
            Self::Interactive => "Interactive chart",
            Self::Animated => "Animated transitions",
            Self::SingleTooltip => "Tooltip",
            Self::GlyphTooltip => "Tooltip with glyph",
            Self::MultiSeries => "Multiple series",
            Self::MultiSeriesTooltips => "Per-series tooltips",
            Self::Streaming => "Streaming data",
        }
    }

    /// One sentence shown under the title.
    pub fn description(self) -> &'static str {
        match self {
            Self::Basic => "Fifty random points joined by a straight line, without axes.",
            Self::AxisAndGrid => "The same line with tick labels and a background grid.",
            Self::Responsive => "A chart that fills its pane and follows every resize.",
            Self::Drawing => "The stroke draws itself in, then the points fade in.",
            Self::Interactive => "Hover the chart to read the nearest dated value.",
            Self::Animated => "Update the data to morph the line and its points.",
            Self::SingleTooltip => "A tooltip that follows the nearest point and stays inside the plot.",
            Self::GlyphTooltip => "A glyph marks the hovered point next to its tooltip.",
            Self::MultiSeries => "Click legend entries to toggle series; hover for a combined readout.",
            Self::MultiSeriesTooltips => "One label per series plus a timestamp along the top.",
            Self::Streaming => "Samples arrive from a background stream; the oldest drop off.",
        }
    }

    /// Picker group of the demo.
    pub fn category(self) -> DemoCategory {
        match self {
            Self::Basic | Self::AxisAndGrid | Self::Responsive => DemoCategory::Basic,
            Self::Drawing
            | Self::Interactive
            | Self::Animated
            | Self::SingleTooltip
            | Self::GlyphTooltip => DemoCategory::Interactive,
            Self::MultiSeries | Self::MultiSeriesTooltips => DemoCategory::MultiSeries,
            Self::Streaming => DemoCategory::Streaming,
        }
    }

    /// Look a demo up by its [`name`](Self::name).
    pub fn from_name(name: &str) -> Result<Self, GalleryError> {
        let wanted = name.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| GalleryError::UnknownDemo(name.to_string()))
    }

    /// Demos listed under `category`, in picker order.
    pub fn in_category(category: DemoCategory) -> impl Iterator<Item = Self> {
        Self::ALL
            .into_iter()
            .filter(move |kind| kind.category() == category)
    }
}

/// A button a demo offers in the gallery header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoAction {
    /// Replace the data, animating where the demo animates.
    UpdateData,
    /// Replay the entry animation.
    Replay,
    /// Pause or resume the data stream.
    ToggleStream,
}

impl DemoAction {
    /// Button caption.
    pub fn label(self) -> &'static str {
        match self {
            Self::UpdateData => "Update data",
            Self::Replay => "Replay",
            Self::ToggleStream => "Pause / resume",
        }
    }
}

/// Inputs shared by every demo of a gallery session.
#[derive(Debug, Clone)]
pub struct DemoSettings {
    /// Colors of every chart.
    pub theme: Theme,
    /// Seed of the demo's random generator.
    pub seed: u64,
    /// Last day of the dated data sets.
    pub today: NaiveDate,
    /// Parameters of the dated data generators.
    pub generator: GeneratorOptions,
    /// Settings of the streaming demo.
    pub stream: StreamConfig,
}

impl DemoSettings {
    /// Settings from a loaded configuration.
    pub fn from_config(config: &GalleryConfig, seed: u64, today: NaiveDate) -> Self {
        Self {
            theme: Theme::from_kind(config.theme),
            seed,
            today,
            generator: config.generator.clone(),
            stream: config.stream,
        }
    }
}

/// The demo shown at startup: the configured one, or the first demo when the
/// configured name is unknown.
pub fn initial_demo(config: &GalleryConfig) -> DemoKind {
    let Some(name) = config.initial_demo.as_deref() else {
        return DemoKind::ALL[0];
    };
    DemoKind::from_name(name).unwrap_or_else(|err| {
        warn!(%err, "falling back to the first demo");
        DemoKind::ALL[0]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for kind in DemoKind::ALL {
            assert_eq!(DemoKind::from_name(kind.name()).expect("known"), kind);
        }
        assert_eq!(
            DemoKind::from_name(" Multi-Series ").expect("known"),
            DemoKind::MultiSeries
        );
    }

    #[test]
    fn unknown_name_is_an_error() {
        let err = DemoKind::from_name("pie").expect_err("unknown");
        assert!(matches!(err, GalleryError::UnknownDemo(name) if name == "pie"));
    }

    #[test]
    fn every_demo_is_listed_once() {
        let listed: Vec<DemoKind> = DemoCategory::ALL
            .into_iter()
            .flat_map(DemoKind::in_category)
            .collect();
        assert_eq!(listed, DemoKind::ALL.to_vec());
        assert_eq!(DemoKind::in_category(DemoCategory::Basic).count(), 3);
        assert_eq!(DemoKind::in_category(DemoCategory::Interactive).count(), 5);
    }

    #[test]
    fn initial_demo_falls_back_on_unknown_name() {
        let mut config = GalleryConfig::default();
        assert_eq!(initial_demo(&config), DemoKind::Basic);
        config.initial_demo = Some("streaming".to_string());
        assert_eq!(initial_demo(&config), DemoKind::Streaming);
        config.initial_demo = Some("radar".to_string());
        assert_eq!(initial_demo(&config), DemoKind::Basic);
    }
}
