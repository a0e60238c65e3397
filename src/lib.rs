//! gpui_linecharts is a gallery of interactive line-chart demos built on GPUI.
//!
//! The chart core is backend-agnostic: a [`LineChart`] and a pointer
//! position become a flat list of render commands, which the GPUI backend
//! paints and the SVG exporter serialises.

#![forbid(unsafe_code)]

pub mod animation;
pub mod axis;
pub mod chart;
pub mod config;
pub mod curve;
pub mod datasource;
pub mod error;
mod frame;
pub mod gallery;
pub mod geom;
mod interaction;
pub mod render;
pub mod scale;
pub mod series;
pub mod style;
mod tooltip;
mod transform;
pub mod view;

#[cfg(feature = "gpui")]
pub mod gpui_backend;

pub use animation::{Spring, SpringConfig, Tween};
pub use axis::{AxisConfig, AxisFormatter, AxisPosition};
pub use chart::{GridConfig, LineChart, LineChartBuilder, SizePolicy, YDomain};
pub use config::GalleryConfig;
pub use curve::Curve;
pub use error::{ConfigError, GalleryError};
pub use gallery::{Demo, DemoAction, DemoCategory, DemoKind, DemoSettings};
pub use geom::{Margin, Point};
pub use interaction::{bisect_left, bracket, nearest_index};
pub use render::{Color, LineStyle, MarkerShape, MarkerStyle};
pub use scale::LinearScale;
pub use series::{Series, SeriesId};
pub use style::{Theme, ThemeKind};
pub use tooltip::HoverMode;
pub use view::{Range, Viewport};

#[cfg(feature = "gpui")]
pub use gpui_backend::{ChartView, GalleryView, run_gallery};
