use std::collections::VecDeque;
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use super::{DemoAction, DemoKind, DemoSettings};
use crate::animation::{SpringConfig, Tween};
use crate::axis::{AxisConfig, AxisFormatter, AxisPosition, TextMeasurer};
use crate::chart::{GridConfig, LineChart, SizePolicy, YDomain};
use crate::config::MAX_STREAM_HISTORY;
use crate::curve::Curve;
use crate::datasource::{
    DataStream, DatedSeries, ExampleData, StreamSample, Subscription, generate_financial_data,
    generate_multiple_series, random_integer_points, random_unit_points,
};
use crate::error::GalleryError;
use crate::frame::{ChartFrame, ChartUiState, FrameAnimation, Morph, build_frame};
use crate::geom::{Margin, Point, ScreenPoint, ScreenRect};
use crate::render::svg::{ApproxMeasurer, to_svg};
use crate::render::{Color, LineStyle, MarkerShape, MarkerStyle};
use crate::series::{Series, SeriesId};
use crate::style::SERIES_PALETTE;
use crate::tooltip::HoverMode;

const INDIGO: Color = Color::from_rgb(0x4f46e5);
const BLUE: Color = Color::from_rgb(0x2196f3);
const GREY: Color = Color::from_rgb(0x888888);

const MULTI_SERIES_COUNT: usize = 4;
const DRAW_POINT_DELAY_MS: f64 = 1000.0;
const DRAW_LINE_DELAY_MS: f64 = 300.0;

/// Entry or transition animation of a demo.
#[derive(Debug, Clone)]
enum Animation {
    Static,
    /// Stroke reveal followed by a marker fade-in.
    Draw { reveal: Tween, markers: Tween },
    /// Blend from the previous data set to the current one.
    Morph {
        previous: Vec<Vec<Point>>,
        tween: Tween,
    },
}

impl Animation {
    fn advance(&mut self, dt_ms: f64) -> bool {
        match self {
            Self::Static => false,
            Self::Draw { reveal, markers } => {
                let drawing = reveal.advance(dt_ms);
                let fading = markers.advance(dt_ms);
                drawing || fading
            }
            Self::Morph { tween, .. } => tween.advance(dt_ms),
        }
    }

    fn is_running(&self) -> bool {
        match self {
            Self::Static => false,
            Self::Draw { reveal, markers } => !reveal.is_finished() || !markers.is_finished(),
            Self::Morph { tween, .. } => !tween.is_finished(),
        }
    }

    fn frame(&self) -> FrameAnimation {
        match self {
            Self::Static => FrameAnimation::default(),
            Self::Draw { reveal, markers } => FrameAnimation {
                reveal: reveal.progress(),
                marker_opacity: markers.progress(),
                morph: None,
            },
            Self::Morph { previous, tween } if !tween.is_finished() => FrameAnimation {
                morph: Some(Morph {
                    previous: previous.clone(),
                    progress: tween.progress(),
                }),
                ..FrameAnimation::default()
            },
            Self::Morph { .. } => FrameAnimation::default(),
        }
    }
}

/// Samples pushed by the stream worker and the bounded history built from them.
struct StreamFeed {
    stream: DataStream,
    subscription: Option<Subscription>,
    inbox: Arc<Mutex<Vec<StreamSample>>>,
    /// Samples in arrival order; the oldest is dropped first.
    history: VecDeque<Point>,
    capacity: usize,
}

impl StreamFeed {
    fn new(settings: &DemoSettings) -> Result<Self, GalleryError> {
        let mut stream = DataStream::new(settings.stream.range(), settings.seed.wrapping_add(1))?;
        let inbox = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&inbox);
        let subscription = stream.subscribe(move |sample| {
            sink.lock().expect("stream inbox lock").push(sample);
        });
        stream.start(settings.stream.interval());
        let capacity = settings.stream.history.clamp(1, MAX_STREAM_HISTORY);
        Ok(Self {
            stream,
            subscription: Some(subscription),
            inbox,
            history: VecDeque::with_capacity(capacity),
            capacity,
        })
    }

    fn is_active(&self) -> bool {
        self.stream.is_running() || !self.inbox.lock().expect("stream inbox lock").is_empty()
    }

    /// Move pending samples into the history. Returns `true` if any arrived.
    fn drain(&mut self) -> bool {
        let pending = std::mem::take(&mut *self.inbox.lock().expect("stream inbox lock"));
        if pending.is_empty() {
            return false;
        }
        for sample in pending {
            if self.history.len() == self.capacity {
                self.history.pop_front();
            }
            self.history.push_back(Point::new(sample.x as f64, sample.y as f64));
        }
        true
    }

    fn clear(&mut self) {
        self.inbox.lock().expect("stream inbox lock").clear();
        self.history.clear();
    }
}

impl Drop for StreamFeed {
    fn drop(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
    }
}

impl std::fmt::Debug for StreamFeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamFeed")
            .field("stream", &self.stream)
            .field("history", &self.history.len())
            .field("capacity", &self.capacity)
            .finish()
    }
}

/// The live state of one demo: chart, data generator and animation.
#[derive(Debug)]
pub struct Demo {
    kind: DemoKind,
    settings: DemoSettings,
    rng: StdRng,
    chart: LineChart,
    animation: Animation,
    feed: Option<StreamFeed>,
}

impl Demo {
    /// Build a demo with fresh data. The streaming demo starts its stream.
    pub fn new(kind: DemoKind, settings: DemoSettings) -> Result<Self, GalleryError> {
        let mut rng = StdRng::seed_from_u64(settings.seed);
        let data = sample_data(kind, &settings, &mut rng);
        let chart = build_chart(kind, &settings, data);
        let animation = match kind {
            DemoKind::Drawing => Animation::Draw {
                reveal: Tween::new(SpringConfig::SLOW).with_delay(DRAW_LINE_DELAY_MS),
                markers: Tween::new(SpringConfig::SLOW).with_delay(DRAW_POINT_DELAY_MS),
            },
            DemoKind::Animated => Animation::Morph {
                previous: Vec::new(),
                tween: Tween::finished(SpringConfig::GENTLE),
            },
            _ => Animation::Static,
        };
        let feed = match kind {
            DemoKind::Streaming => Some(StreamFeed::new(&settings)?),
            _ => None,
        };
        debug!(demo = kind.name(), seed = settings.seed, "demo created");
        Ok(Self {
            kind,
            settings,
            rng,
            chart,
            animation,
            feed,
        })
    }

    /// Access the demo kind.
    pub fn kind(&self) -> DemoKind {
        self.kind
    }

    /// Access the chart as currently configured.
    pub fn chart(&self) -> &LineChart {
        &self.chart
    }

    /// Buttons shown for this demo.
    pub fn actions(&self) -> &'static [DemoAction] {
        match self.kind {
            DemoKind::Responsive => &[],
            DemoKind::Drawing => &[DemoAction::Replay, DemoAction::UpdateData],
            DemoKind::Streaming => &[DemoAction::ToggleStream, DemoAction::UpdateData],
            _ => &[DemoAction::UpdateData],
        }
    }

    /// Run one of the demo's [`actions`](Self::actions).
    pub fn perform(&mut self, action: DemoAction) {
        match action {
            DemoAction::UpdateData => self.update_data(),
            DemoAction::Replay => self.replay(),
            DemoAction::ToggleStream => {
                self.toggle_stream();
            }
        }
    }

    /// Advance animations and pull streamed samples. Returns `true` if the
    /// next frame differs from the last one.
    pub fn tick(&mut self, dt_ms: f64) -> bool {
        let was_running = self.animation.is_running();
        let mut changed = self.animation.advance(dt_ms);
        if was_running && !self.animation.is_running() {
            debug!(demo = self.kind.name(), "animation finished");
            changed = true;
        }
        if let Some(feed) = self.feed.as_mut()
            && feed.drain()
        {
            if let Some(series) = self.chart.series_mut().first_mut() {
                series.set_points(feed.history.iter().copied());
            }
            changed = true;
        }
        changed
    }

    /// Replace the data set.
    ///
    /// The animated demo morphs from the old data; the drawing demo replays
    /// its entry animation; the streaming demo clears its history.
    pub fn update_data(&mut self) {
        match self.kind {
            DemoKind::Responsive => return,
            DemoKind::Streaming => {
                if let Some(feed) = self.feed.as_mut() {
                    feed.clear();
                }
                for series in self.chart.series_mut() {
                    series.set_points([]);
                }
                debug!(demo = self.kind.name(), "stream history cleared");
                return;
            }
            _ => {}
        }

        let previous: Vec<Vec<Point>> = self
            .chart
            .series()
            .iter()
            .map(|series| series.points().to_vec())
            .collect();
        let data = sample_data(self.kind, &self.settings, &mut self.rng);
        for (series, points) in self.chart.series_mut().iter_mut().zip(data) {
            series.set_points(points);
        }
        debug!(demo = self.kind.name(), "data regenerated");

        match &mut self.animation {
            Animation::Morph {
                previous: slot,
                tween,
            } => {
                self.chart
                    .set_y_include(previous.iter().flatten().map(|point| point.y).collect());
                *slot = previous;
                tween.restart();
            }
            Animation::Draw { reveal, markers } => {
                reveal.restart();
                markers.restart();
            }
            Animation::Static => {}
        }
    }

    /// Restart the entry animation, if the demo has one.
    pub fn replay(&mut self) {
        if let Animation::Draw { reveal, markers } = &mut self.animation {
            reveal.restart();
            markers.restart();
        }
    }

    /// Pause or resume the data stream. Returns the new running state, or
    /// `None` for demos without a stream.
    pub fn toggle_stream(&mut self) -> Option<bool> {
        let feed = self.feed.as_mut()?;
        if feed.stream.is_running() {
            feed.stream.stop();
        } else {
            feed.stream.start(self.settings.stream.interval());
        }
        Some(feed.stream.is_running())
    }

    /// Show or hide a series. Returns the new visibility.
    pub fn toggle_series(&mut self, id: SeriesId) -> Option<bool> {
        self.chart.toggle_series(id)
    }

    /// Whether [`tick`](Self::tick) has work to do: an animation is running,
    /// the stream is running or samples are still waiting.
    pub fn is_live(&self) -> bool {
        self.animation.is_running() || self.feed.as_ref().is_some_and(StreamFeed::is_active)
    }

    pub(crate) fn frame_animation(&self) -> FrameAnimation {
        self.animation.frame()
    }

    pub(crate) fn build_frame(
        &self,
        state: &mut ChartUiState,
        bounds: ScreenRect,
        measurer: &dyn TextMeasurer,
    ) -> ChartFrame {
        build_frame(&self.chart, state, bounds, measurer, &self.frame_animation())
    }

    /// Render the settled chart as an SVG document.
    ///
    /// Fixed-size charts use their own size; responsive charts fill
    /// `width` x `height`.
    pub fn render_svg(&self, width: f32, height: f32) -> String {
        let (width, height) = match self.chart.size() {
            SizePolicy::Fixed { width, height } => (width, height),
            SizePolicy::Fill { .. } => (width, height),
        };
        let bounds = ScreenRect::from_origin_size(ScreenPoint::new(0.0, 0.0), width, height);
        let frame = build_frame(
            &self.chart,
            &mut ChartUiState::default(),
            bounds,
            &ApproxMeasurer,
            &FrameAnimation::default(),
        );
        to_svg(&frame.render, width, height)
    }

    /// Write [`render_svg`](Self::render_svg) to `path`.
    pub fn export_svg(&self, path: &Path, width: f32, height: f32) -> Result<(), GalleryError> {
        let svg = self.render_svg(width, height);
        fs::write(path, svg).map_err(|source| GalleryError::Export {
            path: path.to_path_buf(),
            source,
        })?;
        info!(demo = self.kind.name(), path = %path.display(), "exported svg");
        Ok(())
    }
}

/// Fresh points for every series of `kind`, in chart order.
fn sample_data(kind: DemoKind, settings: &DemoSettings, rng: &mut StdRng) -> Vec<Vec<Point>> {
    match kind {
        DemoKind::Basic | DemoKind::AxisAndGrid => vec![random_unit_points(50, rng)],
        DemoKind::Responsive => vec![vec![
            Point::new(0.0, 10.0),
            Point::new(10.0, 20.0),
            Point::new(20.0, 15.0),
            Point::new(30.0, 25.0),
            Point::new(40.0, 18.0),
        ]],
        DemoKind::Drawing | DemoKind::Animated => vec![random_integer_points(10, 0, 100, rng)],
        DemoKind::Interactive | DemoKind::GlyphTooltip => {
            let data = ExampleData::generate(&settings.generator, settings.today, rng);
            vec![data.basic.iter().map(|point| point.to_point()).collect()]
        }
        DemoKind::SingleTooltip => {
            let data = generate_financial_data(&settings.generator, settings.today, rng);
            vec![data.iter().map(|point| point.to_point()).collect()]
        }
        DemoKind::MultiSeries | DemoKind::MultiSeriesTooltips => {
            generate_multiple_series(MULTI_SERIES_COUNT, &settings.generator, settings.today, rng)
                .iter()
                .map(DatedSeries::to_points)
                .collect()
        }
        DemoKind::Streaming => vec![Vec::new()],
    }
}

fn build_chart(kind: DemoKind, settings: &DemoSettings, data: Vec<Vec<Point>>) -> LineChart {
    let mut data = data.into_iter();
    let first = data.next().unwrap_or_default();
    let builder = LineChart::builder().theme(settings.theme.clone());

    match kind {
        DemoKind::Basic => builder
            .fixed_size(500.0, 300.0)
            .margin(Margin::new(20.0, 20.0, 20.0, 40.0))
            .y_domain(YDomain::ZeroToMax { nice: false })
            .series(indigo_line("Values").with_points(first))
            .build(),
        DemoKind::AxisAndGrid | DemoKind::Responsive => {
            let builder = if kind == DemoKind::Responsive {
                builder.fill(10.0)
            } else {
                builder.fixed_size(500.0, 300.0)
            };
            builder
                .y_domain(YDomain::ZeroToMax { nice: true })
                .grid(GridConfig {
                    color: Some(Color::from_rgb(0xe2e8f0)),
                    ..GridConfig::default()
                })
                .x_axis(indigo_axis(AxisPosition::Bottom))
                .y_axis(indigo_axis(AxisPosition::Left))
                .series(indigo_line("Values").with_points(first))
                .build()
        }
        DemoKind::Drawing | DemoKind::Animated => builder
            .fixed_size(600.0, 400.0)
            .y_domain(YDomain::ZeroToMaxPlus {
                headroom: 10.0,
                fallback: 100.0,
            })
            .grid(GridConfig {
                row_ticks: 5,
                column_ticks: 5,
                color: Some(Color::from_rgb(0xe0e0e0)),
                opacity: 0.3,
                ..GridConfig::default()
            })
            .x_axis(grey_axis(AxisPosition::Bottom, "Time", 25.0))
            .y_axis(grey_axis(AxisPosition::Left, "Value", 25.0))
            .series(
                Series::line("Values")
                    .with_style(LineStyle::solid(BLUE, 3.0))
                    .with_curve(Curve::MonotoneX)
                    .with_markers(MarkerStyle {
                        color: BLUE,
                        size: 8.0,
                        shape: MarkerShape::Circle,
                    })
                    .with_points(first),
            )
            .build(),
        DemoKind::Interactive => builder
            .fixed_size(800.0, 400.0)
            .margin(Margin::new(20.0, 20.0, 40.0, 50.0))
            .y_domain(YDomain::Padded {
                fraction: 0.1,
                nice: true,
            })
            .grid(faint_grid())
            .x_axis(date_axis(AxisPosition::Bottom, "Date", 25.0))
            .y_axis(grey_axis(AxisPosition::Left, "Value", 25.0))
            .x_format(AxisFormatter::iso_date())
            .hover(HoverMode::Nearest {
                hover_line: true,
                marker: false,
                clamp_to_plot: false,
            })
            .series(
                Series::line("Value")
                    .with_style(LineStyle::solid(BLUE, 2.0))
                    .with_curve(Curve::MonotoneX)
                    .with_points(first),
            )
            .build(),
        DemoKind::SingleTooltip => builder
            .fixed_size(1600.0, 900.0)
            .margin(Margin::all(20.0))
            .y_domain(YDomain::Extent { nice: false })
            .x_axis(date_axis(AxisPosition::Bottom, "Date", 40.0))
            .y_axis(grey_axis(AxisPosition::Right, "Value", 40.0))
            .x_format(AxisFormatter::iso_date())
            .hover(HoverMode::Nearest {
                hover_line: false,
                marker: false,
                clamp_to_plot: true,
            })
            .series(indigo_line("Value").with_points(first))
            .build(),
        DemoKind::GlyphTooltip => builder
            .fill(10.0)
            .margin(Margin::new(20.0, 20.0, 50.0, 50.0))
            .x_nice(true)
            .y_domain(YDomain::Extent { nice: true })
            .x_axis(date_axis(AxisPosition::Bottom, "Date", 40.0))
            .y_axis(grey_axis(AxisPosition::Left, "Value", 40.0))
            .x_format(AxisFormatter::iso_date())
            .hover(HoverMode::Nearest {
                hover_line: false,
                marker: true,
                clamp_to_plot: false,
            })
            .series(indigo_line("Value").with_points(first))
            .build(),
        DemoKind::MultiSeries | DemoKind::MultiSeriesTooltips => {
            let (margin, hover, legend) = if kind == DemoKind::MultiSeries {
                (Margin::new(20.0, 120.0, 40.0, 50.0), HoverMode::AllSeries, true)
            } else {
                (Margin::new(40.0, 120.0, 40.0, 50.0), HoverMode::PerSeries, false)
            };
            let mut builder = builder
                .fixed_size(900.0, 400.0)
                .margin(margin)
                .y_domain(YDomain::Padded {
                    fraction: 0.1,
                    nice: true,
                })
                .grid(faint_grid())
                .x_axis(date_axis(AxisPosition::Bottom, "Date", 25.0))
                .y_axis(grey_axis(AxisPosition::Left, "Value", 25.0))
                .x_format(AxisFormatter::Date("%m/%d/%Y".to_string()))
                .hover(hover)
                .legend(legend);
            for (index, points) in std::iter::once(first).chain(data).enumerate() {
                let color = SERIES_PALETTE[index % SERIES_PALETTE.len()];
                builder = builder.series(
                    Series::line(format!("Series {}", index + 1))
                        .with_style(LineStyle::solid(color, 2.0))
                        .with_curve(Curve::MonotoneX)
                        .with_opacity(0.8)
                        .with_points(points),
                );
            }
            builder.build()
        }
        DemoKind::Streaming => builder
            .fixed_size(600.0, 400.0)
            .y_domain(YDomain::Padded {
                fraction: 0.05,
                nice: true,
            })
            .grid(faint_grid())
            .x_axis(grey_axis(AxisPosition::Bottom, "x", 25.0))
            .y_axis(grey_axis(AxisPosition::Left, "y", 25.0))
            .hover(HoverMode::Nearest {
                hover_line: true,
                marker: true,
                clamp_to_plot: true,
            })
            .series(
                Series::line("Stream")
                    .with_style(LineStyle::solid(INDIGO, 2.0))
                    .with_markers(MarkerStyle {
                        color: INDIGO,
                        size: 6.0,
                        shape: MarkerShape::Circle,
                    }),
            )
            .build(),
    }
}

fn indigo_line(name: &str) -> Series {
    Series::line(name).with_style(LineStyle::solid(INDIGO, 2.0))
}

fn indigo_axis(position: AxisPosition) -> AxisConfig {
    AxisConfig::builder(position)
        .color(INDIGO)
        .label_size(12.0)
        .build()
}

fn grey_axis(position: AxisPosition, title: &str, offset: f32) -> AxisConfig {
    AxisConfig::builder(position)
        .color(GREY)
        .label_size(11.0)
        .title(title)
        .title_offset(offset)
        .build()
}

fn date_axis(position: AxisPosition, title: &str, offset: f32) -> AxisConfig {
    AxisConfig::builder(position)
        .color(GREY)
        .label_size(11.0)
        .tick_count(6)
        .title(title)
        .title_offset(offset)
        .formatter(AxisFormatter::Date("%b %d".to_string()))
        .build()
}

fn faint_grid() -> GridConfig {
    GridConfig {
        row_ticks: 5,
        column_ticks: 10,
        opacity: 0.2,
        ..GridConfig::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StreamConfig;
    use crate::datasource::GeneratorOptions;
    use crate::style::Theme;
    use chrono::NaiveDate;

    fn settings() -> DemoSettings {
        DemoSettings {
            theme: Theme::light(),
            seed: 42,
            today: NaiveDate::from_ymd_opt(2024, 6, 28).expect("valid date"),
            generator: GeneratorOptions::default(),
            stream: StreamConfig {
                interval_ms: 60_000,
                history: 5,
                ..StreamConfig::default()
            },
        }
    }

    fn demo(kind: DemoKind) -> Demo {
        Demo::new(kind, settings()).expect("demo")
    }

    fn settle(demo: &mut Demo) {
        let mut elapsed = 0.0;
        while demo.animation.is_running() {
            demo.tick(16.0);
            elapsed += 16.0;
            assert!(elapsed < 60_000.0, "animation did not settle");
        }
    }

    #[test]
    fn every_demo_renders() {
        for kind in DemoKind::ALL {
            let demo = demo(kind);
            let svg = demo.render_svg(640.0, 480.0);
            assert!(svg.starts_with("<svg"), "{}", kind.name());
            if kind == DemoKind::Streaming {
                assert!(svg.contains("No data"));
            } else {
                assert!(svg.contains("<path"), "{}", kind.name());
            }
        }
    }

    #[test]
    fn same_seed_gives_same_data() {
        let a = demo(DemoKind::MultiSeries);
        let b = demo(DemoKind::MultiSeries);
        assert_eq!(a.chart().series().len(), MULTI_SERIES_COUNT);
        for (left, right) in a.chart().series().iter().zip(b.chart().series()) {
            assert_eq!(left.points(), right.points());
            assert!(!left.points().is_empty());
        }
    }

    #[test]
    fn drawing_reveals_then_fades_in_points() {
        let mut demo = demo(DemoKind::Drawing);
        let start = demo.frame_animation();
        assert_eq!(start.reveal, 0.0);
        assert_eq!(start.marker_opacity, 0.0);

        settle(&mut demo);
        let end = demo.frame_animation();
        assert_eq!(end.reveal, 1.0);
        assert_eq!(end.marker_opacity, 1.0);
        assert!(!demo.tick(16.0));

        demo.perform(DemoAction::Replay);
        assert_eq!(demo.frame_animation().reveal, 0.0);
    }

    #[test]
    fn animated_update_morphs_from_previous_data() {
        let mut demo = demo(DemoKind::Animated);
        assert!(demo.frame_animation().morph.is_none());
        let before = demo.chart().series()[0].points().to_vec();

        demo.update_data();
        let morph = demo.frame_animation().morph.expect("morph");
        assert_eq!(morph.previous, vec![before.clone()]);
        assert_eq!(morph.progress, 0.0);
        assert_eq!(demo.chart().series()[0].points().len(), 10);

        let domains = demo.chart().domains().expect("domains");
        let old_max = before.iter().map(|point| point.y).fold(0.0, f64::max);
        assert!(domains.y.max >= old_max);

        settle(&mut demo);
        assert!(demo.frame_animation().morph.is_none());
    }

    #[test]
    fn responsive_data_is_fixed() {
        let mut demo = demo(DemoKind::Responsive);
        let before = demo.chart().series()[0].points().to_vec();
        demo.update_data();
        assert_eq!(demo.chart().series()[0].points(), before.as_slice());
        assert!(demo.actions().is_empty());
        assert!(demo.render_svg(5.0, 5.0).contains("</svg>"));
    }

    #[test]
    fn legend_toggle_hides_series() {
        let mut demo = demo(DemoKind::MultiSeries);
        let id = demo.chart().series()[1].id();
        assert_eq!(demo.toggle_series(id), Some(false));
        assert!(!demo.chart().series()[1].is_visible());
        assert_eq!(demo.toggle_series(id), Some(true));
    }

    #[test]
    fn stream_keeps_latest_samples_sorted() {
        let mut demo = demo(DemoKind::Streaming);
        assert_eq!(demo.toggle_stream(), Some(false));
        let feed = demo.feed.as_ref().expect("feed");
        for _ in 0..8 {
            feed.stream.tick();
        }
        assert!(demo.tick(16.0));
        let points = demo.chart().series()[0].points();
        assert_eq!(points.len(), 5);
        assert!(points.windows(2).all(|pair| pair[0].x <= pair[1].x));
        assert!(!demo.tick(16.0));

        demo.update_data();
        assert!(demo.chart().series()[0].points().is_empty());
        assert_eq!(demo.toggle_stream(), Some(true));
    }

    #[test]
    fn only_running_demos_are_live() {
        assert!(!demo(DemoKind::Basic).is_live());

        let mut drawing = demo(DemoKind::Drawing);
        assert!(drawing.is_live());
        settle(&mut drawing);
        assert!(!drawing.is_live());

        let mut streaming = demo(DemoKind::Streaming);
        assert!(streaming.is_live());
        assert_eq!(streaming.toggle_stream(), Some(false));
        assert!(!streaming.is_live());
        streaming.feed.as_ref().expect("feed").stream.tick();
        assert!(streaming.is_live());
        assert!(streaming.tick(16.0));
        assert!(!streaming.is_live());
    }

    #[test]
    fn stream_history_is_capped() {
        let mut settings = settings();
        settings.stream.history = usize::MAX;
        let demo = Demo::new(DemoKind::Streaming, settings).expect("demo");
        assert_eq!(demo.feed.as_ref().expect("feed").capacity, MAX_STREAM_HISTORY);
    }

    #[test]
    fn stream_controls_only_on_streaming_demo() {
        let mut demo = demo(DemoKind::Basic);
        assert_eq!(demo.toggle_stream(), None);
        assert_eq!(demo.actions(), &[DemoAction::UpdateData]);
    }

    #[test]
    fn export_writes_file() {
        let demo = demo(DemoKind::Basic);
        let path = std::env::temp_dir().join(format!("linechart-basic-{}.svg", std::process::id()));
        demo.export_svg(&path, 100.0, 100.0).expect("export");
        let written = fs::read_to_string(&path).expect("read back");
        assert!(written.contains(r#"width="500""#));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn export_to_missing_directory_fails() {
        let demo = demo(DemoKind::Basic);
        let err = demo
            .export_svg(Path::new("/nonexistent/dir/out.svg"), 100.0, 100.0)
            .expect_err("missing dir");
        assert!(matches!(err, GalleryError::Export { .. }));
    }
}
