use std::time::{Duration, Instant};

use chrono::Local;
use gpui::prelude::*;
use gpui::{
    AppContext, Application, AsyncWindowContext, Bounds, Div, Entity, FontWeight, SharedString,
    Timer, TitlebarOptions, Window, WindowBounds, WindowOptions, div, px, size,
};
use tracing::{error, info};

use crate::config::GalleryConfig;
use crate::error::GalleryError;
use crate::gallery::{Demo, DemoAction, DemoCategory, DemoKind, DemoSettings, initial_demo};
use crate::render::Color;
use crate::style::Theme;

use super::paint::to_hsla;
use super::view::{ChartView, DemoHandle};

const FRAME_INTERVAL: Duration = Duration::from_millis(16);
const SIDEBAR_WIDTH: f32 = 240.0;

/// The gallery window: a picker on the left, the selected demo on the right.
pub struct GalleryView {
    current: DemoKind,
    settings: DemoSettings,
    chart: Entity<ChartView>,
    handle: DemoHandle,
    last_tick: Instant,
}

impl GalleryView {
    /// Create the gallery showing `demo`.
    pub fn new(demo: Demo, settings: DemoSettings, cx: &mut Context<Self>) -> Self {
        let current = demo.kind();
        let view = ChartView::new(demo);
        let handle = view.demo_handle();
        Self {
            current,
            settings,
            chart: cx.new(|_| view),
            handle,
            last_tick: Instant::now(),
        }
    }

    fn select(&mut self, kind: DemoKind, cx: &mut Context<Self>) {
        if kind == self.current {
            return;
        }
        match Demo::new(kind, self.settings.clone()) {
            Ok(demo) => {
                info!(demo = kind.name(), "switched demo");
                self.current = kind;
                self.chart.update(cx, |view, cx| {
                    view.replace_demo(demo);
                    cx.notify();
                });
                cx.notify();
            }
            Err(err) => error!(%err, demo = kind.name(), "failed to start demo"),
        }
    }

    fn perform(&mut self, action: DemoAction, cx: &mut Context<Self>) {
        self.handle.write(|demo| demo.perform(action));
        self.chart.update(cx, |_, cx| cx.notify());
        cx.notify();
    }

    /// Advance the current demo by the time since the last tick.
    fn tick(&mut self, cx: &mut Context<Self>) {
        let now = Instant::now();
        let dt_ms = now.duration_since(self.last_tick).as_secs_f64() * 1000.0;
        self.last_tick = now;
        if self.handle.write(|demo| demo.is_live() && demo.tick(dt_ms)) {
            self.chart.update(cx, |_, cx| cx.notify());
        }
    }

    fn render_sidebar(&self, theme: &Theme, cx: &mut Context<Self>) -> Div {
        let mut sidebar = div()
            .flex()
            .flex_col()
            .w(px(SIDEBAR_WIDTH))
            .h_full()
            .p(px(12.0))
            .gap(px(2.0))
            .bg(to_hsla(theme.panel));

        for category in DemoCategory::ALL {
            sidebar = sidebar.child(
                div()
                    .pt(px(12.0))
                    .pb(px(4.0))
                    .text_xs()
                    .font_weight(FontWeight::SEMIBOLD)
                    .text_color(to_hsla(theme.muted_text))
                    .child(category.label()),
            );
            for kind in DemoKind::in_category(category) {
                let selected = kind == self.current;
                let (fill, text) = if selected {
                    (theme.accent, Color::WHITE)
                } else {
                    (Color::TRANSPARENT, theme.text)
                };
                sidebar = sidebar.child(
                    div()
                        .id(kind.name())
                        .px(px(10.0))
                        .py(px(6.0))
                        .rounded_md()
                        .cursor_pointer()
                        .text_sm()
                        .bg(to_hsla(fill))
                        .text_color(to_hsla(text))
                        .child(kind.title())
                        .on_click(cx.listener(move |this, _, _, cx| {
                            this.select(kind, cx);
                        })),
                );
            }
        }
        sidebar
    }

    fn render_header(&self, theme: &Theme, cx: &mut Context<Self>) -> Div {
        let actions = self.handle.read(|demo| demo.actions());
        let mut buttons = div().flex().flex_row().gap(px(8.0));
        for &action in actions {
            buttons = buttons.child(
                div()
                    .id(SharedString::from(action.label()))
                    .px(px(12.0))
                    .py(px(6.0))
                    .rounded_md()
                    .cursor_pointer()
                    .text_sm()
                    .border_1()
                    .border_color(to_hsla(theme.accent))
                    .text_color(to_hsla(theme.accent))
                    .child(action.label())
                    .on_click(cx.listener(move |this, _, _, cx| {
                        this.perform(action, cx);
                    })),
            );
        }

        div()
            .flex()
            .flex_col()
            .gap(px(4.0))
            .child(
                div()
                    .text_xl()
                    .font_weight(FontWeight::SEMIBOLD)
                    .text_color(to_hsla(theme.text))
                    .child(self.current.title()),
            )
            .child(
                div()
                    .text_sm()
                    .text_color(to_hsla(theme.muted_text))
                    .child(self.current.description()),
            )
            .child(div().h(px(8.0)))
            .child(buttons)
    }
}

impl Render for GalleryView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = self.settings.theme.clone();
        let sidebar = self.render_sidebar(&theme, cx);
        let header = self.render_header(&theme, cx);

        div()
            .flex()
            .flex_row()
            .size_full()
            .bg(to_hsla(theme.background))
            .child(sidebar)
            .child(
                div()
                    .flex()
                    .flex_col()
                    .flex_1()
                    .h_full()
                    .p(px(16.0))
                    .gap(px(12.0))
                    .child(header)
                    .child(div().flex_1().w_full().overflow_hidden().child(self.chart.clone())),
            )
    }
}

/// Open the gallery window and run until it is closed.
///
/// The first demo is created before the window opens so that stream or data
/// errors surface to the caller.
pub fn run_gallery(config: GalleryConfig) -> Result<(), GalleryError> {
    config.validate()?;
    let seed = config.resolve_seed();
    let settings = DemoSettings::from_config(&config, seed, Local::now().date_naive());
    let demo = Demo::new(initial_demo(&config), settings.clone())?;
    info!(demo = demo.kind().name(), seed, "starting gallery");

    let window_size = size(px(config.window.width), px(config.window.height));
    Application::new().run(move |cx| {
        let options = WindowOptions {
            titlebar: Some(TitlebarOptions {
                title: Some("Line chart gallery".into()),
                ..Default::default()
            }),
            window_bounds: Some(WindowBounds::Windowed(Bounds::centered(
                None,
                window_size,
                cx,
            ))),
            ..Default::default()
        };

        let opened = cx.open_window(options, |window, cx| {
            let gallery = cx.new(|cx| GalleryView::new(demo, settings, cx));
            spawn_ticker(window, cx, gallery.clone());
            gallery
        });
        if let Err(err) = opened {
            error!(%err, "failed to open gallery window");
            cx.quit();
        }
    });
    Ok(())
}

fn spawn_ticker(window: &mut Window, cx: &mut gpui::App, gallery: Entity<GalleryView>) {
    window
        .spawn(cx, move |cx: &mut AsyncWindowContext| {
            let mut cx = cx.clone();
            async move {
                loop {
                    Timer::after(FRAME_INTERVAL).await;
                    let alive = cx.update(|_, cx| {
                        gallery.update(cx, |this, cx| this.tick(cx));
                    });
                    if alive.is_err() {
                        break;
                    }
                }
            }
        })
        .detach();
}
