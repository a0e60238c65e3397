use std::sync::{Arc, RwLock};

use gpui::prelude::*;
use gpui::{MouseButton, MouseDownEvent, MouseMoveEvent, Pixels, Point, Window, canvas, div};

use crate::frame::ChartUiState;
use crate::gallery::Demo;
use crate::geom::{ScreenPoint, ScreenRect};
use crate::interaction::HitRegion;

use super::paint::{paint_frame, to_hsla};
use super::text::GpuiTextMeasurer;

/// A GPUI view that paints one [`Demo`] and routes pointer input to it.
///
/// Hovering the plot area shows the demo's readout; clicking a legend row
/// toggles that series.
#[derive(Clone)]
pub struct ChartView {
    demo: Arc<RwLock<Demo>>,
    state: Arc<RwLock<ChartUiState>>,
}

impl ChartView {
    /// Create a view that owns `demo`.
    pub fn new(demo: Demo) -> Self {
        Self {
            demo: Arc::new(RwLock::new(demo)),
            state: Arc::new(RwLock::new(ChartUiState::default())),
        }
    }

    /// Get a handle for driving the demo from timers and buttons.
    pub fn demo_handle(&self) -> DemoHandle {
        DemoHandle {
            demo: Arc::clone(&self.demo),
        }
    }

    /// Swap in another demo and forget the pointer state of the old one.
    pub fn replace_demo(&mut self, demo: Demo) {
        *self.demo.write().expect("demo lock") = demo;
        *self.state.write().expect("chart state lock") = ChartUiState::default();
    }

    fn on_mouse_down(&mut self, ev: &MouseDownEvent, cx: &mut Context<Self>) {
        let pos = screen_point(ev.position);
        let mut state = self.state.write().expect("chart state lock");
        let HitRegion::Legend(series_id) = state.regions.hit_test(pos) else {
            return;
        };
        if ev.click_count == 1 {
            let visible = self.demo.write().expect("demo lock").toggle_series(series_id);
            tracing::debug!(?series_id, ?visible, "legend toggled series");
        }
        state.hover = None;
        cx.notify();
    }

    fn on_mouse_move(&mut self, ev: &MouseMoveEvent, cx: &mut Context<Self>) {
        let pos = screen_point(ev.position);
        let mut state = self.state.write().expect("chart state lock");
        let hover = match state.regions.hit_test(pos) {
            HitRegion::Plot => Some(pos),
            HitRegion::Legend(_) | HitRegion::Outside => None,
        };
        if state.hover != hover {
            state.hover = hover;
            cx.notify();
        }
    }

    fn on_hover(&mut self, hovered: bool, cx: &mut Context<Self>) {
        if hovered {
            return;
        }
        let mut state = self.state.write().expect("chart state lock");
        if state.hover.take().is_some() {
            cx.notify();
        }
    }
}

impl Render for ChartView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let demo = Arc::clone(&self.demo);
        let state = Arc::clone(&self.state);
        let background = demo.read().expect("demo lock").chart().theme().background;

        div()
            .id("chart-view")
            .size_full()
            .bg(to_hsla(background))
            .child(
                canvas(
                    move |bounds, window, _| {
                        let demo = demo.read().expect("demo lock");
                        let mut state = state.write().expect("chart state lock");
                        let measurer = GpuiTextMeasurer::new(window);
                        demo.build_frame(&mut state, screen_rect(bounds), &measurer)
                    },
                    move |_, frame, window, cx| {
                        paint_frame(&frame, window, cx);
                    },
                )
                .size_full(),
            )
            .on_mouse_down(
                MouseButton::Left,
                cx.listener(|this, ev, _, cx| {
                    this.on_mouse_down(ev, cx);
                }),
            )
            .on_mouse_move(cx.listener(|this, ev, _, cx| {
                this.on_mouse_move(ev, cx);
            }))
            .on_hover(cx.listener(|this, hovered: &bool, _, cx| {
                this.on_hover(*hovered, cx);
            }))
    }
}

/// A handle for mutating the [`Demo`] held inside a `ChartView`.
///
/// The handle clones cheaply and can be moved into timers.
#[derive(Clone)]
pub struct DemoHandle {
    demo: Arc<RwLock<Demo>>,
}

impl DemoHandle {
    /// Read the demo. The demo is locked for the duration of the callback.
    pub fn read<R>(&self, f: impl FnOnce(&Demo) -> R) -> R {
        let demo = self.demo.read().expect("demo lock");
        f(&demo)
    }

    /// Mutate the demo. The demo is locked for the duration of the callback.
    pub fn write<R>(&self, f: impl FnOnce(&mut Demo) -> R) -> R {
        let mut demo = self.demo.write().expect("demo lock");
        f(&mut demo)
    }
}

fn screen_point(point: Point<Pixels>) -> ScreenPoint {
    ScreenPoint::new(f32::from(point.x), f32::from(point.y))
}

fn screen_rect(bounds: gpui::Bounds<Pixels>) -> ScreenRect {
    let origin = screen_point(bounds.origin);
    ScreenRect::from_origin_size(
        origin,
        f32::from(bounds.size.width),
        f32::from(bounds.size.height),
    )
}
