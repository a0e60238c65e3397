//! Rendering primitives and clipping helpers.
//!
//! These types are backend-agnostic and are used by render backends (the GPUI
//! backend and the SVG exporter) to describe how charts should be drawn.

pub(crate) mod svg;

use crate::geom::{ScreenPoint, ScreenRect};

/// RGBA color.
///
/// All components are expected to be in the 0.0..=1.0 range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

impl Color {
    /// Create a new color.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from a `0xRRGGBB` value.
    pub const fn from_rgb(hex: u32) -> Self {
        Self::new(
            ((hex >> 16) & 0xff) as f32 / 255.0,
            ((hex >> 8) & 0xff) as f32 / 255.0,
            (hex & 0xff) as f32 / 255.0,
            1.0,
        )
    }

    /// Parse a `#rrggbb` or `#rgb` string.
    pub fn from_hex(value: &str) -> Option<Self> {
        let digits = value.strip_prefix('#').unwrap_or(value);
        let hex = match digits.len() {
            6 => u32::from_str_radix(digits, 16).ok()?,
            3 => {
                let short = u32::from_str_radix(digits, 16).ok()?;
                let r = (short >> 8) & 0xf;
                let g = (short >> 4) & 0xf;
                let b = short & 0xf;
                ((r * 0x11) << 16) | ((g * 0x11) << 8) | (b * 0x11)
            }
            _ => return None,
        };
        Some(Self::from_rgb(hex))
    }

    /// Return the same color with a different alpha.
    pub const fn with_alpha(self, alpha: f32) -> Self {
        Self::new(self.r, self.g, self.b, alpha)
    }

    /// Multiply the alpha channel.
    pub fn fade(self, factor: f32) -> Self {
        self.with_alpha(self.a * factor.clamp(0.0, 1.0))
    }

    /// Format as `#rrggbb`, ignoring alpha.
    pub fn to_hex(self) -> String {
        let channel = |value: f32| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            channel(self.r),
            channel(self.g),
            channel(self.b)
        )
    }

    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    /// Fully transparent.
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
}

/// Line stroke styling.
///
/// The width and dash lengths are expressed in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in pixels.
    pub width: f32,
    /// Optional dash pattern as (dash, gap).
    pub dash: Option<(f32, f32)>,
}

impl LineStyle {
    /// Solid stroke.
    pub const fn solid(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            dash: None,
        }
    }

    /// Dashed stroke.
    pub const fn dashed(color: Color, width: f32, dash: f32, gap: f32) -> Self {
        Self {
            color,
            width,
            dash: Some((dash, gap)),
        }
    }
}

impl Default for LineStyle {
    fn default() -> Self {
        Self::solid(Color::BLACK, 1.0)
    }
}

/// Marker shape for data points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerShape {
    /// Filled circle.
    Circle,
    /// Outlined circle with a transparent center.
    Ring,
}

/// Marker styling for data points.
///
/// Marker sizes are diameters in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerStyle {
    /// Marker color.
    pub color: Color,
    /// Marker size in pixels.
    pub size: f32,
    /// Marker shape.
    pub shape: MarkerShape,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            size: 8.0,
            shape: MarkerShape::Circle,
        }
    }
}

/// Rectangle styling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct RectStyle {
    /// Fill color.
    pub fill: Color,
    /// Stroke color.
    pub stroke: Color,
    /// Stroke width.
    pub stroke_width: f32,
    /// Corner radius.
    pub radius: f32,
}

impl Default for RectStyle {
    fn default() -> Self {
        Self {
            fill: Color::TRANSPARENT,
            stroke: Color::BLACK,
            stroke_width: 1.0,
            radius: 0.0,
        }
    }
}

/// Text styling.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TextStyle {
    /// Text color.
    pub color: Color,
    /// Font size in pixels.
    pub size: f32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            size: 12.0,
        }
    }
}

/// A line segment in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct LineSegment {
    /// Segment start.
    pub start: ScreenPoint,
    /// Segment end.
    pub end: ScreenPoint,
}

impl LineSegment {
    /// Create a new line segment.
    pub(crate) fn new(start: ScreenPoint, end: ScreenPoint) -> Self {
        Self { start, end }
    }

    fn length(&self) -> f32 {
        self.start.distance(self.end)
    }
}

/// Render command list.
#[derive(Debug, Clone)]
pub(crate) enum RenderCommand {
    /// Start clipping to a rectangle.
    ClipRect(ScreenRect),
    /// End clipping.
    ClipEnd,
    /// Draw line segments.
    LineSegments {
        /// Segments to draw.
        segments: Vec<LineSegment>,
        /// Styling for the segments.
        style: LineStyle,
    },
    /// Draw markers.
    Points {
        /// Marker centers.
        points: Vec<ScreenPoint>,
        /// Marker styling.
        style: MarkerStyle,
    },
    /// Draw a rectangle.
    Rect {
        /// Rectangle bounds.
        rect: ScreenRect,
        /// Rectangle styling.
        style: RectStyle,
    },
    /// Draw text with its top-left corner at `position`.
    Text {
        /// Text position.
        position: ScreenPoint,
        /// Text content.
        text: String,
        /// Text styling.
        style: TextStyle,
    },
}

/// Aggregated render commands.
#[derive(Debug, Default, Clone)]
pub(crate) struct RenderList {
    commands: Vec<RenderCommand>,
}

impl RenderList {
    /// Create an empty render list.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Push a render command.
    pub(crate) fn push(&mut self, command: RenderCommand) {
        self.commands.push(command);
    }

    /// Push a stroked line, splitting it into dashes when the style asks for it.
    pub(crate) fn push_line(&mut self, segments: Vec<LineSegment>, style: LineStyle) {
        if segments.is_empty() {
            return;
        }
        let segments = match style.dash {
            Some((dash, gap)) => dash_segments(&segments, dash, gap),
            None => segments,
        };
        self.push(RenderCommand::LineSegments { segments, style });
    }

    /// Push text.
    pub(crate) fn push_text(&mut self, position: ScreenPoint, text: impl Into<String>, style: TextStyle) {
        self.push(RenderCommand::Text {
            position,
            text: text.into(),
            style,
        });
    }

    /// Access all render commands.
    pub(crate) fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }
}

/// Convert a polyline into clipped line segments.
pub(crate) fn polyline_segments(points: &[ScreenPoint], clip: Option<ScreenRect>) -> Vec<LineSegment> {
    let mut out = Vec::with_capacity(points.len().saturating_sub(1));
    for window in points.windows(2) {
        let (start, end) = (window[0], window[1]);
        match clip {
            Some(rect) => {
                if let Some((start, end)) = clip_segment(start, end, rect) {
                    out.push(LineSegment::new(start, end));
                }
            }
            None => out.push(LineSegment::new(start, end)),
        }
    }
    out
}

/// Split segments into dashes, carrying the pattern phase across segments.
pub(crate) fn dash_segments(segments: &[LineSegment], dash: f32, gap: f32) -> Vec<LineSegment> {
    if dash <= 0.0 || gap <= 0.0 {
        return segments.to_vec();
    }
    let period = dash + gap;
    let mut out = Vec::new();
    let mut phase = 0.0_f32;
    for segment in segments {
        let length = segment.length();
        if length <= 0.0 {
            continue;
        }
        let mut travelled = 0.0_f32;
        while travelled < length {
            let in_dash = phase < dash;
            let remaining_in_state = if in_dash { dash - phase } else { period - phase };
            let step = remaining_in_state.min(length - travelled);
            if in_dash {
                let start = segment.start.lerp(segment.end, travelled / length);
                let end = segment.start.lerp(segment.end, (travelled + step) / length);
                out.push(LineSegment::new(start, end));
            }
            travelled += step;
            phase = (phase + step) % period;
        }
    }
    out
}

pub(crate) fn clip_segment(
    mut start: ScreenPoint,
    mut end: ScreenPoint,
    rect: ScreenRect,
) -> Option<(ScreenPoint, ScreenPoint)> {
    const LEFT: u8 = 1;
    const RIGHT: u8 = 2;
    const TOP: u8 = 4;
    const BOTTOM: u8 = 8;

    let region_code = |point: ScreenPoint| {
        let mut code = 0;
        if point.x < rect.min.x {
            code |= LEFT;
        } else if point.x > rect.max.x {
            code |= RIGHT;
        }
        if point.y < rect.min.y {
            code |= TOP;
        } else if point.y > rect.max.y {
            code |= BOTTOM;
        }
        code
    };

    let mut out_start = region_code(start);
    let mut out_end = region_code(end);

    loop {
        if (out_start | out_end) == 0 {
            return Some((start, end));
        }
        if (out_start & out_end) != 0 {
            return None;
        }

        let out_code = if out_start != 0 { out_start } else { out_end };
        let (x, y) = if (out_code & TOP) != 0 {
            (
                start.x + (end.x - start.x) * (rect.min.y - start.y) / (end.y - start.y),
                rect.min.y,
            )
        } else if (out_code & BOTTOM) != 0 {
            (
                start.x + (end.x - start.x) * (rect.max.y - start.y) / (end.y - start.y),
                rect.max.y,
            )
        } else if (out_code & RIGHT) != 0 {
            (
                rect.max.x,
                start.y + (end.y - start.y) * (rect.max.x - start.x) / (end.x - start.x),
            )
        } else {
            (
                rect.min.x,
                start.y + (end.y - start.y) * (rect.min.x - start.x) / (end.x - start.x),
            )
        };

        let new_point = ScreenPoint::new(x, y);
        if out_code == out_start {
            start = new_point;
            out_start = region_code(start);
        } else {
            end = new_point;
            out_end = region_code(end);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(w: f32, h: f32) -> ScreenRect {
        ScreenRect::new(ScreenPoint::new(0.0, 0.0), ScreenPoint::new(w, h))
    }

    #[test]
    fn clip_segment_inside() {
        let start = ScreenPoint::new(2.0, 2.0);
        let end = ScreenPoint::new(8.0, 8.0);
        let clipped = clip_segment(start, end, rect(10.0, 10.0)).expect("segment should clip");
        assert_eq!(clipped.0, start);
        assert_eq!(clipped.1, end);
    }

    #[test]
    fn clip_segment_crossing_edge() {
        let clipped = clip_segment(
            ScreenPoint::new(5.0, 5.0),
            ScreenPoint::new(15.0, 5.0),
            rect(10.0, 10.0),
        )
        .expect("segment should clip");
        assert_eq!(clipped.1, ScreenPoint::new(10.0, 5.0));
        assert!(
            clip_segment(
                ScreenPoint::new(12.0, 0.0),
                ScreenPoint::new(15.0, 5.0),
                rect(10.0, 10.0)
            )
            .is_none()
        );
    }

    #[test]
    fn parses_hex_colors() {
        let color = Color::from_hex("#2196f3").expect("valid hex");
        assert_eq!(color, Color::from_rgb(0x2196f3));
        assert_eq!(color.to_hex(), "#2196f3");
        assert_eq!(Color::from_hex("#fff"), Some(Color::WHITE));
        assert!(Color::from_hex("#12345").is_none());
        assert!(Color::from_hex("zzzzzz").is_none());
    }

    #[test]
    fn dashes_follow_pattern_across_segments() {
        let segments = [
            LineSegment::new(ScreenPoint::new(0.0, 0.0), ScreenPoint::new(6.0, 0.0)),
            LineSegment::new(ScreenPoint::new(6.0, 0.0), ScreenPoint::new(16.0, 0.0)),
        ];
        let dashes = dash_segments(&segments, 4.0, 4.0);
        assert_eq!(dashes.len(), 2);
        assert!(dashes[0].start.x.abs() < 1e-4);
        assert!((dashes[1].start.x - 8.0).abs() < 1e-4);
        assert!(dashes.iter().all(|seg| (seg.length() - 4.0).abs() < 1e-4));
    }

    #[test]
    fn push_line_skips_empty_input() {
        let mut list = RenderList::new();
        list.push_line(Vec::new(), LineStyle::default());
        assert!(list.commands().is_empty());
    }
}
