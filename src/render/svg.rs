//! SVG serialisation of a render list.

use std::fmt::Write;

use crate::axis::TextMeasurer;
use crate::geom::ScreenRect;
use crate::render::{Color, MarkerShape, RenderCommand, RenderList};

/// Text measurer with a fixed per-character advance, for headless rendering.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ApproxMeasurer;

impl TextMeasurer for ApproxMeasurer {
    fn measure(&self, text: &str, size: f32) -> (f32, f32) {
        if text.is_empty() {
            return (0.0, 0.0);
        }
        (text.chars().count() as f32 * size * 0.6, size * 1.2)
    }
}

/// Write a render list as a standalone SVG document.
pub(crate) fn to_svg(render: &RenderList, width: f32, height: f32) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    );

    let mut clips = 0usize;
    let mut open_groups = 0usize;
    for command in render.commands() {
        match command {
            RenderCommand::ClipRect(rect) => {
                clips += 1;
                let _ = writeln!(
                    out,
                    r#"<clipPath id="clip{clips}"><rect {}/></clipPath><g clip-path="url(#clip{clips})">"#,
                    rect_attrs(*rect)
                );
                open_groups += 1;
            }
            RenderCommand::ClipEnd => {
                if open_groups > 0 {
                    out.push_str("</g>\n");
                    open_groups -= 1;
                }
            }
            RenderCommand::LineSegments { segments, style } => {
                let mut path = String::new();
                for segment in segments {
                    let _ = write!(
                        path,
                        "M{:.2},{:.2}L{:.2},{:.2}",
                        segment.start.x, segment.start.y, segment.end.x, segment.end.y
                    );
                }
                if path.is_empty() {
                    continue;
                }
                let _ = writeln!(
                    out,
                    r#"<path d="{path}" fill="none" stroke-width="{}" stroke-linecap="round" {}/>"#,
                    style.width,
                    paint_attrs("stroke", style.color)
                );
            }
            RenderCommand::Points { points, style } => {
                let radius = style.size * 0.5;
                for point in points {
                    let paint = match style.shape {
                        MarkerShape::Circle => paint_attrs("fill", style.color),
                        MarkerShape::Ring => format!(
                            r#"fill="none" stroke-width="2" {}"#,
                            paint_attrs("stroke", style.color)
                        ),
                    };
                    let _ = writeln!(
                        out,
                        r#"<circle cx="{:.2}" cy="{:.2}" r="{radius}" {paint}/>"#,
                        point.x, point.y
                    );
                }
            }
            RenderCommand::Rect { rect, style } => {
                let stroke = if style.stroke_width > 0.0 && style.stroke.a > 0.0 {
                    format!(
                        r#" stroke-width="{}" {}"#,
                        style.stroke_width,
                        paint_attrs("stroke", style.stroke)
                    )
                } else {
                    String::new()
                };
                let _ = writeln!(
                    out,
                    r#"<rect {} rx="{}" {}{stroke}/>"#,
                    rect_attrs(*rect),
                    style.radius,
                    paint_attrs("fill", style.fill)
                );
            }
            RenderCommand::Text {
                position,
                text,
                style,
            } => {
                let _ = writeln!(
                    out,
                    r#"<text x="{:.2}" y="{:.2}" font-family="sans-serif" font-size="{}" dominant-baseline="hanging" {}>{}</text>"#,
                    position.x,
                    position.y,
                    style.size,
                    paint_attrs("fill", style.color),
                    escape(text)
                );
            }
        }
    }
    for _ in 0..open_groups {
        out.push_str("</g>\n");
    }
    out.push_str("</svg>\n");
    out
}

fn rect_attrs(rect: ScreenRect) -> String {
    format!(
        r#"x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}""#,
        rect.min.x,
        rect.min.y,
        rect.width().max(0.0),
        rect.height().max(0.0)
    )
}

fn paint_attrs(attr: &str, color: Color) -> String {
    if color.a >= 1.0 {
        format!(r#"{attr}="{}""#, color.to_hex())
    } else if color.a <= 0.0 {
        format!(r#"{attr}="none""#)
    } else {
        format!(r#"{attr}="{}" {attr}-opacity="{:.3}""#, color.to_hex(), color.a)
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::ScreenPoint;
    use crate::render::{LineSegment, LineStyle, MarkerStyle, TextStyle};

    #[test]
    fn writes_balanced_document() {
        let mut render = RenderList::new();
        render.push(RenderCommand::ClipRect(ScreenRect::new(
            ScreenPoint::new(0.0, 0.0),
            ScreenPoint::new(10.0, 10.0),
        )));
        render.push_line(
            vec![LineSegment::new(ScreenPoint::new(0.0, 0.0), ScreenPoint::new(5.0, 5.0))],
            LineStyle::solid(Color::from_rgb(0x2196f3), 2.0),
        );
        render.push(RenderCommand::ClipEnd);
        let svg = to_svg(&render, 100.0, 50.0);
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains(r##"stroke="#2196f3""##));
        assert!(svg.contains("M0.00,0.00L5.00,5.00"));
        assert_eq!(svg.matches("<g ").count(), svg.matches("</g>").count());
    }

    #[test]
    fn escapes_text_and_fades_colors() {
        let mut render = RenderList::new();
        render.push_text(
            ScreenPoint::new(1.0, 2.0),
            "a < b & c",
            TextStyle {
                color: Color::BLACK.with_alpha(0.5),
                size: 12.0,
            },
        );
        render.push(RenderCommand::Points {
            points: vec![ScreenPoint::new(3.0, 3.0)],
            style: MarkerStyle::default(),
        });
        let svg = to_svg(&render, 10.0, 10.0);
        assert!(svg.contains("a &lt; b &amp; c"));
        assert!(svg.contains(r#"fill-opacity="0.500""#));
        assert!(svg.contains(r#"r="4""#));
    }

    #[test]
    fn approx_measurer_scales_with_size() {
        let (w12, h12) = ApproxMeasurer.measure("abcd", 12.0);
        let (w24, _) = ApproxMeasurer.measure("abcd", 24.0);
        assert!((w24 - 2.0 * w12).abs() < 1e-4);
        assert!(h12 > 12.0);
        assert_eq!(ApproxMeasurer.measure("", 12.0), (0.0, 0.0));
    }
}
