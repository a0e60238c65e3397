//! Style and theming.

use serde::Deserialize;

use crate::render::Color;

/// Colors assigned to series in order.
pub const SERIES_PALETTE: [Color; 4] = [
    Color::from_rgb(0x2196f3),
    Color::from_rgb(0xf44336),
    Color::from_rgb(0x4caf50),
    Color::from_rgb(0xff9800),
];

/// Named theme selectable from the configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeKind {
    /// Light background.
    #[default]
    Light,
    /// Dark background.
    Dark,
}

/// Visual theme for charts and the gallery chrome.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Chart background.
    pub background: Color,
    /// Gallery sidebar and header background.
    pub panel: Color,
    /// Primary text.
    pub text: Color,
    /// Secondary text.
    pub muted_text: Color,
    /// Axis lines, ticks and labels.
    pub axis: Color,
    /// Grid lines.
    pub grid: Color,
    /// Dashed hover rule.
    pub hover_line: Color,
    /// Tooltip fill.
    pub tooltip_bg: Color,
    /// Tooltip border.
    pub tooltip_border: Color,
    /// Tooltip text.
    pub tooltip_text: Color,
    /// Accent for selected controls.
    pub accent: Color,
    /// Alpha applied to hidden series in the legend.
    pub legend_inactive_alpha: f32,
}

impl Theme {
    /// Light theme.
    pub fn light() -> Self {
        Self {
            background: Color::WHITE,
            panel: Color::from_rgb(0xf8fafc),
            text: Color::from_rgb(0x1e293b),
            muted_text: Color::from_rgb(0x64748b),
            axis: Color::from_rgb(0x888888),
            grid: Color::from_rgb(0xe0e0e0),
            hover_line: Color::from_rgb(0x666666),
            tooltip_bg: Color::WHITE,
            tooltip_border: Color::from_rgb(0xdddddd),
            tooltip_text: Color::from_rgb(0x333333),
            accent: Color::from_rgb(0x4f46e5),
            legend_inactive_alpha: 0.35,
        }
    }

    /// Dark theme.
    pub fn dark() -> Self {
        Self {
            background: Color::from_rgb(0x0f172a),
            panel: Color::from_rgb(0x111827),
            text: Color::from_rgb(0xe2e8f0),
            muted_text: Color::from_rgb(0x94a3b8),
            axis: Color::from_rgb(0x94a3b8),
            grid: Color::from_rgb(0x334155),
            hover_line: Color::from_rgb(0xcbd5e1),
            tooltip_bg: Color::from_rgb(0x1e293b),
            tooltip_border: Color::from_rgb(0x475569),
            tooltip_text: Color::from_rgb(0xf1f5f9),
            accent: Color::from_rgb(0x818cf8),
            legend_inactive_alpha: 0.35,
        }
    }

    /// Theme for a configured kind.
    pub fn from_kind(kind: ThemeKind) -> Self {
        match kind {
            ThemeKind::Light => Self::light(),
            ThemeKind::Dark => Self::dark(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}
