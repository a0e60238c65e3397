//! Gallery configuration file handling.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use tracing::{info, warn};

use crate::datasource::{GeneratorOptions, StreamRange};
use crate::error::ConfigError;
use crate::style::ThemeKind;

/// Shortest stream interval; faster rates are clamped to one UI frame.
pub const MIN_STREAM_INTERVAL_MS: u64 = 16;

/// Longest stream history a demo keeps.
pub const MAX_STREAM_HISTORY: usize = 100_000;

/// Longest span of the dated generators, about a century.
pub const MAX_NUMBER_OF_DAYS: u32 = 36_500;

/// Top-level gallery configuration (TOML).
///
/// Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    /// Initial window size.
    pub window: WindowConfig,
    /// Light or dark theme.
    pub theme: ThemeKind,
    /// Demo selected at startup.
    pub initial_demo: Option<String>,
    /// Seed for every random generator; random when absent.
    pub seed: Option<u64>,
    /// Streaming demo settings.
    pub stream: StreamConfig,
    /// Overrides for the dated data generators.
    pub generator: GeneratorOptions,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            theme: ThemeKind::default(),
            initial_demo: None,
            seed: None,
            stream: StreamConfig::default(),
            generator: GeneratorOptions::default(),
        }
    }
}

/// Window size in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window width.
    pub width: f32,
    /// Window height.
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1100.0,
            height: 720.0,
        }
    }
}

/// Data stream settings.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    /// Milliseconds between samples.
    pub interval_ms: u64,
    /// Inclusive x bounds of samples.
    pub x_range: (i64, i64),
    /// Inclusive y bounds of samples.
    pub y_range: (i64, i64),
    /// Number of samples kept on screen.
    pub history: usize,
}

impl Default for StreamConfig {
    fn default() -> Self {
        let range = StreamRange::default();
        Self {
            interval_ms: 1000,
            x_range: range.x,
            y_range: range.y,
            history: 60,
        }
    }
}

impl StreamConfig {
    /// Sample bounds.
    pub fn range(&self) -> StreamRange {
        StreamRange {
            x: self.x_range,
            y: self.y_range,
        }
    }

    /// Interval between samples, clamped to [`MIN_STREAM_INTERVAL_MS`].
    pub fn interval(&self) -> Duration {
        if self.interval_ms < MIN_STREAM_INTERVAL_MS {
            warn!(
                interval_ms = self.interval_ms,
                min = MIN_STREAM_INTERVAL_MS,
                "stream interval too short, clamping"
            );
            return Duration::from_millis(MIN_STREAM_INTERVAL_MS);
        }
        Duration::from_millis(self.interval_ms)
    }
}

impl GalleryConfig {
    /// Load and validate a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        info!(path = %path.display(), "loaded gallery config");
        Ok(config)
    }

    /// Reject values no demo can work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.window.width > 0.0 && self.window.height > 0.0) {
            return Err(ConfigError::Invalid {
                field: "window",
                reason: format!(
                    "size must be positive, got {}x{}",
                    self.window.width, self.window.height
                ),
            });
        }
        if self.stream.history == 0 {
            return Err(ConfigError::Invalid {
                field: "stream.history",
                reason: "must keep at least one sample".to_string(),
            });
        }
        if self.stream.history > MAX_STREAM_HISTORY {
            return Err(ConfigError::Invalid {
                field: "stream.history",
                reason: format!(
                    "at most {MAX_STREAM_HISTORY} samples, got {}",
                    self.stream.history
                ),
            });
        }
        for (field, (min, max)) in [
            ("stream.x_range", self.stream.x_range),
            ("stream.y_range", self.stream.y_range),
        ] {
            if min > max {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("bounds are inverted: [{min}, {max}]"),
                });
            }
        }
        if self.generator.number_of_days == 0 {
            return Err(ConfigError::Invalid {
                field: "generator.number_of_days",
                reason: "must cover at least one day".to_string(),
            });
        }
        if self.generator.number_of_days > MAX_NUMBER_OF_DAYS {
            return Err(ConfigError::Invalid {
                field: "generator.number_of_days",
                reason: format!(
                    "at most {MAX_NUMBER_OF_DAYS} days, got {}",
                    self.generator.number_of_days
                ),
            });
        }
        Ok(())
    }

    /// The configured seed, or a fresh random one.
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> GalleryConfig {
        toml::from_str(text).expect("valid toml")
    }

    #[test]
    fn empty_file_uses_defaults() {
        let config = parse("");
        assert_eq!(config, GalleryConfig::default());
        assert_eq!(config.stream.interval(), Duration::from_secs(1));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = parse(
            r#"
            theme = "dark"
            seed = 7

            [stream]
            interval_ms = 250
            y_range = [10, 20]

            [generator]
            volatility = 0.05
            "#,
        );
        assert_eq!(config.theme, ThemeKind::Dark);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.resolve_seed(), 7);
        assert_eq!(config.stream.range().y, (10, 20));
        assert_eq!(config.stream.range().x, (0, 100));
        assert_eq!(config.stream.history, 60);
        assert_eq!(config.generator.volatility, 0.05);
        assert_eq!(config.generator.number_of_days, 90);
        assert_eq!(config.window.width, 1100.0);
    }

    #[test]
    fn short_interval_is_clamped() {
        let config = parse("[stream]\ninterval_ms = 1\n");
        assert_eq!(
            config.stream.interval(),
            Duration::from_millis(MIN_STREAM_INTERVAL_MS)
        );
    }

    #[test]
    fn inverted_range_is_rejected() {
        let config = parse("[stream]\nx_range = [5, 1]\n");
        let err = config.validate().expect_err("inverted range");
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "stream.x_range",
                ..
            }
        ));
    }

    #[test]
    fn oversized_history_and_span_are_rejected() {
        let config = parse("[generator]\nnumber_of_days = 100000000\n");
        let err = config.validate().expect_err("too many days");
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "generator.number_of_days",
                ..
            }
        ));

        let config = parse("[stream]\nhistory = 9000000000000000000\n");
        let err = config.validate().expect_err("history too long");
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "stream.history",
                ..
            }
        ));

        let config = parse(&format!(
            "[stream]\nhistory = {MAX_STREAM_HISTORY}\n[generator]\nnumber_of_days = {MAX_NUMBER_OF_DAYS}\n"
        ));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_window_is_rejected() {
        let config = parse("[window]\nwidth = 0.0\n");
        assert!(config.validate().is_err());
    }

    #[test]
    fn unknown_theme_fails_to_parse() {
        assert!(toml::from_str::<GalleryConfig>("theme = \"sepia\"").is_err());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = GalleryConfig::load(Path::new("/nonexistent/gallery.toml")).expect_err("missing");
        assert!(err.to_string().contains("/nonexistent/gallery.toml"));
    }
}
