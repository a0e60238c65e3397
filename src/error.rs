//! Error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::datasource::StreamRange;

/// Errors raised while loading or validating the gallery configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Errors surfaced by the gallery.
#[derive(Debug, Error)]
pub enum GalleryError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("unknown demo `{0}`")]
    UnknownDemo(String),

    #[error("invalid stream range {0:?}: bounds must be ordered")]
    InvalidStreamRange(StreamRange),

    #[error("failed to write {path}: {source}")]
    Export {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
