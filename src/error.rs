use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid pattern for {label}: {source}")]
    InvalidPattern { label: String, source: regex::Error },

    #[error("Pattern for {label} must have exactly one capture group, found {found}")]
    CaptureGroups { label: String, found: usize },

    #[error("Duplicate tool label: {0}")]
    DuplicateLabel(String),
}

#[derive(Debug, Error)]
pub enum TableError {
    #[error("Failed to write version table {path:?}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}
