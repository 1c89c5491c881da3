//! Error types for loading tasks and configuration

use std::path::PathBuf;
use thiserror::Error;

/// Failures while reading a task source
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON export: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid tab-delimited table: {0}")]
    Tsv(#[from] csv::Error),

    #[error("failed to write task table: {0}")]
    Write(#[source] csv::Error),

    #[error("table has no {0} column")]
    MissingColumn(&'static str),

    #[error("record {index} is not an object")]
    InvalidRecord { index: usize },

    #[error("unknown input format: {0} (expected json or tsv)")]
    UnknownFormat(String),
}

/// Failures while loading or validating a config file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
