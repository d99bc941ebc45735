//! Error types
//!
//! The simulation itself is total over its inputs; only setup and the
//! record store can fail.

use std::path::PathBuf;

use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Session construction errors
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("cannot build starting entities: {0}")]
    InvalidConfig(#[from] ConfigError),
}

/// Record store errors
#[derive(Error, Debug)]
pub enum RecordStoreError {
    #[error("record store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("record store is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
