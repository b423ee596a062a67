//! Error types for loading document snapshots.
//!
//! Flag detection itself never fails; only reading input can.

use std::path::PathBuf;
use thiserror::Error;

/// Errors while loading a parsed-document snapshot.
#[derive(Debug, Error)]
pub enum LoadError {
    // IO errors (exit code 3)
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("cannot read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[cfg(feature = "remote")]
    #[error("failed to fetch {url}: {source}")]
    NetworkError {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    // Document errors (exit code 2)
    #[error("invalid document: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },

    #[error("operation '{operation}' references unknown channel '{channel}'")]
    UnknownChannel { operation: String, channel: String },
}

impl LoadError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            LoadError::FileNotFound { .. } | LoadError::ReadError { .. } => 3,
            #[cfg(feature = "remote")]
            LoadError::NetworkError { .. } => 3,
            _ => 2,
        }
    }
}
