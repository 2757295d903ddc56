//! Library error type

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CollectError>;

/// Errors that abort a run.
///
/// Per-file read failures are not errors; they are reported through
/// [`crate::domain::FileContent`] and the run continues.
#[derive(Debug, Error)]
pub enum CollectError {
    /// Missing or invalid configuration (token, repository URL, input).
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("failed to list directory {path}: {source}")]
    ListDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("expected a directory listing for '{path}'")]
    UnexpectedListing { path: String },

    #[error("unexpected response body for '{path}'")]
    UnexpectedPayload { path: String },

    #[error("failed to read template {path}: {source}")]
    Template {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CollectError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}
