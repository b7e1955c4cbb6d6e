//! Error types for catalog loading.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur while configuring the store or fetching a list.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StoreError {
    /// Request could not be sent or the connection failed.
    #[error("network error: {0}")]
    Network(String),

    /// The API answered with a non-success status.
    #[error("request to {url} failed with status {status}")]
    Status { status: u16, url: String },

    /// The response body did not match the expected shape.
    #[error("invalid response from {url}: {message}")]
    Decode { url: String, message: String },

    /// A configured URL could not be parsed.
    #[error("invalid URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    /// The configuration file could not be parsed.
    #[error("invalid configuration{}: {message}", config_location(.path.as_deref()))]
    Config {
        path: Option<PathBuf>,
        message: String,
    },

    /// Reading the configuration file failed.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A newer request superseded this one before it completed.
    #[error("request superseded by a newer one")]
    Cancelled,

    /// The background task running a request panicked.
    #[error("request task failed: {0}")]
    Task(String),
}

fn config_location(path: Option<&Path>) -> String {
    path.map(|p| format!(" in {}", p.display()))
        .unwrap_or_default()
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
