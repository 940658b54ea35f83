//! Error types for configuration loading and HTTP acquisition.
//!
//! Neither error reaches the caller of an audit: fetch failures are degraded
//! into absent resource fields, and a configuration error stops the binary
//! before any audit starts.

use std::path::PathBuf;
use thiserror::Error;

/// Failure while loading or validating an [`AuditConfig`](crate::config::AuditConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("section weight `{section}` must be a finite, non-negative number (got {value})")]
    InvalidWeight { section: &'static str, value: f64 },
}

/// Failure of a single HTTP retrieval.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("invalid resource URL {0}")]
    Url(String),

    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to read body of {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl FetchError {
    pub(crate) fn from_request(url: &str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::Timeout {
                url: url.to_string(),
            }
        } else {
            Self::Request {
                url: url.to_string(),
                source,
            }
        }
    }
}
