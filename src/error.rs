//! Error types for the Semantic Scholar client.

use std::time::Duration;

/// Errors that can occur at the HTTP boundary of the Semantic Scholar API.
///
/// These never escape the resolver: [`crate::resolve`] folds each variant
/// into a [`crate::Resolution`] so per-item failures cannot abort a run.
#[derive(Debug, thiserror::Error)]
pub enum S2Error {
    /// HTTP request failed (network, timeout, etc.)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Semantic Scholar API returned an error status code.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// Rate limited by the API (HTTP 429).
    #[error("Rate limited, retry after {retry_after:?}")]
    RateLimited { retry_after: Option<Duration> },

    /// Paper not found (HTTP 404).
    #[error("Not found: {0}")]
    NotFound(String),

    /// Failed to parse the API response body.
    #[error("Failed to parse response: {0}")]
    Parse(String),
}

/// Convenience alias for Results using [`S2Error`].
pub type Result<T> = std::result::Result<T, S2Error>;
