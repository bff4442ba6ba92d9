// Error types for the Brave Search API client

use thiserror::Error;

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Error type for API operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// An outbound call would exceed a configured call-volume ceiling.
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// The API answered with a non-2xx status. The message carries the
    /// status line and a best-effort extraction of the response body.
    #[error("{status} {status_text}\n{body}")]
    Http {
        status: u16,
        status_text: String,
        body: String,
    },

    /// Network-level failure (DNS, timeout, connection refused).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body could not be decoded into the expected model.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
