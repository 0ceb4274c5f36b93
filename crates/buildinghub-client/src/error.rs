//! Error types for backend requests.

use thiserror::Error;

/// Errors that can occur while talking to the backend.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Connection, timeout or other transport failure.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// The body did not have the expected shape.
    #[error("unexpected response from {url}: {message}")]
    Decode { url: String, message: String },

    /// The configured base URL cannot have paths appended.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// The fetch ended without producing a result.
    #[error("request was cancelled")]
    Cancelled,
}

/// Result type alias for backend requests.
pub type Result<T> = std::result::Result<T, ClientError>;
