//! Client error types.

use thiserror::Error;

/// Errors returned by the client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request could not be sent or the response could not be read.
    #[error("the request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("the request failed with status {status}: {message}")]
    Status {
        status: reqwest::StatusCode,
        message: String,
    },

    /// The configured base URL cannot have paths appended to it.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// A local file could not be read.
    #[error("unable to read the file: {0}")]
    Io(#[from] std::io::Error),

    /// A body could not be parsed.
    #[error("unable to parse the body: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    /// HTTP status of a [`ClientError::Status`] error.
    #[must_use]
    pub const fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
