//! API Error Types
//!
//! Errors raised while talking to the content service. All of them are
//! recoverable: the caller reports them and keeps its current state.

use thiserror::Error;

/// Errors that can occur when communicating with the content API
#[derive(Error, Debug)]
pub enum ApiError {
    /// Connection refused or host unreachable
    #[error("Content service unavailable")]
    Unavailable,

    /// Request did not finish within the configured timeout
    #[error("Request timeout")]
    Timeout,

    /// Any other transport failure
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("API error {status}: {message}")]
    Http { status: u16, message: String },

    /// Response body did not have the expected shape
    #[error("Invalid response: {0}")]
    Decode(String),

    /// Request rejected before it was sent
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Classify a transport error the way users think about it
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_connect() {
            ApiError::Unavailable
        } else {
            ApiError::Request(err)
        }
    }

    /// HTTP status code, for errors that carry one
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
