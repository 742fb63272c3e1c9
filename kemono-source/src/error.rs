//! Kemono-specific errors.

use kemono_core::CoreError;
use kemono_fetch::HttpError;
use reqwest::StatusCode;
use thiserror::Error;

/// Kemono-specific errors.
#[derive(Debug, Error)]
pub enum KemonoError {
    /// The API answered with a non-success status.
    ///
    /// `context` is the call site's static message, e.g. "Failed to get creator".
    #[error("{context} (HTTP {status})")]
    RequestFailed {
        /// Static message naming the failed operation.
        context: &'static str,
        /// Status the API returned.
        status: StatusCode,
    },

    /// The request could not be sent or its body could not be read.
    #[error("HTTP request failed: {0}")]
    Http(#[from] HttpError),

    /// The response parsed but is missing something the mapping needs.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// A URL did not match the expected channel or post shape.
    #[error("Malformed URL: {0}")]
    MalformedUrl(String),

    /// The response body was not the expected JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A configured endpoint is not an absolute URL.
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

impl From<reqwest::Error> for KemonoError {
    fn from(err: reqwest::Error) -> Self {
        KemonoError::Http(HttpError::Request(err))
    }
}

impl From<KemonoError> for CoreError {
    fn from(err: KemonoError) -> Self {
        match err {
            KemonoError::RequestFailed { context, .. } => CoreError::OperationFailed(context.to_string()),
            KemonoError::Http(e) if e.is_rejected_locally() => CoreError::Other(e.to_string()),
            KemonoError::Http(e) => CoreError::OperationFailed(e.to_string()),
            KemonoError::MalformedUrl(url) => CoreError::MalformedUrl(url),
            KemonoError::InvalidResponse(msg) => CoreError::InvalidData(msg),
            KemonoError::Json(e) => CoreError::Serialization(e),
            KemonoError::InvalidEndpoint(msg) => CoreError::Other(msg),
        }
    }
}
