//! HTTP error types.

use thiserror::Error;

/// HTTP-specific error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Request error.
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    /// Domain not allowed.
    #[error("Domain not allowed: {0}")]
    DomainNotAllowed(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A configured header name or value is not valid HTTP.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),
}

impl HttpError {
    /// Returns true if the request never left the process.
    pub fn is_rejected_locally(&self) -> bool {
        matches!(
            self,
            HttpError::DomainNotAllowed(_) | HttpError::InvalidUrl(_) | HttpError::InvalidHeader(_)
        )
    }
}
