//! Core error types for the content source contract.

use thiserror::Error;

/// Error returned across the host contract.
///
/// Every host operation collapses its failures into one of these variants.
/// The host is responsible for surfacing them to the end user.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A remote call did not succeed. Carries the call site's static message.
    #[error("{0}")]
    OperationFailed(String),

    /// A URL did not match any shape this source recognizes.
    #[error("Malformed URL: {0}")]
    MalformedUrl(String),

    /// Invalid data in a remote response.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl CoreError {
    /// Creates an operation failure with the given message.
    pub fn operation_failed(message: impl Into<String>) -> Self {
        Self::OperationFailed(message.into())
    }
}
