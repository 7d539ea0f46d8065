//! Error types for txweb-client

use thiserror::Error;

/// Errors produced while talking to the remote transactions API
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Transaction not found: {id}")]
    NotFound { id: String },

    #[error("API request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Failed to decode API response: {message}")]
    Decode { message: String },
}

impl ClientError {
    /// Whether the error is the remote API saying "no such record",
    /// as opposed to the call itself failing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound { .. })
    }
}

/// Result type with ClientError
pub type ClientResult<T> = Result<T, ClientError>;
