//! Error types for txweb-core
//!
//! Error codes and detail payloads follow one shape across the workspace so
//! the web layer can render any failure the same way: code, message,
//! suggestions.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use txweb_client::ClientError;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Transaction set not loaded yet
    NotLoaded,
    /// Transaction not found
    TransactionNotFound,
    /// Remote API call failed
    FetchFailed,
    /// Form validation failed
    ValidationError,
    /// Draft storage failure
    StorageError,
    /// Internal error
    InternalError,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::NotLoaded => write!(f, "NOT_LOADED"),
            ErrorCode::TransactionNotFound => write!(f, "TRANSACTION_NOT_FOUND"),
            ErrorCode::FetchFailed => write!(f, "FETCH_FAILED"),
            ErrorCode::ValidationError => write!(f, "VALIDATION_ERROR"),
            ErrorCode::StorageError => write!(f, "STORAGE_ERROR"),
            ErrorCode::InternalError => write!(f, "INTERNAL_ERROR"),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    /// Informational
    Info,
    /// Warning - operation may be affected
    Warning,
    /// Error - operation failed
    Error,
    /// Critical - application may be unstable
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "info"),
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
            ErrorSeverity::Critical => write!(f, "critical"),
        }
    }
}

/// Detailed error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// Suggestions for resolution
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    /// Create a new error detail
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            details: None,
            suggestions: vec![],
        }
    }

    /// Add detail information
    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.details = Some(detail);
        self
    }

    /// Add a suggestion
    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, "\nDetails: {}", details)?;
        }
        if !self.suggestions.is_empty() {
            write!(f, "\nSuggestions:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n  - {}", suggestion)?;
            }
        }
        Ok(())
    }
}

/// Main error type for txweb-core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Transaction set not loaded")]
    NotLoaded,

    #[error("Transaction not found: {id}")]
    TransactionNotFound { id: String },

    #[error("Failed to reach the transactions API: {message}")]
    FetchFailed { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Draft storage error: {message}")]
    StorageError { message: String },

    #[error("Internal error: {message}")]
    InternalError { message: String },
}

impl CoreError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::NotLoaded => ErrorCode::NotLoaded,
            CoreError::TransactionNotFound { .. } => ErrorCode::TransactionNotFound,
            CoreError::FetchFailed { .. } => ErrorCode::FetchFailed,
            CoreError::ValidationError { .. } => ErrorCode::ValidationError,
            CoreError::StorageError { .. } => ErrorCode::StorageError,
            CoreError::InternalError { .. } => ErrorCode::InternalError,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::NotLoaded => ErrorSeverity::Warning,
            CoreError::TransactionNotFound { .. } => ErrorSeverity::Info,
            CoreError::FetchFailed { .. } => ErrorSeverity::Error,
            CoreError::ValidationError { .. } => ErrorSeverity::Warning,
            CoreError::StorageError { .. } => ErrorSeverity::Error,
            CoreError::InternalError { .. } => ErrorSeverity::Critical,
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let mut details = ErrorDetails::new(self.code(), self.to_string());

        match self {
            CoreError::NotLoaded => {
                details = details
                    .with_suggestion("Reload the transaction list before filtering.".to_string());
            }
            CoreError::TransactionNotFound { .. } => {
                details =
                    details.with_suggestion("Check if the transaction ID is correct.".to_string());
                details = details.with_suggestion(
                    "Use the /api/transactions endpoint to list known transactions.".to_string(),
                );
            }
            CoreError::FetchFailed { message } => {
                details = details.with_detail(serde_json::json!({ "api_message": message }));
                details = details.with_suggestion(
                    "Check that the transactions API is reachable and retry.".to_string(),
                );
            }
            CoreError::ValidationError { message } => {
                details =
                    details.with_detail(serde_json::json!({ "validation_message": message }));
                details = details
                    .with_suggestion("Correct the highlighted fields and resubmit.".to_string());
            }
            CoreError::StorageError { .. } => {
                details = details.with_suggestion(
                    "Check that the draft directory exists and is writable.".to_string(),
                );
            }
            _ => {}
        }

        details
    }
}

impl From<ClientError> for CoreError {
    fn from(error: ClientError) -> Self {
        match error {
            ClientError::NotFound { id } => CoreError::TransactionNotFound { id },
            other => CoreError::FetchFailed {
                message: other.to_string(),
            },
        }
    }
}

impl From<std::io::Error> for CoreError {
    fn from(error: std::io::Error) -> Self {
        CoreError::StorageError {
            message: error.to_string(),
        }
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::NotLoaded.to_string(), "NOT_LOADED");
        assert_eq!(
            ErrorCode::TransactionNotFound.to_string(),
            "TRANSACTION_NOT_FOUND"
        );
        assert_eq!(ErrorCode::FetchFailed.to_string(), "FETCH_FAILED");
    }

    #[test]
    fn test_core_error_code_and_severity() {
        let error = CoreError::TransactionNotFound {
            id: "tx-1".to_string(),
        };
        assert_eq!(error.code(), ErrorCode::TransactionNotFound);
        assert_eq!(error.severity(), ErrorSeverity::Info);

        let error = CoreError::FetchFailed {
            message: "connection refused".to_string(),
        };
        assert_eq!(error.severity(), ErrorSeverity::Error);
    }

    #[test]
    fn test_client_not_found_maps_to_transaction_not_found() {
        let error: CoreError = ClientError::NotFound {
            id: "tx-9".to_string(),
        }
        .into();
        assert_eq!(error.code(), ErrorCode::TransactionNotFound);
        assert!(error.to_string().contains("tx-9"));
    }

    #[test]
    fn test_client_status_maps_to_fetch_failed() {
        let error: CoreError = ClientError::Status {
            status: 502,
            message: "bad gateway".to_string(),
        }
        .into();
        assert_eq!(error.code(), ErrorCode::FetchFailed);
    }

    #[test]
    fn test_details_carry_suggestions() {
        let error = CoreError::FetchFailed {
            message: "timed out".to_string(),
        };
        let details = error.to_details();
        assert_eq!(details.code, ErrorCode::FetchFailed);
        assert!(details.details.is_some());
        assert!(!details.suggestions.is_empty());
    }
}
