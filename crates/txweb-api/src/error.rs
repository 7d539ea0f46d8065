//! Error types for txweb-api

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use txweb_core::{CoreError, ErrorCode};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error("Upstream API failure: {message}")]
    Upstream { message: String },

    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        match error.code() {
            ErrorCode::TransactionNotFound => ApiError::NotFound {
                resource: error.to_string(),
            },
            ErrorCode::ValidationError => ApiError::BadRequest {
                message: error.to_string(),
            },
            ErrorCode::FetchFailed | ErrorCode::NotLoaded => ApiError::Upstream {
                message: error.to_string(),
            },
            _ => ApiError::Internal,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "error": self.to_string(),
        });
        (self.status(), Json(body)).into_response()
    }
}

// ==================== Tests ====================
