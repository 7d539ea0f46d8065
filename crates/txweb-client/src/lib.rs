//! HTTP client for the remote transactions API
//!
//! The remote service owns the transaction records; this crate is the only
//! place that talks to it. Everything above works against the
//! [`TransactionsApi`] trait so the session and the web layer can be tested
//! with an in-memory implementation.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

pub mod error;
pub mod types;

pub use error::ClientError;
pub use types::{
    ApiEnvelope, CreateTransactionRequest, CreateTransactionResponse, TransactionRecord,
};

// ==================== API Trait ====================

/// API reference type
pub type ApiRef = Arc<dyn TransactionsApi>;

/// Trait for the remote transactions API
#[async_trait]
pub trait TransactionsApi: Send + Sync {
    /// Fetch the full ordered transaction set
    async fn get_all(&self) -> Result<Vec<TransactionRecord>, ClientError>;

    /// Fetch a single transaction by identifier
    async fn get_by_id(&self, id: &str) -> Result<TransactionRecord, ClientError>;

    /// Create a transaction; returns the identifier assigned by the API
    async fn create(&self, input: &CreateTransactionRequest) -> Result<String, ClientError>;
}

// ==================== HTTP Implementation ====================

/// Default implementation backed by reqwest
pub struct HttpTransactionsApi {
    http_client: reqwest::Client,
    base_url: String,
}

impl HttpTransactionsApi {
    /// Create a new client against the given base URL (e.g. `http://host:3001/api`)
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;
        let base_url: String = base_url.into();
        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Pull a human-readable message out of an error body.
    /// The API reports failures as `{"message": "..."}`; anything else is
    /// passed through raw.
    fn error_message(body: &str) -> String {
        serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| {
                v.get("message")
                    .and_then(|m| m.as_str())
                    .map(|s| s.to_string())
            })
            .unwrap_or_else(|| body.to_string())
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        log::warn!(
            target: "txweb::client",
            "API request failed: status={} body={}",
            status.as_u16(),
            body
        );
        Err(ClientError::Status {
            status: status.as_u16(),
            message: Self::error_message(&body),
        })
    }
}

#[async_trait]
impl TransactionsApi for HttpTransactionsApi {
    async fn get_all(&self) -> Result<Vec<TransactionRecord>, ClientError> {
        let response = self
            .http_client
            .get(self.url("/transactions"))
            .send()
            .await?;
        let response = Self::check_status(response).await?;
        let envelope: ApiEnvelope<Vec<TransactionRecord>> =
            response.json().await.map_err(|e| ClientError::Decode {
                message: e.to_string(),
            })?;
        log::debug!(
            target: "txweb::client",
            "Fetched {} transactions",
            envelope.data.len()
        );
        Ok(envelope.data)
    }

    async fn get_by_id(&self, id: &str) -> Result<TransactionRecord, ClientError> {
        let response = self
            .http_client
            .get(self.url(&format!("/transactions/{}", id)))
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound { id: id.to_string() });
        }

        let response = Self::check_status(response).await?;
        let envelope: ApiEnvelope<TransactionRecord> =
            response.json().await.map_err(|e| ClientError::Decode {
                message: e.to_string(),
            })?;
        Ok(envelope.data)
    }

    async fn create(&self, input: &CreateTransactionRequest) -> Result<String, ClientError> {
        let response = self
            .http_client
            .post(self.url("/transactions"))
            .json(input)
            .send()
            .await?;
        let response = Self::check_status(response).await?;
        let created: CreateTransactionResponse =
            response.json().await.map_err(|e| ClientError::Decode {
                message: e.to_string(),
            })?;
        log::info!(target: "txweb::client", "Created transaction {}", created.id);
        Ok(created.id)
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_double_slash() {
        let api =
            HttpTransactionsApi::new("http://localhost:3001/api/", Duration::from_secs(5)).unwrap();
        assert_eq!(
            api.url("/transactions"),
            "http://localhost:3001/api/transactions"
        );
    }

    #[test]
    fn test_error_message_extracts_json_message() {
        let body = r#"{"message": "insufficient funds"}"#;
        assert_eq!(
            HttpTransactionsApi::error_message(body),
            "insufficient funds"
        );
    }

    #[test]
    fn test_error_message_passes_through_plain_body() {
        assert_eq!(
            HttpTransactionsApi::error_message("bad gateway"),
            "bad gateway"
        );
    }

    #[test]
    fn test_not_found_predicate() {
        let err = ClientError::NotFound {
            id: "tx-1".to_string(),
        };
        assert!(err.is_not_found());

        let err = ClientError::Status {
            status: 500,
            message: "boom".to_string(),
        };
        assert!(!err.is_not_found());
    }
}
