//! Wire types for the remote transactions API
//!
//! The remote API speaks camelCase JSON and wraps list/detail payloads in a
//! `{ "data": ... }` envelope. These types mirror that shape exactly; the
//! view model lives in txweb-core.

use serde::{Deserialize, Serialize};

/// A transaction record as returned by the remote API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    /// Unique identifier
    pub id: String,
    /// Sender account identifier (0x + 40 hex chars)
    pub from_address: String,
    /// Recipient account identifier (0x + 40 hex chars)
    pub to_address: String,
    /// Transfer amount as a decimal string
    pub amount: String,
    /// Gas limit as a decimal string
    pub gas_limit: String,
    /// Gas price as a decimal string
    pub gas_price: String,
    /// Lifecycle status: pending, confirmed or failed
    pub status: String,
    /// ISO-8601 creation timestamp
    pub timestamp: String,
    /// Optional display hash; absent for records not yet broadcast
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
}

/// Envelope wrapping read responses
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    pub data: T,
}

/// Payload for creating a transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionRequest {
    pub to_address: String,
    pub amount: String,
    pub gas_limit: String,
    pub gas_price: String,
}

/// Response body of a successful create call
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTransactionResponse {
    #[serde(rename = "_id")]
    pub id: String,
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_deserializes_camel_case() {
        let json = r#"{
            "id": "tx-1",
            "fromAddress": "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa",
            "toAddress": "0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb",
            "amount": "1.5",
            "gasLimit": "21000",
            "gasPrice": "0.00000002",
            "status": "confirmed",
            "timestamp": "2024-01-15T10:00:00Z",
            "hash": "0xdeadbeef"
        }"#;
        let record: TransactionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, "tx-1");
        assert_eq!(record.gas_limit, "21000");
        assert_eq!(record.hash.as_deref(), Some("0xdeadbeef"));
    }

    #[test]
    fn test_record_hash_is_optional() {
        let json = r#"{
            "id": "tx-2",
            "fromAddress": "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa",
            "toAddress": "0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb",
            "amount": "0.25",
            "gasLimit": "21000",
            "gasPrice": "0.00000002",
            "status": "pending",
            "timestamp": "2024-01-15T10:00:00Z"
        }"#;
        let record: TransactionRecord = serde_json::from_str(json).unwrap();
        assert!(record.hash.is_none());
    }

    #[test]
    fn test_envelope_unwraps_list() {
        let json = r#"{"data": []}"#;
        let envelope: ApiEnvelope<Vec<TransactionRecord>> = serde_json::from_str(json).unwrap();
        assert!(envelope.data.is_empty());
    }

    #[test]
    fn test_create_request_serializes_camel_case() {
        let request = CreateTransactionRequest {
            to_address: "0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb".to_string(),
            amount: "1.0".to_string(),
            gas_limit: "21000".to_string(),
            gas_price: "0.00000002".to_string(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("toAddress").is_some());
        assert!(json.get("gasLimit").is_some());
        assert!(json.get("to_address").is_none());
    }

    #[test]
    fn test_create_response_reads_underscore_id() {
        let json = r#"{"_id": "tx-99"}"#;
        let response: CreateTransactionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.id, "tx-99");
    }
}
