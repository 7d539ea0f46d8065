//! Core data models for the transaction view

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::types::TransactionStatus;
use txweb_client::TransactionRecord;

/// Transaction information as presented by the UI
///
/// Records are owned by the remote API and immutable here; numeric and
/// timestamp fields stay strings so malformed upstream data survives the
/// round trip and the pipeline decides how to order it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique transaction identifier
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
    /// Lifecycle status
    pub status: TransactionStatus,
    /// ISO-8601 creation timestamp
    pub timestamp: String,
    /// Optional display hash
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
}

impl Transaction {
    /// Display identifier: the hash when present, the id otherwise
    pub fn display_hash(&self) -> &str {
        self.hash.as_deref().unwrap_or(&self.id)
    }

    /// Parsed amount; `None` when the field is not a finite decimal
    pub fn amount_value(&self) -> Option<f64> {
        self.amount
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
    }

    /// Parsed timestamp; `None` when the field is not valid ISO-8601
    pub fn timestamp_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.timestamp)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Whether any searchable field contains the (lowercased) needle
    pub fn matches_search(&self, needle_lower: &str) -> bool {
        self.id.to_lowercase().contains(needle_lower)
            || self.from_address.to_lowercase().contains(needle_lower)
            || self.to_address.to_lowercase().contains(needle_lower)
            || self
                .hash
                .as_deref()
                .map(|h| h.to_lowercase().contains(needle_lower))
                .unwrap_or(false)
    }
}

impl From<TransactionRecord> for Transaction {
    fn from(record: TransactionRecord) -> Self {
        Self {
            id: record.id,
            from_address: record.from_address,
            to_address: record.to_address,
            amount: record.amount,
            gas_limit: record.gas_limit,
            gas_price: record.gas_price,
            // An unknown status string from the API is treated as pending,
            // the only state every record passes through.
            status: record.status.parse().unwrap_or_default(),
            timestamp: record.timestamp,
            hash: record.hash,
        }
    }
}

/// In-progress create-form values, persisted between visits
///
/// Field names match the wire payload so the draft file is a byte-for-byte
/// preview of what a submission would send.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDraft {
    #[serde(default)]
    pub to_address: String,
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub gas_limit: String,
    #[serde(default)]
    pub gas_price: String,
}

impl TransactionDraft {
    /// Whether every field is empty
    pub fn is_empty(&self) -> bool {
        self.to_address.is_empty()
            && self.amount.is_empty()
            && self.gas_limit.is_empty()
            && self.gas_price.is_empty()
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> TransactionRecord {
        TransactionRecord {
            id: "tx-1".to_string(),
            from_address: "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa".to_string(),
            to_address: "0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb".to_string(),
            amount: "1.5".to_string(),
            gas_limit: "21000".to_string(),
            gas_price: "0.00000002".to_string(),
            status: "confirmed".to_string(),
            timestamp: "2024-01-15T10:00:00Z".to_string(),
            hash: None,
        }
    }

    #[test]
    fn test_display_hash_falls_back_to_id() {
        let mut tx = Transaction::from(record());
        assert_eq!(tx.display_hash(), "tx-1");

        tx.hash = Some("0xdeadbeef".to_string());
        assert_eq!(tx.display_hash(), "0xdeadbeef");
    }

    #[test]
    fn test_amount_value_rejects_malformed() {
        let mut tx = Transaction::from(record());
        assert_eq!(tx.amount_value(), Some(1.5));

        tx.amount = "garbage".to_string();
        assert_eq!(tx.amount_value(), None);

        tx.amount = "inf".to_string();
        assert_eq!(tx.amount_value(), None);
    }

    #[test]
    fn test_timestamp_parsing() {
        let mut tx = Transaction::from(record());
        assert!(tx.timestamp_utc().is_some());

        tx.timestamp = "yesterday".to_string();
        assert!(tx.timestamp_utc().is_none());
    }

    #[test]
    fn test_unknown_status_becomes_pending() {
        let mut raw = record();
        raw.status = "weird".to_string();
        let tx = Transaction::from(raw);
        assert_eq!(tx.status, TransactionStatus::Pending);
    }

    #[test]
    fn test_matches_search_ignores_missing_hash() {
        let tx = Transaction::from(record());
        assert!(tx.matches_search("tx-1"));
        assert!(!tx.matches_search("deadbeef"));
    }

    #[test]
    fn test_draft_round_trip_uses_camel_case() {
        let draft = TransactionDraft {
            to_address: "0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb".to_string(),
            amount: "1.0".to_string(),
            gas_limit: String::new(),
            gas_price: String::new(),
        };
        let json = serde_json::to_value(&draft).unwrap();
        assert!(json.get("toAddress").is_some());
        let back: TransactionDraft = serde_json::from_value(json).unwrap();
        assert_eq!(back, draft);
    }
}
