//! Create-form validation
//!
//! Field-level checks mirroring what the remote API will accept: a
//! well-formed recipient address, a positive amount, and optional gas
//! overrides that must be positive when present. Failures come back as a
//! list of per-field messages so the form can render them inline.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::models::TransactionDraft;

/// 0x-prefixed, exactly 40 hex characters
static ADDRESS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^0x[a-fA-F0-9]{40}$").expect("address regex"));

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Form field name (camelCase, matching the input names)
    pub field: String,
    /// Message shown inline under the field
    pub message: String,
}

impl FieldError {
    fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

/// Whether a string is a well-formed account address
pub fn is_valid_address(address: &str) -> bool {
    ADDRESS_RE.is_match(address)
}

/// Validate the create form; an empty result means submittable
pub fn validate_draft(draft: &TransactionDraft) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if draft.to_address.is_empty() {
        errors.push(FieldError::new("toAddress", "Address is required"));
    } else if !is_valid_address(&draft.to_address) {
        errors.push(FieldError::new("toAddress", "Invalid account address format"));
    }

    if draft.amount.is_empty() {
        errors.push(FieldError::new("amount", "Amount is required"));
    } else if !is_positive_decimal(&draft.amount) {
        errors.push(FieldError::new("amount", "Amount must be a positive number"));
    }

    if !draft.gas_limit.is_empty() && !is_positive_decimal(&draft.gas_limit) {
        errors.push(FieldError::new(
            "gasLimit",
            "Gas limit must be a positive number",
        ));
    }

    if !draft.gas_price.is_empty() && !is_positive_decimal(&draft.gas_price) {
        errors.push(FieldError::new(
            "gasPrice",
            "Gas price must be a positive number",
        ));
    }

    errors
}

fn is_positive_decimal(value: &str) -> bool {
    value
        .trim()
        .parse::<f64>()
        .map(|v| v.is_finite() && v > 0.0)
        .unwrap_or(false)
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> TransactionDraft {
        TransactionDraft {
            to_address: "0xABCDEF0123456789ABCDEF0123456789ABCDEF01".to_string(),
            amount: "1.5".to_string(),
            gas_limit: String::new(),
            gas_price: String::new(),
        }
    }

    #[test]
    fn test_valid_draft_passes() {
        assert!(validate_draft(&draft()).is_empty());
    }

    #[test]
    fn test_address_acceptance() {
        assert!(is_valid_address("0xABCDEF0123456789ABCDEF0123456789ABCDEF01"));
        assert!(is_valid_address("0xabcdef0123456789abcdef0123456789abcdef01"));
        assert!(!is_valid_address("0x123"));
        assert!(!is_valid_address("ABCDEF0123456789ABCDEF0123456789ABCDEF01"));
        assert!(!is_valid_address("0xZZCDEF0123456789ABCDEF0123456789ABCDEF01"));
        assert!(!is_valid_address("0xABCDEF0123456789ABCDEF0123456789ABCDEF012"));
    }

    #[test]
    fn test_missing_fields_are_reported() {
        let empty = TransactionDraft::default();
        let errors = validate_draft(&empty);
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["toAddress", "amount"]);
    }

    #[test]
    fn test_non_positive_amount_rejected() {
        let mut d = draft();
        d.amount = "0".to_string();
        assert_eq!(validate_draft(&d)[0].field, "amount");

        d.amount = "-1.5".to_string();
        assert_eq!(validate_draft(&d)[0].field, "amount");

        d.amount = "lots".to_string();
        assert_eq!(validate_draft(&d)[0].field, "amount");
    }

    #[test]
    fn test_optional_gas_fields() {
        let mut d = draft();
        d.gas_limit = "21000".to_string();
        d.gas_price = "0.00000002".to_string();
        assert!(validate_draft(&d).is_empty());

        d.gas_limit = "-21000".to_string();
        let errors = validate_draft(&d);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "gasLimit");
    }
}
