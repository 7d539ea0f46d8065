//! CSV export
//!
//! Serializes the filtered and sorted list (never the paginated slice) with
//! a fixed column order. String columns are wrapped in double quotes;
//! numeric columns and the computed fee are written bare. No escaping
//! beyond the quoting.

use super::fees;
use super::models::Transaction;

/// Fixed header row
pub const CSV_HEADER: &str = "Hash,From,To,Amount,GasLimit,GasPrice,Fee,Status,Timestamp";

/// Render the transaction list as a CSV document
pub fn to_csv(transactions: &[Transaction], default_gas_limit: &str, default_gas_price: &str) -> String {
    let mut out = String::with_capacity(64 * (transactions.len() + 1));
    out.push_str(CSV_HEADER);
    out.push('\n');

    for tx in transactions {
        let fee = fees::transaction_fee(
            &tx.gas_limit,
            &tx.gas_price,
            default_gas_limit,
            default_gas_price,
        );
        out.push_str(&format!(
            "\"{}\",\"{}\",\"{}\",{},{},{},{},\"{}\",\"{}\"\n",
            tx.display_hash(),
            tx.from_address,
            tx.to_address,
            tx.amount,
            tx.gas_limit,
            tx.gas_price,
            fee,
            tx.status,
            tx.timestamp,
        ));
    }

    out
}

/// File name offered for the download
pub fn export_file_name() -> &'static str {
    "transactions.csv"
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TransactionStatus;

    fn tx() -> Transaction {
        Transaction {
            id: "tx-1".to_string(),
            from_address: "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa".to_string(),
            to_address: "0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb".to_string(),
            amount: "1.5".to_string(),
            gas_limit: "21000".to_string(),
            gas_price: "0.00000002".to_string(),
            status: TransactionStatus::Confirmed,
            timestamp: "2024-01-15T10:00:00Z".to_string(),
            hash: Some("0xdeadbeef".to_string()),
        }
    }

    #[test]
    fn test_header_and_row_shape() {
        let csv = to_csv(&[tx()], "21000", "0.00000002");
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some(CSV_HEADER));
        assert_eq!(
            lines.next(),
            Some(
                "\"0xdeadbeef\",\"0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa\",\"0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb\",1.5,21000,0.00000002,0.00042000,\"confirmed\",\"2024-01-15T10:00:00Z\""
            )
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_hash_column_falls_back_to_id() {
        let mut record = tx();
        record.hash = None;
        let csv = to_csv(&[record], "21000", "0.00000002");
        assert!(csv.lines().nth(1).unwrap().starts_with("\"tx-1\""));
    }

    #[test]
    fn test_empty_list_is_header_only() {
        let csv = to_csv(&[], "21000", "0.00000002");
        assert_eq!(csv, format!("{}\n", CSV_HEADER));
    }

    #[test]
    fn test_row_count_matches_input() {
        let rows = vec![tx(), tx(), tx()];
        let csv = to_csv(&rows, "21000", "0.00000002");
        assert_eq!(csv.lines().count(), 4);
    }
}
