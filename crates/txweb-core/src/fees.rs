//! Fee calculation
//!
//! `fee = gas_limit × gas_price`, computed in decimal arithmetic and
//! rendered to 8 decimal places. Used by the create-form preview, the
//! detail view and every CSV row.

use rust_decimal::Decimal;

/// Gas limit assumed when the field is left empty (simple transfer)
pub const DEFAULT_GAS_LIMIT: &str = "21000";
/// Gas price assumed when the field is left empty
pub const DEFAULT_GAS_PRICE: &str = "0.00000002";

/// The rendered fee for unusable input
const ZERO_FEE: &str = "0.00000000";

/// Compute and format the transaction fee.
///
/// Empty fields fall back to the given baselines; input that still fails to
/// parse as a decimal yields `"0.00000000"` rather than an error, so a
/// half-typed form keeps a live preview.
pub fn transaction_fee(
    gas_limit: &str,
    gas_price: &str,
    default_limit: &str,
    default_price: &str,
) -> String {
    let limit = parse_or_default(gas_limit, default_limit);
    let price = parse_or_default(gas_price, default_price);

    match (limit, price) {
        (Some(limit), Some(price)) => match limit.checked_mul(price) {
            Some(fee) => format!("{:.8}", fee),
            None => ZERO_FEE.to_string(),
        },
        _ => ZERO_FEE.to_string(),
    }
}

/// Compute the fee with the built-in baselines
pub fn default_transaction_fee(gas_limit: &str, gas_price: &str) -> String {
    transaction_fee(gas_limit, gas_price, DEFAULT_GAS_LIMIT, DEFAULT_GAS_PRICE)
}

fn parse_or_default(value: &str, fallback: &str) -> Option<Decimal> {
    let raw = if value.trim().is_empty() {
        fallback
    } else {
        value
    };
    raw.trim().parse::<Decimal>().ok()
}

// ==================== Tests ====================
