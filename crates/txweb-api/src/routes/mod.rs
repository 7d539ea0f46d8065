//! Route modules
//!
//! - routes::transactions: Transaction list, detail, create, CSV export
//!
//! Structure per module:
//! - api.rs: JSON API and HTMX endpoints
//! - page.rs: Full page rendering

pub mod transactions;
