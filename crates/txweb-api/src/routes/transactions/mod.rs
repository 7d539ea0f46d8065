//! Transaction routes - list, search, pagination, detail, create, export
//!
//! Features:
//! - List transactions with debounced search, filters and pagination
//! - Sortable columns (date, amount, status)
//! - CSV export of the filtered list
//! - Create form with validation, live fee preview and draft autosave
//! - HTMX partial page updates
//!
//! Structure:
//! - api.rs: JSON API and HTMX endpoints
//! - page.rs: Full page rendering

pub mod api;
pub mod page;

pub use api::{
    api_draft_clear,
    api_draft_get,
    api_draft_save,
    api_transaction_detail,
    api_transactions,
    htmx_fee_preview,
    htmx_transaction_store,
    htmx_transactions_list,
    transactions_export,
};

pub use page::{page_transaction_create, page_transaction_detail, page_transactions};
