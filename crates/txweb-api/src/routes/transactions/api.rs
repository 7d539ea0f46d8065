//! Transactions API endpoints - JSON API and HTMX partial responses
//!
//! Endpoints:
//! - api_transactions: Derived transactions page (JSON)
//! - api_transaction_detail: Single transaction via the remote API (JSON)
//! - api_draft_get / api_draft_save / api_draft_clear: Form draft autosave
//! - htmx_transactions_list: Transaction table (HTML fragment)
//! - htmx_fee_preview: Live fee preview for the create form
//! - htmx_transaction_store: Create form submission (HTMX)
//! - transactions_export: CSV download of the filtered list

use axum::extract::{Form, Path, Query, State};
use axum::http::header;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use chrono::NaiveDate;
use std::collections::HashMap;

use crate::error::ApiError;
use crate::AppState;
use txweb_core::{
    export, validate_draft, DerivedPage, LoadState, SortState, Transaction, TransactionDraft,
};

/// Apply incoming view parameters to the session.
///
/// Page first, then filters and sort: a filter or sort change resets the
/// page inside the session, so a stale `page` parameter riding along with a
/// new filter value loses, which is exactly the contract the list page
/// expects.
pub(crate) fn apply_view_params(state: &AppState, params: &HashMap<String, String>) {
    let session = &state.session;

    if let Some(page) = params.get("page").and_then(|s| s.parse().ok()) {
        session.set_page(page);
    }
    // The search box applies the debounce quiet period before the request
    // fires, so the arriving value is settled and committed immediately.
    if let Some(q) = params.get("q") {
        session.set_search(q);
    }
    if let Some(status) = params.get("status").and_then(|s| s.parse().ok()) {
        session.set_status_filter(status);
    }
    if let Some(raw) = params.get("from") {
        session.set_date_from(parse_date(raw));
    }
    if let Some(raw) = params.get("to") {
        session.set_date_to(parse_date(raw));
    }
    if let (Some(field), Some(order)) = (
        params.get("sort").and_then(|s| s.parse().ok()),
        params.get("order").and_then(|s| s.parse().ok()),
    ) {
        session.set_sort(SortState { field, order });
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    if raw.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Make sure a snapshot exists before deriving
async fn ensure_loaded(state: &AppState) -> Result<(), ApiError> {
    if state.session.load_state() == LoadState::NotLoaded {
        state.session.load().await.map_err(ApiError::from)?;
    }
    Ok(())
}

/// Get the derived transactions page (JSON API)
pub async fn api_transactions(
    state: State<AppState>,
    params: Query<HashMap<String, String>>,
) -> Result<Json<DerivedPage>, ApiError> {
    ensure_loaded(&state).await?;
    apply_view_params(&state, &params);
    Ok(Json(state.session.derive()))
}

/// Get single transaction detail (JSON API)
pub async fn api_transaction_detail(
    state: State<AppState>,
    path: Path<String>,
) -> Result<Json<Transaction>, ApiError> {
    let transaction = state.session.fetch_transaction(&path.0).await?;
    Ok(Json(transaction))
}

/// Get the saved form draft (JSON API)
pub async fn api_draft_get(state: State<AppState>) -> Result<Json<TransactionDraft>, ApiError> {
    let draft = state.session.load_draft()?.unwrap_or_default();
    Ok(Json(draft))
}

/// Autosave the form draft, overwriting the previous entry
pub async fn api_draft_save(
    state: State<AppState>,
    form: Form<TransactionDraft>,
) -> Result<&'static str, ApiError> {
    state.session.save_draft(&form.0)?;
    Ok("")
}

/// Drop the saved form draft
pub async fn api_draft_clear(state: State<AppState>) -> Result<&'static str, ApiError> {
    state.session.clear_draft()?;
    Ok("")
}

/// HTMX: transaction table - partial page update
///
/// Every request carries the full filter form via hx-include, so the
/// session view state converges on whatever the controls show.
pub async fn htmx_transactions_list(
    state: State<AppState>,
    params: Query<HashMap<String, String>>,
) -> Html<String> {
    match state.session.load_state() {
        LoadState::NotLoaded => {
            if let Err(e) = state.session.load().await {
                return Html(super::page::render_load_error(&e.to_string()));
            }
        }
        LoadState::Failed(message) => {
            return Html(super::page::render_load_error(&message));
        }
        LoadState::Loaded => {}
    }

    apply_view_params(&state, &params);
    let derived = state.session.derive();
    let view = state.session.view();
    Html(super::page::render_transaction_table(&derived, &view))
}

/// HTMX: live fee preview for the create form
pub async fn htmx_fee_preview(
    state: State<AppState>,
    params: Query<HashMap<String, String>>,
) -> Html<String> {
    let gas_limit = params.get("gasLimit").map(String::as_str).unwrap_or("");
    let gas_price = params.get("gasPrice").map(String::as_str).unwrap_or("");
    let fee = state.session.fee_preview(gas_limit, gas_price);
    Html(format!("{} ETH", fee))
}

/// HTMX: create form submission
///
/// Validation failures re-render the form with inline messages; an API
/// failure keeps the filled form and shows a banner, so every outcome
/// leaves the page re-enterable.
pub async fn htmx_transaction_store(
    state: State<AppState>,
    form: Form<TransactionDraft>,
) -> Html<String> {
    let draft = form.0;

    let errors = validate_draft(&draft);
    if !errors.is_empty() {
        return Html(super::page::render_create_form(&state, &draft, &errors, None));
    }

    match state.session.create(&draft).await {
        Ok(id) => {
            log::info!(target: "txweb::api", "Transaction created: {}", id);
            Html(super::page::render_create_success(&id))
        }
        Err(e) => {
            log::warn!(target: "txweb::api", "Transaction create failed: {}", e);
            Html(super::page::render_create_form(
                &state,
                &draft,
                &[],
                Some(&e.to_string()),
            ))
        }
    }
}

/// CSV download of the currently filtered and sorted list
pub async fn transactions_export(
    state: State<AppState>,
    params: Query<HashMap<String, String>>,
) -> Result<Response, ApiError> {
    ensure_loaded(&state).await?;
    apply_view_params(&state, &params);
    let csv = state.session.export_csv();

    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", export::export_file_name()),
        ),
    ];
    Ok((headers, csv).into_response())
}
