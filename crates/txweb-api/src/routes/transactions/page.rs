//! Transactions page rendering - full pages and HTML fragments
//!
//! Endpoints:
//! - page_transactions: Main transactions list page
//! - page_transaction_create: Create form page
//! - page_transaction_detail: Detail page for a single transaction
//!
//! Helper functions render the table fragment, the create form, and the
//! error / empty states the list can end up in.

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::Html;
use chrono::Utc;

use crate::{page_response, AppState};
use txweb_core::{
    DerivedPage, ErrorCode, FieldError, SortField, SortOrder, Transaction, TransactionDraft,
    TransactionStatus, ViewSnapshot,
};
use txweb_utils::{escape_html, format_amount, format_relative_time, truncate_address};

// ==================== Full Pages ====================

/// Transactions list page
///
/// A page load starts a fresh session view (defaults, page 1) and refetches
/// the transaction set; the table fragment then reports either data or the
/// failure state with a retry affordance.
pub async fn page_transactions(
    state: State<AppState>,
    headers: HeaderMap,
) -> Html<String> {
    state.session.reset_view();
    if let Err(e) = state.session.reload().await {
        log::warn!(target: "txweb::api", "List page load failed: {}", e);
    }

    let inner_content = r#"<div class='flex items-center justify-between mb-6'>
            <div>
                <h2 class='text-2xl font-bold'>Transactions</h2>
                <p class='text-sm text-gray-500'>Manage your transfer records</p>
            </div>
            <a href='/transactions/create' class='px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700'>+ New Transaction</a>
        </div>
        <div class='bg-white rounded-xl shadow-sm p-4 mb-4'>
            <form id='filter-form' class='grid grid-cols-1 md:grid-cols-2 lg:grid-cols-4 gap-4' onsubmit='return false'>
                <div>
                    <label for='search' class='block text-sm text-gray-600 mb-1'>Search</label>
                    <input id='search' name='q' type='text' placeholder='Hash or address...'
                        hx-get='/transactions/list' hx-target='#transactions-content' hx-trigger='keyup changed delay:300ms'
                        hx-include='#filter-form' class='w-full px-3 py-2 border rounded-lg'>
                </div>
                <div>
                    <label for='status' class='block text-sm text-gray-600 mb-1'>Status</label>
                    <select id='status' name='status'
                        hx-get='/transactions/list' hx-target='#transactions-content' hx-trigger='change'
                        hx-include='#filter-form' class='w-full px-3 py-2 border rounded-lg bg-white'>
                        <option value='all'>All</option>
                        <option value='pending'>Pending</option>
                        <option value='confirmed'>Confirmed</option>
                        <option value='failed'>Failed</option>
                    </select>
                </div>
                <div>
                    <label for='from' class='block text-sm text-gray-600 mb-1'>From Date</label>
                    <input id='from' name='from' type='date'
                        hx-get='/transactions/list' hx-target='#transactions-content' hx-trigger='change'
                        hx-include='#filter-form' class='w-full px-3 py-2 border rounded-lg'>
                </div>
                <div>
                    <label for='to' class='block text-sm text-gray-600 mb-1'>To Date</label>
                    <input id='to' name='to' type='date'
                        hx-get='/transactions/list' hx-target='#transactions-content' hx-trigger='change'
                        hx-include='#filter-form' class='w-full px-3 py-2 border rounded-lg'>
                </div>
            </form>
            <div class='flex justify-end gap-2 mt-3'>
                <a href='/transactions/export' class='px-3 py-1.5 text-sm border rounded-lg hover:bg-gray-50'>Export CSV</a>
                <a href='/transactions' class='px-3 py-1.5 text-sm border rounded-lg hover:bg-gray-50'>Clear Filters</a>
            </div>
        </div>
        <div id='transactions-content' hx-get='/transactions/list' hx-trigger='load' class='bg-white rounded-xl shadow-sm p-6'>
            <p class='text-gray-500 text-center py-8'>Loading...</p>
        </div>"#
        .to_string();

    Html(page_response(
        &headers,
        "Transactions",
        "/transactions",
        &inner_content,
    ))
}

/// Transaction create page, pre-filled from the saved draft
pub async fn page_transaction_create(
    state: State<AppState>,
    headers: HeaderMap,
) -> Html<String> {
    let draft = match state.session.load_draft() {
        Ok(draft) => draft.unwrap_or_default(),
        Err(e) => {
            log::warn!(target: "txweb::api", "Draft load failed: {}", e);
            TransactionDraft::default()
        }
    };

    let form = render_create_form(&state, &draft, &[], None);
    let inner_content = format!(
        r#"<div class='max-w-2xl mx-auto'>
            <div class='flex items-center gap-3 mb-6'>
                <a href='/transactions' class='text-gray-400 hover:text-gray-600'>&larr;</a>
                <h2 class='text-2xl font-bold'>New Transaction</h2>
            </div>
            <div id='create-form-container' class='bg-white rounded-xl shadow-sm p-6'>{}</div>
        </div>"#,
        form
    );

    Html(page_response(
        &headers,
        "New Transaction",
        "/transactions/create",
        &inner_content,
    ))
}

/// Transaction detail page, fetched from the remote API per visit
pub async fn page_transaction_detail(
    state: State<AppState>,
    path: Path<String>,
    headers: HeaderMap,
) -> Html<String> {
    let id = path.0;
    let inner_content = match state.session.fetch_transaction(&id).await {
        Ok(tx) => render_detail(&state, &tx),
        Err(e) if e.code() == ErrorCode::TransactionNotFound => render_not_found(&id),
        Err(e) => render_detail_error(&id, &e.to_string()),
    };

    let wrapped = format!(
        r#"<div class='max-w-3xl mx-auto'>
            <div class='flex items-center gap-3 mb-6'>
                <a href='/transactions' class='text-gray-400 hover:text-gray-600'>&larr;</a>
                <h2 class='text-2xl font-bold'>Transaction Details</h2>
            </div>
            {}
        </div>"#,
        inner_content
    );

    Html(page_response(
        &headers,
        "Transaction Details",
        "/transactions",
        &wrapped,
    ))
}

// ==================== Table Fragment ====================

/// The list fragment: table, counts and pagination controls
pub fn render_transaction_table(derived: &DerivedPage, view: &ViewSnapshot) -> String {
    if derived.is_source_empty() {
        return r#"<div class='text-center py-12 text-gray-500'>
            <p class='text-lg font-medium mb-2'>No Transactions Yet</p>
            <p class='text-sm mb-4'>Create your first transaction to get started</p>
            <a href='/transactions/create' class='px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700'>+ New Transaction</a>
        </div>"#
            .to_string();
    }

    if derived.is_filtered_empty() {
        return r#"<div class='text-center py-12 text-gray-500'>
            <p class='text-lg font-medium mb-2'>No Transactions Found</p>
            <p class='text-sm mb-4'>Try adjusting your filters</p>
            <a href='/transactions' class='px-4 py-2 border rounded-lg hover:bg-gray-50'>Clear Filters</a>
        </div>"#
            .to_string();
    }

    let mut rows = String::new();
    for tx in &derived.items {
        let timestamp = tx
            .timestamp_utc()
            .map(|ts| format_relative_time(&ts, &Utc::now()))
            .unwrap_or_else(|| tx.timestamp.clone());

        rows.push_str(&format!(
            r#"<tr class='border-b hover:bg-gray-50 cursor-pointer' onclick="window.location='/transactions/{id}'">
                <td class='px-3 py-3 font-mono text-sm'>
                    {hash}
                    <button onclick="event.stopPropagation(); copyText('{full_hash}')" class='ml-1 text-gray-400 hover:text-gray-600' title='Copy'>&#x2398;</button>
                </td>
                <td class='px-3 py-3 font-mono text-sm'>{from}</td>
                <td class='px-3 py-3 font-mono text-sm'>{to}</td>
                <td class='px-3 py-3 text-right'>{amount}</td>
                <td class='px-3 py-3'>{badge}</td>
                <td class='px-3 py-3 text-sm text-gray-500'>{timestamp}</td>
            </tr>"#,
            id = urlencoding::encode(&tx.id),
            hash = escape_html(&truncate_address(tx.display_hash())),
            full_hash = escape_html(tx.display_hash()),
            from = escape_html(&truncate_address(&tx.from_address)),
            to = escape_html(&truncate_address(&tx.to_address)),
            amount = escape_html(&format_amount(&tx.amount)),
            badge = status_badge(tx.status),
            timestamp = escape_html(&timestamp),
        ));
    }

    format!(
        r#"<p class='text-sm text-gray-500 mb-3'>Showing {first}-{last} of {total} transactions</p>
        <div class='overflow-x-auto'>
        <table class='w-full text-left'>
            <thead>
                <tr class='border-b text-sm text-gray-600'>
                    <th class='px-3 py-2'>Hash</th>
                    <th class='px-3 py-2'>From</th>
                    <th class='px-3 py-2'>To</th>
                    <th class='px-3 py-2 text-right'>{amount_sort}</th>
                    <th class='px-3 py-2'>{status_sort}</th>
                    <th class='px-3 py-2'>{date_sort}</th>
                </tr>
            </thead>
            <tbody>{rows}</tbody>
        </table>
        </div>
        {pagination}"#,
        first = derived.first_index(),
        last = derived.last_index(),
        total = derived.total_count,
        amount_sort = sort_link(view, SortField::Amount, "Amount"),
        status_sort = sort_link(view, SortField::Status, "Status"),
        date_sort = sort_link(view, SortField::Date, "Date"),
        rows = rows,
        pagination = render_pagination(derived),
    )
}

/// Column-header button carrying the next sort state for that column
fn sort_link(view: &ViewSnapshot, field: SortField, label: &str) -> String {
    let next = view.sort.toggled(field);
    let icon = if view.sort.field == field {
        match view.sort.order {
            SortOrder::Asc => "&#8593;",
            SortOrder::Desc => "&#8595;",
        }
    } else {
        "&#8597;"
    };
    format!(
        r#"<button hx-get='/transactions/list?sort={}&order={}' hx-include='#filter-form' hx-target='#transactions-content' class='flex items-center gap-1 hover:text-gray-900'>{} {}</button>"#,
        next.field, next.order, label, icon
    )
}

/// Previous / numbered / next controls, windowed around the current page
fn render_pagination(derived: &DerivedPage) -> String {
    if derived.total_pages <= 1 {
        return String::new();
    }

    let current = derived.current_page;
    let total = derived.total_pages;

    let mut numbers = String::new();
    let mut last_rendered = 0;
    for page in 1..=total {
        let in_window = page == 1 || page == total || page.abs_diff(current) <= 1;
        if !in_window {
            continue;
        }
        if last_rendered != 0 && page > last_rendered + 1 {
            numbers.push_str("<span class='px-1 text-gray-400'>...</span>");
        }
        let style = if page == current {
            "bg-indigo-600 text-white"
        } else {
            "border hover:bg-gray-100"
        };
        numbers.push_str(&format!(
            r#"<button hx-get='/transactions/list?page={page}' hx-include='#filter-form' hx-target='#transactions-content' class='px-3 py-1 rounded {style}'>{page}</button>"#,
        ));
        last_rendered = page;
    }

    let prev_disabled = if current == 1 { "disabled" } else { "" };
    let next_disabled = if current >= total { "disabled" } else { "" };

    format!(
        r#"<div class='mt-4 flex items-center justify-between'>
            <button {prev_disabled} hx-get='/transactions/list?page={prev}' hx-include='#filter-form' hx-target='#transactions-content' class='px-3 py-1 border rounded hover:bg-gray-100 disabled:opacity-50'>Previous</button>
            <div class='flex items-center gap-2'>{numbers}</div>
            <button {next_disabled} hx-get='/transactions/list?page={next}' hx-include='#filter-form' hx-target='#transactions-content' class='px-3 py-1 border rounded hover:bg-gray-100 disabled:opacity-50'>Next</button>
        </div>"#,
        prev = current.saturating_sub(1).max(1),
        next = (current + 1).min(total),
    )
}

/// Error state for a failed list fetch, with a retry affordance
pub fn render_load_error(message: &str) -> String {
    format!(
        r#"<div class='text-center py-12'>
            <p class='text-lg font-medium text-red-600 mb-2'>Error Loading Transactions</p>
            <p class='text-sm text-gray-500 mb-4'>{}</p>
            <button hx-post='/api/reload' hx-swap='none' onclick='setTimeout(() => window.location.reload(), 300)'
                class='px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700'>Retry</button>
        </div>"#,
        escape_html(message)
    )
}

// ==================== Create Form ====================

/// The create form, optionally with inline field errors and a failure banner
pub fn render_create_form(
    state: &AppState,
    draft: &TransactionDraft,
    errors: &[FieldError],
    banner: Option<&str>,
) -> String {
    let fee = state
        .session
        .fee_preview(&draft.gas_limit, &draft.gas_price);

    let banner_html = banner
        .map(|message| {
            format!(
                r#"<div class='mb-4 p-3 bg-red-50 border border-red-200 rounded-lg text-sm text-red-700'>Transaction failed: {}. Please try again.</div>"#,
                escape_html(message)
            )
        })
        .unwrap_or_default();

    format!(
        r#"{banner}
        <form hx-post='/transactions' hx-target='#create-form-container' class='space-y-5'>
            <div hx-put='/api/draft' hx-include='closest form' hx-swap='none'
                hx-trigger='change from:#toAddress, change from:#amount, change from:#gasLimit, change from:#gasPrice'>
            <div class='mb-5'>
                <label for='toAddress' class='block text-sm font-medium text-gray-700 mb-1'>To Address *</label>
                <input id='toAddress' name='toAddress' type='text' placeholder='0x...' value='{to_address}'
                    class='w-full px-3 py-2 border rounded-lg {to_class}'>
                {to_error}
            </div>
            <div class='mb-5'>
                <label for='amount' class='block text-sm font-medium text-gray-700 mb-1'>Amount (ETH) *</label>
                <input id='amount' name='amount' type='text' placeholder='0.0' value='{amount}'
                    class='w-full px-3 py-2 border rounded-lg {amount_class}'>
                {amount_error}
            </div>
            <div class='grid grid-cols-2 gap-4'>
                <div>
                    <label for='gasLimit' class='block text-sm font-medium text-gray-700 mb-1'>Gas Limit</label>
                    <input id='gasLimit' name='gasLimit' type='text' placeholder='{default_limit}' value='{gas_limit}'
                        hx-get='/transactions/fee-preview' hx-include='closest form' hx-target='#fee-preview' hx-trigger='keyup changed delay:200ms'
                        class='w-full px-3 py-2 border rounded-lg {limit_class}'>
                    {limit_error}
                </div>
                <div>
                    <label for='gasPrice' class='block text-sm font-medium text-gray-700 mb-1'>Gas Price (ETH)</label>
                    <input id='gasPrice' name='gasPrice' type='text' placeholder='{default_price}' value='{gas_price}'
                        hx-get='/transactions/fee-preview' hx-include='closest form' hx-target='#fee-preview' hx-trigger='keyup changed delay:200ms'
                        class='w-full px-3 py-2 border rounded-lg {price_class}'>
                    {price_error}
                </div>
            </div>
            </div>
            <div class='rounded-lg bg-gray-50 p-4'>
                <div class='flex items-center justify-between'>
                    <span class='text-sm font-medium text-gray-600'>Estimated Transaction Fee:</span>
                    <span id='fee-preview' class='text-lg font-bold'>{fee} ETH</span>
                </div>
                <p class='text-xs text-gray-400 mt-1'>Gas Limit &times; Gas Price</p>
            </div>
            <div class='flex gap-3 justify-end'>
                <a href='/transactions' class='px-4 py-2 border rounded-lg hover:bg-gray-50'>Cancel</a>
                <button type='submit' class='px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700'>Create Transaction</button>
            </div>
        </form>"#,
        banner = banner_html,
        to_address = escape_html(&draft.to_address),
        to_class = field_class(errors, "toAddress"),
        to_error = field_error(errors, "toAddress"),
        amount = escape_html(&draft.amount),
        amount_class = field_class(errors, "amount"),
        amount_error = field_error(errors, "amount"),
        default_limit = escape_html(&state.session.config().fees.default_gas_limit),
        gas_limit = escape_html(&draft.gas_limit),
        limit_class = field_class(errors, "gasLimit"),
        limit_error = field_error(errors, "gasLimit"),
        default_price = escape_html(&state.session.config().fees.default_gas_price),
        gas_price = escape_html(&draft.gas_price),
        price_class = field_class(errors, "gasPrice"),
        price_error = field_error(errors, "gasPrice"),
        fee = fee,
    )
}

fn field_class(errors: &[FieldError], field: &str) -> &'static str {
    if errors.iter().any(|e| e.field == field) {
        "border-red-500"
    } else {
        ""
    }
}

fn field_error(errors: &[FieldError], field: &str) -> String {
    errors
        .iter()
        .find(|e| e.field == field)
        .map(|e| {
            format!(
                "<p class='text-sm text-red-500 mt-1'>{}</p>",
                escape_html(&e.message)
            )
        })
        .unwrap_or_default()
}

/// Success panel after a create; navigates back to the list like the
/// original flow (no local refetch, the list page reloads itself)
pub fn render_create_success(id: &str) -> String {
    format!(
        r#"<div class='text-center py-10'>
            <p class='text-lg font-semibold text-green-600 mb-2'>Transaction Created Successfully</p>
            <p class='text-sm text-gray-500 mb-4 font-mono'>Transaction hash: {}</p>
            <a href='/transactions' class='px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700'>Back to Transactions</a>
            <script>setTimeout(() => {{ window.location = '/transactions'; }}, 1000);</script>
        </div>"#,
        escape_html(id)
    )
}

// ==================== Detail ====================

/// Detail card for a single transaction
pub fn render_detail(state: &AppState, tx: &Transaction) -> String {
    let fee = state.session.fee_preview(&tx.gas_limit, &tx.gas_price);
    let relative = tx
        .timestamp_utc()
        .map(|ts| format!(" ({})", format_relative_time(&ts, &Utc::now())))
        .unwrap_or_default();

    format!(
        r#"<div class='bg-white rounded-xl shadow-sm p-6 space-y-4'>
            {hash}
            {from}
            {to}
            <div class='grid grid-cols-2 gap-4'>
                <div><p class='text-sm text-gray-500'>Amount</p><p class='font-medium'>{amount}</p></div>
                <div><p class='text-sm text-gray-500'>Status</p>{badge}</div>
                <div><p class='text-sm text-gray-500'>Gas Limit</p><p class='font-mono'>{gas_limit}</p></div>
                <div><p class='text-sm text-gray-500'>Gas Price</p><p class='font-mono'>{gas_price}</p></div>
                <div><p class='text-sm text-gray-500'>Transaction Fee</p><p class='font-medium'>{fee} ETH</p></div>
                <div><p class='text-sm text-gray-500'>Timestamp</p><p>{timestamp}{relative}</p></div>
            </div>
        </div>"#,
        hash = copyable_row("Hash", tx.display_hash()),
        from = copyable_row("From Address", &tx.from_address),
        to = copyable_row("To Address", &tx.to_address),
        amount = escape_html(&format_amount(&tx.amount)),
        badge = status_badge(tx.status),
        gas_limit = escape_html(&tx.gas_limit),
        gas_price = escape_html(&tx.gas_price),
        fee = fee,
        timestamp = escape_html(&tx.timestamp),
        relative = escape_html(&relative),
    )
}

fn copyable_row(label: &str, value: &str) -> String {
    format!(
        r#"<div>
            <p class='text-sm text-gray-500'>{label}</p>
            <p class='font-mono text-sm break-all'>{value}
                <button onclick="copyText('{value_attr}')" class='ml-1 text-gray-400 hover:text-gray-600' title='Copy'>&#x2398;</button>
            </p>
        </div>"#,
        label = label,
        value = escape_html(value),
        value_attr = escape_html(value),
    )
}

/// Distinct not-found state, same retry affordance as a fetch failure
pub fn render_not_found(id: &str) -> String {
    format!(
        r#"<div class='bg-white rounded-xl shadow-sm p-10 text-center'>
            <p class='text-lg font-medium mb-2'>Transaction Not Found</p>
            <p class='text-sm text-gray-500 mb-4 font-mono'>{}</p>
            <div class='flex gap-2 justify-center'>
                <a href='' class='px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700'>Retry</a>
                <a href='/transactions' class='px-4 py-2 border rounded-lg hover:bg-gray-50'>Back to Transactions</a>
            </div>
        </div>"#,
        escape_html(id)
    )
}

/// Fetch-failure state for the detail page
pub fn render_detail_error(id: &str, message: &str) -> String {
    format!(
        r#"<div class='bg-white rounded-xl shadow-sm p-10 text-center'>
            <p class='text-lg font-medium text-red-600 mb-2'>Error Loading Transaction</p>
            <p class='text-sm text-gray-500 mb-1 font-mono'>{}</p>
            <p class='text-sm text-gray-500 mb-4'>{}</p>
            <div class='flex gap-2 justify-center'>
                <a href='' class='px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700'>Retry</a>
                <a href='/transactions' class='px-4 py-2 border rounded-lg hover:bg-gray-50'>Back to Transactions</a>
            </div>
        </div>"#,
        escape_html(id),
        escape_html(message)
    )
}

// ==================== Shared Bits ====================

/// Status badge with the lifecycle color scheme
pub fn status_badge(status: TransactionStatus) -> String {
    let (classes, label) = match status {
        TransactionStatus::Pending => ("bg-orange-100 text-orange-700", "Pending"),
        TransactionStatus::Confirmed => ("bg-green-100 text-green-700", "Confirmed"),
        TransactionStatus::Failed => ("bg-red-100 text-red-700", "Failed"),
    };
    format!(
        "<span class='inline-block px-2 py-0.5 text-xs font-medium rounded-full {}'>{}</span>",
        classes, label
    )
}
