//! HTTP server with HTMX support
//!
//! Routes are organized into modules:
//! - routes::transactions: Transaction list, search, pagination, detail,
//!   create form and CSV export

pub mod error;
pub mod routes;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use txweb_config::Config;
use txweb_core::Session;

pub use error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<Session>,
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::transactions::{
        api_draft_clear, api_draft_get, api_draft_save, api_transaction_detail, api_transactions,
        htmx_fee_preview, htmx_transaction_store, htmx_transactions_list, page_transaction_create,
        page_transaction_detail, page_transactions, transactions_export,
    };

    Router::new()
        // JSON API endpoints
        .route("/api/health", get(health_check))
        .route("/api/transactions", get(api_transactions))
        .route("/api/transactions/:id", get(api_transaction_detail))
        .route("/api/reload", post(api_reload))
        .route("/api/draft", get(api_draft_get))
        .route("/api/draft", put(api_draft_save))
        .route("/api/draft", delete(api_draft_clear))
        // Pages
        .route("/", get(index_redirect))
        .route("/transactions", get(page_transactions))
        .route("/transactions/create", get(page_transaction_create))
        // HTMX partials and form actions
        .route("/transactions/list", get(htmx_transactions_list))
        .route("/transactions/fee-preview", get(htmx_fee_preview))
        .route("/transactions/export", get(transactions_export))
        .route("/transactions", post(htmx_transaction_store))
        // Parameterized page last so the fixed segments above win
        .route("/transactions/:id", get(page_transaction_detail))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// The list page is the landing page
async fn index_redirect() -> axum::response::Redirect {
    axum::response::Redirect::to("/transactions")
}

/// Refetch the transaction set from the remote API
async fn api_reload(state: axum::extract::State<AppState>) -> String {
    match state.session.reload().await {
        Ok(_) => r#"{"success": true, "message": "Transactions reloaded"}"#.to_string(),
        Err(e) => format!(
            r#"{{"success": false, "message": "{}"}}"#,
            e.to_string().replace('"', "'")
        ),
    }
}

// ==================== Template Functions ====================

/// Base HTML template
pub fn base_html(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - Txweb</title>
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
    <script src="https://cdn.tailwindcss.com"></script>
    <style>
        .htmx-indicator {{ opacity: 0; transition: opacity 0.3s; }}
        .htmx-request .htmx-indicator {{ opacity: 1; }}
        .htmx-request.htmx-indicator {{ opacity: 1; }}
    </style>
    <script>
    function showToast(message, isError) {{
        const toast = document.createElement('div');
        toast.textContent = message;
        toast.className = 'fixed bottom-4 right-4 px-4 py-2 rounded-lg shadow-lg text-white text-sm z-50 '
            + (isError ? 'bg-red-600' : 'bg-gray-800');
        document.body.appendChild(toast);
        setTimeout(() => toast.remove(), 3000);
    }}
    function copyText(text) {{
        navigator.clipboard.writeText(text)
            .then(() => showToast('Copied to clipboard', false))
            .catch(() => showToast('Failed to copy to clipboard', true));
    }}
    </script>
</head>
<body class="bg-gray-50 text-gray-900">
    {}
</body>
</html>"#,
        title, content
    )
}

/// Navigation sidebar
pub fn nav_sidebar(current_path: &str) -> String {
    let links = [
        ("/transactions", "Transactions", "transactions"),
        ("/transactions/create", "New Transaction", "create"),
    ];

    let mut nav = String::from(
        "<div class='bg-white border-r h-screen flex flex-col'><div class='p-4 border-b'><h1 class='text-xl font-bold text-indigo-600'>Txweb</h1></div><ul class='flex-1 py-2 space-y-1 px-2'>",
    );

    for (path, label, id) in &links {
        let is_active = if *id == "create" {
            current_path == *path
        } else {
            current_path.starts_with(path) && current_path != "/transactions/create"
        };
        let active_class = if is_active {
            "bg-indigo-50 text-indigo-600"
        } else {
            "text-gray-600 hover:bg-gray-50"
        };
        nav.push_str(&format!(
            r#"<li><a href='{}' class='flex items-center gap-2 px-3 py-2 rounded-lg {}'><span>{}</span></a></li>"#,
            path, active_class, label
        ));
    }
    nav.push_str("</ul></div>");
    nav
}

/// Check if request is from HTMX (partial page update)
fn is_htmx_request(headers: &axum::http::HeaderMap) -> bool {
    headers.get("hx-request").is_some()
}

/// Wrap content for full page or HTMX partial
pub fn page_response(
    headers: &axum::http::HeaderMap,
    title: &str,
    current_path: &str,
    inner_content: &str,
) -> String {
    if is_htmx_request(headers) {
        // HTMX partial - just the content area (no sidebar for partial updates)
        format!(
            r#"<div class='flex flex-col h-screen'>
    <div class='flex flex-1 overflow-hidden'>
        <main class='flex-1 overflow-auto bg-gray-50 p-6'>{}</main>
    </div>
</div>"#,
            inner_content
        )
    } else {
        // Full page - wrap with base HTML and sidebar
        base_html(
            title,
            &format!(
                r#"<div class='flex flex-col h-screen'>
    <div class='flex flex-1 overflow-hidden'>
        <aside class='w-64 flex-shrink-0'>{}</aside>
        <main class='flex-1 overflow-auto bg-gray-50 p-6'>{}</main>
    </div>
</div>"#,
                nav_sidebar(current_path),
                inner_content
            ),
        )
    }
}

// ==================== Server ====================

/// Start the HTTP server
///
/// Creates the router, binds to the configured address, and serves until
/// the process is stopped.
pub async fn start_server(config: Config, session: Arc<Session>) {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState { session };

    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await.unwrap();
    log::info!(target: "txweb::server", "Starting Txweb server on http://{}", addr);
    log::info!(target: "txweb::server", "Available routes:");
    log::info!(target: "txweb::server", "  - /transactions (Transaction list)");
    log::info!(target: "txweb::server", "  - /transactions/create (New transaction)");
    log::info!(target: "txweb::server", "  - /transactions/export (CSV download)");
    log::info!(target: "txweb::server", "  - /api/* (JSON API endpoints)");

    match axum::serve(listener, router).await {
        Ok(_) => log::info!(target: "txweb::server", "Server stopped gracefully"),
        Err(e) => log::error!(target: "txweb::server", "Server error: {}", e),
    }
}

// ==================== Tests ====================
