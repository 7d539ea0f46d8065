//! Core session state and business logic
//!
//! A [`Session`] owns one fetched copy of the remote transaction set plus
//! the view state the list page works with (search, filters, sort,
//! pagination). Data flows one way: the remote API is the source of truth,
//! [`Session::load`] snapshots it, and the derivation pipeline computes the
//! visible page from that snapshot. Mutations (creating a transaction) go
//! back through the API and never touch the local snapshot; the list page
//! reloads on its next visit.

pub mod debounce;
pub mod draft;
pub mod error;
pub mod export;
pub mod fees;
pub mod models;
pub mod pipeline;
pub mod types;
pub mod validate;

use chrono::NaiveDate;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use txweb_client::{ApiRef, CreateTransactionRequest};
use txweb_config::Config;

pub use debounce::Debouncer;
pub use draft::{DraftStore, FileKvStore, KvStore, MemoryKvStore, DRAFT_KEY};
pub use error::{CoreError, CoreResult, ErrorCode, ErrorDetails, ErrorSeverity};
pub use models::{Transaction, TransactionDraft};
pub use pipeline::{DerivedPage, FilterState, PageState, SortState};
pub use types::{SortField, SortOrder, StatusFilter, TransactionStatus};
pub use validate::{is_valid_address, validate_draft, FieldError};

// ==================== Load State ====================

/// State of the fetched transaction set
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoadState {
    /// Nothing fetched yet
    #[default]
    NotLoaded,
    /// Snapshot present
    Loaded,
    /// Last fetch failed; the message is shown with a retry affordance
    Failed(String),
}

#[derive(Debug, Default)]
struct SessionData {
    transactions: Vec<Transaction>,
    state: LoadState,
}

// ==================== View State ====================

struct ViewState {
    search: Debouncer,
    filter: FilterState,
    sort: SortState,
    page: PageState,
}

impl ViewState {
    fn new(config: &Config) -> Self {
        Self {
            search: Debouncer::new(Duration::from_millis(config.search.debounce_ms)),
            filter: FilterState::default(),
            sort: SortState::default(),
            page: PageState::new(config.pagination.page_size),
        }
    }
}

/// Read-only copy of the view state for rendering the filter controls
#[derive(Debug, Clone)]
pub struct ViewSnapshot {
    /// What the search box shows (possibly not yet committed)
    pub raw_search: String,
    pub filter: FilterState,
    pub sort: SortState,
    pub page: PageState,
}

// ==================== Session ====================

/// One browsing session over the remote transaction set
pub struct Session {
    config: Config,
    api: ApiRef,
    drafts: DraftStore,
    data: RwLock<SessionData>,
    view: RwLock<ViewState>,
}

impl Session {
    /// Create a session; nothing is fetched until [`Session::load`]
    pub fn new(config: Config, api: ApiRef, drafts: DraftStore) -> Self {
        let view = ViewState::new(&config);
        Self {
            config,
            api,
            drafts,
            data: RwLock::new(SessionData::default()),
            view: RwLock::new(view),
        }
    }

    /// The configuration this session runs with
    pub fn config(&self) -> &Config {
        &self.config
    }

    // ==================== Data Loading ====================

    /// Fetch the full transaction set from the remote API, replacing any
    /// previous snapshot. On failure the old snapshot is kept and the load
    /// state records the error for the retry UI.
    pub async fn load(&self) -> CoreResult<()> {
        match self.api.get_all().await {
            Ok(records) => {
                let transactions: Vec<Transaction> =
                    records.into_iter().map(Transaction::from).collect();
                log::info!(
                    target: "txweb::session",
                    "Loaded {} transactions",
                    transactions.len()
                );
                let mut data = self.data.write().unwrap();
                data.transactions = transactions;
                data.state = LoadState::Loaded;
                Ok(())
            }
            Err(e) => {
                let error: CoreError = e.into();
                log::error!(target: "txweb::session", "Load failed: {}", error);
                self.data.write().unwrap().state = LoadState::Failed(error.to_string());
                Err(error)
            }
        }
    }

    /// Retry alias for the error-state button
    pub async fn reload(&self) -> CoreResult<()> {
        self.load().await
    }

    /// Current load state
    pub fn load_state(&self) -> LoadState {
        self.data.read().unwrap().state.clone()
    }

    /// Size of the raw snapshot
    pub fn transactions_count(&self) -> usize {
        self.data.read().unwrap().transactions.len()
    }

    /// Look up a transaction in the local snapshot
    pub fn transaction(&self, id: &str) -> Option<Transaction> {
        let data = self.data.read().unwrap();
        data.transactions.iter().find(|t| t.id == id).cloned()
    }

    /// Fetch a single transaction from the remote API (detail page)
    pub async fn fetch_transaction(&self, id: &str) -> CoreResult<Transaction> {
        let record = self.api.get_by_id(id).await?;
        Ok(Transaction::from(record))
    }

    // ==================== Creation ====================

    /// Submit a create request for an already-validated draft.
    ///
    /// Empty gas fields are filled with the configured baselines before the
    /// call, the way the form previews them. On success the persisted draft
    /// is cleared; the snapshot is left untouched.
    pub async fn create(&self, draft: &TransactionDraft) -> CoreResult<String> {
        let request = CreateTransactionRequest {
            to_address: draft.to_address.clone(),
            amount: draft.amount.clone(),
            gas_limit: if draft.gas_limit.is_empty() {
                self.config.fees.default_gas_limit.clone()
            } else {
                draft.gas_limit.clone()
            },
            gas_price: if draft.gas_price.is_empty() {
                self.config.fees.default_gas_price.clone()
            } else {
                draft.gas_price.clone()
            },
        };

        let id = self.api.create(&request).await?;
        if let Err(e) = self.drafts.clear() {
            // The transaction went through; a stale draft is only a nuisance.
            log::warn!(target: "txweb::session", "Failed to clear draft: {}", e);
        }
        Ok(id)
    }

    /// Live fee preview for the create form
    pub fn fee_preview(&self, gas_limit: &str, gas_price: &str) -> String {
        fees::transaction_fee(
            gas_limit,
            gas_price,
            &self.config.fees.default_gas_limit,
            &self.config.fees.default_gas_price,
        )
    }

    // ==================== Draft Persistence ====================

    /// Saved draft for pre-filling the create form
    pub fn load_draft(&self) -> CoreResult<Option<TransactionDraft>> {
        self.drafts.load()
    }

    /// Autosave the in-progress form
    pub fn save_draft(&self, draft: &TransactionDraft) -> CoreResult<()> {
        self.drafts.save(draft)
    }

    /// Drop the saved draft
    pub fn clear_draft(&self) -> CoreResult<()> {
        self.drafts.clear()
    }

    // ==================== View State ====================

    /// Record a search keystroke. The raw value is visible immediately; the
    /// pipeline only sees it once the debounce window passes.
    pub fn search_input(&self, text: &str) {
        self.search_input_at(text, Instant::now());
    }

    /// Test hook for [`Session::search_input`] with an explicit clock
    pub fn search_input_at(&self, text: &str, now: Instant) {
        self.view.write().unwrap().search.input(text, now);
    }

    /// Apply an already-settled search value (the browser ran the quiet
    /// period before sending). Commits immediately; a change resets
    /// pagination like any other filter change.
    pub fn set_search(&self, text: &str) {
        let mut view = self.view.write().unwrap();
        view.search.input(text, Instant::now());
        if view.search.flush() {
            view.filter.search_text = view.search.committed().to_string();
            view.page.current_page = 1;
        }
    }

    /// Select a status filter; a change resets pagination
    pub fn set_status_filter(&self, status: StatusFilter) {
        let mut view = self.view.write().unwrap();
        if view.filter.status_filter != status {
            view.filter.status_filter = status;
            view.page.current_page = 1;
        }
    }

    /// Set the inclusive lower date bound; a change resets pagination
    pub fn set_date_from(&self, date: Option<NaiveDate>) {
        let mut view = self.view.write().unwrap();
        if view.filter.date_from != date {
            view.filter.date_from = date;
            view.page.current_page = 1;
        }
    }

    /// Set the inclusive upper date bound; a change resets pagination
    pub fn set_date_to(&self, date: Option<NaiveDate>) {
        let mut view = self.view.write().unwrap();
        if view.filter.date_to != date {
            view.filter.date_to = date;
            view.page.current_page = 1;
        }
    }

    /// Set the sort state; a change resets pagination
    pub fn set_sort(&self, sort: SortState) {
        let mut view = self.view.write().unwrap();
        if view.sort != sort {
            view.sort = sort;
            view.page.current_page = 1;
        }
    }

    /// Column-header click: flip or switch the sorted column
    pub fn toggle_sort(&self, field: SortField) {
        let mut view = self.view.write().unwrap();
        view.sort = view.sort.toggled(field);
        view.page.current_page = 1;
    }

    /// Jump to a page (1-based; clamped during derivation)
    pub fn set_page(&self, page: usize) {
        self.view.write().unwrap().page.current_page = page.max(1);
    }

    /// Reset every filter and the search box; sort order is kept
    pub fn clear_filters(&self) {
        let mut view = self.view.write().unwrap();
        view.search.clear();
        view.filter = FilterState::default();
        view.page.current_page = 1;
    }

    /// Back to defaults, as on a fresh page load
    pub fn reset_view(&self) {
        *self.view.write().unwrap() = ViewState::new(&self.config);
    }

    /// Copy of the view state for rendering the controls
    pub fn view(&self) -> ViewSnapshot {
        let view = self.view.read().unwrap();
        ViewSnapshot {
            raw_search: view.search.raw().to_string(),
            filter: view.filter.clone(),
            sort: view.sort,
            page: view.page,
        }
    }

    // ==================== Derivation ====================

    /// Commit any settled search input, then run the pipeline
    pub fn derive(&self) -> DerivedPage {
        self.derive_at(Instant::now())
    }

    /// Test hook for [`Session::derive`] with an explicit clock
    pub fn derive_at(&self, now: Instant) -> DerivedPage {
        self.commit_search(now);
        let data = self.data.read().unwrap();
        let view = self.view.read().unwrap();
        pipeline::derive(&data.transactions, &view.filter, &view.sort, &view.page)
    }

    /// The filtered and sorted list as CSV (never paginated)
    pub fn export_csv(&self) -> String {
        self.commit_search(Instant::now());
        let data = self.data.read().unwrap();
        let view = self.view.read().unwrap();
        let rows = pipeline::derive_unpaginated(&data.transactions, &view.filter, &view.sort);
        export::to_csv(
            &rows,
            &self.config.fees.default_gas_limit,
            &self.config.fees.default_gas_price,
        )
    }

    fn commit_search(&self, now: Instant) {
        let mut view = self.view.write().unwrap();
        if view.search.poll(now) {
            view.filter.search_text = view.search.committed().to_string();
            view.page.current_page = 1;
        }
    }
}

// ==================== Tests ====================
