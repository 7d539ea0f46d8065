//! List derivation pipeline
//!
//! Pure transformation from the raw transaction set plus the current view
//! state to the visible page: search filter, status filter, date-range
//! filter, stable sort, pagination — always in that order.
//!
//! Ordering policy for malformed data: an amount that is not a finite
//! decimal, or a timestamp that is not valid ISO-8601, compares greater than
//! every well-formed value and equal to any other malformed value. The order
//! stays total and the sort stable, and junk rows collect at the tail of an
//! ascending sort.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::models::Transaction;
use super::types::{SortField, SortOrder, StatusFilter};

// ==================== View State ====================

/// Filter state for the transactions list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    /// Committed search text (already debounced)
    #[serde(default)]
    pub search_text: String,
    /// Status filter selection
    #[serde(default)]
    pub status_filter: StatusFilter,
    /// Inclusive lower bound, interpreted as start of day UTC
    #[serde(default)]
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper bound, interpreted as end of day UTC
    #[serde(default)]
    pub date_to: Option<NaiveDate>,
}

impl FilterState {
    /// Whether any filter deviates from the default
    pub fn is_active(&self) -> bool {
        !self.search_text.is_empty()
            || self.status_filter != StatusFilter::All
            || self.date_from.is_some()
            || self.date_to.is_some()
    }
}

/// Sort state for the transactions list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub field: SortField,
    pub order: SortOrder,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            field: SortField::Date,
            order: SortOrder::Desc,
        }
    }
}

impl SortState {
    /// Column-header click semantics: clicking the active column flips the
    /// direction, clicking another column sorts it descending.
    pub fn toggled(&self, field: SortField) -> SortState {
        if self.field == field {
            SortState {
                field,
                order: self.order.reversed(),
            }
        } else {
            SortState {
                field,
                order: SortOrder::Desc,
            }
        }
    }
}

/// Pagination state for the transactions list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageState {
    /// 1-based page number
    pub current_page: usize,
    /// Records per page
    pub page_size: usize,
}

impl PageState {
    /// First page with the given size
    pub fn new(page_size: usize) -> Self {
        Self {
            current_page: 1,
            page_size,
        }
    }
}

// ==================== Derived Output ====================

/// The visible slice plus the counts the page chrome needs
#[derive(Debug, Clone, Serialize)]
pub struct DerivedPage {
    /// Transactions on the current page
    pub items: Vec<Transaction>,
    /// Count after filtering (before pagination)
    pub total_count: usize,
    /// Count of the raw, unfiltered set
    pub source_count: usize,
    /// Current page, clamped into `1..=total_pages`
    pub current_page: usize,
    /// Total pages; at least 1 even for an empty result
    pub total_pages: usize,
    /// Records per page
    pub page_size: usize,
}

impl DerivedPage {
    /// Filters matched nothing although transactions exist
    pub fn is_filtered_empty(&self) -> bool {
        self.total_count == 0 && self.source_count > 0
    }

    /// There are no transactions at all
    pub fn is_source_empty(&self) -> bool {
        self.source_count == 0
    }

    /// 1-based index of the first visible record ("Showing X-Y of Z")
    pub fn first_index(&self) -> usize {
        if self.total_count == 0 {
            0
        } else {
            (self.current_page - 1) * self.page_size + 1
        }
    }

    /// 1-based index of the last visible record
    pub fn last_index(&self) -> usize {
        (self.first_index() + self.items.len()).saturating_sub(1)
    }
}

// ==================== Pipeline Steps ====================

/// Apply search, status and date-range filters, preserving input order
pub fn apply_filters(transactions: &[Transaction], filter: &FilterState) -> Vec<Transaction> {
    let needle = filter.search_text.trim().to_lowercase();
    let from_bound = filter
        .date_from
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc());
    let to_bound = filter
        .date_to
        .and_then(|d| d.and_hms_milli_opt(23, 59, 59, 999))
        .map(|dt| dt.and_utc());

    transactions
        .iter()
        .filter(|tx| needle.is_empty() || tx.matches_search(&needle))
        .filter(|tx| filter.status_filter.matches(tx.status))
        .filter(|tx| within_date_bounds(tx.timestamp_utc(), from_bound, to_bound))
        .cloned()
        .collect()
}

/// A record without a parsable timestamp cannot satisfy a date bound
fn within_date_bounds(
    timestamp: Option<DateTime<Utc>>,
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
) -> bool {
    match (from, to) {
        (None, None) => true,
        _ => match timestamp {
            None => false,
            Some(ts) => {
                from.map(|b| ts >= b).unwrap_or(true) && to.map(|b| ts <= b).unwrap_or(true)
            }
        },
    }
}

/// Stable in-place sort by the selected field and direction
pub fn sort_transactions(transactions: &mut [Transaction], sort: &SortState) {
    transactions.sort_by(|a, b| {
        let ordering = match sort.field {
            SortField::Date => cmp_malformed_last(a.timestamp_utc(), b.timestamp_utc()),
            SortField::Amount => cmp_malformed_last(a.amount_value(), b.amount_value()),
            SortField::Status => a.status.as_str().cmp(b.status.as_str()),
        };
        match sort.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

/// Total order over possibly-malformed values: `None` sorts after every
/// `Some` and ties with other `None`s.
fn cmp_malformed_last<T: PartialOrd>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Run the full pipeline and slice out the visible page
pub fn derive(
    transactions: &[Transaction],
    filter: &FilterState,
    sort: &SortState,
    page: &PageState,
) -> DerivedPage {
    let mut filtered = apply_filters(transactions, filter);
    sort_transactions(&mut filtered, sort);

    let total_count = filtered.len();
    let page_size = page.page_size.max(1);
    let total_pages = ((total_count + page_size - 1) / page_size).max(1);
    let current_page = page.current_page.clamp(1, total_pages);

    let start = (current_page - 1) * page_size;
    let items: Vec<Transaction> = filtered.into_iter().skip(start).take(page_size).collect();

    DerivedPage {
        items,
        total_count,
        source_count: transactions.len(),
        current_page,
        total_pages,
        page_size,
    }
}

/// The filtered and sorted set without pagination, as exported to CSV
pub fn derive_unpaginated(
    transactions: &[Transaction],
    filter: &FilterState,
    sort: &SortState,
) -> Vec<Transaction> {
    let mut filtered = apply_filters(transactions, filter);
    sort_transactions(&mut filtered, sort);
    filtered
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TransactionStatus;

    fn tx(id: &str, amount: &str, status: TransactionStatus, timestamp: &str) -> Transaction {
        Transaction {
            id: id.to_string(),
            from_address: "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa".to_string(),
            to_address: "0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb".to_string(),
            amount: amount.to_string(),
            gas_limit: "21000".to_string(),
            gas_price: "0.00000002".to_string(),
            status,
            timestamp: timestamp.to_string(),
            hash: None,
        }
    }

    fn sample() -> Vec<Transaction> {
        vec![
            tx(
                "abc123",
                "1.0",
                TransactionStatus::Pending,
                "2024-01-14T09:00:00Z",
            ),
            tx(
                "def456",
                "2.5",
                TransactionStatus::Confirmed,
                "2024-01-15T23:59:00Z",
            ),
            tx(
                "ghi789",
                "0.5",
                TransactionStatus::Failed,
                "2024-01-16T00:00:01Z",
            ),
        ]
    }

    fn ids(transactions: &[Transaction]) -> Vec<&str> {
        transactions.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_filter_is_subset_and_idempotent() {
        let all = sample();
        let filter = FilterState {
            status_filter: StatusFilter::Confirmed,
            ..Default::default()
        };

        let once = apply_filters(&all, &filter);
        assert!(once.iter().all(|t| all.iter().any(|o| o.id == t.id)));

        let twice = apply_filters(&once, &filter);
        assert_eq!(ids(&once), ids(&twice));
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let all = sample();
        let filter = FilterState {
            search_text: "ABC".to_string(),
            ..Default::default()
        };
        let hits = apply_filters(&all, &filter);
        assert_eq!(ids(&hits), vec!["abc123"]);
    }

    #[test]
    fn test_search_matches_hash_and_ignores_missing_hash() {
        let mut all = sample();
        all[1].hash = Some("0xFEEDFACE".to_string());
        let filter = FilterState {
            search_text: "feedface".to_string(),
            ..Default::default()
        };
        let hits = apply_filters(&all, &filter);
        assert_eq!(ids(&hits), vec!["def456"]);
    }

    #[test]
    fn test_status_filter_exact() {
        let all = sample();
        let filter = FilterState {
            status_filter: StatusFilter::Failed,
            ..Default::default()
        };
        let hits = apply_filters(&all, &filter);
        assert_eq!(ids(&hits), vec!["ghi789"]);
    }

    #[test]
    fn test_date_to_includes_end_of_day() {
        let all = sample();
        let filter = FilterState {
            date_to: Some(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()),
            ..Default::default()
        };
        let hits = apply_filters(&all, &filter);
        // 23:59:00 on the boundary day stays, 00:00:01 the next day goes.
        assert_eq!(ids(&hits), vec!["abc123", "def456"]);
    }

    #[test]
    fn test_date_from_starts_at_midnight() {
        let all = sample();
        let filter = FilterState {
            date_from: Some(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()),
            ..Default::default()
        };
        let hits = apply_filters(&all, &filter);
        assert_eq!(ids(&hits), vec!["def456", "ghi789"]);
    }

    #[test]
    fn test_unparsable_timestamp_fails_date_bounds() {
        let mut all = sample();
        all[0].timestamp = "not-a-date".to_string();
        let filter = FilterState {
            date_from: Some(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()),
            ..Default::default()
        };
        let hits = apply_filters(&all, &filter);
        assert!(!hits.iter().any(|t| t.id == "abc123"));

        // Without bounds it passes through untouched.
        let hits = apply_filters(&all, &FilterState::default());
        assert_eq!(hits.len(), 3);
    }

    #[test]
    fn test_sort_by_amount_both_directions() {
        let mut list = sample();
        sort_transactions(
            &mut list,
            &SortState {
                field: SortField::Amount,
                order: SortOrder::Asc,
            },
        );
        assert_eq!(ids(&list), vec!["ghi789", "abc123", "def456"]);

        sort_transactions(
            &mut list,
            &SortState {
                field: SortField::Amount,
                order: SortOrder::Desc,
            },
        );
        assert_eq!(ids(&list), vec!["def456", "abc123", "ghi789"]);
    }

    #[test]
    fn test_sort_is_stable_and_idempotent() {
        let mut list = vec![
            tx("a", "1.0", TransactionStatus::Pending, "2024-01-10T00:00:00Z"),
            tx("b", "1.0", TransactionStatus::Pending, "2024-01-11T00:00:00Z"),
            tx("c", "1.0", TransactionStatus::Pending, "2024-01-12T00:00:00Z"),
        ];
        let sort = SortState {
            field: SortField::Amount,
            order: SortOrder::Asc,
        };
        sort_transactions(&mut list, &sort);
        // All amounts tie, so input order survives.
        assert_eq!(ids(&list), vec!["a", "b", "c"]);

        sort_transactions(&mut list, &sort);
        assert_eq!(ids(&list), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_sort_by_status_is_lexicographic() {
        let mut list = sample();
        sort_transactions(
            &mut list,
            &SortState {
                field: SortField::Status,
                order: SortOrder::Asc,
            },
        );
        // confirmed < failed < pending
        assert_eq!(ids(&list), vec!["def456", "ghi789", "abc123"]);
    }

    #[test]
    fn test_malformed_amount_sorts_last_ascending() {
        let mut list = sample();
        list.push(tx(
            "bad",
            "garbage",
            TransactionStatus::Pending,
            "2024-01-17T00:00:00Z",
        ));
        sort_transactions(
            &mut list,
            &SortState {
                field: SortField::Amount,
                order: SortOrder::Asc,
            },
        );
        assert_eq!(ids(&list).last(), Some(&"bad"));
    }

    #[test]
    fn test_malformed_amounts_tie_stably() {
        let mut list = vec![
            tx("x", "oops", TransactionStatus::Pending, "2024-01-10T00:00:00Z"),
            tx("y", "oops", TransactionStatus::Pending, "2024-01-11T00:00:00Z"),
        ];
        let sort = SortState {
            field: SortField::Amount,
            order: SortOrder::Asc,
        };
        sort_transactions(&mut list, &sort);
        assert_eq!(ids(&list), vec!["x", "y"]);
    }

    #[test]
    fn test_pagination_partitions_exactly() {
        let all: Vec<Transaction> = (0..35)
            .map(|i| {
                tx(
                    &format!("tx-{:02}", i),
                    &format!("{}.0", i),
                    TransactionStatus::Pending,
                    "2024-01-10T00:00:00Z",
                )
            })
            .collect();
        let filter = FilterState::default();
        let sort = SortState {
            field: SortField::Amount,
            order: SortOrder::Asc,
        };

        let expected = derive_unpaginated(&all, &filter, &sort);

        let first = derive(&all, &filter, &sort, &PageState::new(15));
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.total_count, 35);

        let mut seen = Vec::new();
        for page in 1..=first.total_pages {
            let derived = derive(
                &all,
                &filter,
                &sort,
                &PageState {
                    current_page: page,
                    page_size: 15,
                },
            );
            seen.extend(derived.items);
        }
        assert_eq!(ids(&seen), ids(&expected));
    }

    #[test]
    fn test_page_is_clamped() {
        let all = sample();
        let derived = derive(
            &all,
            &FilterState::default(),
            &SortState::default(),
            &PageState {
                current_page: 99,
                page_size: 15,
            },
        );
        assert_eq!(derived.current_page, 1);
        assert_eq!(derived.items.len(), 3);
    }

    #[test]
    fn test_empty_filter_result_is_distinguished_from_empty_source() {
        let all = sample();
        let filter = FilterState {
            search_text: "no-such-record".to_string(),
            ..Default::default()
        };
        let derived = derive(&all, &filter, &SortState::default(), &PageState::new(15));
        assert_eq!(derived.total_pages, 1);
        assert!(derived.items.is_empty());
        assert!(derived.is_filtered_empty());
        assert!(!derived.is_source_empty());

        let derived = derive(&[], &filter, &SortState::default(), &PageState::new(15));
        assert!(derived.is_source_empty());
        assert!(!derived.is_filtered_empty());
        assert_eq!(derived.total_pages, 1);
    }

    #[test]
    fn test_display_indices() {
        let all: Vec<Transaction> = (0..20)
            .map(|i| {
                tx(
                    &format!("tx-{:02}", i),
                    "1.0",
                    TransactionStatus::Pending,
                    "2024-01-10T00:00:00Z",
                )
            })
            .collect();
        let derived = derive(
            &all,
            &FilterState::default(),
            &SortState::default(),
            &PageState {
                current_page: 2,
                page_size: 15,
            },
        );
        assert_eq!(derived.first_index(), 16);
        assert_eq!(derived.last_index(), 20);

        let empty = derive(
            &[],
            &FilterState::default(),
            &SortState::default(),
            &PageState::new(15),
        );
        assert_eq!(empty.first_index(), 0);
        assert_eq!(empty.last_index(), 0);
    }

    #[test]
    fn test_sort_toggle_semantics() {
        let sort = SortState::default();
        let flipped = sort.toggled(SortField::Date);
        assert_eq!(flipped.order, SortOrder::Asc);

        let other = sort.toggled(SortField::Amount);
        assert_eq!(other.field, SortField::Amount);
        assert_eq!(other.order, SortOrder::Desc);
    }
}
