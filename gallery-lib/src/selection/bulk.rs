//! "Select the first N records" across pages

use log::debug;
use log::info;

use super::SelectionStore;
use crate::error::FetchError;
use crate::model::Record;
use crate::pagination::PaginationState;
use crate::query::parse_int_prefix;
use crate::source::PageDataSource;

/// A validated bulk selection request for the first `count` records.
///
/// Counts of zero or less are not requests at all; the constructors return
/// `None` for them so callers can treat invalid input as a silent no-op.
///
/// # Example
///
/// ```
/// use gallery_lib::selection::BulkRequest;
///
/// assert_eq!(BulkRequest::parse(" 25 ").map(|r| r.count()), Some(25));
/// assert_eq!(BulkRequest::parse("25abc").map(|r| r.count()), Some(25));
/// assert!(BulkRequest::parse("-3").is_none());
/// assert!(BulkRequest::parse("abc").is_none());
/// assert!(BulkRequest::new(0).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulkRequest {
    count: usize,
}

impl BulkRequest {
    /// Creates a request, or `None` if `count <= 0`.
    pub fn new(count: i64) -> Option<Self> {
        if count <= 0 {
            return None;
        }
        Some(Self {
            count: usize::try_from(count).unwrap_or(usize::MAX),
        })
    }

    /// Parses user input the way a number field is read: leading whitespace
    /// and trailing garbage are ignored, non-numeric input yields `None`.
    pub fn parse(input: &str) -> Option<Self> {
        parse_int_prefix(input).and_then(Self::new)
    }

    /// Returns the number of records targeted.
    pub fn count(&self) -> usize {
        self.count
    }
}

/// Whether a bulk operation selects or deselects its target records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkDirection {
    /// At least one target record was unselected; select them all.
    Select,
    /// Every target record was already selected; deselect them all.
    Deselect,
}

impl BulkDirection {
    /// Derives the direction from the current store contents.
    ///
    /// Select wins over a partially selected target.
    pub fn for_target(store: &SelectionStore, target: &[Record]) -> Self {
        if store.all_selected(target) {
            Self::Deselect
        } else {
            Self::Select
        }
    }
}

/// Result of a completed bulk operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulkOutcome {
    /// The direction that was applied.
    pub direction: BulkDirection,
    /// Number of target records the direction was applied to.
    pub affected: usize,
    /// Number of pages fetched to build the target.
    pub pages_fetched: usize,
}

/// Records collected for a bulk operation, in page-then-row order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkTarget {
    /// The first `min(N, available)` records.
    pub records: Vec<Record>,
    /// Number of pages fetched.
    pub pages_fetched: usize,
}

/// Walks pages from page 1 until N records are collected, then toggles them.
///
/// The number of remaining pages is estimated from the rows-per-page and
/// total count known when the selector was created; they are not refreshed
/// from the pages fetched along the way.
pub struct BulkSelector<'a, S: ?Sized> {
    source: &'a S,
    rows_per_page: usize,
    total_records: usize,
}

impl<'a, S: PageDataSource + ?Sized> BulkSelector<'a, S> {
    /// Creates a selector using the last known pagination metadata.
    pub fn new(source: &'a S, known: &PaginationState) -> Self {
        Self::with_known_totals(source, known.rows_per_page(), known.total_records())
    }

    /// Creates a selector with explicit rows-per-page and total count.
    pub fn with_known_totals(source: &'a S, rows_per_page: usize, total_records: usize) -> Self {
        Self {
            source,
            rows_per_page,
            total_records,
        }
    }

    /// Fetches pages sequentially until `count` records are collected or the
    /// known total is exhausted.
    ///
    /// Stops early on an empty page. Fetches nothing while the page size is
    /// unknown (zero). Any fetch error aborts the walk and the records
    /// collected so far are dropped.
    pub async fn collect(&self, count: usize) -> Result<BulkTarget, FetchError> {
        if self.rows_per_page == 0 {
            debug!("Bulk selection skipped: page size unknown");
            return Ok(BulkTarget::default());
        }

        let mut records: Vec<Record> = Vec::new();
        let mut page_number = 1;

        while records.len() < count
            && (page_number - 1usize).saturating_mul(self.rows_per_page) < self.total_records
        {
            let page = self.source.fetch_page(page_number).await?;
            debug!(
                "Bulk selection fetched page {} ({} records)",
                page_number,
                page.len()
            );
            page_number += 1;

            if page.is_empty() {
                break;
            }
            records.extend(page.into_records());
        }

        records.truncate(count);

        Ok(BulkTarget {
            records,
            pages_fetched: page_number - 1,
        })
    }

    /// Toggles the first `request.count()` records in `store`.
    ///
    /// If every target record is already selected they are all deselected,
    /// otherwise they are all selected. The store is only touched after every
    /// fetch succeeded; on error it is left exactly as it was.
    pub async fn apply(
        &self,
        store: &mut SelectionStore,
        request: BulkRequest,
    ) -> Result<BulkOutcome, FetchError> {
        let target = self.collect(request.count()).await?;
        let direction = BulkDirection::for_target(store, &target.records);
        let affected = target.records.len();

        apply_direction(store, target.records, direction);

        info!(
            "Bulk {:?} of first {} records applied to {} ({} pages fetched, {} selected)",
            direction,
            request.count(),
            affected,
            target.pages_fetched,
            store.selected_count()
        );

        Ok(BulkOutcome {
            direction,
            affected,
            pages_fetched: target.pages_fetched,
        })
    }
}

/// Applies `direction` to every record in `target` and to nothing else.
pub fn apply_direction(store: &mut SelectionStore, target: Vec<Record>, direction: BulkDirection) {
    match direction {
        BulkDirection::Select => {
            for record in target {
                store.select(record);
            }
        }
        BulkDirection::Deselect => {
            for record in &target {
                store.deselect(record.id());
            }
        }
    }
}
