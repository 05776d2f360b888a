//! Record browser facade
//!
//! [`RecordBrowser`] is what a UI shell talks to. It owns the selection
//! store, the pagination controller, the page source and the page change
//! notifier, and turns every fetch failure into a user-visible message
//! instead of an error crossing the boundary.

use log::debug;
use log::error;

use crate::error::BULK_SELECT_ERROR;
use crate::error::PAGE_LOAD_ERROR;
use crate::model::Record;
use crate::model::RecordId;
use crate::notify::NoopNotifier;
use crate::notify::PageChangeNotifier;
use crate::pagination::PageOutcome;
use crate::pagination::PaginationController;
use crate::pagination::PaginationState;
use crate::selection::BulkOutcome;
use crate::selection::BulkRequest;
use crate::selection::BulkSelector;
use crate::selection::PageSelection;
use crate::selection::SelectionStore;
use crate::selection::reconcile_page;
use crate::source::PageDataSource;

/// Initial browser settings.
///
/// # Example
///
/// ```
/// use gallery_lib::browser::BrowserConfig;
///
/// let config = BrowserConfig::default().with_initial_page_index(2);
/// assert_eq!(config.initial_page_index, 2);
/// assert_eq!(config.initial_rows_per_page, 12);
/// ```
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// 0-based page loaded by [`RecordBrowser::start`].
    ///
    /// Default: 0
    pub initial_page_index: usize,

    /// Rows per page assumed until the first fetch reports the real value.
    ///
    /// Default: 12
    pub initial_rows_per_page: usize,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            initial_page_index: 0,
            initial_rows_per_page: 12,
        }
    }
}

impl BrowserConfig {
    /// Creates a new browser config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the initial page index.
    pub fn with_initial_page_index(mut self, page_index: usize) -> Self {
        self.initial_page_index = page_index;
        self
    }

    /// Sets the initial rows per page.
    pub fn with_initial_rows_per_page(mut self, rows: usize) -> Self {
        self.initial_rows_per_page = rows;
        self
    }
}

/// Result of a page change request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLoad {
    /// The page was fetched and is now displayed.
    Loaded,
    /// Another operation was in flight; the request was ignored.
    Busy,
    /// The fetch failed; see [`RecordBrowser::error_message`].
    Failed,
    /// The response arrived after the request was superseded.
    Stale,
}

/// Result of a bulk selection request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkSelect {
    /// The bulk selection ran to completion.
    Applied(BulkOutcome),
    /// The count was not a positive number; nothing happened.
    Ignored,
    /// Another operation was in flight; the request was ignored.
    Busy,
    /// A fetch failed; the selection is unchanged.
    Failed,
}

/// A paginated record browser with selection that survives page changes.
///
/// # Example
///
/// ```ignore
/// use gallery_lib::browser::{BrowserConfig, RecordBrowser};
/// use gallery_lib::source::{HttpPageSource, SourceConfig};
///
/// let source = HttpPageSource::new(SourceConfig::default())?;
/// let mut browser = RecordBrowser::new(source, BrowserConfig::default());
///
/// browser.start().await;
/// browser.toggle_page_header(true);
/// browser.go_to_page(1).await;
/// browser.bulk_select(30).await;
///
/// println!("Total Items Selected: {}", browser.selected_count());
/// ```
pub struct RecordBrowser<S> {
    source: S,
    notifier: Box<dyn PageChangeNotifier>,
    selection: SelectionStore,
    pagination: PaginationController,
    records: Vec<Record>,
    error: Option<String>,
    bulk_input: String,
}

impl<S: PageDataSource> RecordBrowser<S> {
    /// Creates a browser. Nothing is fetched until [`start`](Self::start).
    pub fn new(source: S, config: BrowserConfig) -> Self {
        let state = PaginationState::new(config.initial_page_index, config.initial_rows_per_page);
        Self {
            source,
            notifier: Box::new(NoopNotifier),
            selection: SelectionStore::new(),
            pagination: PaginationController::new(state),
            records: Vec::new(),
            error: None,
            bulk_input: String::new(),
        }
    }

    /// Sets the notifier told about page index changes.
    pub fn with_notifier(mut self, notifier: impl PageChangeNotifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    // =========================================================================
    // Pagination
    // =========================================================================

    /// Loads the configured initial page.
    pub async fn start(&mut self) -> PageLoad {
        let index = self.pagination.state().current_page_index();
        self.go_to_page(index).await
    }

    /// Fetches and displays the page at `page_index` (0-based).
    ///
    /// Ignored while another fetch or bulk selection is in flight. On failure
    /// the last successfully loaded page stays displayed. Dropping the future
    /// before it completes cancels the fetch.
    pub async fn go_to_page(&mut self, page_index: usize) -> PageLoad {
        let Some(ticket) = self.pagination.begin(page_index) else {
            return PageLoad::Busy;
        };
        self.error = None;

        let mut in_flight = self.pagination.in_flight();
        let result = self.source.fetch_page(ticket.page_number()).await;

        match in_flight.finish(ticket, result) {
            PageOutcome::Loaded {
                page,
                index_changed,
            } => {
                self.records = page.into_records();
                if index_changed {
                    self.notifier.page_changed(page_index);
                }
                PageLoad::Loaded
            }
            PageOutcome::Failed(e) => {
                error!("Failed to fetch page {}: {}", ticket.page_number(), e);
                self.error = Some(PAGE_LOAD_ERROR.to_string());
                PageLoad::Failed
            }
            PageOutcome::Stale => PageLoad::Stale,
        }
    }

    /// Abandons any in-flight operation so new requests are accepted.
    pub fn cancel_loading(&mut self) {
        self.pagination.cancel();
    }

    // =========================================================================
    // Page-local selection
    // =========================================================================

    /// Applies the complete selection for the visible page.
    pub fn select_on_page(&mut self, selection: &PageSelection) {
        reconcile_page(&mut self.selection, &self.records, selection);
    }

    /// Flips a single row on the visible page.
    ///
    /// Ids not on the visible page are ignored.
    pub fn toggle_row(&mut self, id: RecordId) {
        let selection = PageSelection::current(&self.selection, &self.records).toggled(id);
        self.select_on_page(&selection);
    }

    /// Handles the header checkbox: select or deselect the whole visible page.
    pub fn toggle_page_header(&mut self, checked: bool) {
        let selection = if checked {
            PageSelection::all(&self.records)
        } else {
            PageSelection::none()
        };
        self.select_on_page(&selection);
    }

    // =========================================================================
    // Bulk selection
    // =========================================================================

    /// Sets the pending bulk count input.
    pub fn set_bulk_input(&mut self, input: impl Into<String>) {
        self.bulk_input = input.into();
    }

    /// Returns the pending bulk count input.
    pub fn bulk_input(&self) -> &str {
        &self.bulk_input
    }

    /// Runs a bulk selection with the pending input.
    ///
    /// Non-numeric input is ignored and left in place.
    pub async fn apply_bulk_input(&mut self) -> BulkSelect {
        match BulkRequest::parse(&self.bulk_input) {
            Some(request) => self.run_bulk(request).await,
            None => {
                debug!("Ignoring bulk input {:?}", self.bulk_input);
                BulkSelect::Ignored
            }
        }
    }

    /// Selects the first `count` records, or deselects them if they are all
    /// selected already.
    ///
    /// A count of zero or less is a silent no-op.
    pub async fn bulk_select(&mut self, count: i64) -> BulkSelect {
        match BulkRequest::new(count) {
            Some(request) => self.run_bulk(request).await,
            None => {
                debug!("Ignoring bulk selection of {} records", count);
                BulkSelect::Ignored
            }
        }
    }

    async fn run_bulk(&mut self, request: BulkRequest) -> BulkSelect {
        if !self.pagination.begin_bulk() {
            return BulkSelect::Busy;
        }
        self.error = None;

        let mut in_flight = self.pagination.in_flight();
        let selector = BulkSelector::new(&self.source, in_flight.state());
        let result = selector.apply(&mut self.selection, request).await;

        in_flight.finish_bulk();
        self.bulk_input.clear();

        match result {
            Ok(outcome) => BulkSelect::Applied(outcome),
            Err(e) => {
                error!("Bulk selection of {} records failed: {}", request.count(), e);
                self.error = Some(BULK_SELECT_ERROR.to_string());
                BulkSelect::Failed
            }
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Returns the records of the displayed page.
    pub fn visible_records(&self) -> &[Record] {
        &self.records
    }

    /// Returns the selected records of the displayed page, in page order.
    pub fn selected_on_page(&self) -> Vec<&Record> {
        self.selection.selected_on_page(&self.records)
    }

    /// Returns the header checkbox state: non-empty page, every row selected.
    pub fn header_checked(&self) -> bool {
        self.selection.page_fully_selected(&self.records)
    }

    /// Returns the number of selected records across all pages.
    pub fn selected_count(&self) -> usize {
        self.selection.selected_count()
    }

    /// Returns the selection store.
    pub fn selection(&self) -> &SelectionStore {
        &self.selection
    }

    /// Returns the pagination state.
    pub fn pagination(&self) -> &PaginationState {
        self.pagination.state()
    }

    /// Returns `true` while a fetch or bulk selection is in flight.
    pub fn is_loading(&self) -> bool {
        self.pagination.is_loading()
    }

    /// Returns the message of the last failed operation, if any.
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Returns the page source.
    pub fn source(&self) -> &S {
        &self.source
    }
}

impl<S> std::fmt::Debug for RecordBrowser<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordBrowser")
            .field("pagination", &self.pagination)
            .field("visible", &self.records.len())
            .field("selected", &self.selection.selected_count())
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}
