//! Pagination state and the single-outstanding-fetch discipline

use log::debug;
use log::warn;

use crate::error::FetchError;
use crate::model::Page;

/// Current position and server-reported size of the paginated collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    current_page_index: usize,
    rows_per_page: usize,
    total_records: usize,
}

impl PaginationState {
    /// Creates a state with no records known yet.
    pub fn new(current_page_index: usize, rows_per_page: usize) -> Self {
        Self {
            current_page_index,
            rows_per_page,
            total_records: 0,
        }
    }

    /// Returns the 0-based index of the displayed page.
    pub fn current_page_index(&self) -> usize {
        self.current_page_index
    }

    /// Returns the 1-based number of the displayed page.
    pub fn current_page_number(&self) -> usize {
        self.current_page_index + 1
    }

    /// Returns the rows per page last reported by the source.
    pub fn rows_per_page(&self) -> usize {
        self.rows_per_page
    }

    /// Returns the total record count last reported by the source.
    pub fn total_records(&self) -> usize {
        self.total_records
    }

    /// Returns the offset of the first record on the current page.
    pub fn first_record_offset(&self) -> usize {
        self.current_page_index.saturating_mul(self.rows_per_page)
    }

    /// Returns the number of pages, or 0 if the page size is unknown.
    pub fn page_count(&self) -> usize {
        if self.rows_per_page == 0 {
            return 0;
        }
        self.total_records.div_ceil(self.rows_per_page)
    }
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new(0, 12)
    }
}

/// Proof that a page fetch was started; hand it back to [`PaginationController::finish`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    page_index: usize,
}

impl FetchTicket {
    /// Returns the 0-based index of the requested page.
    pub fn page_index(&self) -> usize {
        self.page_index
    }

    /// Returns the 1-based page number to pass to the source.
    pub fn page_number(&self) -> usize {
        self.page_index + 1
    }
}

/// How a finished page fetch was applied.
#[derive(Debug)]
pub enum PageOutcome {
    /// The page is now current; pagination metadata was replaced.
    Loaded {
        /// The fetched page.
        page: Page,
        /// `true` if the current page index differs from before.
        index_changed: bool,
    },
    /// The fetch failed; pagination state is unchanged.
    Failed(FetchError),
    /// The ticket was superseded; the result was discarded.
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Activity {
    Idle,
    Page(u64),
    Bulk,
}

/// Owns [`PaginationState`] and serializes fetches behind a loading flag.
///
/// A page change is split into [`begin`](Self::begin), which hands out a
/// [`FetchTicket`] unless something is already in flight, and
/// [`finish`](Self::finish), which applies the result only if the ticket is
/// still current. Shells that drive the fetch on their own executor use the
/// two halves directly.
///
/// # Example
///
/// ```
/// use gallery_lib::model::{Page, Record};
/// use gallery_lib::pagination::{PageOutcome, PaginationController, PaginationState};
///
/// let mut pagination = PaginationController::new(PaginationState::default());
///
/// let ticket = pagination.begin(2).unwrap();
/// assert!(pagination.is_loading());
/// assert!(pagination.begin(3).is_none());
///
/// let page = Page::new(vec![Record::new(21)], 10, 95);
/// let outcome = pagination.finish(ticket, Ok(page));
///
/// assert!(matches!(outcome, PageOutcome::Loaded { index_changed: true, .. }));
/// assert_eq!(pagination.state().current_page_index(), 2);
/// assert_eq!(pagination.state().page_count(), 10);
/// ```
#[derive(Debug)]
pub struct PaginationController {
    state: PaginationState,
    activity: Activity,
    generation: u64,
}

impl PaginationController {
    /// Creates a controller starting from `state`.
    pub fn new(state: PaginationState) -> Self {
        Self {
            state,
            activity: Activity::Idle,
            generation: 0,
        }
    }

    /// Returns the current pagination state.
    pub fn state(&self) -> &PaginationState {
        &self.state
    }

    /// Returns `true` while a page fetch or bulk operation is in flight.
    pub fn is_loading(&self) -> bool {
        self.activity != Activity::Idle
    }

    /// Starts fetching the page at `page_index` (0-based).
    ///
    /// Returns `None` and changes nothing if another operation is in flight.
    pub fn begin(&mut self, page_index: usize) -> Option<FetchTicket> {
        if self.is_loading() {
            warn!(
                "Ignoring request for page {} while {:?} is in flight",
                page_index + 1,
                self.activity
            );
            return None;
        }

        self.generation += 1;
        self.activity = Activity::Page(self.generation);
        debug!("Requesting page {}", page_index + 1);

        Some(FetchTicket {
            generation: self.generation,
            page_index,
        })
    }

    /// Applies the result of the fetch started with `ticket`.
    ///
    /// On success the ticket's page becomes current and rows-per-page and
    /// total are replaced by the values just reported. On failure only the
    /// loading flag is cleared. A page reporting zero rows per page is a
    /// failure. A superseded ticket changes nothing.
    pub fn finish(&mut self, ticket: FetchTicket, result: Result<Page, FetchError>) -> PageOutcome {
        if self.activity != Activity::Page(ticket.generation) {
            warn!(
                "Discarding stale response for page {}",
                ticket.page_number()
            );
            return PageOutcome::Stale;
        }
        self.activity = Activity::Idle;

        match result {
            Ok(page) if page.page_size() == 0 => PageOutcome::Failed(FetchError::parse(format!(
                "page {} reported a page size of 0",
                ticket.page_number()
            ))),
            Ok(page) => {
                let index_changed = self.state.current_page_index != ticket.page_index;
                self.state.current_page_index = ticket.page_index;
                self.state.rows_per_page = page.page_size();
                self.state.total_records = page.total_count();
                debug!(
                    "Loaded page {} ({} records, {} per page, {} total)",
                    ticket.page_number(),
                    page.len(),
                    self.state.rows_per_page,
                    self.state.total_records
                );
                PageOutcome::Loaded {
                    page,
                    index_changed,
                }
            }
            Err(e) => PageOutcome::Failed(e),
        }
    }

    /// Marks a bulk operation as in flight. Returns `false` if busy.
    pub fn begin_bulk(&mut self) -> bool {
        if self.is_loading() {
            warn!("Ignoring bulk selection while {:?} is in flight", self.activity);
            return false;
        }
        self.activity = Activity::Bulk;
        true
    }

    /// Clears the loading flag set by [`begin_bulk`](Self::begin_bulk).
    pub fn finish_bulk(&mut self) {
        if self.activity == Activity::Bulk {
            self.activity = Activity::Idle;
        }
    }

    /// Abandons whatever is in flight; any outstanding ticket becomes stale.
    pub fn cancel(&mut self) {
        if self.is_loading() {
            debug!("Cancelling {:?}", self.activity);
        }
        self.generation += 1;
        self.activity = Activity::Idle;
    }

    /// Returns a guard over the operation just started with
    /// [`begin`](Self::begin) or [`begin_bulk`](Self::begin_bulk).
    ///
    /// Dropping the guard before finishing through it cancels the operation,
    /// so an abandoned future never leaves the controller busy.
    pub fn in_flight(&mut self) -> InFlight<'_> {
        InFlight {
            controller: self,
            finished: false,
        }
    }
}

/// Cancels the in-flight operation unless it was finished through the guard.
///
/// # Example
///
/// ```
/// use gallery_lib::pagination::{PaginationController, PaginationState};
///
/// let mut pagination = PaginationController::new(PaginationState::default());
/// let _ticket = pagination.begin(1).unwrap();
///
/// drop(pagination.in_flight());
/// assert!(!pagination.is_loading());
/// ```
#[derive(Debug)]
pub struct InFlight<'a> {
    controller: &'a mut PaginationController,
    finished: bool,
}

impl InFlight<'_> {
    /// Returns the pagination state.
    pub fn state(&self) -> &PaginationState {
        self.controller.state()
    }

    /// Finishes a page fetch; see [`PaginationController::finish`].
    pub fn finish(&mut self, ticket: FetchTicket, result: Result<Page, FetchError>) -> PageOutcome {
        self.finished = true;
        self.controller.finish(ticket, result)
    }

    /// Finishes a bulk operation; see [`PaginationController::finish_bulk`].
    pub fn finish_bulk(&mut self) {
        self.finished = true;
        self.controller.finish_bulk();
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.finished {
            warn!("In-flight {:?} abandoned", self.controller.activity);
            self.controller.cancel();
        }
    }
}
