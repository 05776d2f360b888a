//! In-memory page source

use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use async_trait::async_trait;

use super::PageDataSource;
use crate::error::FetchError;
use crate::model::Page;
use crate::model::Record;

/// A page source that slices a fixed record list into pages.
///
/// Useful for offline shells and tests. Pages past the end come back empty
/// with the usual metadata, like a REST collection would.
///
/// # Example
///
/// ```
/// use gallery_lib::model::Record;
/// use gallery_lib::source::MemoryPageSource;
///
/// let records = (1..=30).map(Record::new).collect();
/// let source = MemoryPageSource::new(records, 12);
///
/// assert_eq!(source.page_size(), 12);
/// assert_eq!(source.fetch_count(), 0);
/// ```
#[derive(Debug)]
pub struct MemoryPageSource {
    records: Vec<Record>,
    page_size: usize,
    fetches: AtomicUsize,
}

impl MemoryPageSource {
    /// Creates a source over `records` with the given page size (at least 1).
    pub fn new(records: Vec<Record>, page_size: usize) -> Self {
        Self {
            records,
            page_size: page_size.max(1),
            fetches: AtomicUsize::new(0),
        }
    }

    /// Returns the page size.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Returns the total number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the source holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns how many fetches have been served (including failed ones).
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageDataSource for MemoryPageSource {
    async fn fetch_page(&self, page_number: usize) -> Result<Page, FetchError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);

        if page_number == 0 {
            return Err(FetchError::other("page numbers start at 1"));
        }

        let start = (page_number - 1)
            .saturating_mul(self.page_size)
            .min(self.records.len());
        let end = start.saturating_add(self.page_size).min(self.records.len());

        Ok(Page::new(
            self.records[start..end].to_vec(),
            self.page_size,
            self.records.len(),
        ))
    }
}
