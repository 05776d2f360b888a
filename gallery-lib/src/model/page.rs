//! Page type for paginated source results.

use super::Record;

/// One fetched batch of records plus pagination metadata.
///
/// `page_size` and `total_count` are authoritative only as of this fetch; a
/// source may report different values for the next page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    records: Vec<Record>,
    /// Rows per page as reported by the source.
    page_size: usize,
    /// Total number of records across all pages.
    total_count: usize,
}

impl Page {
    /// Creates a new page.
    pub fn new(records: Vec<Record>, page_size: usize, total_count: usize) -> Self {
        Self {
            records,
            page_size,
            total_count,
        }
    }

    /// Returns a reference to the records in this page.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Consumes the page and returns the records.
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    /// Returns the page size reported by the source.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Returns the total record count reported by the source.
    pub fn total_count(&self) -> usize {
        self.total_count
    }

    /// Returns `true` if this page has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the number of records in this page.
    pub fn len(&self) -> usize {
        self.records.len()
    }
}
