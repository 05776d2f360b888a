//! Global selection set

use std::collections::HashMap;

use crate::model::Record;
use crate::model::RecordId;

/// The set of selected records, keyed by id.
///
/// The record value captured at selection time is kept so selected records
/// stay displayable after their page is gone. Entries are never pruned
/// automatically: a selection stays until it is explicitly removed, even if
/// the source no longer returns that record.
///
/// # Example
///
/// ```
/// use gallery_lib::model::Record;
/// use gallery_lib::selection::SelectionStore;
///
/// let page = vec![Record::new(1), Record::new(2), Record::new(3)];
/// let mut store = SelectionStore::new();
///
/// store.select(page[2].clone());
/// store.select(page[0].clone());
///
/// let on_page: Vec<_> = store.selected_on_page(&page).iter().map(|r| r.id().get()).collect();
/// assert_eq!(on_page, vec![1, 3]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionStore {
    selected: HashMap<RecordId, Record>,
}

impl SelectionStore {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the record with this id is selected.
    pub fn is_selected(&self, id: RecordId) -> bool {
        self.selected.contains_key(&id)
    }

    /// Selects a record, replacing any previously stored value for its id.
    pub fn select(&mut self, record: Record) {
        self.selected.insert(record.id(), record);
    }

    /// Deselects a record and returns the stored value, if it was selected.
    pub fn deselect(&mut self, id: RecordId) -> Option<Record> {
        self.selected.remove(&id)
    }

    /// Returns the number of selected records.
    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Returns `true` if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Returns the records of `page` that are selected, in page order.
    pub fn selected_on_page<'a>(&self, page: &'a [Record]) -> Vec<&'a Record> {
        page.iter().filter(|r| self.is_selected(r.id())).collect()
    }

    /// Returns `true` if every record in `records` is selected.
    ///
    /// Vacuously `true` for an empty slice; see [`page_fully_selected`](Self::page_fully_selected)
    /// for the header checkbox rule.
    pub fn all_selected(&self, records: &[Record]) -> bool {
        records.iter().all(|r| self.is_selected(r.id()))
    }

    /// Returns `true` if `page` is non-empty and every record on it is selected.
    pub fn page_fully_selected(&self, page: &[Record]) -> bool {
        !page.is_empty() && self.all_selected(page)
    }

    /// Returns the stored value of a selected record.
    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.selected.get(&id)
    }

    /// Iterates over all selected records in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.selected.values()
    }

    /// Returns the selected ids in ascending order.
    pub fn selected_ids(&self) -> Vec<RecordId> {
        let mut ids: Vec<_> = self.selected.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Deselects everything.
    pub fn clear(&mut self) {
        self.selected.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(ids: impl IntoIterator<Item = u64>) -> Vec<Record> {
        ids.into_iter().map(Record::new).collect()
    }

    #[test]
    fn test_select_and_deselect() {
        let mut store = SelectionStore::new();
        store.select(Record::new(5));
        store.select(Record::new(5).with_title("again"));

        assert!(store.is_selected(RecordId(5)));
        assert_eq!(store.selected_count(), 1);
        assert_eq!(store.get(RecordId(5)).and_then(Record::title), Some("again"));

        assert!(store.deselect(RecordId(5)).is_some());
        assert!(store.deselect(RecordId(5)).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_selected_on_page_keeps_page_order() {
        let records = page([9, 3, 7, 1]);
        let mut store = SelectionStore::new();
        store.select(Record::new(1));
        store.select(Record::new(9));
        store.select(Record::new(100));

        let selected: Vec<_> = store
            .selected_on_page(&records)
            .iter()
            .map(|r| r.id().get())
            .collect();
        assert_eq!(selected, vec![9, 1]);
    }

    #[test]
    fn test_empty_page_is_never_fully_selected() {
        let store = SelectionStore::new();
        assert!(store.all_selected(&[]));
        assert!(!store.page_fully_selected(&[]));
    }

    #[test]
    fn test_page_fully_selected() {
        let records = page(1..=3);
        let mut store = SelectionStore::new();
        store.select(Record::new(1));
        store.select(Record::new(2));
        assert!(!store.page_fully_selected(&records));

        store.select(Record::new(3));
        assert!(store.page_fully_selected(&records));
    }

    #[test]
    fn test_selected_ids_sorted() {
        let mut store = SelectionStore::new();
        for id in [42, 7, 19] {
            store.select(Record::new(id));
        }
        assert_eq!(
            store.selected_ids(),
            vec![RecordId(7), RecordId(19), RecordId(42)]
        );
    }
}
