//! Page-local selection changes

use std::collections::HashSet;

use log::debug;

use super::SelectionStore;
use crate::model::Record;
use crate::model::RecordId;

/// The complete set of records the user wants selected on the visible page.
///
/// This is the value a table's selection-change event carries. It says
/// nothing about other pages; [`reconcile_page`] applies it without touching
/// them.
///
/// # Example
///
/// ```
/// use gallery_lib::model::{Record, RecordId};
/// use gallery_lib::selection::{reconcile_page, PageSelection, SelectionStore};
///
/// let page: Vec<_> = (1..=4).map(Record::new).collect();
/// let mut store = SelectionStore::new();
///
/// let change = PageSelection::current(&store, &page).toggled(RecordId(2));
/// reconcile_page(&mut store, &page, &change);
///
/// assert!(store.is_selected(RecordId(2)));
/// assert_eq!(store.selected_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSelection {
    ids: HashSet<RecordId>,
}

impl PageSelection {
    /// Creates a selection from the records the user checked.
    pub fn new<'a>(records: impl IntoIterator<Item = &'a Record>) -> Self {
        Self::from_ids(records.into_iter().map(Record::id))
    }

    /// Creates a selection from record ids.
    pub fn from_ids(ids: impl IntoIterator<Item = RecordId>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }

    /// Every record on the page ("select all on this page").
    pub fn all(page: &[Record]) -> Self {
        Self::new(page)
    }

    /// Nothing on the page ("select none on this page").
    pub fn none() -> Self {
        Self::default()
    }

    /// The page's current selection as recorded in `store`.
    pub fn current(store: &SelectionStore, page: &[Record]) -> Self {
        Self::new(store.selected_on_page(page))
    }

    /// Returns this selection with `id` flipped (a single row checkbox click).
    pub fn toggled(mut self, id: RecordId) -> Self {
        if !self.ids.remove(&id) {
            self.ids.insert(id);
        }
        self
    }

    /// Returns `true` if `id` is part of this selection.
    pub fn contains(&self, id: RecordId) -> bool {
        self.ids.contains(&id)
    }

    /// Returns the number of ids in this selection.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns `true` if this selection is empty.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Merges a page-local selection into the global store.
///
/// Every record of `page` ends up selected iff its id is in `selection`.
/// Records that are not on `page` are left alone, as are ids in `selection`
/// that do not appear on `page`.
pub fn reconcile_page(store: &mut SelectionStore, page: &[Record], selection: &PageSelection) {
    let mut selected = 0;
    for record in page {
        if selection.contains(record.id()) {
            store.select(record.clone());
            selected += 1;
        } else {
            store.deselect(record.id());
        }
    }

    debug!(
        "Reconciled page of {} records: {} selected, {} total",
        page.len(),
        selected,
        store.selected_count()
    );
}
