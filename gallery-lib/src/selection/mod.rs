//! Cross-page selection
//!
//! [`SelectionStore`] is the single page-independent record of what the user
//! selected. It is mutated by exactly two paths: [`reconcile_page`] for
//! checkbox changes on the visible page, and [`BulkSelector`] for "first N"
//! requests that may span pages that were never displayed.

mod bulk;
mod reconcile;
mod store;

pub use bulk::*;
pub use reconcile::*;
pub use store::*;
