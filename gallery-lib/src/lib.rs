//! Paginated record browsing with cross-page selection
//!
//! An embeddable core for a table of server-paged records: the user checks
//! rows on whatever page is displayed, the selection survives page changes,
//! and "select the first N" fetches as many pages as needed to cover N.
//!
//! Rendering and transport stay outside. Pages come from a
//! [`source::PageDataSource`]; page index changes go out through a
//! [`notify::PageChangeNotifier`].

pub mod browser;
pub mod error;
pub mod model;
pub mod notify;
pub mod pagination;
pub mod query;
pub mod selection;
pub mod source;

pub use browser::BrowserConfig;
pub use browser::RecordBrowser;
