//! Page data sources
//!
//! A [`PageDataSource`] turns a 1-based page number into a [`Page`]. The
//! transport is entirely its concern; the selection and pagination core only
//! ever sees pages or [`FetchError`]s.

mod config;
mod http;
mod memory;

use std::sync::Arc;

use async_trait::async_trait;

pub use config::*;
pub use http::*;
pub use memory::*;

use crate::error::FetchError;
use crate::model::Page;

/// Trait for fetching pages of records.
///
/// Implementations must be safe to share; the core issues at most one
/// outstanding fetch at a time but may hold the source across awaits.
#[async_trait]
pub trait PageDataSource: Send + Sync {
    /// Fetches the page with the given 1-based number.
    async fn fetch_page(&self, page_number: usize) -> Result<Page, FetchError>;
}

#[async_trait]
impl<T: PageDataSource + ?Sized> PageDataSource for Arc<T> {
    async fn fetch_page(&self, page_number: usize) -> Result<Page, FetchError> {
        (**self).fetch_page(page_number).await
    }
}

#[async_trait]
impl<T: PageDataSource + ?Sized> PageDataSource for Box<T> {
    async fn fetch_page(&self, page_number: usize) -> Result<Page, FetchError> {
        (**self).fetch_page(page_number).await
    }
}
