//! Page change notification
//!
//! The core never owns URL or history state. It reports the current 0-based
//! page index through a [`PageChangeNotifier`] and the shell decides what to
//! do with it.

use std::sync::Mutex;
use std::sync::PoisonError;

use tokio::sync::watch;
use url::Url;

use crate::query::PAGE_PARAM;
use crate::query::set_page_param;

/// Receives the current 0-based page index whenever it changes.
pub trait PageChangeNotifier: Send + Sync {
    /// Called after the displayed page changed.
    fn page_changed(&self, page_index: usize);
}

impl<F> PageChangeNotifier for F
where
    F: Fn(usize) + Send + Sync,
{
    fn page_changed(&self, page_index: usize) {
        self(page_index)
    }
}

/// Discards page changes.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

impl PageChangeNotifier for NoopNotifier {
    fn page_changed(&self, _page_index: usize) {}
}

/// Publishes the page index on a `tokio::sync::watch` channel.
///
/// # Example
///
/// ```
/// use gallery_lib::notify::{PageChangeNotifier, WatchNotifier};
///
/// let notifier = WatchNotifier::new(0);
/// let receiver = notifier.subscribe();
///
/// notifier.page_changed(3);
/// assert_eq!(*receiver.borrow(), 3);
/// ```
#[derive(Debug)]
pub struct WatchNotifier {
    sender: watch::Sender<usize>,
}

impl WatchNotifier {
    /// Creates a notifier holding `initial` as the current index.
    pub fn new(initial: usize) -> Self {
        let (sender, _) = watch::channel(initial);
        Self { sender }
    }

    /// Returns a receiver observing page index changes.
    pub fn subscribe(&self) -> watch::Receiver<usize> {
        self.sender.subscribe()
    }

    /// Returns the last published index.
    pub fn current(&self) -> usize {
        *self.sender.borrow()
    }
}

impl PageChangeNotifier for WatchNotifier {
    fn page_changed(&self, page_index: usize) {
        self.sender.send_replace(page_index);
    }
}

/// Keeps a URL's page query parameter in sync with the current page.
///
/// # Example
///
/// ```
/// use url::Url;
/// use gallery_lib::notify::{PageChangeNotifier, QueryStringNotifier};
///
/// let notifier = QueryStringNotifier::new(Url::parse("https://example.org/browse").unwrap());
/// notifier.page_changed(4);
///
/// assert_eq!(notifier.url().as_str(), "https://example.org/browse?page=5");
/// ```
#[derive(Debug)]
pub struct QueryStringNotifier {
    url: Mutex<Url>,
    param: String,
}

impl QueryStringNotifier {
    /// Creates a notifier that writes the default `page` parameter.
    pub fn new(url: Url) -> Self {
        Self {
            url: Mutex::new(url),
            param: PAGE_PARAM.to_string(),
        }
    }

    /// Uses a custom parameter name.
    pub fn with_param(mut self, param: impl Into<String>) -> Self {
        self.param = param.into();
        self
    }

    /// Returns a copy of the current URL.
    pub fn url(&self) -> Url {
        self.url
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl PageChangeNotifier for QueryStringNotifier {
    fn page_changed(&self, page_index: usize) {
        let mut url = self.url.lock().unwrap_or_else(PoisonError::into_inner);
        set_page_param(&mut url, &self.param, page_index);
    }
}
