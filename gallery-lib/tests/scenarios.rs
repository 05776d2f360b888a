//! End-to-end browsing scenarios against a scripted page source.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use gallery_lib::browser::BrowserConfig;
use gallery_lib::browser::BulkSelect;
use gallery_lib::browser::PageLoad;
use gallery_lib::browser::RecordBrowser;
use gallery_lib::error::BULK_SELECT_ERROR;
use gallery_lib::error::FetchError;
use gallery_lib::error::PAGE_LOAD_ERROR;
use gallery_lib::model::Page;
use gallery_lib::model::Record;
use gallery_lib::model::RecordId;
use gallery_lib::notify::PageChangeNotifier;
use gallery_lib::notify::QueryStringNotifier;
use gallery_lib::notify::WatchNotifier;
use gallery_lib::selection::BulkDirection;
use gallery_lib::selection::PageSelection;
use gallery_lib::source::PageDataSource;
use simplelog::Config;
use simplelog::LevelFilter;
use simplelog::TestLogger;
use tokio::time::timeout;
use url::Url;

fn init_logging() {
    let _ = TestLogger::init(LevelFilter::Debug, Config::default());
}

/// A page source whose data, page size and failures can change mid-test.
struct ScriptedSource {
    records: Mutex<Vec<Record>>,
    page_size: Mutex<usize>,
    failing: Mutex<HashSet<usize>>,
    slow: Mutex<HashSet<usize>>,
    requested: Mutex<Vec<usize>>,
}

impl ScriptedSource {
    fn new(total: u64, page_size: usize) -> Arc<Self> {
        Arc::new(Self {
            records: Mutex::new(
                (1..=total)
                    .map(|id| Record::new(id).with_title(format!("Artwork {id}")))
                    .collect(),
            ),
            page_size: Mutex::new(page_size),
            failing: Mutex::new(HashSet::new()),
            slow: Mutex::new(HashSet::new()),
            requested: Mutex::new(Vec::new()),
        })
    }

    fn fail_page(&self, page_number: usize) {
        self.failing.lock().unwrap().insert(page_number);
    }

    fn recover_page(&self, page_number: usize) {
        self.failing.lock().unwrap().remove(&page_number);
    }

    fn slow_page(&self, page_number: usize) {
        self.slow.lock().unwrap().insert(page_number);
    }

    fn set_page_size(&self, page_size: usize) {
        *self.page_size.lock().unwrap() = page_size;
    }

    fn remove_record(&self, id: u64) {
        self.records.lock().unwrap().retain(|r| r.id() != RecordId(id));
    }

    /// Returns and resets the page numbers requested so far.
    fn take_requested(&self) -> Vec<usize> {
        std::mem::take(&mut *self.requested.lock().unwrap())
    }
}

#[async_trait]
impl PageDataSource for ScriptedSource {
    async fn fetch_page(&self, page_number: usize) -> Result<Page, FetchError> {
        self.requested.lock().unwrap().push(page_number);
        let slow = self.slow.lock().unwrap().contains(&page_number);
        if slow {
            tokio::time::sleep(Duration::from_secs(10)).await;
        }
        if self.failing.lock().unwrap().contains(&page_number) {
            return Err(FetchError::http(503, "Service Unavailable"));
        }

        let records = self.records.lock().unwrap();
        let size = *self.page_size.lock().unwrap();
        let start = ((page_number - 1) * size).min(records.len());
        let end = (start + size).min(records.len());

        Ok(Page::new(records[start..end].to_vec(), size, records.len()))
    }
}

fn visible_ids(browser: &RecordBrowser<Arc<ScriptedSource>>) -> Vec<u64> {
    browser.visible_records().iter().map(|r| r.id().get()).collect()
}

fn selected_on_page_ids(browser: &RecordBrowser<Arc<ScriptedSource>>) -> Vec<u64> {
    browser.selected_on_page().iter().map(|r| r.id().get()).collect()
}

fn ids(range: std::ops::RangeInclusive<u64>) -> Vec<RecordId> {
    range.map(RecordId).collect()
}

#[tokio::test]
async fn test_selection_survives_page_changes() {
    init_logging();
    let source = ScriptedSource::new(40, 12);
    let mut browser = RecordBrowser::new(source.clone(), BrowserConfig::default());

    assert_eq!(browser.start().await, PageLoad::Loaded);
    assert_eq!(visible_ids(&browser), (1..=12).collect::<Vec<_>>());

    browser.select_on_page(&PageSelection::from_ids([RecordId(2), RecordId(5)]));

    assert_eq!(browser.go_to_page(1).await, PageLoad::Loaded);
    assert_eq!(visible_ids(&browser), (13..=24).collect::<Vec<_>>());
    assert!(selected_on_page_ids(&browser).is_empty());

    assert_eq!(browser.go_to_page(0).await, PageLoad::Loaded);
    assert_eq!(selected_on_page_ids(&browser), vec![2, 5]);
    assert_eq!(browser.selected_count(), 2);
}

#[tokio::test]
async fn test_reconciliation_does_not_touch_other_pages() {
    init_logging();
    let source = ScriptedSource::new(30, 10);
    let mut browser = RecordBrowser::new(source, BrowserConfig::default());

    browser.start().await;
    browser.toggle_page_header(true);
    browser.go_to_page(1).await;
    browser.select_on_page(&PageSelection::from_ids([RecordId(11), RecordId(20)]));
    browser.select_on_page(&PageSelection::from_ids([RecordId(12)]));

    let mut expected = ids(1..=10);
    expected.push(RecordId(12));
    assert_eq!(browser.selection().selected_ids(), expected);
}

#[tokio::test]
async fn test_bulk_select_fetches_only_needed_pages() {
    init_logging();
    let source = ScriptedSource::new(100, 10);
    let mut browser = RecordBrowser::new(source.clone(), BrowserConfig::default());
    browser.start().await;
    source.take_requested();

    let result = browser.bulk_select(25).await;

    assert_eq!(source.take_requested(), vec![1, 2, 3]);
    assert!(matches!(
        result,
        BulkSelect::Applied(outcome) if outcome.affected == 25 && outcome.direction == BulkDirection::Select
    ));
    assert_eq!(browser.selection().selected_ids(), ids(1..=25));
    assert!(!browser.is_loading());
}

#[tokio::test]
async fn test_bulk_select_twice_clears_exactly_target() {
    init_logging();
    let source = ScriptedSource::new(50, 10);
    let mut browser = RecordBrowser::new(source, BrowserConfig::default());
    browser.start().await;

    browser.go_to_page(3).await;
    browser.toggle_row(RecordId(35));

    browser.bulk_select(15).await;
    assert_eq!(browser.selected_count(), 16);

    let result = browser.bulk_select(15).await;
    assert!(matches!(
        result,
        BulkSelect::Applied(outcome) if outcome.direction == BulkDirection::Deselect
    ));
    assert_eq!(browser.selection().selected_ids(), vec![RecordId(35)]);
}

#[tokio::test]
async fn test_bulk_select_mixed_target_selects_all() {
    init_logging();
    let source = ScriptedSource::new(30, 10);
    let mut browser = RecordBrowser::new(source, BrowserConfig::default());
    browser.start().await;
    browser.select_on_page(&PageSelection::from_ids([RecordId(1), RecordId(7)]));

    browser.bulk_select(8).await;

    assert_eq!(browser.selection().selected_ids(), ids(1..=8));
}

#[tokio::test]
async fn test_non_positive_bulk_is_a_no_op() {
    init_logging();
    let source = ScriptedSource::new(30, 10);
    let mut browser = RecordBrowser::new(source.clone(), BrowserConfig::default());
    browser.start().await;
    browser.toggle_row(RecordId(4));
    source.take_requested();
    let before = browser.selection().clone();

    assert_eq!(browser.bulk_select(0).await, BulkSelect::Ignored);
    assert_eq!(browser.bulk_select(-3).await, BulkSelect::Ignored);

    assert!(source.take_requested().is_empty());
    assert_eq!(*browser.selection(), before);
}

#[tokio::test]
async fn test_bulk_failure_leaves_selection_unchanged() {
    init_logging();
    let source = ScriptedSource::new(40, 10);
    let mut browser = RecordBrowser::new(source.clone(), BrowserConfig::default());
    browser.start().await;
    browser.toggle_row(RecordId(9));
    let before = browser.selection().clone();
    source.take_requested();
    source.fail_page(2);

    browser.set_bulk_input("15");
    assert_eq!(browser.apply_bulk_input().await, BulkSelect::Failed);

    assert_eq!(source.take_requested(), vec![1, 2]);
    assert_eq!(*browser.selection(), before);
    assert_eq!(browser.error_message(), Some(BULK_SELECT_ERROR));
    assert_eq!(browser.bulk_input(), "");
    assert!(!browser.is_loading());

    // The user retries once the server recovers.
    source.recover_page(2);
    assert!(matches!(
        browser.bulk_select(15).await,
        BulkSelect::Applied(_)
    ));
    assert_eq!(browser.error_message(), None);
    assert_eq!(browser.selected_count(), 15);
}

#[tokio::test]
async fn test_page_failure_keeps_last_good_page() {
    init_logging();
    let source = ScriptedSource::new(40, 10);
    let notifier = WatchNotifier::new(0);
    let pages = notifier.subscribe();
    let mut browser =
        RecordBrowser::new(source.clone(), BrowserConfig::default()).with_notifier(notifier);

    browser.start().await;
    browser.go_to_page(1).await;
    assert_eq!(*pages.borrow(), 1);

    source.fail_page(3);
    assert_eq!(browser.go_to_page(2).await, PageLoad::Failed);

    assert_eq!(browser.error_message(), Some(PAGE_LOAD_ERROR));
    assert_eq!(browser.pagination().current_page_index(), 1);
    assert_eq!(visible_ids(&browser), (11..=20).collect::<Vec<_>>());
    assert_eq!(*pages.borrow(), 1);
    assert!(!browser.is_loading());

    source.recover_page(3);
    assert_eq!(browser.go_to_page(2).await, PageLoad::Loaded);
    assert_eq!(browser.error_message(), None);
    assert_eq!(*pages.borrow(), 2);
}

#[tokio::test]
async fn test_server_page_size_is_authoritative() {
    init_logging();
    let source = ScriptedSource::new(100, 10);
    let mut browser = RecordBrowser::new(
        source.clone(),
        BrowserConfig::default().with_initial_rows_per_page(12),
    );
    assert_eq!(browser.pagination().rows_per_page(), 12);

    browser.start().await;
    assert_eq!(browser.pagination().rows_per_page(), 10);
    assert_eq!(browser.pagination().total_records(), 100);
    assert_eq!(browser.pagination().page_count(), 10);

    source.set_page_size(25);
    browser.go_to_page(1).await;
    assert_eq!(browser.pagination().rows_per_page(), 25);
    assert_eq!(browser.pagination().first_record_offset(), 25);
    assert_eq!(visible_ids(&browser), (26..=50).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_selections_outlive_source_records() {
    init_logging();
    let source = ScriptedSource::new(20, 10);
    let mut browser = RecordBrowser::new(source.clone(), BrowserConfig::default());
    browser.start().await;
    browser.toggle_row(RecordId(3));

    source.remove_record(3);
    browser.go_to_page(0).await;

    assert!(!visible_ids(&browser).contains(&3));
    assert!(browser.selection().is_selected(RecordId(3)));
    assert_eq!(
        browser.selection().get(RecordId(3)).and_then(Record::title),
        Some("Artwork 3")
    );
}

#[tokio::test]
async fn test_bulk_before_first_load_fetches_nothing() {
    init_logging();
    let source = ScriptedSource::new(20, 10);
    let mut browser = RecordBrowser::new(source.clone(), BrowserConfig::default());

    let result = browser.bulk_select(5).await;

    assert!(matches!(result, BulkSelect::Applied(outcome) if outcome.affected == 0));
    assert!(source.take_requested().is_empty());
    assert_eq!(browser.selected_count(), 0);
}

#[tokio::test]
async fn test_query_string_follows_page() {
    init_logging();
    let source = ScriptedSource::new(60, 10);
    let start = Url::parse("https://gallery.example/browse?view=table&page=3").unwrap();
    let initial = gallery_lib::query::page_index_from_url(&start);
    let notifier = Arc::new(QueryStringNotifier::new(start));

    let shell_view = notifier.clone();
    let mut browser = RecordBrowser::new(
        source,
        BrowserConfig::default().with_initial_page_index(initial),
    )
    .with_notifier(move |index: usize| notifier.page_changed(index));

    browser.start().await;
    assert_eq!(visible_ids(&browser), (21..=30).collect::<Vec<_>>());

    browser.go_to_page(4).await;
    assert_eq!(
        shell_view.url().as_str(),
        "https://gallery.example/browse?view=table&page=5"
    );
}

/// Reports one record per page with a page size of 0.
struct ZeroLimitSource;

#[async_trait]
impl PageDataSource for ZeroLimitSource {
    async fn fetch_page(&self, page_number: usize) -> Result<Page, FetchError> {
        Ok(Page::new(vec![Record::new(page_number as u64)], 0, 5))
    }
}

#[tokio::test]
async fn test_zero_page_size_is_a_failed_load() {
    init_logging();
    let mut browser = RecordBrowser::new(ZeroLimitSource, BrowserConfig::default());

    assert_eq!(browser.start().await, PageLoad::Failed);
    assert_eq!(browser.error_message(), Some(PAGE_LOAD_ERROR));
    assert_eq!(browser.pagination().rows_per_page(), 12);
    assert_eq!(browser.pagination().total_records(), 0);
    assert!(browser.visible_records().is_empty());

    let result = browser.bulk_select(7).await;
    assert!(matches!(
        result,
        BulkSelect::Applied(outcome) if outcome.pages_fetched == 0 && outcome.affected == 0
    ));
    assert_eq!(browser.selected_count(), 0);
}

#[tokio::test]
async fn test_dropped_page_load_does_not_block_retry() {
    init_logging();
    let source = ScriptedSource::new(40, 10);
    let mut browser = RecordBrowser::new(source.clone(), BrowserConfig::default());
    browser.start().await;
    source.slow_page(2);

    let abandoned = timeout(Duration::from_millis(50), browser.go_to_page(1)).await;
    assert!(abandoned.is_err());

    assert!(!browser.is_loading());
    assert_eq!(browser.pagination().current_page_index(), 0);
    assert_eq!(visible_ids(&browser), (1..=10).collect::<Vec<_>>());

    assert_eq!(browser.go_to_page(2).await, PageLoad::Loaded);
    assert_eq!(visible_ids(&browser), (21..=30).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_dropped_bulk_select_leaves_selection_and_allows_retry() {
    init_logging();
    let source = ScriptedSource::new(40, 10);
    let mut browser = RecordBrowser::new(source.clone(), BrowserConfig::default());
    browser.start().await;
    source.slow_page(2);

    let abandoned = timeout(Duration::from_millis(50), browser.bulk_select(15)).await;
    assert!(abandoned.is_err());

    assert!(!browser.is_loading());
    assert_eq!(browser.selected_count(), 0);
    assert_eq!(browser.go_to_page(0).await, PageLoad::Loaded);
    assert!(matches!(browser.bulk_select(5).await, BulkSelect::Applied(_)));
    assert_eq!(browser.selected_count(), 5);
}
