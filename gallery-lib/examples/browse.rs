//! Browse the artworks API: show a page, select across pages, bulk select.
//!
//! Run: `cargo run -p gallery-lib --example browse -- 30`

use std::env;
use std::time::Duration;

use gallery_lib::browser::BrowserConfig;
use gallery_lib::browser::BulkSelect;
use gallery_lib::browser::PageLoad;
use gallery_lib::browser::RecordBrowser;
use gallery_lib::source::HttpPageSource;
use gallery_lib::source::SourceConfig;
use simplelog::Config;
use simplelog::LevelFilter;
use simplelog::SimpleLogger;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    SimpleLogger::init(LevelFilter::Debug, Config::default())?;

    let count = env::args().nth(1).unwrap_or_else(|| "20".to_string());

    let source = HttpPageSource::new(
        SourceConfig::default()
            .with_fields(["id", "title", "artist_display", "place_of_origin"])
            .with_timeout(Duration::from_secs(30)),
    )?;
    let mut browser = RecordBrowser::new(source, BrowserConfig::default());

    if browser.start().await != PageLoad::Loaded {
        eprintln!("{}", browser.error_message().unwrap_or("Failed to load"));
        return Ok(());
    }

    for record in browser.visible_records() {
        println!(
            "{:>8}  {:<40}  {:<30}  {}",
            record.id(),
            record.title_or_placeholder(),
            record.attribution_or_placeholder().lines().next().unwrap_or_default(),
            record.origin_or_placeholder()
        );
    }

    browser.set_bulk_input(count);
    match browser.apply_bulk_input().await {
        BulkSelect::Applied(outcome) => println!(
            "{:?} {} records ({} pages fetched)",
            outcome.direction, outcome.affected, outcome.pages_fetched
        ),
        BulkSelect::Failed => eprintln!("{}", browser.error_message().unwrap_or_default()),
        other => println!("Bulk selection skipped: {:?}", other),
    }

    let state = browser.pagination();
    println!(
        "Total Items Selected: {} (page {} of {})",
        browser.selected_count(),
        state.current_page_number(),
        state.page_count()
    );

    Ok(())
}
