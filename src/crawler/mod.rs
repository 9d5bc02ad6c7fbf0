//! Crawler module for page loading and traversal
//!
//! This module contains the core crawling logic, including:
//! - The browser capability and its HTTP implementation
//! - Anchor extraction from HTML
//! - The visited set and LIFO frontier
//! - The crawl engine driving the traversal

mod browser;
mod engine;
mod frontier;
mod http_browser;
mod parser;

pub use browser::{Anchor, Browser, BrowserError, Page};
pub use engine::CrawlEngine;
pub use frontier::{Frontier, QueueOutcome};
pub use http_browser::{build_http_client, HttpBrowser, HttpPage};
pub use parser::extract_anchors;

use crate::config::Config;
use crate::output::{CrawlStats, NdjsonSink};
use crate::url::Scope;
use crate::CrawlError;

/// Runs a complete crawl operation
///
/// This is the main entry point used by the command line. It will:
/// 1. Build the scope from the seeds and the configured patterns
/// 2. Build the HTTP browser
/// 3. Open the crawl log in the output folder
/// 4. Crawl until the frontier is empty
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `seeds` - Seed URLs; each also becomes an allowed scope pattern
///
/// # Returns
///
/// * `Ok(CrawlStats)` - Crawl ran to frontier exhaustion
/// * `Err(CrawlError)` - Setup failed before the first page was fetched
///
/// # Example
///
/// ```no_run
/// use find404_crawler::config::Config;
/// use find404_crawler::crawler::run_crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let stats = run_crawl(&Config::default(), &["https://example.com"]).await?;
/// println!("{} pages crawled", stats.pages_crawled);
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl<S: AsRef<str>>(config: &Config, seeds: &[S]) -> Result<CrawlStats, CrawlError> {
    let scope = Scope::for_seeds(seeds, &config.scope.allowed, &config.scope.forbidden)?;
    let browser = HttpBrowser::new(&config.crawler)?;
    let sink = NdjsonSink::new(&config.output.folder)?;
    tracing::info!("Writing crawl log to {}", sink.path().display());

    let mut engine =
        CrawlEngine::new(browser, sink, scope).with_page_timeout(config.crawler.page_timeout());

    Ok(engine.crawl(seeds).await)
}
