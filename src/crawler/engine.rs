//! Crawl engine - main crawl orchestration logic
//!
//! This module contains the traversal loop. For each URL taken off the
//! frontier it:
//! - Opens a page in the browser and loads the URL
//! - Reads every anchor on the page
//! - Classifies each href against the scope and records it in the page report
//! - Offers the fragment-less href to the frontier
//! - Hands the finished report to the sink
//!
//! Exactly one page is processed at a time.

use crate::config::DEFAULT_PAGE_TIMEOUT_SECS;
use crate::crawler::browser::{Browser, Page};
use crate::crawler::frontier::{Frontier, QueueOutcome};
use crate::output::{CrawlStats, ReportSink};
use crate::report::UrlReport;
use crate::url::{strip_fragment, Scope};
use crate::CrawlError;
use std::time::{Duration, Instant};

/// How a page load ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PageLoad {
    Loaded,
    TimedOut,
}

/// Main crawl engine
///
/// Owns the visited set and frontier. The browser is shared across the whole
/// run; every page it hands out is closed before [`CrawlEngine::handle_url`]
/// returns.
pub struct CrawlEngine<B: Browser, S: ReportSink> {
    browser: B,
    sink: S,
    scope: Scope,
    frontier: Frontier,
    page_timeout: Duration,
    stats: CrawlStats,
}

impl<B: Browser, S: ReportSink> CrawlEngine<B, S> {
    /// Creates a new engine with the default page timeout
    ///
    /// # Arguments
    ///
    /// * `browser` - Loads pages and extracts their anchors
    /// * `sink` - Receives one report per processed page
    /// * `scope` - Decides which discovered URLs are crawled
    pub fn new(browser: B, sink: S, scope: Scope) -> Self {
        Self {
            browser,
            sink,
            scope,
            frontier: Frontier::new(),
            page_timeout: Duration::from_secs(DEFAULT_PAGE_TIMEOUT_SECS),
            stats: CrawlStats::default(),
        }
    }

    /// Sets how long a page may take to load
    pub fn with_page_timeout(mut self, page_timeout: Duration) -> Self {
        self.page_timeout = page_timeout;
        self
    }

    /// Offers a URL to the frontier
    ///
    /// A URL seen before is ignored. Otherwise it is recorded as known and,
    /// if the scope accepts it, queued for processing.
    pub fn queue_url(&mut self, url: &str) -> QueueOutcome {
        let scope = &self.scope;
        let outcome = self.frontier.discover(url, |candidate| scope.evaluate(candidate));

        match outcome {
            QueueOutcome::Queued => tracing::info!("Found new URL: {}", url),
            QueueOutcome::OutOfScope => tracing::debug!("Found new URL out of scope: {}", url),
            QueueOutcome::AlreadyKnown => {}
        }

        outcome
    }

    /// Processes a single URL
    ///
    /// A load that hits the page timeout is not an error: the page is
    /// reported with no links and the crawl goes on. Any other failure is
    /// returned and no report is emitted for the URL.
    ///
    /// # Returns
    ///
    /// * `Ok(UrlReport)` - The report that was handed to the sink
    /// * `Err(CrawlError)` - The page could not be processed
    pub async fn handle_url(&mut self, url: &str) -> Result<UrlReport, CrawlError> {
        let mut report = UrlReport::new(url);
        let mut page = self.browser.new_page().await?;

        let load = self.visit(&mut page, &mut report).await;
        if let Err(e) = page.close().await {
            tracing::warn!("Failed to close page for {}: {}", url, e);
        }

        if load? == PageLoad::TimedOut {
            self.stats.pages_timed_out += 1;
        }

        self.sink.emit(&report)?;
        self.stats.links_recorded += report.len() as u64;

        Ok(report)
    }

    /// Loads the page and records its links
    async fn visit(
        &mut self,
        page: &mut B::Page,
        report: &mut UrlReport,
    ) -> Result<PageLoad, CrawlError> {
        match page.goto(report.url(), self.page_timeout).await {
            Ok(()) => {}
            Err(e) if e.is_timeout() => {
                tracing::warn!("Timeout while loading {}", report.url());
                return Ok(PageLoad::TimedOut);
            }
            Err(e) => return Err(e.into()),
        }

        for anchor in page.query_anchors().await? {
            let Some(href) = anchor.href.filter(|href| !href.is_empty()) else {
                continue;
            };

            let in_scope = self.scope.evaluate(&href);
            if let Err(e) = report.add_link(href.as_str(), in_scope) {
                tracing::debug!("{}", e);
                continue;
            }

            self.queue_url(strip_fragment(&href));
        }

        Ok(PageLoad::Loaded)
    }

    /// Crawls from the given seed URLs until the frontier is empty
    ///
    /// Errors on individual URLs are logged and skipped; they never stop the
    /// crawl.
    ///
    /// # Returns
    ///
    /// The run statistics. Calling `crawl` again continues from the current
    /// state, so URLs from an earlier call are not fetched again.
    pub async fn crawl<I, U>(&mut self, seeds: I) -> CrawlStats
    where
        I: IntoIterator<Item = U>,
        U: AsRef<str>,
    {
        let start_time = Instant::now();

        for seed in seeds {
            self.queue_url(seed.as_ref());
        }

        while let Some(url) = self.frontier.pop() {
            tracing::info!("Crawling {}", url);
            self.stats.pages_crawled += 1;

            if let Err(e) = self.handle_url(&url).await {
                self.stats.pages_failed += 1;
                tracing::error!("Encountered error while handling URL '{}': {}", url, e);
            }

            // Progress reporting every 10 pages
            if self.stats.pages_crawled % 10 == 0 {
                let elapsed = start_time.elapsed();
                tracing::info!(
                    "Progress: {} pages crawled, {} in frontier, {:.2} pages/sec",
                    self.stats.pages_crawled,
                    self.frontier.len(),
                    self.stats.pages_crawled as f64 / elapsed.as_secs_f64()
                );
            }
        }

        self.stats.urls_known = self.frontier.visited().len() as u64;
        self.stats.urls_out_of_scope = self.frontier.out_of_scope_count() as u64;
        self.stats.elapsed += start_time.elapsed();

        tracing::info!(
            "Crawl completed: {} pages crawled, {} URLs discovered in {:?}",
            self.stats.pages_crawled,
            self.stats.urls_known,
            start_time.elapsed()
        );

        self.stats.clone()
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    pub fn stats(&self) -> &CrawlStats {
        &self.stats
    }

    pub fn page_timeout(&self) -> Duration {
        self.page_timeout
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Consumes the engine, returning its sink
    pub fn into_sink(self) -> S {
        self.sink
    }
}
