//! Crawl statistics
//!
//! [`CrawlStats`] is accumulated by the crawl engine while it runs.
//! [`LogSummary`] is computed afterwards from the reports in a crawl log.

use crate::report::UrlReport;
use std::collections::BTreeSet;
use std::time::Duration;

/// Counters for a single crawl run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStats {
    /// Pages taken off the frontier and handed to the browser
    pub pages_crawled: u64,

    /// Pages whose load hit the page timeout (reported with no links)
    pub pages_timed_out: u64,

    /// Pages that failed with an error and produced no report
    pub pages_failed: u64,

    /// Links recorded across all emitted reports
    pub links_recorded: u64,

    /// Distinct URLs discovered, seeds included
    pub urls_known: u64,

    /// Distinct URLs discovered outside the crawl scope
    pub urls_out_of_scope: u64,

    /// Wall-clock time of the run
    pub elapsed: Duration,
}

impl CrawlStats {
    /// Number of reports handed to the sink
    pub fn reports_emitted(&self) -> u64 {
        self.pages_crawled - self.pages_failed
    }
}

/// Prints run statistics to stdout
pub fn print_crawl_stats(stats: &CrawlStats) {
    println!("=== Crawl Statistics ===\n");
    println!("  Pages crawled: {}", stats.pages_crawled);
    println!("  Reports written: {}", stats.reports_emitted());
    println!("  Timed out: {}", stats.pages_timed_out);
    println!("  Failed: {}", stats.pages_failed);
    println!("  Links recorded: {}", stats.links_recorded);
    println!(
        "  URLs discovered: {} ({} out of scope)",
        stats.urls_known, stats.urls_out_of_scope
    );
    println!("  Elapsed: {:.1}s", stats.elapsed.as_secs_f64());
}

/// Summary of an existing crawl log
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogSummary {
    /// Number of page reports
    pub pages: u64,

    /// Reports without any link (empty pages or load timeouts)
    pub pages_without_links: u64,

    /// Total number of recorded links
    pub total_links: u64,

    /// Recorded links that were in scope
    pub in_scope_links: u64,

    /// Recorded links that were out of scope
    pub out_of_scope_links: u64,

    /// Distinct out-of-scope link targets, sorted
    pub out_of_scope_targets: Vec<String>,
}

impl LogSummary {
    /// Builds a summary from crawl reports
    pub fn from_reports(reports: &[UrlReport]) -> Self {
        let mut summary = LogSummary::default();
        let mut targets = BTreeSet::new();

        for report in reports {
            summary.pages += 1;
            if report.is_empty() {
                summary.pages_without_links += 1;
            }

            for link in report.links() {
                summary.total_links += 1;
                if link.in_scope {
                    summary.in_scope_links += 1;
                } else {
                    summary.out_of_scope_links += 1;
                    targets.insert(link.url.clone());
                }
            }
        }

        summary.out_of_scope_targets = targets.into_iter().collect();
        summary
    }
}

/// Prints a log summary to stdout
pub fn print_log_summary(summary: &LogSummary) {
    println!("=== Crawl Log Summary ===\n");

    println!("Overview:");
    println!("  Pages reported: {}", summary.pages);
    println!("  Pages without links: {}", summary.pages_without_links);
    println!("  Links recorded: {}", summary.total_links);
    println!("  In scope: {}", summary.in_scope_links);
    println!("  Out of scope: {}", summary.out_of_scope_links);
    println!();

    if !summary.out_of_scope_targets.is_empty() {
        println!(
            "Out-of-scope targets to check ({}):",
            summary.out_of_scope_targets.len()
        );
        for target in &summary.out_of_scope_targets {
            println!("  - {}", target);
        }
    }
}
