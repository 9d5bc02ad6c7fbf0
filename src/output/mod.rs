//! Output module for crawl reports and statistics
//!
//! This module handles:
//! - Delivering page reports to a sink (the NDJSON crawl log, or memory)
//! - Reading a crawl log back
//! - Run statistics and log summaries

mod ndjson;
pub mod stats;
mod traits;

pub use ndjson::{read_reports, NdjsonSink, CRAWL_LOG_FILE_NAME};
pub use stats::{print_crawl_stats, print_log_summary, CrawlStats, LogSummary};
pub use traits::{MemorySink, OutputError, OutputResult, ReportSink};

use std::path::Path;

/// Reads the crawl log in `output_folder` and summarises it
///
/// # Returns
///
/// * `Ok(LogSummary)` - Summary of every report in the log
/// * `Err(OutputError)` - The log is missing or malformed
pub fn summarize_log(output_folder: &Path) -> OutputResult<LogSummary> {
    let path = output_folder.join(CRAWL_LOG_FILE_NAME);
    tracing::debug!("Reading crawl log from {}", path.display());

    let reports = read_reports(&path)?;
    Ok(LogSummary::from_reports(&reports))
}
