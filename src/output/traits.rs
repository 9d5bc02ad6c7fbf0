//! Report sink trait and output errors
//!
//! A report sink receives one finalized [`UrlReport`] per processed page, in
//! the order pages were processed.

use crate::report::UrlReport;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Malformed report on line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Trait for report sinks
///
/// The crawl engine calls [`ReportSink::emit`] exactly once for every page it
/// finishes, including pages whose load timed out.
pub trait ReportSink {
    /// Records a finalized page report
    ///
    /// # Arguments
    ///
    /// * `report` - The report of a processed page
    fn emit(&mut self, report: &UrlReport) -> OutputResult<()>;
}

impl<S: ReportSink + ?Sized> ReportSink for &mut S {
    fn emit(&mut self, report: &UrlReport) -> OutputResult<()> {
        (**self).emit(report)
    }
}

impl<S: ReportSink + ?Sized> ReportSink for Box<S> {
    fn emit(&mut self, report: &UrlReport) -> OutputResult<()> {
        (**self).emit(report)
    }
}

/// Sink that keeps every report in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    reports: Vec<UrlReport>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports received so far, in emission order
    pub fn reports(&self) -> &[UrlReport] {
        &self.reports
    }

    /// Finds the report for a page
    pub fn report_for(&self, url: &str) -> Option<&UrlReport> {
        self.reports.iter().find(|report| report.url() == url)
    }

    pub fn into_reports(self) -> Vec<UrlReport> {
        self.reports
    }
}

impl ReportSink for MemorySink {
    fn emit(&mut self, report: &UrlReport) -> OutputResult<()> {
        self.reports.push(report.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_keeps_order() {
        let mut sink = MemorySink::new();
        sink.emit(&UrlReport::new("https://x.com/b")).unwrap();
        sink.emit(&UrlReport::new("https://x.com/a")).unwrap();

        let urls: Vec<&str> = sink.reports().iter().map(|r| r.url()).collect();
        assert_eq!(urls, vec!["https://x.com/b", "https://x.com/a"]);
        assert!(sink.report_for("https://x.com/a").is_some());
        assert!(sink.report_for("https://x.com/c").is_none());
    }

    #[test]
    fn test_sink_through_mutable_reference() {
        fn emit_twice<S: ReportSink>(mut sink: S) {
            sink.emit(&UrlReport::new("https://x.com")).unwrap();
            sink.emit(&UrlReport::new("https://x.com/a")).unwrap();
        }

        let mut sink = MemorySink::new();
        emit_twice(&mut sink);
        assert_eq!(sink.into_reports().len(), 2);
    }

    #[test]
    fn test_boxed_sink() {
        let mut sink: Box<dyn ReportSink> = Box::new(MemorySink::new());
        assert!(sink.emit(&UrlReport::new("https://x.com")).is_ok());
    }
}
