//! find404-crawler: a broken-link finder
//!
//! This crate crawls a website from a set of seed URLs, following every link
//! that falls inside a regex-defined scope, and records for each visited page
//! which links it points to and whether those links are in scope. The
//! resulting newline-delimited JSON log is the raw material for spotting
//! outbound links that lead to 404 pages.

pub mod config;
pub mod crawler;
pub mod output;
pub mod report;
pub mod url;

use thiserror::Error;

/// Main error type for crawl operations
///
/// Every per-URL failure ends up here. The crawl loop logs it together with
/// the URL being processed and moves on to the next frontier entry.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Browser error: {0}")]
    Browser(#[from] crawler::BrowserError),

    #[error("Report error: {0}")]
    Report(#[from] report::ReportError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),
}

/// Configuration-specific errors
///
/// These are the only errors allowed to abort a run, and they all surface
/// before the first page is fetched.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid scope pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Result type alias for crawl operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlEngine, HttpBrowser};
pub use output::{CrawlStats, NdjsonSink};
pub use report::{LinkInfo, UrlReport};
pub use crate::url::{strip_fragment, Scope};
