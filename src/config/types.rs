use serde::Deserialize;
use std::path::PathBuf;

/// Default page load timeout in seconds
pub const DEFAULT_PAGE_TIMEOUT_SECS: u64 = 120;

/// Main configuration structure
///
/// Every section and field is optional in the TOML file; missing values take
/// their defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub scope: ScopeConfig,
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CrawlerConfig {
    /// How long to wait for a page's content to load (seconds)
    #[serde(rename = "page-timeout-secs")]
    pub page_timeout_secs: u64,

    /// User agent sent with every page request
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            page_timeout_secs: DEFAULT_PAGE_TIMEOUT_SECS,
            user_agent: format!("find404-crawler/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Scope patterns in addition to the seed URLs
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScopeConfig {
    /// Extra allowed patterns, appended after the escaped seed URLs
    pub allowed: Vec<String>,

    /// Forbidden patterns; a match excludes a URL even if it is allowed
    pub forbidden: Vec<String>,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Folder receiving `crawl-log.ndjson`
    pub folder: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            folder: PathBuf::from("."),
        }
    }
}
