//! Configuration module
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Command-line options are applied on top of it.
//!
//! # Example
//!
//! ```no_run
//! use find404_crawler::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("find404.toml")).unwrap();
//! println!("Writing the crawl log to {}", config.output.folder.display());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, OutputConfig, ScopeConfig, DEFAULT_PAGE_TIMEOUT_SECS};

// Re-export parser functions
pub use parser::{load_config, parse_config};
pub use validation::{validate, validate_seeds};

use std::time::Duration;

impl CrawlerConfig {
    /// The page load timeout as a `Duration`
    pub fn page_timeout(&self) -> Duration {
        Duration::from_secs(self.page_timeout_secs)
    }
}
