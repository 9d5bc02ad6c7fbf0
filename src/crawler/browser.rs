//! Browser capability used by the crawl engine
//!
//! The engine never talks to the network itself. It asks a [`Browser`] for a
//! fresh [`Page`], navigates it, reads the anchors it finds and closes it. A
//! browser is shared for the whole run, pages live for a single URL.

use std::time::Duration;
use thiserror::Error;

/// Errors reported by a browser or one of its pages
#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("Timed out after {timeout:?} while loading {url}")]
    Timeout { url: String, timeout: Duration },

    #[error("Invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: ::url::ParseError,
    },

    #[error("HTTP error for {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("No document is loaded in this page")]
    PageNotLoaded,
}

impl BrowserError {
    /// Returns true for a page load that ran out of time
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

/// An anchor element found on a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    /// The resolved `href`, or `None` if the element has no `href` attribute
    pub href: Option<String>,
}

impl Anchor {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: Some(href.into()),
        }
    }

    /// An anchor without an `href` attribute
    pub fn without_href() -> Self {
        Self { href: None }
    }
}

/// A browsing session able to open pages
#[allow(async_fn_in_trait)]
pub trait Browser {
    type Page: Page;

    /// Opens a new, empty page
    async fn new_page(&self) -> Result<Self::Page, BrowserError>;
}

/// A single page of a browsing session
#[allow(async_fn_in_trait)]
pub trait Page {
    /// Navigates to `url` and waits until its content is loaded
    ///
    /// Returns [`BrowserError::Timeout`] if loading takes longer than `timeout`.
    async fn goto(&mut self, url: &str, timeout: Duration) -> Result<(), BrowserError>;

    /// Returns every anchor element of the loaded document, in document order
    async fn query_anchors(&self) -> Result<Vec<Anchor>, BrowserError>;

    /// Releases the page
    async fn close(&mut self) -> Result<(), BrowserError>;
}
