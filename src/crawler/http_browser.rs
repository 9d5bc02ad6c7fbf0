//! HTTP-backed browser implementation
//!
//! This module loads pages with a plain HTTP client and extracts anchors from
//! the returned HTML. It does not run scripts, so anchors inserted by
//! JavaScript are not seen.
//!
//! Like a real browser, an HTTP error status is not a navigation failure: the
//! error page is loaded and its anchors are reported. The status is logged,
//! with 404s at warn level since those are what a crawl is looking for.

use crate::config::CrawlerConfig;
use crate::crawler::browser::{Anchor, Browser, BrowserError, Page};
use crate::crawler::parser::extract_anchors;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use url::Url;

/// Browser that fetches pages over HTTP
#[derive(Debug, Clone)]
pub struct HttpBrowser {
    client: Client,
}

impl HttpBrowser {
    /// Creates a browser with its own HTTP client
    ///
    /// # Example
    ///
    /// ```no_run
    /// use find404_crawler::config::CrawlerConfig;
    /// use find404_crawler::crawler::HttpBrowser;
    ///
    /// let browser = HttpBrowser::new(&CrawlerConfig::default()).unwrap();
    /// ```
    pub fn new(config: &CrawlerConfig) -> Result<Self, BrowserError> {
        Ok(Self {
            client: build_http_client(&config.user_agent)?,
        })
    }

    /// Creates a browser around an existing HTTP client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

/// Builds the HTTP client shared by all pages
///
/// No overall request timeout is set here; the page timeout passed to
/// [`Page::goto`] bounds each load.
pub fn build_http_client(user_agent: &str) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

impl Browser for HttpBrowser {
    type Page = HttpPage;

    async fn new_page(&self) -> Result<HttpPage, BrowserError> {
        Ok(HttpPage {
            client: self.client.clone(),
            document: None,
        })
    }
}

/// A document loaded into a page
#[derive(Debug)]
struct LoadedDocument {
    /// Final URL after redirects
    url: Url,
    status: StatusCode,
    body: String,
}

/// A page of an [`HttpBrowser`]
#[derive(Debug)]
pub struct HttpPage {
    client: Client,
    document: Option<LoadedDocument>,
}

impl HttpPage {
    /// HTTP status of the loaded document, if any
    pub fn status(&self) -> Option<StatusCode> {
        self.document.as_ref().map(|document| document.status)
    }

    /// Final URL of the loaded document after redirects, if any
    pub fn final_url(&self) -> Option<&Url> {
        self.document.as_ref().map(|document| &document.url)
    }

    async fn load(&self, url: &Url) -> Result<LoadedDocument, BrowserError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| http_error(url, source))?;

        let status = response.status();
        let final_url = response.url().clone();

        if status == StatusCode::NOT_FOUND {
            tracing::warn!("{} returned HTTP 404", url);
        } else if !status.is_success() {
            tracing::info!("{} returned HTTP {}", url, status.as_u16());
        }

        let body = response
            .text()
            .await
            .map_err(|source| http_error(url, source))?;

        Ok(LoadedDocument {
            url: final_url,
            status,
            body,
        })
    }
}

impl Page for HttpPage {
    async fn goto(&mut self, url: &str, timeout: Duration) -> Result<(), BrowserError> {
        let parsed = Url::parse(url).map_err(|source| BrowserError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        self.document = None;
        let document = tokio::time::timeout(timeout, self.load(&parsed))
            .await
            .map_err(|_| BrowserError::Timeout {
                url: url.to_string(),
                timeout,
            })?
            .map_err(|err| match err {
                BrowserError::Http { source, .. } if source.is_timeout() => {
                    BrowserError::Timeout {
                        url: url.to_string(),
                        timeout,
                    }
                }
                other => other,
            })?;

        tracing::debug!(
            "Loaded {} ({} bytes, HTTP {})",
            document.url,
            document.body.len(),
            document.status.as_u16()
        );
        self.document = Some(document);
        Ok(())
    }

    async fn query_anchors(&self) -> Result<Vec<Anchor>, BrowserError> {
        let document = self.document.as_ref().ok_or(BrowserError::PageNotLoaded)?;
        Ok(extract_anchors(&document.body, &document.url))
    }

    async fn close(&mut self) -> Result<(), BrowserError> {
        self.document = None;
        Ok(())
    }
}

fn http_error(url: &Url, source: reqwest::Error) -> BrowserError {
    BrowserError::Http {
        url: url.to_string(),
        source,
    }
}
