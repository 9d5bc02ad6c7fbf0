//! Per-page report model
//!
//! A [`UrlReport`] is created when a URL is taken off the frontier, filled
//! with one [`LinkInfo`] per distinct href found on the page, and handed to a
//! report sink once the page is done. Its JSON form is one line of
//! `crawl-log.ndjson`:
//!
//! ```json
//! {"url": "https://x.com/", "links": {"https://x.com/about": {"url": "https://x.com/about", "in-scope": true}}}
//! ```

mod links;

use serde::de::Error as _;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashSet;
use thiserror::Error;

use links::{LinkEntries, LinkMap};

/// Errors raised while building a report
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReportError {
    #[error("Link {link} was already recorded for page {page}")]
    DuplicateLink { page: String, link: String },
}

/// Information about one link found on a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkInfo {
    /// The href as discovered on the page
    pub url: String,

    /// Whether the href was in crawl scope when it was discovered
    #[serde(rename = "in-scope")]
    pub in_scope: bool,
}

impl LinkInfo {
    pub fn new(url: impl Into<String>, in_scope: bool) -> Self {
        Self {
            url: url.into(),
            in_scope,
        }
    }
}

/// A report on a single visited URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlReport {
    url: String,
    links: Vec<LinkInfo>,
    seen: HashSet<String>,
}

impl UrlReport {
    /// Creates an empty report for the page at `url`
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            links: Vec::new(),
            seen: HashSet::new(),
        }
    }

    /// The visited page
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Records a link found on the page
    ///
    /// Links are kept in discovery order. A link URL can only be recorded
    /// once per report.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The link was recorded
    /// * `Err(ReportError::DuplicateLink)` - The link was already present; the
    ///   report is left unchanged
    pub fn add_link(&mut self, url: impl Into<String>, in_scope: bool) -> Result<(), ReportError> {
        let url = url.into();
        if !self.seen.insert(url.clone()) {
            return Err(ReportError::DuplicateLink {
                page: self.url.clone(),
                link: url,
            });
        }

        self.links.push(LinkInfo::new(url, in_scope));
        Ok(())
    }

    /// Returns the recorded link for `url`, if any
    pub fn link(&self, url: &str) -> Option<&LinkInfo> {
        if !self.seen.contains(url) {
            return None;
        }
        self.links.iter().find(|link| link.url == url)
    }

    /// Returns true if `url` has been recorded on this page
    pub fn contains(&self, url: &str) -> bool {
        self.seen.contains(url)
    }

    /// All recorded links in discovery order
    pub fn links(&self) -> &[LinkInfo] {
        &self.links
    }

    /// Number of recorded links
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Returns true if no link was recorded (empty page or load timeout)
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Links that fall inside the crawl scope
    pub fn in_scope_links(&self) -> impl Iterator<Item = &LinkInfo> {
        self.links.iter().filter(|link| link.in_scope)
    }

    /// Links that fall outside the crawl scope
    pub fn out_of_scope_links(&self) -> impl Iterator<Item = &LinkInfo> {
        self.links.iter().filter(|link| !link.in_scope)
    }
}

impl Serialize for UrlReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("UrlReport", 2)?;
        state.serialize_field("url", &self.url)?;
        state.serialize_field("links", &LinkMap(&self.links))?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for UrlReport {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Record {
            url: String,
            #[serde(default)]
            links: LinkEntries,
        }

        let record = Record::deserialize(deserializer)?;
        let mut report = UrlReport::new(record.url);

        for (key, info) in record.links.0 {
            if key != info.url {
                return Err(D::Error::custom(format!(
                    "link key '{}' does not match its url '{}'",
                    key, info.url
                )));
            }
            report
                .add_link(info.url, info.in_scope)
                .map_err(D::Error::custom)?;
        }

        Ok(report)
    }
}
