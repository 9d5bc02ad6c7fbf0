//! Visited set and frontier
//!
//! This module tracks every URL the crawl has ever seen and the in-scope URLs
//! still waiting to be fetched. A URL is recorded once, at first discovery,
//! and is pushed to the frontier at that same moment if and only if it is in
//! scope. Nothing is ever removed from the visited set, so a URL can never be
//! queued twice.
//!
//! The frontier is a stack: the most recently discovered URL is processed
//! first, which makes the crawl lean depth-first.

use std::collections::HashSet;

/// Outcome of offering a URL to the frontier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueOutcome {
    /// First discovery, in scope: pushed to the frontier
    Queued,
    /// First discovery, out of scope: recorded but never fetched
    OutOfScope,
    /// Seen before: nothing changed
    AlreadyKnown,
}

/// Visited set plus LIFO frontier
#[derive(Debug, Clone, Default)]
pub struct Frontier {
    /// Every discovered URL, in discovery order
    visited: Vec<String>,

    /// Index over `visited` for constant-time lookups
    known: HashSet<String>,

    /// In-scope URLs waiting to be processed
    pending: Vec<String>,

    /// Discovered URLs that were out of scope
    out_of_scope: usize,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a discovered URL
    ///
    /// `in_scope` is only called for URLs seen for the first time.
    ///
    /// # Example
    ///
    /// ```
    /// use find404_crawler::crawler::{Frontier, QueueOutcome};
    ///
    /// let mut frontier = Frontier::new();
    /// assert_eq!(frontier.discover("https://x.com/a", |_| true), QueueOutcome::Queued);
    /// assert_eq!(frontier.discover("https://x.com/a", |_| true), QueueOutcome::AlreadyKnown);
    /// assert_eq!(frontier.discover("https://y.com", |_| false), QueueOutcome::OutOfScope);
    /// assert_eq!(frontier.pop().as_deref(), Some("https://x.com/a"));
    /// ```
    pub fn discover<F>(&mut self, url: &str, in_scope: F) -> QueueOutcome
    where
        F: FnOnce(&str) -> bool,
    {
        if self.known.contains(url) {
            return QueueOutcome::AlreadyKnown;
        }

        self.known.insert(url.to_string());
        self.visited.push(url.to_string());

        if in_scope(url) {
            self.pending.push(url.to_string());
            QueueOutcome::Queued
        } else {
            self.out_of_scope += 1;
            QueueOutcome::OutOfScope
        }
    }

    /// Takes the most recently queued URL off the frontier
    pub fn pop(&mut self) -> Option<String> {
        self.pending.pop()
    }

    /// Returns true if `url` has been discovered before
    pub fn is_known(&self, url: &str) -> bool {
        self.known.contains(url)
    }

    /// Every discovered URL, in discovery order
    pub fn visited(&self) -> &[String] {
        &self.visited
    }

    /// URLs waiting to be processed; the last one is processed next
    pub fn pending(&self) -> &[String] {
        &self.pending
    }

    /// Number of URLs waiting to be processed
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns true when no URL is waiting to be processed
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Number of discovered URLs that were out of scope
    pub fn out_of_scope_count(&self) -> usize {
        self.out_of_scope
    }
}
