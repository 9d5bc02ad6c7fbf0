//! URL handling module
//!
//! This module decides which URLs belong to the crawl and derives the key a
//! discovered link is deduplicated under.

mod fragment;
mod scope;

// Re-export main items
pub use fragment::strip_fragment;
pub use scope::Scope;
