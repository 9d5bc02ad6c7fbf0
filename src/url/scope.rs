use crate::ConfigError;
use regex::Regex;

/// Allow/deny rule set deciding which URLs are crawled
///
/// A URL is in scope when it matches at least one allowed pattern and none of
/// the forbidden patterns. Patterns are searched for anywhere in the URL, so
/// `example\.com/docs` matches `https://example.com/docs/intro`. Forbidden
/// patterns always win over allowed ones.
///
/// Patterns are compiled once, when the scope is built.
#[derive(Debug, Clone)]
pub struct Scope {
    allowed: Vec<Regex>,
    forbidden: Vec<Regex>,
}

impl Scope {
    /// Builds a scope from allowed and forbidden regex patterns
    ///
    /// # Arguments
    ///
    /// * `allowed` - Patterns of which a URL must match at least one
    /// * `forbidden` - Patterns of which a URL must match none
    ///
    /// # Returns
    ///
    /// * `Ok(Scope)` - All patterns compiled
    /// * `Err(ConfigError::InvalidPattern)` - The first pattern that failed to compile
    ///
    /// # Example
    ///
    /// ```
    /// use find404_crawler::url::Scope;
    ///
    /// let scope = Scope::new(&["example\\.com"], &["/private/"]).unwrap();
    /// assert!(scope.evaluate("https://example.com/docs"));
    /// assert!(!scope.evaluate("https://example.com/private/keys"));
    /// assert!(!scope.evaluate("https://other.org/"));
    /// ```
    pub fn new<A, F>(allowed: &[A], forbidden: &[F]) -> Result<Self, ConfigError>
    where
        A: AsRef<str>,
        F: AsRef<str>,
    {
        Ok(Self {
            allowed: compile_patterns(allowed)?,
            forbidden: compile_patterns(forbidden)?,
        })
    }

    /// Builds the scope used by the command line
    ///
    /// Every seed URL is regex-escaped and becomes an allowed pattern, so by
    /// default only URLs containing one of the seeds verbatim are crawled.
    /// `extra_allowed` patterns are appended after the seeds.
    pub fn for_seeds<S, A, F>(
        seeds: &[S],
        extra_allowed: &[A],
        forbidden: &[F],
    ) -> Result<Self, ConfigError>
    where
        S: AsRef<str>,
        A: AsRef<str>,
        F: AsRef<str>,
    {
        let allowed: Vec<String> = seeds
            .iter()
            .map(|seed| regex::escape(seed.as_ref()))
            .chain(extra_allowed.iter().map(|p| p.as_ref().to_string()))
            .collect();

        Self::new(&allowed, forbidden)
    }

    /// Returns whether `url` should be crawled according to this scope
    pub fn evaluate(&self, url: &str) -> bool {
        if !self.allowed.iter().any(|re| re.is_match(url)) {
            return false;
        }

        !self.forbidden.iter().any(|re| re.is_match(url))
    }

    /// The allowed patterns, in evaluation order
    pub fn allowed_patterns(&self) -> impl Iterator<Item = &str> {
        self.allowed.iter().map(Regex::as_str)
    }

    /// The forbidden patterns, in evaluation order
    pub fn forbidden_patterns(&self) -> impl Iterator<Item = &str> {
        self.forbidden.iter().map(Regex::as_str)
    }
}

fn compile_patterns<P: AsRef<str>>(patterns: &[P]) -> Result<Vec<Regex>, ConfigError> {
    patterns
        .iter()
        .map(|pattern| {
            let pattern = pattern.as_ref();
            Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })
        })
        .collect()
}
