//! Route matching logic.
//!
//! # Responsibilities
//! - Match path prefix (case-sensitive, whole segments only)
//! - Strip the matched prefix from path-and-query
//!
//! # Design Decisions
//! - Path matching is case-sensitive
//! - A prefix only matches when followed by `/`, so `/api/mingdao` does
//!   not capture `/api/mingdaoX` or the bare `/api/mingdao`
//! - No regex to guarantee O(n) matching

/// Matches the request path prefix.
#[derive(Debug, Clone)]
pub struct PathPrefixMatcher {
    prefix: String,
}

impl PathPrefixMatcher {
    /// Create a new path prefix matcher. The prefix has no trailing slash.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns true if `path` lies under this prefix.
    pub fn matches(&self, path: &str) -> bool {
        path.strip_prefix(&self.prefix)
            .is_some_and(|rest| rest.starts_with('/'))
    }

    /// Remove the prefix from a path-and-query string.
    ///
    /// The remainder keeps its leading `/` and any query string.
    pub fn strip<'a>(&self, path_and_query: &'a str) -> Option<&'a str> {
        path_and_query
            .strip_prefix(&self.prefix)
            .filter(|rest| rest.starts_with('/'))
    }
}
