//! Result pages and search capabilities.

use serde::{Deserialize, Serialize};

// ============================================================================
// Page
// ============================================================================

/// One page of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Results on this page.
    pub results: Vec<T>,
    /// Whether another page may follow.
    pub has_more: bool,
}

impl<T> Page<T> {
    /// Creates a page.
    pub fn new(results: Vec<T>, has_more: bool) -> Self {
        Self { results, has_more }
    }

    /// Creates an empty, exhausted page.
    pub fn empty() -> Self {
        Self {
            results: Vec::new(),
            has_more: false,
        }
    }

    /// Creates a final page holding all results.
    pub fn last(results: Vec<T>) -> Self {
        Self {
            results,
            has_more: false,
        }
    }

    /// Returns true if the page holds no results.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Returns the number of results on this page.
    pub fn len(&self) -> usize {
        self.results.len()
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::empty()
    }
}

// ============================================================================
// Search Capabilities
// ============================================================================

/// Content type a search can be restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedType {
    /// Any content.
    Mixed,
    /// Videos only.
    Videos,
    /// Live streams only.
    Streams,
}

/// Result ordering a search supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Newest first.
    Chronological,
    /// Most viewed first.
    Views,
    /// Highest rated first.
    Favorites,
}

/// What a search endpoint accepts beyond free text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCapabilities {
    /// Supported content types.
    pub types: Vec<FeedType>,
    /// Supported orderings.
    pub sorts: Vec<SortOrder>,
    /// Supported filter group ids.
    pub filters: Vec<String>,
}

impl SearchCapabilities {
    /// Full-text only: no types, sorts or filters.
    pub fn text_only() -> Self {
        Self::default()
    }

    /// Returns true if only free-text queries are supported.
    pub fn is_text_only(&self) -> bool {
        self.types.is_empty() && self.sorts.is_empty() && self.filters.is_empty()
    }
}
