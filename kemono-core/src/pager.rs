//! Stateful paging over a remote listing.
//!
//! A [`Pager`] owns one [`PageSource`] and the page it last fetched. Every
//! listing a source exposes (search results, channel contents, comments) is
//! a `Pager` over a different `PageSource`; the pager itself never knows
//! which endpoint it is walking.
//!
//! Page numbers are 1-based. Opening a pager fetches page 1; each call to
//! [`Pager::next_page`] fetches exactly the following page.

use async_trait::async_trait;
use tracing::debug;

use crate::error::CoreError;
use crate::models::Page;

// ============================================================================
// Page Source
// ============================================================================

/// Fetches one page of a listing.
#[async_trait]
pub trait PageSource<T>: Send + Sync {
    /// Fetches the given 1-based page.
    async fn fetch_page(&self, page: u32) -> Result<Page<T>, CoreError>;

    /// Short label used in logs.
    fn label(&self) -> &str {
        "listing"
    }
}

// ============================================================================
// Pager
// ============================================================================

/// Cursor over a paged listing.
pub struct Pager<T> {
    source: Option<Box<dyn PageSource<T>>>,
    page: u32,
    current: Page<T>,
}

impl<T: Send> Pager<T> {
    /// Opens a pager by fetching page 1 from `source`.
    pub async fn open<S>(source: S) -> Result<Self, CoreError>
    where
        S: PageSource<T> + 'static,
    {
        let first = source.fetch_page(1).await?;
        debug!(
            listing = source.label(),
            results = first.len(),
            has_more = first.has_more,
            "Opened pager"
        );

        Ok(Self {
            source: Some(Box::new(source)),
            page: 1,
            current: first,
        })
    }

    /// Creates an exhausted pager with no results.
    pub fn empty() -> Self {
        Self::single(Vec::new())
    }

    /// Creates an exhausted pager holding one final page.
    pub fn single(results: Vec<T>) -> Self {
        Self {
            source: None,
            page: 1,
            current: Page::last(results),
        }
    }

    /// Current 1-based page number.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Whether another page may follow the current one.
    pub fn has_more(&self) -> bool {
        self.current.has_more && self.source.is_some()
    }

    /// Results of the current page.
    pub fn results(&self) -> &[T] {
        &self.current.results
    }

    /// The current page.
    pub fn current(&self) -> &Page<T> {
        &self.current
    }

    /// Moves the current page's results out, leaving the page empty.
    pub fn take_results(&mut self) -> Vec<T> {
        std::mem::take(&mut self.current.results)
    }

    /// Consumes the pager and returns the current page.
    pub fn into_page(self) -> Page<T> {
        self.current
    }

    /// Fetches the next page and makes it current.
    ///
    /// On an exhausted pager no request is made and the current page becomes
    /// empty. On failure the pager keeps its previous page and page number.
    pub async fn next_page(&mut self) -> Result<&Page<T>, CoreError> {
        let source = match &self.source {
            Some(source) if self.current.has_more => source,
            _ => {
                self.current = Page::empty();
                return Ok(&self.current);
            }
        };

        let next = self.page + 1;
        let page = source.fetch_page(next).await?;
        debug!(
            listing = source.label(),
            page = next,
            results = page.len(),
            has_more = page.has_more,
            "Advanced pager"
        );

        self.page = next;
        self.current = page;
        Ok(&self.current)
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Pager<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pager")
            .field("listing", &self.source.as_ref().map(|s| s.label()))
            .field("page", &self.page)
            .field("current", &self.current)
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
