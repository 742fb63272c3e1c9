//! Paged listings.
//!
//! Each listing is a [`PageSource`] over one endpoint; the host walks it
//! through a [`kemono_core::Pager`]. Every page is fetched with
//! `o = (page - 1) * PAGE_SIZE`, filtered to video posts, and mapped after
//! resolving each post's author.
//!
//! `has_more` is decided on the raw record count, before filtering: a full
//! page of 50 means more may follow.

use std::sync::Arc;

use async_trait::async_trait;
use kemono_core::{CoreError, Page, PageSource, Video};

use crate::source::SourceInner;
use crate::urls::CreatorRef;

/// Records the API returns per page.
pub const PAGE_SIZE: u32 = 50;

/// Offset of a 1-based page.
pub fn offset_for(page: u32) -> u32 {
    page.saturating_sub(1) * PAGE_SIZE
}

/// Global full-text search.
pub struct SearchPages {
    inner: Arc<SourceInner>,
    plugin_id: String,
    query: String,
}

impl SearchPages {
    pub(crate) fn new(inner: Arc<SourceInner>, plugin_id: String, query: String) -> Self {
        Self {
            inner,
            plugin_id,
            query,
        }
    }
}

#[async_trait]
impl PageSource<Video> for SearchPages {
    async fn fetch_page(&self, page: u32) -> Result<Page<Video>, CoreError> {
        let response = self
            .inner
            .api
            .search_posts(&self.query, offset_for(page))
            .await?;
        Ok(self.inner.video_page(response.posts, &self.plugin_id).await?)
    }

    fn label(&self) -> &str {
        "search"
    }
}

/// Full-text search within one creator's posts.
pub struct ChannelSearchPages {
    inner: Arc<SourceInner>,
    plugin_id: String,
    creator: CreatorRef,
    query: String,
}

impl ChannelSearchPages {
    pub(crate) fn new(
        inner: Arc<SourceInner>,
        plugin_id: String,
        creator: CreatorRef,
        query: String,
    ) -> Self {
        Self {
            inner,
            plugin_id,
            creator,
            query,
        }
    }
}

#[async_trait]
impl PageSource<Video> for ChannelSearchPages {
    async fn fetch_page(&self, page: u32) -> Result<Page<Video>, CoreError> {
        let posts = self
            .inner
            .api
            .creator_posts(
                &self.creator.service,
                &self.creator.user_id,
                offset_for(page),
                Some(&self.query),
            )
            .await?;
        Ok(self.inner.video_page(posts, &self.plugin_id).await?)
    }

    fn label(&self) -> &str {
        "channel search"
    }
}

/// A creator's posts, newest first.
pub struct ChannelContentsPages {
    inner: Arc<SourceInner>,
    plugin_id: String,
    creator: CreatorRef,
}

impl ChannelContentsPages {
    pub(crate) fn new(inner: Arc<SourceInner>, plugin_id: String, creator: CreatorRef) -> Self {
        Self {
            inner,
            plugin_id,
            creator,
        }
    }
}

#[async_trait]
impl PageSource<Video> for ChannelContentsPages {
    async fn fetch_page(&self, page: u32) -> Result<Page<Video>, CoreError> {
        let posts = self
            .inner
            .api
            .creator_posts(
                &self.creator.service,
                &self.creator.user_id,
                offset_for(page),
                None,
            )
            .await?;
        Ok(self.inner.video_page(posts, &self.plugin_id).await?)
    }

    fn label(&self) -> &str {
        "channel contents"
    }
}
