//! Trait definitions for content sources.
//!
//! [`ContentSource`] is the contract between the host application and a
//! source. The host routes URLs to a source with the `is_*_url` predicates
//! and calls the async operations to browse, search and play content.

use std::future::Future;

use crate::error::CoreError;
use crate::models::{
    AuthorLink, Channel, Comment, SearchCapabilities, SourceSettings, Video, VideoDetails,
};
use crate::pager::Pager;

/// A content source the host can browse.
///
/// Implementors are responsible for:
/// - Recognizing the URLs they own
/// - Translating each operation into requests against their remote API
/// - Mapping responses into the canonical value objects
///
/// Operations with a default implementation describe features a source may
/// not support; the defaults return empty results.
pub trait ContentSource: Send + Sync {
    /// Source-specific configuration delivered on enable.
    type Config: Send;

    /// Platform name used in every [`crate::PlatformId`] this source creates.
    fn platform(&self) -> &str;

    /// Applies the host-provided configuration and user settings.
    fn enable(&mut self, config: Self::Config, settings: SourceSettings);

    /// Home feed.
    fn get_home(&self) -> impl Future<Output = Result<Pager<Video>, CoreError>> + Send {
        async { Ok(Pager::empty()) }
    }

    /// Autocomplete suggestions for a partial query.
    fn search_suggestions(
        &self,
        _query: &str,
    ) -> impl Future<Output = Result<Vec<String>, CoreError>> + Send {
        async { Ok(Vec::new()) }
    }

    /// What the global search accepts.
    fn search_capabilities(&self) -> SearchCapabilities {
        SearchCapabilities::text_only()
    }

    /// Full-text search over all content.
    fn search(&self, query: &str)
    -> impl Future<Output = Result<Pager<Video>, CoreError>> + Send;

    /// What a channel-scoped search accepts.
    fn search_channel_contents_capabilities(&self) -> SearchCapabilities {
        SearchCapabilities::text_only()
    }

    /// Full-text search within one channel.
    fn search_channel_contents(
        &self,
        channel_url: &str,
        query: &str,
    ) -> impl Future<Output = Result<Pager<Video>, CoreError>> + Send;

    /// Search channels by name.
    fn search_channels(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Pager<AuthorLink>, CoreError>> + Send;

    /// Returns true if `url` is a channel URL this source owns.
    fn is_channel_url(&self, url: &str) -> bool;

    /// Fetches a channel page.
    fn get_channel(&self, url: &str) -> impl Future<Output = Result<Channel, CoreError>> + Send;

    /// Lists a channel's content, newest first.
    fn get_channel_contents(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<Pager<Video>, CoreError>> + Send;

    /// Returns true if `url` is a content URL this source owns.
    fn is_content_details_url(&self, url: &str) -> bool;

    /// Fetches a playable video.
    fn get_content_details(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<VideoDetails, CoreError>> + Send;

    /// Fetches the comments on a video.
    fn get_comments(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<Pager<Comment>, CoreError>> + Send;

    /// Fetches replies to a comment.
    fn get_sub_comments(
        &self,
        _comment: &Comment,
    ) -> impl Future<Output = Result<Pager<Comment>, CoreError>> + Send {
        async { Ok(Pager::empty()) }
    }
}
