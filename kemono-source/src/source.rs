//! The Kemono content source.

use std::sync::Arc;

use kemono_core::{
    AuthorLink, Channel, Comment, ContentSource, CoreError, FeedType, Page, Pager,
    SearchCapabilities, SortOrder, SourceSettings, Video, VideoDetails,
};
use kemono_fetch::FetchContext;
use tracing::{debug, info, instrument};

use crate::api::{KemonoApiClient, PostRecord};
use crate::cache::{AuthorCache, ChannelSummary};
use crate::config::{Endpoints, PLATFORM, SourceConfig};
use crate::error::KemonoError;
use crate::pagers::{ChannelContentsPages, ChannelSearchPages, PAGE_SIZE, SearchPages};
use crate::parser::{Mapper, select_videos, summarize};
use crate::urls::{CreatorRef, PostRef, UrlCodec};

// ============================================================================
// Shared State
// ============================================================================

/// State shared between the source and the pagers it hands out.
#[derive(Debug)]
pub(crate) struct SourceInner {
    pub(crate) api: KemonoApiClient,
    pub(crate) cache: AuthorCache,
    pub(crate) codec: UrlCodec,
}

impl SourceInner {
    /// Returns the creator's summary, fetching the profile on a cache miss.
    pub(crate) async fn resolve_author(
        &self,
        service: &str,
        user_id: &str,
    ) -> Result<Arc<ChannelSummary>, KemonoError> {
        self.cache
            .get_or_try_insert_with(service, user_id, move || async move {
                let creator = self.api.fetch_profile(service, user_id).await?;
                Ok::<_, KemonoError>(summarize(&self.codec, &creator))
            })
            .await
    }

    /// Turns one raw listing page into a page of videos.
    pub(crate) async fn video_page(
        &self,
        posts: Vec<PostRecord>,
        plugin_id: &str,
    ) -> Result<Page<Video>, KemonoError> {
        let raw_count = posts.len();
        let has_more = raw_count == PAGE_SIZE as usize;
        let posts = select_videos(posts);
        debug!(raw_count, videos = posts.len(), has_more, "Fetched listing page");

        let mapper = Mapper::new(&self.codec, plugin_id);
        let mut results = Vec::with_capacity(posts.len());
        for post in &posts {
            let author = self.resolve_author(&post.service, &post.user).await?;
            results.push(mapper.video(post, &author));
        }

        Ok(Page::new(results, has_more))
    }

    fn creator_ref(&self, url: &str) -> Result<CreatorRef, KemonoError> {
        self.codec
            .parse_user_url(url)
            .into_user()
            .ok_or_else(|| KemonoError::MalformedUrl(url.to_string()))
    }

    fn post_ref(&self, url: &str) -> Result<PostRef, KemonoError> {
        self.codec
            .parse_video_url(url)
            .into_video()
            .ok_or_else(|| KemonoError::MalformedUrl(url.to_string()))
    }
}

// ============================================================================
// Kemono Source
// ============================================================================

/// Kemono creator posts exposed through [`ContentSource`].
///
/// Only posts whose primary file is an MP4 surface as videos. Creators are
/// resolved once per `(service, user id)` and cached for the life of the
/// source.
#[derive(Debug, Clone)]
pub struct KemonoSource {
    inner: Arc<SourceInner>,
    config: SourceConfig,
    settings: SourceSettings,
}

impl KemonoSource {
    /// Creates a source against the public Kemono endpoints.
    pub fn new() -> Result<Self, KemonoError> {
        Self::with_endpoints(Endpoints::default())
    }

    /// Creates a source against custom endpoints.
    pub fn with_endpoints(endpoints: Endpoints) -> Result<Self, KemonoError> {
        let endpoints = endpoints.normalized()?;
        let context = FetchContext::with_settings(endpoints.fetch_settings())?;
        Self::with_context(&context, endpoints)
    }

    /// Creates a source using an existing fetch context.
    ///
    /// The context's client is used as is; build it from
    /// [`Endpoints::fetch_settings`] to get the navigation headers and host
    /// allowlist.
    pub fn with_context(context: &FetchContext, endpoints: Endpoints) -> Result<Self, KemonoError> {
        let endpoints = endpoints.normalized()?;
        let codec = UrlCodec::new(&endpoints)?;
        let api = KemonoApiClient::new(Arc::clone(&context.http), endpoints.api);

        Ok(Self {
            inner: Arc::new(SourceInner {
                api,
                cache: AuthorCache::new(),
                codec,
            }),
            config: SourceConfig::default(),
            settings: SourceSettings::default(),
        })
    }

    /// The configuration applied on enable.
    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    /// The user settings applied on enable.
    pub fn settings(&self) -> &SourceSettings {
        &self.settings
    }

    /// Resolved creators.
    pub fn author_cache(&self) -> &AuthorCache {
        &self.inner.cache
    }

    /// The deep-link codec.
    pub fn codec(&self) -> &UrlCodec {
        &self.inner.codec
    }

    /// Returns the creator's summary, fetching the profile on a cache miss.
    pub async fn resolve_author(
        &self,
        service: &str,
        user_id: &str,
    ) -> Result<Arc<ChannelSummary>, KemonoError> {
        self.inner.resolve_author(service, user_id).await
    }

    fn mapper(&self) -> Mapper<'_> {
        Mapper::new(&self.inner.codec, &self.config.id)
    }
}

impl ContentSource for KemonoSource {
    type Config = SourceConfig;

    fn platform(&self) -> &str {
        PLATFORM
    }

    fn enable(&mut self, config: SourceConfig, settings: SourceSettings) {
        info!(
            plugin_id = %config.id,
            settings = settings.len(),
            "Kemono source enabled"
        );
        self.config = config;
        self.settings = settings;
    }

    #[instrument(skip(self))]
    async fn search(&self, query: &str) -> Result<Pager<Video>, CoreError> {
        let pages = SearchPages::new(
            Arc::clone(&self.inner),
            self.config.id.clone(),
            query.to_string(),
        );
        Pager::open(pages).await
    }

    fn search_channel_contents_capabilities(&self) -> SearchCapabilities {
        SearchCapabilities {
            types: vec![FeedType::Mixed],
            sorts: vec![SortOrder::Chronological],
            filters: Vec::new(),
        }
    }

    #[instrument(skip(self))]
    async fn search_channel_contents(
        &self,
        channel_url: &str,
        query: &str,
    ) -> Result<Pager<Video>, CoreError> {
        let creator = self.inner.creator_ref(channel_url)?;
        let pages = ChannelSearchPages::new(
            Arc::clone(&self.inner),
            self.config.id.clone(),
            creator,
            query.to_string(),
        );
        Pager::open(pages).await
    }

    #[instrument(skip(self))]
    async fn search_channels(&self, query: &str) -> Result<Pager<AuthorLink>, CoreError> {
        let creators = self.inner.api.creators().await?;
        let needle = query.to_lowercase();
        let mapper = self.mapper();

        let links: Vec<AuthorLink> = creators
            .iter()
            .filter(|creator| creator.name.to_lowercase().contains(&needle))
            .map(|creator| mapper.author_link(creator))
            .collect();

        debug!(total = creators.len(), matched = links.len(), "Filtered creators");
        Ok(Pager::single(links))
    }

    fn is_channel_url(&self, url: &str) -> bool {
        self.inner.codec.is_user_url(url)
    }

    #[instrument(skip(self))]
    async fn get_channel(&self, url: &str) -> Result<Channel, CoreError> {
        let creator = self.inner.creator_ref(url)?;
        let profile = self
            .inner
            .api
            .fetch_profile(&creator.service, &creator.user_id)
            .await?;

        let summary = summarize(&self.inner.codec, &profile);
        let channel = self.mapper().channel(&summary);
        self.inner
            .cache
            .insert(&creator.service, &creator.user_id, summary)
            .await;
        Ok(channel)
    }

    #[instrument(skip(self))]
    async fn get_channel_contents(&self, url: &str) -> Result<Pager<Video>, CoreError> {
        let creator = self.inner.creator_ref(url)?;
        let pages =
            ChannelContentsPages::new(Arc::clone(&self.inner), self.config.id.clone(), creator);
        Pager::open(pages).await
    }

    fn is_content_details_url(&self, url: &str) -> bool {
        self.inner.codec.is_video_url(url)
    }

    #[instrument(skip(self))]
    async fn get_content_details(&self, url: &str) -> Result<VideoDetails, CoreError> {
        let post = self.inner.post_ref(url)?;
        let details = self
            .inner
            .api
            .post(&post.service, &post.user_id, &post.post_id)
            .await?;

        let author = self
            .inner
            .resolve_author(&details.post.service, &details.post.user)
            .await?;

        Ok(self.mapper().video_details(&details, &author, url)?)
    }

    #[instrument(skip(self))]
    async fn get_comments(&self, url: &str) -> Result<Pager<Comment>, CoreError> {
        let post = self.inner.post_ref(url)?;
        let records = self
            .inner
            .api
            .comments(&post.service, &post.user_id, &post.post_id)
            .await?;

        let mapper = self.mapper();
        let comments = records
            .iter()
            .map(|record| mapper.comment(record, url))
            .collect();
        Ok(Pager::single(comments))
    }
}
