//! Mapping from Kemono wire records to host value objects.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};
use kemono_core::{
    AuthorLink, Channel, Comment, PlatformId, Rating, Thumbnail, Video, VideoDetails, VideoSource,
};
use tracing::warn;

use crate::api::{CommentRecord, CreatorRecord, PostDetailsResponse, PostRecord, VideoFile};
use crate::cache::ChannelSummary;
use crate::config::PLATFORM;
use crate::error::KemonoError;
use crate::urls::UrlCodec;

/// Suffix of a playable primary file.
pub const VIDEO_EXTENSION: &str = ".mp4";

/// Naive timestamp layouts the API uses; read as local time.
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Date-only layout; read as UTC midnight.
const DATE_FORMAT: &str = "%Y-%m-%d";

// ============================================================================
// Filtering
// ============================================================================

/// True if the post's primary file is a playable video.
pub fn is_video_post(post: &PostRecord) -> bool {
    post.file_path()
        .is_some_and(|path| path.ends_with(VIDEO_EXTENSION))
}

/// Keeps only video posts, in order.
pub fn select_videos(posts: Vec<PostRecord>) -> Vec<PostRecord> {
    posts.into_iter().filter(is_video_post).collect()
}

// ============================================================================
// Timestamps
// ============================================================================

/// Parses an API timestamp into Unix seconds.
///
/// Accepts RFC 3339, RFC 2822, the naive layouts in `NAIVE_FORMATS` (local
/// time) and bare dates (UTC midnight). Anything else yields 0.
pub fn parse_published(value: &str) -> i64 {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return dt.timestamp();
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return dt.timestamp();
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            if let Some(dt) = Local.from_local_datetime(&naive).earliest() {
                return dt.timestamp();
            }
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, DATE_FORMAT) {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return midnight.and_utc().timestamp();
        }
    }

    warn!(value, "Unparseable timestamp, using 0");
    0
}

fn published_or_zero(value: Option<&str>) -> i64 {
    value.map_or(0, parse_published)
}

// ============================================================================
// Creators
// ============================================================================

/// Summarizes a creator profile with derived asset URLs.
pub fn summarize(codec: &UrlCodec, creator: &CreatorRecord) -> ChannelSummary {
    ChannelSummary {
        id: creator.id.clone(),
        name: creator.name.clone(),
        service: creator.service.clone(),
        url: codec.user_url_for(&creator.service, &creator.id),
        thumbnail: codec.icon_url(&creator.service, &creator.id),
        banner: codec.banner_url(&creator.service, &creator.id),
    }
}

// ============================================================================
// Mapper
// ============================================================================

/// Builds host value objects for one plugin instance.
#[derive(Debug, Clone)]
pub struct Mapper<'a> {
    codec: &'a UrlCodec,
    plugin_id: &'a str,
}

impl<'a> Mapper<'a> {
    /// Creates a mapper stamping `plugin_id` into every id.
    pub fn new(codec: &'a UrlCodec, plugin_id: &'a str) -> Self {
        Self { codec, plugin_id }
    }

    /// `PlatformId("Kemono", value, plugin_id)`
    pub fn platform_id(&self, value: &str) -> PlatformId {
        PlatformId::new(PLATFORM, value, self.plugin_id)
    }

    /// Channel page for a creator.
    pub fn channel(&self, summary: &ChannelSummary) -> Channel {
        Channel {
            id: self.platform_id(&summary.id),
            name: summary.name.clone(),
            thumbnail: summary.thumbnail.clone(),
            banner: summary.banner.clone(),
            subscribers: 0,
            description: String::new(),
            url: summary.url.clone(),
        }
    }

    /// Channel-search entry for a creator.
    pub fn author_link(&self, creator: &CreatorRecord) -> AuthorLink {
        AuthorLink::new(
            self.platform_id(&creator.id),
            creator.name.clone(),
            self.codec.user_url_for(&creator.service, &creator.id),
            self.codec.icon_url(&creator.service, &creator.id),
        )
    }

    /// Author link pointing at a cached creator.
    pub fn summary_link(&self, summary: &ChannelSummary) -> AuthorLink {
        AuthorLink::new(
            self.platform_id(&summary.id),
            summary.name.clone(),
            summary.url.clone(),
            summary.thumbnail.clone(),
        )
    }

    /// Listing entry for a post.
    pub fn video(&self, post: &PostRecord, author: &ChannelSummary) -> Video {
        Video {
            id: self.platform_id(&post.id),
            name: post.title.clone().unwrap_or_default(),
            thumbnails: vec![Thumbnail::placeholder()],
            author: self.summary_link(author),
            datetime: published_or_zero(post.published.as_deref()),
            url: self.codec.video_url_for(&post.service, &post.user, &post.id),
            duration: 0,
            view_count: 0,
            is_live: false,
        }
    }

    /// Playable details for a post.
    ///
    /// The source comes from the response's top-level `videos`, falling back
    /// to the post's own list. A post with neither is not playable.
    pub fn video_details(
        &self,
        details: &PostDetailsResponse,
        author: &ChannelSummary,
        url: &str,
    ) -> Result<VideoDetails, KemonoError> {
        let post = &details.post;
        let file = details
            .videos
            .first()
            .or_else(|| post.videos.first())
            .ok_or_else(|| {
                KemonoError::InvalidResponse(format!("post {} has no playable video", post.id))
            })?;

        let mut video = self.video(post, author);
        video.url = url.to_string();

        Ok(VideoDetails {
            video,
            description: post.content.clone().unwrap_or_default(),
            sources: vec![video_source(file)],
            live: None,
            rating: Rating::Likes(0),
        })
    }

    /// A comment on the video at `context_url`.
    ///
    /// Commenters have no channel page, so the link carries no URL or avatar.
    /// The display name falls back to the commenter id.
    pub fn comment(&self, record: &CommentRecord, context_url: &str) -> Comment {
        let name = record
            .commenter_name
            .clone()
            .unwrap_or_else(|| record.commenter.clone());

        Comment {
            context_url: context_url.to_string(),
            author: AuthorLink::new(self.platform_id(&record.commenter), name, "", ""),
            message: record.content.clone(),
            rating: Rating::Likes(0),
            date: published_or_zero(record.published.as_deref()),
            reply_count: 0,
        }
    }
}

/// `{server}/data{path}`
fn video_source(file: &VideoFile) -> VideoSource {
    VideoSource::mp4(
        file.name.clone(),
        format!("{}/data{}", file.server.trim_end_matches('/'), file.path),
    )
}

// ============================================================================
// Tests
// ============================================================================
