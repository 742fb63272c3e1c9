//! Video types.
//!
//! - [`Video`] - Summary shown in feeds, search results and channel listings
//! - [`VideoDetails`] - Full record with playable sources
//! - [`VideoSource`] - One playable URL

use serde::{Deserialize, Serialize};

use super::platform::{AuthorLink, PlatformId, Rating, Thumbnail};

// ============================================================================
// Video
// ============================================================================

/// A video summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    /// Video identity.
    pub id: PlatformId,
    /// Title.
    pub name: String,
    /// Thumbnails, best first.
    pub thumbnails: Vec<Thumbnail>,
    /// Uploader.
    pub author: AuthorLink,
    /// Publish time in Unix seconds.
    pub datetime: i64,
    /// Canonical detail URL.
    pub url: String,
    /// Duration in seconds, 0 when unknown.
    #[serde(default)]
    pub duration: u64,
    /// View count, 0 when unknown.
    #[serde(default)]
    pub view_count: u64,
    /// Whether this is a live stream.
    #[serde(default)]
    pub is_live: bool,
}

// ============================================================================
// Video Source
// ============================================================================

/// A single playable URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSource {
    /// Display name of the source (usually the file name).
    pub name: String,
    /// Container MIME type.
    pub container: String,
    /// Direct URL.
    pub url: String,
}

impl VideoSource {
    /// MIME type for MPEG-4 containers.
    pub const MP4: &'static str = "video/mp4";

    /// Creates an MPEG-4 source.
    pub fn mp4(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            container: Self::MP4.to_string(),
            url: url.into(),
        }
    }
}

// ============================================================================
// Video Details
// ============================================================================

/// A playable video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoDetails {
    /// Summary fields.
    #[serde(flatten)]
    pub video: Video,
    /// Full description text.
    #[serde(default)]
    pub description: String,
    /// Playable sources.
    pub sources: Vec<VideoSource>,
    /// Live stream source, if any.
    #[serde(default)]
    pub live: Option<VideoSource>,
    /// Rating.
    #[serde(default)]
    pub rating: Rating,
}

impl VideoDetails {
    /// Returns the first playable source.
    pub fn primary_source(&self) -> Option<&VideoSource> {
        self.sources.first()
    }
}
