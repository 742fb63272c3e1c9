//! Identity types.
//!
//! - [`PlatformId`] - Namespaced identifier for any remote object
//! - [`AuthorLink`] - Compact channel reference embedded in videos and comments
//! - [`Thumbnail`] - Image reference (possibly a placeholder)
//! - [`Rating`] - Rating attached to videos and comments

use serde::{Deserialize, Serialize};

// ============================================================================
// Platform Id
// ============================================================================

/// Identifier of a remote object, namespaced by platform and plugin instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformId {
    /// Platform name (e.g. "Kemono").
    pub platform: String,
    /// Remote identifier.
    pub value: String,
    /// Opaque id of the plugin instance that produced this object.
    pub plugin_id: String,
}

impl PlatformId {
    /// Creates a new platform id.
    pub fn new(
        platform: impl Into<String>,
        value: impl Into<String>,
        plugin_id: impl Into<String>,
    ) -> Self {
        Self {
            platform: platform.into(),
            value: value.into(),
            plugin_id: plugin_id.into(),
        }
    }
}

impl std::fmt::Display for PlatformId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.platform, self.value)
    }
}

// ============================================================================
// Author Link
// ============================================================================

/// Compact reference to a channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorLink {
    /// Channel identity.
    pub id: PlatformId,
    /// Display name.
    pub name: String,
    /// Channel URL (may be empty for anonymous commenters).
    pub url: String,
    /// Avatar URL (may be empty).
    pub thumbnail: String,
}

impl AuthorLink {
    /// Creates a new author link.
    pub fn new(
        id: PlatformId,
        name: impl Into<String>,
        url: impl Into<String>,
        thumbnail: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            url: url.into(),
            thumbnail: thumbnail.into(),
        }
    }
}

// ============================================================================
// Thumbnail
// ============================================================================

/// A thumbnail reference.
///
/// A thumbnail without a URL is a placeholder; hosts draw their own default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thumbnail {
    /// Image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Vertical resolution in pixels, 0 when unknown.
    #[serde(default)]
    pub quality: u32,
}

impl Thumbnail {
    /// Creates a placeholder thumbnail.
    pub fn placeholder() -> Self {
        Self::default()
    }

    /// Returns true if this thumbnail has no image.
    pub fn is_placeholder(&self) -> bool {
        self.url.is_none()
    }
}

// ============================================================================
// Rating
// ============================================================================

/// Rating attached to a video or comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum Rating {
    /// Like count.
    Likes(u64),
}

impl Default for Rating {
    fn default() -> Self {
        Self::Likes(0)
    }
}
