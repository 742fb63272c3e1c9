//! Flat comments.

use serde::{Deserialize, Serialize};

use super::platform::{AuthorLink, Rating};

/// A comment on a video. Comments are never threaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// URL of the video this comment belongs to.
    pub context_url: String,
    /// Commenter.
    pub author: AuthorLink,
    /// Comment body.
    pub message: String,
    /// Rating.
    #[serde(default)]
    pub rating: Rating,
    /// Post time in Unix seconds.
    pub date: i64,
    /// Number of replies.
    #[serde(default)]
    pub reply_count: u32,
}
