//! Channel pages.

use serde::{Deserialize, Serialize};

use super::platform::{AuthorLink, PlatformId};

/// A creator's channel as rendered by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    /// Channel identity.
    pub id: PlatformId,
    /// Display name.
    pub name: String,
    /// Avatar URL.
    pub thumbnail: String,
    /// Banner URL.
    pub banner: String,
    /// Subscriber count (0 when the platform does not expose it).
    #[serde(default)]
    pub subscribers: u64,
    /// Channel description.
    #[serde(default)]
    pub description: String,
    /// Canonical channel URL.
    pub url: String,
}

impl Channel {
    /// Returns a compact link to this channel.
    pub fn to_author_link(&self) -> AuthorLink {
        AuthorLink::new(
            self.id.clone(),
            self.name.clone(),
            self.url.clone(),
            self.thumbnail.clone(),
        )
    }
}
