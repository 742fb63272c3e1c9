//! Deep-link codec.
//!
//! Kemono has two URL shapes the host routes to this source:
//!
//! - Channel: `{site}/{service}/user/{userId}`
//! - Post:    `{site}/{service}/user/{userId}/post/{postId}`
//!
//! Parsing looks at the path only, so links from mirror origins still
//! parse. Ownership checks (`is_*`) also require the configured site origin.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use url::{Origin, Url};

use crate::config::Endpoints;
use crate::error::KemonoError;

/// `/{service}/user/{userId}`, optional trailing slash.
static USER_PATH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^/(?P<service>[A-Za-z]+)/user/(?P<user>[A-Za-z0-9_-]+)/?$")
        .expect("Invalid regex")
});

/// `/{service}/user/{userId}/post/{postId}`, optional trailing slash.
static POST_PATH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^/(?P<service>[A-Za-z]+)/user/(?P<user>[A-Za-z0-9_-]+)/post/(?P<post>[A-Za-z0-9_-]+)/?$",
    )
    .expect("Invalid regex")
});

// ============================================================================
// Parsed URLs
// ============================================================================

/// A creator, identified by service and user id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CreatorRef {
    /// Service namespace, e.g. `patreon`.
    pub service: String,
    /// User id within the service.
    pub user_id: String,
}

/// A post, identified by its creator and post id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PostRef {
    /// Service namespace.
    pub service: String,
    /// User id within the service.
    pub user_id: String,
    /// Post id.
    pub post_id: String,
}

impl PostRef {
    /// The creator of this post.
    pub fn creator(&self) -> CreatorRef {
        CreatorRef {
            service: self.service.clone(),
            user_id: self.user_id.clone(),
        }
    }
}

/// Result of matching a URL against the known shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedUrl {
    /// A channel URL.
    User(CreatorRef),
    /// A post URL.
    Video(PostRef),
    /// Anything else.
    Malformed,
}

impl ParsedUrl {
    /// Returns the creator if this is a channel URL.
    pub fn into_user(self) -> Option<CreatorRef> {
        match self {
            Self::User(creator) => Some(creator),
            _ => None,
        }
    }

    /// Returns the post if this is a post URL.
    pub fn into_video(self) -> Option<PostRef> {
        match self {
            Self::Video(post) => Some(post),
            _ => None,
        }
    }
}

// ============================================================================
// Codec
// ============================================================================

/// Builds and parses Kemono deep links and derived asset URLs.
#[derive(Debug, Clone)]
pub struct UrlCodec {
    site: String,
    site_origin: Origin,
    images: String,
}

impl UrlCodec {
    /// Creates a codec for the given (normalized) endpoints.
    pub fn new(endpoints: &Endpoints) -> Result<Self, KemonoError> {
        let site = Url::parse(&endpoints.site)
            .map_err(|e| KemonoError::InvalidEndpoint(format!("{}: {e}", endpoints.site)))?;

        Ok(Self {
            site: endpoints.site.clone(),
            site_origin: site.origin(),
            images: endpoints.images.clone(),
        })
    }

    /// `{site}/{service}/user/{userId}/post/{postId}`
    pub fn video_url_for(&self, service: &str, user_id: &str, post_id: &str) -> String {
        format!("{}/{service}/user/{user_id}/post/{post_id}", self.site)
    }

    /// `{site}/{service}/user/{userId}`
    pub fn user_url_for(&self, service: &str, user_id: &str) -> String {
        format!("{}/{service}/user/{user_id}", self.site)
    }

    /// `{images}/icons/{service}/{id}`
    pub fn icon_url(&self, service: &str, user_id: &str) -> String {
        format!("{}/icons/{service}/{user_id}", self.images)
    }

    /// `{images}/banners/{service}/{id}`
    pub fn banner_url(&self, service: &str, user_id: &str) -> String {
        format!("{}/banners/{service}/{user_id}", self.images)
    }

    /// Matches a post URL.
    pub fn parse_video_url(&self, url: &str) -> ParsedUrl {
        let Ok(parsed) = Url::parse(url) else {
            return ParsedUrl::Malformed;
        };

        match POST_PATH_RE.captures(parsed.path()) {
            Some(caps) => ParsedUrl::Video(PostRef {
                service: caps["service"].to_string(),
                user_id: caps["user"].to_string(),
                post_id: caps["post"].to_string(),
            }),
            None => ParsedUrl::Malformed,
        }
    }

    /// Matches a channel URL.
    pub fn parse_user_url(&self, url: &str) -> ParsedUrl {
        let Ok(parsed) = Url::parse(url) else {
            return ParsedUrl::Malformed;
        };

        match USER_PATH_RE.captures(parsed.path()) {
            Some(caps) => ParsedUrl::User(CreatorRef {
                service: caps["service"].to_string(),
                user_id: caps["user"].to_string(),
            }),
            None => ParsedUrl::Malformed,
        }
    }

    /// Matches either shape.
    pub fn parse(&self, url: &str) -> ParsedUrl {
        match self.parse_video_url(url) {
            ParsedUrl::Malformed => self.parse_user_url(url),
            video => video,
        }
    }

    /// True if `url` is a post URL on the configured site.
    pub fn is_video_url(&self, url: &str) -> bool {
        self.is_own_origin(url) && matches!(self.parse_video_url(url), ParsedUrl::Video(_))
    }

    /// True if `url` is a channel URL on the configured site.
    pub fn is_user_url(&self, url: &str) -> bool {
        self.is_own_origin(url) && matches!(self.parse_user_url(url), ParsedUrl::User(_))
    }

    fn is_own_origin(&self, url: &str) -> bool {
        Url::parse(url).is_ok_and(|u| u.origin() == self.site_origin)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> UrlCodec {
        UrlCodec::new(&Endpoints::default()).unwrap()
    }

    #[test]
    fn test_parse_user_url() {
        let parsed = codec().parse_user_url("https://kemono.cr/patreon/user/12345");
        assert_eq!(
            parsed,
            ParsedUrl::User(CreatorRef {
                service: "patreon".to_string(),
                user_id: "12345".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_video_url() {
        let post = codec()
            .parse_video_url("https://kemono.cr/fanbox/user/77/post/9001")
            .into_video()
            .unwrap();
        assert_eq!(post.service, "fanbox");
        assert_eq!(post.user_id, "77");
        assert_eq!(post.post_id, "9001");
        assert_eq!(post.creator().user_id, "77");
    }

    #[test]
    fn test_video_url_roundtrip() {
        let codec = codec();
        for url in [
            "https://kemono.cr/patreon/user/12345/post/9",
            "https://kemono.cr/fanbox/user/1/post/2",
            "https://kemono.cr/gumroad/user/abc_DEF-1/post/xYz9",
        ] {
            let post = codec.parse_video_url(url).into_video().unwrap();
            assert_eq!(
                codec.video_url_for(&post.service, &post.user_id, &post.post_id),
                url
            );
        }
    }

    #[test]
    fn test_user_url_roundtrip() {
        let codec = codec();
        for url in [
            "https://kemono.cr/patreon/user/12345",
            "https://kemono.cr/subscribestar/user/some-name",
        ] {
            let creator = codec.parse_user_url(url).into_user().unwrap();
            assert_eq!(codec.user_url_for(&creator.service, &creator.user_id), url);
        }
    }

    #[test]
    fn test_trailing_slash_and_query_tolerated() {
        let codec = codec();
        assert!(codec.is_user_url("https://kemono.cr/patreon/user/1/"));
        assert!(codec.is_video_url("https://kemono.cr/patreon/user/1/post/2?o=50"));
    }

    #[test]
    fn test_malformed_urls() {
        let codec = codec();
        for url in [
            "not a url",
            "https://kemono.cr/",
            "https://kemono.cr/patreon",
            "https://kemono.cr/patreon/user",
            "https://kemono.cr/patreon/users/1",
            "https://kemono.cr/patreon/user/1/post",
            "https://kemono.cr/patre0n/user/1",
            "https://kemono.cr/patreon/user/1/post/2/extra",
        ] {
            assert_eq!(codec.parse(url), ParsedUrl::Malformed, "{url}");
        }
    }

    #[test]
    fn test_post_url_is_not_user_url() {
        let codec = codec();
        let url = "https://kemono.cr/patreon/user/1/post/2";
        assert!(codec.is_video_url(url));
        assert!(!codec.is_user_url(url));
        assert!(matches!(codec.parse(url), ParsedUrl::Video(_)));
    }

    #[test]
    fn test_foreign_origin_is_not_owned_but_parses() {
        let codec = codec();
        let url = "https://kemono.su/patreon/user/1";
        assert!(!codec.is_user_url(url));
        assert!(!codec.is_user_url("http://kemono.cr/patreon/user/1"));
        assert!(matches!(codec.parse_user_url(url), ParsedUrl::User(_)));
    }

    #[test]
    fn test_asset_urls() {
        let codec = codec();
        assert_eq!(
            codec.icon_url("patreon", "12345"),
            "https://img.kemono.cr/icons/patreon/12345"
        );
        assert_eq!(
            codec.banner_url("patreon", "12345"),
            "https://img.kemono.cr/banners/patreon/12345"
        );
    }
}
