//! Kemono REST API client.
//!
//! # Endpoints
//!
//! ```text
//! GET {api}/posts?o={offset}&q={query}                          -> {"count": n, "posts": [Post]}
//! GET {api}/{service}/user/{user}/posts?o={offset}[&q={query}]  -> [Post]
//! GET {api}/{service}/user/{user}/profile                       -> Creator
//! GET {api}/{service}/user/{user}/post/{post}                   -> {"post": Post, "videos": [Video]}
//! GET {api}/{service}/user/{user}/post/{post}/comments          -> [Comment]
//! GET {api}/creators                                            -> [Creator]
//! ```
//!
//! # Post Format
//!
//! ```json
//! {
//!   "id": "9",
//!   "user": "12345",
//!   "service": "patreon",
//!   "title": "Clip",
//!   "content": "<p>hello</p>",
//!   "published": "2024-01-02T03:04:05",
//!   "file": {"name": "x.mp4", "path": "/data/x.mp4"},
//!   "attachments": [],
//!   "videos": [{"name": "x.mp4", "server": "https://n1.kemono.cr", "path": "/data/x.mp4"}]
//! }
//! ```

use std::fmt;
use std::sync::Arc;

use kemono_fetch::HttpClient;
use serde::de::{self, DeserializeOwned, Deserializer, Visitor};
use serde::Deserialize;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::error::KemonoError;

// ============================================================================
// Call-site messages
// ============================================================================

/// Message for a failed profile lookup.
pub const MSG_CREATOR: &str = "Failed to get creator";
/// Message for a failed global search.
pub const MSG_VIDEOS: &str = "Failed to get videos";
/// Message for a failed channel-scoped search.
pub const MSG_CREATOR_SEARCH: &str = "Failed to search creator's posts";
/// Message for a failed channel listing.
pub const MSG_CREATOR_POSTS: &str = "Failed to get creator's posts";
/// Message for a failed creator list.
pub const MSG_CREATORS: &str = "Failed to get creators";
/// Message for a failed post lookup.
pub const MSG_VIDEO_DETAILS: &str = "Failed to get video details";
/// Message for a failed comment listing.
pub const MSG_COMMENTS: &str = "Failed to get comments";

// ============================================================================
// Wire Records
// ============================================================================

/// A post as returned by listing and detail endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct PostRecord {
    /// Post id.
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    /// Post title.
    #[serde(default)]
    pub title: Option<String>,
    /// Publication timestamp.
    #[serde(default)]
    pub published: Option<String>,
    /// Service namespace.
    pub service: String,
    /// Creator's user id.
    #[serde(deserialize_with = "string_or_number")]
    pub user: String,
    /// HTML body.
    #[serde(default)]
    pub content: Option<String>,
    /// Primary file.
    #[serde(default)]
    pub file: Option<FileRef>,
    /// Other files.
    #[serde(default)]
    pub attachments: Vec<FileRef>,
    /// Playable videos, present on some detail responses.
    #[serde(default)]
    pub videos: Vec<VideoFile>,
}

impl PostRecord {
    /// Path of the primary file, if any.
    pub fn file_path(&self) -> Option<&str> {
        self.file.as_ref()?.path.as_deref()
    }
}

/// A file reference; both fields may be absent on text-only posts.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileRef {
    /// Original file name.
    #[serde(default)]
    pub name: Option<String>,
    /// Path under the data server.
    #[serde(default)]
    pub path: Option<String>,
}

/// A playable video file.
#[derive(Debug, Clone, Deserialize)]
pub struct VideoFile {
    /// File name.
    #[serde(default)]
    pub name: String,
    /// Data server origin, e.g. `https://n1.kemono.cr`.
    pub server: String,
    /// Path on the data server.
    pub path: String,
}

/// Response of the post detail endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct PostDetailsResponse {
    /// The post.
    pub post: PostRecord,
    /// Playable videos resolved by the server.
    #[serde(default)]
    pub videos: Vec<VideoFile>,
}

/// Response of the global search endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    /// Total hits, when reported.
    #[serde(default)]
    pub count: Option<u64>,
    /// Posts on this page.
    #[serde(default)]
    pub posts: Vec<PostRecord>,
}

/// A creator profile.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatorRecord {
    /// User id within the service.
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Service namespace.
    pub service: String,
    /// Favorite count, when reported.
    #[serde(default)]
    pub favorited: Option<u64>,
}

/// A comment on a post.
#[derive(Debug, Clone, Deserialize)]
pub struct CommentRecord {
    /// Comment id.
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub id: Option<String>,
    /// Commenter's id.
    #[serde(deserialize_with = "string_or_number")]
    pub commenter: String,
    /// Commenter's display name.
    #[serde(default)]
    pub commenter_name: Option<String>,
    /// Comment body.
    #[serde(default)]
    pub content: String,
    /// Publication timestamp.
    #[serde(default)]
    pub published: Option<String>,
}

// ============================================================================
// Id deserialization
// ============================================================================

/// Ids arrive as strings on most services and as numbers on a few.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct IdVisitor;

    impl Visitor<'_> for IdVisitor {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a string or integer id")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
            Ok(v)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }
    }

    deserializer.deserialize_any(IdVisitor)
}

fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Wrapper(#[serde(deserialize_with = "string_or_number")] String);

    Ok(Option::<Wrapper>::deserialize(deserializer)?.map(|Wrapper(id)| id))
}

// ============================================================================
// API Client
// ============================================================================

/// Client for the Kemono REST API.
#[derive(Debug, Clone)]
pub struct KemonoApiClient {
    http: Arc<HttpClient>,
    api_base: String,
}

impl KemonoApiClient {
    /// Creates a client for the API rooted at `api_base`.
    pub fn new(http: Arc<HttpClient>, api_base: impl Into<String>) -> Self {
        Self {
            http,
            api_base: api_base.into(),
        }
    }

    /// The API base URL.
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// GET `{api}/{service}/user/{user}/profile`
    #[instrument(skip(self))]
    pub async fn fetch_profile(
        &self,
        service: &str,
        user_id: &str,
    ) -> Result<CreatorRecord, KemonoError> {
        let url = format!("{}/{service}/user/{user_id}/profile", self.api_base);
        self.get_json(&url, MSG_CREATOR).await
    }

    /// GET `{api}/posts?o={offset}&q={query}`
    ///
    /// The `q` parameter is sent even when the query is empty.
    #[instrument(skip(self))]
    pub async fn search_posts(
        &self,
        query: &str,
        offset: u32,
    ) -> Result<SearchResponse, KemonoError> {
        let url = url_with_params(
            &format!("{}/posts", self.api_base),
            &[("o", offset.to_string()), ("q", query.to_string())],
        )?;
        self.get_json(url.as_str(), MSG_VIDEOS).await
    }

    /// GET `{api}/{service}/user/{user}/posts?o={offset}[&q={query}]`
    ///
    /// With a query this is the channel-scoped search, without one it is the
    /// plain channel listing. The two report different failure messages.
    #[instrument(skip(self))]
    pub async fn creator_posts(
        &self,
        service: &str,
        user_id: &str,
        offset: u32,
        query: Option<&str>,
    ) -> Result<Vec<PostRecord>, KemonoError> {
        let mut params = vec![("o", offset.to_string())];
        let context = match query {
            Some(q) => {
                params.push(("q", q.to_string()));
                MSG_CREATOR_SEARCH
            }
            None => MSG_CREATOR_POSTS,
        };

        let url = url_with_params(
            &format!("{}/{service}/user/{user_id}/posts", self.api_base),
            &params,
        )?;
        self.get_json(url.as_str(), context).await
    }

    /// GET `{api}/creators`
    #[instrument(skip(self))]
    pub async fn creators(&self) -> Result<Vec<CreatorRecord>, KemonoError> {
        let url = format!("{}/creators", self.api_base);
        self.get_json(&url, MSG_CREATORS).await
    }

    /// GET `{api}/{service}/user/{user}/post/{post}`
    #[instrument(skip(self))]
    pub async fn post(
        &self,
        service: &str,
        user_id: &str,
        post_id: &str,
    ) -> Result<PostDetailsResponse, KemonoError> {
        let url = format!(
            "{}/{service}/user/{user_id}/post/{post_id}",
            self.api_base
        );
        self.get_json(&url, MSG_VIDEO_DETAILS).await
    }

    /// GET `{api}/{service}/user/{user}/post/{post}/comments`
    #[instrument(skip(self))]
    pub async fn comments(
        &self,
        service: &str,
        user_id: &str,
        post_id: &str,
    ) -> Result<Vec<CommentRecord>, KemonoError> {
        let url = format!(
            "{}/{service}/user/{user_id}/post/{post_id}/comments",
            self.api_base
        );
        self.get_json(&url, MSG_COMMENTS).await
    }

    /// Sends a GET and decodes the JSON body.
    ///
    /// Any non-success status becomes [`KemonoError::RequestFailed`] carrying
    /// `context`.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        context: &'static str,
    ) -> Result<T, KemonoError> {
        debug!(url = %url, "Fetching from API");

        let response = self.http.get(url).await?;
        let status = response.status();

        if !status.is_success() {
            warn!(url = %url, status = %status, context, "Request failed");
            return Err(KemonoError::RequestFailed { context, status });
        }

        let body = response.text().await?;
        let parsed = serde_json::from_str(&body)?;
        Ok(parsed)
    }
}

/// Appends query parameters to `base`, percent-encoding the values.
fn url_with_params(base: &str, params: &[(&str, String)]) -> Result<Url, KemonoError> {
    Url::parse_with_params(base, params.iter().map(|(k, v)| (*k, v.as_str())))
        .map_err(|e| KemonoError::InvalidEndpoint(format!("{base}: {e}")))
}

// ============================================================================
// Tests
// ============================================================================
