//! End-to-end flows against a local mock of the Kemono API.

use std::sync::Arc;

use chrono::{Local, NaiveDate, TimeZone};
use kemono_core::{ContentSource, CoreError, FeedType, SortOrder, SourceSettings};
use kemono_source::{Endpoints, KemonoSource, SourceConfig};
use mockito::{Matcher, Mock, Server, ServerGuard};
use serde_json::{Value, json};

const PLUGIN_ID: &str = "test-plugin";

// ============================================================================
// Helpers
// ============================================================================

async fn setup() -> (ServerGuard, KemonoSource) {
    let server = Server::new_async().await;
    let endpoints = Endpoints::with_api(format!("{}/api/v1", server.url()));
    let mut source = KemonoSource::with_endpoints(endpoints).unwrap();
    source.enable(SourceConfig::new(PLUGIN_ID), SourceSettings::new());
    (server, source)
}

fn post(id: usize, user: &str, path: &str) -> Value {
    json!({
        "id": id.to_string(),
        "user": user,
        "service": "patreon",
        "title": format!("Post {id}"),
        "published": "2024-01-02T03:04:05",
        "file": {"name": "f", "path": path},
        "attachments": []
    })
}

fn video_posts(count: usize) -> Vec<Value> {
    (0..count).map(|i| post(i, "12345", "/v.mp4")).collect()
}

fn query(pairs: &[(&str, &str)]) -> Matcher {
    Matcher::AllOf(
        pairs
            .iter()
            .map(|(k, v)| Matcher::UrlEncoded((*k).to_string(), (*v).to_string()))
            .collect(),
    )
}

async fn mock_profile(server: &mut ServerGuard, hits: usize) -> Mock {
    server
        .mock("GET", "/api/v1/patreon/user/12345/profile")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"id": "12345", "name": "Alice", "service": "patreon"}).to_string())
        .expect(hits)
        .create_async()
        .await
}

async fn mock_search(server: &mut ServerGuard, q: &str, o: &str, posts: Vec<Value>) -> Mock {
    let body = json!({"count": posts.len(), "posts": posts}).to_string();
    server
        .mock("GET", "/api/v1/posts")
        .match_query(query(&[("o", o), ("q", q)]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .expect(1)
        .create_async()
        .await
}

// ============================================================================
// Search and paging
// ============================================================================

#[tokio::test]
async fn test_search_filters_and_resolves_author_once() {
    let (mut server, source) = setup().await;
    let posts = vec![
        post(1, "12345", "/a.mp4"),
        post(2, "12345", "/b.jpg"),
        post(3, "12345", "/c.mp4"),
    ];
    let search = mock_search(&mut server, "clip", "0", posts).await;
    let profile = mock_profile(&mut server, 1).await;

    let pager = source.search("clip").await.unwrap();

    let ids: Vec<_> = pager.results().iter().map(|v| v.id.value.as_str()).collect();
    assert_eq!(ids, vec!["1", "3"]);
    assert!(!pager.has_more());

    let video = &pager.results()[0];
    assert_eq!(video.url, "https://kemono.cr/patreon/user/12345/post/1");
    assert_eq!(video.id.plugin_id, PLUGIN_ID);
    assert_eq!(video.author.name, "Alice");
    assert_eq!(
        video.author.thumbnail,
        "https://img.kemono.cr/icons/patreon/12345"
    );
    assert_eq!(source.author_cache().len().await, 1);

    search.assert_async().await;
    profile.assert_async().await;
}

#[tokio::test]
async fn test_empty_query_still_sends_q() {
    let (mut server, source) = setup().await;
    let search = mock_search(&mut server, "", "0", Vec::new()).await;

    let pager = source.search("").await.unwrap();
    assert!(pager.results().is_empty());
    assert!(!pager.has_more());

    search.assert_async().await;
}

#[tokio::test]
async fn test_full_page_has_more_then_short_page_ends() {
    let (mut server, source) = setup().await;
    let first = mock_search(&mut server, "x", "0", video_posts(50)).await;
    let second = mock_search(&mut server, "x", "50", video_posts(49)).await;
    let _profile = mock_profile(&mut server, 1).await;

    let mut pager = source.search("x").await.unwrap();
    assert_eq!(pager.page(), 1);
    assert_eq!(pager.results().len(), 50);
    assert!(pager.has_more());

    let page = pager.next_page().await.unwrap();
    assert_eq!(page.len(), 49);
    assert!(!page.has_more);
    assert_eq!(pager.page(), 2);

    // Exhausted: no further request.
    let page = pager.next_page().await.unwrap();
    assert!(page.is_empty());
    assert_eq!(pager.page(), 2);

    first.assert_async().await;
    second.assert_async().await;
}

#[tokio::test]
async fn test_has_more_uses_raw_count() {
    let (mut server, source) = setup().await;
    let mut posts = video_posts(10);
    posts.extend((10..50).map(|i| post(i, "12345", "/image.png")));
    let _search = mock_search(&mut server, "mixed", "0", posts).await;
    let _profile = mock_profile(&mut server, 1).await;

    let pager = source.search("mixed").await.unwrap();
    assert_eq!(pager.results().len(), 10);
    assert!(pager.has_more());
}

#[tokio::test]
async fn test_search_failure_reports_static_message() {
    let (mut server, source) = setup().await;
    let _search = server
        .mock("GET", "/api/v1/posts")
        .match_query(Matcher::Any)
        .with_status(500)
        .create_async()
        .await;

    let err = source.search("x").await.unwrap_err();
    assert!(matches!(err, CoreError::OperationFailed(ref m) if m == "Failed to get videos"));
}

#[tokio::test]
async fn test_author_failure_aborts_page() {
    let (mut server, source) = setup().await;
    let _search = mock_search(&mut server, "x", "0", video_posts(1)).await;
    let _profile = server
        .mock("GET", "/api/v1/patreon/user/12345/profile")
        .with_status(404)
        .create_async()
        .await;

    let err = source.search("x").await.unwrap_err();
    assert!(matches!(err, CoreError::OperationFailed(ref m) if m == "Failed to get creator"));
    assert!(source.author_cache().is_empty().await);
}

// ============================================================================
// Channels
// ============================================================================

#[tokio::test]
async fn test_get_channel() {
    let (mut server, source) = setup().await;
    let profile = mock_profile(&mut server, 1).await;

    let url = "https://kemono.cr/patreon/user/12345";
    assert!(source.is_channel_url(url));

    let channel = source.get_channel(url).await.unwrap();
    assert_eq!(channel.name, "Alice");
    assert_eq!(channel.id.value, "12345");
    assert_eq!(channel.id.platform, "Kemono");
    assert_eq!(channel.url, url);
    assert_eq!(channel.thumbnail, "https://img.kemono.cr/icons/patreon/12345");
    assert_eq!(channel.banner, "https://img.kemono.cr/banners/patreon/12345");
    assert_eq!(channel.subscribers, 0);

    profile.assert_async().await;
}

#[tokio::test]
async fn test_get_channel_failure() {
    let (mut server, source) = setup().await;
    let _profile = server
        .mock("GET", "/api/v1/patreon/user/12345/profile")
        .with_status(404)
        .create_async()
        .await;

    let err = source
        .get_channel("https://kemono.cr/patreon/user/12345")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Failed to get creator");
}

#[tokio::test]
async fn test_malformed_channel_url_sends_nothing() {
    let (mut server, source) = setup().await;
    let catch_all = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let err = source
        .get_channel("https://kemono.cr/patreon/posts")
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::MalformedUrl(_)));

    let err = source
        .get_channel_contents("https://kemono.cr/patreon/user/1/post/2")
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::MalformedUrl(_)));

    catch_all.assert_async().await;
}

#[tokio::test]
async fn test_channel_contents_pages_by_offset() {
    let (mut server, source) = setup().await;
    let first = server
        .mock("GET", "/api/v1/patreon/user/12345/posts")
        .match_query(query(&[("o", "0")]))
        .with_status(200)
        .with_body(Value::Array(video_posts(50)).to_string())
        .expect(1)
        .create_async()
        .await;
    let second = server
        .mock("GET", "/api/v1/patreon/user/12345/posts")
        .match_query(query(&[("o", "50")]))
        .with_status(200)
        .with_body("[]")
        .expect(1)
        .create_async()
        .await;
    let _profile = mock_profile(&mut server, 1).await;

    let mut pager = source
        .get_channel_contents("https://kemono.cr/patreon/user/12345")
        .await
        .unwrap();
    assert!(pager.has_more());

    let page = pager.next_page().await.unwrap();
    assert!(page.is_empty());
    assert!(!pager.has_more());

    first.assert_async().await;
    second.assert_async().await;
}

#[tokio::test]
async fn test_search_channel_contents_uses_channel_and_query() {
    let (mut server, source) = setup().await;
    let search = server
        .mock("GET", "/api/v1/patreon/user/12345/posts")
        .match_query(query(&[("o", "0"), ("q", "dance")]))
        .with_status(200)
        .with_body(Value::Array(video_posts(2)).to_string())
        .expect(1)
        .create_async()
        .await;
    let _profile = mock_profile(&mut server, 1).await;

    let pager = source
        .search_channel_contents("https://kemono.cr/patreon/user/12345", "dance")
        .await
        .unwrap();
    assert_eq!(pager.results().len(), 2);
    assert!(!pager.has_more());

    search.assert_async().await;
}

#[tokio::test]
async fn test_search_channel_contents_failure_message() {
    let (mut server, source) = setup().await;
    let _search = server
        .mock("GET", "/api/v1/patreon/user/12345/posts")
        .match_query(Matcher::Any)
        .with_status(503)
        .create_async()
        .await;

    let err = source
        .search_channel_contents("https://kemono.cr/patreon/user/12345", "q")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Failed to search creator's posts");
}

#[tokio::test]
async fn test_search_channels_filters_by_name() {
    let (mut server, source) = setup().await;
    let creators = server
        .mock("GET", "/api/v1/creators")
        .with_status(200)
        .with_body(
            json!([
                {"id": "1", "name": "Alice", "service": "patreon", "favorited": 3},
                {"id": "2", "name": "MALICE", "service": "fanbox"},
                {"id": "3", "name": "Bob", "service": "patreon"}
            ])
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let pager = source.search_channels("alice").await.unwrap();
    let names: Vec<_> = pager.results().iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["Alice", "MALICE"]);
    assert!(!pager.has_more());

    let malice = &pager.results()[1];
    assert_eq!(malice.url, "https://kemono.cr/fanbox/user/2");
    assert_eq!(malice.thumbnail, "https://img.kemono.cr/icons/fanbox/2");

    creators.assert_async().await;
}

// ============================================================================
// Video details and comments
// ============================================================================

#[tokio::test]
async fn test_get_content_details() {
    let (mut server, source) = setup().await;
    let details = server
        .mock("GET", "/api/v1/patreon/user/12345/post/9")
        .with_status(200)
        .with_body(
            json!({
                "post": {
                    "id": "9", "user": "12345", "service": "patreon", "title": "Clip",
                    "published": "2024-01-02T03:04:05",
                    "file": {"name": "x.mp4", "path": "/data/x.mp4"}
                },
                "videos": [{"name": "x.mp4", "server": "https://n1.kemono.cr", "path": "/data/x.mp4"}]
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;
    let profile = mock_profile(&mut server, 1).await;

    let url = "https://kemono.cr/patreon/user/12345/post/9";
    assert!(source.is_content_details_url(url));
    assert!(!source.is_channel_url(url));

    let video = source.get_content_details(url).await.unwrap();
    assert_eq!(video.video.name, "Clip");
    assert_eq!(video.video.url, url);
    assert_eq!(video.video.author.name, "Alice");
    assert_eq!(video.description, "");
    assert_eq!(
        video.primary_source().unwrap().url,
        "https://n1.kemono.cr/data/data/x.mp4"
    );

    details.assert_async().await;
    profile.assert_async().await;
}

#[tokio::test]
async fn test_get_content_details_failure_message() {
    let (mut server, source) = setup().await;
    let _details = server
        .mock("GET", "/api/v1/patreon/user/12345/post/9")
        .with_status(404)
        .create_async()
        .await;

    let err = source
        .get_content_details("https://kemono.cr/patreon/user/12345/post/9")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Failed to get video details");
}

#[tokio::test]
async fn test_get_comments() {
    let (mut server, source) = setup().await;
    let comments = server
        .mock("GET", "/api/v1/patreon/user/12345/post/9/comments")
        .with_status(200)
        .with_body(
            json!([
                {"id": "1", "commenter": "77", "commenter_name": "Bob", "content": "great",
                 "published": "2024-01-02T03:04:05.000000"},
                {"id": "2", "commenter": "78", "content": "meh", "published": "garbage"}
            ])
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let url = "https://kemono.cr/patreon/user/12345/post/9";
    let pager = source.get_comments(url).await.unwrap();
    assert!(!pager.has_more());

    let results = pager.results();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].context_url, url);
    assert_eq!(results[0].author.name, "Bob");
    assert_eq!(results[0].author.id.value, "77");
    let posted = NaiveDate::from_ymd_opt(2024, 1, 2)
        .unwrap()
        .and_hms_opt(3, 4, 5)
        .unwrap();
    let expected = Local.from_local_datetime(&posted).earliest().unwrap();
    assert_eq!(results[0].date, expected.timestamp());
    assert_eq!(results[1].author.name, "78");
    assert_eq!(results[1].date, 0);

    let replies = source.get_sub_comments(&results[0]).await.unwrap();
    assert!(replies.results().is_empty());
    assert!(!replies.has_more());

    comments.assert_async().await;
}

#[tokio::test]
async fn test_get_comments_failure_message() {
    let (mut server, source) = setup().await;
    let _comments = server
        .mock("GET", "/api/v1/patreon/user/12345/post/9/comments")
        .with_status(500)
        .create_async()
        .await;

    let err = source
        .get_comments("https://kemono.cr/patreon/user/12345/post/9")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Failed to get comments");
}

// ============================================================================
// Cache and capabilities
// ============================================================================

#[tokio::test]
async fn test_resolve_author_is_cached() {
    let (mut server, source) = setup().await;
    let profile = mock_profile(&mut server, 1).await;

    let first = source.resolve_author("patreon", "12345").await.unwrap();
    let second = source.resolve_author("patreon", "12345").await.unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.banner, "https://img.kemono.cr/banners/patreon/12345");

    profile.assert_async().await;
}

#[tokio::test]
async fn test_capabilities_and_static_operations() {
    let (_server, source) = setup().await;

    assert_eq!(source.platform(), "Kemono");
    assert!(source.search_capabilities().is_text_only());

    let caps = source.search_channel_contents_capabilities();
    assert_eq!(caps.types, vec![FeedType::Mixed]);
    assert_eq!(caps.sorts, vec![SortOrder::Chronological]);
    assert!(caps.filters.is_empty());

    assert!(source.get_home().await.unwrap().results().is_empty());
    assert!(source.search_suggestions("a").await.unwrap().is_empty());
    assert_eq!(source.config().id, PLUGIN_ID);
}
