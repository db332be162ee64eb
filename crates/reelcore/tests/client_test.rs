//! Integration tests for InstagramClient against a mocked Instagram API (wiremock)
//!
//! Run with: cargo test -p reelcore --test client_test

use std::collections::BTreeMap;
use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{any, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use reelcore::{
    ClientOptions, Credentials, InstagramClient, MediaItem, MediaKind, ProfileClient, ProfileError, UserId,
    DEFAULT_POST_COUNT,
};

fn test_credentials() -> Credentials {
    let cookies: BTreeMap<String, String> = [("sessionid", "abc123"), ("csrftoken", "xyz789")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let headers: BTreeMap<String, String> = [("X-IG-App-ID", "936619743392459")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Credentials::new(cookies, headers)
}

fn client_for(server: &MockServer) -> InstagramClient {
    InstagramClient::new(ClientOptions {
        base_url: server.uri(),
        ..ClientOptions::default()
    })
    .unwrap()
}

fn logged_in_client(server: &MockServer) -> InstagramClient {
    let mut client = client_for(server);
    client.login(test_credentials()).unwrap();
    client
}

fn image(url: &str) -> serde_json::Value {
    json!({"image_versions2": {"candidates": [{"url": url}]}})
}

#[tokio::test]
async fn test_operations_fail_before_login_without_network() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let user_id = UserId::from("1");

    assert!(matches!(
        client.resolve_user_id("alice").await,
        Err(ProfileError::NotLoggedIn)
    ));
    assert!(matches!(client.list_stories(&user_id).await, Err(ProfileError::NotLoggedIn)));
    assert!(matches!(client.list_posts(&user_id, 3).await, Err(ProfileError::NotLoggedIn)));

    let received = server.received_requests().await.unwrap();
    assert!(received.is_empty());
}

#[tokio::test]
async fn test_resolve_user_id_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/users/web_profile_info/"))
        .and(query_param("username", "alice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"user": {"id": "123456"}}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = logged_in_client(&server);
    let user_id = client.resolve_user_id("alice").await.unwrap();
    assert_eq!(user_id, UserId::from("123456"));
}

#[tokio::test]
async fn test_requests_replay_cookies_and_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/users/web_profile_info/"))
        .and(header("cookie", "csrftoken=xyz789; sessionid=abc123"))
        .and(header("x-ig-app-id", "936619743392459"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"user": {"id": "1"}}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = logged_in_client(&server);
    assert_eq!(client.resolve_user_id("bob").await.unwrap().as_str(), "1");
}

#[tokio::test]
async fn test_resolve_user_id_missing_path_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/users/web_profile_info/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"user": null}, "status": "ok"})))
        .mount(&server)
        .await;

    let client = logged_in_client(&server);
    assert!(matches!(
        client.resolve_user_id("ghost").await,
        Err(ProfileError::MalformedResponse(_))
    ));
}

#[tokio::test]
async fn test_non_json_body_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/users/web_profile_info/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let client = logged_in_client(&server);
    assert!(matches!(
        client.resolve_user_id("alice").await,
        Err(ProfileError::MalformedResponse(_))
    ));
}

#[tokio::test]
async fn test_not_found_status_is_request_failed() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(404).set_body_string("{\"message\":\"not found\"}"))
        .mount(&server)
        .await;

    let client = logged_in_client(&server);
    let user_id = UserId::from("1");

    for result in [
        client.resolve_user_id("alice").await.map(|_| ()),
        client.list_stories(&user_id).await.map(|_| ()),
        client.list_posts(&user_id, 3).await.map(|_| ()),
    ] {
        match result {
            Err(ProfileError::RequestFailed { status, body }) => {
                assert_eq!(status, 404);
                assert_eq!(body, "{\"message\":\"not found\"}");
            }
            other => panic!("expected RequestFailed, got {:?}", other),
        }
    }
}

#[tokio::test]
async fn test_list_stories_classifies_items_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/feed/reels_media/"))
        .and(query_param("reel_ids", "42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "reels": {
                "42": {
                    "items": [
                        image("https://cdn/s1.jpg"),
                        {
                            "video_versions": [{"url": "https://cdn/s2.mp4"}],
                            "image_versions2": {"candidates": [{"url": "https://cdn/s2.jpg"}]}
                        }
                    ]
                }
            },
            "status": "ok"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = logged_in_client(&server);
    let stories = client.list_stories(&UserId::from("42")).await.unwrap();

    let media: Vec<MediaItem> = stories.into_iter().map(|s| s.media).collect();
    assert_eq!(
        media,
        vec![MediaItem::image("https://cdn/s1.jpg"), MediaItem::video("https://cdn/s2.mp4")]
    );
}

#[tokio::test]
async fn test_list_stories_missing_reel_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/feed/reels_media/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"reels": {}, "status": "ok"})))
        .mount(&server)
        .await;

    let client = logged_in_client(&server);
    let stories = client.list_stories(&UserId::from("42")).await.unwrap();
    assert!(stories.is_empty());
}

#[tokio::test]
async fn test_list_posts_carousel_single_and_caption() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/feed/user/42/"))
        .and(query_param("count", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {
                    "carousel_media": [
                        image("https://cdn/c1.jpg"),
                        {"video_versions": [{"url": "https://cdn/c2.mp4"}]},
                        image("https://cdn/c3.jpg")
                    ],
                    "caption": {"text": "carousel"}
                },
                {
                    "video_versions": [{"url": "https://cdn/reel.mp4"}],
                    "image_versions2": {"candidates": [{"url": "https://cdn/reel.jpg"}]},
                    "caption": null
                }
            ],
            "more_available": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = logged_in_client(&server);
    let posts = client.list_posts(&UserId::from("42"), 3).await.unwrap();

    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].media.len(), 3);
    assert_eq!(
        posts[0].media.iter().map(|m| m.kind).collect::<Vec<_>>(),
        vec![MediaKind::Image, MediaKind::Video, MediaKind::Image]
    );
    assert_eq!(posts[0].caption, "carousel");
    assert_eq!(posts[1].media, vec![MediaItem::video("https://cdn/reel.mp4")]);
    assert_eq!(posts[1].caption, "");
}

#[tokio::test]
async fn test_list_latest_posts_uses_default_count() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/feed/user/7/"))
        .and(query_param("count", DEFAULT_POST_COUNT.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = logged_in_client(&server);
    let posts = client.list_latest_posts(&UserId::from("7")).await.unwrap();
    assert!(posts.is_empty());
}

#[tokio::test]
async fn test_identical_responses_give_identical_results() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/feed/user/42/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"carousel_media": [image("a"), image("b")], "caption": {"text": "x"}}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/feed/reels_media/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "reels": {"42": {"items": [image("s")]}}
        })))
        .mount(&server)
        .await;

    let client = logged_in_client(&server);
    let user_id = UserId::from("42");

    let first_posts = client.list_posts(&user_id, 10).await.unwrap();
    let second_posts = client.list_posts(&user_id, 10).await.unwrap();
    assert_eq!(first_posts, second_posts);

    let first_stories = client.list_stories(&user_id).await.unwrap();
    let second_stories = client.list_stories(&user_id).await.unwrap();
    assert_eq!(first_stories, second_stories);
}

#[tokio::test]
async fn test_timeout_surfaces_as_transport_error() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": {"user": {"id": "1"}}}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let mut client = logged_in_client(&server);
    client.set_timeout(Duration::from_millis(200)).unwrap();

    match client.resolve_user_id("slow").await {
        Err(ProfileError::Transport(e)) => assert!(e.is_timeout()),
        other => panic!("expected Transport timeout, got {:?}", other),
    }
}

#[tokio::test]
async fn test_login_from_file() {
    use std::io::Write;

    let server = MockServer::start().await;
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"cookies": {{"sessionid": "s"}}, "headers": {{}}}}"#).unwrap();

    let mut client = client_for(&server);
    client.login_from_file(file.path()).unwrap();
    assert!(client.is_logged_in());
    assert_eq!(client.credentials().cookies.get("sessionid").map(String::as_str), Some("s"));
}
