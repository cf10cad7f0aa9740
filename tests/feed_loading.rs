//! Integration tests for loading the feed document over HTTP and from disk.
//!
//! HTTP behaviour is exercised against a wiremock server; each test starts
//! its own server for isolation.

use econfeed::feed::{FeedError, FeedLoader, FeedSource, OTHER_CATEGORY};
use pretty_assertions::assert_eq;
use std::path::PathBuf;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SAMPLE: &str = include_str!("fixtures/feed-sample.json");

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/feed-sample.json")
}

fn remote_loader(server: &MockServer) -> FeedLoader {
    let url = format!("{}/data/feed-latest.json", server.uri());
    let source = FeedSource::parse(&url).unwrap();
    FeedLoader::new(reqwest::Client::new(), source)
}

async fn serve(body: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/feed-latest.json"))
        .respond_with(body)
        .mount(&server)
        .await;
    server
}

// ============================================================================
// Remote feeds
// ============================================================================

#[tokio::test]
async fn test_remote_feed_loads_and_skips_malformed_items() {
    let server = serve(ResponseTemplate::new(200).set_body_string(SAMPLE)).await;

    let document = remote_loader(&server).load().await.unwrap();

    let ids: Vec<&str> = document
        .items
        .iter()
        .filter_map(|i| i.id.as_deref())
        .collect();
    assert_eq!(ids, vec!["a1", "a2", "a3", "a5", "a6"]);
    assert_eq!(document.total_items, Some(6));
    assert_eq!(document.version.as_deref(), Some("1.0"));
    assert!(document.generated_at.is_some());
}

#[tokio::test]
async fn test_remote_feed_item_defaults() {
    let server = serve(ResponseTemplate::new(200).set_body_string(SAMPLE)).await;
    let document = remote_loader(&server).load().await.unwrap();

    let kospi = &document.items[2];
    assert!(kospi.tags.is_empty());
    assert_eq!(kospi.summary.display_text(), "");

    let unclassified = &document.items[3];
    assert_eq!(unclassified.category, OTHER_CATEGORY);
    assert_eq!(unclassified.published_at, None);
    assert!(!unclassified.is_trending);

    let krw = &document.items[1];
    assert_eq!(krw.summary.display_text(), "환율이 상승했다.");
}

#[tokio::test]
async fn test_http_error_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let err = remote_loader(&server).load().await.unwrap_err();
    assert!(matches!(err, FeedError::HttpStatus(503)));
}

#[tokio::test]
async fn test_non_object_document_fails() {
    let server = serve(ResponseTemplate::new(200).set_body_string("[1, 2, 3]")).await;
    let err = remote_loader(&server).load().await.unwrap_err();
    assert!(matches!(err, FeedError::Parse(_)));
}

#[tokio::test]
async fn test_slow_server_times_out() {
    let server = serve(
        ResponseTemplate::new(200)
            .set_body_string(SAMPLE)
            .set_delay(Duration::from_secs(5)),
    )
    .await;

    let err = remote_loader(&server)
        .with_timeout(Duration::from_millis(200))
        .load()
        .await
        .unwrap_err();
    assert!(matches!(err, FeedError::Timeout));
}

// ============================================================================
// Local feeds
// ============================================================================

#[tokio::test]
async fn test_local_path_and_file_url_agree() {
    let by_path = FeedSource::parse(fixture_path().to_str().unwrap()).unwrap();
    assert!(matches!(by_path, FeedSource::Local(_)));

    let file_url = url::Url::from_file_path(fixture_path()).unwrap();
    let by_url = FeedSource::parse(file_url.as_str()).unwrap();
    assert_eq!(by_path, by_url);

    let document = FeedLoader::new(reqwest::Client::new(), by_path)
        .load()
        .await
        .unwrap();
    assert_eq!(document.items.len(), 5);
}

#[tokio::test]
async fn test_missing_local_file_fails() {
    let source = FeedSource::parse("/nonexistent/econfeed/feed-latest.json").unwrap();
    let err = FeedLoader::new(reqwest::Client::new(), source)
        .load()
        .await
        .unwrap_err();
    assert!(matches!(err, FeedError::Io { .. }));
}
