use httpmock::Method::GET;

use crate::common::{client_for, fixture, setup_server};
use market_pulse::{BookmarkStore, NewsFeedAggregator, PulseClient, PulseError};

#[tokio::test]
async fn non_2xx_is_a_status_error_and_keeps_loaded_articles() {
    let server = setup_server();
    let mut ok = server.mock(|when, then| {
        when.method(GET).path("/v2/everything").query_param("q", "business");
        then.status(200)
            .header("content-type", "application/json")
            .body(fixture("news", "business", "json"));
    });

    let feed = NewsFeedAggregator::new(&client_for(&server), BookmarkStore::in_memory());
    feed.fetch_feed("business", 20).await.unwrap();
    ok.delete();

    let fail = server.mock(|when, then| {
        when.method(GET).path("/v2/everything");
        then.status(503).body("unavailable");
    });

    let err = feed.fetch_feed("business", 20).await.unwrap_err();
    fail.assert();
    match &err {
        PulseError::Status { status, url } => {
            assert_eq!(*status, 503);
            assert!(url.contains("/v2/everything"));
            assert!(url.contains("apiKey=***"), "key must be redacted: {url}");
        }
        other => panic!("expected Status error, got {other:?}"),
    }
    assert!(err.is_transient());

    let state = feed.state().snapshot();
    assert_eq!(state.articles.len(), 3, "failed refresh must not clear the feed");
    assert!(!state.is_loading);
    assert!(state.error.as_deref().unwrap().contains("503"));
    assert_eq!(feed.suggestions_for("opec", 1), vec!["opec"]);
}

#[tokio::test]
async fn schema_mismatch_is_a_decode_error() {
    let server = setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/v2/everything");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"status":"ok","totalResults":3}"#);
    });

    let feed = NewsFeedAggregator::new(&client_for(&server), BookmarkStore::in_memory());
    let err = feed.fetch_feed("business", 20).await.unwrap_err();
    mock.assert();
    assert!(err.is_decode(), "got {err:?}");
    assert!(!err.is_transient());
}

#[tokio::test]
async fn upstream_error_body_is_an_api_error() {
    let server = setup_server();
    let _mock = server.mock(|when, then| {
        when.method(GET).path("/v2/everything");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"status":"error","code":"rateLimited","message":"Too many requests."}"#);
    });

    let feed = NewsFeedAggregator::new(&client_for(&server), BookmarkStore::in_memory());
    let err = feed.fetch_feed("business", 20).await.unwrap_err();
    assert!(matches!(err, PulseError::Api(ref m) if m.contains("rateLimited")));
}

#[tokio::test]
async fn empty_body_is_an_empty_response() {
    let server = setup_server();
    let _mock = server.mock(|when, then| {
        when.method(GET).path("/v2/everything");
        then.status(200).body("");
    });

    let feed = NewsFeedAggregator::new(&client_for(&server), BookmarkStore::in_memory());
    let err = feed.fetch_feed("business", 20).await.unwrap_err();
    assert!(matches!(err, PulseError::EmptyResponse { .. }), "got {err:?}");
}

#[tokio::test]
async fn missing_key_fails_before_any_request() {
    let server = setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/v2/everything");
        then.status(200).body("{}");
    });

    let client = PulseClient::builder()
        .base_news(url::Url::parse(&format!("{}/v2/", server.base_url())).unwrap())
        .build()
        .unwrap();
    let feed = NewsFeedAggregator::new(&client, BookmarkStore::in_memory());
    let err = feed.fetch_feed("business", 20).await.unwrap_err();
    assert!(matches!(err, PulseError::MissingApiKey(_)));
    mock.assert_hits(0);
}
