//! Contract tests for the liveness probe against a local mock server.

use std::sync::Arc;
use std::time::Duration;

use curator_liveness::{check_dataset_urls, UrlCache, UrlProbe};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn probe_with(cache: Arc<UrlCache>, timeout: Duration) -> UrlProbe {
    let http = reqwest::Client::builder()
        .user_agent("curator-tests")
        .timeout(timeout)
        .build()
        .unwrap();
    UrlProbe::with_cache(http, cache)
}

#[tokio::test]
async fn alive_url_yields_no_verdict() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data.csv"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let probe = probe_with(Arc::new(UrlCache::new()), Duration::from_secs(5));
    let verdict = probe.verdict(&format!("{}/data.csv", server.uri())).await;
    assert_eq!(verdict, None);
}

#[tokio::test]
async fn missing_page_reports_bad_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gone.csv"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let probe = probe_with(Arc::new(UrlCache::new()), Duration::from_secs(5));
    let verdict = probe.verdict(&format!("{}/gone.csv", server.uri())).await;
    assert_eq!(
        verdict.as_deref(),
        Some("The web server responded with a bad status code: 404 Not Found"),
    );
}

#[tokio::test]
async fn unreachable_server_reports_connection_error() {
    // A port nothing listens on.
    let probe = probe_with(Arc::new(UrlCache::new()), Duration::from_millis(500));
    let verdict = probe.verdict("http://127.0.0.1:1/data.csv").await;
    let message = verdict.expect("connection must fail");
    assert!(
        message.starts_with("An error occurred when trying to connect to the web server")
            || message.starts_with("A timeout occurred when trying to connect to the web server"),
        "unexpected message: {message}",
    );
}

#[tokio::test]
async fn slow_server_reports_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let probe = probe_with(Arc::new(UrlCache::new()), Duration::from_millis(200));
    let verdict = probe.verdict(&format!("{}/slow", server.uri())).await;
    assert!(
        verdict
            .expect("probe must time out")
            .starts_with("A timeout occurred when trying to connect to the web server"),
    );
}

#[tokio::test]
async fn second_probe_within_window_hits_the_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data.csv"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1) // the second validation must not reach the network
        .mount(&server)
        .await;

    let probe = probe_with(Arc::new(UrlCache::new()), Duration::from_secs(5));
    let url = format!("{}/data.csv", server.uri());
    assert_eq!(probe.verdict(&url).await, None);
    assert_eq!(probe.verdict(&url).await, None);
}

#[tokio::test]
async fn stale_verdict_triggers_a_fresh_probe() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data.csv"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&server)
        .await;

    let cache = Arc::new(UrlCache::with_freshness(Duration::from_secs(0)));
    let probe = probe_with(cache, Duration::from_secs(5));
    let url = format!("{}/data.csv", server.uri());
    probe.verdict(&url).await;
    probe.verdict(&url).await;
}

#[tokio::test]
async fn walker_keys_verdicts_by_field_and_index() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ok"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let dataset = json!({
        "url": format!("{}/ok", server.uri()),
        "resources": [
            {"url": format!("{}/ok", server.uri())},
            {"url": format!("{}/gone", server.uri())},
        ],
    });

    let probe = probe_with(Arc::new(UrlCache::new()), Duration::from_secs(5));
    let tree = check_dataset_urls(&probe, &dataset)
        .await
        .expect("one resource is dead");
    assert!(tree.get("url").is_none());
    let resources = tree.get("resources").unwrap();
    assert!(resources.get_index(0).is_none());
    assert_eq!(
        resources.get_index(1).and_then(|t| t.get("url")).and_then(|t| t.as_leaf()),
        Some("The web server responded with a bad status code: 404 Not Found"),
    );
    assert!(tree.mirrors_shape_of(&dataset));
}
