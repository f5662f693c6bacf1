mod common;

use serde_json::{Value, json};
use shorturl::infrastructure::dns::StaticResolver;
use shorturl::infrastructure::persistence::MemoryMappingRepository;
use std::sync::Arc;

#[tokio::test]
async fn test_shorten_form_submission() {
    let server = common::create_test_server(common::create_test_state());

    let response = server
        .post("/api/shorturl")
        .form(&[("url", "https://www.freecodecamp.org")])
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(
        body,
        json!({ "original_url": "https://www.freecodecamp.org", "short_url": 1 })
    );
}

#[tokio::test]
async fn test_shorten_json_submission() {
    let server = common::create_test_server(common::create_test_state());

    let response = server
        .post("/api/shorturl")
        .json(&json!({ "url": "https://example.com/some/path?q=1" }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["original_url"], "https://example.com/some/path?q=1");
    assert_eq!(body["short_url"], 1);
}

#[tokio::test]
async fn test_shorten_is_idempotent() {
    let server = common::create_test_server(common::create_test_state());

    let first: Value = server
        .post("/api/shorturl")
        .json(&json!({ "url": "https://www.freecodecamp.org" }))
        .await
        .json();
    let other: Value = server
        .post("/api/shorturl")
        .json(&json!({ "url": "https://example.com" }))
        .await
        .json();
    let again: Value = server
        .post("/api/shorturl")
        .form(&[("url", "https://www.freecodecamp.org")])
        .await
        .json();

    assert_eq!(first["short_url"], 1);
    assert_eq!(other["short_url"], 2);
    assert_eq!(again, first);
}

#[tokio::test]
async fn test_shorten_trims_whitespace() {
    let server = common::create_test_server(common::create_test_state());

    let response = server
        .post("/api/shorturl")
        .json(&json!({ "url": "  https://example.com  " }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["original_url"], "https://example.com");
}

#[tokio::test]
async fn test_shorten_invalid_urls_report_uniform_error() {
    let server = common::create_test_server(common::create_test_state());

    for url in [
        "",
        "   ",
        "ftp://example.com",
        "example.com",
        "https://",
        "http://nonexistent.invalid",
    ] {
        let response = server
            .post("/api/shorturl")
            .json(&json!({ "url": url }))
            .await;

        assert_eq!(response.status_code(), 200, "url {url:?}");
        assert_eq!(
            response.json::<Value>(),
            json!({ "error": "invalid url" }),
            "url {url:?}"
        );
    }
}

#[tokio::test]
async fn test_shorten_missing_field_is_invalid() {
    let server = common::create_test_server(common::create_test_state());

    let response = server.post("/api/shorturl").json(&json!({})).await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.json::<Value>(), json!({ "error": "invalid url" }));
}

#[tokio::test]
async fn test_shorten_malformed_json_is_invalid() {
    let server = common::create_test_server(common::create_test_state());

    let response = server
        .post("/api/shorturl")
        .text("{not json")
        .content_type("application/json")
        .await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.json::<Value>(), json!({ "error": "invalid url" }));
}

#[tokio::test]
async fn test_shorten_invalid_url_creates_nothing() {
    let repository = Arc::new(MemoryMappingRepository::new());
    let state = common::create_test_state_with(
        repository.clone(),
        Arc::new(StaticResolver::new(common::KNOWN_HOSTS)),
    );
    let server = common::create_test_server(state);

    server
        .post("/api/shorturl")
        .json(&json!({ "url": "not a url" }))
        .await
        .assert_status_ok();

    let response = server
        .post("/api/shorturl")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    assert_eq!(response.json::<Value>()["short_url"], 1);
}

#[tokio::test]
async fn test_shorten_resolution_timeout_is_invalid() {
    let state = common::create_test_state_with(
        Arc::new(MemoryMappingRepository::new()),
        Arc::new(common::HangingResolver),
    );
    let server = common::create_test_server(state);

    let response = server
        .post("/api/shorturl")
        .json(&json!({ "url": "https://www.freecodecamp.org" }))
        .await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.json::<Value>(), json!({ "error": "invalid url" }));
}
