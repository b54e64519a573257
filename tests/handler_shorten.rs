mod common;

use axum::{Router, http::StatusCode, routing::post};
use axum_test::TestServer;
use linkmagic::api::handlers::shorten_handler;
use linkmagic::domain::repositories::LinkRepository;
use linkmagic::state::AppState;
use serde_json::json;
use std::sync::Arc;

fn server(state: AppState) -> TestServer {
    let app = Router::new()
        .route("/api/shorten", post(shorten_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_shorten_success() {
    let (state, repo) = common::create_test_state();
    let server = server(state);

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com/some/long/path?q=1" }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let json = response.json::<serde_json::Value>();
    let code = json["code"].as_str().unwrap();

    assert_eq!(code.len(), 6);
    assert!(code.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    assert_eq!(json["short_url"], format!("{}/{}", common::BASE_URL, code));
    assert_eq!(json["original_url"], "https://example.com/some/long/path?q=1");
    assert!(
        json["qr_code_url"]
            .as_str()
            .unwrap()
            .starts_with("https://api.qrserver.com/v1/create-qr-code/?data=")
    );

    let stored = repo.get(code).await.unwrap().unwrap();
    assert_eq!(stored.original_url, "https://example.com/some/long/path?q=1");
}

#[tokio::test]
async fn test_shorten_same_url_twice_gets_distinct_codes() {
    let (state, repo) = common::create_test_state();
    let server = server(state);

    let first = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com" }))
        .await
        .json::<serde_json::Value>();
    let second = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com" }))
        .await
        .json::<serde_json::Value>();

    assert_ne!(first["code"], second["code"]);
    assert_eq!(repo.len(), 2);
}

#[tokio::test]
async fn test_shorten_rejects_non_http_url() {
    let (state, repo) = common::create_test_state();
    let server = server(state);

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "ftp://example.com/file" }))
        .await;

    response.assert_status_bad_request();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "validation_error");
    assert!(repo.is_empty());
}

#[tokio::test]
async fn test_shorten_rejects_empty_url() {
    let (state, repo) = common::create_test_state();
    let server = server(state);

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "" }))
        .await;

    response.assert_status_bad_request();
    assert!(repo.is_empty());
}

#[tokio::test]
async fn test_shorten_rejects_oversized_url() {
    let (state, _repo) = common::create_test_state();
    let server = server(state);

    let long_url = format!("https://example.com/{}", "a".repeat(2048));

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": long_url }))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_shorten_store_unavailable_returns_503() {
    let state = common::create_test_state_with(Arc::new(common::UnavailableRepository), 6);
    let server = server(state);

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "store_unavailable");
}

#[tokio::test]
async fn test_shorten_exhausted_returns_503() {
    let (_, repo) = common::create_test_state();
    // Single-character codes: seeding all 36 leaves nothing to allocate.
    let state = common::create_test_state_with(repo.clone(), 1);

    for c in "0123456789abcdefghijklmnopqrstuvwxyz".chars() {
        common::create_test_link(repo.as_ref(), &c.to_string(), "https://taken.com").await;
    }

    let server = server(state);

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "allocation_exhausted");
    assert_eq!(json["error"]["details"]["attempts"], 5);
    assert_eq!(repo.len(), 36);
}

#[tokio::test]
async fn test_shorten_succeeds_when_short_url_is_too_long_for_qr() {
    let (mut state, repo) = common::create_test_state();
    // 498 + "/" + 6-char code = 505 characters, over the QR data limit.
    state.base_url = format!("https://{}.com", "a".repeat(486));
    let server = server(state);

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let json = response.json::<serde_json::Value>();
    assert!(json["qr_code_url"].is_null());

    let code = json["code"].as_str().unwrap();
    let stored = repo.get(code).await.unwrap().unwrap();
    assert_eq!(stored.original_url, "https://example.com");
    assert_eq!(repo.len(), 1);
}
