mod common;

use axum::body::Bytes;
use axum::http::StatusCode;
use common::{RecordingStore, SaturatedStore, UnavailableStore};
use hash_shortener::domain::entities::{ShortCode, encode_stored_url};
use hash_shortener::infrastructure::store::InMemoryStore;
use hash_shortener::utils::code_generator::deterministic_hash;
use serde_json::{Value, json};
use std::sync::Arc;

fn code_from_short_url(short_url: &str) -> &str {
    short_url.rsplit('/').next().unwrap()
}

#[tokio::test]
async fn test_shorten_valid_url() {
    let store = Arc::new(RecordingStore::new());
    let server = common::create_test_server(store.clone());

    let response = server
        .post("/api/shorten")
        .json(&json!({ "originalUrl": "http://www.lighthouselabs.ca" }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let json = response.json::<Value>();
    let short_url = json["shortUrl"].as_str().unwrap();
    assert!(short_url.starts_with(common::BASE_URL));

    let code = code_from_short_url(short_url);
    assert_eq!(code.len(), ShortCode::LENGTH);
    assert_eq!(code, deterministic_hash(b"http://www.lighthouselabs.ca").as_str());
    assert_eq!(store.sets(), 1);
}

#[tokio::test]
async fn test_shorten_invalid_url_never_touches_store() {
    let store = Arc::new(RecordingStore::new());
    let server = common::create_test_server(store.clone());

    let response = server
        .post("/api/shorten")
        .json(&json!({ "originalUrl": "invalid-url" }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>(), json!({ "error": "Invalid URL" }));
    assert_eq!(store.total_calls(), 0);
}

#[tokio::test]
async fn test_shorten_missing_url_is_invalid() {
    let server = common::create_test_server(Arc::new(InMemoryStore::new()));

    let response = server.post("/api/shorten").json(&json!({})).await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>()["error"], "Invalid URL");
}

#[tokio::test]
async fn test_shorten_with_custom_alias() {
    let store = Arc::new(RecordingStore::new());
    let server = common::create_test_server(store.clone());

    let response = server
        .post("/api/shorten")
        .json(&json!({
            "originalUrl": "https://example.com",
            "customShort": "mycustom12"
        }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let json = response.json::<Value>();
    let code = code_from_short_url(json["shortUrl"].as_str().unwrap());
    assert_eq!(code, deterministic_hash(b"mycustom12").as_str());
    assert_eq!(store.sets(), 1);
}

#[tokio::test]
async fn test_shorten_custom_alias_already_in_use() {
    let store = Arc::new(RecordingStore::new());
    let server = common::create_test_server(store.clone());

    server
        .post("/api/shorten")
        .json(&json!({
            "originalUrl": "https://first.com",
            "customShort": "existing"
        }))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server
        .post("/api/shorten")
        .json(&json!({
            "originalUrl": "https://second.com",
            "customShort": "existing"
        }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "Custom short URL already in use" })
    );
    assert_eq!(store.sets(), 1);
}

#[tokio::test]
async fn test_shorten_custom_alias_too_long() {
    let server = common::create_test_server(Arc::new(InMemoryStore::new()));

    let response = server
        .post("/api/shorten")
        .json(&json!({
            "originalUrl": "https://example.com",
            "customShort": "x".repeat(257)
        }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>()["error"], "Invalid custom short URL");
}

#[tokio::test]
async fn test_shorten_invalid_url_reported_before_long_alias() {
    let store = Arc::new(RecordingStore::new());
    let server = common::create_test_server(store.clone());

    let response = server
        .post("/api/shorten")
        .json(&json!({
            "originalUrl": "not a url",
            "customShort": "x".repeat(257)
        }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>(), json!({ "error": "Invalid URL" }));
    assert_eq!(store.total_calls(), 0);
}

#[tokio::test]
async fn test_shorten_same_url_twice_returns_same_code() {
    let server = common::create_test_server(Arc::new(InMemoryStore::new()));

    let first = server
        .post("/api/shorten")
        .json(&json!({ "originalUrl": "https://dedup.com" }))
        .await;
    let second = server
        .post("/api/shorten")
        .json(&json!({ "originalUrl": "https://dedup.com" }))
        .await;

    first.assert_status(StatusCode::CREATED);
    second.assert_status(StatusCode::CREATED);
    assert_eq!(
        first.json::<Value>()["shortUrl"],
        second.json::<Value>()["shortUrl"]
    );
}

#[tokio::test]
async fn test_shorten_collision_uses_salted_code() {
    let first_url = "https://www.example.com/url1";
    let second_url = "https://www.example.com/url2";
    let primary = deterministic_hash(second_url.as_bytes());

    // The second URL's primary code is already held by the first URL.
    let store = Arc::new(RecordingStore::with_entries([(
        primary.as_str().to_string(),
        encode_stored_url(first_url),
    )]));
    let server = common::create_test_server(store.clone());

    let response = server
        .post("/api/shorten")
        .json(&json!({ "originalUrl": second_url }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let json = response.json::<Value>();
    let code = code_from_short_url(json["shortUrl"].as_str().unwrap()).to_string();
    assert_ne!(code, primary.as_str());
    assert!(ShortCode::is_well_formed(&code));
    assert_eq!(store.sets(), 2);

    // Both mappings resolve to their own URL.
    let original = server.get(&format!("/api/{}", primary)).await;
    assert_eq!(original.header("location"), first_url);

    let salted = server.get(&format!("/api/{}", code)).await;
    assert_eq!(salted.header("location"), second_url);
}

#[tokio::test]
async fn test_shorten_collisions_exhausted() {
    let server = common::create_test_server(Arc::new(SaturatedStore));

    let response = server
        .post("/api/shorten")
        .json(&json!({ "originalUrl": "https://example.com" }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "Internal server error" })
    );
}

#[tokio::test]
async fn test_shorten_store_unavailable() {
    let server = common::create_test_server(Arc::new(UnavailableStore));

    let response = server
        .post("/api/shorten")
        .json(&json!({ "originalUrl": "https://example.com" }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json::<Value>()["error"], "Internal server error");
}

#[tokio::test]
async fn test_shorten_malformed_json() {
    let store = Arc::new(RecordingStore::new());
    let server = common::create_test_server(store.clone());

    let response = server
        .post("/api/shorten")
        .bytes(Bytes::from_static(b"{\"originalUrl\": "))
        .content_type("application/json")
        .await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>(), json!({ "error": "TypeError" }));
    assert_eq!(store.total_calls(), 0);
}

#[tokio::test]
async fn test_shorten_wrong_field_type() {
    let server = common::create_test_server(Arc::new(InMemoryStore::new()));

    let response = server
        .post("/api/shorten")
        .json(&json!({ "originalUrl": 42 }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>()["error"], "TypeError");
}
