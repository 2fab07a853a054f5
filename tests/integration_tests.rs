//! Basic integration tests for the Choir API HTTP surface.

use reqwest::Client;
use serde_json::Value;

#[path = "test_utils/mod.rs"]
mod test_utils;

#[tokio::test]
async fn test_root_endpoint() {
    let (base_url, _db) = test_utils::spawn_app(test_utils::test_config()).await;
    let client = Client::new();

    let response = client
        .get(format!("{}/", base_url))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["service"].as_str().unwrap(), "choir-api");
    assert_eq!(body["version"].as_str().unwrap(), "0.1.0");
}

#[tokio::test]
async fn test_health_endpoint() {
    let (base_url, _db) = test_utils::spawn_app(test_utils::test_config()).await;
    let client = Client::new();

    let response = client
        .get(format!("{}/health", base_url))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"].as_str().unwrap(), "ok");
}

#[tokio::test]
async fn test_openapi_endpoint() {
    let (base_url, _db) = test_utils::spawn_app(test_utils::test_config()).await;
    let client = Client::new();

    let response = client
        .get(format!("{}/openapi.json", base_url))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert!(body.get("openapi").is_some());
    assert!(body["paths"].get("/api/auth/login").is_some());
    assert!(body["paths"].get("/api/events").is_some());
}

#[tokio::test]
async fn test_unknown_route_returns_404() {
    let (base_url, _db) = test_utils::spawn_app(test_utils::test_config()).await;
    let client = Client::new();

    let response = client
        .get(format!("{}/api/no-such-resource", base_url))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 404);
}
