//! Integration tests for registration, login and the bearer-token guard.

use reqwest::Client;
use serde_json::{json, Value};

#[path = "test_utils/mod.rs"]
mod test_utils;

#[tokio::test]
async fn register_then_login_round_trip() {
    let (base_url, _db) = test_utils::spawn_app(test_utils::test_config()).await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/auth/register", base_url))
        .json(&json!({
            "username": "soprano1",
            "email": "soprano@choir.example",
            "password": "sing-it-loud"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["user"]["username"], "soprano1");
    assert_eq!(body["data"]["user"]["role"], "editor");
    assert!(body["data"]["user"].get("passwordHash").is_none());
    assert!(body["data"]["token"].as_str().unwrap().len() > 20);

    let response = client
        .post(format!("{}/api/auth/login", base_url))
        .json(&json!({
            "email": "soprano@choir.example",
            "password": "sing-it-loud"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["user"]["email"], "soprano@choir.example");
    assert!(body["data"]["expiresIn"].as_u64().unwrap() > 0);
}

#[tokio::test]
async fn duplicate_registration_is_rejected() {
    let (base_url, _db) = test_utils::spawn_app(test_utils::test_config()).await;
    let client = Client::new();

    let payload = json!({
        "username": "alto2",
        "email": "alto@choir.example",
        "password": "harmony123"
    });

    let response = client
        .post(format!("{}/api/auth/register", base_url))
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 201);

    let response = client
        .post(format!("{}/api/auth/register", base_url))
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 409);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "CONFLICT");
}

#[tokio::test]
async fn login_failures_share_one_message() {
    let (base_url, _db) = test_utils::spawn_app(test_utils::test_config()).await;
    let client = Client::new();
    test_utils::register_and_login(&client, &base_url).await;

    // Wrong password and unknown email produce the exact same response so
    // the endpoint never reveals which accounts exist.
    let wrong_password = client
        .post(format!("{}/api/auth/login", base_url))
        .json(&json!({
            "email": "director@choir.example",
            "password": "not-the-password"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(wrong_password.status(), 401);
    let wrong_password: Value = wrong_password.json().await.unwrap();

    let unknown_email = client
        .post(format!("{}/api/auth/login", base_url))
        .json(&json!({
            "email": "nobody@choir.example",
            "password": "whatever"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(unknown_email.status(), 401);
    let unknown_email: Value = unknown_email.json().await.unwrap();

    assert_eq!(wrong_password["message"], "Invalid email or password");
    assert_eq!(unknown_email["message"], wrong_password["message"]);
}

#[tokio::test]
async fn short_password_fails_validation() {
    let (base_url, _db) = test_utils::spawn_app(test_utils::test_config()).await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/auth/register", base_url))
        .json(&json!({
            "username": "bass4",
            "email": "bass@choir.example",
            "password": "abc"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["code"], "VALIDATION_FAILED");
    let errors = body["errors"].as_array().unwrap();
    assert!(errors.iter().any(|e| e["property"] == "password"));
}

#[tokio::test]
async fn malformed_json_bodies_use_the_error_envelope() {
    let (base_url, _db) = test_utils::spawn_app(test_utils::test_config()).await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/auth/login", base_url))
        .header("content-type", "application/json")
        .body("{\"email\": \"broken\"")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "VALIDATION_FAILED");
    assert!(body["message"].as_str().unwrap().len() > 0);

    // Missing content type gets the same treatment.
    let response = client
        .post(format!("{}/api/auth/login", base_url))
        .body("{}")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn error_responses_carry_the_request_correlation_id() {
    let (base_url, _db) = test_utils::spawn_app(test_utils::test_config()).await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/auth/login", base_url))
        .header("x-request-id", "req-choir-42")
        .json(&json!({
            "email": "nobody@choir.example",
            "password": "whatever"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);
    assert_eq!(
        response.headers().get("x-request-id").unwrap(),
        "req-choir-42"
    );

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["traceId"], "req-choir-42");

    // Without a client-supplied ID one is generated and echoed back.
    let response = client
        .post(format!("{}/api/auth/login", base_url))
        .json(&json!({
            "email": "nobody@choir.example",
            "password": "whatever"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);

    let generated = response
        .headers()
        .get("x-request-id")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(generated.starts_with("req-"));

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["traceId"].as_str().unwrap(), generated);
}

#[tokio::test]
async fn protected_routes_require_a_bearer_token() {
    let (base_url, _db) = test_utils::spawn_app(test_utils::test_config()).await;
    let client = Client::new();

    let response = client
        .get(format!("{}/api/users", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);

    let response = client
        .get(format!("{}/api/users", base_url))
        .bearer_auth("not-a-jwt")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);

    let token = test_utils::register_and_login(&client, &base_url).await;
    let response = client
        .get(format!("{}/api/users", base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}
