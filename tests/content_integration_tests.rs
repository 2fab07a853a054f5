//! Integration tests for the remaining content resources: commissions,
//! contact messages, videos, special programs and user management.

use reqwest::Client;
use serde_json::{json, Value};

#[path = "test_utils/mod.rs"]
mod test_utils;

async fn setup() -> (String, Client, String) {
    let (base_url, _db) = test_utils::spawn_app(test_utils::test_config()).await;
    let client = Client::new();
    let token = test_utils::register_and_login(&client, &base_url).await;
    (base_url, client, token)
}

#[tokio::test]
async fn commission_enquiry_is_public_and_starts_pending() {
    let (base_url, client, _token) = setup().await;

    let response = client
        .post(format!("{}/api/commissions", base_url))
        .json(&json!({
            "clientName": "Festival Committee",
            "email": "committee@festival.example",
            "commissionType": "arrangement",
            "description": "Four-part arrangement of a folk tune",
            "budget": 1500.0
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["status"], "pending");
    assert_eq!(body["data"]["budget"], 1500.0);
}

#[tokio::test]
async fn negative_budget_is_rejected() {
    let (base_url, client, _token) = setup().await;

    let response = client
        .post(format!("{}/api/commissions", base_url))
        .json(&json!({
            "clientName": "Cheapskate",
            "email": "c@example.com",
            "commissionType": "original",
            "description": "Free work please",
            "budget": -5.0
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.unwrap();
    let errors = body["errors"].as_array().unwrap();
    assert!(errors.iter().any(|e| e["property"] == "budget"));
}

#[tokio::test]
async fn contact_messages_start_unread_and_can_be_marked_read() {
    let (base_url, client, token) = setup().await;

    let created: Value = client
        .post(format!("{}/api/contacts", base_url))
        .json(&json!({
            "name": "Parent",
            "email": "parent@example.com",
            "subject": "Joining the choir",
            "message": "My kid wants to sing."
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(created["data"]["isRead"], false);
    let id = created["data"]["id"].as_i64().unwrap();

    let response = client
        .patch(format!("{}/api/contacts/{}", base_url, id))
        .bearer_auth(&token)
        .json(&json!({ "isRead": true }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let body: Value = client
        .get(format!("{}/api/contacts?isRead=false", base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn read_route_marks_a_message_without_a_body() {
    let (base_url, client, token) = setup().await;

    let created: Value = client
        .post(format!("{}/api/contacts", base_url))
        .json(&json!({
            "name": "Neighbour",
            "email": "neighbour@example.com",
            "message": "Lovely singing last night."
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let id = created["data"]["id"].as_i64().unwrap();

    let response = client
        .post(format!("{}/api/contacts/{}/read", base_url, id))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["isRead"], true);
    assert_eq!(body["message"], "Message marked as read");

    let response = client
        .post(format!("{}/api/contacts/9999/read", base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn videos_default_to_not_featured() {
    let (base_url, client, token) = setup().await;

    let response = client
        .post(format!("{}/api/videos", base_url))
        .bearer_auth(&token)
        .json(&json!({
            "title": "Winter concert highlights",
            "videoUrl": "https://videos.example/winter-2026"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["isFeatured"], false);

    let body: Value = client
        .get(format!("{}/api/videos?isFeatured=true", base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn special_program_dates_must_be_ordered() {
    let (base_url, client, token) = setup().await;

    let response = client
        .post(format!("{}/api/special-programs", base_url))
        .bearer_auth(&token)
        .json(&json!({
            "title": "Summer workshop",
            "description": "Week-long intensive",
            "startDate": "2027-07-10",
            "endDate": "2027-07-01"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["code"], "VALIDATION_FAILED");
}

#[tokio::test]
async fn special_program_patch_checks_the_merged_date_range() {
    let (base_url, client, token) = setup().await;

    let created: Value = client
        .post(format!("{}/api/special-programs", base_url))
        .bearer_auth(&token)
        .json(&json!({
            "title": "Autumn tour",
            "description": "Three cities in one week",
            "startDate": "2027-10-01",
            "endDate": "2027-10-08"
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let id = created["data"]["id"].as_i64().unwrap();

    // Moving only the end date before the stored start date must fail.
    let response = client
        .patch(format!("{}/api/special-programs/{}", base_url, id))
        .bearer_auth(&token)
        .json(&json!({ "endDate": "2027-09-20" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);

    // A consistent move of both ends is fine.
    let response = client
        .patch(format!("{}/api/special-programs/{}", base_url, id))
        .bearer_auth(&token)
        .json(&json!({ "startDate": "2027-11-01", "endDate": "2027-11-08" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn user_patch_rehashes_the_password() {
    let (base_url, client, token) = setup().await;

    let created: Value = client
        .post(format!("{}/api/users", base_url))
        .bearer_auth(&token)
        .json(&json!({
            "username": "tenor3",
            "email": "tenor@choir.example",
            "password": "old-password"
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let id = created["data"]["id"].as_i64().unwrap();

    let response = client
        .patch(format!("{}/api/users/{}", base_url, id))
        .bearer_auth(&token)
        .json(&json!({ "password": "new-password" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    // Only the new password logs in.
    let response = client
        .post(format!("{}/api/auth/login", base_url))
        .json(&json!({ "email": "tenor@choir.example", "password": "old-password" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);

    let response = client
        .post(format!("{}/api/auth/login", base_url))
        .json(&json!({ "email": "tenor@choir.example", "password": "new-password" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn inactive_users_cannot_log_in() {
    let (base_url, client, token) = setup().await;

    let created: Value = client
        .post(format!("{}/api/users", base_url))
        .bearer_auth(&token)
        .json(&json!({
            "username": "leaver",
            "email": "leaver@choir.example",
            "password": "goodbye123"
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let id = created["data"]["id"].as_i64().unwrap();

    let response = client
        .patch(format!("{}/api/users/{}", base_url, id))
        .bearer_auth(&token)
        .json(&json!({ "isActive": false }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let response = client
        .post(format!("{}/api/auth/login", base_url))
        .json(&json!({ "email": "leaver@choir.example", "password": "goodbye123" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Invalid email or password");
}
