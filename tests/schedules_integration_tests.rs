//! Integration tests for the rehearsal schedule views.

use chrono::{Datelike, Duration, Utc};
use reqwest::Client;
use serde_json::{json, Value};

#[path = "test_utils/mod.rs"]
mod test_utils;

async fn create_schedule(
    client: &Client,
    base_url: &str,
    token: &str,
    title: &str,
    date: chrono::NaiveDate,
    status: &str,
) -> Value {
    let response = client
        .post(format!("{}/api/schedules", base_url))
        .bearer_auth(token)
        .json(&json!({
            "title": title,
            "scheduleDate": date.to_string(),
            "startTime": "18:00",
            "scheduleType": "rehearsal",
            "status": status
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 201);
    response.json().await.unwrap()
}

#[tokio::test]
async fn grouped_by_month_buckets_the_current_year() {
    let (base_url, _db) = test_utils::spawn_app(test_utils::test_config()).await;
    let client = Client::new();
    let token = test_utils::register_and_login(&client, &base_url).await;

    let today = Utc::now().date_naive();
    create_schedule(&client, &base_url, &token, "Weekly rehearsal", today, "tentative").await;
    create_schedule(
        &client,
        &base_url,
        &token,
        "Next week rehearsal",
        today + Duration::days(7),
        "tentative",
    )
    .await;

    let body: Value = client
        .get(format!("{}/api/schedules/grouped-by-month", base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let groups = body["data"].as_object().unwrap();
    let this_month = format!("{:04}-{:02}", today.year(), today.month());
    assert!(groups.contains_key(&this_month));
    // Every key belongs to the default (current) year.
    for key in groups.keys() {
        assert!(key.starts_with(&format!("{:04}-", today.year())));
    }
}

#[tokio::test]
async fn upcoming_window_skips_cancelled_and_distant_entries() {
    let (base_url, _db) = test_utils::spawn_app(test_utils::test_config()).await;
    let client = Client::new();
    let token = test_utils::register_and_login(&client, &base_url).await;

    let today = Utc::now().date_naive();
    create_schedule(&client, &base_url, &token, "Tomorrow", today + Duration::days(1), "confirmed")
        .await;
    create_schedule(
        &client,
        &base_url,
        &token,
        "Cancelled tomorrow",
        today + Duration::days(1),
        "cancelled",
    )
    .await;
    create_schedule(
        &client,
        &base_url,
        &token,
        "Next month",
        today + Duration::days(40),
        "confirmed",
    )
    .await;

    let body: Value = client
        .get(format!("{}/api/schedules/upcoming", base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let entries = body["data"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["title"], "Tomorrow");

    // A wider window picks up the distant entry but still not the cancelled one.
    let body: Value = client
        .get(format!("{}/api/schedules/upcoming?days=60", base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let entries = body["data"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["title"], "Tomorrow");
    assert_eq!(entries[1]["title"], "Next month");
}

#[tokio::test]
async fn absurd_upcoming_window_is_rejected_not_a_crash() {
    let (base_url, _db) = test_utils::spawn_app(test_utils::test_config()).await;
    let client = Client::new();

    // A window the calendar cannot represent must come back as a clean 400,
    // not tear down the connection.
    let response = client
        .get(format!(
            "{}/api/schedules/upcoming?days=1000000000000",
            base_url
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "VALIDATION_FAILED");
    let errors = body["errors"].as_array().unwrap();
    assert!(errors.iter().any(|e| e["property"] == "days"));

    let response = client
        .get(format!("{}/api/schedules/upcoming?days=-1", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);

    // The server is still alive afterwards.
    let response = client
        .get(format!("{}/api/schedules/upcoming", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn out_of_range_year_is_rejected() {
    let (base_url, _db) = test_utils::spawn_app(test_utils::test_config()).await;
    let client = Client::new();

    let response = client
        .get(format!(
            "{}/api/schedules/grouped-by-month?year=99999",
            base_url
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["code"], "VALIDATION_FAILED");
}

#[tokio::test]
async fn malformed_query_parameters_use_the_error_envelope() {
    let (base_url, _db) = test_utils::spawn_app(test_utils::test_config()).await;
    let client = Client::new();

    let response = client
        .get(format!("{}/api/schedules/upcoming?days=abc", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "VALIDATION_FAILED");
}

#[tokio::test]
async fn schedule_type_is_validated() {
    let (base_url, _db) = test_utils::spawn_app(test_utils::test_config()).await;
    let client = Client::new();
    let token = test_utils::register_and_login(&client, &base_url).await;

    let response = client
        .post(format!("{}/api/schedules", base_url))
        .bearer_auth(&token)
        .json(&json!({
            "title": "Mystery meeting",
            "scheduleDate": "2027-02-01",
            "startTime": "10:00",
            "scheduleType": "séance"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.unwrap();
    let errors = body["errors"].as_array().unwrap();
    assert!(errors.iter().any(|e| e["property"] == "scheduleType"));
}
