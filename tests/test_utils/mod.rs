//! Test utilities for database and server testing.
//!
//! Provides an in-memory SQLite database with all migrations applied and a
//! helper that spawns the full application on a random local port.

use anyhow::Result;
use choir_api::config::AppConfig;
use choir_api::server::{create_app, AppState};
use migration::{Migrator, MigratorTrait};
use reqwest::Client;
use sea_orm::{Database, DatabaseConnection};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Sets up an in-memory SQLite database with all migrations applied.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = Database::connect("sqlite::memory:").await?;
    Migrator::up(&db, None).await?;
    Ok(db)
}

/// A config suitable for tests: test profile, cheap bcrypt rounds.
#[allow(dead_code)]
pub fn test_config() -> AppConfig {
    AppConfig {
        profile: "test".to_string(),
        bcrypt_cost: 4,
        ..AppConfig::default()
    }
}

/// Spawns the application on a random port and returns its base URL
/// together with the backing database connection.
#[allow(dead_code)]
pub async fn spawn_app(config: AppConfig) -> (String, DatabaseConnection) {
    let db = setup_test_db().await.expect("Failed to set up test db");
    let state = AppState::new(config, db.clone());
    let app = create_app(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), db)
}

/// Registers a fresh admin account and returns its bearer token.
#[allow(dead_code)]
pub async fn register_and_login(client: &Client, base_url: &str) -> String {
    let response = client
        .post(format!("{}/api/auth/register", base_url))
        .json(&json!({
            "username": "choirmaster",
            "email": "director@choir.example",
            "password": "hunter22",
            "fullName": "Choir Director"
        }))
        .send()
        .await
        .expect("register request failed");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("register body");
    body["data"]["token"].as_str().expect("token").to_string()
}
