//! Integration tests for the image upload proxy, with the media host
//! stubbed out by wiremock.

use choir_api::config::{AppConfig, MediaConfig};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[path = "test_utils/mod.rs"]
mod test_utils;

fn config_for(media_server: &MockServer) -> AppConfig {
    AppConfig {
        media: MediaConfig {
            base_url: media_server.uri(),
            cloud_name: Some("choir-test".to_string()),
            api_key: Some("key".to_string()),
            api_secret: Some("secret".to_string()),
            upload_folder: "choir".to_string(),
        },
        ..test_utils::test_config()
    }
}

fn png_part(name: &str) -> Part {
    Part::bytes(vec![0x89, b'P', b'N', b'G', 0, 0, 0, 0])
        .file_name(name.to_string())
        .mime_str("image/png")
        .unwrap()
}

#[tokio::test]
async fn single_upload_relays_the_asset_descriptor() {
    let media_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/choir-test/image/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "public_id": "choir/abc123",
            "secure_url": "https://cdn.example/choir/abc123.png",
            "width": 640,
            "height": 480,
            "format": "png",
            "bytes": 8
        })))
        .expect(1)
        .mount(&media_server)
        .await;

    let (base_url, _db) = test_utils::spawn_app(config_for(&media_server)).await;
    let client = Client::new();
    let token = test_utils::register_and_login(&client, &base_url).await;

    let response = client
        .post(format!("{}/api/upload/single", base_url))
        .bearer_auth(&token)
        .multipart(Form::new().part("image", png_part("cover.png")))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["publicId"], "choir/abc123");
    assert_eq!(body["data"]["url"], "https://cdn.example/choir/abc123.png");
    assert_eq!(body["data"]["width"], 640);
}

#[tokio::test]
async fn non_image_files_are_rejected() {
    let media_server = MockServer::start().await;
    let (base_url, _db) = test_utils::spawn_app(config_for(&media_server)).await;
    let client = Client::new();
    let token = test_utils::register_and_login(&client, &base_url).await;

    let part = Part::bytes(b"%PDF-1.7".to_vec())
        .file_name("score.pdf")
        .mime_str("application/pdf")
        .unwrap();

    let response = client
        .post(format!("{}/api/upload/single", base_url))
        .bearer_auth(&token)
        .multipart(Form::new().part("image", part))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Only image files are allowed!");
}

#[tokio::test]
async fn one_bad_file_fails_the_whole_batch() {
    let media_server = MockServer::start().await;
    let (base_url, _db) = test_utils::spawn_app(config_for(&media_server)).await;
    let client = Client::new();
    let token = test_utils::register_and_login(&client, &base_url).await;

    let pdf = Part::bytes(b"%PDF-1.7".to_vec())
        .file_name("score.pdf")
        .mime_str("application/pdf")
        .unwrap();

    let response = client
        .post(format!("{}/api/upload/multiple", base_url))
        .bearer_auth(&token)
        .multipart(
            Form::new()
                .part("images", png_part("one.png"))
                .part("images", pdf),
        )
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Only image files are allowed!");
}

#[tokio::test]
async fn empty_multiple_upload_is_a_client_error() {
    let media_server = MockServer::start().await;
    let (base_url, _db) = test_utils::spawn_app(config_for(&media_server)).await;
    let client = Client::new();
    let token = test_utils::register_and_login(&client, &base_url).await;

    let response = client
        .post(format!("{}/api/upload/multiple", base_url))
        .bearer_auth(&token)
        .multipart(Form::new().text("unrelated", "field"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn uploads_require_a_bearer_token() {
    let media_server = MockServer::start().await;
    let (base_url, _db) = test_utils::spawn_app(config_for(&media_server)).await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/upload/single", base_url))
        .multipart(Form::new().part("image", png_part("cover.png")))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn delete_maps_missing_assets_to_404() {
    let media_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/choir-test/image/destroy"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": "not found" })))
        .mount(&media_server)
        .await;

    let (base_url, _db) = test_utils::spawn_app(config_for(&media_server)).await;
    let client = Client::new();
    let token = test_utils::register_and_login(&client, &base_url).await;

    // Public ids contain slashes, hence the wildcard route.
    let response = client
        .delete(format!("{}/api/upload/choir/gone123", base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn delete_confirms_removed_assets() {
    let media_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/choir-test/image/destroy"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": "ok" })))
        .expect(1)
        .mount(&media_server)
        .await;

    let (base_url, _db) = test_utils::spawn_app(config_for(&media_server)).await;
    let client = Client::new();
    let token = test_utils::register_and_login(&client, &base_url).await;

    let response = client
        .delete(format!("{}/api/upload/choir/abc123", base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"], true);
}
