//! Media host upload proxy.
//!
//! Relays in-memory image buffers to the configured third-party media host
//! over its signed multipart upload API and passes the returned asset
//! descriptor back to the caller. No local storage, no transformation, no
//! retries: upstream failures surface as a generic 500.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;
use utoipa::ToSchema;

use crate::config::MediaConfig;
use crate::error::ApiError;

/// Errors produced while talking to the media host.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("media host request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("media host returned status {status}: {body}")]
    Upstream { status: u16, body: String },
    #[error("media host credentials are not configured")]
    MissingCredentials,
}

impl From<MediaError> for ApiError {
    fn from(error: MediaError) -> Self {
        tracing::error!("Media upload failed: {}", error);
        ApiError::new(
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_SERVER_ERROR",
            "Image upload failed",
        )
    }
}

/// Asset descriptor relayed back from the media host.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssetInfo {
    /// Public identifier of the asset at the media host
    #[serde(alias = "public_id")]
    pub public_id: String,
    /// Delivery URL
    #[serde(alias = "secure_url")]
    pub url: String,
    /// Pixel width, if reported
    #[serde(default)]
    pub width: Option<u32>,
    /// Pixel height, if reported
    #[serde(default)]
    pub height: Option<u32>,
    /// File format, if reported
    #[serde(default)]
    pub format: Option<String>,
    /// Size in bytes, if reported
    #[serde(default)]
    pub bytes: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: String,
}

/// Client for the media host upload API.
#[derive(Clone)]
pub struct MediaClient {
    http: reqwest::Client,
    config: MediaConfig,
}

impl MediaClient {
    pub fn new(config: MediaConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn upload_url(&self) -> Result<String, MediaError> {
        let cloud_name = self
            .config
            .cloud_name
            .as_deref()
            .ok_or(MediaError::MissingCredentials)?;
        Ok(format!(
            "{}/{}/image/upload",
            self.config.base_url.trim_end_matches('/'),
            cloud_name
        ))
    }

    fn destroy_url(&self) -> Result<String, MediaError> {
        let cloud_name = self
            .config
            .cloud_name
            .as_deref()
            .ok_or(MediaError::MissingCredentials)?;
        Ok(format!(
            "{}/{}/image/destroy",
            self.config.base_url.trim_end_matches('/'),
            cloud_name
        ))
    }

    fn credentials(&self) -> Result<(&str, &str), MediaError> {
        match (self.config.api_key.as_deref(), self.config.api_secret.as_deref()) {
            (Some(key), Some(secret)) => Ok((key, secret)),
            _ => Err(MediaError::MissingCredentials),
        }
    }

    /// SHA-256 request signature over the sorted signed parameters plus the
    /// API secret, as the media host's signed-upload scheme requires.
    fn sign(params: &[(&str, &str)], api_secret: &str) -> String {
        let mut sorted: Vec<_> = params.to_vec();
        sorted.sort_by_key(|(name, _)| *name);
        let canonical = sorted
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<_>>()
            .join("&");

        let mut hasher = Sha256::new();
        hasher.update(canonical.as_bytes());
        hasher.update(api_secret.as_bytes());
        hex::encode(hasher.finalize())
    }

    fn unix_timestamp() -> String {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
            .to_string()
    }

    /// Upload a single in-memory file buffer, relaying back the asset
    /// descriptor returned by the media host.
    pub async fn upload(
        &self,
        data: Vec<u8>,
        file_name: &str,
        content_type: &str,
    ) -> Result<AssetInfo, MediaError> {
        let (api_key, api_secret) = self.credentials()?;
        let url = self.upload_url()?;

        let timestamp = Self::unix_timestamp();
        let folder = self.config.upload_folder.clone();
        let signature = Self::sign(
            &[("folder", folder.as_str()), ("timestamp", timestamp.as_str())],
            api_secret,
        );

        let part = reqwest::multipart::Part::bytes(data)
            .file_name(file_name.to_string())
            .mime_str(content_type)?;

        let form = reqwest::multipart::Form::new()
            .text("api_key", api_key.to_string())
            .text("timestamp", timestamp)
            .text("folder", folder)
            .text("signature", signature)
            .part("file", part);

        let response = self.http.post(&url).multipart(form).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(MediaError::Upstream { status, body });
        }

        Ok(response.json::<AssetInfo>().await?)
    }

    /// Delete an asset by its public id.
    pub async fn destroy(&self, public_id: &str) -> Result<bool, MediaError> {
        let (api_key, api_secret) = self.credentials()?;
        let url = self.destroy_url()?;

        let timestamp = Self::unix_timestamp();
        let signature = Self::sign(
            &[("public_id", public_id), ("timestamp", timestamp.as_str())],
            api_secret,
        );

        let params = [
            ("api_key", api_key.to_string()),
            ("public_id", public_id.to_string()),
            ("timestamp", timestamp),
            ("signature", signature),
        ];

        let response = self.http.post(&url).form(&params).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(MediaError::Upstream { status, body });
        }

        let destroy: DestroyResponse = response.json().await?;
        Ok(destroy.result == "ok")
    }
}
