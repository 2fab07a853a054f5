//! Shared handler request and response types.
//!
//! Every successful response is wrapped in [`ApiResponse`], mirroring the
//! error envelope produced by [`crate::error::ApiError`]. The [`ApiJson`]
//! and [`ApiQuery`] extractors keep malformed bodies and query strings on
//! that same envelope instead of axum's plain-text rejections.

use axum::extract::{FromRequest, FromRequestParts};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ApiError;

/// JSON body extractor whose rejection is an [`ApiError`] envelope.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Query string extractor whose rejection is an [`ApiError`] envelope.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

/// Standard success envelope: `{ "success": true, "data": …, "message"? }`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Always `true` on success responses
    pub success: bool,
    /// Response payload
    pub data: T,
    /// Optional human-readable note
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
            message: None,
        }
    }

    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_shape() {
        let value = serde_json::to_value(ApiResponse::new(json!({"id": 1}))).unwrap();
        assert_eq!(value["success"], json!(true));
        assert_eq!(value["data"]["id"], json!(1));
        assert!(value.get("message").is_none());

        let value =
            serde_json::to_value(ApiResponse::with_message(json!(null), "Deleted")).unwrap();
        assert_eq!(value["message"], json!("Deleted"));
    }
}
