//! # Upload API Handlers
//!
//! Proxies image uploads to the configured media host. Files are validated
//! (image MIME, size cap) and relayed from memory; nothing is written to
//! local disk.

use axum::{
    body::Bytes,
    extract::{Multipart, Path, State},
    http::{HeaderMap, StatusCode, header::CONTENT_TYPE},
    response::Json,
};

use crate::auth::AuthUser;
use crate::error::{ApiError, validation_error};
use crate::handlers::types::ApiResponse;
use crate::media::AssetInfo;
use crate::server::AppState;

const NOT_AN_IMAGE: &str = "Only image files are allowed!";

/// In-memory file pulled out of a multipart request.
struct UploadFile {
    data: Vec<u8>,
    file_name: String,
    content_type: String,
}

fn reject_non_image(content_type: &str) -> Result<(), ApiError> {
    if content_type.starts_with("image/") {
        Ok(())
    } else {
        Err(ApiError::new(
            StatusCode::BAD_REQUEST,
            "VALIDATION_FAILED",
            NOT_AN_IMAGE,
        ))
    }
}

fn reject_oversize(len: usize, max_bytes: usize) -> Result<(), ApiError> {
    if len > max_bytes {
        return Err(validation_error(
            "File too large",
            serde_json::json!([{
                "property": "image",
                "constraint": "maxSize",
                "message": format!("file must not exceed {} bytes", max_bytes),
            }]),
        ));
    }
    Ok(())
}

/// Pull files out of a multipart body, enforcing the field name and per-file
/// constraints as each part streams in.
async fn collect_files(
    mut multipart: Multipart,
    field_name: &str,
    max_bytes: usize,
) -> Result<Vec<UploadFile>, ApiError> {
    let mut files = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(|err| {
        tracing::debug!("Malformed multipart body: {}", err);
        ApiError::new(
            StatusCode::BAD_REQUEST,
            "VALIDATION_FAILED",
            "Malformed multipart body",
        )
    })? {
        if field.name() != Some(field_name) {
            continue;
        }

        let content_type = field.content_type().unwrap_or_default().to_string();
        reject_non_image(&content_type)?;

        let file_name = field
            .file_name()
            .map(str::to_string)
            .unwrap_or_else(|| "upload".to_string());

        let data = field.bytes().await.map_err(|err| {
            tracing::debug!("Failed to read multipart field: {}", err);
            ApiError::new(
                StatusCode::BAD_REQUEST,
                "VALIDATION_FAILED",
                "Failed to read uploaded file",
            )
        })?;
        reject_oversize(data.len(), max_bytes)?;

        files.push(UploadFile {
            data: data.to_vec(),
            file_name,
            content_type,
        });
    }

    Ok(files)
}

/// Upload a single image (multipart field `image`)
#[utoipa::path(
    post,
    path = "/api/upload/single",
    security(("bearer_auth" = [])),
    request_body(content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Image uploaded", body = ApiResponse<AssetInfo>),
        (status = 400, description = "Not an image, too large or missing", body = ApiError),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 500, description = "Media host failure", body = ApiError)
    ),
    tag = "upload"
)]
pub async fn upload_single(
    State(state): State<AppState>,
    _auth: AuthUser,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<AssetInfo>>), ApiError> {
    let mut files =
        collect_files(multipart, "image", state.config.upload.max_file_bytes).await?;

    let Some(file) = files.pop() else {
        return Err(ApiError::new(
            StatusCode::BAD_REQUEST,
            "VALIDATION_FAILED",
            "No file uploaded",
        ));
    };

    let asset = state
        .media
        .upload(file.data, &file.file_name, &file.content_type)
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::new(asset))))
}

/// Upload up to the configured number of images (multipart field `images`)
#[utoipa::path(
    post,
    path = "/api/upload/multiple",
    security(("bearer_auth" = [])),
    request_body(content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Images uploaded", body = ApiResponse<Vec<AssetInfo>>),
        (status = 400, description = "Invalid file or too many files", body = ApiError),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 500, description = "Media host failure fails the whole batch", body = ApiError)
    ),
    tag = "upload"
)]
pub async fn upload_multiple(
    State(state): State<AppState>,
    _auth: AuthUser,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<Vec<AssetInfo>>>), ApiError> {
    let files =
        collect_files(multipart, "images", state.config.upload.max_file_bytes).await?;

    if files.is_empty() {
        return Err(ApiError::new(
            StatusCode::BAD_REQUEST,
            "VALIDATION_FAILED",
            "No files uploaded",
        ));
    }
    if files.len() > state.config.upload.max_files {
        return Err(validation_error(
            "Too many files",
            serde_json::json!([{
                "property": "images",
                "constraint": "maxFiles",
                "message": format!("at most {} files per request", state.config.upload.max_files),
            }]),
        ));
    }

    // Relay the batch concurrently; results are joined in order and any
    // failure rejects the whole batch.
    let handles: Vec<_> = files
        .into_iter()
        .map(|file| {
            let media = state.media.clone();
            tokio::spawn(async move {
                media
                    .upload(file.data, &file.file_name, &file.content_type)
                    .await
            })
        })
        .collect();

    let mut assets = Vec::with_capacity(handles.len());
    for handle in handles {
        let asset = handle.await.map_err(|err| {
            tracing::error!("Upload task panicked: {}", err);
            ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_SERVER_ERROR",
                "Image upload failed",
            )
        })??;
        assets.push(asset);
    }

    Ok((StatusCode::CREATED, Json(ApiResponse::new(assets))))
}

/// Upload a raw binary body with an image `Content-Type`
#[utoipa::path(
    post,
    path = "/api/upload/raw",
    security(("bearer_auth" = [])),
    request_body(content_type = "image/*"),
    responses(
        (status = 201, description = "Image uploaded", body = ApiResponse<AssetInfo>),
        (status = 400, description = "Not an image or too large", body = ApiError),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 500, description = "Media host failure", body = ApiError)
    ),
    tag = "upload"
)]
pub async fn upload_raw(
    State(state): State<AppState>,
    _auth: AuthUser,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<ApiResponse<AssetInfo>>), ApiError> {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    reject_non_image(&content_type)?;
    reject_oversize(body.len(), state.config.upload.max_file_bytes)?;

    let asset = state
        .media
        .upload(body.to_vec(), "upload", &content_type)
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::new(asset))))
}

/// Delete an asset at the media host by its public id
#[utoipa::path(
    delete,
    path = "/api/upload/{publicId}",
    security(("bearer_auth" = [])),
    params(("publicId" = String, Path, description = "Asset public id (may contain slashes)")),
    responses(
        (status = 200, description = "Asset deleted", body = ApiResponse<bool>),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "Asset not found at the media host", body = ApiError),
        (status = 500, description = "Media host failure", body = ApiError)
    ),
    tag = "upload"
)]
pub async fn delete_upload(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(public_id): Path<String>,
) -> Result<Json<ApiResponse<bool>>, ApiError> {
    let deleted = state.media.destroy(&public_id).await?;

    if !deleted {
        return Err(ApiError::new(
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Asset not found at the media host",
        ));
    }

    Ok(Json(ApiResponse::with_message(true, "Asset deleted")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_mime_gate() {
        assert!(reject_non_image("image/png").is_ok());
        assert!(reject_non_image("image/jpeg").is_ok());

        let err = reject_non_image("application/pdf").unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, Box::from(NOT_AN_IMAGE));

        let err = reject_non_image("").unwrap_err();
        assert_eq!(err.message, Box::from(NOT_AN_IMAGE));
    }

    #[test]
    fn size_gate() {
        assert!(reject_oversize(5 * 1024 * 1024, 5 * 1024 * 1024).is_ok());
        let err = reject_oversize(5 * 1024 * 1024 + 1, 5 * 1024 * 1024).unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }
}
