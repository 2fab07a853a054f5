//! # Videos API Handlers
//!
//! Hosted performance recordings. Reads are public; mutations require a
//! bearer token.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::auth::AuthUser;
use crate::error::{ApiError, not_found};
use crate::handlers::types::{ApiJson, ApiQuery, ApiResponse};
use crate::models::video::Model as VideoModel;
use crate::repositories::VideoRepository;
use crate::repositories::video::{CreateVideo, VideoFilter, VideoPatch};
use crate::server::AppState;
use crate::validation::{FieldError, Validate, require_non_empty};

/// Video representation returned to clients
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VideoDto {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub video_url: String,
    pub thumbnail_url: Option<String>,
    pub is_featured: bool,
    pub created_at: chrono::DateTime<chrono::FixedOffset>,
    pub updated_at: chrono::DateTime<chrono::FixedOffset>,
}

impl From<VideoModel> for VideoDto {
    fn from(video: VideoModel) -> Self {
        Self {
            id: video.id,
            title: video.title,
            description: video.description,
            video_url: video.video_url,
            thumbnail_url: video.thumbnail_url,
            is_featured: video.is_featured,
            created_at: video.created_at,
            updated_at: video.updated_at,
        }
    }
}

/// Request payload for creating a video
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateVideoRequest {
    pub title: String,
    pub description: Option<String>,
    pub video_url: String,
    pub thumbnail_url: Option<String>,
    pub is_featured: Option<bool>,
}

impl Validate for CreateVideoRequest {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        require_non_empty(&mut errors, "title", &self.title);
        require_non_empty(&mut errors, "videoUrl", &self.video_url);
        errors
    }
}

/// Request payload for partially updating a video
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVideoRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub video_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub is_featured: Option<bool>,
}

impl Validate for UpdateVideoRequest {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if let Some(title) = &self.title {
            require_non_empty(&mut errors, "title", title);
        }
        if let Some(video_url) = &self.video_url {
            require_non_empty(&mut errors, "videoUrl", video_url);
        }
        errors
    }
}

/// List query parameters
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct VideoListQuery {
    pub is_featured: Option<bool>,
}

/// List videos, newest first
#[utoipa::path(
    get,
    path = "/api/videos",
    params(VideoListQuery),
    responses(
        (status = 200, description = "Videos retrieved", body = ApiResponse<Vec<VideoDto>>)
    ),
    tag = "videos"
)]
pub async fn list_videos(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<VideoListQuery>,
) -> Result<Json<ApiResponse<Vec<VideoDto>>>, ApiError> {
    let videos = VideoRepository::new(&state.db)
        .list(VideoFilter {
            is_featured: query.is_featured,
        })
        .await?;

    Ok(Json(ApiResponse::new(
        videos.into_iter().map(VideoDto::from).collect(),
    )))
}

/// Get a video by id
#[utoipa::path(
    get,
    path = "/api/videos/{id}",
    params(("id" = i32, Path, description = "Video id")),
    responses(
        (status = 200, description = "Video retrieved", body = ApiResponse<VideoDto>),
        (status = 404, description = "Video not found", body = ApiError)
    ),
    tag = "videos"
)]
pub async fn get_video(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<VideoDto>>, ApiError> {
    let video = VideoRepository::new(&state.db)
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found("Video", id))?;

    Ok(Json(ApiResponse::new(video.into())))
}

/// Create a video
#[utoipa::path(
    post,
    path = "/api/videos",
    security(("bearer_auth" = [])),
    request_body = CreateVideoRequest,
    responses(
        (status = 201, description = "Video created", body = ApiResponse<VideoDto>),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError)
    ),
    tag = "videos"
)]
pub async fn create_video(
    State(state): State<AppState>,
    _auth: AuthUser,
    ApiJson(request): ApiJson<CreateVideoRequest>,
) -> Result<(StatusCode, Json<ApiResponse<VideoDto>>), ApiError> {
    request.check()?;

    let video = VideoRepository::new(&state.db)
        .create(CreateVideo {
            title: request.title,
            description: request.description,
            video_url: request.video_url,
            thumbnail_url: request.thumbnail_url,
            is_featured: request.is_featured,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::new(video.into()))))
}

/// Partially update a video
#[utoipa::path(
    patch,
    path = "/api/videos/{id}",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Video id")),
    request_body = UpdateVideoRequest,
    responses(
        (status = 200, description = "Video updated", body = ApiResponse<VideoDto>),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "Video not found", body = ApiError)
    ),
    tag = "videos"
)]
pub async fn update_video(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i32>,
    ApiJson(request): ApiJson<UpdateVideoRequest>,
) -> Result<Json<ApiResponse<VideoDto>>, ApiError> {
    request.check()?;

    let video = VideoRepository::new(&state.db)
        .update(
            id,
            VideoPatch {
                title: request.title,
                description: request.description,
                video_url: request.video_url,
                thumbnail_url: request.thumbnail_url,
                is_featured: request.is_featured,
            },
        )
        .await?
        .ok_or_else(|| not_found("Video", id))?;

    Ok(Json(ApiResponse::new(video.into())))
}

/// Soft-delete a video
#[utoipa::path(
    delete,
    path = "/api/videos/{id}",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Video id")),
    responses(
        (status = 200, description = "Video deleted", body = ApiResponse<VideoDto>),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "Video not found", body = ApiError)
    ),
    tag = "videos"
)]
pub async fn delete_video(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<VideoDto>>, ApiError> {
    let video = VideoRepository::new(&state.db)
        .soft_delete(id)
        .await?
        .ok_or_else(|| not_found("Video", id))?;

    Ok(Json(ApiResponse::with_message(video.into(), "Video deleted")))
}

/// Restore a soft-deleted video
#[utoipa::path(
    post,
    path = "/api/videos/{id}/restore",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Video id")),
    responses(
        (status = 200, description = "Video restored", body = ApiResponse<VideoDto>),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "Video not found", body = ApiError)
    ),
    tag = "videos"
)]
pub async fn restore_video(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<VideoDto>>, ApiError> {
    let video = VideoRepository::new(&state.db)
        .restore(id)
        .await?
        .ok_or_else(|| not_found("Video", id))?;

    Ok(Json(ApiResponse::with_message(
        video.into(),
        "Video restored",
    )))
}
