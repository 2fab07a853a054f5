//! # SpecialPrograms API Handlers
//!
//! Seasonal and outreach programs. Reads are public; mutations require a
//! bearer token.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::auth::AuthUser;
use crate::error::{ApiError, not_found};
use crate::handlers::types::{ApiJson, ApiQuery, ApiResponse};
use crate::models::special_program::Model as SpecialProgramModel;
use crate::repositories::SpecialProgramRepository;
use crate::repositories::special_program::{
    CreateSpecialProgram, SpecialProgramFilter, SpecialProgramPatch,
};
use crate::server::AppState;
use crate::validation::{FieldError, Validate, require_date_range, require_non_empty};

/// Special program representation returned to clients
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SpecialProgramDto {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::FixedOffset>,
    pub updated_at: chrono::DateTime<chrono::FixedOffset>,
}

impl From<SpecialProgramModel> for SpecialProgramDto {
    fn from(program: SpecialProgramModel) -> Self {
        Self {
            id: program.id,
            title: program.title,
            description: program.description,
            start_date: program.start_date,
            end_date: program.end_date,
            image_url: program.image_url,
            is_active: program.is_active,
            created_at: program.created_at,
            updated_at: program.updated_at,
        }
    }
}

/// Request payload for creating a special program
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSpecialProgramRequest {
    pub title: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub image_url: Option<String>,
    pub is_active: Option<bool>,
}

impl Validate for CreateSpecialProgramRequest {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        require_non_empty(&mut errors, "title", &self.title);
        require_non_empty(&mut errors, "description", &self.description);
        require_date_range(&mut errors, "endDate", self.start_date, self.end_date);
        errors
    }
}

/// Request payload for partially updating a special program
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSpecialProgramRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub image_url: Option<String>,
    pub is_active: Option<bool>,
}

impl Validate for UpdateSpecialProgramRequest {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if let Some(title) = &self.title {
            require_non_empty(&mut errors, "title", title);
        }
        // A patch carrying both dates must keep them ordered; mixed patches
        // are checked against the stored row in the handler.
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            require_date_range(&mut errors, "endDate", start, end);
        }
        errors
    }
}

/// List query parameters
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct SpecialProgramListQuery {
    pub is_active: Option<bool>,
}

/// List special programs ordered by start date
#[utoipa::path(
    get,
    path = "/api/special-programs",
    params(SpecialProgramListQuery),
    responses(
        (status = 200, description = "Programs retrieved", body = ApiResponse<Vec<SpecialProgramDto>>)
    ),
    tag = "special-programs"
)]
pub async fn list_special_programs(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SpecialProgramListQuery>,
) -> Result<Json<ApiResponse<Vec<SpecialProgramDto>>>, ApiError> {
    let programs = SpecialProgramRepository::new(&state.db)
        .list(SpecialProgramFilter {
            is_active: query.is_active,
        })
        .await?;

    Ok(Json(ApiResponse::new(
        programs.into_iter().map(SpecialProgramDto::from).collect(),
    )))
}

/// Get a special program by id
#[utoipa::path(
    get,
    path = "/api/special-programs/{id}",
    params(("id" = i32, Path, description = "Program id")),
    responses(
        (status = 200, description = "Program retrieved", body = ApiResponse<SpecialProgramDto>),
        (status = 404, description = "Program not found", body = ApiError)
    ),
    tag = "special-programs"
)]
pub async fn get_special_program(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<SpecialProgramDto>>, ApiError> {
    let program = SpecialProgramRepository::new(&state.db)
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found("SpecialProgram", id))?;

    Ok(Json(ApiResponse::new(program.into())))
}

/// Create a special program
#[utoipa::path(
    post,
    path = "/api/special-programs",
    security(("bearer_auth" = [])),
    request_body = CreateSpecialProgramRequest,
    responses(
        (status = 201, description = "Program created", body = ApiResponse<SpecialProgramDto>),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError)
    ),
    tag = "special-programs"
)]
pub async fn create_special_program(
    State(state): State<AppState>,
    _auth: AuthUser,
    ApiJson(request): ApiJson<CreateSpecialProgramRequest>,
) -> Result<(StatusCode, Json<ApiResponse<SpecialProgramDto>>), ApiError> {
    request.check()?;

    let program = SpecialProgramRepository::new(&state.db)
        .create(CreateSpecialProgram {
            title: request.title,
            description: request.description,
            start_date: request.start_date,
            end_date: request.end_date,
            image_url: request.image_url,
            is_active: request.is_active,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::new(program.into()))))
}

/// Partially update a special program
#[utoipa::path(
    patch,
    path = "/api/special-programs/{id}",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Program id")),
    request_body = UpdateSpecialProgramRequest,
    responses(
        (status = 200, description = "Program updated", body = ApiResponse<SpecialProgramDto>),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "Program not found", body = ApiError)
    ),
    tag = "special-programs"
)]
pub async fn update_special_program(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i32>,
    ApiJson(request): ApiJson<UpdateSpecialProgramRequest>,
) -> Result<Json<ApiResponse<SpecialProgramDto>>, ApiError> {
    request.check()?;

    let repo = SpecialProgramRepository::new(&state.db);

    // When only one end of the range moves, check it against the stored row.
    if request.start_date.is_some() != request.end_date.is_some() {
        let current = repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found("SpecialProgram", id))?;
        let start = request.start_date.unwrap_or(current.start_date);
        let end = request.end_date.unwrap_or(current.end_date);
        let mut errors = Vec::new();
        require_date_range(&mut errors, "endDate", start, end);
        if !errors.is_empty() {
            return Err(crate::error::validation_error(
                "Validation failed",
                serde_json::json!(errors),
            ));
        }
    }

    let program = repo
        .update(
            id,
            SpecialProgramPatch {
                title: request.title,
                description: request.description,
                start_date: request.start_date,
                end_date: request.end_date,
                image_url: request.image_url,
                is_active: request.is_active,
            },
        )
        .await?
        .ok_or_else(|| not_found("SpecialProgram", id))?;

    Ok(Json(ApiResponse::new(program.into())))
}

/// Soft-delete a special program
#[utoipa::path(
    delete,
    path = "/api/special-programs/{id}",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Program id")),
    responses(
        (status = 200, description = "Program deleted", body = ApiResponse<SpecialProgramDto>),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "Program not found", body = ApiError)
    ),
    tag = "special-programs"
)]
pub async fn delete_special_program(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<SpecialProgramDto>>, ApiError> {
    let program = SpecialProgramRepository::new(&state.db)
        .soft_delete(id)
        .await?
        .ok_or_else(|| not_found("SpecialProgram", id))?;

    Ok(Json(ApiResponse::with_message(
        program.into(),
        "Special program deleted",
    )))
}

/// Restore a soft-deleted special program
#[utoipa::path(
    post,
    path = "/api/special-programs/{id}/restore",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Program id")),
    responses(
        (status = 200, description = "Program restored", body = ApiResponse<SpecialProgramDto>),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "Program not found", body = ApiError)
    ),
    tag = "special-programs"
)]
pub async fn restore_special_program(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<SpecialProgramDto>>, ApiError> {
    let program = SpecialProgramRepository::new(&state.db)
        .restore(id)
        .await?
        .ok_or_else(|| not_found("SpecialProgram", id))?;

    Ok(Json(ApiResponse::with_message(
        program.into(),
        "Special program restored",
    )))
}
