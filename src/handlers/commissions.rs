//! # Commissions API Handlers
//!
//! Custom work requests. Creation is open to the public site form; everything
//! else is dashboard-only.

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
use crate::models::commission::{Model as CommissionModel, STATUSES};
use crate::repositories::CommissionRepository;
use crate::repositories::commission::{CommissionFilter, CommissionPatch, CreateCommission};
use crate::server::AppState;
use crate::validation::{
    FieldError, Validate, require_email, require_non_empty, require_non_negative,
    require_one_of,
};

/// Commission representation returned to clients
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommissionDto {
    pub id: i32,
    pub client_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub commission_type: String,
    pub description: String,
    pub budget: Option<f64>,
    pub status: String,
    pub created_at: chrono::DateTime<chrono::FixedOffset>,
    pub updated_at: chrono::DateTime<chrono::FixedOffset>,
}

impl From<CommissionModel> for CommissionDto {
    fn from(commission: CommissionModel) -> Self {
        Self {
            id: commission.id,
            client_name: commission.client_name,
            email: commission.email,
            phone: commission.phone,
            commission_type: commission.commission_type,
            description: commission.description,
            budget: commission.budget,
            status: commission.status,
            created_at: commission.created_at,
            updated_at: commission.updated_at,
        }
    }
}

/// Request payload for creating a commission
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommissionRequest {
    pub client_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub commission_type: String,
    pub description: String,
    pub budget: Option<f64>,
}

impl Validate for CreateCommissionRequest {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        require_non_empty(&mut errors, "clientName", &self.client_name);
        require_non_empty(&mut errors, "email", &self.email);
        require_email(&mut errors, "email", &self.email);
        require_non_empty(&mut errors, "commissionType", &self.commission_type);
        require_non_empty(&mut errors, "description", &self.description);
        if let Some(budget) = self.budget {
            require_non_negative(&mut errors, "budget", budget);
        }
        errors
    }
}

/// Request payload for partially updating a commission
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCommissionRequest {
    pub client_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub commission_type: Option<String>,
    pub description: Option<String>,
    pub budget: Option<f64>,
    pub status: Option<String>,
}

impl Validate for UpdateCommissionRequest {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if let Some(client_name) = &self.client_name {
            require_non_empty(&mut errors, "clientName", client_name);
        }
        if let Some(email) = &self.email {
            require_email(&mut errors, "email", email);
        }
        if let Some(budget) = self.budget {
            require_non_negative(&mut errors, "budget", budget);
        }
        if let Some(status) = &self.status {
            require_one_of(&mut errors, "status", status, STATUSES);
        }
        errors
    }
}

/// List query parameters
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct CommissionListQuery {
    pub status: Option<String>,
}

/// List commissions, newest first
#[utoipa::path(
    get,
    path = "/api/commissions",
    security(("bearer_auth" = [])),
    params(CommissionListQuery),
    responses(
        (status = 200, description = "Commissions retrieved", body = ApiResponse<Vec<CommissionDto>>),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError)
    ),
    tag = "commissions"
)]
pub async fn list_commissions(
    State(state): State<AppState>,
    _auth: AuthUser,
    ApiQuery(query): ApiQuery<CommissionListQuery>,
) -> Result<Json<ApiResponse<Vec<CommissionDto>>>, ApiError> {
    let commissions = CommissionRepository::new(&state.db)
        .list(CommissionFilter {
            status: query.status,
        })
        .await?;

    Ok(Json(ApiResponse::new(
        commissions.into_iter().map(CommissionDto::from).collect(),
    )))
}

/// Get a commission by id
#[utoipa::path(
    get,
    path = "/api/commissions/{id}",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Commission id")),
    responses(
        (status = 200, description = "Commission retrieved", body = ApiResponse<CommissionDto>),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "Commission not found", body = ApiError)
    ),
    tag = "commissions"
)]
pub async fn get_commission(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<CommissionDto>>, ApiError> {
    let commission = CommissionRepository::new(&state.db)
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found("Commission", id))?;

    Ok(Json(ApiResponse::new(commission.into())))
}

/// Create a commission (public site form)
#[utoipa::path(
    post,
    path = "/api/commissions",
    request_body = CreateCommissionRequest,
    responses(
        (status = 201, description = "Commission created", body = ApiResponse<CommissionDto>),
        (status = 400, description = "Validation failed", body = ApiError)
    ),
    tag = "commissions"
)]
pub async fn create_commission(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateCommissionRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CommissionDto>>), ApiError> {
    request.check()?;

    let commission = CommissionRepository::new(&state.db)
        .create(CreateCommission {
            client_name: request.client_name,
            email: request.email,
            phone: request.phone,
            commission_type: request.commission_type,
            description: request.description,
            budget: request.budget,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(commission.into())),
    ))
}

/// Partially update a commission
#[utoipa::path(
    patch,
    path = "/api/commissions/{id}",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Commission id")),
    request_body = UpdateCommissionRequest,
    responses(
        (status = 200, description = "Commission updated", body = ApiResponse<CommissionDto>),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "Commission not found", body = ApiError)
    ),
    tag = "commissions"
)]
pub async fn update_commission(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i32>,
    ApiJson(request): ApiJson<UpdateCommissionRequest>,
) -> Result<Json<ApiResponse<CommissionDto>>, ApiError> {
    request.check()?;

    let commission = CommissionRepository::new(&state.db)
        .update(
            id,
            CommissionPatch {
                client_name: request.client_name,
                email: request.email,
                phone: request.phone,
                commission_type: request.commission_type,
                description: request.description,
                budget: request.budget,
                status: request.status,
            },
        )
        .await?
        .ok_or_else(|| not_found("Commission", id))?;

    Ok(Json(ApiResponse::new(commission.into())))
}

/// Soft-delete a commission
#[utoipa::path(
    delete,
    path = "/api/commissions/{id}",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Commission id")),
    responses(
        (status = 200, description = "Commission deleted", body = ApiResponse<CommissionDto>),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "Commission not found", body = ApiError)
    ),
    tag = "commissions"
)]
pub async fn delete_commission(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<CommissionDto>>, ApiError> {
    let commission = CommissionRepository::new(&state.db)
        .soft_delete(id)
        .await?
        .ok_or_else(|| not_found("Commission", id))?;

    Ok(Json(ApiResponse::with_message(
        commission.into(),
        "Commission deleted",
    )))
}

/// Restore a soft-deleted commission
#[utoipa::path(
    post,
    path = "/api/commissions/{id}/restore",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Commission id")),
    responses(
        (status = 200, description = "Commission restored", body = ApiResponse<CommissionDto>),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "Commission not found", body = ApiError)
    ),
    tag = "commissions"
)]
pub async fn restore_commission(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<CommissionDto>>, ApiError> {
    let commission = CommissionRepository::new(&state.db)
        .restore(id)
        .await?
        .ok_or_else(|| not_found("Commission", id))?;

    Ok(Json(ApiResponse::with_message(
        commission.into(),
        "Commission restored",
    )))
}
