//! # Users API Handlers
//!
//! Dashboard account administration. Every route requires a bearer token.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::auth::{AuthUser, hash_password};
use crate::error::{ApiError, conflict, not_found};
use crate::handlers::auth::UserDto;
use crate::handlers::types::{ApiJson, ApiQuery, ApiResponse};
use crate::repositories::UserRepository;
use crate::repositories::user::{CreateUser, UserFilter, UserPatch};
use crate::server::AppState;
use crate::validation::{
    FieldError, Validate, require_email, require_max_len, require_non_empty,
};

/// Request payload for creating a user
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
    pub role: Option<String>,
}

impl Validate for CreateUserRequest {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        require_non_empty(&mut errors, "username", &self.username);
        require_max_len(&mut errors, "username", &self.username, 50);
        require_non_empty(&mut errors, "email", &self.email);
        require_email(&mut errors, "email", &self.email);
        require_non_empty(&mut errors, "password", &self.password);
        errors
    }
}

/// Request payload for partially updating a user
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub full_name: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
}

impl Validate for UpdateUserRequest {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if let Some(username) = &self.username {
            require_non_empty(&mut errors, "username", username);
            require_max_len(&mut errors, "username", username, 50);
        }
        if let Some(email) = &self.email {
            require_email(&mut errors, "email", email);
        }
        errors
    }
}

/// List query parameters
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct UserListQuery {
    /// Filter by account activation
    pub is_active: Option<bool>,
}

/// List users
#[utoipa::path(
    get,
    path = "/api/users",
    security(("bearer_auth" = [])),
    params(UserListQuery),
    responses(
        (status = 200, description = "Users retrieved", body = ApiResponse<Vec<UserDto>>),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError)
    ),
    tag = "users"
)]
pub async fn list_users(
    State(state): State<AppState>,
    _auth: AuthUser,
    ApiQuery(query): ApiQuery<UserListQuery>,
) -> Result<Json<ApiResponse<Vec<UserDto>>>, ApiError> {
    let users = UserRepository::new(&state.db)
        .list(UserFilter {
            is_active: query.is_active,
        })
        .await?;

    Ok(Json(ApiResponse::new(
        users.into_iter().map(UserDto::from).collect(),
    )))
}

/// Get a user by id
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "User retrieved", body = ApiResponse<UserDto>),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "User not found", body = ApiError)
    ),
    tag = "users"
)]
pub async fn get_user(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    let user = UserRepository::new(&state.db)
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found("User", id))?;

    Ok(Json(ApiResponse::new(user.into())))
}

/// Create a user
#[utoipa::path(
    post,
    path = "/api/users",
    security(("bearer_auth" = [])),
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = ApiResponse<UserDto>),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 409, description = "Email or username already registered", body = ApiError)
    ),
    tag = "users"
)]
pub async fn create_user(
    State(state): State<AppState>,
    _auth: AuthUser,
    ApiJson(request): ApiJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserDto>>), ApiError> {
    request.check()?;

    let repo = UserRepository::new(&state.db);
    if repo
        .email_or_username_taken(&request.email, &request.username)
        .await?
    {
        return Err(conflict("Email or username already registered"));
    }

    let password_hash = hash_password(&state.config, &request.password)?;
    let user = repo
        .create(CreateUser {
            username: request.username,
            email: request.email,
            password_hash,
            full_name: request.full_name,
            role: request.role.unwrap_or_else(|| "editor".to_string()),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::new(user.into()))))
}

/// Partially update a user
#[utoipa::path(
    patch,
    path = "/api/users/{id}",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User id")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = ApiResponse<UserDto>),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "User not found", body = ApiError)
    ),
    tag = "users"
)]
pub async fn update_user(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i32>,
    ApiJson(request): ApiJson<UpdateUserRequest>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    request.check()?;

    let password_hash = match &request.password {
        Some(password) => Some(hash_password(&state.config, password)?),
        None => None,
    };

    let user = UserRepository::new(&state.db)
        .update(
            id,
            UserPatch {
                username: request.username,
                email: request.email,
                password_hash,
                full_name: request.full_name,
                role: request.role,
                is_active: request.is_active,
            },
        )
        .await?
        .ok_or_else(|| not_found("User", id))?;

    Ok(Json(ApiResponse::new(user.into())))
}

/// Soft-delete a user
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "User deleted", body = ApiResponse<UserDto>),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "User not found", body = ApiError)
    ),
    tag = "users"
)]
pub async fn delete_user(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    let user = UserRepository::new(&state.db)
        .soft_delete(id)
        .await?
        .ok_or_else(|| not_found("User", id))?;

    Ok(Json(ApiResponse::with_message(user.into(), "User deleted")))
}

/// Restore a soft-deleted user
#[utoipa::path(
    post,
    path = "/api/users/{id}/restore",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "User restored", body = ApiResponse<UserDto>),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "User not found", body = ApiError)
    ),
    tag = "users"
)]
pub async fn restore_user(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    let user = UserRepository::new(&state.db)
        .restore(id)
        .await?
        .ok_or_else(|| not_found("User", id))?;

    Ok(Json(ApiResponse::with_message(user.into(), "User restored")))
}
