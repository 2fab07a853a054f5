//! # Auth API Handlers
//!
//! Registration and login. Both return the account (minus credentials)
//! together with a signed bearer token.

use axum::{extract::State, http::StatusCode, response::Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::{hash_password, issue_token, verify_password};
use crate::error::{ApiError, conflict, unauthorized};
use crate::handlers::types::{ApiJson, ApiResponse};
use crate::models::user::Model as UserModel;
use crate::repositories::UserRepository;
use crate::repositories::user::CreateUser;
use crate::server::AppState;
use crate::validation::{
    FieldError, Validate, require_email, require_max_len, require_non_empty,
};

/// Request payload for registering a new account
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Login name (unique)
    #[schema(example = "choirmaster")]
    pub username: String,
    /// Email address (unique)
    #[schema(example = "director@choir.example")]
    pub email: String,
    /// Plain-text password; stored only as a salted hash
    pub password: String,
    /// Display name
    pub full_name: Option<String>,
    /// Dashboard role; defaults to `editor`
    pub role: Option<String>,
}

impl Validate for RegisterRequest {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        require_non_empty(&mut errors, "username", &self.username);
        require_max_len(&mut errors, "username", &self.username, 50);
        require_non_empty(&mut errors, "email", &self.email);
        require_email(&mut errors, "email", &self.email);
        require_non_empty(&mut errors, "password", &self.password);
        if self.password.chars().count() < 6 {
            errors.push(FieldError::new(
                "password",
                "minLength",
                "password must be longer than or equal to 6 characters",
            ));
        }
        errors
    }
}

/// Request payload for logging in
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "director@choir.example")]
    pub email: String,
    pub password: String,
}

impl Validate for LoginRequest {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        require_non_empty(&mut errors, "email", &self.email);
        require_non_empty(&mut errors, "password", &self.password);
        errors
    }
}

/// Account representation returned to clients; never carries credentials
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub role: String,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::FixedOffset>,
    pub updated_at: chrono::DateTime<chrono::FixedOffset>,
}

impl From<UserModel> for UserDto {
    fn from(user: UserModel) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            full_name: user.full_name,
            role: user.role,
            is_active: user.is_active,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Token response payload
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthDto {
    pub user: UserDto,
    /// Signed bearer token
    pub token: String,
    /// Token lifetime in seconds
    pub expires_in: u64,
}

/// Register a new dashboard account
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = ApiResponse<AuthDto>),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 409, description = "Email or username already registered", body = ApiError)
    ),
    tag = "auth"
)]
pub async fn register(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AuthDto>>), ApiError> {
    request.check()?;

    let repo = UserRepository::new(&state.db);

    // Pre-emptive duplicate check; the unique constraints still backstop
    // races through the DbErr conflict mapping.
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

    let (token, expires_in) = issue_token(&state.config, user.id, &user.email, &user.username)?;

    tracing::info!(user_id = user.id, "Account registered");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(AuthDto {
            user: user.into(),
            token,
            expires_in,
        })),
    ))
}

/// Log in with email and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<AuthDto>),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 401, description = "Invalid credentials", body = ApiError)
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<ApiResponse<AuthDto>>, ApiError> {
    request.check()?;

    let repo = UserRepository::new(&state.db);

    // Unknown email and wrong password produce the same message so the
    // endpoint cannot be used to probe which emails are registered.
    let invalid = || unauthorized(Some("Invalid email or password"));

    let user = repo.find_by_email(&request.email).await?.ok_or_else(invalid)?;

    if !user.is_active {
        return Err(invalid());
    }
    if !verify_password(&request.password, &user.password_hash) {
        return Err(invalid());
    }

    let (token, expires_in) = issue_token(&state.config, user.id, &user.email, &user.username)?;

    Ok(Json(ApiResponse::new(AuthDto {
        user: user.into(),
        token,
        expires_in,
    })))
}
