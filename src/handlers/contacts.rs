//! # Contacts API Handlers
//!
//! Contact-form messages. Submission is public; reading and managing the
//! inbox requires a bearer token.

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
use crate::models::contact::Model as ContactModel;
use crate::repositories::ContactRepository;
use crate::repositories::contact::{ContactFilter, ContactPatch, CreateContact};
use crate::server::AppState;
use crate::validation::{FieldError, Validate, require_email, require_non_empty};

/// Contact message representation returned to clients
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactDto {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
    pub is_read: bool,
    pub created_at: chrono::DateTime<chrono::FixedOffset>,
    pub updated_at: chrono::DateTime<chrono::FixedOffset>,
}

impl From<ContactModel> for ContactDto {
    fn from(contact: ContactModel) -> Self {
        Self {
            id: contact.id,
            name: contact.name,
            email: contact.email,
            subject: contact.subject,
            message: contact.message,
            is_read: contact.is_read,
            created_at: contact.created_at,
            updated_at: contact.updated_at,
        }
    }
}

/// Request payload for submitting a contact message
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateContactRequest {
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
}

impl Validate for CreateContactRequest {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        require_non_empty(&mut errors, "name", &self.name);
        require_non_empty(&mut errors, "email", &self.email);
        require_email(&mut errors, "email", &self.email);
        require_non_empty(&mut errors, "message", &self.message);
        errors
    }
}

/// Request payload for partially updating a contact message
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContactRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
    pub is_read: Option<bool>,
}

impl Validate for UpdateContactRequest {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if let Some(email) = &self.email {
            require_email(&mut errors, "email", email);
        }
        errors
    }
}

/// List query parameters
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ContactListQuery {
    pub is_read: Option<bool>,
}

/// List contact messages, newest first
#[utoipa::path(
    get,
    path = "/api/contacts",
    security(("bearer_auth" = [])),
    params(ContactListQuery),
    responses(
        (status = 200, description = "Contacts retrieved", body = ApiResponse<Vec<ContactDto>>),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError)
    ),
    tag = "contacts"
)]
pub async fn list_contacts(
    State(state): State<AppState>,
    _auth: AuthUser,
    ApiQuery(query): ApiQuery<ContactListQuery>,
) -> Result<Json<ApiResponse<Vec<ContactDto>>>, ApiError> {
    let contacts = ContactRepository::new(&state.db)
        .list(ContactFilter {
            is_read: query.is_read,
        })
        .await?;

    Ok(Json(ApiResponse::new(
        contacts.into_iter().map(ContactDto::from).collect(),
    )))
}

/// Get a contact message by id
#[utoipa::path(
    get,
    path = "/api/contacts/{id}",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Contact id")),
    responses(
        (status = 200, description = "Contact retrieved", body = ApiResponse<ContactDto>),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "Contact not found", body = ApiError)
    ),
    tag = "contacts"
)]
pub async fn get_contact(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<ContactDto>>, ApiError> {
    let contact = ContactRepository::new(&state.db)
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found("Contact", id))?;

    Ok(Json(ApiResponse::new(contact.into())))
}

/// Submit a contact message (public site form)
#[utoipa::path(
    post,
    path = "/api/contacts",
    request_body = CreateContactRequest,
    responses(
        (status = 201, description = "Contact created", body = ApiResponse<ContactDto>),
        (status = 400, description = "Validation failed", body = ApiError)
    ),
    tag = "contacts"
)]
pub async fn create_contact(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateContactRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ContactDto>>), ApiError> {
    request.check()?;

    let contact = ContactRepository::new(&state.db)
        .create(CreateContact {
            name: request.name,
            email: request.email,
            subject: request.subject,
            message: request.message,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::new(contact.into()))))
}

/// Partially update a contact message (e.g. mark it read)
#[utoipa::path(
    patch,
    path = "/api/contacts/{id}",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Contact id")),
    request_body = UpdateContactRequest,
    responses(
        (status = 200, description = "Contact updated", body = ApiResponse<ContactDto>),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "Contact not found", body = ApiError)
    ),
    tag = "contacts"
)]
pub async fn update_contact(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i32>,
    ApiJson(request): ApiJson<UpdateContactRequest>,
) -> Result<Json<ApiResponse<ContactDto>>, ApiError> {
    request.check()?;

    let contact = ContactRepository::new(&state.db)
        .update(
            id,
            ContactPatch {
                name: request.name,
                email: request.email,
                subject: request.subject,
                message: request.message,
                is_read: request.is_read,
            },
        )
        .await?
        .ok_or_else(|| not_found("Contact", id))?;

    Ok(Json(ApiResponse::new(contact.into())))
}

/// Mark a contact message as read
#[utoipa::path(
    post,
    path = "/api/contacts/{id}/read",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Contact id")),
    responses(
        (status = 200, description = "Contact marked as read", body = ApiResponse<ContactDto>),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "Contact not found", body = ApiError)
    ),
    tag = "contacts"
)]
pub async fn mark_contact_read(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<ContactDto>>, ApiError> {
    let contact = ContactRepository::new(&state.db)
        .mark_read(id)
        .await?
        .ok_or_else(|| not_found("Contact", id))?;

    Ok(Json(ApiResponse::with_message(
        contact.into(),
        "Message marked as read",
    )))
}

/// Soft-delete a contact message
#[utoipa::path(
    delete,
    path = "/api/contacts/{id}",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Contact id")),
    responses(
        (status = 200, description = "Contact deleted", body = ApiResponse<ContactDto>),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "Contact not found", body = ApiError)
    ),
    tag = "contacts"
)]
pub async fn delete_contact(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<ContactDto>>, ApiError> {
    let contact = ContactRepository::new(&state.db)
        .soft_delete(id)
        .await?
        .ok_or_else(|| not_found("Contact", id))?;

    Ok(Json(ApiResponse::with_message(
        contact.into(),
        "Contact deleted",
    )))
}

/// Restore a soft-deleted contact message
#[utoipa::path(
    post,
    path = "/api/contacts/{id}/restore",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Contact id")),
    responses(
        (status = 200, description = "Contact restored", body = ApiResponse<ContactDto>),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "Contact not found", body = ApiError)
    ),
    tag = "contacts"
)]
pub async fn restore_contact(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<ContactDto>>, ApiError> {
    let contact = ContactRepository::new(&state.db)
        .restore(id)
        .await?
        .ok_or_else(|| not_found("Contact", id))?;

    Ok(Json(ApiResponse::with_message(
        contact.into(),
        "Contact restored",
    )))
}
