//! # Bookings API Handlers
//!
//! Performance booking requests. Creation is open to the public site form;
//! everything else is dashboard-only.

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
use crate::handlers::commissions::CommissionDto;
use crate::handlers::types::{ApiJson, ApiQuery, ApiResponse};
use crate::models::booking::{Model as BookingModel, STATUSES};
use crate::models::commission::Model as CommissionModel;
use crate::repositories::BookingRepository;
use crate::repositories::booking::{BookingFilter, BookingPatch, CreateBooking};
use crate::server::AppState;
use crate::validation::{
    FieldError, Validate, require_email, require_non_empty, require_one_of,
};

/// Booking representation returned to clients
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingDto {
    pub id: i32,
    pub client_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub event_type: String,
    pub event_date: NaiveDate,
    pub message: Option<String>,
    pub status: String,
    pub commission_id: Option<i32>,
    /// The originating commission enquiry, embedded on single-booking reads
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commission: Option<CommissionDto>,
    pub confirmed_at: Option<chrono::DateTime<chrono::FixedOffset>>,
    pub completed_at: Option<chrono::DateTime<chrono::FixedOffset>>,
    pub created_at: chrono::DateTime<chrono::FixedOffset>,
    pub updated_at: chrono::DateTime<chrono::FixedOffset>,
}

impl From<BookingModel> for BookingDto {
    fn from(booking: BookingModel) -> Self {
        Self {
            id: booking.id,
            client_name: booking.client_name,
            email: booking.email,
            phone: booking.phone,
            event_type: booking.event_type,
            event_date: booking.event_date,
            message: booking.message,
            status: booking.status,
            commission_id: booking.commission_id,
            commission: None,
            confirmed_at: booking.confirmed_at,
            completed_at: booking.completed_at,
            created_at: booking.created_at,
            updated_at: booking.updated_at,
        }
    }
}

impl BookingDto {
    fn with_commission(booking: BookingModel, commission: Option<CommissionModel>) -> Self {
        let mut dto = Self::from(booking);
        dto.commission = commission.map(CommissionDto::from);
        dto
    }
}

/// Request payload for creating a booking
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub client_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub event_type: String,
    pub event_date: NaiveDate,
    pub message: Option<String>,
    pub commission_id: Option<i32>,
}

impl Validate for CreateBookingRequest {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        require_non_empty(&mut errors, "clientName", &self.client_name);
        require_non_empty(&mut errors, "email", &self.email);
        require_email(&mut errors, "email", &self.email);
        require_non_empty(&mut errors, "eventType", &self.event_type);
        errors
    }
}

/// Request payload for partially updating a booking
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingRequest {
    pub client_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub event_type: Option<String>,
    pub event_date: Option<NaiveDate>,
    pub message: Option<String>,
    pub status: Option<String>,
    pub commission_id: Option<i32>,
}

impl Validate for UpdateBookingRequest {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if let Some(client_name) = &self.client_name {
            require_non_empty(&mut errors, "clientName", client_name);
        }
        if let Some(email) = &self.email {
            require_email(&mut errors, "email", email);
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
pub struct BookingListQuery {
    pub status: Option<String>,
    pub commission_id: Option<i32>,
    /// Earliest event date (inclusive)
    pub from: Option<NaiveDate>,
    /// Latest event date (inclusive)
    pub to: Option<NaiveDate>,
}

/// List bookings, newest first
#[utoipa::path(
    get,
    path = "/api/bookings",
    security(("bearer_auth" = [])),
    params(BookingListQuery),
    responses(
        (status = 200, description = "Bookings retrieved", body = ApiResponse<Vec<BookingDto>>),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError)
    ),
    tag = "bookings"
)]
pub async fn list_bookings(
    State(state): State<AppState>,
    _auth: AuthUser,
    ApiQuery(query): ApiQuery<BookingListQuery>,
) -> Result<Json<ApiResponse<Vec<BookingDto>>>, ApiError> {
    let bookings = BookingRepository::new(&state.db)
        .list(BookingFilter {
            status: query.status,
            commission_id: query.commission_id,
            from: query.from,
            to: query.to,
        })
        .await?;

    Ok(Json(ApiResponse::new(
        bookings.into_iter().map(BookingDto::from).collect(),
    )))
}

/// Get a booking by id
#[utoipa::path(
    get,
    path = "/api/bookings/{id}",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Booking id")),
    responses(
        (status = 200, description = "Booking retrieved", body = ApiResponse<BookingDto>),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "Booking not found", body = ApiError)
    ),
    tag = "bookings"
)]
pub async fn get_booking(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<BookingDto>>, ApiError> {
    let (booking, commission) = BookingRepository::new(&state.db)
        .find_with_commission(id)
        .await?
        .ok_or_else(|| not_found("Booking", id))?;

    Ok(Json(ApiResponse::new(BookingDto::with_commission(
        booking, commission,
    ))))
}

/// Create a booking (public site form)
#[utoipa::path(
    post,
    path = "/api/bookings",
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking created", body = ApiResponse<BookingDto>),
        (status = 400, description = "Validation failed", body = ApiError)
    ),
    tag = "bookings"
)]
pub async fn create_booking(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateBookingRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BookingDto>>), ApiError> {
    request.check()?;

    let booking = BookingRepository::new(&state.db)
        .create(CreateBooking {
            client_name: request.client_name,
            email: request.email,
            phone: request.phone,
            event_type: request.event_type,
            event_date: request.event_date,
            message: request.message,
            commission_id: request.commission_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::new(booking.into()))))
}

/// Partially update a booking
#[utoipa::path(
    patch,
    path = "/api/bookings/{id}",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Booking id")),
    request_body = UpdateBookingRequest,
    responses(
        (status = 200, description = "Booking updated", body = ApiResponse<BookingDto>),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "Booking not found", body = ApiError)
    ),
    tag = "bookings"
)]
pub async fn update_booking(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i32>,
    ApiJson(request): ApiJson<UpdateBookingRequest>,
) -> Result<Json<ApiResponse<BookingDto>>, ApiError> {
    request.check()?;

    let booking = BookingRepository::new(&state.db)
        .update(
            id,
            BookingPatch {
                client_name: request.client_name,
                email: request.email,
                phone: request.phone,
                event_type: request.event_type,
                event_date: request.event_date,
                message: request.message,
                status: request.status,
                commission_id: request.commission_id,
            },
        )
        .await?
        .ok_or_else(|| not_found("Booking", id))?;

    Ok(Json(ApiResponse::new(booking.into())))
}

/// Soft-delete a booking
#[utoipa::path(
    delete,
    path = "/api/bookings/{id}",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Booking id")),
    responses(
        (status = 200, description = "Booking deleted", body = ApiResponse<BookingDto>),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "Booking not found", body = ApiError)
    ),
    tag = "bookings"
)]
pub async fn delete_booking(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<BookingDto>>, ApiError> {
    let booking = BookingRepository::new(&state.db)
        .soft_delete(id)
        .await?
        .ok_or_else(|| not_found("Booking", id))?;

    Ok(Json(ApiResponse::with_message(
        booking.into(),
        "Booking deleted",
    )))
}

/// Restore a soft-deleted booking
#[utoipa::path(
    post,
    path = "/api/bookings/{id}/restore",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Booking id")),
    responses(
        (status = 200, description = "Booking restored", body = ApiResponse<BookingDto>),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "Booking not found", body = ApiError)
    ),
    tag = "bookings"
)]
pub async fn restore_booking(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<BookingDto>>, ApiError> {
    let booking = BookingRepository::new(&state.db)
        .restore(id)
        .await?
        .ok_or_else(|| not_found("Booking", id))?;

    Ok(Json(ApiResponse::with_message(
        booking.into(),
        "Booking restored",
    )))
}
