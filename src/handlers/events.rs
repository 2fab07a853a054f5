//! # Events API Handlers
//!
//! Public concerts and appearances. Reads are public; mutations require a
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
use crate::models::event::Model as EventModel;
use crate::repositories::EventRepository;
use crate::repositories::event::{CreateEvent, EventFilter, EventPatch};
use crate::server::AppState;
use crate::validation::{
    FieldError, Validate, require_clock_time, require_non_empty, require_one_of,
};

const VENUE_TYPES: &[&str] = &["indoor", "outdoor"];

/// Event representation returned to clients
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventDto {
    pub id: i32,
    pub title: String,
    pub description: String,
    /// Calendar date (YYYY-MM-DD)
    #[schema(example = "2026-12-01")]
    pub event_date: NaiveDate,
    /// Start time (HH:MM)
    #[schema(example = "19:00")]
    pub start_time: String,
    pub end_time: Option<String>,
    pub location: String,
    pub venue_type: String,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub is_featured: bool,
    pub organizer_id: Option<i32>,
    pub created_at: chrono::DateTime<chrono::FixedOffset>,
    pub updated_at: chrono::DateTime<chrono::FixedOffset>,
}

impl From<EventModel> for EventDto {
    fn from(event: EventModel) -> Self {
        Self {
            id: event.id,
            title: event.title,
            description: event.description,
            event_date: event.event_date,
            start_time: event.start_time,
            end_time: event.end_time,
            location: event.location,
            venue_type: event.venue_type,
            image_url: event.image_url,
            is_active: event.is_active,
            is_featured: event.is_featured,
            organizer_id: event.organizer_id,
            created_at: event.created_at,
            updated_at: event.updated_at,
        }
    }
}

/// Request payload for creating an event
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    pub title: String,
    pub description: String,
    pub event_date: NaiveDate,
    pub start_time: String,
    pub end_time: Option<String>,
    pub location: String,
    pub venue_type: String,
    pub image_url: Option<String>,
    pub is_active: Option<bool>,
    pub is_featured: Option<bool>,
    pub organizer_id: Option<i32>,
}

impl Validate for CreateEventRequest {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        require_non_empty(&mut errors, "title", &self.title);
        require_non_empty(&mut errors, "description", &self.description);
        require_clock_time(&mut errors, "startTime", &self.start_time);
        if let Some(end_time) = &self.end_time {
            require_clock_time(&mut errors, "endTime", end_time);
        }
        require_non_empty(&mut errors, "location", &self.location);
        require_one_of(&mut errors, "venueType", &self.venue_type, VENUE_TYPES);
        errors
    }
}

/// Request payload for partially updating an event
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub event_date: Option<NaiveDate>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub location: Option<String>,
    pub venue_type: Option<String>,
    pub image_url: Option<String>,
    pub is_active: Option<bool>,
    pub is_featured: Option<bool>,
    pub organizer_id: Option<i32>,
}

impl Validate for UpdateEventRequest {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if let Some(title) = &self.title {
            require_non_empty(&mut errors, "title", title);
        }
        if let Some(start_time) = &self.start_time {
            require_clock_time(&mut errors, "startTime", start_time);
        }
        if let Some(end_time) = &self.end_time {
            require_clock_time(&mut errors, "endTime", end_time);
        }
        if let Some(venue_type) = &self.venue_type {
            require_one_of(&mut errors, "venueType", venue_type, VENUE_TYPES);
        }
        errors
    }
}

/// List query parameters
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct EventListQuery {
    pub is_active: Option<bool>,
    pub is_featured: Option<bool>,
    pub venue_type: Option<String>,
    /// Earliest event date (inclusive)
    pub from: Option<NaiveDate>,
    /// Latest event date (inclusive)
    pub to: Option<NaiveDate>,
}

/// List events ordered by date
#[utoipa::path(
    get,
    path = "/api/events",
    params(EventListQuery),
    responses(
        (status = 200, description = "Events retrieved", body = ApiResponse<Vec<EventDto>>)
    ),
    tag = "events"
)]
pub async fn list_events(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<EventListQuery>,
) -> Result<Json<ApiResponse<Vec<EventDto>>>, ApiError> {
    let events = EventRepository::new(&state.db)
        .list(EventFilter {
            is_active: query.is_active,
            is_featured: query.is_featured,
            venue_type: query.venue_type,
            from: query.from,
            to: query.to,
        })
        .await?;

    Ok(Json(ApiResponse::new(
        events.into_iter().map(EventDto::from).collect(),
    )))
}

/// Get an event by id
#[utoipa::path(
    get,
    path = "/api/events/{id}",
    params(("id" = i32, Path, description = "Event id")),
    responses(
        (status = 200, description = "Event retrieved", body = ApiResponse<EventDto>),
        (status = 404, description = "Event not found", body = ApiError)
    ),
    tag = "events"
)]
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<EventDto>>, ApiError> {
    let event = EventRepository::new(&state.db)
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found("Event", id))?;

    Ok(Json(ApiResponse::new(event.into())))
}

/// Create an event
#[utoipa::path(
    post,
    path = "/api/events",
    security(("bearer_auth" = [])),
    request_body = CreateEventRequest,
    responses(
        (status = 201, description = "Event created", body = ApiResponse<EventDto>),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError)
    ),
    tag = "events"
)]
pub async fn create_event(
    State(state): State<AppState>,
    _auth: AuthUser,
    ApiJson(request): ApiJson<CreateEventRequest>,
) -> Result<(StatusCode, Json<ApiResponse<EventDto>>), ApiError> {
    request.check()?;

    let event = EventRepository::new(&state.db)
        .create(CreateEvent {
            title: request.title,
            description: request.description,
            event_date: request.event_date,
            start_time: request.start_time,
            end_time: request.end_time,
            location: request.location,
            venue_type: request.venue_type,
            image_url: request.image_url,
            is_active: request.is_active,
            is_featured: request.is_featured,
            organizer_id: request.organizer_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::new(event.into()))))
}

/// Partially update an event
#[utoipa::path(
    patch,
    path = "/api/events/{id}",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Event id")),
    request_body = UpdateEventRequest,
    responses(
        (status = 200, description = "Event updated", body = ApiResponse<EventDto>),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "Event not found", body = ApiError)
    ),
    tag = "events"
)]
pub async fn update_event(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i32>,
    ApiJson(request): ApiJson<UpdateEventRequest>,
) -> Result<Json<ApiResponse<EventDto>>, ApiError> {
    request.check()?;

    let event = EventRepository::new(&state.db)
        .update(
            id,
            EventPatch {
                title: request.title,
                description: request.description,
                event_date: request.event_date,
                start_time: request.start_time,
                end_time: request.end_time,
                location: request.location,
                venue_type: request.venue_type,
                image_url: request.image_url,
                is_active: request.is_active,
                is_featured: request.is_featured,
                organizer_id: request.organizer_id,
            },
        )
        .await?
        .ok_or_else(|| not_found("Event", id))?;

    Ok(Json(ApiResponse::new(event.into())))
}

/// Soft-delete an event
#[utoipa::path(
    delete,
    path = "/api/events/{id}",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Event id")),
    responses(
        (status = 200, description = "Event deleted", body = ApiResponse<EventDto>),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "Event not found", body = ApiError)
    ),
    tag = "events"
)]
pub async fn delete_event(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<EventDto>>, ApiError> {
    let event = EventRepository::new(&state.db)
        .soft_delete(id)
        .await?
        .ok_or_else(|| not_found("Event", id))?;

    Ok(Json(ApiResponse::with_message(event.into(), "Event deleted")))
}

/// Restore a soft-deleted event
#[utoipa::path(
    post,
    path = "/api/events/{id}/restore",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Event id")),
    responses(
        (status = 200, description = "Event restored", body = ApiResponse<EventDto>),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "Event not found", body = ApiError)
    ),
    tag = "events"
)]
pub async fn restore_event(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<EventDto>>, ApiError> {
    let event = EventRepository::new(&state.db)
        .restore(id)
        .await?
        .ok_or_else(|| not_found("Event", id))?;

    Ok(Json(ApiResponse::with_message(event.into(), "Event restored")))
}
