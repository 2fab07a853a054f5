//! # Schedules API Handlers
//!
//! Internal choir calendar with two extra read views: month-grouped and
//! upcoming. Reads are public; mutations require a bearer token.

use std::collections::BTreeMap;

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
use crate::models::schedule::{Model as ScheduleModel, STATUSES, TYPES};
use crate::repositories::ScheduleRepository;
use crate::repositories::schedule::{CreateSchedule, ScheduleFilter, SchedulePatch};
use crate::server::AppState;
use crate::validation::{
    FieldError, Validate, require_clock_time, require_non_empty, require_one_of,
};

/// Schedule representation returned to clients
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDto {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub schedule_date: NaiveDate,
    /// Start time (HH:MM)
    #[schema(example = "18:30")]
    pub start_time: String,
    pub end_time: Option<String>,
    pub location: Option<String>,
    pub schedule_type: String,
    pub status: String,
    pub completed_at: Option<chrono::DateTime<chrono::FixedOffset>>,
    pub created_at: chrono::DateTime<chrono::FixedOffset>,
    pub updated_at: chrono::DateTime<chrono::FixedOffset>,
}

impl From<ScheduleModel> for ScheduleDto {
    fn from(schedule: ScheduleModel) -> Self {
        Self {
            id: schedule.id,
            title: schedule.title,
            description: schedule.description,
            schedule_date: schedule.schedule_date,
            start_time: schedule.start_time,
            end_time: schedule.end_time,
            location: schedule.location,
            schedule_type: schedule.schedule_type,
            status: schedule.status,
            completed_at: schedule.completed_at,
            created_at: schedule.created_at,
            updated_at: schedule.updated_at,
        }
    }
}

/// Request payload for creating a schedule entry
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateScheduleRequest {
    pub title: String,
    pub description: Option<String>,
    pub schedule_date: NaiveDate,
    pub start_time: String,
    pub end_time: Option<String>,
    pub location: Option<String>,
    pub schedule_type: String,
    pub status: Option<String>,
}

impl Validate for CreateScheduleRequest {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        require_non_empty(&mut errors, "title", &self.title);
        require_clock_time(&mut errors, "startTime", &self.start_time);
        if let Some(end_time) = &self.end_time {
            require_clock_time(&mut errors, "endTime", end_time);
        }
        require_one_of(&mut errors, "scheduleType", &self.schedule_type, TYPES);
        if let Some(status) = &self.status {
            require_one_of(&mut errors, "status", status, STATUSES);
        }
        errors
    }
}

/// Request payload for partially updating a schedule entry
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateScheduleRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub schedule_date: Option<NaiveDate>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub location: Option<String>,
    pub schedule_type: Option<String>,
    pub status: Option<String>,
}

impl Validate for UpdateScheduleRequest {
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
        if let Some(schedule_type) = &self.schedule_type {
            require_one_of(&mut errors, "scheduleType", schedule_type, TYPES);
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
pub struct ScheduleListQuery {
    pub status: Option<String>,
    pub schedule_type: Option<String>,
    /// Earliest schedule date (inclusive)
    pub from: Option<NaiveDate>,
    /// Latest schedule date (inclusive)
    pub to: Option<NaiveDate>,
}

/// Query parameters for the month-grouped view
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct GroupedByMonthQuery {
    /// Calendar year; defaults to the current year
    pub year: Option<i32>,
}

impl Validate for GroupedByMonthQuery {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if let Some(year) = self.year {
            if !(1000..=9999).contains(&year) {
                errors.push(FieldError::new(
                    "year",
                    "range",
                    "year must be a four-digit calendar year",
                ));
            }
        }
        errors
    }
}

/// Query parameters for the upcoming view
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct UpcomingQuery {
    /// Window length in days; defaults to 7
    pub days: Option<i64>,
}

// A century is well past any real planning horizon; anything bigger would
// overflow the date arithmetic.
const MAX_UPCOMING_DAYS: i64 = 36_500;

impl Validate for UpcomingQuery {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if let Some(days) = self.days {
            if !(0..=MAX_UPCOMING_DAYS).contains(&days) {
                errors.push(FieldError::new(
                    "days",
                    "range",
                    format!("days must be between 0 and {}", MAX_UPCOMING_DAYS),
                ));
            }
        }
        errors
    }
}

/// List schedule entries ordered by date
#[utoipa::path(
    get,
    path = "/api/schedules",
    params(ScheduleListQuery),
    responses(
        (status = 200, description = "Schedules retrieved", body = ApiResponse<Vec<ScheduleDto>>)
    ),
    tag = "schedules"
)]
pub async fn list_schedules(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ScheduleListQuery>,
) -> Result<Json<ApiResponse<Vec<ScheduleDto>>>, ApiError> {
    let schedules = ScheduleRepository::new(&state.db)
        .list(ScheduleFilter {
            status: query.status,
            schedule_type: query.schedule_type,
            from: query.from,
            to: query.to,
        })
        .await?;

    Ok(Json(ApiResponse::new(
        schedules.into_iter().map(ScheduleDto::from).collect(),
    )))
}

/// Group one year's schedule entries by month
#[utoipa::path(
    get,
    path = "/api/schedules/grouped-by-month",
    params(GroupedByMonthQuery),
    responses(
        (status = 200, description = "Schedules grouped under YYYY-MM keys",
         body = ApiResponse<BTreeMap<String, Vec<ScheduleDto>>>),
        (status = 400, description = "Year out of range", body = ApiError)
    ),
    tag = "schedules"
)]
pub async fn grouped_by_month(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<GroupedByMonthQuery>,
) -> Result<Json<ApiResponse<BTreeMap<String, Vec<ScheduleDto>>>>, ApiError> {
    query.check()?;

    let groups = ScheduleRepository::new(&state.db)
        .grouped_by_month(query.year)
        .await?;

    let groups = groups
        .into_iter()
        .map(|(month, rows)| (month, rows.into_iter().map(ScheduleDto::from).collect()))
        .collect();

    Ok(Json(ApiResponse::new(groups)))
}

/// List non-cancelled entries in the next days
#[utoipa::path(
    get,
    path = "/api/schedules/upcoming",
    params(UpcomingQuery),
    responses(
        (status = 200, description = "Upcoming schedules retrieved", body = ApiResponse<Vec<ScheduleDto>>),
        (status = 400, description = "Window out of range", body = ApiError)
    ),
    tag = "schedules"
)]
pub async fn upcoming_schedules(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<UpcomingQuery>,
) -> Result<Json<ApiResponse<Vec<ScheduleDto>>>, ApiError> {
    query.check()?;

    let schedules = ScheduleRepository::new(&state.db)
        .upcoming(query.days)
        .await?;

    Ok(Json(ApiResponse::new(
        schedules.into_iter().map(ScheduleDto::from).collect(),
    )))
}

/// Get a schedule entry by id
#[utoipa::path(
    get,
    path = "/api/schedules/{id}",
    params(("id" = i32, Path, description = "Schedule id")),
    responses(
        (status = 200, description = "Schedule retrieved", body = ApiResponse<ScheduleDto>),
        (status = 404, description = "Schedule not found", body = ApiError)
    ),
    tag = "schedules"
)]
pub async fn get_schedule(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<ScheduleDto>>, ApiError> {
    let schedule = ScheduleRepository::new(&state.db)
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found("Schedule", id))?;

    Ok(Json(ApiResponse::new(schedule.into())))
}

/// Create a schedule entry
#[utoipa::path(
    post,
    path = "/api/schedules",
    security(("bearer_auth" = [])),
    request_body = CreateScheduleRequest,
    responses(
        (status = 201, description = "Schedule created", body = ApiResponse<ScheduleDto>),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError)
    ),
    tag = "schedules"
)]
pub async fn create_schedule(
    State(state): State<AppState>,
    _auth: AuthUser,
    ApiJson(request): ApiJson<CreateScheduleRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ScheduleDto>>), ApiError> {
    request.check()?;

    let schedule = ScheduleRepository::new(&state.db)
        .create(CreateSchedule {
            title: request.title,
            description: request.description,
            schedule_date: request.schedule_date,
            start_time: request.start_time,
            end_time: request.end_time,
            location: request.location,
            schedule_type: request.schedule_type,
            status: request.status,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(schedule.into())),
    ))
}

/// Partially update a schedule entry
#[utoipa::path(
    patch,
    path = "/api/schedules/{id}",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Schedule id")),
    request_body = UpdateScheduleRequest,
    responses(
        (status = 200, description = "Schedule updated", body = ApiResponse<ScheduleDto>),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "Schedule not found", body = ApiError)
    ),
    tag = "schedules"
)]
pub async fn update_schedule(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i32>,
    ApiJson(request): ApiJson<UpdateScheduleRequest>,
) -> Result<Json<ApiResponse<ScheduleDto>>, ApiError> {
    request.check()?;

    let schedule = ScheduleRepository::new(&state.db)
        .update(
            id,
            SchedulePatch {
                title: request.title,
                description: request.description,
                schedule_date: request.schedule_date,
                start_time: request.start_time,
                end_time: request.end_time,
                location: request.location,
                schedule_type: request.schedule_type,
                status: request.status,
            },
        )
        .await?
        .ok_or_else(|| not_found("Schedule", id))?;

    Ok(Json(ApiResponse::new(schedule.into())))
}

/// Soft-delete a schedule entry
#[utoipa::path(
    delete,
    path = "/api/schedules/{id}",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Schedule id")),
    responses(
        (status = 200, description = "Schedule deleted", body = ApiResponse<ScheduleDto>),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "Schedule not found", body = ApiError)
    ),
    tag = "schedules"
)]
pub async fn delete_schedule(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<ScheduleDto>>, ApiError> {
    let schedule = ScheduleRepository::new(&state.db)
        .soft_delete(id)
        .await?
        .ok_or_else(|| not_found("Schedule", id))?;

    Ok(Json(ApiResponse::with_message(
        schedule.into(),
        "Schedule deleted",
    )))
}

/// Restore a soft-deleted schedule entry
#[utoipa::path(
    post,
    path = "/api/schedules/{id}/restore",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Schedule id")),
    responses(
        (status = 200, description = "Schedule restored", body = ApiResponse<ScheduleDto>),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "Schedule not found", body = ApiError)
    ),
    tag = "schedules"
)]
pub async fn restore_schedule(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<ScheduleDto>>, ApiError> {
    let schedule = ScheduleRepository::new(&state.db)
        .restore(id)
        .await?
        .ok_or_else(|| not_found("Schedule", id))?;

    Ok(Json(ApiResponse::with_message(
        schedule.into(),
        "Schedule restored",
    )))
}
