//! # Server Configuration
//!
//! This module contains the server setup and configuration for the choir API.

use std::sync::Arc;

use axum::{
    Router, middleware,
    extract::{DefaultBodyLimit, FromRef},
    http::HeaderValue,
    routing::{delete, get, post},
};
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::config::AppConfig;
use crate::handlers;
use crate::media::MediaClient;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db: DatabaseConnection,
    pub media: MediaClient,
}

impl AppState {
    pub fn new(config: AppConfig, db: DatabaseConnection) -> Self {
        let media = MediaClient::new(config.media.clone());
        Self {
            config: Arc::new(config),
            db,
            media,
        }
    }
}

// Lets extractors (the bearer-token guard) borrow the config without the
// whole state.
impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if config.cors_allowed_origins.trim() == "*" {
        layer.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_allowed_origins
            .split(',')
            .filter_map(|origin| origin.trim().parse().ok())
            .collect();
        layer.allow_origin(origins)
    }
}

/// Creates and configures the Axum application router
pub fn create_app(state: AppState) -> Router {
    // Batch uploads need headroom beyond the per-file cap.
    let body_limit =
        state.config.upload.max_file_bytes * state.config.upload.max_files + 1024 * 1024;
    let cors = cors_layer(&state.config);

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        // Auth
        .route("/api/auth/register", post(handlers::auth::register))
        .route("/api/auth/login", post(handlers::auth::login))
        // Users (fully protected)
        .route(
            "/api/users",
            get(handlers::users::list_users).post(handlers::users::create_user),
        )
        .route(
            "/api/users/{id}",
            get(handlers::users::get_user)
                .patch(handlers::users::update_user)
                .delete(handlers::users::delete_user),
        )
        .route("/api/users/{id}/restore", post(handlers::users::restore_user))
        // Events
        .route(
            "/api/events",
            get(handlers::events::list_events).post(handlers::events::create_event),
        )
        .route(
            "/api/events/{id}",
            get(handlers::events::get_event)
                .patch(handlers::events::update_event)
                .delete(handlers::events::delete_event),
        )
        .route(
            "/api/events/{id}/restore",
            post(handlers::events::restore_event),
        )
        // Bookings
        .route(
            "/api/bookings",
            get(handlers::bookings::list_bookings).post(handlers::bookings::create_booking),
        )
        .route(
            "/api/bookings/{id}",
            get(handlers::bookings::get_booking)
                .patch(handlers::bookings::update_booking)
                .delete(handlers::bookings::delete_booking),
        )
        .route(
            "/api/bookings/{id}/restore",
            post(handlers::bookings::restore_booking),
        )
        // Commissions
        .route(
            "/api/commissions",
            get(handlers::commissions::list_commissions)
                .post(handlers::commissions::create_commission),
        )
        .route(
            "/api/commissions/{id}",
            get(handlers::commissions::get_commission)
                .patch(handlers::commissions::update_commission)
                .delete(handlers::commissions::delete_commission),
        )
        .route(
            "/api/commissions/{id}/restore",
            post(handlers::commissions::restore_commission),
        )
        // Schedules (views before the id routes for readability; axum picks
        // static segments over params either way)
        .route(
            "/api/schedules/grouped-by-month",
            get(handlers::schedules::grouped_by_month),
        )
        .route(
            "/api/schedules/upcoming",
            get(handlers::schedules::upcoming_schedules),
        )
        .route(
            "/api/schedules",
            get(handlers::schedules::list_schedules).post(handlers::schedules::create_schedule),
        )
        .route(
            "/api/schedules/{id}",
            get(handlers::schedules::get_schedule)
                .patch(handlers::schedules::update_schedule)
                .delete(handlers::schedules::delete_schedule),
        )
        .route(
            "/api/schedules/{id}/restore",
            post(handlers::schedules::restore_schedule),
        )
        // Special programs
        .route(
            "/api/special-programs",
            get(handlers::special_programs::list_special_programs)
                .post(handlers::special_programs::create_special_program),
        )
        .route(
            "/api/special-programs/{id}",
            get(handlers::special_programs::get_special_program)
                .patch(handlers::special_programs::update_special_program)
                .delete(handlers::special_programs::delete_special_program),
        )
        .route(
            "/api/special-programs/{id}/restore",
            post(handlers::special_programs::restore_special_program),
        )
        // Contacts
        .route(
            "/api/contacts",
            get(handlers::contacts::list_contacts).post(handlers::contacts::create_contact),
        )
        .route(
            "/api/contacts/{id}",
            get(handlers::contacts::get_contact)
                .patch(handlers::contacts::update_contact)
                .delete(handlers::contacts::delete_contact),
        )
        .route(
            "/api/contacts/{id}/read",
            post(handlers::contacts::mark_contact_read),
        )
        .route(
            "/api/contacts/{id}/restore",
            post(handlers::contacts::restore_contact),
        )
        // Videos
        .route(
            "/api/videos",
            get(handlers::videos::list_videos).post(handlers::videos::create_video),
        )
        .route(
            "/api/videos/{id}",
            get(handlers::videos::get_video)
                .patch(handlers::videos::update_video)
                .delete(handlers::videos::delete_video),
        )
        .route(
            "/api/videos/{id}/restore",
            post(handlers::videos::restore_video),
        )
        // Upload proxy
        .route("/api/upload/single", post(handlers::upload::upload_single))
        .route(
            "/api/upload/multiple",
            post(handlers::upload::upload_multiple),
        )
        .route("/api/upload/raw", post(handlers::upload::upload_raw))
        .route(
            "/api/upload/{*public_id}",
            delete(handlers::upload::delete_upload),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Outermost so every handler (and error) sees the correlation ID.
        .layer(middleware::from_fn(
            crate::telemetry::trace_context_middleware,
        ))
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
}

/// Starts the server with the given configuration
pub async fn run_server(
    config: AppConfig,
    db: DatabaseConnection,
) -> Result<(), Box<dyn std::error::Error>> {
    let addr = config
        .bind_addr()
        .map_err(|e| format!("Invalid server address: {}", e))?;
    let profile = config.profile.clone();

    let state = AppState::new(config, db);
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server listening on: {}", addr);
    tracing::info!("Running in profile: {}", profile);

    axum::serve(listener, app).await?;

    Ok(())
}

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::root,
        crate::handlers::health,
        crate::handlers::auth::register,
        crate::handlers::auth::login,
        crate::handlers::users::list_users,
        crate::handlers::users::get_user,
        crate::handlers::users::create_user,
        crate::handlers::users::update_user,
        crate::handlers::users::delete_user,
        crate::handlers::users::restore_user,
        crate::handlers::events::list_events,
        crate::handlers::events::get_event,
        crate::handlers::events::create_event,
        crate::handlers::events::update_event,
        crate::handlers::events::delete_event,
        crate::handlers::events::restore_event,
        crate::handlers::bookings::list_bookings,
        crate::handlers::bookings::get_booking,
        crate::handlers::bookings::create_booking,
        crate::handlers::bookings::update_booking,
        crate::handlers::bookings::delete_booking,
        crate::handlers::bookings::restore_booking,
        crate::handlers::commissions::list_commissions,
        crate::handlers::commissions::get_commission,
        crate::handlers::commissions::create_commission,
        crate::handlers::commissions::update_commission,
        crate::handlers::commissions::delete_commission,
        crate::handlers::commissions::restore_commission,
        crate::handlers::schedules::list_schedules,
        crate::handlers::schedules::grouped_by_month,
        crate::handlers::schedules::upcoming_schedules,
        crate::handlers::schedules::get_schedule,
        crate::handlers::schedules::create_schedule,
        crate::handlers::schedules::update_schedule,
        crate::handlers::schedules::delete_schedule,
        crate::handlers::schedules::restore_schedule,
        crate::handlers::special_programs::list_special_programs,
        crate::handlers::special_programs::get_special_program,
        crate::handlers::special_programs::create_special_program,
        crate::handlers::special_programs::update_special_program,
        crate::handlers::special_programs::delete_special_program,
        crate::handlers::special_programs::restore_special_program,
        crate::handlers::contacts::list_contacts,
        crate::handlers::contacts::get_contact,
        crate::handlers::contacts::create_contact,
        crate::handlers::contacts::update_contact,
        crate::handlers::contacts::mark_contact_read,
        crate::handlers::contacts::delete_contact,
        crate::handlers::contacts::restore_contact,
        crate::handlers::videos::list_videos,
        crate::handlers::videos::get_video,
        crate::handlers::videos::create_video,
        crate::handlers::videos::update_video,
        crate::handlers::videos::delete_video,
        crate::handlers::videos::restore_video,
        crate::handlers::upload::upload_single,
        crate::handlers::upload::upload_multiple,
        crate::handlers::upload::upload_raw,
        crate::handlers::upload::delete_upload,
    ),
    components(
        schemas(
            crate::models::ServiceInfo,
            crate::error::ApiError,
            crate::handlers::auth::RegisterRequest,
            crate::handlers::auth::LoginRequest,
            crate::handlers::auth::UserDto,
            crate::handlers::auth::AuthDto,
            crate::handlers::users::CreateUserRequest,
            crate::handlers::users::UpdateUserRequest,
            crate::handlers::events::EventDto,
            crate::handlers::events::CreateEventRequest,
            crate::handlers::events::UpdateEventRequest,
            crate::handlers::bookings::BookingDto,
            crate::handlers::bookings::CreateBookingRequest,
            crate::handlers::bookings::UpdateBookingRequest,
            crate::handlers::commissions::CommissionDto,
            crate::handlers::commissions::CreateCommissionRequest,
            crate::handlers::commissions::UpdateCommissionRequest,
            crate::handlers::schedules::ScheduleDto,
            crate::handlers::schedules::CreateScheduleRequest,
            crate::handlers::schedules::UpdateScheduleRequest,
            crate::handlers::special_programs::SpecialProgramDto,
            crate::handlers::special_programs::CreateSpecialProgramRequest,
            crate::handlers::special_programs::UpdateSpecialProgramRequest,
            crate::handlers::contacts::ContactDto,
            crate::handlers::contacts::CreateContactRequest,
            crate::handlers::contacts::UpdateContactRequest,
            crate::handlers::videos::VideoDto,
            crate::handlers::videos::CreateVideoRequest,
            crate::handlers::videos::UpdateVideoRequest,
            crate::media::AssetInfo,
        )
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Choir API",
        description = "REST backend for the choir organization CMS",
        version = env!("CARGO_PKG_VERSION"),
    )
)]
pub struct ApiDoc;
