//! API module for the Support System API

pub mod routes;
pub mod types;

use crate::server::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create all API routes
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Auth endpoints
        .route("/auth/signup", post(routes::auth::signup))
        .route("/auth/login", post(routes::auth::login))
        .route("/auth/me/:user_id", get(routes::auth::me))
        // Profile endpoints
        .route("/profile", get(routes::profiles::list_public))
        .route(
            "/profile/:user_id",
            get(routes::profiles::get_profile).post(routes::profiles::upsert_profile),
        )
        .route(
            "/profile/:user_id/photo",
            post(routes::profiles::set_photo).delete(routes::profiles::delete_photo),
        )
        .route("/profile/:user_id/share", get(routes::profiles::share_profile))
        // Support endpoints
        .route(
            "/support",
            post(routes::support::create_ticket).get(routes::support::list_tickets),
        )
        .route("/support/user/:user_id", get(routes::support::list_user_tickets))
        .route("/support/:id", get(routes::support::get_ticket))
        .with_state(state)
}

/// Create OpenAPI documentation routes
pub fn docs_routes() -> Router<AppState> {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        routes::auth::signup,
        routes::auth::login,
        routes::auth::me,
        routes::profiles::list_public,
        routes::profiles::get_profile,
        routes::profiles::upsert_profile,
        routes::profiles::set_photo,
        routes::profiles::delete_photo,
        routes::profiles::share_profile,
        routes::support::create_ticket,
        routes::support::list_tickets,
        routes::support::list_user_tickets,
        routes::support::get_ticket,
        routes::health::health,
    ),
    components(schemas(
        types::SignupRequest,
        types::LoginRequest,
        types::UserView,
        types::AuthResponse,
        types::MeResponse,
        types::ProfileResponse,
        types::ProfileListResponse,
        types::PhotoRequest,
        types::PhotoResponse,
        types::PhotoData,
        types::MessageResponse,
        types::ShareableProfile,
        types::ShareResponse,
        types::CreateTicketRequest,
        types::TicketResponse,
        types::TicketListResponse,
        types::TicketItemResponse,
        types::HealthResponse,
        crate::merge::ProfileUpdate,
        crate::merge::SocialMediaUpdate,
        crate::persistence::ProfileRecord,
        crate::persistence::SocialMedia,
        crate::persistence::SupportTicket,
        crate::persistence::TicketStatus,
        crate::error::ErrorResponse,
    )),
    tags(
        (name = "auth", description = "Account registration and login"),
        (name = "profile", description = "User profile management"),
        (name = "support", description = "Support ticket management"),
        (name = "health", description = "Service health"),
    ),
    info(
        title = "Support System API",
        version = "1.0.0",
        description = "REST backend for user accounts, profiles and support tickets",
        license(
            name = "MIT",
        ),
    ),
    servers(
        (url = "http://localhost:3001", description = "Local development"),
    ),
)]
struct ApiDoc;
