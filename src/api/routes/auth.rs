//! Authentication route handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    api::types::{AuthResponse, LoginRequest, MeResponse, SignupRequest, UserView},
    error::Result,
    server::AppState,
    validation,
};

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Registration successful", body = AuthResponse),
        (status = 400, description = "Validation failed", body = crate::error::ErrorResponse),
        (status = 409, description = "Email already registered", body = crate::error::ErrorResponse),
    ),
    tag = "auth",
)]
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>)> {
    validation::validate_signup(
        request.email.as_deref(),
        request.password.as_deref(),
        state.config.auth.min_password_length,
    )?;

    let user = state
        .identity
        .signup(
            request.email.as_deref().unwrap_or_default(),
            request.password.as_deref().unwrap_or_default(),
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "Registration successful! Please login.".to_string(),
            user: UserView::brief(&user),
        }),
    ))
}

/// Login with email and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 400, description = "Validation failed", body = crate::error::ErrorResponse),
        (status = 401, description = "Invalid credentials or deactivated account", body = crate::error::ErrorResponse),
    ),
    tag = "auth",
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    validation::validate_login(request.email.as_deref(), request.password.as_deref())?;

    let user = state
        .identity
        .login(
            request.email.as_deref().unwrap_or_default(),
            request.password.as_deref().unwrap_or_default(),
        )
        .await?;

    Ok(Json(AuthResponse {
        message: "Login successful!".to_string(),
        user: UserView::brief(&user),
    }))
}

/// Get the identity record behind a public identifier
#[utoipa::path(
    get,
    path = "/api/auth/me/{user_id}",
    params(("user_id" = String, Path, description = "Public user identifier")),
    responses(
        (status = 200, description = "Identity found", body = MeResponse),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse),
    ),
    tag = "auth",
)]
pub async fn me(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<MeResponse>> {
    let user = state.identity.require(&user_id).await?;

    Ok(Json(MeResponse {
        user: UserView::full(&user),
    }))
}
