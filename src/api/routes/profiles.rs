//! Profile route handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    api::types::{
        MessageResponse, PhotoData, PhotoRequest, PhotoResponse, ProfileListResponse,
        ProfileResponse, ShareResponse, ShareableProfile,
    },
    error::{Error, Result},
    merge::ProfileUpdate,
    server::AppState,
    validation,
};

/// List all public profiles, newest first
#[utoipa::path(
    get,
    path = "/api/profile",
    responses(
        (status = 200, description = "Public profiles", body = ProfileListResponse),
    ),
    tag = "profile",
)]
pub async fn list_public(State(state): State<AppState>) -> Result<Json<ProfileListResponse>> {
    let profiles = state.profiles.list_public().await?;

    Ok(Json(ProfileListResponse {
        count: profiles.len(),
        data: profiles,
    }))
}

/// Get a profile, creating the identity-seeded default on first read
#[utoipa::path(
    get,
    path = "/api/profile/{user_id}",
    params(("user_id" = String, Path, description = "Public user identifier")),
    responses(
        (status = 200, description = "Profile retrieved", body = ProfileResponse),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse),
    ),
    tag = "profile",
)]
pub async fn get_profile(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<ProfileResponse>> {
    let profile = state.profiles.get_or_create_default(&user_id).await?;

    Ok(Json(ProfileResponse {
        message: "Profile retrieved successfully".to_string(),
        data: profile,
    }))
}

/// Create or update a profile from a partial payload
#[utoipa::path(
    post,
    path = "/api/profile/{user_id}",
    params(("user_id" = String, Path, description = "Public user identifier")),
    request_body = ProfileUpdate,
    responses(
        (status = 200, description = "Profile updated", body = ProfileResponse),
        (status = 201, description = "Profile created", body = ProfileResponse),
        (status = 400, description = "Validation failed", body = crate::error::ErrorResponse),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse),
    ),
    tag = "profile",
)]
pub async fn upsert_profile(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(payload): Json<ProfileUpdate>,
) -> Result<(StatusCode, Json<ProfileResponse>)> {
    validation::validate_profile(&payload)?;

    let (profile, created) = state.profiles.upsert(&user_id, &payload).await?;

    let (status, message) = if created {
        (StatusCode::CREATED, "Profile created successfully")
    } else {
        (StatusCode::OK, "Profile updated successfully")
    };

    Ok((
        status,
        Json(ProfileResponse {
            message: message.to_string(),
            data: profile,
        }),
    ))
}

/// Set the profile photo
#[utoipa::path(
    post,
    path = "/api/profile/{user_id}/photo",
    params(("user_id" = String, Path, description = "Public user identifier")),
    request_body = PhotoRequest,
    responses(
        (status = 200, description = "Photo updated", body = PhotoResponse),
        (status = 400, description = "Photo URL missing", body = crate::error::ErrorResponse),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse),
    ),
    tag = "profile",
)]
pub async fn set_photo(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(request): Json<PhotoRequest>,
) -> Result<Json<PhotoResponse>> {
    let photo_url = request
        .photo_url
        .filter(|url| !url.is_empty())
        .ok_or_else(|| Error::Validation(vec!["Photo URL is required".to_string()]))?;

    let profile = state.profiles.set_photo(&user_id, photo_url).await?;

    Ok(Json(PhotoResponse {
        message: "Profile photo updated successfully".to_string(),
        data: PhotoData {
            profile_photo: profile.profile_photo,
        },
    }))
}

/// Clear the profile photo
#[utoipa::path(
    delete,
    path = "/api/profile/{user_id}/photo",
    params(("user_id" = String, Path, description = "Public user identifier")),
    responses(
        (status = 200, description = "Photo deleted", body = MessageResponse),
        (status = 404, description = "Profile not found", body = crate::error::ErrorResponse),
    ),
    tag = "profile",
)]
pub async fn delete_photo(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<MessageResponse>> {
    state.profiles.clear_photo(&user_id).await?;

    Ok(Json(MessageResponse {
        message: "Profile photo deleted successfully".to_string(),
    }))
}

/// Get the shareable view of a public profile
#[utoipa::path(
    get,
    path = "/api/profile/{user_id}/share",
    params(("user_id" = String, Path, description = "Public user identifier")),
    responses(
        (status = 200, description = "Shareable profile", body = ShareResponse),
        (status = 403, description = "Profile is private", body = crate::error::ErrorResponse),
        (status = 404, description = "Profile not found", body = crate::error::ErrorResponse),
    ),
    tag = "profile",
)]
pub async fn share_profile(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<ShareResponse>> {
    let profile = state.profiles.shareable(&user_id).await?;
    let share_url = format!("{}/profile/{}", state.config.server.frontend_url, user_id);

    Ok(Json(ShareResponse {
        message: "Profile ready to share".to_string(),
        data: ShareableProfile::from(&profile),
        share_url,
    }))
}
