//! API request and response types
//!
//! Wire field names and success messages are kept compatible with the
//! legacy frontend: successes carry a human-readable `message` plus a
//! `data`/`user` payload, lists add a `count`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::persistence::{ProfileRecord, SocialMedia, SupportTicket, UserRecord};

/// Signup payload; field presence is checked by the rule set, not serde
#[derive(Debug, Deserialize, ToSchema)]
pub struct SignupRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Login payload
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Sanitized identity projection; never carries the credential
#[derive(Debug, Serialize, ToSchema)]
pub struct UserView {
    pub id: i64,
    pub user_id: String,
    pub email: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl UserView {
    /// Projection used by signup/login responses
    pub fn brief(user: &UserRecord) -> Self {
        Self {
            id: user.id,
            user_id: user.user_id.clone(),
            email: user.email.clone(),
            created_at: user.created_at,
            updated_at: None,
        }
    }

    /// Full projection including the update timestamp
    pub fn full(user: &UserRecord) -> Self {
        Self {
            updated_at: Some(user.updated_at),
            ..Self::brief(user)
        }
    }
}

/// Success envelope for signup and login
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub message: String,
    pub user: UserView,
}

/// Identity lookup envelope
#[derive(Debug, Serialize, ToSchema)]
pub struct MeResponse {
    pub user: UserView,
}

/// Success envelope carrying a profile
#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub message: String,
    pub data: ProfileRecord,
}

/// Public profile listing
#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileListResponse {
    pub count: usize,
    pub data: Vec<ProfileRecord>,
}

/// Photo upload payload
#[derive(Debug, Deserialize, ToSchema)]
pub struct PhotoRequest {
    #[serde(rename = "photoUrl")]
    pub photo_url: Option<String>,
}

/// Photo upload result
#[derive(Debug, Serialize, ToSchema)]
pub struct PhotoResponse {
    pub message: String,
    pub data: PhotoData,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PhotoData {
    #[serde(rename = "profilePhoto")]
    pub profile_photo: Option<String>,
}

/// Bare success message
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Public projection of a shareable profile
#[derive(Debug, Serialize, ToSchema)]
pub struct ShareableProfile {
    pub user_id: String,
    pub name: String,
    #[serde(rename = "profilePhoto")]
    pub profile_photo: Option<String>,
    pub about: String,
    #[serde(rename = "socialMedia")]
    pub social_media: SocialMedia,
    #[serde(rename = "profileCompleteness")]
    pub completeness: i64,
}

impl From<&ProfileRecord> for ShareableProfile {
    fn from(profile: &ProfileRecord) -> Self {
        Self {
            user_id: profile.user_id.clone(),
            name: profile.name.clone(),
            profile_photo: profile.profile_photo.clone(),
            about: profile.about.clone(),
            social_media: profile.social_media.clone(),
            completeness: profile.completeness,
        }
    }
}

/// Share view envelope
#[derive(Debug, Serialize, ToSchema)]
pub struct ShareResponse {
    pub message: String,
    pub data: ShareableProfile,
    #[serde(rename = "shareUrl")]
    pub share_url: String,
}

/// Ticket creation payload
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTicketRequest {
    pub user_id: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub description: Option<String>,
    pub screenshot: Option<String>,
    #[serde(rename = "contactNumber")]
    pub contact_number: Option<String>,
}

/// Success envelope carrying a ticket
#[derive(Debug, Serialize, ToSchema)]
pub struct TicketResponse {
    pub message: String,
    pub data: SupportTicket,
}

/// Ticket listing
#[derive(Debug, Serialize, ToSchema)]
pub struct TicketListResponse {
    pub count: usize,
    pub data: Vec<SupportTicket>,
}

/// Single-ticket envelope (no message, matching the legacy shape)
#[derive(Debug, Serialize, ToSchema)]
pub struct TicketItemResponse {
    pub data: SupportTicket,
}

/// Health check response
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub message: String,
    pub status: String,
    pub timestamp: DateTime<Utc>,
}
