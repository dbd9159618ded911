//! Support ticket route handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    api::types::{CreateTicketRequest, TicketItemResponse, TicketListResponse, TicketResponse},
    error::Result,
    server::AppState,
    services::support::TicketRequest,
    validation,
};

/// Open a new support ticket
#[utoipa::path(
    post,
    path = "/api/support",
    request_body = CreateTicketRequest,
    responses(
        (status = 201, description = "Ticket created", body = TicketResponse),
        (status = 400, description = "Validation failed", body = crate::error::ErrorResponse),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse),
    ),
    tag = "support",
)]
pub async fn create_ticket(
    State(state): State<AppState>,
    Json(request): Json<CreateTicketRequest>,
) -> Result<(StatusCode, Json<TicketResponse>)> {
    validation::validate_ticket(
        request.user_id.as_deref(),
        request.email.as_deref(),
        request.subject.as_deref(),
        request.description.as_deref(),
        request.contact_number.as_deref(),
    )?;

    let ticket = state
        .support
        .create(TicketRequest {
            user_id: request.user_id.unwrap_or_default(),
            email: request.email,
            subject: request.subject.unwrap_or_default(),
            description: request.description.unwrap_or_default(),
            screenshot: request.screenshot,
            contact_number: request.contact_number.unwrap_or_default(),
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(TicketResponse {
            message: "Support request submitted successfully".to_string(),
            data: ticket,
        }),
    ))
}

/// List every ticket, newest first
#[utoipa::path(
    get,
    path = "/api/support",
    responses(
        (status = 200, description = "All tickets", body = TicketListResponse),
    ),
    tag = "support",
)]
pub async fn list_tickets(State(state): State<AppState>) -> Result<Json<TicketListResponse>> {
    let tickets = state.support.list_all().await?;

    Ok(Json(TicketListResponse {
        count: tickets.len(),
        data: tickets,
    }))
}

/// List one user's tickets
#[utoipa::path(
    get,
    path = "/api/support/user/{user_id}",
    params(("user_id" = String, Path, description = "Public user identifier")),
    responses(
        (status = 200, description = "User's tickets", body = TicketListResponse),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse),
    ),
    tag = "support",
)]
pub async fn list_user_tickets(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<TicketListResponse>> {
    let tickets = state.support.list_for_user(&user_id).await?;

    Ok(Json(TicketListResponse {
        count: tickets.len(),
        data: tickets,
    }))
}

/// Get a single ticket by id
#[utoipa::path(
    get,
    path = "/api/support/{id}",
    params(("id" = String, Path, description = "Ticket identifier")),
    responses(
        (status = 200, description = "Ticket found", body = TicketItemResponse),
        (status = 404, description = "Ticket not found", body = crate::error::ErrorResponse),
    ),
    tag = "support",
)]
pub async fn get_ticket(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TicketItemResponse>> {
    let ticket = state.support.get(&id).await?;

    Ok(Json(TicketItemResponse { data: ticket }))
}
