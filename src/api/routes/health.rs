//! Root health check

use axum::Json;
use chrono::Utc;

use crate::api::types::HealthResponse;

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service is running", body = HealthResponse),
    ),
    tag = "health",
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        message: "Support System API".to_string(),
        status: "Running".to_string(),
        timestamp: Utc::now(),
    })
}
