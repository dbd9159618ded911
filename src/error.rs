//! Error types for the Support System API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Main error type for the Support System API
#[derive(Debug, Error)]
pub enum Error {
    /// One or more field rules were violated; every violation is collected
    #[error("Validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),

    /// A store uniqueness constraint was violated
    #[error("{field} already exists")]
    Duplicate { field: String },

    /// A referenced identity, profile or ticket does not exist
    #[error("{resource} not found")]
    NotFound { resource: String },

    /// Wrong email or password; reported identically to avoid leaking which
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Authentication blocked by account deactivation
    #[error("Account is deactivated. Please contact support.")]
    AccountDisabled,

    /// Access to a private profile's share view
    #[error("{message}")]
    Forbidden { message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] figment::Error),

    /// Underlying persistence failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal server error
    #[error("Internal server error: {message}")]
    Internal { message: String },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Convenience constructor for not-found errors
    pub fn not_found(resource: &str) -> Self {
        Error::NotFound {
            resource: resource.to_string(),
        }
    }

    /// Get error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::Validation(_) => "SUPPORT_API_VALIDATION_ERROR",
            Error::Duplicate { .. } => "SUPPORT_API_DUPLICATE_KEY",
            Error::NotFound { .. } => "SUPPORT_API_NOT_FOUND",
            Error::InvalidCredentials => "SUPPORT_API_INVALID_CREDENTIALS",
            Error::AccountDisabled => "SUPPORT_API_ACCOUNT_DISABLED",
            Error::Forbidden { .. } => "SUPPORT_API_FORBIDDEN",
            Error::Config(_) => "SUPPORT_API_CONFIG_ERROR",
            Error::Database(_) => "SUPPORT_API_STORE_UNAVAILABLE",
            Error::Serialization(_) => "SUPPORT_API_SERIALIZATION_ERROR",
            Error::Internal { .. } => "SUPPORT_API_INTERNAL_ERROR",
        }
    }

    /// Check if error is a client error
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::Validation(_)
                | Error::Duplicate { .. }
                | Error::NotFound { .. }
                | Error::InvalidCredentials
                | Error::AccountDisabled
                | Error::Forbidden { .. }
        )
    }

    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::Duplicate { .. } => StatusCode::CONFLICT,
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
            Error::InvalidCredentials | Error::AccountDisabled => StatusCode::UNAUTHORIZED,
            Error::Forbidden { .. } => StatusCode::FORBIDDEN,
            Error::Database(_) => StatusCode::SERVICE_UNAVAILABLE,
            Error::Config(_) | Error::Serialization(_) | Error::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Human-readable label carried in the `error` field of the response
    fn error_label(&self) -> &'static str {
        match self {
            Error::Validation(_) => "Bad Request",
            Error::Duplicate { .. } => "Duplicate Entry",
            Error::NotFound { .. } => "Not Found",
            Error::InvalidCredentials | Error::AccountDisabled => "Unauthorized",
            Error::Forbidden { .. } => "Forbidden",
            Error::Database(_) => "Service Unavailable",
            Error::Config(_) | Error::Serialization(_) | Error::Internal { .. } => {
                "Internal Server Error"
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Validation responses carry the full list of violations; internal
        // failures never leak store or configuration detail to the caller.
        let message = match &self {
            Error::Validation(violations) => json!(violations),
            Error::Database(e) => {
                tracing::error!(error = %e, "store operation failed");
                json!("Service temporarily unavailable")
            }
            Error::Config(e) => {
                tracing::error!(error = %e, "configuration error");
                json!("Internal Server Error")
            }
            Error::Serialization(e) => {
                tracing::error!(error = %e, "serialization error");
                json!("Internal Server Error")
            }
            other => json!(other.to_string()),
        };

        let body = Json(json!({
            "statusCode": status.as_u16(),
            "message": message,
            "error": self.error_label(),
        }));

        (status, body).into_response()
    }
}

/// Error response structure for API documentation
#[derive(Debug, serde::Serialize, serde::Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    /// Numeric HTTP status code
    #[serde(rename = "statusCode")]
    pub status_code: u16,

    /// Human-readable message, or an array of messages for validation errors
    pub message: serde_json::Value,

    /// Error-kind label
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            Error::InvalidCredentials.error_code(),
            "SUPPORT_API_INVALID_CREDENTIALS"
        );
        assert_eq!(
            Error::not_found("Profile").error_code(),
            "SUPPORT_API_NOT_FOUND"
        );
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            Error::Validation(vec!["Email is required".into()]).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            Error::Duplicate {
                field: "email".into()
            }
            .status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(Error::AccountDisabled.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            Error::Database(sqlx::Error::PoolClosed).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_client_errors() {
        assert!(Error::InvalidCredentials.is_client_error());
        assert!(Error::not_found("User").is_client_error());
        assert!(!Error::Database(sqlx::Error::PoolClosed).is_client_error());
    }

    #[test]
    fn test_credential_errors_share_a_message() {
        // Wrong email and wrong password must be indistinguishable.
        assert_eq!(
            Error::InvalidCredentials.to_string(),
            "Invalid email or password"
        );
    }
}
