// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};
use std::collections::HashMap;

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request (domain errors, e.g. duplicate email on register)
    BadRequest(String),

    // 401 Unauthorized
    Unauthorized(String),

    // 403 Forbidden (channel authorization denied)
    Forbidden(String),

    // 404 Not Found - also covers ownership mismatches, which are never
    // distinguished from absence
    NotFound(String),

    // 422 Unprocessable Entity with field-level detail
    UnprocessableEntity {
        message: String,
        field_errors: HashMap<String, String>,
    },

    // 500 Internal Server Error
    InternalServerError(String),

    // 503 Service Unavailable
    ServiceUnavailable(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::Unauthorized(_) => 401,
            ApiError::Forbidden(_) => 403,
            ApiError::NotFound(_) => 404,
            ApiError::UnprocessableEntity { .. } => 422,
            ApiError::InternalServerError(_) => 500,
            ApiError::ServiceUnavailable(_) => 503,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::Unauthorized(msg) => msg,
            ApiError::Forbidden(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::UnprocessableEntity { message, .. } => message,
            ApiError::InternalServerError(msg) => msg,
            ApiError::ServiceUnavailable(msg) => msg,
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        match self {
            ApiError::UnprocessableEntity {
                message,
                field_errors,
            } => {
                json!({
                    "success": false,
                    "message": message,
                    "errors": field_errors
                })
            }
            _ => {
                json!({
                    "success": false,
                    "message": self.message()
                })
            }
        }
    }
}

// Static constructor methods
impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn unprocessable_entity(
        message: impl Into<String>,
        field_errors: HashMap<String, String>,
    ) -> Self {
        ApiError::UnprocessableEntity {
            message: message.into(),
            field_errors,
        }
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        ApiError::ServiceUnavailable(message.into())
    }
}

// Convert other error types to ApiError
impl From<crate::auth::AuthError> for ApiError {
    fn from(err: crate::auth::AuthError) -> Self {
        // All authentication failures collapse to 401; the variants only
        // matter for logging at the point of failure
        ApiError::unauthorized(err.to_string())
    }
}

impl From<crate::database::repository::RepoError> for ApiError {
    fn from(err: crate::database::repository::RepoError) -> Self {
        match err {
            crate::database::repository::RepoError::Duplicate(msg) => ApiError::bad_request(msg),
            crate::database::repository::RepoError::Database(msg) => {
                // Don't expose internal storage errors to clients
                tracing::error!("repository error: {}", msg);
                ApiError::internal_server_error("An error occurred while processing your request")
            }
        }
    }
}

impl From<crate::services::user_service::UserServiceError> for ApiError {
    fn from(err: crate::services::user_service::UserServiceError) -> Self {
        use crate::services::user_service::UserServiceError;
        match err {
            UserServiceError::EmailTaken => {
                ApiError::bad_request("User with this email already exists")
            }
            UserServiceError::InvalidCredentials => {
                ApiError::unauthorized("Invalid credentials")
            }
            UserServiceError::Credential(msg) => {
                tracing::error!("credential subsystem error: {}", msg);
                ApiError::internal_server_error("An error occurred while processing your request")
            }
            UserServiceError::Token(e) => {
                tracing::error!("token issuance failed: {}", e);
                ApiError::internal_server_error("An error occurred while processing your request")
            }
            UserServiceError::Repo(e) => e.into(),
        }
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_json())).into_response()
    }
}
