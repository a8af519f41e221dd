/// Error handling for the API server
///
/// This module provides a unified error type that maps to HTTP responses.
/// All handlers return `Result<T, ApiError>` which automatically converts to
/// the appropriate status code with a `{"message": "..."}` body.
///
/// Validation and ownership checks run before any mutation; nothing is
/// retried. Storage failures convert to 500 responses at this boundary
/// instead of crashing the process.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;

use ticklist_shared::auth::{jwt::JwtError, password::PasswordError};

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Malformed or out-of-range input (400)
    Validation(String),

    /// Registration collision on email or username (400)
    Duplicate(String),

    /// Login failure (400); one fixed message regardless of whether the email
    /// exists
    InvalidCredentials,

    /// Missing, invalid, or stale credential (401)
    Unauthorized(String),

    /// Resource absent or owned by someone else (404); the two cases are
    /// deliberately indistinguishable
    NotFound(String),

    /// Storage or other unexpected failure (500)
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub message: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Validation(msg) => write!(f, "Validation failed: {}", msg),
            ApiError::Duplicate(msg) => write!(f, "Duplicate: {}", msg),
            ApiError::InvalidCredentials => write!(f, "Invalid credentials"),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Duplicate(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::InvalidCredentials => {
                (StatusCode::BAD_REQUEST, "Invalid credentials.".to_string())
            }
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        (status, Json(ErrorResponse { message })).into_response()
    }
}

/// Convert sqlx errors to API errors
///
/// The unique-constraint arms are a race backstop; registration checks for
/// duplicates explicitly before inserting so the more specific message wins.
impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Resource not found.".to_string()),
            sqlx::Error::Database(db_err) => {
                if let Some(constraint) = db_err.constraint() {
                    if constraint.contains("email") {
                        return ApiError::Duplicate(
                            "User with this email already exists.".to_string(),
                        );
                    }
                    if constraint.contains("username") {
                        return ApiError::Duplicate("Username is already taken.".to_string());
                    }
                }

                ApiError::Internal(format!("Database error: {}", db_err))
            }
            _ => ApiError::Internal(format!("Database error: {}", err)),
        }
    }
}

/// Convert request-payload validation errors to API errors
///
/// Collapses the per-field errors into one message line, most specific first.
impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = err
            .field_errors()
            .iter()
            .flat_map(|(_, errors)| {
                errors.iter().map(|error| {
                    error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| "Invalid value.".to_string())
                })
            })
            .collect();
        messages.sort();

        ApiError::Validation(messages.join(" "))
    }
}

/// Convert password hashing errors to API errors
impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        ApiError::Internal(format!("Password operation failed: {}", err))
    }
}

/// Convert token errors to API errors
///
/// Issuance failures are server faults; everything else means the presented
/// credential is bad.
impl From<JwtError> for ApiError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::CreateError(msg) => {
                ApiError::Internal(format!("Token creation failed: {}", msg))
            }
            _ => ApiError::Unauthorized("Not authorized, token failed.".to_string()),
        }
    }
}
