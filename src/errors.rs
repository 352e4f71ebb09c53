//! Centralized error handling.
//!
//! Every layer returns [`AppResult`]. The HTTP layer turns an [`AppError`]
//! into a JSON error body with the matching status code.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Domain errors raised by the customer service
    #[error("{0}")]
    ResourceNotFound(String),

    #[error("{0}")]
    DuplicateResource(String),

    #[error("{0}")]
    RequestValidation(String),

    // Payload validation
    #[error("Invalid input: {0}")]
    BadRequest(String),

    // Authentication & Authorization
    #[error("{0}")]
    UsernameNotFound(String),

    #[error("Bad credentials")]
    InvalidCredentials,

    #[error("Full authentication is required to access this resource")]
    Unauthorized,

    #[error("Access denied")]
    Forbidden,

    // External service errors
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    #[error("Authentication error")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

/// Payload of an error response.
///
/// A copy rides in the response extensions so the request path can be
/// filled in by [`crate::api::middleware::error_path_middleware`].
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    code: &'static str,
    message: String,
    status: u16,
    timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
}

impl ErrorBody {
    /// Re-render this error for the request that produced it.
    pub fn into_response_for(mut self, path: impl Into<String>) -> Response {
        self.path = Some(path.into());
        self.into_response()
    }
}

impl IntoResponse for ErrorBody {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = (status, Json(ErrorResponse { error: self.clone() })).into_response();
        response.extensions_mut().insert(self);
        response
    }
}

impl AppError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::ResourceNotFound(_) => "RESOURCE_NOT_FOUND",
            AppError::DuplicateResource(_) => "DUPLICATE_RESOURCE",
            AppError::RequestValidation(_) => "REQUEST_VALIDATION",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::UsernameNotFound(_) | AppError::InvalidCredentials => "BAD_CREDENTIALS",
            AppError::Unauthorized => "UNAUTHORIZED",
            AppError::Forbidden => "FORBIDDEN",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Jwt(_) => "AUTH_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ResourceNotFound(_) => StatusCode::NOT_FOUND,
            AppError::DuplicateResource(_) => StatusCode::CONFLICT,
            AppError::RequestValidation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::UsernameNotFound(_)
            | AppError::InvalidCredentials
            | AppError::Unauthorized
            | AppError::Jwt(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            AppError::Jwt(e) => {
                tracing::debug!("JWT error: {:?}", e);
                "Invalid or expired token".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }
            // Unknown usernames are reported like a wrong password
            AppError::UsernameNotFound(msg) => {
                tracing::debug!("{}", msg);
                AppError::InvalidCredentials.to_string()
            }
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        ErrorBody {
            code: self.code(),
            message: self.user_message(),
            status: self.status().as_u16(),
            timestamp: Utc::now(),
            path: None,
        }
        .into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    /// Missing customer, with the message clients see.
    pub fn customer_not_found(id: i32) -> Self {
        AppError::ResourceNotFound(format!("customer with the id: [{}] was not found!", id))
    }

    pub fn email_taken() -> Self {
        AppError::DuplicateResource("email already exists.".to_string())
    }

    pub fn no_changes() -> Self {
        AppError::RequestValidation("there were no changes.".to_string())
    }

    pub fn username_not_found(username: &str) -> Self {
        AppError::UsernameNotFound(format!(
            "User with username: [{}] was not found!",
            username
        ))
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        AppError::BadRequest(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
