//! # Centralized Error Handling
//!
//! This module defines the application-wide error type [`AppError`]. Store,
//! auth and handler code all return it, and axum turns it into a response
//! through [`IntoResponse`].
//!
//! ## Error Categories
//!
//! 1. **Client Errors** (4xx)
//!    - [`InvalidInput`](AppError::InvalidInput) → 400 Bad Request
//!    - [`Unauthorized`](AppError::Unauthorized), [`EmailTaken`](AppError::EmailTaken),
//!      [`InvalidToken`](AppError::InvalidToken), [`TokenExpired`](AppError::TokenExpired) → 401
//!    - [`NotFound`](AppError::NotFound) → 404 Not Found
//!
//! 2. **Server Errors** (5xx)
//!    - [`Persist`](AppError::Persist), [`Hashing`](AppError::Hashing),
//!      [`Config`](AppError::Config), [`Internal`](AppError::Internal) → 500
//!    - [`StoreUnavailable`](AppError::StoreUnavailable) → 503 Service Unavailable
//!
//! Every error body has the same shape:
//!
//! ```text
//! { "error": "User not found", "code": "NotFound" }
//! ```
//!
//! Server errors only ever expose a generic message; the detail is logged.

use crate::dto::ErrorResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application-wide error type covering all error scenarios.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed path, form field or other client input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Bad credentials, empty password or missing bearer token.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Registration or update collided with an existing email.
    #[error("Email already registered: {0}")]
    EmailTaken(String),

    /// Token signature did not verify or the token is not a JWT.
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token has expired")]
    TokenExpired,

    /// Lookup miss.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A write against the store failed.
    #[error("Persist error: {0}")]
    Persist(String),

    /// Connectivity failure or timeout talking to the store.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Hashing error: {0}")]
    Hashing(String),

    /// Configuration error during startup or environment loading.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal server error (unexpected failures).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_)
            | AppError::EmailTaken(_)
            | AppError::InvalidToken(_)
            | AppError::TokenExpired => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Persist(_)
            | AppError::Hashing(_)
            | AppError::Config(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable kind, used as the `code` field of error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::Unauthorized(_) => "Unauthorized",
            AppError::EmailTaken(_) => "EmailTaken",
            AppError::InvalidToken(_) => "InvalidToken",
            AppError::TokenExpired => "TokenExpired",
            AppError::NotFound(_) => "NotFound",
            AppError::Persist(_) => "Persist",
            AppError::StoreUnavailable(_) => "StoreUnavailable",
            AppError::Hashing(_) => "Hashing",
            AppError::Config(_) => "Config",
            AppError::Internal(_) => "Internal",
        }
    }

    /// Get a user-friendly error message.
    ///
    /// For server errors, returns a generic message to avoid exposing driver details.
    pub fn user_message(&self) -> String {
        match self {
            AppError::InvalidInput(msg)
            | AppError::Unauthorized(msg)
            | AppError::InvalidToken(msg)
            | AppError::NotFound(msg) => msg.clone(),
            AppError::EmailTaken(_) => "Email already registered".to_string(),
            AppError::TokenExpired => "Token has expired, please log in again".to_string(),
            AppError::StoreUnavailable(_) => "Service temporarily unavailable".to_string(),
            AppError::Persist(_)
            | AppError::Hashing(_)
            | AppError::Config(_)
            | AppError::Internal(_) => "An internal error occurred".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(code = self.code(), "Server error: {}", self);
        } else {
            tracing::debug!(code = self.code(), "Client error: {}", self);
        }

        let body = Json(ErrorResponse {
            error: self.user_message(),
            code: self.code().to_string(),
        });

        (status, body).into_response()
    }
}

impl From<lib_auth::Error> for AppError {
    fn from(err: lib_auth::Error) -> Self {
        match err {
            lib_auth::Error::Hashing(msg) => AppError::Hashing(msg),
            lib_auth::Error::TokenExpired => AppError::TokenExpired,
            lib_auth::Error::TokenInvalidSignature => {
                AppError::InvalidToken("Token signature is invalid".to_string())
            }
            lib_auth::Error::TokenMalformed(_) => {
                AppError::InvalidToken("Token is malformed".to_string())
            }
            lib_auth::Error::TokenEncoding(msg) => AppError::Internal(msg),
        }
    }
}
