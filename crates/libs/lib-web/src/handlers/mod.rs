//! # HTTP Request Handlers
//!
//! Axum handlers organized by feature domain.
//!
//! ## Handler Modules
//!
//! - **[`auth`]**: registration and login
//!   - `POST /users`, `POST /register` - Create a user account
//!   - `POST /login` - Exchange email/password for a JWT
//!
//! - **[`users`]**: user CRUD
//!   - `GET /` - Welcome message
//!   - `GET /users` - List all users
//!   - `GET /users/{id}` - Get one user
//!   - `GET /users/{role}/role` - List users with a role
//!   - `PUT /users/{id}` - Overwrite a user (JWT required)
//!   - `DELETE /users/{id}` - Delete a user (JWT required)
//!
//! ## Error Handling
//!
//! Handlers return `Result<Json<T>, AppError>`. Extractor rejections are taken
//! as `Result<_, Rejection>` and turned into `AppError::InvalidInput`, so every
//! failure, including a malformed path or form, gets the same JSON error body.
//!
//! ## Blocking Work
//!
//! bcrypt is CPU-bound; hashing and verification run on the blocking
//! thread pool so they don't stall other requests on the runtime workers.

pub mod auth;
pub mod users;

use axum::extract::rejection::{FormRejection, PathRejection};
use lib_auth::{hash_password, verify_password, MAX_PASSWORD_BYTES};
use lib_core::AppError;
use lib_utils::validation::{parse_int, validate_email, validate_max_bytes, validate_not_empty};

/// Validated name/address/telp/email shared by registration and update.
#[derive(Debug)]
pub(crate) struct Profile {
    pub name: String,
    pub address: String,
    pub telp: i64,
    pub email: String,
}

impl Profile {
    pub(crate) fn parse(
        name: String,
        address: String,
        telp: &str,
        email: String,
    ) -> Result<Self, AppError> {
        validate_not_empty(&name, "name").map_err(AppError::InvalidInput)?;
        validate_email(email.trim()).map_err(AppError::InvalidInput)?;
        let telp = parse_int(telp, "telp").map_err(AppError::InvalidInput)?;

        Ok(Self {
            name: name.trim().to_string(),
            address: address.trim().to_string(),
            telp,
            email: email.trim().to_string(),
        })
    }
}

pub(crate) fn form_rejection(rejection: FormRejection) -> AppError {
    AppError::InvalidInput(rejection.body_text())
}

pub(crate) fn path_rejection(rejection: PathRejection) -> AppError {
    AppError::InvalidInput(rejection.body_text())
}

pub(crate) fn check_password_length(password: &str) -> Result<(), AppError> {
    validate_max_bytes(password, MAX_PASSWORD_BYTES, "password").map_err(AppError::InvalidInput)
}

/// Hash on the blocking pool.
pub(crate) async fn hash_blocking(password: String, cost: u32) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || hash_password(&password, cost))
        .await
        .map_err(|e| AppError::Internal(format!("hashing task failed: {}", e)))?
        .map_err(AppError::from)
}

/// Verify on the blocking pool.
pub(crate) async fn verify_blocking(password: String, hash: String) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| AppError::Internal(format!("verification task failed: {}", e)))
}
