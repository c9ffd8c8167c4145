//! # Authentication Handlers
//!
//! Registration and login.
//!
//! ## Overview
//!
//! - Registration validates the form, rejects a known email early, hashes the
//!   password with bcrypt and persists the user with the default role. The
//!   store's unique constraint settles the race between two concurrent
//!   registrations of the same email.
//! - Login looks the user up by email, verifies the password and issues a JWT
//!   whose lifetime is `JWT_EXPIRATION_HOURS`.
//!
//! ## Example
//!
//! ```rust,ignore
//! use axum::{Router, routing::post};
//! use lib_web::handlers::auth::{register, login};
//!
//! let app = Router::new()
//!     .route("/register", post(register))
//!     .route("/login", post(login));
//! ```

use super::{check_password_length, form_rejection, hash_blocking, verify_blocking, Profile};
use axum::extract::{rejection::FormRejection, Form, Json, State};
use lib_auth::encode_jwt;
use lib_core::dto::{LoginForm, LoginResponse, RegisterForm, UserView};
use lib_core::{AppError, Config, UserForCreate, UserStore};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Message for every failed login, whether the email or the password was wrong.
const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Registration handler - creates a new user account.
///
/// # Returns
///
/// * `Ok(UserView)` - the created user, without password hash
/// * `Err(AppError::InvalidInput)` - empty name, malformed email or non-numeric telp
/// * `Err(AppError::Unauthorized)` - empty password
/// * `Err(AppError::EmailTaken)` - email already registered
#[instrument(skip_all)]
pub async fn register(
    State(store): State<Arc<dyn UserStore>>,
    State(config): State<Config>,
    form: Result<Form<RegisterForm>, FormRejection>,
) -> Result<Json<UserView>, AppError> {
    let Form(form) = form.map_err(form_rejection)?;
    info!("[REGISTER] New registration request");
    debug!("   Email: {}", form.email);

    let profile = Profile::parse(form.name, form.address, &form.telp, form.email)?;

    if form.password.is_empty() {
        warn!("[REGISTER] Empty password");
        return Err(AppError::Unauthorized("Password cannot be empty".to_string()));
    }
    check_password_length(&form.password)?;

    // Early exit before the bcrypt round; the insert stays authoritative
    if store.find_by_email(&profile.email).await?.is_some() {
        warn!("[REGISTER] Email already registered: {}", profile.email);
        return Err(AppError::EmailTaken(profile.email));
    }

    debug!("[REGISTER] Hashing password...");
    let password_hash = hash_blocking(form.password, config.bcrypt_cost).await?;

    let user = store
        .save(UserForCreate::new(
            profile.name,
            profile.address,
            profile.telp,
            profile.email,
            password_hash,
        ))
        .await?;

    info!("[REGISTER] User created: id={} role={}", user.id, user.role);

    Ok(Json(UserView::from(user)))
}

/// Login handler - exchanges email and password for a signed token.
///
/// An unknown email and a wrong password produce the same `401` so callers
/// cannot probe which emails are registered.
#[instrument(skip_all)]
pub async fn login(
    State(store): State<Arc<dyn UserStore>>,
    State(config): State<Config>,
    form: Result<Form<LoginForm>, FormRejection>,
) -> Result<Json<LoginResponse>, AppError> {
    let Form(form) = form.map_err(form_rejection)?;
    info!("[LOGIN] Login attempt");
    debug!("   Email: {}", form.email);

    let email = form.email.trim();
    if email.is_empty() || form.password.is_empty() {
        warn!("[LOGIN] Missing email or password");
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    }

    let user = match store.login(email).await {
        Ok(user) => user,
        Err(AppError::NotFound(_)) => {
            warn!("[LOGIN] Unknown email");
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }
        Err(e) => return Err(e),
    };

    if !verify_blocking(form.password, user.password.clone()).await? {
        warn!("[LOGIN] Wrong password for user {}", user.id);
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    }

    let token = encode_jwt(
        user.id,
        &user.name,
        &config.jwt_secret,
        config.jwt_expiration_hours,
    )?;

    info!("[LOGIN] User {} authenticated", user.id);

    Ok(Json(LoginResponse { token }))
}

#[cfg(test)]
mod tests;
