//! # Authentication Middleware
//!
//! Validates `Authorization: Bearer <jwt>` and injects the token's
//! [`Claims`](lib_auth::Claims) into the request extensions.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use axum::{middleware::from_fn_with_state, routing::put, Router};
//! use lib_web::middleware::require_auth;
//!
//! let app = Router::new()
//!     .route("/users/{id}", put(update_user))
//!     .route_layer(from_fn_with_state(state.clone(), require_auth))
//!     .with_state(state);
//! ```
//!
//! Handlers can then extract claims using `Extension<Claims>`.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use lib_auth::decode_jwt;
use lib_core::{AppError, Config};
use tracing::{debug, warn};

/// Authentication middleware that validates JWT tokens.
///
/// - **Valid token**: continues with `Claims` in extensions
/// - **Missing header / not a bearer token**: `401 Unauthorized`
/// - **Expired token**: `401 TokenExpired`
/// - **Bad signature / malformed token**: `401 InvalidToken`
pub async fn require_auth(
    State(config): State<Config>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            warn!("[AUTH] Missing Authorization header");
            AppError::Unauthorized("Missing Authorization header".to_string())
        })?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            warn!("[AUTH] Invalid Authorization header format");
            AppError::Unauthorized("Authorization header must be 'Bearer <token>'".to_string())
        })?;

    let claims = decode_jwt(token, &config.jwt_secret).map_err(|e| {
        warn!("[AUTH] JWT validation failed: {}", e);
        AppError::from(e)
    })?;

    debug!("[AUTH] Authenticated user: {} (id: {})", claims.name, claims.sub);

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
