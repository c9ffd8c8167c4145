//! # Server Setup
//!
//! Tracing initialization, route registration, and HTTP server startup.
//!
//! [`create_router`] builds the complete application from an [`AppState`] and
//! does no I/O, so tests drive it with `tower::ServiceExt::oneshot` against an
//! in-memory store. [`start_server`] connects the SQL store and serves it.

// region: --- Imports
use crate::handlers::{auth, users};
use crate::middleware::{log_requests, require_auth, stamp_req, RequestStamp};
use axum::{
    extract::FromRef,
    http::{header, HeaderValue, Method, Request, Response},
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post, put},
    Router,
};
use lib_core::{create_pool, ensure_schema, AppError, Config, SqlUserStore, UserStore};
use std::sync::Arc;
use std::time::Duration;
use tower_http::classify::ServerErrorsFailureClass;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, Span};
use tracing_subscriber::EnvFilter;
// endregion: --- Imports

// region: --- AppState
/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
    pub config: Config,
}

impl AppState {
    pub fn new(store: Arc<dyn UserStore>, config: Config) -> Self {
        Self { store, config }
    }
}

impl FromRef<AppState> for Arc<dyn UserStore> {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
// endregion: --- AppState

// region: --- Tracing
/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `LOG_LEVEL` (default `info`) is used
/// as the filter.
pub fn init_tracing() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| {
        let level = std::env::var("LOG_LEVEL")
            .unwrap_or_else(|_| "info".to_string())
            .to_lowercase();
        EnvFilter::try_new(level)
    })?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to set global tracing subscriber: {}", e))
}
// endregion: --- Tracing

// region: --- Server Setup
/// Connect the store and serve until Ctrl-C.
///
/// # Errors
///
/// This function will return an error if:
/// - The store is unreachable or the schema cannot be created
/// - The port cannot be bound
pub async fn start_server(config: Config) -> anyhow::Result<()> {
    info!(" USER SERVICE STARTING");
    info!("Connecting to database...");
    let pool = create_pool(&config).await?;

    ensure_schema(&pool).await?;
    info!(" Schema ready");

    let store: Arc<dyn UserStore> = Arc::new(SqlUserStore::new(pool, config.request_timeout()));
    let bind_address = format!("0.0.0.0:{}", config.port);

    let app = create_router(AppState::new(store, config));

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;

    info!(" SERVER READY: http://{}", bind_address);
    log_server_info();

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!(" Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!(" Shutdown signal received, draining connections");
}

/// Create the main application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.allowed_origins);

    // Mutations on a single user require a bearer token; the read stays public
    let user_by_id = get(users::get_user).merge(
        put(users::update_user)
            .delete(users::delete_user)
            .route_layer(from_fn_with_state(state.clone(), require_auth)),
    );

    info!("[ROUTE SETUP] Registering HTTP routes...");
    Router::new()
        .route("/", get(users::welcome))
        .route("/health", get(|| async { "OK" }))
        .route("/users", get(users::list_users).post(auth::register))
        .route("/users/{id}", user_by_id)
        // Same segment name as `/users/{id}`; the router rejects differing names
        .route("/users/{id}/role", get(users::list_users_by_role))
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .fallback(|| async {
            info!("[404 HANDLER] Unmatched route - returning 404");
            AppError::NotFound("Route not found".to_string())
        })
        .with_state(state)
        // Innermost: sees the request id stamped below
        .layer(from_fn(log_requests))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    let request_id = request
                        .extensions()
                        .get::<RequestStamp>()
                        .map(|s| s.id.clone())
                        .unwrap_or_else(|| "unknown".to_string());
                    tracing::info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = %request.method(),
                        uri = %request.uri(),
                    )
                })
                .on_request(|_request: &Request<_>, _span: &Span| {})
                .on_response(|_response: &Response<_>, _latency: Duration, _span: &Span| {})
                .on_failure(
                    |error: ServerErrorsFailureClass, latency: Duration, _span: &Span| {
                        tracing::error!(
                            error = ?error,
                            latency_ms = latency.as_millis(),
                            "[HTTP FAILURE]"
                        );
                    },
                ),
        )
        .layer(from_fn(stamp_req))
        .layer(cors)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    if allowed_origins.iter().any(|o| o == "*") {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    cors.allow_origin(origins)
}

/// Log server information
fn log_server_info() {
    info!(" USERS:");
    info!("   • GET    /users");
    info!("   • GET    /users/{{id}}");
    info!("   • GET    /users/{{role}}/role");
    info!("   • POST   /users");
    info!("   • PUT    /users/{{id}}   (Bearer token)");
    info!("   • DELETE /users/{{id}}   (Bearer token)");
    info!(" AUTH:");
    info!("   • POST   /register");
    info!("   • POST   /login");
    info!(" HEALTH:");
    info!("   • GET    /health");
}
// endregion: --- Server Setup

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{body_json, error_body, test_app};
    use axum::body::Body;
    use axum::http::StatusCode;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_welcome_and_health() {
        let (app, _) = test_app();

        let response = app
            .clone()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, serde_json::json!("Welcome"));

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let (app, _) = test_app();

        let response = app
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().contains_key("x-request-id"));
        assert_eq!(error_body(response).await.code, "NotFound");
    }

    #[tokio::test]
    async fn test_cors_preflight_allows_delete() {
        let (app, _) = test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/users/1")
                    .header("origin", "http://localhost:3000")
                    .header("access-control-request-method", "DELETE")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "*"
        );
    }
}
