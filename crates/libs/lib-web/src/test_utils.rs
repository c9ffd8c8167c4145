//! Shared fixtures for handler and router tests.

use crate::server::{create_router, AppState};
use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use lib_core::dto::ErrorResponse;
use lib_core::{create_pool, ensure_schema, Config, MemoryUserStore, SqlUserStore, UserStore};
use std::sync::Arc;

pub const TEST_SECRET: &str = "test-secret-key-must-be-at-least-32-characters-long!";

/// Config with the cheapest bcrypt cost so tests stay fast
pub fn test_config() -> Config {
    Config {
        database_url: Some("sqlite::memory:".to_string()),
        database_host: String::new(),
        database_user: String::new(),
        database_password: String::new(),
        database_name: String::new(),
        port: 0,
        jwt_secret: TEST_SECRET.to_string(),
        jwt_expiration_hours: 72,
        bcrypt_cost: 4,
        request_timeout_secs: 5,
        allowed_origins: vec!["*".to_string()],
    }
}

/// Full router over an empty in-memory store. The store handle is returned
/// so tests can inspect what the handlers persisted.
pub fn test_app() -> (Router, Arc<MemoryUserStore>) {
    let store = Arc::new(MemoryUserStore::new());
    let state = AppState::new(store.clone() as Arc<dyn UserStore>, test_config());
    (create_router(state), store)
}

/// Full router over `SqlUserStore` on a fresh in-memory SQLite database.
pub async fn test_sql_app() -> (Router, SqlUserStore) {
    let config = test_config();
    let pool = create_pool(&config).await.unwrap();
    ensure_schema(&pool).await.unwrap();

    let store = SqlUserStore::new(pool, config.request_timeout());
    let state = AppState::new(Arc::new(store.clone()), config);
    (create_router(state), store)
}

/// Form-encoded request, optionally carrying a bearer token.
pub fn form_request(method: &str, uri: &str, body: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// Decode the JSON error body every failing request carries.
pub async fn error_body(response: Response<Body>) -> ErrorResponse {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
