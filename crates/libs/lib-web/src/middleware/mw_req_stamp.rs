//! # Request Stamping Middleware
//!
//! Outermost of the request middlewares. Every request gets a [`RequestStamp`]
//! in its extensions before routing; the id is echoed back as `X-Request-ID`
//! and the arrival instant is what [`log_requests`](super::log_requests)
//! measures latency from.

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use std::time::{Duration, Instant};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Per-request id and arrival time.
#[derive(Clone, Debug)]
pub struct RequestStamp {
    pub id: String,
    pub received_at: Instant,
}

impl RequestStamp {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            received_at: Instant::now(),
        }
    }

    /// Time spent since the request reached the service.
    pub fn elapsed(&self) -> Duration {
        self.received_at.elapsed()
    }
}

impl Default for RequestStamp {
    fn default() -> Self {
        Self::new()
    }
}

pub async fn stamp_req(mut req: Request, next: Next) -> Response {
    let stamp = RequestStamp::new();
    let id = stamp.id.clone();

    req.extensions_mut().insert(stamp);

    let mut res = next.run(req).await;

    if let Ok(value) = HeaderValue::from_str(&id) {
        res.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, extract::Extension, middleware::from_fn, routing::get, Router};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_stamp_is_visible_to_handler_and_echoed() {
        let app = Router::new()
            .route(
                "/",
                get(|Extension(stamp): Extension<RequestStamp>| async move {
                    assert!(stamp.elapsed() < Duration::from_secs(5));
                    stamp.id
                }),
            )
            .layer(from_fn(stamp_req));

        let response = app
            .oneshot(axum::http::Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let header = response.headers()[REQUEST_ID_HEADER].to_str().unwrap().to_string();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        assert_eq!(header.as_bytes(), &body[..]);
        assert!(Uuid::parse_str(&header).is_ok());
    }
}
