mod login;
mod register;

use crate::test_utils::{body_json, form_request};
use axum::http::StatusCode;
use axum::Router;
use tower::ServiceExt;

const ALICE: &str = "name=A&address=Jl.+Merdeka&telp=555&email=a%40x.com&password=pw";

/// Register through the router and return the created user's JSON.
async fn register_alice(app: &Router) -> serde_json::Value {
    let response = app
        .clone()
        .oneshot(form_request("POST", "/register", ALICE, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}
