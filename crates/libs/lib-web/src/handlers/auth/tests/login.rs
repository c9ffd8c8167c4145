use super::register_alice;
use crate::test_utils::{body_json, form_request, test_app, TEST_SECRET};
use axum::http::StatusCode;
use lib_auth::decode_jwt;
use tower::ServiceExt;

#[tokio::test]
async fn test_login_success() {
    // Arrange
    let (app, _) = test_app();
    let user = register_alice(&app).await;

    // Act
    let response = app
        .oneshot(form_request(
            "POST",
            "/login",
            "email=a%40x.com&password=pw",
            None,
        ))
        .await
        .unwrap();

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let token = body["token"].as_str().unwrap();

    let claims = decode_jwt(token, TEST_SECRET).unwrap();
    assert_eq!(claims.user_id(), user["id"].as_i64());
    assert_eq!(claims.name, "A");
    assert!(claims.authorized);
    assert!(claims.exp > chrono::Utc::now().timestamp());
}

#[tokio::test]
async fn test_login_wrong_password() {
    let (app, _) = test_app();
    register_alice(&app).await;

    let response = app
        .oneshot(form_request(
            "POST",
            "/login",
            "email=a%40x.com&password=nope",
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["code"], "Unauthorized");
    assert!(body.get("token").is_none());
}

#[tokio::test]
async fn test_login_unknown_email_matches_wrong_password() {
    let (app, _) = test_app();
    register_alice(&app).await;

    let unknown = app
        .clone()
        .oneshot(form_request(
            "POST",
            "/login",
            "email=ghost%40x.com&password=pw",
            None,
        ))
        .await
        .unwrap();
    let wrong = app
        .oneshot(form_request(
            "POST",
            "/login",
            "email=a%40x.com&password=nope",
            None,
        ))
        .await
        .unwrap();

    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(unknown).await, body_json(wrong).await);
}

#[tokio::test]
async fn test_login_missing_fields() {
    let (app, _) = test_app();

    let response = app
        .oneshot(form_request("POST", "/login", "email=a%40x.com", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
