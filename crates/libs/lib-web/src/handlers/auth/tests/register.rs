use super::{register_alice, ALICE};
use crate::test_utils::{error_body, form_request, test_app};
use axum::http::StatusCode;
use lib_core::{UserStore, DEFAULT_ROLE};
use tower::ServiceExt;

#[tokio::test]
async fn test_register_success() {
    // Arrange
    let (app, store) = test_app();

    // Act
    let user = register_alice(&app).await;

    // Assert
    assert!(user["id"].as_i64().unwrap() > 0);
    assert_eq!(user["name"], "A");
    assert_eq!(user["address"], "Jl. Merdeka");
    assert_eq!(user["telp"], 555);
    assert_eq!(user["email"], "a@x.com");
    assert_eq!(user["role"], DEFAULT_ROLE);
    assert!(user.get("password").is_none());
    assert!(user.get("token").is_none());

    let stored = store.find_by_email("a@x.com").await.unwrap().unwrap();
    assert!(stored.password.starts_with("$2"));
    assert_ne!(stored.password, "pw");
    assert!(!stored.token.is_empty());
}

#[tokio::test]
async fn test_post_users_registers_too() {
    let (app, store) = test_app();

    let response = app
        .oneshot(form_request("POST", "/users", ALICE, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(store.list_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let (app, store) = test_app();
    register_alice(&app).await;

    let response = app
        .oneshot(form_request("POST", "/register", ALICE, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(error_body(response).await.code, "EmailTaken");
    assert_eq!(store.list_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_register_non_numeric_telp() {
    let (app, store) = test_app();

    let response = app
        .oneshot(form_request(
            "POST",
            "/register",
            "name=A&address=X&telp=abc&email=a%40x.com&password=pw",
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_body(response).await.code, "InvalidInput");
    assert!(store.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_register_empty_password() {
    let (app, _) = test_app();

    let response = app
        .oneshot(form_request(
            "POST",
            "/register",
            "name=A&address=X&telp=555&email=a%40x.com&password=",
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(error_body(response).await.code, "Unauthorized");
}

#[tokio::test]
async fn test_register_invalid_email_and_missing_name() {
    let (app, _) = test_app();

    let bad_email = app
        .clone()
        .oneshot(form_request(
            "POST",
            "/register",
            "name=A&address=X&telp=555&email=not-an-email&password=pw",
            None,
        ))
        .await
        .unwrap();
    assert_eq!(bad_email.status(), StatusCode::BAD_REQUEST);

    let no_name = app
        .oneshot(form_request(
            "POST",
            "/register",
            "address=X&telp=555&email=a%40x.com&password=pw",
            None,
        ))
        .await
        .unwrap();
    assert_eq!(no_name.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_password_over_72_bytes() {
    let (app, _) = test_app();
    let body = format!(
        "name=A&address=X&telp=555&email=a%40x.com&password={}",
        "p".repeat(73)
    );

    let response = app
        .oneshot(form_request("POST", "/register", &body, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_concurrent_registrations_same_email() {
    let (app, store) = test_app();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let app = app.clone();
            tokio::spawn(async move {
                app.oneshot(form_request("POST", "/register", ALICE, None))
                    .await
                    .unwrap()
                    .status()
            })
        })
        .collect();

    let mut statuses = Vec::new();
    for handle in handles {
        statuses.push(handle.await.unwrap());
    }

    assert_eq!(statuses.iter().filter(|s| **s == StatusCode::OK).count(), 1);
    assert!(statuses
        .iter()
        .filter(|s| **s != StatusCode::OK)
        .all(|s| *s == StatusCode::UNAUTHORIZED));
    assert_eq!(store.list_all().await.unwrap().len(), 1);
}
