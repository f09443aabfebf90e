//! Integration tests for sign-up, sign-in, and bearer authentication.

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use serde_json::json;

use portal_auth::jwt::{Claims, JwtEncoder};
use portal_core::config::AuthConfig;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_signup_creates_unverified_account() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/signup",
            Some(json!({
                "email": "Ada@Example.com",
                "password": "analytical-engine",
                "name": "Ada",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    assert_eq!(response.body["success"], true);

    let user = &response.body["data"]["user"];
    assert_eq!(user["email"], "ada@example.com");
    assert_eq!(user["name"], "Ada");
    assert_eq!(user["role"], "user");
    assert_eq!(user["email_verified"], false);
    assert!(user.get("password_hash").is_none());
    assert!(user.get("verification_token").is_none());

    let id = user["id"].as_str().unwrap().parse().unwrap();
    let stored = app.users.get(id).expect("user stored");
    assert_eq!(stored.verification_token.as_ref().map(String::len), Some(43));
    assert!(stored.verification_token_expires.unwrap() > Utc::now());
}

#[tokio::test]
async fn test_signup_duplicate_email_conflicts() {
    let app = TestApp::new();
    app.create_test_user("taken@example.com", "password123", true);

    let response = app
        .request(
            "POST",
            "/api/auth/signup",
            Some(json!({ "email": "TAKEN@example.com", "password": "password123" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["code"], "CONFLICT");
    assert_eq!(app.users.len(), 1);
}

#[tokio::test]
async fn test_signup_rejects_short_password() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/signup",
            Some(json!({ "email": "short@example.com", "password": "abc" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["code"], "VALIDATION_ERROR");
    assert!(response.body["details"]["password"].is_array());
    assert!(app.users.is_empty());
}

#[tokio::test]
async fn test_signin_success() {
    let app = TestApp::new();
    let user = app.create_test_user("grace@example.com", "password123", true);

    let response = app
        .request(
            "POST",
            "/api/auth/signin",
            Some(json!({ "email": "grace@example.com", "password": "password123" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    let data = &response.body["data"];
    assert!(data["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert!(data["expires_at"].is_string());
    assert_eq!(data["user"]["id"], user.id.to_string());
    assert!(data["user"].get("password_hash").is_none());
    assert!(data["user"].get("password").is_none());
}

#[tokio::test]
async fn test_signin_failures_are_identical() {
    let app = TestApp::new();
    app.create_test_user("grace@example.com", "password123", true);

    let wrong_password = app
        .request(
            "POST",
            "/api/auth/signin",
            Some(json!({ "email": "grace@example.com", "password": "wrongpassword" })),
            None,
        )
        .await;
    let unknown_email = app
        .request(
            "POST",
            "/api/auth/signin",
            Some(json!({ "email": "nobody@example.com", "password": "password123" })),
            None,
        )
        .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.body, unknown_email.body);
    assert_eq!(wrong_password.error_message(), "Invalid email or password");
}

#[tokio::test]
async fn test_signin_validates_input() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/signin",
            Some(json!({ "email": "not-an-email", "password": "" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["details"]["email"][0], "Invalid email address");
    assert_eq!(response.body["details"]["password"][0], "Password is required");

    let malformed = app
        .send("POST", "/api/auth/signin", "{not json".to_string(), &[])
        .await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);
    assert_eq!(malformed.body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_oversized_body_is_payload_too_large() {
    let app = TestApp::with_config(|c| c.server.max_body_bytes = 128);
    let body = json!({
        "email": "big@example.com",
        "password": "password123",
        "name": "x".repeat(512),
    });

    let response = app.request("POST", "/api/auth/signup", Some(body), None).await;

    assert_eq!(response.status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(response.body["code"], "PAYLOAD_TOO_LARGE");
    assert_eq!(response.error_message(), "Request body too large");
    assert!(app.users.is_empty());
}

#[tokio::test]
async fn test_me_returns_principal() {
    let app = TestApp::new();
    let user = app.create_test_user("me@example.com", "password123", false);
    let token = app.signin("me@example.com", "password123").await;

    let response = app.request("GET", "/api/auth/me", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    let principal = &response.body["data"]["user"];
    assert_eq!(principal["id"], user.id.to_string());
    assert_eq!(principal["email"], "me@example.com");
    assert_eq!(principal["role"], "user");
    assert_eq!(principal["verified"], false);
}

#[tokio::test]
async fn test_me_distinguishes_bearer_failures() {
    let app = TestApp::new();
    let user = app.create_test_user("me@example.com", "password123", true);

    let missing = app.request("GET", "/api/auth/me", None, None).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
    assert_eq!(missing.error_message(), "Missing Authorization header");

    let basic = app
        .send(
            "GET",
            "/api/auth/me",
            String::new(),
            &[("Authorization", "Basic dXNlcjpwYXNz".to_string())],
        )
        .await;
    assert_eq!(basic.status, StatusCode::UNAUTHORIZED);
    assert_eq!(basic.error_message(), "Invalid Authorization header format");

    let garbage = app.request("GET", "/api/auth/me", None, Some("garbage")).await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
    assert_eq!(garbage.error_message(), "Invalid token");

    let foreign = JwtEncoder::new(&AuthConfig {
        jwt_secret: "some-other-secret".to_string(),
        ..AuthConfig::default()
    })
    .issue(&user)
    .unwrap();
    let forged = app
        .request("GET", "/api/auth/me", None, Some(&foreign.token))
        .await;
    assert_eq!(forged.status, StatusCode::UNAUTHORIZED);
    assert_eq!(forged.error_message(), "Invalid token signature");

    let stale_claims = Claims::for_user(&user, Utc::now() - Duration::hours(3), Duration::hours(1));
    let stale = JwtEncoder::new(&app.config.auth)
        .encode_claims(&stale_claims)
        .unwrap();
    let expired = app.request("GET", "/api/auth/me", None, Some(&stale)).await;
    assert_eq!(expired.status, StatusCode::UNAUTHORIZED);
    assert_eq!(expired.error_message(), "Token has expired");
}
