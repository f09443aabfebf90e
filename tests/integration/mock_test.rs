//! Integration tests for the development mock endpoints.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

fn with_mocks() -> TestApp {
    TestApp::with_config(|c| {
        c.dev.mock_endpoints = true;
        c.dev.base_url = "http://portal.test/".to_string();
    })
}

#[tokio::test]
async fn test_mocks_absent_by_default() {
    let app = TestApp::new();

    let providers = app.request("GET", "/api/auth/providers", None, None).await;
    assert_eq!(providers.status, StatusCode::NOT_FOUND);
    assert_eq!(providers.body["code"], "NOT_FOUND");

    let session = app.request("GET", "/api/auth/session", None, None).await;
    assert_eq!(session.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_providers_lists_credentials() {
    let app = with_mocks();

    let response = app.request("GET", "/api/auth/providers", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        json!({
            "credentials": {
                "id": "credentials",
                "name": "Credentials",
                "type": "credentials",
                "signinUrl": "http://portal.test/api/auth/signin",
                "callbackUrl": "http://portal.test/api/auth/callback/credentials",
            }
        })
    );
}

#[tokio::test]
async fn test_session_without_token_is_empty() {
    let app = with_mocks();

    for method in ["GET", "POST"] {
        let response = app.request(method, "/api/auth/session", None, None).await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, json!({}));
    }

    let invalid = app
        .request("GET", "/api/auth/session", None, Some("not-a-token"))
        .await;
    assert_eq!(invalid.body, json!({}));
}

#[tokio::test]
async fn test_session_with_token_describes_user() {
    let app = with_mocks();
    let user = app.create_test_user("s@example.com", "password123", true);
    let token = app.signin("s@example.com", "password123").await;

    let response = app
        .request("POST", "/api/auth/session", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["user"]["id"], user.id.to_string());
    assert_eq!(response.body["user"]["email"], "s@example.com");
    assert_eq!(response.body["user"]["role"], "user");
    assert_eq!(response.body["user"]["verified"], true);
    assert!(response.body["expires"].is_string());
}
