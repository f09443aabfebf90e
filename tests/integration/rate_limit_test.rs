//! Integration tests for per-preset rate limiting.

use axum::http::StatusCode;
use axum::http::header::RETRY_AFTER;
use portal_core::config::{AppConfig, RatePreset};
use serde_json::json;

use crate::helpers::TestApp;

fn tight(max_requests: u32) -> RatePreset {
    RatePreset {
        max_requests,
        window_seconds: 60,
    }
}

/// An app behind a proxy that sets `X-Forwarded-For`.
fn behind_proxy(adjust: impl FnOnce(&mut AppConfig)) -> TestApp {
    TestApp::with_config(|c| {
        c.rate_limit.trust_forwarded_for = true;
        adjust(c);
    })
}

fn from(ip: &str) -> Vec<(&'static str, String)> {
    vec![("X-Forwarded-For", ip.to_string())]
}

#[tokio::test]
async fn test_auth_preset_rejects_before_handler() {
    let app = behind_proxy(|c| c.rate_limit.auth = tight(2));
    let body = json!({ "email": "x@example.com", "password": "password123" }).to_string();

    for _ in 0..2 {
        let response = app
            .send("POST", "/api/auth/signin", body.clone(), &from("198.51.100.1"))
            .await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    }

    // A malformed body would be a 400 if the handler ran.
    let limited = app
        .send("POST", "/api/auth/signin", "{broken".to_string(), &from("198.51.100.1"))
        .await;

    assert_eq!(limited.status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(limited.body["code"], "RATE_LIMITED");
    assert_eq!(limited.body["success"], false);
    let retry_after: u64 = limited.headers[RETRY_AFTER]
        .to_str()
        .unwrap()
        .parse()
        .unwrap();
    assert!(retry_after >= 1);
}

#[tokio::test]
async fn test_auth_routes_share_one_bucket() {
    let app = behind_proxy(|c| c.rate_limit.auth = tight(2));

    let signup = app
        .send(
            "POST",
            "/api/auth/signup",
            json!({ "email": "n@example.com", "password": "password123" }).to_string(),
            &from("198.51.100.2"),
        )
        .await;
    assert_eq!(signup.status, StatusCode::CREATED);

    let verify = app
        .send(
            "POST",
            "/api/auth/verify-email",
            json!({ "token": "nope" }).to_string(),
            &from("198.51.100.2"),
        )
        .await;
    assert_eq!(verify.status, StatusCode::NOT_FOUND);

    let signin = app
        .send(
            "POST",
            "/api/auth/signin",
            json!({ "email": "n@example.com", "password": "password123" }).to_string(),
            &from("198.51.100.2"),
        )
        .await;
    assert_eq!(signin.status, StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn test_clients_are_limited_independently() {
    let app = behind_proxy(|c| c.rate_limit.api = tight(1));

    let first = app
        .send("GET", "/api/billing/plans", String::new(), &from("203.0.113.1"))
        .await;
    let again = app
        .send("GET", "/api/billing/plans", String::new(), &from("203.0.113.1"))
        .await;
    let other = app
        .send("GET", "/api/billing/plans", String::new(), &from("203.0.113.2, 10.0.0.1"))
        .await;

    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(again.status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(other.status, StatusCode::OK);
}

#[tokio::test]
async fn test_presets_are_separate() {
    let app = behind_proxy(|c| c.rate_limit.auth = tight(1));
    let creds = json!({ "email": "x@example.com", "password": "password123" }).to_string();

    app.send("POST", "/api/auth/signin", creds.clone(), &from("192.0.2.9"))
        .await;
    let limited = app
        .send("POST", "/api/auth/signin", creds, &from("192.0.2.9"))
        .await;
    assert_eq!(limited.status, StatusCode::TOO_MANY_REQUESTS);

    let plans = app
        .send("GET", "/api/billing/plans", String::new(), &from("192.0.2.9"))
        .await;
    assert_eq!(plans.status, StatusCode::OK);
}

#[tokio::test]
async fn test_health_is_not_limited() {
    let app = behind_proxy(|c| c.rate_limit.api = tight(1));

    for _ in 0..5 {
        let response = app.request("GET", "/api/health", None, None).await;
        assert_eq!(response.status, StatusCode::OK);
    }
}

#[tokio::test]
async fn test_forwarded_for_ignored_unless_trusted() {
    let app = TestApp::with_config(|c| c.rate_limit.auth = tight(2));
    app.create_test_user("target@example.com", "password123", true);
    let guess = json!({ "email": "target@example.com", "password": "wrong-guess" }).to_string();

    let mut statuses = Vec::new();
    for i in 0..5 {
        let response = app
            .send("POST", "/api/auth/signin", guess.clone(), &from(&format!("10.9.{i}.1")))
            .await;
        statuses.push(response.status);
    }

    assert_eq!(statuses[..2], [StatusCode::UNAUTHORIZED, StatusCode::UNAUTHORIZED]);
    assert!(statuses[2..].iter().all(|s| *s == StatusCode::TOO_MANY_REQUESTS), "{statuses:?}");
}
