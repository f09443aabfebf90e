//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use chrono::{DateTime, Duration, Utc};
use serde_json::Value;
use sqlx::types::Json;
use tower::ServiceExt;
use uuid::Uuid;

use portal_api::{AppState, build_app};
use portal_auth::password::PasswordHasher;
use portal_core::config::{AppConfig, Argon2Config, RatePreset};
use portal_database::{MemoryPlanRepository, MemoryUserRepository};
use portal_entity::plan::{BillingInterval, SubscriptionPlan};
use portal_entity::user::{User, UserRole};

/// Shared secret for tokens issued in tests.
pub const TEST_SECRET: &str = "integration-test-secret";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// User store behind the router
    pub users: MemoryUserRepository,
    /// Plan store behind the router
    pub plans: MemoryPlanRepository,
    /// Application config
    pub config: AppConfig,
}

/// Baseline config: cheap Argon2 and quotas no ordinary test reaches.
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.auth.jwt_secret = TEST_SECRET.to_string();
    config.auth.argon2 = Argon2Config {
        memory_kib: 1024,
        iterations: 1,
        parallelism: 1,
    };
    let generous = RatePreset {
        max_requests: 1000,
        window_seconds: 60,
    };
    config.rate_limit.auth = generous;
    config.rate_limit.api = generous;
    config
}

impl TestApp {
    /// Create a new test application
    pub fn new() -> Self {
        Self::with_config(|_| {})
    }

    /// Create a test application after adjusting the baseline config
    pub fn with_config(adjust: impl FnOnce(&mut AppConfig)) -> Self {
        let mut config = test_config();
        adjust(&mut config);

        let users = MemoryUserRepository::new();
        let plans = MemoryPlanRepository::new();

        let state = AppState::new(
            config.clone(),
            Arc::new(users.clone()),
            Arc::new(plans.clone()),
        )
        .expect("Failed to build app state");

        Self {
            router: build_app(state),
            users,
            plans,
            config,
        }
    }

    /// Store a user directly, bypassing sign-up
    pub fn create_test_user(&self, email: &str, password: &str, verified: bool) -> User {
        let hasher =
            PasswordHasher::new(&self.config.auth.argon2).expect("Failed to build hasher");
        let now = Utc::now();

        self.users
            .insert(User {
                id: Uuid::new_v4(),
                email: email.to_string(),
                name: None,
                password_hash: hasher.hash_password(password).expect("Failed to hash password"),
                role: UserRole::User,
                email_verified: verified,
                verification_token: None,
                verification_token_expires: None,
                created_at: now,
                updated_at: now,
            })
            .expect("Failed to create test user")
    }

    /// Store an unverified user holding `token` until `expires`
    pub fn create_pending_user(&self, email: &str, token: &str, expires: DateTime<Utc>) -> User {
        let now = Utc::now();
        self.users
            .insert(User {
                id: Uuid::new_v4(),
                email: email.to_string(),
                name: None,
                password_hash: "$argon2id$unused".to_string(),
                role: UserRole::User,
                email_verified: false,
                verification_token: Some(token.to_string()),
                verification_token_expires: Some(expires),
                created_at: now - Duration::days(2),
                updated_at: now - Duration::days(2),
            })
            .expect("Failed to create pending user")
    }

    /// Add a plan to the catalogue
    pub fn create_plan(&self, name: &str, sort_order: i32, is_active: bool) -> SubscriptionPlan {
        let now = Utc::now();
        let plan = SubscriptionPlan {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: Some(format!("{name} tier")),
            price_cents: i64::from(sort_order) * 1000,
            currency: "usd".to_string(),
            billing_interval: BillingInterval::Month,
            features: Json(vec![format!("{name} support")]),
            is_active,
            sort_order,
            created_at: now,
            updated_at: now,
        };
        self.plans.insert(plan.clone());
        plan
    }

    /// Sign in and return the bearer token
    pub async fn signin(&self, email: &str, password: &str) -> String {
        let body = serde_json::json!({
            "email": email,
            "password": password,
        });

        let response = self
            .request("POST", "/api/auth/signin", Some(body), None)
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Sign-in failed: {:?}",
            response.body
        );

        response.body["data"]["token"]
            .as_str()
            .expect("No token in sign-in response")
            .to_string()
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut headers = Vec::new();
        if let Some(token) = token {
            headers.push(("Authorization", format!("Bearer {token}")));
        }
        let body = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();
        self.send(method, path, body, &headers).await
    }

    /// Make an HTTP request with a raw body and arbitrary headers
    pub async fn send(
        &self,
        method: &str,
        path: &str,
        body: String,
        headers: &[(&str, String)],
    ) -> TestResponse {
        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        for (name, value) in headers {
            req = req.header(*name, value.as_str());
        }

        let req = req.body(Body::from(body)).expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// Assert the error envelope shape and return its message
    pub fn error_message(&self) -> &str {
        assert_eq!(self.body["success"], false, "{:?}", self.body);
        assert!(self.body["code"].is_string(), "{:?}", self.body);
        self.body["error"].as_str().expect("error message")
    }
}
