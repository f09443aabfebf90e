//! Route definitions for the portal HTTP API.
//!
//! All routes are mounted under `/api`. Credential endpoints sit behind the
//! `auth` rate-limit preset, everything else except health behind `api`.

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};

use crate::handlers;
use crate::middleware::rate_limit::{RateLimiter, enforce};
use crate::state::AppState;

/// Build the API routes with per-group rate limiting.
pub fn build_router(state: &AppState) -> Router<AppState> {
    let limits = &state.rate_limits;

    let mut api_routes = Router::new()
        .merge(limited(auth_routes(), &limits.auth))
        .merge(limited(account_routes(), &limits.api))
        .merge(limited(billing_routes(), &limits.api))
        .merge(health_routes());

    if state.config.dev.mock_endpoints {
        tracing::warn!("Mock auth endpoints are enabled");
        api_routes = api_routes.merge(limited(mock_routes(), &limits.api));
    }

    Router::new()
        .nest("/api", api_routes)
        .fallback(handlers::not_found)
}

/// Applies a limiter to every route in `routes`, ahead of extraction.
fn limited(routes: Router<AppState>, limiter: &RateLimiter) -> Router<AppState> {
    routes.route_layer(from_fn_with_state(limiter.clone(), enforce))
}

/// Credential endpoints: sign-up, sign-in, verify-email
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(handlers::auth::signup))
        .route("/auth/signin", post(handlers::auth::signin))
        .route("/auth/verify-email", post(handlers::auth::verify_email))
}

/// Authenticated account endpoints
fn account_routes() -> Router<AppState> {
    Router::new().route("/auth/me", get(handlers::auth::me))
}

/// Billing catalogue
fn billing_routes() -> Router<AppState> {
    Router::new().route("/billing/plans", get(handlers::billing::list_plans))
}

/// Development mocks
fn mock_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/providers", get(handlers::mock::providers))
        .route(
            "/auth/session",
            get(handlers::mock::session).post(handlers::mock::session),
        )
}

/// Health check endpoint (no auth, no rate limit)
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
