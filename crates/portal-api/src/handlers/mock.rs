//! Development stand-ins for the auth provider discovery and session
//! endpoints a browser client polls. Mounted only when
//! `dev.mock_endpoints` is enabled.

use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

use crate::extractors::MaybeAuthUser;
use crate::state::AppState;

/// GET /api/auth/providers
pub async fn providers(State(state): State<AppState>) -> Json<Value> {
    let base = state.config.dev.base_url.trim_end_matches('/');

    Json(json!({
        "credentials": {
            "id": "credentials",
            "name": "Credentials",
            "type": "credentials",
            "signinUrl": format!("{base}/api/auth/signin"),
            "callbackUrl": format!("{base}/api/auth/callback/credentials"),
        }
    }))
}

/// GET|POST /api/auth/session
///
/// The caller's session when a valid bearer token is presented, else `{}`.
pub async fn session(MaybeAuthUser(auth): MaybeAuthUser) -> Json<Value> {
    match auth {
        Some(auth) => Json(json!({
            "user": auth.principal,
            "expires": auth.expires_at,
        })),
        None => Json(json!({})),
    }
}
