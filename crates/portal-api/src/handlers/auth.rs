//! Auth handlers: sign-up, sign-in, email verification, me.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use portal_service::NewAccount;

use crate::dto::request::{SignInRequest, SignUpRequest, VerifyEmailRequest};
use crate::dto::response::{
    ApiMessage, ApiResponse, MeResponse, SignInResponse, SignUpResponse, UserResponse,
};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// POST /api/auth/signin
pub async fn signin(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<SignInRequest>,
) -> ApiResult<Json<ApiResponse<SignInResponse>>> {
    let outcome = state.auth_service.sign_in(&req.email, &req.password).await?;

    Ok(Json(ApiResponse::ok(SignInResponse {
        user: UserResponse::from(&outcome.user),
        token: outcome.token.token,
        expires_at: outcome.token.expires_at,
    })))
}

/// POST /api/auth/signup
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<SignUpRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<SignUpResponse>>)> {
    let user = state
        .auth_service
        .sign_up(NewAccount {
            email: req.email,
            password: req.password,
            name: req.name,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(SignUpResponse {
            user: UserResponse::from(&user),
        })),
    ))
}

/// POST /api/auth/verify-email
pub async fn verify_email(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<VerifyEmailRequest>,
) -> ApiResult<Json<ApiMessage>> {
    state.auth_service.verify_email(&req.token).await?;
    Ok(Json(ApiMessage::ok("Email verified successfully")))
}

/// GET /api/auth/me
pub async fn me(auth: AuthUser) -> Json<ApiResponse<MeResponse>> {
    Json(ApiResponse::ok(MeResponse {
        user: auth.principal,
        expires_at: auth.expires_at,
    }))
}
