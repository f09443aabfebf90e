//! Billing handlers.

use axum::Json;
use axum::extract::State;

use crate::dto::response::{ApiResponse, PlanResponse};
use crate::error::ApiResult;
use crate::state::AppState;

/// GET /api/billing/plans
pub async fn list_plans(
    State(state): State<AppState>,
) -> ApiResult<Json<ApiResponse<Vec<PlanResponse>>>> {
    let plans = state.billing_service.list_plans().await?;
    Ok(Json(ApiResponse::ok(
        plans.into_iter().map(PlanResponse::from).collect(),
    )))
}
