//! Route handlers organized by domain.

pub mod auth;
pub mod billing;
pub mod health;
pub mod mock;

use crate::error::ApiError;
use portal_core::error::AppError;

/// Fallback for unmatched routes.
pub async fn not_found() -> ApiError {
    ApiError(AppError::not_found("Route not found"))
}
