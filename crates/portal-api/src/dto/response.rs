//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use portal_auth::jwt::Principal;
use portal_entity::plan::{BillingInterval, SubscriptionPlan};
use portal_entity::user::{User, UserRole};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Success response carrying only a message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiMessage {
    /// Whether the request was successful.
    pub success: bool,
    /// Message.
    pub message: String,
}

impl ApiMessage {
    /// Creates a successful message response.
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Public view of an account. Never carries credentials or tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// User ID.
    pub id: Uuid,
    /// Email.
    pub email: String,
    /// Display name.
    pub name: Option<String>,
    /// Role.
    pub role: UserRole,
    /// Whether the email has been verified.
    pub email_verified: bool,
    /// Created at.
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
            email_verified: user.email_verified,
            created_at: user.created_at,
        }
    }
}

/// Sign-in response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInResponse {
    /// Authenticated user.
    pub user: UserResponse,
    /// Bearer token.
    pub token: String,
    /// Token expiration.
    pub expires_at: DateTime<Utc>,
}

/// Sign-up response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignUpResponse {
    /// The new, unverified account.
    pub user: UserResponse,
}

/// Identity behind the presented token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeResponse {
    /// Verified principal.
    pub user: Principal,
    /// Token expiration.
    pub expires_at: DateTime<Utc>,
}

/// A billing plan as listed to customers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanResponse {
    /// Plan ID.
    pub id: Uuid,
    /// Name.
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Price in the smallest currency unit.
    pub price_cents: i64,
    /// Currency code.
    pub currency: String,
    /// Billing interval.
    pub billing_interval: BillingInterval,
    /// Feature list.
    pub features: Vec<String>,
    /// Listing position.
    pub sort_order: i32,
}

impl From<SubscriptionPlan> for PlanResponse {
    fn from(plan: SubscriptionPlan) -> Self {
        Self {
            id: plan.id,
            name: plan.name,
            description: plan.description,
            price_cents: plan.price_cents,
            currency: plan.currency,
            billing_interval: plan.billing_interval,
            features: plan.features.0,
            sort_order: plan.sort_order,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
    /// Uptime.
    pub uptime_seconds: u64,
}
