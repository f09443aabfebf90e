//! Subscription plan entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use uuid::Uuid;

use super::interval::BillingInterval;

/// A billing tier offered to customers.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SubscriptionPlan {
    /// Unique plan identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Marketing description.
    pub description: Option<String>,
    /// Price per interval in the smallest currency unit.
    pub price_cents: i64,
    /// ISO 4217 currency code, lowercase.
    pub currency: String,
    /// Charge interval.
    pub billing_interval: BillingInterval,
    /// Feature bullet points.
    pub features: Json<Vec<String>>,
    /// Whether the plan is offered.
    pub is_active: bool,
    /// Position in listings, ascending.
    pub sort_order: i32,
    /// When the plan was created.
    pub created_at: DateTime<Utc>,
    /// When the plan was last updated.
    pub updated_at: DateTime<Utc>,
}
