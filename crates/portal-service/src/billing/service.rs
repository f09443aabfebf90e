//! Billing plan catalogue.

use std::sync::Arc;

use tracing::debug;

use portal_core::result::AppResult;
use portal_database::repositories::PlanRepository;
use portal_entity::plan::SubscriptionPlan;

/// Read-only access to the offered plans.
#[derive(Debug, Clone)]
pub struct BillingService {
    plans: Arc<dyn PlanRepository>,
}

impl BillingService {
    /// Creates a new billing service.
    pub fn new(plans: Arc<dyn PlanRepository>) -> Self {
        Self { plans }
    }

    /// Active plans in ascending sort order.
    pub async fn list_plans(&self) -> AppResult<Vec<SubscriptionPlan>> {
        let plans = self.plans.find_active().await?;
        debug!(count = plans.len(), "Listed active plans");
        Ok(plans)
    }
}
