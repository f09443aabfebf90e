//! In-memory subscription plan repository.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use portal_core::result::AppResult;
use portal_entity::plan::SubscriptionPlan;

use crate::repositories::PlanRepository;

/// Plan catalogue held in process.
#[derive(Debug, Clone, Default)]
pub struct MemoryPlanRepository {
    plans: Arc<DashMap<Uuid, SubscriptionPlan>>,
}

impl MemoryPlanRepository {
    /// Create an empty catalogue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a plan.
    pub fn insert(&self, plan: SubscriptionPlan) {
        self.plans.insert(plan.id, plan);
    }
}

#[async_trait]
impl PlanRepository for MemoryPlanRepository {
    async fn find_active(&self) -> AppResult<Vec<SubscriptionPlan>> {
        let mut active: Vec<SubscriptionPlan> = self
            .plans
            .iter()
            .filter(|p| p.is_active)
            .map(|p| p.value().clone())
            .collect();
        active.sort_by(|a, b| {
            a.sort_order
                .cmp(&b.sort_order)
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(active)
    }
}
