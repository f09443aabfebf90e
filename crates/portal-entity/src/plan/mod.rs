//! Billing plan entities.

pub mod interval;
pub mod model;

pub use interval::BillingInterval;
pub use model::SubscriptionPlan;
