//! Repository traits consumed by the service layer, with their Postgres
//! implementations.
//!
//! The in-memory counterparts live in [`crate::memory`].

pub mod plan;
pub mod user;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use portal_core::result::AppResult;
use portal_entity::plan::SubscriptionPlan;
use portal_entity::user::{CreateUser, User};

pub use plan::PgPlanRepository;
pub use user::PgUserRepository;

/// Persistence operations on user accounts.
#[async_trait]
pub trait UserRepository: Send + Sync + std::fmt::Debug + 'static {
    /// Find a user by email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Insert a new user. Fails with a conflict error when the email is taken.
    async fn create(&self, user: &CreateUser) -> AppResult<User>;

    /// Atomically consume a verification token.
    ///
    /// When a user holds `token` with an expiry strictly after `now`, marks
    /// the email verified, clears the token and expiry, and returns the
    /// updated user. Otherwise returns `None` and changes nothing.
    async fn consume_verification_token(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Option<User>>;
}

/// Read access to billing plans.
#[async_trait]
pub trait PlanRepository: Send + Sync + std::fmt::Debug + 'static {
    /// All active plans ordered ascending by `sort_order`.
    async fn find_active(&self) -> AppResult<Vec<SubscriptionPlan>>;
}
