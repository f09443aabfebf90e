//! # portal-database
//!
//! PostgreSQL connection management, the repository traits the service
//! layer depends on, and their Postgres and in-memory implementations.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use memory::{MemoryPlanRepository, MemoryUserRepository};
pub use repositories::{PgPlanRepository, PgUserRepository, PlanRepository, UserRepository};
