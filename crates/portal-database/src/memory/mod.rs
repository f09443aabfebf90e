//! In-process repositories selected by a `memory://` database URL.
//!
//! They honor the same contracts as the Postgres repositories and back the
//! integration tests and local runs without a database.

pub mod plan;
pub mod user;

pub use plan::MemoryPlanRepository;
pub use user::MemoryUserRepository;
