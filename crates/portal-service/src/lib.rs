//! # portal-service
//!
//! Business logic service layer for the portal backend. Each service wraps
//! one repository call per operation behind the domain rules the HTTP
//! handlers rely on.
//!
//! Services follow constructor injection — all dependencies are provided
//! at construction time via `Arc` references.

pub mod auth;
pub mod billing;

pub use auth::{AuthService, NewAccount, SignInOutcome};
pub use billing::BillingService;
