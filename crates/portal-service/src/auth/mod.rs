//! Account credential flows.

pub mod service;

pub use service::{AuthService, NewAccount, SignInOutcome};
