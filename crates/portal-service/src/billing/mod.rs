//! Billing catalogue.

pub mod service;

pub use service::BillingService;
