//! # portal-api
//!
//! HTTP API layer for the portal backend built on Axum.
//!
//! Provides the REST endpoints, middleware (rate limiting, CORS, logging),
//! extractors, DTOs, and the mapping from [`AppError`] to the JSON error
//! envelope.
//!
//! [`AppError`]: portal_core::error::AppError

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use state::AppState;
