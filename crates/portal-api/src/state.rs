//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Instant;

use portal_auth::jwt::{JwtDecoder, JwtEncoder};
use portal_auth::password::PasswordHasher;
use portal_core::config::AppConfig;
use portal_core::result::AppResult;
use portal_database::repositories::{PlanRepository, UserRepository};
use portal_service::{AuthService, BillingService};

use crate::middleware::rate_limit::RateLimits;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped or otherwise cheap to clone.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// JWT token decoder and validator
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Sign-up, sign-in, and verification flows
    pub auth_service: Arc<AuthService>,
    /// Plan catalogue
    pub billing_service: Arc<BillingService>,
    /// Per-preset request limiters
    pub rate_limits: RateLimits,
    /// Process start, for uptime reporting
    pub started_at: Instant,
}

impl AppState {
    /// Wires services over the given repositories.
    ///
    /// Fails when the configuration does not validate or the Argon2 cost
    /// parameters are invalid.
    pub fn new(
        config: AppConfig,
        users: Arc<dyn UserRepository>,
        plans: Arc<dyn PlanRepository>,
    ) -> AppResult<Self> {
        config.validate()?;
        let password_hasher = Arc::new(PasswordHasher::new(&config.auth.argon2)?);
        let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));

        let auth_service = Arc::new(AuthService::new(
            users,
            password_hasher,
            jwt_encoder,
            &config.auth,
        ));
        let billing_service = Arc::new(BillingService::new(plans));
        let rate_limits = RateLimits::from_config(&config.rate_limit);

        Ok(Self {
            config: Arc::new(config),
            jwt_decoder,
            auth_service,
            billing_service,
            rate_limits,
            started_at: Instant::now(),
        })
    }
}
