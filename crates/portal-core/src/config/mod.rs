//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod app;
pub mod auth;
pub mod database;
pub mod dev;
pub mod logging;
pub mod rate_limit;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::auth::{Argon2Config, AuthConfig, MAX_TTL_HOURS};
pub use self::database::DatabaseConfig;
pub use self::dev::DevConfig;
pub use self::logging::LoggingConfig;
pub use self::rate_limit::{RateLimitConfig, RatePreset};

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Authentication settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Request-quota presets.
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    /// Development-only endpoints.
    #[serde(default)]
    pub dev: DevConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `PORTAL_`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("PORTAL")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let loaded: Self = config.try_deserialize()?;

        loaded.validate()?;
        Ok(loaded)
    }

    /// Reject settings the server cannot run with.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.auth.jwt_secret.trim().is_empty() {
            return Err(AppError::configuration(
                "auth.jwt_secret must be set (PORTAL__AUTH__JWT_SECRET)",
            ));
        }
        for (name, hours) in [
            ("jwt_ttl_hours", self.auth.jwt_ttl_hours),
            ("verification_token_ttl_hours", self.auth.verification_token_ttl_hours),
        ] {
            if hours == 0 || hours > MAX_TTL_HOURS {
                return Err(AppError::configuration(format!(
                    "auth.{name} must be between 1 and {MAX_TTL_HOURS}"
                )));
            }
        }
        for (name, preset) in [("auth", &self.rate_limit.auth), ("api", &self.rate_limit.api)] {
            if preset.max_requests == 0 || preset.window_seconds == 0 {
                return Err(AppError::configuration(format!(
                    "rate_limit.{name} needs a non-zero max_requests and window_seconds"
                )));
            }
        }
        Ok(())
    }
}
