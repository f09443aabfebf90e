//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Longest accepted token lifetime, in hours (ten years).
pub const MAX_TTL_HOURS: u64 = 24 * 365 * 10;

/// Authentication and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Shared secret for JWT signing (HMAC-SHA256).
    #[serde(default)]
    pub jwt_secret: String,
    /// Issued token lifetime in hours.
    #[serde(default = "default_jwt_ttl")]
    pub jwt_ttl_hours: u64,
    /// Minimum password length accepted at sign-up.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Lifetime of an email verification token in hours.
    #[serde(default = "default_verification_ttl")]
    pub verification_token_ttl_hours: u64,
    /// Argon2 cost parameters.
    #[serde(default)]
    pub argon2: Argon2Config,
}

/// Argon2id cost parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Argon2Config {
    /// Memory cost in KiB.
    #[serde(default = "default_memory_kib")]
    pub memory_kib: u32,
    /// Number of iterations.
    #[serde(default = "default_iterations")]
    pub iterations: u32,
    /// Degree of parallelism.
    #[serde(default = "default_parallelism")]
    pub parallelism: u32,
}

impl AuthConfig {
    /// Issued token lifetime, capped at [`MAX_TTL_HOURS`].
    pub fn jwt_ttl_hours_capped(&self) -> i64 {
        self.jwt_ttl_hours.min(MAX_TTL_HOURS) as i64
    }

    /// Verification token lifetime, capped at [`MAX_TTL_HOURS`].
    pub fn verification_ttl_hours_capped(&self) -> i64 {
        self.verification_token_ttl_hours.min(MAX_TTL_HOURS) as i64
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            jwt_ttl_hours: default_jwt_ttl(),
            password_min_length: default_password_min(),
            verification_token_ttl_hours: default_verification_ttl(),
            argon2: Argon2Config::default(),
        }
    }
}

impl Default for Argon2Config {
    fn default() -> Self {
        Self {
            memory_kib: default_memory_kib(),
            iterations: default_iterations(),
            parallelism: default_parallelism(),
        }
    }
}

fn default_jwt_ttl() -> u64 {
    24 * 7
}

fn default_password_min() -> usize {
    8
}

fn default_verification_ttl() -> u64 {
    24
}

fn default_memory_kib() -> u32 {
    19 * 1024
}

fn default_iterations() -> u32 {
    2
}

fn default_parallelism() -> u32 {
    1
}
