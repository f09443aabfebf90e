//! Rate limiting configuration.

use serde::{Deserialize, Serialize};

/// Named request-quota presets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Preset applied to credential endpoints (sign-in, sign-up, verify-email).
    #[serde(default = "default_auth_preset")]
    pub auth: RatePreset,
    /// Preset applied to every other API route.
    #[serde(default = "default_api_preset")]
    pub api: RatePreset,
    /// How often idle client buckets are swept, in seconds.
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_seconds: u64,
    /// Key clients on the first `X-Forwarded-For` entry instead of the
    /// peer address. Enable only behind a proxy that overwrites the header.
    #[serde(default)]
    pub trust_forwarded_for: bool,
}

/// A single quota: at most `max_requests` per `window_seconds`, refilled smoothly.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RatePreset {
    /// Bucket capacity (burst size).
    pub max_requests: u32,
    /// Time for an empty bucket to refill completely.
    pub window_seconds: u64,
}

impl RatePreset {
    /// Tokens restored per second.
    pub fn refill_per_second(&self) -> f64 {
        self.max_requests as f64 / self.window_seconds.max(1) as f64
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            auth: default_auth_preset(),
            api: default_api_preset(),
            sweep_interval_seconds: default_sweep_interval(),
            trust_forwarded_for: false,
        }
    }
}

fn default_auth_preset() -> RatePreset {
    RatePreset {
        max_requests: 5,
        window_seconds: 60,
    }
}

fn default_api_preset() -> RatePreset {
    RatePreset {
        max_requests: 100,
        window_seconds: 60,
    }
}

fn default_sweep_interval() -> u64 {
    300
}
