//! Development-only settings.

use serde::{Deserialize, Serialize};

/// Settings for the mock endpoints used while developing the frontend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DevConfig {
    /// Mount `/api/auth/providers` and `/api/auth/session`.
    #[serde(default)]
    pub mock_endpoints: bool,
    /// Public base URL of the frontend, used to build provider URLs.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for DevConfig {
    fn default() -> Self {
        Self {
            mock_endpoints: false,
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}
