//! Feature flags

use serde::{Deserialize, Serialize};

use super::env_parse;

/// Feature toggles consulted by the auth orchestration layer
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeatureConfig {
    /// Automatically provision an account when a verified phone has none
    #[serde(default = "default_true")]
    pub register: bool,

    /// Allow binding a verified phone to an existing account
    #[serde(default = "default_true")]
    pub bind: bool,

    /// Allow session revocation through logout
    #[serde(default = "default_true")]
    pub logout: bool,
}

fn default_true() -> bool {
    true
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            register: true,
            bind: true,
            logout: true,
        }
    }
}

impl FeatureConfig {
    /// Load feature flags from environment variables
    pub fn from_env() -> Self {
        Self {
            register: env_parse("PHONE_AUTH_FEATURE_REGISTER", true),
            bind: env_parse("PHONE_AUTH_FEATURE_BIND", true),
            logout: env_parse("PHONE_AUTH_FEATURE_LOGOUT", true),
        }
    }
}
