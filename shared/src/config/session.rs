//! Session credential configuration

use serde::{Deserialize, Serialize};

use super::env_parse;

/// Session credential settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Minutes until an issued session credential expires (default: 7 days)
    #[serde(default = "default_expire_minutes")]
    pub expire_minutes: i64,
}

fn default_expire_minutes() -> i64 {
    7 * 24 * 60
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            expire_minutes: default_expire_minutes(),
        }
    }
}

impl SessionConfig {
    /// Load session settings from environment variables
    pub fn from_env() -> Self {
        Self {
            expire_minutes: env_parse("PHONE_AUTH_SESSION_EXPIRE_MINUTES", default_expire_minutes()),
        }
    }
}
