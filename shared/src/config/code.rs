//! Verification code configuration

use serde::{Deserialize, Serialize};

use super::env_parse;

/// Longest configurable code length; 10^19 overflows a u64 at generation
pub const MAX_CODE_LENGTH: usize = 18;

/// Verification code lifecycle settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CodeConfig {
    /// Number of digits in a verification code
    #[serde(default = "default_length")]
    pub length: usize,

    /// Minutes until an issued code expires
    #[serde(default = "default_expire_minutes")]
    pub expire_minutes: i64,

    /// Maximum failed verification attempts before the code is invalidated
    #[serde(default = "default_max_attempts")]
    pub max_attempts: i32,

    /// Minimum seconds between two code requests for the same phone
    #[serde(default = "default_resend_cooldown")]
    pub resend_cooldown_seconds: i64,
}

fn default_length() -> usize {
    6
}

fn default_expire_minutes() -> i64 {
    5
}

fn default_max_attempts() -> i32 {
    5
}

fn default_resend_cooldown() -> i64 {
    60
}

impl Default for CodeConfig {
    fn default() -> Self {
        Self {
            length: default_length(),
            expire_minutes: default_expire_minutes(),
            max_attempts: default_max_attempts(),
            resend_cooldown_seconds: default_resend_cooldown(),
        }
    }
}

impl CodeConfig {
    /// Load code settings from environment variables.
    ///
    /// The configured length is clamped to [1, `MAX_CODE_LENGTH`] so a
    /// bad environment value cannot push code generation past what a
    /// u64 holds.
    pub fn from_env() -> Self {
        Self {
            length: env_parse("PHONE_AUTH_CODE_LENGTH", default_length())
                .clamp(1, MAX_CODE_LENGTH),
            expire_minutes: env_parse("PHONE_AUTH_CODE_EXPIRE_MINUTES", default_expire_minutes()),
            max_attempts: env_parse("PHONE_AUTH_CODE_ATTEMPTS", default_max_attempts()),
            resend_cooldown_seconds: env_parse(
                "PHONE_AUTH_RESEND_COOLDOWN",
                default_resend_cooldown(),
            ),
        }
    }
}
