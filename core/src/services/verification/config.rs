//! Configuration for the verification service

use pa_shared::config::CodeConfig;

/// Configuration for the verification code lifecycle
#[derive(Debug, Clone)]
pub struct VerificationServiceConfig {
    /// Number of digits in a generated code
    pub code_length: usize,
    /// Minutes before a verification code expires
    pub code_expiration_minutes: i64,
    /// Maximum failed verification attempts allowed
    pub max_attempts: i32,
    /// Minimum seconds between code requests for the same phone
    pub resend_cooldown_seconds: i64,
}

impl Default for VerificationServiceConfig {
    fn default() -> Self {
        Self::from(&CodeConfig::default())
    }
}

impl From<&CodeConfig> for VerificationServiceConfig {
    fn from(config: &CodeConfig) -> Self {
        Self {
            code_length: config.length,
            code_expiration_minutes: config.expire_minutes,
            max_attempts: config.max_attempts,
            resend_cooldown_seconds: config.resend_cooldown_seconds,
        }
    }
}
