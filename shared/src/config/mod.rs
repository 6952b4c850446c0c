//! Configuration for the phone-auth service
//!
//! Configuration is organized into logical areas:
//! - `code` - Verification code lifecycle settings
//! - `features` - Feature flags (auto-registration, binding, logout)
//! - `session` - Session credential settings
//! - `sms` - SMS driver selection and per-provider credentials
//!
//! All values can be loaded from the environment (with `.env` support via
//! `dotenvy`) or constructed directly for tests.

pub mod code;
pub mod features;
pub mod session;
pub mod sms;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use code::CodeConfig;
pub use features::FeatureConfig;
pub use session::SessionConfig;
pub use sms::{AliyunConfig, DxSmsConfig, SmsConfig, SmsDriver};

/// Complete phone-auth configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PhoneAuthConfig {
    /// Product name used in SMS message templates
    #[serde(default = "default_product")]
    pub product: String,

    /// Verification code configuration
    #[serde(default)]
    pub code: CodeConfig,

    /// SMS driver configuration
    #[serde(default)]
    pub sms: SmsConfig,

    /// Session configuration
    #[serde(default)]
    pub session: SessionConfig,

    /// Feature flags
    #[serde(default)]
    pub features: FeatureConfig,
}

fn default_product() -> String {
    String::from("PhoneAuth")
}

impl Default for PhoneAuthConfig {
    fn default() -> Self {
        Self {
            product: default_product(),
            code: CodeConfig::default(),
            sms: SmsConfig::default(),
            session: SessionConfig::default(),
            features: FeatureConfig::default(),
        }
    }
}

impl PhoneAuthConfig {
    /// Load the full configuration from environment variables
    ///
    /// Reads a `.env` file first when present. Missing variables fall back
    /// to the defaults.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            product: std::env::var("APP_PRODUCT_NAME").unwrap_or_else(|_| default_product()),
            code: CodeConfig::from_env(),
            sms: SmsConfig::from_env(),
            session: SessionConfig::from_env(),
            features: FeatureConfig::from_env(),
        }
    }
}

/// Parse an environment variable, falling back to a default on absence or parse failure
pub(crate) fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
