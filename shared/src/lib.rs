//! Shared utilities and common types for the phone-auth service
//!
//! This crate provides functionality used across the server modules:
//! - Configuration types (verification codes, SMS drivers, feature flags)
//! - Phone number utilities (validation, normalization, masking)

pub mod config;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AliyunConfig, CodeConfig, DxSmsConfig, FeatureConfig, PhoneAuthConfig, SessionConfig,
    SmsConfig, SmsDriver,
};
pub use utils::phone;
