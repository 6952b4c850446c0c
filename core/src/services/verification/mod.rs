//! Verification code lifecycle for SMS-based authentication
//!
//! This module owns the credential state machine:
//! - code issuance with per-phone resend cooldown
//! - bounded verification attempts and expiry
//! - exactly-once consumption under concurrent requests
//! - delivery through a pluggable SMS gateway

mod config;
mod phone_lock;
mod service;
mod traits;
mod types;

#[cfg(test)]
pub(crate) mod tests;

pub use config::VerificationServiceConfig;
pub use phone_lock::PhoneLockMap;
pub use service::VerificationService;
pub use traits::{SmsGateway, SmsOutcome};
pub use types::SendCodeResult;
