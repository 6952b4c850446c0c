//! Business services

pub mod audit;
pub mod auth;
pub mod verification;

pub use audit::AuditService;
pub use auth::{AuthService, SessionIssuer};
pub use verification::{
    SendCodeResult, SmsGateway, SmsOutcome, VerificationService, VerificationServiceConfig,
};
