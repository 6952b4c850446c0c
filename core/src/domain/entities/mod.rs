//! Domain entities

pub mod audit;
pub mod user;
pub mod verification_code;

pub use audit::{AuditAction, AuditLog, RequestContext};
pub use user::User;
pub use verification_code::{VerificationCode, MAX_CODE_LENGTH};
