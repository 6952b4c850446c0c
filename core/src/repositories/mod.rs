//! Repository traits and in-memory implementations
//!
//! Traits define the persistence contract; concrete database-backed
//! implementations live in the infrastructure crate. The in-memory
//! implementations here back unit tests and single-process deployments.

pub mod audit;
pub mod user;
pub mod verification;

pub use audit::{AuditLogRepository, MemoryAuditLogRepository, NoOpAuditLogRepository};
pub use user::{MemoryUserRepository, UserRepository};
pub use verification::{MemoryVerificationCodeRepository, VerificationCodeRepository};
