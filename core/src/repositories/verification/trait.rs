//! Verification code repository trait.
//!
//! Persistence contract for verification records keyed by phone number.
//! "Active" filtering is an explicit timestamp comparison passed by the
//! caller, never an implicit query scope. Attempt increments and deletes
//! are atomic so that concurrent verifications cannot double-consume a
//! code even without the service-level per-phone lock.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::verification_code::VerificationCode;
use crate::errors::DomainResult;

/// Repository contract for verification code persistence
#[async_trait]
pub trait VerificationCodeRepository: Send + Sync {
    /// Persist a new verification record
    async fn insert(&self, record: &VerificationCode) -> DomainResult<()>;

    /// Most recent record for the phone by creation time, expired or not.
    ///
    /// Used for cooldown determination, which is based on when the last
    /// code was issued rather than whether it is still valid.
    async fn find_latest(&self, phone: &str) -> DomainResult<Option<VerificationCode>>;

    /// Most recent unexpired record for the phone (`expires_at > now`)
    async fn find_active(
        &self,
        phone: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<Option<VerificationCode>>;

    /// Atomically increment the attempt counter, returning the new count.
    ///
    /// Returns `Ok(None)` when the record no longer exists.
    async fn increment_attempts(&self, id: Uuid) -> DomainResult<Option<i32>>;

    /// Delete the record, returning whether a row was actually removed.
    ///
    /// The boolean is the consumption guarantee: of two racing deletes for
    /// the same id, exactly one observes `true`.
    async fn delete(&self, id: Uuid) -> DomainResult<bool>;
}
