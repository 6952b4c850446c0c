//! Verification code entity for SMS-based authentication.

use chrono::{DateTime, Duration, Utc};
use rand::{rngs::OsRng, Rng};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Longest generatable code: the largest power of ten a `u64` can hold
pub const MAX_CODE_LENGTH: usize = 18;

/// One issued verification credential.
///
/// A record is created by code issuance, mutated only by attempt
/// increments on failed verification, and deleted on successful
/// verification or attempt exhaustion. Expired records are kept for
/// audit until an external retention job removes them; expiry is
/// always determined by comparing `expires_at` against the clock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationCode {
    /// Unique identifier for the record
    pub id: Uuid,

    /// Normalized phone number this code was sent to
    pub phone: String,

    /// The zero-padded numeric code
    pub code: String,

    /// Number of failed verification attempts made so far
    pub attempts: i32,

    /// Timestamp when the code was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the code expires
    pub expires_at: DateTime<Utc>,
}

impl VerificationCode {
    /// Create a new verification record with a freshly generated code
    pub fn new(phone: impl Into<String>, code_length: usize, expire_minutes: i64) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            phone: phone.into(),
            code: Self::generate_code(code_length),
            attempts: 0,
            created_at: now,
            expires_at: now + Duration::minutes(expire_minutes),
        }
    }

    /// Generate a uniformly random, zero-padded numeric code
    ///
    /// Uses the OS random number generator. Collisions across phones are
    /// acceptable; old codes for the same phone are superseded logically.
    /// The length is bounded to [1, `MAX_CODE_LENGTH`]; `10^19` no longer
    /// fits in a `u64`.
    pub fn generate_code(length: usize) -> String {
        let length = length.clamp(1, MAX_CODE_LENGTH);
        let upper = 10u64.pow(length as u32);
        let value: u64 = OsRng.gen_range(0..upper);
        format!("{:0width$}", value, width = length)
    }

    /// Whether the code has expired at the given instant
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Whether the code has expired
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Whether the attempt budget has been consumed
    pub fn is_exhausted(&self, max_attempts: i32) -> bool {
        self.attempts >= max_attempts
    }

    /// Seconds until a new code may be requested for this phone, given the
    /// cooldown window; zero when the window has passed
    pub fn cooldown_remaining(&self, cooldown_seconds: i64, now: DateTime<Utc>) -> i64 {
        let retry_at = self.created_at + Duration::seconds(cooldown_seconds);
        (retry_at - now).num_seconds().max(0)
    }
}
