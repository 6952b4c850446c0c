//! Types for verification service results

use chrono::{DateTime, Utc};

use crate::domain::entities::verification_code::VerificationCode;

/// Result of issuing a verification code
#[derive(Debug, Clone)]
pub struct SendCodeResult {
    /// The verification record that was persisted
    pub verification_code: VerificationCode,
    /// Provider-assigned message id, when the driver reports one
    pub message_id: Option<String>,
    /// When the caller may request another code for this phone
    pub next_resend_at: DateTime<Utc>,
}
