//! Verification code lifecycle implementation

use chrono::{Duration, Utc};
use std::sync::Arc;
use tracing::{error, info, warn};

use pa_shared::utils::phone::{is_valid_phone, mask_phone_number, normalize_phone_number};

use crate::domain::entities::verification_code::VerificationCode;
use crate::errors::{AuthError, DomainResult};
use crate::repositories::VerificationCodeRepository;

use super::config::VerificationServiceConfig;
use super::phone_lock::PhoneLockMap;
use super::traits::{SmsGateway, SmsOutcome};
use super::types::SendCodeResult;

/// Service governing the verification code state machine.
///
/// Per phone number the conceptual states are: no active credential,
/// issued, consumed / exhausted / expired. State is derived from record
/// fields, never stored as a column. All read-check-write sequences run
/// under a per-phone lock; the SMS network call does not.
pub struct VerificationService<R, G>
where
    R: VerificationCodeRepository,
    G: SmsGateway + ?Sized,
{
    /// Verification record persistence
    repository: Arc<R>,
    /// Outbound SMS gateway
    gateway: Arc<G>,
    /// Lifecycle configuration
    config: VerificationServiceConfig,
    /// Per-phone mutual exclusion
    phone_locks: PhoneLockMap,
}

impl<R, G> VerificationService<R, G>
where
    R: VerificationCodeRepository,
    G: SmsGateway + ?Sized,
{
    /// Create a new verification service
    pub fn new(repository: Arc<R>, gateway: Arc<G>, config: VerificationServiceConfig) -> Self {
        Self {
            repository,
            gateway,
            config,
            phone_locks: PhoneLockMap::new(),
        }
    }

    /// Issue a verification code for a phone number.
    ///
    /// Enforces the resend cooldown against the most recent record
    /// (expired or not), persists a fresh record, then hands the code to
    /// the SMS gateway. A gateway failure does not roll back the record:
    /// the code stays verifiable even when this delivery channel failed,
    /// and the failure is reported to the caller as a distinct error.
    pub async fn send_code(&self, phone: &str) -> DomainResult<SendCodeResult> {
        let phone = self.validate_phone(phone)?;

        let record = {
            let _guard = self.phone_locks.acquire(&phone).await;

            let now = Utc::now();
            if let Some(latest) = self.repository.find_latest(&phone).await? {
                let retry_at =
                    latest.created_at + Duration::seconds(self.config.resend_cooldown_seconds);
                if now < retry_at {
                    let retry_after_seconds = (retry_at - now).num_seconds().max(1);
                    warn!(
                        phone = %mask_phone_number(&phone),
                        retry_after_seconds,
                        event = "send_code_cooldown",
                        "Code request inside resend cooldown window"
                    );
                    return Err(AuthError::CodeCooldown {
                        retry_after_seconds,
                    }
                    .into());
                }
            }

            let record = VerificationCode::new(
                phone.clone(),
                self.config.code_length,
                self.config.code_expiration_minutes,
            );
            self.repository.insert(&record).await?;
            record
            // lock released here; the network call below must not hold it
        };

        info!(
            phone = %mask_phone_number(&phone),
            record_id = %record.id,
            driver = self.gateway.driver_name(),
            event = "code_issued",
            "Issued verification code"
        );

        let next_resend_at =
            record.created_at + Duration::seconds(self.config.resend_cooldown_seconds);

        match self.gateway.send(&phone, &record.code).await {
            SmsOutcome::Delivered { message_id } => Ok(SendCodeResult {
                verification_code: record,
                message_id,
                next_resend_at,
            }),
            SmsOutcome::Rejected { code, message } => {
                warn!(
                    phone = %mask_phone_number(&phone),
                    provider_code = %code,
                    event = "sms_rejected",
                    "SMS provider rejected the message"
                );
                Err(AuthError::SmsRejected {
                    message: format!("{}: {}", code, message),
                }
                .into())
            }
            SmsOutcome::TransportError { message } => {
                error!(
                    phone = %mask_phone_number(&phone),
                    error = %message,
                    event = "sms_transport_error",
                    "SMS delivery failed at the transport level"
                );
                Err(AuthError::SmsServiceFailure { message }.into())
            }
            SmsOutcome::Misconfigured { message } => {
                error!(
                    driver = self.gateway.driver_name(),
                    error = %message,
                    event = "sms_misconfigured",
                    "SMS gateway configuration is incomplete"
                );
                Err(AuthError::SmsMisconfigured { message }.into())
            }
        }
    }

    /// Verify a submitted code for a phone number.
    ///
    /// Check order is fixed: expiry filter first (an expired record never
    /// reaches the exhaustion check), exhaustion second (a request at the
    /// limit consumes no further attempt), equality third. On a match the
    /// record is deleted; the delete result is the single-use guarantee.
    pub async fn verify_code(&self, phone: &str, submitted: &str) -> DomainResult<VerificationCode> {
        let phone = self.validate_phone(phone)?;

        let _guard = self.phone_locks.acquire(&phone).await;
        let now = Utc::now();

        let record = match self.repository.find_active(&phone, now).await? {
            Some(record) => record,
            None => {
                // covers both "never issued" and "expired but not yet swept"
                return Err(AuthError::NoActiveCode.into());
            }
        };

        if record.is_exhausted(self.config.max_attempts) {
            self.repository.delete(record.id).await?;
            warn!(
                phone = %mask_phone_number(&phone),
                attempts = record.attempts,
                event = "attempts_exhausted",
                "Verification code invalidated after too many attempts"
            );
            return Err(AuthError::MaxAttemptsExceeded.into());
        }

        // exact string equality; codes are fixed-length numeric
        if record.code != submitted {
            let attempts = self
                .repository
                .increment_attempts(record.id)
                .await?
                .unwrap_or(record.attempts + 1);
            // the increment that reaches the limit invalidates the record
            if attempts >= self.config.max_attempts {
                self.repository.delete(record.id).await?;
                warn!(
                    phone = %mask_phone_number(&phone),
                    attempts,
                    event = "attempts_exhausted",
                    "Verification code invalidated after too many attempts"
                );
                return Err(AuthError::MaxAttemptsExceeded.into());
            }
            info!(
                phone = %mask_phone_number(&phone),
                attempts,
                event = "code_mismatch",
                "Submitted code did not match"
            );
            return Err(AuthError::CodeMismatch.into());
        }

        // single-use consumption: exactly one concurrent caller sees the
        // delete succeed
        if !self.repository.delete(record.id).await? {
            return Err(AuthError::NoActiveCode.into());
        }

        info!(
            phone = %mask_phone_number(&phone),
            record_id = %record.id,
            event = "code_verified",
            "Verification code consumed"
        );
        Ok(record)
    }

    fn validate_phone(&self, phone: &str) -> DomainResult<String> {
        if !is_valid_phone(phone) {
            return Err(AuthError::InvalidPhoneFormat {
                phone: mask_phone_number(phone),
            }
            .into());
        }
        Ok(normalize_phone_number(phone))
    }
}
