//! Auth orchestration service

use std::sync::Arc;
use tracing::info;

use pa_shared::config::FeatureConfig;
use pa_shared::utils::phone::mask_phone_number;

use crate::domain::entities::audit::{AuditAction, AuditLog, RequestContext};
use crate::domain::entities::user::User;
use crate::domain::value_objects::AuthResponse;
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::audit::NoOpAuditLogRepository;
use crate::repositories::{AuditLogRepository, UserRepository, VerificationCodeRepository};
use crate::services::audit::AuditService;
use crate::services::verification::{SendCodeResult, SmsGateway, VerificationService};

use super::session::SessionIssuer;

/// Coordinates the login flow: code verification, identity resolution,
/// and session issuance. Holds no state of its own; feature flags are
/// consulted here and nowhere else.
pub struct AuthService<R, G, U, S, A = NoOpAuditLogRepository>
where
    R: VerificationCodeRepository,
    G: SmsGateway + ?Sized,
    U: UserRepository,
    S: SessionIssuer,
    A: AuditLogRepository + 'static,
{
    /// Verification code lifecycle
    verification_service: Arc<VerificationService<R, G>>,
    /// Identity collaborator
    user_repository: Arc<U>,
    /// Session collaborator
    session_issuer: Arc<S>,
    /// Optional audit collaborator
    audit_service: Option<Arc<AuditService<A>>>,
    /// Feature flags (auto-registration, binding, logout)
    features: FeatureConfig,
}

impl<R, G, U, S> AuthService<R, G, U, S>
where
    R: VerificationCodeRepository,
    G: SmsGateway + ?Sized,
    U: UserRepository,
    S: SessionIssuer,
{
    /// Create a new auth service without audit logging
    pub fn new(
        verification_service: Arc<VerificationService<R, G>>,
        user_repository: Arc<U>,
        session_issuer: Arc<S>,
        features: FeatureConfig,
    ) -> Self {
        Self {
            verification_service,
            user_repository,
            session_issuer,
            audit_service: None,
            features,
        }
    }
}

impl<R, G, U, S, A> AuthService<R, G, U, S, A>
where
    R: VerificationCodeRepository,
    G: SmsGateway + ?Sized,
    U: UserRepository,
    S: SessionIssuer,
    A: AuditLogRepository + 'static,
{
    /// Create a new auth service with audit logging
    pub fn with_audit(
        verification_service: Arc<VerificationService<R, G>>,
        user_repository: Arc<U>,
        session_issuer: Arc<S>,
        audit_service: Arc<AuditService<A>>,
        features: FeatureConfig,
    ) -> Self {
        Self {
            verification_service,
            user_repository,
            session_issuer,
            audit_service: Some(audit_service),
            features,
        }
    }

    /// Request a verification code for the phone number
    pub async fn send_verification_code(
        &self,
        phone: &str,
        ctx: RequestContext,
    ) -> DomainResult<SendCodeResult> {
        let result = self.verification_service.send_code(phone).await;
        self.audit(phone, AuditAction::SendCode, &result, ctx).await;
        result
    }

    /// Log in with a phone number and verification code.
    ///
    /// Verification rejections propagate unchanged. On success the phone
    /// is resolved to an account (provisioning one when auto-registration
    /// is enabled), then a session credential is issued. Phone-to-account
    /// binding is a separate capability and is deliberately not consulted
    /// here.
    pub async fn login(
        &self,
        phone: &str,
        code: &str,
        ctx: RequestContext,
    ) -> DomainResult<AuthResponse> {
        let verified = self.verification_service.verify_code(phone, code).await;
        self.audit(phone, AuditAction::VerifyCode, &verified, ctx.clone())
            .await;
        let record = verified?;

        let result = self.resolve_and_issue(&record.phone).await;
        self.audit(&record.phone, AuditAction::Login, &result, ctx)
            .await;
        result
    }

    /// Revoke a session credential, when the logout feature is enabled
    pub async fn logout(&self, token: &str, ctx: RequestContext) -> DomainResult<()> {
        if !self.features.logout {
            return Err(AuthError::LogoutDisabled.into());
        }
        let result = self.session_issuer.revoke_session(token).await;
        if let Some(audit) = &self.audit_service {
            let entry = match &result {
                Ok(()) => AuditLog::new("", AuditAction::Logout, true),
                Err(err) => {
                    AuditLog::new("", AuditAction::Logout, false).with_reason(err.to_string())
                }
            };
            audit.record(entry.with_context(ctx)).await;
        }
        result
    }

    async fn resolve_and_issue(&self, phone: &str) -> DomainResult<AuthResponse> {
        let user = match self.user_repository.find_by_phone(phone).await? {
            Some(user) => user,
            None if self.features.register => {
                let user = self.user_repository.create(User::new(phone)).await?;
                info!(
                    phone = %mask_phone_number(phone),
                    user_id = %user.id,
                    event = "user_provisioned",
                    "Auto-registered user on first login"
                );
                user
            }
            None => return Err(AuthError::UserNotFound.into()),
        };

        let session = self.session_issuer.issue_session(&user).await?;
        info!(
            user_id = %user.id,
            event = "login_success",
            "Issued session credential"
        );
        Ok(AuthResponse { user, session })
    }

    async fn audit<T>(
        &self,
        phone: &str,
        action: AuditAction,
        result: &DomainResult<T>,
        ctx: RequestContext,
    ) {
        let Some(audit) = &self.audit_service else {
            return;
        };
        let entry = match result {
            Ok(_) => AuditLog::new(phone, action, true),
            Err(DomainError::Auth(err)) => {
                AuditLog::new(phone, action, false).with_reason(err.error_code())
            }
            Err(err) => AuditLog::new(phone, action, false).with_reason(err.to_string()),
        };
        audit.record(entry.with_context(ctx)).await;
    }
}
