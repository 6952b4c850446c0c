//! Unit tests for the auth orchestration flow

use std::sync::Arc;

use pa_shared::config::FeatureConfig;

use crate::domain::entities::audit::{AuditAction, RequestContext};
use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError};
use crate::repositories::{
    MemoryAuditLogRepository, MemoryUserRepository, MemoryVerificationCodeRepository,
    UserRepository,
};
use crate::services::audit::{AuditService, AuditServiceConfig};
use crate::services::auth::AuthService;
use crate::services::verification::tests::mocks::MockSmsGateway;
use crate::services::verification::{VerificationService, VerificationServiceConfig};

use super::mocks::MockSessionIssuer;

const PHONE: &str = "13800000000";

struct Fixture {
    service: AuthService<
        MemoryVerificationCodeRepository,
        MockSmsGateway,
        MemoryUserRepository,
        MockSessionIssuer,
        MemoryAuditLogRepository,
    >,
    gateway: Arc<MockSmsGateway>,
    users: Arc<MemoryUserRepository>,
    sessions: Arc<MockSessionIssuer>,
    audit_log: Arc<MemoryAuditLogRepository>,
}

fn fixture(features: FeatureConfig) -> Fixture {
    fixture_with(features, MockSessionIssuer::new())
}

fn fixture_with(features: FeatureConfig, sessions: MockSessionIssuer) -> Fixture {
    let repository = Arc::new(MemoryVerificationCodeRepository::new());
    let gateway = Arc::new(MockSmsGateway::delivering());
    let verification = Arc::new(VerificationService::new(
        repository,
        Arc::clone(&gateway),
        VerificationServiceConfig::default(),
    ));
    let users = Arc::new(MemoryUserRepository::new());
    let sessions = Arc::new(sessions);
    let audit_log = Arc::new(MemoryAuditLogRepository::new());
    let audit = Arc::new(AuditService::new(
        Arc::clone(&audit_log),
        AuditServiceConfig {
            async_writes: false,
        },
    ));

    let service = AuthService::with_audit(
        verification,
        Arc::clone(&users),
        Arc::clone(&sessions),
        audit,
        features,
    );
    Fixture {
        service,
        gateway,
        users,
        sessions,
        audit_log,
    }
}

async fn issue_and_get_code(fx: &Fixture) -> String {
    fx.service
        .send_verification_code(PHONE, RequestContext::default())
        .await
        .unwrap();
    fx.gateway.sent_code(PHONE).unwrap()
}

#[tokio::test]
async fn test_login_with_existing_user() {
    let fx = fixture(FeatureConfig::default());
    let existing = User::new(PHONE);
    fx.users.seed(existing.clone()).await;

    let code = issue_and_get_code(&fx).await;
    let response = fx
        .service
        .login(PHONE, &code, RequestContext::from_ip("10.0.0.1"))
        .await
        .unwrap();

    assert_eq!(response.user.id, existing.id);
    assert!(response.session.token.starts_with("session-"));
    assert_eq!(fx.sessions.issued_count(), 1);
}

#[tokio::test]
async fn test_login_auto_provisions_user() {
    let fx = fixture(FeatureConfig::default());

    let code = issue_and_get_code(&fx).await;
    let response = fx
        .service
        .login(PHONE, &code, RequestContext::default())
        .await
        .unwrap();

    assert_eq!(response.user.phone, PHONE);
    // the user now exists for subsequent logins
    let found = fx.users.find_by_phone(PHONE).await.unwrap().unwrap();
    assert_eq!(found.id, response.user.id);
}

#[tokio::test]
async fn test_login_unknown_user_with_registration_disabled() {
    let features = FeatureConfig {
        register: false,
        ..Default::default()
    };
    let fx = fixture(features);

    let code = issue_and_get_code(&fx).await;
    let result = fx.service.login(PHONE, &code, RequestContext::default()).await;

    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::UserNotFound))
    ));
    assert_eq!(fx.sessions.issued_count(), 0);

    // the code was still consumed by the successful verification
    let retry = fx.service.login(PHONE, &code, RequestContext::default()).await;
    assert!(matches!(
        retry,
        Err(DomainError::Auth(AuthError::NoActiveCode))
    ));
}

#[tokio::test]
async fn test_login_propagates_verification_rejection_unchanged() {
    let fx = fixture(FeatureConfig::default());
    issue_and_get_code(&fx).await;

    let result = fx
        .service
        .login(PHONE, "000000", RequestContext::default())
        .await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::CodeMismatch))
    ));
    assert_eq!(fx.sessions.issued_count(), 0);
}

#[tokio::test]
async fn test_login_session_failure_surfaces() {
    let fx = fixture_with(FeatureConfig::default(), MockSessionIssuer::failing());
    let code = issue_and_get_code(&fx).await;

    let result = fx.service.login(PHONE, &code, RequestContext::default()).await;
    assert!(matches!(result, Err(DomainError::Internal { .. })));
}

#[tokio::test]
async fn test_logout_gated_by_feature_flag() {
    let features = FeatureConfig {
        logout: false,
        ..Default::default()
    };
    let fx = fixture(features);

    let result = fx
        .service
        .logout("session-abc", RequestContext::default())
        .await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::LogoutDisabled))
    ));
    assert!(fx.sessions.revoked_tokens().is_empty());
}

#[tokio::test]
async fn test_logout_revokes_session() {
    let fx = fixture(FeatureConfig::default());
    fx.service
        .logout("session-abc", RequestContext::default())
        .await
        .unwrap();
    assert_eq!(fx.sessions.revoked_tokens(), vec!["session-abc".to_string()]);
}

#[tokio::test]
async fn test_audit_trail_for_login_flow() {
    let fx = fixture(FeatureConfig::default());
    let code = issue_and_get_code(&fx).await;

    fx.service
        .login(PHONE, "000000", RequestContext::from_ip("10.0.0.1"))
        .await
        .unwrap_err();
    fx.service
        .login(PHONE, &code, RequestContext::from_ip("10.0.0.1"))
        .await
        .unwrap();

    let send_entries = fx.audit_log.entries_for(AuditAction::SendCode).await;
    assert_eq!(send_entries.len(), 1);
    assert!(send_entries[0].success);
    // phone never appears unmasked in audit storage
    assert_eq!(send_entries[0].phone_masked, "138****0000");

    let verify_entries = fx.audit_log.entries_for(AuditAction::VerifyCode).await;
    assert_eq!(verify_entries.len(), 2);
    assert!(!verify_entries[0].success);
    assert_eq!(verify_entries[0].reason.as_deref(), Some("CODE_MISMATCH"));
    assert!(verify_entries[1].success);

    let login_entries = fx.audit_log.entries_for(AuditAction::Login).await;
    assert_eq!(login_entries.len(), 1);
    assert!(login_entries[0].success);
    assert_eq!(
        login_entries[0].context.ip_address.as_deref(),
        Some("10.0.0.1")
    );
}

#[tokio::test]
async fn test_audit_failure_never_fails_login() {
    let repository = Arc::new(MemoryVerificationCodeRepository::new());
    let gateway = Arc::new(MockSmsGateway::delivering());
    let verification = Arc::new(VerificationService::new(
        repository,
        Arc::clone(&gateway),
        VerificationServiceConfig::default(),
    ));
    let audit = Arc::new(AuditService::new(
        Arc::new(MemoryAuditLogRepository::failing()),
        AuditServiceConfig {
            async_writes: false,
        },
    ));
    let service = AuthService::with_audit(
        verification,
        Arc::new(MemoryUserRepository::new()),
        Arc::new(MockSessionIssuer::new()),
        audit,
        FeatureConfig::default(),
    );

    service
        .send_verification_code(PHONE, RequestContext::default())
        .await
        .unwrap();
    let code = gateway.sent_code(PHONE).unwrap();
    service
        .login(PHONE, &code, RequestContext::default())
        .await
        .unwrap();
}
