//! End-to-end login flow against the public crate API

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, Utc};

use pa_core::domain::entities::audit::RequestContext;
use pa_core::domain::entities::user::User;
use pa_core::domain::value_objects::SessionToken;
use pa_core::errors::{AuthError, DomainError, DomainResult};
use pa_core::repositories::{
    MemoryAuditLogRepository, MemoryUserRepository, MemoryVerificationCodeRepository,
};
use pa_core::services::audit::{AuditService, AuditServiceConfig};
use pa_core::services::auth::{AuthService, SessionIssuer};
use pa_core::services::verification::{
    SmsGateway, SmsOutcome, VerificationService, VerificationServiceConfig,
};
use pa_shared::config::FeatureConfig;

const PHONE: &str = "13800000000";

/// Records outgoing codes instead of sending them
#[derive(Default)]
struct RecordingGateway {
    sent: Mutex<Vec<(String, String)>>,
}

impl RecordingGateway {
    fn last_code(&self, phone: &str) -> Option<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(p, _)| p == phone)
            .map(|(_, c)| c.clone())
    }
}

#[async_trait]
impl SmsGateway for RecordingGateway {
    async fn send(&self, phone: &str, code: &str) -> SmsOutcome {
        self.sent
            .lock()
            .unwrap()
            .push((phone.to_string(), code.to_string()));
        SmsOutcome::Delivered { message_id: None }
    }

    fn driver_name(&self) -> &'static str {
        "recording"
    }
}

struct StaticSessionIssuer;

#[async_trait]
impl SessionIssuer for StaticSessionIssuer {
    async fn issue_session(&self, user: &User) -> DomainResult<SessionToken> {
        Ok(SessionToken {
            token: format!("token-for-{}", user.id),
            expires_at: Utc::now() + Duration::days(7),
        })
    }

    async fn revoke_session(&self, _token: &str) -> DomainResult<()> {
        Ok(())
    }
}

type Stack = (
    AuthService<
        MemoryVerificationCodeRepository,
        RecordingGateway,
        MemoryUserRepository,
        StaticSessionIssuer,
        MemoryAuditLogRepository,
    >,
    Arc<RecordingGateway>,
);

fn build_stack() -> Stack {
    // RUST_LOG controls test log output; init once across tests
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init()
        .ok();

    let gateway = Arc::new(RecordingGateway::default());
    let verification = Arc::new(VerificationService::new(
        Arc::new(MemoryVerificationCodeRepository::new()),
        Arc::clone(&gateway),
        VerificationServiceConfig::default(),
    ));
    let audit = Arc::new(AuditService::new(
        Arc::new(MemoryAuditLogRepository::new()),
        AuditServiceConfig {
            async_writes: false,
        },
    ));
    let auth = AuthService::with_audit(
        verification,
        Arc::new(MemoryUserRepository::new()),
        Arc::new(StaticSessionIssuer),
        audit,
        FeatureConfig::default(),
    );
    (auth, gateway)
}

#[tokio::test]
async fn full_login_round_trip() {
    let (auth, gateway) = build_stack();

    auth.send_verification_code(PHONE, RequestContext::default())
        .await
        .expect("code issuance should succeed");
    let code = gateway.last_code(PHONE).expect("gateway saw the code");

    // wrong code first
    let wrong = auth.login(PHONE, "000000", RequestContext::default()).await;
    assert!(matches!(
        wrong,
        Err(DomainError::Auth(AuthError::CodeMismatch))
    ));

    // correct code logs in and provisions the account
    let response = auth
        .login(PHONE, &code, RequestContext::default())
        .await
        .expect("login should succeed");
    assert_eq!(response.user.phone, PHONE);
    assert_eq!(
        response.session.token,
        format!("token-for-{}", response.user.id)
    );

    // the code is single-use
    let replay = auth.login(PHONE, &code, RequestContext::default()).await;
    assert!(matches!(
        replay,
        Err(DomainError::Auth(AuthError::NoActiveCode))
    ));
}

#[tokio::test]
async fn resend_is_rate_limited() {
    let (auth, _gateway) = build_stack();

    auth.send_verification_code(PHONE, RequestContext::default())
        .await
        .unwrap();
    let second = auth
        .send_verification_code(PHONE, RequestContext::default())
        .await;

    match second {
        Err(DomainError::Auth(AuthError::CodeCooldown {
            retry_after_seconds,
        })) => {
            assert!(retry_after_seconds > 0 && retry_after_seconds <= 60);
        }
        other => panic!("expected cooldown, got {:?}", other),
    }
}
