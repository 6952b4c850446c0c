//! Audit log entity for recording authentication events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pa_shared::utils::phone::mask_phone_number;

/// Auditable actions in the phone-auth flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    SendCode,
    VerifyCode,
    Login,
    Logout,
}

impl AuditAction {
    /// String representation for storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SendCode => "send_code",
            Self::VerifyCode => "verify_code",
            Self::Login => "login",
            Self::Logout => "logout",
        }
    }
}

/// Request context threaded explicitly into audit calls.
///
/// There is no ambient request state; callers pass whatever they know
/// about the originating request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    /// Client IP address, when known
    pub ip_address: Option<String>,
    /// Client user agent, when known
    pub user_agent: Option<String>,
}

impl RequestContext {
    /// Context with an IP address only
    pub fn from_ip(ip: impl Into<String>) -> Self {
        Self {
            ip_address: Some(ip.into()),
            user_agent: None,
        }
    }
}

/// One audit log entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditLog {
    /// Unique identifier
    pub id: Uuid,

    /// Masked phone number the action concerned
    pub phone_masked: String,

    /// The action performed
    pub action: AuditAction,

    /// Whether the action succeeded
    pub success: bool,

    /// Failure reason, when the action failed
    pub reason: Option<String>,

    /// Request context captured at the call site
    pub context: RequestContext,

    /// Timestamp when the entry was created
    pub created_at: DateTime<Utc>,
}

impl AuditLog {
    /// Create a new audit entry; the phone number is masked immediately
    pub fn new(phone: &str, action: AuditAction, success: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            phone_masked: mask_phone_number(phone),
            action,
            success,
            reason: None,
            context: RequestContext::default(),
            created_at: Utc::now(),
        }
    }

    /// Attach a failure reason
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attach the request context
    pub fn with_context(mut self, context: RequestContext) -> Self {
        self.context = context;
        self
    }
}
