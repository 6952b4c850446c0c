//! Mock session collaborator for auth tests

use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::sync::Mutex;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::domain::value_objects::SessionToken;
use crate::errors::{DomainError, DomainResult};
use crate::services::auth::SessionIssuer;

/// Session issuer that hands out opaque tokens and records revocations
pub struct MockSessionIssuer {
    issued: Mutex<Vec<String>>,
    revoked: Mutex<Vec<String>>,
    fail_issue: bool,
}

impl MockSessionIssuer {
    pub fn new() -> Self {
        Self {
            issued: Mutex::new(Vec::new()),
            revoked: Mutex::new(Vec::new()),
            fail_issue: false,
        }
    }

    /// Issuer whose `issue_session` always fails
    pub fn failing() -> Self {
        Self {
            issued: Mutex::new(Vec::new()),
            revoked: Mutex::new(Vec::new()),
            fail_issue: true,
        }
    }

    pub fn issued_count(&self) -> usize {
        self.issued.lock().unwrap().len()
    }

    pub fn revoked_tokens(&self) -> Vec<String> {
        self.revoked.lock().unwrap().clone()
    }
}

#[async_trait]
impl SessionIssuer for MockSessionIssuer {
    async fn issue_session(&self, _user: &User) -> DomainResult<SessionToken> {
        if self.fail_issue {
            return Err(DomainError::Internal {
                message: "session backend unavailable".to_string(),
            });
        }
        let token = format!("session-{}", Uuid::new_v4());
        self.issued.lock().unwrap().push(token.clone());
        Ok(SessionToken {
            token,
            expires_at: Utc::now() + Duration::days(7),
        })
    }

    async fn revoke_session(&self, token: &str) -> DomainResult<()> {
        self.revoked.lock().unwrap().push(token.to_string());
        Ok(())
    }
}
