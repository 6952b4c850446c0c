//! Session collaborator boundary.
//!
//! Session credential mechanics (format, signing, storage) live outside
//! this subsystem; the orchestrator only needs an opaque "issue a session
//! for this identity" capability and its inverse.

use async_trait::async_trait;

use crate::domain::entities::user::User;
use crate::domain::value_objects::SessionToken;
use crate::errors::DomainResult;

/// Capability to issue and revoke session credentials
#[async_trait]
pub trait SessionIssuer: Send + Sync {
    /// Issue a session credential for the given identity
    async fn issue_session(&self, user: &User) -> DomainResult<SessionToken>;

    /// Revoke a previously issued session credential
    async fn revoke_session(&self, token: &str) -> DomainResult<()>;
}
