//! Audit log repository trait.
//!
//! The audit collaborator boundary. Writes are fire-and-forget from the
//! caller's perspective; a failing implementation must never fail the
//! primary operation (the audit service guarantees this).

use async_trait::async_trait;

use crate::domain::entities::audit::AuditLog;
use crate::errors::DomainResult;

/// Repository contract for audit log persistence
#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    /// Persist one audit log entry
    async fn create(&self, entry: &AuditLog) -> DomainResult<()>;
}
