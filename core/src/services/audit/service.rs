//! Audit service for recording authentication events.
//!
//! Writes are fire-and-forget: a failure to record is logged and swallowed,
//! never surfaced to the primary operation.

use std::sync::Arc;
use tokio::task;
use tracing::warn;

use crate::domain::entities::audit::AuditLog;
use crate::repositories::AuditLogRepository;

/// Configuration for the audit service
#[derive(Debug, Clone)]
pub struct AuditServiceConfig {
    /// Whether to run audit writes on a background task
    pub async_writes: bool,
}

impl Default for AuditServiceConfig {
    fn default() -> Self {
        Self { async_writes: true }
    }
}

/// Service wrapping the audit collaborator
pub struct AuditService<R>
where
    R: AuditLogRepository,
{
    repository: Arc<R>,
    config: AuditServiceConfig,
}

impl<R> AuditService<R>
where
    R: AuditLogRepository + 'static,
{
    /// Create a new audit service
    pub fn new(repository: Arc<R>, config: AuditServiceConfig) -> Self {
        Self { repository, config }
    }

    /// Record one audit entry.
    ///
    /// Never fails: storage errors are logged at warn level and dropped.
    pub async fn record(&self, entry: AuditLog) {
        if self.config.async_writes {
            let repository = Arc::clone(&self.repository);
            task::spawn(async move {
                if let Err(err) = repository.create(&entry).await {
                    warn!(error = %err, "Failed to write audit log entry");
                }
            });
        } else if let Err(err) = self.repository.create(&entry).await {
            warn!(error = %err, "Failed to write audit log entry");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::audit::{AuditAction, AuditLog};
    use crate::repositories::MemoryAuditLogRepository;

    fn sync_config() -> AuditServiceConfig {
        AuditServiceConfig {
            async_writes: false,
        }
    }

    #[tokio::test]
    async fn test_record_persists_entry() {
        let repository = Arc::new(MemoryAuditLogRepository::new());
        let service = AuditService::new(Arc::clone(&repository), sync_config());

        service
            .record(AuditLog::new("13800000000", AuditAction::SendCode, true))
            .await;

        assert_eq!(repository.entries().await.len(), 1);
    }

    #[tokio::test]
    async fn test_storage_failure_is_swallowed() {
        let repository = Arc::new(MemoryAuditLogRepository::failing());
        let service = AuditService::new(repository, sync_config());

        // must not panic or surface the error
        service
            .record(AuditLog::new("13800000000", AuditAction::Login, false))
            .await;
    }
}
