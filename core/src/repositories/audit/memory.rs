//! In-memory implementation of the audit log repository.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::entities::audit::{AuditAction, AuditLog};
use crate::errors::{DomainError, DomainResult};

use super::trait_::AuditLogRepository;

/// In-memory audit repository for tests
#[derive(Clone, Default)]
pub struct MemoryAuditLogRepository {
    entries: Arc<Mutex<Vec<AuditLog>>>,
    fail_writes: bool,
}

impl MemoryAuditLogRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository whose writes always fail (test helper)
    pub fn failing() -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
            fail_writes: true,
        }
    }

    /// All recorded entries
    pub async fn entries(&self) -> Vec<AuditLog> {
        self.entries.lock().await.clone()
    }

    /// Entries recorded for a given action
    pub async fn entries_for(&self, action: AuditAction) -> Vec<AuditLog> {
        self.entries
            .lock()
            .await
            .iter()
            .filter(|e| e.action == action)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl AuditLogRepository for MemoryAuditLogRepository {
    async fn create(&self, entry: &AuditLog) -> DomainResult<()> {
        if self.fail_writes {
            return Err(DomainError::Internal {
                message: "audit storage unavailable".to_string(),
            });
        }
        self.entries.lock().await.push(entry.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_records_entries() {
        let repo = MemoryAuditLogRepository::new();
        let entry = AuditLog::new("13800000000", AuditAction::SendCode, true);
        repo.create(&entry).await.unwrap();

        assert_eq!(repo.entries().await.len(), 1);
        assert_eq!(repo.entries_for(AuditAction::SendCode).await.len(), 1);
        assert!(repo.entries_for(AuditAction::Login).await.is_empty());
    }

    #[tokio::test]
    async fn test_failing_repository() {
        let repo = MemoryAuditLogRepository::failing();
        let entry = AuditLog::new("13800000000", AuditAction::Login, false);
        assert!(repo.create(&entry).await.is_err());
    }
}
