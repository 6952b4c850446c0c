//! No-op implementation of AuditLogRepository for when audit logging is not needed

use async_trait::async_trait;

use crate::domain::entities::audit::AuditLog;
use crate::errors::DomainResult;

use super::trait_::AuditLogRepository;

/// Audit repository that discards every entry
#[derive(Clone, Copy, Default)]
pub struct NoOpAuditLogRepository;

impl NoOpAuditLogRepository {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AuditLogRepository for NoOpAuditLogRepository {
    async fn create(&self, _entry: &AuditLog) -> DomainResult<()> {
        Ok(())
    }
}
