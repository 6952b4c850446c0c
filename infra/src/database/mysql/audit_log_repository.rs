//! MySQL audit log repository

use async_trait::async_trait;
use sqlx::MySqlPool;

use pa_core::domain::entities::audit::AuditLog;
use pa_core::errors::DomainResult;
use pa_core::repositories::AuditLogRepository;

use super::query_error;

/// Audit log storage backed by `phone_auth_logs`.
///
/// Write-only from this crate; reads happen through reporting tooling.
/// The phone column stores the already-masked form carried by the entity.
pub struct MySqlAuditLogRepository {
    pool: MySqlPool,
}

impl MySqlAuditLogRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditLogRepository for MySqlAuditLogRepository {
    async fn create(&self, entry: &AuditLog) -> DomainResult<()> {
        sqlx::query(
            r#"
            INSERT INTO phone_auth_logs (
                id, phone, action, success, reason, ip_address, user_agent, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(entry.id.to_string())
        .bind(&entry.phone_masked)
        .bind(entry.action.as_str())
        .bind(entry.success)
        .bind(&entry.reason)
        .bind(&entry.context.ip_address)
        .bind(&entry.context.user_agent)
        .bind(entry.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| query_error("Failed to write audit log entry", e))?;

        Ok(())
    }
}
