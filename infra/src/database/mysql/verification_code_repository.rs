//! MySQL verification code repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::MySqlPool;
use tracing::debug;
use uuid::Uuid;

use pa_core::domain::entities::verification_code::VerificationCode;
use pa_core::errors::DomainResult;
use pa_core::repositories::VerificationCodeRepository;
use pa_shared::utils::phone::mask_phone_number;

use super::{column, query_error, uuid_column};

/// Verification code persistence backed by `phone_verification_codes`.
///
/// Attempt increments and deletes are single atomic statements, so the
/// repository itself upholds exactly-once consumption even across
/// processes that do not share the service-level per-phone lock.
pub struct MySqlVerificationCodeRepository {
    pool: MySqlPool,
}

impl MySqlVerificationCodeRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn map_row(row: &MySqlRow) -> DomainResult<VerificationCode> {
        Ok(VerificationCode {
            id: uuid_column(row, "id")?,
            phone: column(row, "phone")?,
            code: column(row, "code")?,
            attempts: column(row, "attempts")?,
            created_at: column(row, "created_at")?,
            expires_at: column(row, "expires_at")?,
        })
    }
}

#[async_trait]
impl VerificationCodeRepository for MySqlVerificationCodeRepository {
    async fn insert(&self, record: &VerificationCode) -> DomainResult<()> {
        sqlx::query(
            r#"
            INSERT INTO phone_verification_codes (
                id, phone, code, attempts, created_at, expires_at
            ) VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(record.id.to_string())
        .bind(&record.phone)
        .bind(&record.code)
        .bind(record.attempts)
        .bind(record.created_at)
        .bind(record.expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| query_error("Failed to insert verification code", e))?;

        debug!(
            phone = %mask_phone_number(&record.phone),
            record_id = %record.id,
            "Stored verification code"
        );
        Ok(())
    }

    async fn find_latest(&self, phone: &str) -> DomainResult<Option<VerificationCode>> {
        let row = sqlx::query(
            r#"
            SELECT id, phone, code, attempts, created_at, expires_at
            FROM phone_verification_codes
            WHERE phone = ?
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(phone)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| query_error("Failed to load latest verification code", e))?;

        row.as_ref().map(Self::map_row).transpose()
    }

    async fn find_active(
        &self,
        phone: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<Option<VerificationCode>> {
        let row = sqlx::query(
            r#"
            SELECT id, phone, code, attempts, created_at, expires_at
            FROM phone_verification_codes
            WHERE phone = ? AND expires_at > ?
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(phone)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| query_error("Failed to load active verification code", e))?;

        row.as_ref().map(Self::map_row).transpose()
    }

    async fn increment_attempts(&self, id: Uuid) -> DomainResult<Option<i32>> {
        let result = sqlx::query(
            r#"
            UPDATE phone_verification_codes
            SET attempts = attempts + 1
            WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| query_error("Failed to increment attempts", e))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        // re-read: the record may have been deleted by a racing consumer
        let row = sqlx::query(
            r#"
            SELECT attempts FROM phone_verification_codes WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| query_error("Failed to read attempt count", e))?;

        row.map(|row| column(&row, "attempts")).transpose()
    }

    async fn delete(&self, id: Uuid) -> DomainResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM phone_verification_codes WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| query_error("Failed to delete verification code", e))?;

        Ok(result.rows_affected() > 0)
    }
}
