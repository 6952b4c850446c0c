//! MySQL repository implementations

mod audit_log_repository;
mod user_repository;
mod verification_code_repository;

pub use audit_log_repository::MySqlAuditLogRepository;
pub use user_repository::MySqlUserRepository;
pub use verification_code_repository::MySqlVerificationCodeRepository;

use pa_core::errors::{DomainError, DomainResult};
use sqlx::mysql::MySqlRow;
use sqlx::Row;
use uuid::Uuid;

/// Read a column, mapping decode failures to an internal error
pub(crate) fn column<'r, T>(row: &'r MySqlRow, name: &str) -> DomainResult<T>
where
    T: sqlx::Decode<'r, sqlx::MySql> + sqlx::Type<sqlx::MySql>,
{
    row.try_get(name).map_err(|e| DomainError::Internal {
        message: format!("Failed to read column {}: {}", name, e),
    })
}

/// Parse a CHAR(36) uuid column
pub(crate) fn uuid_column(row: &MySqlRow, name: &str) -> DomainResult<Uuid> {
    let raw: String = column(row, name)?;
    Uuid::parse_str(&raw).map_err(|e| DomainError::Internal {
        message: format!("Malformed uuid in column {}: {}", name, e),
    })
}

/// Map a query error to an internal error with context
pub(crate) fn query_error(context: &str, e: sqlx::Error) -> DomainError {
    DomainError::Internal {
        message: format!("{}: {}", context, e),
    }
}
