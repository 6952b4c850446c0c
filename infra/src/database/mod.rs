//! Database module - MySQL implementations using SQLx
//!
//! Repository implementations for the `pa_core` persistence traits plus
//! connection pool setup. The schema lives in `migrations/`.

use std::time::Duration;

use sqlx::mysql::MySqlPoolOptions;
use sqlx::MySqlPool;

pub mod mysql;

pub use mysql::{MySqlAuditLogRepository, MySqlUserRepository, MySqlVerificationCodeRepository};

const MAX_CONNECTIONS: u32 = 10;
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Create the shared MySQL connection pool
pub async fn connect_pool(database_url: &str) -> Result<MySqlPool, sqlx::Error> {
    MySqlPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(database_url)
        .await
}
