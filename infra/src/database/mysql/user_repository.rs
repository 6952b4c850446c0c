//! MySQL user repository

use async_trait::async_trait;
use sqlx::MySqlPool;
use tracing::info;

use pa_core::domain::entities::user::User;
use pa_core::errors::DomainResult;
use pa_core::repositories::UserRepository;
use pa_shared::utils::phone::mask_phone_number;

use super::{column, query_error, uuid_column};

/// User identity storage backed by `phone_auth_users`.
///
/// The phone column carries a unique key, so concurrent auto-provisioning
/// of the same phone fails at the database rather than creating duplicate
/// accounts.
pub struct MySqlUserRepository {
    pool: MySqlPool,
}

impl MySqlUserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_phone(&self, phone: &str) -> DomainResult<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT id, phone, created_at FROM phone_auth_users WHERE phone = ?
            "#,
        )
        .bind(phone)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| query_error("Failed to look up user", e))?;

        row.map(|row| {
            Ok(User {
                id: uuid_column(&row, "id")?,
                phone: column(&row, "phone")?,
                created_at: column(&row, "created_at")?,
            })
        })
        .transpose()
    }

    async fn create(&self, user: User) -> DomainResult<User> {
        sqlx::query(
            r#"
            INSERT INTO phone_auth_users (id, phone, created_at) VALUES (?, ?, ?)
            "#,
        )
        .bind(user.id.to_string())
        .bind(&user.phone)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| query_error("Failed to create user", e))?;

        info!(
            phone = %mask_phone_number(&user.phone),
            user_id = %user.id,
            "Created user"
        );
        Ok(user)
    }
}
