//! In-memory implementation of the user repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::{DomainError, DomainResult};

use super::trait_::UserRepository;

/// In-memory user repository for tests and single-process deployments
#[derive(Clone, Default)]
pub struct MemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl MemoryUserRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a user (test helper)
    pub async fn seed(&self, user: User) {
        self.users.write().await.insert(user.id, user);
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_phone(&self, phone: &str) -> DomainResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.phone == phone).cloned())
    }

    async fn create(&self, user: User) -> DomainResult<User> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.phone == user.phone) {
            return Err(DomainError::Validation {
                message: format!("User already exists for phone {}", user.phone),
            });
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = MemoryUserRepository::new();
        let user = repo.create(User::new("13800000000")).await.unwrap();

        let found = repo.find_by_phone("13800000000").await.unwrap().unwrap();
        assert_eq!(found.id, user.id);
        assert!(repo.find_by_phone("13900000000").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_phone_rejected() {
        let repo = MemoryUserRepository::new();
        repo.create(User::new("13800000000")).await.unwrap();
        assert!(repo.create(User::new("13800000000")).await.is_err());
    }
}
