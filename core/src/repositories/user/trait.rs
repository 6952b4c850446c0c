//! User repository trait.
//!
//! The identity collaborator boundary: resolve a phone to an account and,
//! when auto-registration is enabled, provision a new one. Account storage
//! itself is external to this subsystem.

use async_trait::async_trait;

use crate::domain::entities::user::User;
use crate::errors::DomainResult;

/// Repository contract for user identity resolution
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by normalized phone number
    async fn find_by_phone(&self, phone: &str) -> DomainResult<Option<User>>;

    /// Provision a new user for the given phone number
    async fn create(&self, user: User) -> DomainResult<User>;
}
