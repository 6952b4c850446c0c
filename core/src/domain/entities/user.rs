//! User entity resolved by the auth orchestration layer.
//!
//! Account storage itself is an external collaborator; this entity is the
//! minimal identity shape the login flow needs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user account identified by phone number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: Uuid,

    /// Normalized phone number bound to the account
    pub phone: String,

    /// Timestamp when the account was created
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user for the given phone number
    pub fn new(phone: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            phone: phone.into(),
            created_at: Utc::now(),
        }
    }
}
