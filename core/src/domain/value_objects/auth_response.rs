//! Authentication response value objects

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::user::User;

/// An opaque session credential issued after a successful login.
///
/// Token mechanics (format, signing, storage) belong to the session
/// collaborator; this layer only carries the credential and its expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionToken {
    /// The credential itself
    pub token: String,
    /// Timestamp when the credential expires
    pub expires_at: DateTime<Utc>,
}

/// Successful login result: the resolved identity plus its session credential
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    /// The authenticated user
    pub user: User,
    /// The issued session credential
    pub session: SessionToken,
}
