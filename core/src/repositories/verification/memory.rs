//! In-memory implementation of the verification code repository.
//!
//! Backs unit tests and single-process deployments. All operations on a
//! record set happen under one mutex, so increments and deletes are
//! atomic with respect to each other.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::domain::entities::verification_code::VerificationCode;
use crate::errors::DomainResult;

use super::trait_::VerificationCodeRepository;

/// In-memory verification code repository
#[derive(Clone, Default)]
pub struct MemoryVerificationCodeRepository {
    // phone -> records, insertion-ordered
    records: Arc<Mutex<HashMap<String, Vec<VerificationCode>>>>,
}

impl MemoryVerificationCodeRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records across all phones (test helper)
    pub async fn len(&self) -> usize {
        self.records.lock().await.values().map(Vec::len).sum()
    }

    /// Whether the repository holds no records
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl VerificationCodeRepository for MemoryVerificationCodeRepository {
    async fn insert(&self, record: &VerificationCode) -> DomainResult<()> {
        let mut records = self.records.lock().await;
        records
            .entry(record.phone.clone())
            .or_default()
            .push(record.clone());
        Ok(())
    }

    async fn find_latest(&self, phone: &str) -> DomainResult<Option<VerificationCode>> {
        let records = self.records.lock().await;
        Ok(records
            .get(phone)
            .and_then(|v| v.iter().max_by_key(|r| r.created_at))
            .cloned())
    }

    async fn find_active(
        &self,
        phone: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<Option<VerificationCode>> {
        let records = self.records.lock().await;
        Ok(records
            .get(phone)
            .and_then(|v| {
                v.iter()
                    .filter(|r| r.expires_at > now)
                    .max_by_key(|r| r.created_at)
            })
            .cloned())
    }

    async fn increment_attempts(&self, id: Uuid) -> DomainResult<Option<i32>> {
        let mut records = self.records.lock().await;
        for list in records.values_mut() {
            if let Some(record) = list.iter_mut().find(|r| r.id == id) {
                record.attempts += 1;
                return Ok(Some(record.attempts));
            }
        }
        Ok(None)
    }

    async fn delete(&self, id: Uuid) -> DomainResult<bool> {
        let mut records = self.records.lock().await;
        for list in records.values_mut() {
            let before = list.len();
            list.retain(|r| r.id != id);
            if list.len() < before {
                return Ok(true);
            }
        }
        Ok(false)
    }
}
