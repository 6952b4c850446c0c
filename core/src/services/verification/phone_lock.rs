//! Per-phone mutual exclusion for lifecycle state transitions.
//!
//! The cooldown check in issuance and the attempt-check/consume sequence in
//! verification are read-check-write sequences; this map serializes them
//! per phone number so concurrent requests for the same phone cannot
//! interleave. Requests for different phones never contend.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex as StdMutex;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Map of phone number to an async mutex guarding its lifecycle transitions
#[derive(Default)]
pub struct PhoneLockMap {
    locks: StdMutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl PhoneLockMap {
    /// Create an empty lock map
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock for a phone number, waiting if another request
    /// for the same phone holds it.
    ///
    /// Idle entries are evicted on every acquisition so the map tracks
    /// phones with in-flight requests, not every phone ever seen. An entry
    /// is idle when the map holds the only reference to its mutex: guards
    /// and waiters each hold a clone of the `Arc`.
    pub async fn acquire(&self, phone: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().expect("phone lock map poisoned");
            locks.retain(|key, lock| key == phone || Arc::strong_count(lock) > 1);
            Arc::clone(locks.entry(phone.to_string()).or_default())
        };
        lock.lock_owned().await
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.locks.lock().expect("phone lock map poisoned").len()
    }
}
