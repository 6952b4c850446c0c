//! Mock SMS gateway for testing the verification lifecycle

use async_trait::async_trait;
use std::sync::Mutex;

use crate::services::verification::traits::{SmsGateway, SmsOutcome};

/// Recording SMS gateway: keeps every (phone, code) pair instead of
/// performing I/O, and returns a configurable outcome.
pub struct MockSmsGateway {
    sent: Mutex<Vec<(String, String)>>,
    outcome: SmsOutcome,
}

impl MockSmsGateway {
    /// Gateway that accepts every message
    pub fn delivering() -> Self {
        Self::with_outcome(SmsOutcome::Delivered {
            message_id: Some("mock-msg-1".to_string()),
        })
    }

    /// Gateway that returns the given outcome for every send
    pub fn with_outcome(outcome: SmsOutcome) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            outcome,
        }
    }

    /// The most recent code recorded for a phone
    pub fn sent_code(&self, phone: &str) -> Option<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(p, _)| p == phone)
            .map(|(_, c)| c.clone())
    }

    /// Number of send calls observed
    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl SmsGateway for MockSmsGateway {
    async fn send(&self, phone: &str, code: &str) -> SmsOutcome {
        self.sent
            .lock()
            .unwrap()
            .push((phone.to_string(), code.to_string()));
        self.outcome.clone()
    }

    fn driver_name(&self) -> &'static str {
        "mock"
    }
}
