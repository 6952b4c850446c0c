//! SMS gateway seam for outbound verification messages

use async_trait::async_trait;

/// Normalized result of one outbound notification attempt.
///
/// Gateways translate their provider's response shape into this type and
/// never let a transport fault propagate as an error across the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SmsOutcome {
    /// The provider accepted the message
    Delivered {
        /// Provider-assigned id for the accepted message, when available
        message_id: Option<String>,
    },
    /// The provider refused the message (bad template, blacklist, rate limit)
    Rejected {
        /// Provider response code
        code: String,
        /// Human-readable provider message
        message: String,
    },
    /// The request never completed: timeout, connection failure, malformed response
    TransportError { message: String },
    /// The gateway is missing required credentials or configuration.
    ///
    /// Distinguished from `TransportError` so operators can tell a broken
    /// deployment from a flaky provider.
    Misconfigured { message: String },
}

impl SmsOutcome {
    /// Whether the provider accepted the message
    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered { .. })
    }
}

/// Outbound SMS gateway.
///
/// Implementations are immutable after construction and freely shared
/// across concurrent callers. They never retry internally; retry policy
/// belongs to the caller.
#[async_trait]
pub trait SmsGateway: Send + Sync {
    /// Send a verification code to the phone, returning a normalized outcome
    async fn send(&self, phone: &str, code: &str) -> SmsOutcome;

    /// Name of the underlying driver (for logging and diagnostics)
    fn driver_name(&self) -> &'static str;
}
