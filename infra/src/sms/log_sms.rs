//! Log-only SMS gateway for local development

use async_trait::async_trait;
use tracing::info;

use pa_core::services::verification::{SmsGateway, SmsOutcome};
use pa_shared::utils::phone::mask_phone_number;

/// Gateway that writes the message to the log instead of sending it.
///
/// Always reports delivery. The code itself is logged unmasked so a
/// developer can complete the login flow without a real provider; never
/// select this driver in production.
#[derive(Debug, Default)]
pub struct LogSmsGateway;

impl LogSmsGateway {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SmsGateway for LogSmsGateway {
    async fn send(&self, phone: &str, code: &str) -> SmsOutcome {
        info!(
            phone = %mask_phone_number(phone),
            code,
            event = "sms_logged",
            "SMS suppressed by log driver"
        );
        SmsOutcome::Delivered { message_id: None }
    }

    fn driver_name(&self) -> &'static str {
        "log"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_log_gateway_always_delivers() {
        let gateway = LogSmsGateway::new();
        let outcome = gateway.send("13800138000", "123456").await;
        assert!(outcome.is_delivered());
        assert_eq!(gateway.driver_name(), "log");
    }
}
