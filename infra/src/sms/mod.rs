//! SMS provider gateways
//!
//! Each provider implements the domain's `SmsGateway` trait and folds its
//! own response taxonomy into `SmsOutcome`. Driver selection happens once
//! at composition time via [`create_sms_gateway`]; the rest of the system
//! only ever sees the trait object.

use std::sync::Arc;

use pa_core::services::verification::SmsGateway;
use pa_shared::config::{SmsConfig, SmsDriver};

pub mod aliyun;
pub mod dxsms;
pub mod log_sms;
pub mod signing;

pub use aliyun::AliyunSmsGateway;
pub use dxsms::DxSmsGateway;
pub use log_sms::LogSmsGateway;

/// Create the SMS gateway selected by configuration.
///
/// A provider whose HTTP client cannot be built falls back to the log
/// driver with an error in the log, so a bad TLS or proxy environment
/// degrades to no-delivery instead of refusing to start.
pub fn create_sms_gateway(config: &SmsConfig, product: &str) -> Arc<dyn SmsGateway> {
    match config.driver {
        SmsDriver::Log => Arc::new(LogSmsGateway::new()),
        SmsDriver::Aliyun => match AliyunSmsGateway::new(config.aliyun.clone(), product) {
            Ok(gateway) => Arc::new(gateway),
            Err(err) => {
                tracing::error!(error = %err, "Failed to initialize Aliyun SMS gateway");
                tracing::warn!("Falling back to log SMS driver");
                Arc::new(LogSmsGateway::new())
            }
        },
        SmsDriver::DxSms => match DxSmsGateway::new(config.dxsms.clone(), product) {
            Ok(gateway) => Arc::new(gateway),
            Err(err) => {
                tracing::error!(error = %err, "Failed to initialize DX SMS gateway");
                tracing::warn!("Falling back to log SMS driver");
                Arc::new(LogSmsGateway::new())
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_honors_driver_selection() {
        let mut config = SmsConfig::default();
        assert_eq!(create_sms_gateway(&config, "app").driver_name(), "log");

        config.driver = SmsDriver::Aliyun;
        assert_eq!(create_sms_gateway(&config, "app").driver_name(), "aliyun");

        config.driver = SmsDriver::DxSms;
        assert_eq!(create_sms_gateway(&config, "app").driver_name(), "dxsms");
    }
}
