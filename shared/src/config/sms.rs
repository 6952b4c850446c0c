//! SMS driver configuration

use serde::{Deserialize, Serialize};

/// Available SMS drivers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SmsDriver {
    /// Log-only driver for local development; no real SMS is sent
    Log,
    /// Aliyun SMS (HMAC-SHA1 signed query protocol)
    Aliyun,
    /// DX SMS (MD5 authenticator header protocol)
    DxSms,
}

impl SmsDriver {
    /// Parse a driver name from configuration, defaulting to `Log` for
    /// unknown values
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "aliyun" => Self::Aliyun,
            "dxsms" => Self::DxSms,
            _ => Self::Log,
        }
    }
}

/// Aliyun SMS credentials and template settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AliyunConfig {
    /// Access key id
    pub access_key_id: String,
    /// Access key secret used for request signing
    pub access_key_secret: String,
    /// SMS sign name shown to the recipient
    pub sign_name: String,
    /// Template code for the verification message
    #[serde(default = "default_template_code")]
    pub template_code: String,
    /// Region id
    #[serde(default = "default_region_id")]
    pub region_id: String,
}

fn default_template_code() -> String {
    String::from("SMS_69010036")
}

fn default_region_id() -> String {
    String::from("cn-hangzhou")
}

/// DX SMS credentials
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DxSmsConfig {
    /// Service interface id
    pub siid: String,
    /// Account name
    pub user: String,
    /// Interface key used to derive the request authenticator
    pub api_key: String,
    /// Capability service endpoint
    #[serde(default = "default_dx_endpoint")]
    pub endpoint: String,
}

fn default_dx_endpoint() -> String {
    String::from("http://smservice.zjhcsoft.com/smsservice/httpservices/capService")
}

/// SMS driver selection and per-provider credentials
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SmsConfig {
    /// Which driver to use
    #[serde(default = "default_driver")]
    pub driver: SmsDriver,

    /// Aliyun credentials (used when `driver` is `aliyun`)
    #[serde(default)]
    pub aliyun: AliyunConfig,

    /// DX credentials (used when `driver` is `dxsms`)
    #[serde(default)]
    pub dxsms: DxSmsConfig,
}

fn default_driver() -> SmsDriver {
    SmsDriver::Log
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self {
            driver: default_driver(),
            aliyun: AliyunConfig::default(),
            dxsms: DxSmsConfig::default(),
        }
    }
}

impl SmsConfig {
    /// Load SMS settings from environment variables
    pub fn from_env() -> Self {
        let driver = std::env::var("PHONE_AUTH_SMS_DRIVER")
            .map(|v| SmsDriver::from_name(&v))
            .unwrap_or_else(|_| default_driver());

        Self {
            driver,
            aliyun: AliyunConfig {
                access_key_id: std::env::var("ALIYUN_ACCESS_KEY_ID").unwrap_or_default(),
                access_key_secret: std::env::var("ALIYUN_ACCESS_KEY_SECRET").unwrap_or_default(),
                sign_name: std::env::var("ALIYUN_SMS_SIGN_NAME").unwrap_or_default(),
                template_code: std::env::var("ALIYUN_SMS_TEMPLATE_CODE")
                    .unwrap_or_else(|_| default_template_code()),
                region_id: std::env::var("ALIYUN_REGION_ID")
                    .unwrap_or_else(|_| default_region_id()),
            },
            dxsms: DxSmsConfig {
                siid: std::env::var("DXSMS_SIID").unwrap_or_default(),
                user: std::env::var("DXSMS_USER").unwrap_or_default(),
                api_key: std::env::var("DXSMS_API_KEY").unwrap_or_default(),
                endpoint: std::env::var("DXSMS_ENDPOINT").unwrap_or_else(|_| default_dx_endpoint()),
            },
        }
    }
}
