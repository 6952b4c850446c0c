//! DX SMS gateway (capability-service JSON protocol)

use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use pa_core::services::verification::{SmsGateway, SmsOutcome};
use pa_shared::config::DxSmsConfig;
use pa_shared::utils::phone::{is_valid_phone, mask_phone_number};

use super::signing::derive_authenticator;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
/// The capability service accepts at most this many comma-separated recipients
const MAX_RECIPIENTS: usize = 50;
const MAX_CONTENT_BYTES: usize = 1024;
const ACCEPTED: &str = "0000";

/// Capability service request body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CapServiceRequest {
    siid: String,
    user: String,
    streaming_no: String,
    time_stamp: String,
    #[serde(rename = "transactionID")]
    transaction_id: String,
    authenticator: String,
    mobile: String,
    content: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CapServiceResponse {
    ret_code: String,
    #[serde(default)]
    ret_msg: String,
    #[serde(rename = "transactionID", default)]
    transaction_id: Option<String>,
}

/// Gateway speaking the DX capability service.
///
/// Requests are authenticated with a per-request MD5 authenticator
/// derived from a 17-digit timestamp and two 24-digit sequence numbers.
/// The provider answers `retCode: "0000"` for accepted messages; every
/// other code in its taxonomy is a rejection.
pub struct DxSmsGateway {
    config: DxSmsConfig,
    /// Product name interpolated into the message body
    product: String,
    client: reqwest::Client,
}

impl DxSmsGateway {
    /// Create a gateway with its own HTTP client
    pub fn new(config: DxSmsConfig, product: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            config,
            product: product.into(),
            client,
        })
    }

    fn message_content(&self, code: &str) -> String {
        format!(
            "验证码{}，您正在登录{}，请不要泄露您的验证码给别人！",
            code, self.product
        )
    }

    /// 17-digit timestamp: `YYYYMMDDHHMMSSmmm`
    fn generate_timestamp() -> String {
        Utc::now().format("%Y%m%d%H%M%S%3f").to_string()
    }

    /// 24-digit sequence number: 14-digit timestamp plus 10 random digits.
    ///
    /// Used for both the transaction id and the streaming number; the
    /// provider deduplicates on the streaming number.
    fn generate_sequence() -> String {
        let mut rng = rand::thread_rng();
        format!(
            "{}{:06}{:04}",
            Utc::now().format("%Y%m%d%H%M%S"),
            rng.gen_range(0..1_000_000u32),
            rng.gen_range(0..10_000u32)
        )
    }

    /// Pre-flight checks mirroring the provider's own request validation
    fn validate(&self, mobile: &str, content: &str) -> Result<(), SmsOutcome> {
        if self.config.siid.is_empty() || self.config.user.is_empty() || self.config.api_key.is_empty()
        {
            return Err(SmsOutcome::Misconfigured {
                message: "DX SMS credentials incomplete: siid, user and api_key are required"
                    .to_string(),
            });
        }

        let recipients: Vec<&str> = mobile.split(',').map(str::trim).collect();
        if recipients.is_empty() || mobile.is_empty() {
            return Err(SmsOutcome::Rejected {
                code: "preflight".to_string(),
                message: "no recipient given".to_string(),
            });
        }
        if recipients.len() > MAX_RECIPIENTS {
            return Err(SmsOutcome::Rejected {
                code: "preflight".to_string(),
                message: format!("at most {} recipients per request", MAX_RECIPIENTS),
            });
        }
        for phone in &recipients {
            if !is_valid_phone(phone) {
                return Err(SmsOutcome::Rejected {
                    code: "preflight".to_string(),
                    message: format!("invalid recipient: {}", mask_phone_number(phone)),
                });
            }
        }

        if content.is_empty() {
            return Err(SmsOutcome::Rejected {
                code: "preflight".to_string(),
                message: "empty message content".to_string(),
            });
        }
        if content.len() > MAX_CONTENT_BYTES {
            return Err(SmsOutcome::Rejected {
                code: "preflight".to_string(),
                message: format!("message content exceeds {} bytes", MAX_CONTENT_BYTES),
            });
        }
        Ok(())
    }

    fn build_request(&self, mobile: &str, content: &str) -> CapServiceRequest {
        let time_stamp = Self::generate_timestamp();
        let transaction_id = Self::generate_sequence();
        let streaming_no = Self::generate_sequence();
        let authenticator = derive_authenticator(
            &time_stamp,
            &transaction_id,
            &streaming_no,
            &self.config.api_key,
        );

        CapServiceRequest {
            siid: self.config.siid.clone(),
            user: self.config.user.clone(),
            streaming_no,
            time_stamp,
            transaction_id,
            authenticator,
            mobile: mobile.to_string(),
            content: content.to_string(),
        }
    }
}

/// Provider return-code descriptions
pub fn ret_code_message(ret_code: &str) -> &'static str {
    match ret_code {
        "0000" => "accepted",
        "0101" => "malformed request packet",
        "0200" => "database error",
        "0401" => "duplicate streaming number",
        "0402" => "no subscription relationship",
        "0403" => "authentication failed (ip not allowed or bad key)",
        "0404" => "recipient blacklisted",
        "0408" => "illegal keyword in content",
        "0501" => "invalid request parameters",
        "0801" => "sms rate limit reached",
        "0806" => "key missing or wrong encryption algorithm",
        "0901" => "other provider error",
        _ => "unknown return code",
    }
}

#[async_trait]
impl SmsGateway for DxSmsGateway {
    async fn send(&self, phone: &str, code: &str) -> SmsOutcome {
        let content = self.message_content(code);
        if let Err(outcome) = self.validate(phone, &content) {
            return outcome;
        }

        let request = self.build_request(phone, &content);
        let response = match self
            .client
            .post(&self.config.endpoint)
            .json(&request)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                return SmsOutcome::TransportError {
                    message: format!("DX request failed: {}", err),
                };
            }
        };

        if !response.status().is_success() {
            return SmsOutcome::TransportError {
                message: format!("DX responded with HTTP {}", response.status()),
            };
        }

        let body: CapServiceResponse = match response.json().await {
            Ok(body) => body,
            Err(err) => {
                return SmsOutcome::TransportError {
                    message: format!("DX response unreadable: {}", err),
                };
            }
        };

        if body.ret_code == ACCEPTED {
            debug!(
                phone = %mask_phone_number(phone),
                transaction_id = body.transaction_id.as_deref().unwrap_or(""),
                "DX accepted SMS"
            );
            SmsOutcome::Delivered {
                message_id: body.transaction_id,
            }
        } else {
            warn!(
                phone = %mask_phone_number(phone),
                provider_code = %body.ret_code,
                "DX rejected SMS"
            );
            let message = if body.ret_msg.is_empty() {
                ret_code_message(&body.ret_code).to_string()
            } else {
                body.ret_msg
            };
            SmsOutcome::Rejected {
                code: body.ret_code,
                message,
            }
        }
    }

    fn driver_name(&self) -> &'static str {
        "dxsms"
    }
}
