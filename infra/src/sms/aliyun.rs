//! Aliyun SMS gateway (POP signed-query protocol)

use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};
use uuid::Uuid;

use pa_core::services::verification::{SmsGateway, SmsOutcome};
use pa_shared::config::AliyunConfig;
use pa_shared::utils::phone::mask_phone_number;

use super::signing::sign_query_params;

const ENDPOINT: &str = "http://dysmsapi.aliyuncs.com/";
const API_VERSION: &str = "2017-05-25";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// SendSms response envelope
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SendSmsResponse {
    code: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    biz_id: Option<String>,
    #[serde(default)]
    request_id: Option<String>,
}

/// Gateway speaking the Aliyun Dysms API.
///
/// Every request carries a full signed query: sorted parameters, RFC 3986
/// encoding, HMAC-SHA1 signature. The provider answers `Code: "OK"` for
/// accepted messages; any other code is a rejection, not a transport
/// fault.
pub struct AliyunSmsGateway {
    config: AliyunConfig,
    /// Product name interpolated into the message template
    product: String,
    client: reqwest::Client,
}

impl AliyunSmsGateway {
    /// Create a gateway with its own HTTP client
    pub fn new(config: AliyunConfig, product: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()?;
        Ok(Self {
            config,
            product: product.into(),
            client,
        })
    }

    fn missing_credentials(&self) -> Option<&'static str> {
        if self.config.access_key_id.is_empty() {
            Some("access_key_id")
        } else if self.config.access_key_secret.is_empty() {
            Some("access_key_secret")
        } else if self.config.sign_name.is_empty() {
            Some("sign_name")
        } else {
            None
        }
    }

    /// Assemble the unsigned request parameters
    fn build_params(
        &self,
        phone: &str,
        code: &str,
        nonce: &str,
        timestamp: &str,
    ) -> Vec<(String, String)> {
        let template_param = serde_json::json!({
            "code": code,
            "product": self.product,
        })
        .to_string();

        vec![
            ("AccessKeyId".to_string(), self.config.access_key_id.clone()),
            ("Action".to_string(), "SendSms".to_string()),
            ("Format".to_string(), "JSON".to_string()),
            ("PhoneNumbers".to_string(), phone.to_string()),
            ("RegionId".to_string(), self.config.region_id.clone()),
            ("SignName".to_string(), self.config.sign_name.clone()),
            ("SignatureMethod".to_string(), "HMAC-SHA1".to_string()),
            ("SignatureNonce".to_string(), nonce.to_string()),
            ("SignatureVersion".to_string(), "1.0".to_string()),
            ("TemplateCode".to_string(), self.config.template_code.clone()),
            ("TemplateParam".to_string(), template_param),
            ("Timestamp".to_string(), timestamp.to_string()),
            ("Version".to_string(), API_VERSION.to_string()),
        ]
    }
}

#[async_trait]
impl SmsGateway for AliyunSmsGateway {
    async fn send(&self, phone: &str, code: &str) -> SmsOutcome {
        if let Some(field) = self.missing_credentials() {
            return SmsOutcome::Misconfigured {
                message: format!("Aliyun SMS credentials incomplete: {} is empty", field),
            };
        }

        let nonce = Uuid::new_v4().to_string();
        let timestamp = Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();
        let mut params = self.build_params(phone, code, &nonce, &timestamp);
        let signature = sign_query_params("GET", &params, &self.config.access_key_secret);
        params.push(("Signature".to_string(), signature));

        let response = match self.client.get(ENDPOINT).query(&params).send().await {
            Ok(response) => response,
            Err(err) => {
                return SmsOutcome::TransportError {
                    message: format!("Aliyun request failed: {}", err),
                };
            }
        };

        let body: SendSmsResponse = match response.json().await {
            Ok(body) => body,
            Err(err) => {
                return SmsOutcome::TransportError {
                    message: format!("Aliyun response unreadable: {}", err),
                };
            }
        };

        if body.code == "OK" {
            debug!(
                phone = %mask_phone_number(phone),
                request_id = body.request_id.as_deref().unwrap_or(""),
                "Aliyun accepted SMS"
            );
            SmsOutcome::Delivered {
                message_id: body.biz_id,
            }
        } else {
            warn!(
                phone = %mask_phone_number(phone),
                provider_code = %body.code,
                "Aliyun rejected SMS"
            );
            SmsOutcome::Rejected {
                code: body.code,
                message: body.message,
            }
        }
    }

    fn driver_name(&self) -> &'static str {
        "aliyun"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AliyunConfig {
        AliyunConfig {
            access_key_id: "testKeyId".to_string(),
            access_key_secret: "testSecret".to_string(),
            sign_name: "杭州网".to_string(),
            template_code: "SMS_69010036".to_string(),
            region_id: "cn-hangzhou".to_string(),
        }
    }

    #[test]
    fn test_build_params_signs_to_known_vector() {
        let gateway = AliyunSmsGateway::new(test_config(), "杭州网").unwrap();
        let params = gateway.build_params(
            "13800138000",
            "123456",
            "45e25e9b-0a6f-4070-8c85-2956eda1b466",
            "2024-01-01T12:00:00Z",
        );
        assert_eq!(
            sign_query_params("GET", &params, "testSecret"),
            "HJQyAnZX5i/3W9yNbMdfENk68m0="
        );
    }

    #[test]
    fn test_template_param_carries_code_and_product() {
        let gateway = AliyunSmsGateway::new(test_config(), "杭州网").unwrap();
        let params = gateway.build_params("13800138000", "654321", "n", "t");
        let template_param = params
            .iter()
            .find(|(k, _)| k == "TemplateParam")
            .map(|(_, v)| v.clone())
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&template_param).unwrap();
        assert_eq!(parsed["code"], "654321");
        assert_eq!(parsed["product"], "杭州网");
    }

    #[tokio::test]
    async fn test_missing_credentials_reported_as_misconfigured() {
        let gateway = AliyunSmsGateway::new(AliyunConfig::default(), "app").unwrap();
        let outcome = gateway.send("13800138000", "123456").await;
        assert!(matches!(
            outcome,
            SmsOutcome::Misconfigured { ref message } if message.contains("access_key_id")
        ));
    }

    #[test]
    fn test_response_parsing() {
        let ok: SendSmsResponse = serde_json::from_str(
            r#"{"Code":"OK","Message":"OK","BizId":"900619746936498440^0","RequestId":"F655A8D5"}"#,
        )
        .unwrap();
        assert_eq!(ok.code, "OK");
        assert_eq!(ok.biz_id.as_deref(), Some("900619746936498440^0"));

        let rejected: SendSmsResponse = serde_json::from_str(
            r#"{"Code":"isv.BUSINESS_LIMIT_CONTROL","Message":"触发分钟级流控","RequestId":"F655A8D5"}"#,
        )
        .unwrap();
        assert_eq!(rejected.code, "isv.BUSINESS_LIMIT_CONTROL");
        assert!(rejected.biz_id.is_none());
    }
}
