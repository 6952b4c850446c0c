//! Domain-specific error types and error handling.
//!
//! Every failure in this subsystem is per-request: errors are reported to
//! the caller as typed values with an HTTP-status-equivalent classification
//! for the boundary layer to render. Nothing here is fatal to the process.

use thiserror::Error;

/// Authentication-related errors with bilingual messages
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid phone format: {phone} | 无效的手机号码格式: {phone}")]
    InvalidPhoneFormat { phone: String },

    #[error("Too many requests. Please retry in {retry_after_seconds} seconds | 请求太频繁，请在 {retry_after_seconds} 秒后重试")]
    CodeCooldown { retry_after_seconds: i64 },

    #[error("Verification code expired or not issued. Please request a new code | 验证码已过期，请重新获取")]
    NoActiveCode,

    #[error("Invalid verification code | 验证码错误")]
    CodeMismatch,

    #[error("Maximum attempts exceeded. Please request a new code | 尝试次数过多，请重新获取验证码")]
    MaxAttemptsExceeded,

    #[error("User not found | 用户不存在")]
    UserNotFound,

    #[error("Logout is disabled | 退出功能已禁用")]
    LogoutDisabled,

    #[error("SMS rejected by provider: {message} | 短信被服务商拒绝: {message}")]
    SmsRejected { message: String },

    #[error("SMS service failure: {message} | 短信服务失败: {message}")]
    SmsServiceFailure { message: String },

    #[error("SMS service misconfigured: {message} | 短信服务配置不完整: {message}")]
    SmsMisconfigured { message: String },
}

impl AuthError {
    /// HTTP-status-equivalent classification for the boundary layer
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidPhoneFormat { .. } => 400,
            Self::CodeCooldown { .. } => 429,
            Self::NoActiveCode => 400,
            Self::CodeMismatch => 400,
            Self::MaxAttemptsExceeded => 429,
            Self::UserNotFound => 404,
            Self::LogoutDisabled => 403,
            Self::SmsRejected { .. } => 502,
            Self::SmsServiceFailure { .. } => 502,
            Self::SmsMisconfigured { .. } => 500,
        }
    }

    /// Stable error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidPhoneFormat { .. } => "INVALID_PHONE_FORMAT",
            Self::CodeCooldown { .. } => "CODE_COOLDOWN",
            Self::NoActiveCode => "NO_ACTIVE_CODE",
            Self::CodeMismatch => "CODE_MISMATCH",
            Self::MaxAttemptsExceeded => "MAX_ATTEMPTS_EXCEEDED",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::LogoutDisabled => "LOGOUT_DISABLED",
            Self::SmsRejected { .. } => "SMS_REJECTED",
            Self::SmsServiceFailure { .. } => "SMS_SERVICE_FAILURE",
            Self::SmsMisconfigured { .. } => "SMS_MISCONFIGURED",
        }
    }
}

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to the authentication error taxonomy
    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl DomainError {
    /// HTTP-status-equivalent classification
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation { .. } => 400,
            Self::Internal { .. } => 500,
            Self::Auth(e) => e.status_code(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

/// Helper to extract the English half of a bilingual error message
pub fn extract_english_message(message: &str) -> &str {
    message.split(" | ").next().unwrap_or(message)
}

/// Helper to extract the Chinese half of a bilingual error message
pub fn extract_chinese_message(message: &str) -> &str {
    message.split(" | ").nth(1).unwrap_or(message)
}
