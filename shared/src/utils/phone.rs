//! Phone number utilities

use once_cell::sync::Lazy;
use regex::Regex;

// Chinese mobile phone number regex
static CHINA_MOBILE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^1[3-9]\d{9}$").unwrap());

/// Normalize a phone number by removing common formatting characters
pub fn normalize_phone_number(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

/// Check if a phone number is a valid Chinese mobile number
pub fn is_valid_phone(phone: &str) -> bool {
    let normalized = normalize_phone_number(phone);
    CHINA_MOBILE_REGEX.is_match(&normalized)
}

/// Strip a leading `+` from an international prefix (`+8613812345678` -> `8613812345678`)
pub fn strip_international_prefix(phone: &str) -> &str {
    phone.strip_prefix('+').unwrap_or(phone)
}

/// Mask a phone number for display and logging (e.g. 138****5678)
pub fn mask_phone_number(phone: &str) -> String {
    let normalized = normalize_phone_number(phone);
    if normalized.len() >= 7 {
        format!(
            "{}****{}",
            &normalized[0..3],
            &normalized[normalized.len() - 4..]
        )
    } else {
        "****".to_string()
    }
}
