//! Request signing for SMS provider APIs
//!
//! Two incompatible schemes live here:
//!
//! - Aliyun POP: RFC 3986 percent-encoding, sorted canonical query,
//!   HMAC-SHA1 over `METHOD&%2F&<encoded query>` keyed by the access key
//!   secret plus a trailing `&`, base64 output.
//! - DX capability service: MD5 over the concatenation of timestamp,
//!   transaction id, streaming number, and the interface key, base64 of
//!   the raw 16-byte digest.
//!
//! Both are pure functions so they can be pinned against known vectors.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

/// Percent-encode per RFC 3986 with `-`, `_`, `.`, `~` unreserved.
///
/// This matches the POP signature encoding exactly: space becomes `%20`
/// (never `+`), `*` becomes `%2A`, and hex digits are uppercase.
pub fn percent_encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Build the sorted, percent-encoded canonical query string
pub fn canonical_query(params: &[(String, String)]) -> String {
    let mut sorted: Vec<&(String, String)> = params.iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(&b.0));
    sorted
        .iter()
        .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Compute the base64 HMAC-SHA1 signature over a parameter set.
///
/// The signing key is the secret with `&` appended. The `Signature`
/// parameter itself must not be in `params`.
pub fn sign_query_params(method: &str, params: &[(String, String)], secret: &str) -> String {
    let string_to_sign = format!(
        "{}&{}&{}",
        method,
        percent_encode("/"),
        percent_encode(&canonical_query(params))
    );

    let mut mac = HmacSha1::new_from_slice(format!("{}&", secret).as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(string_to_sign.as_bytes());
    BASE64.encode(mac.finalize().into_bytes())
}

/// Derive the DX request authenticator.
///
/// `md5(timestamp + transaction_id + streaming_no + api_key)`, base64 of
/// the raw digest bytes (not the hex form).
pub fn derive_authenticator(
    timestamp: &str,
    transaction_id: &str,
    streaming_no: &str,
    api_key: &str,
) -> String {
    let digest = md5::compute(format!(
        "{}{}{}{}",
        timestamp, transaction_id, streaming_no, api_key
    ));
    BASE64.encode(digest.0)
}
