//! HMAC-SHA512 request signing.
//!
//! Private endpoints authenticate with a signature over the exact bytes
//! that go on the wire:
//!
//! ```text
//! API-Sign = base64(HMAC-SHA512(path + SHA256(nonce + body), base64decode(secret)))
//! ```
//!
//! `path` is the URL path of the request (e.g. `/0/private/AddOrder`),
//! `nonce` is the decimal nonce string, and `body` is the form-encoded POST
//! body. The SHA-256 digest is appended to the path as raw bytes, not hex.
//! Because the body is part of the signed payload, the signed string and the
//! transmitted string must be byte-identical, including parameter order.

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256, Sha512};

use crate::error::ClientError;

type HmacSha512 = Hmac<Sha512>;

/// Sign a private request.
///
/// `secret` is the base64-encoded API secret as issued by the exchange.
/// Returns the base64 signature for the `API-Sign` header.
pub fn sign(path: &str, nonce: u64, body: &str, secret: &str) -> Result<String, ClientError> {
    let key = BASE64
        .decode(secret)
        .map_err(|_| ClientError::Configuration("API secret is not valid base64".to_string()))?;

    let mut inner = Sha256::new();
    inner.update(nonce.to_string().as_bytes());
    inner.update(body.as_bytes());
    let digest = inner.finalize();

    let mut mac = HmacSha512::new_from_slice(&key)
        .map_err(|e| ClientError::Configuration(format!("unusable HMAC key: {e}")))?;
    mac.update(path.as_bytes());
    mac.update(&digest);

    Ok(BASE64.encode(mac.finalize().into_bytes()))
}
