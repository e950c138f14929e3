use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

const PREFIX: &str = "sha256=";

#[derive(Debug, Error)]
pub enum VerifySignatureError {
    #[error("Missing X-Hub-Signature-256 header")]
    Missing,

    #[error("Malformed signature header")]
    Malformed,

    #[error("Webhook secret is not a usable HMAC key")]
    InvalidKey,

    #[error("Signature does not match payload")]
    Mismatch,
}

/// Computes the `X-Hub-Signature-256` value GitHub sends for `body`.
pub fn sign(secret: &str, body: &[u8]) -> Result<String, VerifySignatureError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|_| VerifySignatureError::InvalidKey)?;
    mac.update(body);
    Ok(format!("{PREFIX}{}", hex::encode(mac.finalize().into_bytes())))
}

/// Checks `header` against the HMAC of `body`. Comparison is constant time.
pub fn verify_signature(
    secret: &str,
    body: &[u8],
    header: Option<&str>,
) -> Result<(), VerifySignatureError> {
    let header = header.ok_or(VerifySignatureError::Missing)?;
    let expected = header
        .strip_prefix(PREFIX)
        .and_then(|hex_digest| hex::decode(hex_digest).ok())
        .ok_or(VerifySignatureError::Malformed)?;

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|_| VerifySignatureError::InvalidKey)?;
    mac.update(body);
    mac.verify_slice(&expected)
        .map_err(|_| VerifySignatureError::Mismatch)
}
