//! Keyed message authentication with HMAC-SHA256.
//!
//! Signatures are deterministic and hex-encoded. Verification recomputes
//! the signature and compares in constant time through the MAC's own
//! verifier; a signature of the wrong length or with invalid hex is
//! rejected as `false` without an error.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::debug;

/// Size of a signature in bytes. The hex form is twice this length.
pub const MAC_SIZE: usize = 32;

type HmacSha256 = Hmac<Sha256>;

/// Computes the HMAC-SHA256 signature of `data` under `secret`.
///
/// Deterministic: the same data and secret always produce the same
/// signature. The secret may be any length, including empty.
///
/// # Returns
///
/// The signature as 64 lowercase hex characters.
///
/// # Examples
///
/// ```
/// use chitin::mac::{generate_hmac, MAC_SIZE};
///
/// let signature = generate_hmac(b"payload-v1", b"shared secret");
/// assert_eq!(signature.len(), MAC_SIZE * 2);
/// ```
pub fn generate_hmac(data: &[u8], secret: &[u8]) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret).expect("HMAC-SHA256 accepts keys of any length");
    mac.update(data);
    hex::encode(mac.finalize().into_bytes())
}

/// Verifies an HMAC-SHA256 signature.
///
/// Recomputes the expected signature and compares in constant time. This
/// function never returns an error: invalid hex, a wrong-length
/// signature, and a genuine mismatch all yield `false`. A length
/// mismatch is rejected up front; the byte comparison itself does not
/// leak where the signatures first differ.
///
/// # Examples
///
/// ```
/// use chitin::mac::{generate_hmac, verify_hmac};
///
/// let signature = generate_hmac(b"payload-v1", b"shared secret");
/// assert!(verify_hmac(b"payload-v1", &signature, b"shared secret"));
/// assert!(!verify_hmac(b"payload-v2", &signature, b"shared secret"));
/// ```
pub fn verify_hmac(data: &[u8], signature: &str, secret: &[u8]) -> bool {
    let signature_bytes = match hex::decode(signature) {
        Ok(bytes) => bytes,
        Err(_) => {
            debug!("signature is not valid hex; rejecting verification");
            return false;
        }
    };
    let mut mac =
        HmacSha256::new_from_slice(secret).expect("HMAC-SHA256 accepts keys of any length");
    mac.update(data);
    mac.verify_slice(&signature_bytes).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_hmac_deterministic() {
        let first = generate_hmac(b"data", b"secret");
        let second = generate_hmac(b"data", b"secret");
        assert_eq!(first, second);
        assert_eq!(first.len(), MAC_SIZE * 2);
    }

    #[test]
    fn test_generate_hmac_known_answer() {
        // RFC 2202-style vector for HMAC-SHA256.
        let signature = generate_hmac(b"The quick brown fox jumps over the lazy dog", b"key");
        assert_eq!(
            signature,
            "f7bc83f430538424b13298e6aa6fb143ef4d59a14946175997479dbc2d1a3cd8"
        );
    }

    #[test]
    fn test_generate_hmac_empty_inputs() {
        let signature = generate_hmac(b"", b"");
        assert_eq!(
            signature,
            "b613679a0814d9ec772f95d778c35fc5ff1697c493715653c6c712144292c5ad"
        );
    }

    #[test]
    fn test_verify_hmac_roundtrip() {
        let signature = generate_hmac(b"data", b"secret");
        assert!(verify_hmac(b"data", &signature, b"secret"));
    }

    #[test]
    fn test_verify_hmac_rejects_changed_data() {
        let signature = generate_hmac(b"data", b"secret");
        assert!(!verify_hmac(b"datum", &signature, b"secret"));
    }

    #[test]
    fn test_verify_hmac_rejects_changed_secret() {
        let signature = generate_hmac(b"data", b"secret");
        assert!(!verify_hmac(b"data", &signature, b"other secret"));
    }

    #[test]
    fn test_verify_hmac_rejects_invalid_hex() {
        assert!(!verify_hmac(b"data", "not hex at all", b"secret"));
        assert!(!verify_hmac(b"data", "abc", b"secret"));
    }

    #[test]
    fn test_verify_hmac_rejects_wrong_length_signature() {
        let signature = generate_hmac(b"data", b"secret");
        let truncated = &signature[..32];
        assert!(!verify_hmac(b"data", truncated, b"secret"));
        let extended = format!("{}00", signature);
        assert!(!verify_hmac(b"data", &extended, b"secret"));
    }

    #[test]
    fn test_verify_hmac_accepts_uppercase_hex() {
        let signature = generate_hmac(b"data", b"secret").to_uppercase();
        assert!(verify_hmac(b"data", &signature, b"secret"));
    }
}
