//! Secure token generation and one-way digests.
//!
//! Covers the credential material a service hands out or stores: hex
//! encryption keys, base64 bearer API keys, SHA-256 digests for API-key
//! storage, deterministic PII pseudonyms, and one-off secure codes.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use sha2::{Digest, Sha256};

use crate::error::Result;
use crate::random;

/// Size of a generated API key in bytes, before base64 encoding.
pub const API_KEY_SIZE: usize = 32;

/// Default size of a secure code in bytes, before hex encoding.
pub const DEFAULT_CODE_SIZE: usize = 32;

/// Prefix of every PII pseudonym produced by [`tokenize_pii`].
pub const PII_TOKEN_PREFIX: &str = "pii_";

/// Number of hex characters of the SHA-256 digest kept in a PII pseudonym.
pub const PII_TOKEN_DIGEST_LEN: usize = 16;

/// Generates a fresh 256-bit encryption key as 64 hex characters.
///
/// The output is accepted by [`crate::aead::CipherKey::from_hex`].
///
/// # Errors
///
/// Returns [`crate::error::CryptoError::RandomnessFailure`] if the OS
/// randomness source fails.
pub fn generate_encryption_key() -> Result<String> {
    let bytes: [u8; 32] = random::generate_random_bytes()?;
    Ok(hex::encode(bytes))
}

/// Generates an opaque bearer API key as standard base64.
///
/// The key encodes [`API_KEY_SIZE`] random bytes. Store only the digest
/// from [`hash_api_key`]; the plaintext key is shown to the caller once.
///
/// # Errors
///
/// Returns [`crate::error::CryptoError::RandomnessFailure`] if the OS
/// randomness source fails.
pub fn generate_api_key() -> Result<String> {
    let bytes: [u8; API_KEY_SIZE] = random::generate_random_bytes()?;
    Ok(STANDARD.encode(bytes))
}

/// Computes the storable SHA-256 digest of an API key.
///
/// Deterministic and one-way. Incoming keys are checked by re-hashing
/// and comparing digests, so the plaintext key never needs to be stored.
///
/// # Returns
///
/// The digest as 64 lowercase hex characters.
///
/// # Examples
///
/// ```
/// use chitin::token::{generate_api_key, hash_api_key};
///
/// let api_key = generate_api_key().unwrap();
/// assert_eq!(hash_api_key(&api_key), hash_api_key(&api_key));
/// ```
pub fn hash_api_key(api_key: &str) -> String {
    sha256_hex(api_key.as_bytes())
}

/// Derives a deterministic pseudonym for a PII value.
///
/// The pseudonym is [`PII_TOKEN_PREFIX`] followed by the first
/// [`PII_TOKEN_DIGEST_LEN`] hex characters of the value's SHA-256 digest.
///
/// One-way: the original value cannot be recovered from the pseudonym.
/// Linkable: equal inputs always map to the same pseudonym, so tokens
/// support deduplication and display grouping. That linkability means
/// this is **not** an anonymization guarantee; anyone who can guess a
/// candidate value can confirm it by tokenizing it.
///
/// # Examples
///
/// ```
/// use chitin::token::tokenize_pii;
///
/// let token = tokenize_pii("jane.doe@example.com");
/// assert!(token.starts_with("pii_"));
/// assert_eq!(token, tokenize_pii("jane.doe@example.com"));
/// assert_ne!(token, tokenize_pii("john.doe@example.com"));
/// ```
pub fn tokenize_pii(value: &str) -> String {
    let digest = sha256_hex(value.as_bytes());
    format!("{}{}", PII_TOKEN_PREFIX, &digest[..PII_TOKEN_DIGEST_LEN])
}

/// Generates secure random material for one-off codes as hex.
///
/// Used for verification codes and reset tokens. `length_bytes` sets the
/// amount of random material; the hex output is twice that length.
/// [`DEFAULT_CODE_SIZE`] is the conventional size.
///
/// # Errors
///
/// Returns [`crate::error::CryptoError::RandomnessFailure`] if the OS
/// randomness source fails.
///
/// # Examples
///
/// ```
/// use chitin::token::{generate_secure_code, DEFAULT_CODE_SIZE};
///
/// let code = generate_secure_code(DEFAULT_CODE_SIZE).unwrap();
/// assert_eq!(code.len(), 64);
/// ```
pub fn generate_secure_code(length_bytes: usize) -> Result<String> {
    let bytes = random::random_vec(length_bytes)?;
    Ok(hex::encode(bytes))
}

/// SHA-256 of `data` as lowercase hex.
fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aead::CipherKey;

    #[test]
    fn test_generate_encryption_key_format() {
        let key_hex = generate_encryption_key().unwrap();
        assert_eq!(key_hex.len(), 64);
        let bytes = hex::decode(&key_hex).unwrap();
        assert_eq!(bytes.len(), 32);
    }

    #[test]
    fn test_generate_encryption_key_usable_as_cipher_key() {
        let key_hex = generate_encryption_key().unwrap();
        assert!(CipherKey::from_hex(&key_hex).is_ok());
    }

    #[test]
    fn test_generate_encryption_key_unique() {
        let first = generate_encryption_key().unwrap();
        let second = generate_encryption_key().unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_generate_api_key_format() {
        let api_key = generate_api_key().unwrap();
        let bytes = STANDARD.decode(&api_key).unwrap();
        assert_eq!(bytes.len(), API_KEY_SIZE);
    }

    #[test]
    fn test_generate_api_key_unique() {
        let first = generate_api_key().unwrap();
        let second = generate_api_key().unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_hash_api_key_deterministic() {
        let digest = hash_api_key("some-api-key");
        assert_eq!(digest, hash_api_key("some-api-key"));
        assert_eq!(digest.len(), 64);
        assert_ne!(digest, hash_api_key("other-api-key"));
    }

    #[test]
    fn test_hash_api_key_known_answer() {
        assert_eq!(
            hash_api_key("hello world"),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
        assert_eq!(
            hash_api_key(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_tokenize_pii_shape() {
        let token = tokenize_pii("jane.doe@example.com");
        assert!(token.starts_with(PII_TOKEN_PREFIX));
        assert_eq!(token.len(), PII_TOKEN_PREFIX.len() + PII_TOKEN_DIGEST_LEN);
    }

    #[test]
    fn test_tokenize_pii_known_answer() {
        // First 16 hex chars of sha256("hello world").
        assert_eq!(tokenize_pii("hello world"), "pii_b94d27b9934d3e08");
    }

    #[test]
    fn test_tokenize_pii_linkable() {
        assert_eq!(tokenize_pii("555-0100"), tokenize_pii("555-0100"));
        assert_ne!(tokenize_pii("555-0100"), tokenize_pii("555-0101"));
    }

    #[test]
    fn test_generate_secure_code_lengths() {
        for length_bytes in [0, 1, 8, DEFAULT_CODE_SIZE, 64] {
            let code = generate_secure_code(length_bytes).unwrap();
            assert_eq!(code.len(), length_bytes * 2);
            assert!(hex::decode(&code).is_ok());
        }
    }

    #[test]
    fn test_generate_secure_code_unique() {
        let first = generate_secure_code(DEFAULT_CODE_SIZE).unwrap();
        let second = generate_secure_code(DEFAULT_CODE_SIZE).unwrap();
        assert_ne!(first, second);
    }
}
