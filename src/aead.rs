//! Authenticated encryption for sensitive stored fields.
//!
//! Uses AES-256-GCM with a random 16-byte IV per encryption and a detached
//! 16-byte authentication tag. Ciphertext, IV, and tag are hex-encoded
//! separately in [`EncryptedPayload`] so they can be stored as independent
//! columns; all three are required to decrypt.
//!
//! Decryption verifies the tag before producing any output. A wrong key,
//! a tampered ciphertext, a tampered tag, or a swapped IV all fail with
//! [`CryptoError::AuthenticationFailed`] and yield no plaintext at all.

use aes_gcm::aead::generic_array::typenum::U16;
use aes_gcm::aead::{AeadInPlace, KeyInit};
use aes_gcm::aes::Aes256;
use aes_gcm::{AesGcm, Key, Nonce, Tag};
use serde::{Deserialize, Serialize};
use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{CryptoError, Result};
use crate::random;

/// Size of the encryption key in bytes.
pub const KEY_SIZE: usize = 32;

/// Size of the initialization vector in bytes.
pub const IV_SIZE: usize = 16;

/// Size of the authentication tag in bytes.
pub const TAG_SIZE: usize = 16;

/// AES-256-GCM instantiated for the 16-byte IVs this crate stores.
type Aes256Gcm16 = AesGcm<Aes256, U16>;

/// A 256-bit symmetric encryption key.
///
/// The key material is zeroized when the value is dropped. There is no
/// `Debug` implementation, so the bytes cannot leak through logging.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct CipherKey([u8; KEY_SIZE]);

impl CipherKey {
    /// Creates a key from raw bytes.
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Creates a key from a byte slice.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidKeyLength`] if the slice is not
    /// exactly [`KEY_SIZE`] bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != KEY_SIZE {
            return Err(CryptoError::InvalidKeyLength {
                expected: KEY_SIZE,
                actual: bytes.len(),
            });
        }
        let mut key = [0u8; KEY_SIZE];
        key.copy_from_slice(bytes);
        Ok(Self(key))
    }

    /// Creates a key from a hex string, such as one produced by
    /// [`crate::token::generate_encryption_key`].
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidInput`] if the string is not valid
    /// hex, or [`CryptoError::InvalidKeyLength`] if it does not decode to
    /// exactly [`KEY_SIZE`] bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use chitin::aead::CipherKey;
    /// use chitin::token::generate_encryption_key;
    ///
    /// let key_hex = generate_encryption_key().unwrap();
    /// let key = CipherKey::from_hex(&key_hex).unwrap();
    /// assert_eq!(key.as_bytes().len(), 32);
    /// ```
    pub fn from_hex(key_hex: &str) -> Result<Self> {
        let bytes = decode_hex(key_hex, "key")?;
        Self::from_slice(&bytes)
    }

    /// Returns the raw key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }
}

/// An encrypted field ready for storage.
///
/// All three components are hex-encoded and must be persisted together;
/// decryption needs every one of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedPayload {
    /// Hex-encoded ciphertext. Same byte length as the plaintext, so the
    /// hex is exactly twice the plaintext length.
    pub ciphertext: String,
    /// Hex-encoded 16-byte initialization vector, unique per encryption.
    pub iv: String,
    /// Hex-encoded 16-byte authentication tag over the ciphertext.
    pub tag: String,
}

/// Generates a fresh random encryption key.
///
/// # Errors
///
/// Returns [`CryptoError::RandomnessFailure`] if the OS randomness source
/// fails.
pub fn generate_key() -> Result<CipherKey> {
    Ok(CipherKey(random::generate_random_bytes()?))
}

/// Encrypts plaintext bytes, producing a storable payload.
///
/// A fresh random IV is drawn per call, so encrypting the same plaintext
/// twice under the same key yields different payloads.
///
/// # Arguments
///
/// * `key` - Encryption key
/// * `plaintext` - Bytes to encrypt; may be empty
///
/// # Errors
///
/// Returns [`CryptoError::RandomnessFailure`] if the IV cannot be drawn.
///
/// # Examples
///
/// ```
/// use chitin::aead::{decrypt, encrypt, generate_key};
///
/// let key = generate_key().unwrap();
/// let payload = encrypt(&key, b"4242-4242-4242-4242").unwrap();
/// let plaintext = decrypt(&key, &payload.ciphertext, &payload.iv, &payload.tag).unwrap();
/// assert_eq!(plaintext, b"4242-4242-4242-4242");
/// ```
pub fn encrypt(key: &CipherKey, plaintext: &[u8]) -> Result<EncryptedPayload> {
    let iv: [u8; IV_SIZE] = random::generate_random_bytes()?;
    let cipher = Aes256Gcm16::new(Key::<Aes256Gcm16>::from_slice(key.as_bytes()));
    let mut buffer = plaintext.to_vec();
    let tag = cipher
        .encrypt_in_place_detached(Nonce::from_slice(&iv), b"", &mut buffer)
        .map_err(|_| {
            CryptoError::InvalidInput("plaintext exceeds the AES-GCM length limit".to_string())
        })?;
    Ok(EncryptedPayload {
        ciphertext: hex::encode(buffer),
        iv: hex::encode(iv),
        tag: hex::encode(tag),
    })
}

/// Decrypts a stored payload back into plaintext bytes.
///
/// The tag is verified over the full ciphertext before any plaintext is
/// released, so a failed call produces no partial output.
///
/// # Arguments
///
/// * `key` - Encryption key the payload was produced under
/// * `ciphertext_hex` - Hex-encoded ciphertext
/// * `iv_hex` - Hex-encoded 16-byte IV
/// * `tag_hex` - Hex-encoded 16-byte tag
///
/// # Errors
///
/// * [`CryptoError::InvalidInput`] if any component is not valid hex
/// * [`CryptoError::InvalidIvLength`] if the IV is not 16 bytes
/// * [`CryptoError::InvalidTagLength`] if the tag is not 16 bytes
/// * [`CryptoError::AuthenticationFailed`] for a wrong key or any
///   tampering with the ciphertext, IV, or tag
pub fn decrypt(
    key: &CipherKey,
    ciphertext_hex: &str,
    iv_hex: &str,
    tag_hex: &str,
) -> Result<Vec<u8>> {
    let mut buffer = decode_hex(ciphertext_hex, "ciphertext")?;
    let iv = decode_hex(iv_hex, "IV")?;
    let tag = decode_hex(tag_hex, "tag")?;
    if iv.len() != IV_SIZE {
        return Err(CryptoError::InvalidIvLength {
            expected: IV_SIZE,
            actual: iv.len(),
        });
    }
    if tag.len() != TAG_SIZE {
        return Err(CryptoError::InvalidTagLength {
            expected: TAG_SIZE,
            actual: tag.len(),
        });
    }
    let cipher = Aes256Gcm16::new(Key::<Aes256Gcm16>::from_slice(key.as_bytes()));
    cipher
        .decrypt_in_place_detached(
            Nonce::from_slice(&iv),
            b"",
            &mut buffer,
            Tag::from_slice(&tag),
        )
        .map_err(|_| {
            debug!("authenticated decryption rejected: tag mismatch or corrupted input");
            CryptoError::AuthenticationFailed
        })?;
    Ok(buffer)
}

/// Encrypts a UTF-8 string field.
///
/// Convenience wrapper over [`encrypt`] for the common case of encrypting
/// a single database column value.
pub fn encrypt_field(key: &CipherKey, value: &str) -> Result<EncryptedPayload> {
    encrypt(key, value.as_bytes())
}

/// Decrypts a payload produced by [`encrypt_field`] back into a string.
///
/// # Errors
///
/// Fails like [`decrypt`], and additionally returns
/// [`CryptoError::InvalidInput`] if the authenticated plaintext is not
/// valid UTF-8.
///
/// # Examples
///
/// ```
/// use chitin::aead::{decrypt_field, encrypt_field, generate_key};
///
/// let key = generate_key().unwrap();
/// let payload = encrypt_field(&key, "jane.doe@example.com").unwrap();
/// assert_eq!(decrypt_field(&key, &payload).unwrap(), "jane.doe@example.com");
/// ```
pub fn decrypt_field(key: &CipherKey, payload: &EncryptedPayload) -> Result<String> {
    let plaintext = decrypt(key, &payload.ciphertext, &payload.iv, &payload.tag)?;
    String::from_utf8(plaintext)
        .map_err(|_| CryptoError::InvalidInput("decrypted field is not valid UTF-8".to_string()))
}

/// Decodes one hex component, naming the field in the error.
fn decode_hex(value: &str, field: &str) -> Result<Vec<u8>> {
    hex::decode(value)
        .map_err(|_| CryptoError::InvalidInput(format!("{} is not valid hex", field)))
}
