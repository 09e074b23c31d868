//! Password hashing and verification with Argon2id.
//!
//! Each password is hashed with a fresh 16-byte random salt and a
//! memory-hard key derivation, producing a stored string of the form
//! `<salt hex>:<derived key hex>`. Hashing the same password twice yields
//! different stored strings because the salt is drawn per call.
//!
//! Verification re-derives the key from the candidate password and the
//! stored salt, then compares in constant time. It never returns an error:
//! malformed stored strings and internal derivation failures both verify
//! as `false`.
//!
//! Both operations are deliberately expensive (tens to low hundreds of
//! milliseconds under the default parameters) and cannot be interrupted
//! once started. Schedule them off latency-sensitive request paths.

use argon2::{Algorithm, Argon2, Params, Version};
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use tracing::debug;
use zeroize::Zeroizing;

use crate::error::{CryptoError, Result};
use crate::random;

/// Size of the random salt in bytes.
pub const SALT_SIZE: usize = 16;

/// Size of the derived key in bytes.
pub const DERIVED_KEY_SIZE: usize = 64;

/// Separator between the salt and derived key fields of a stored hash.
const DELIMITER: char = ':';

/// Cost parameters for password key derivation.
///
/// The defaults (64 MiB memory, 3 iterations, 1 lane) target an interactive
/// login budget of tens to low hundreds of milliseconds on current server
/// hardware. Verification must run with the same parameters that produced
/// the stored hash; the parameters are not embedded in the stored string.
///
/// # Examples
///
/// ```
/// use chitin::password::KdfParams;
///
/// let params = KdfParams::default().with_memory_kib(32768).with_iterations(2);
/// assert_eq!(params.memory_kib, 32768);
/// assert_eq!(params.iterations, 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KdfParams {
    /// Memory cost in KiB.
    pub memory_kib: u32,
    /// Number of passes over memory.
    pub iterations: u32,
    /// Number of parallel lanes.
    pub parallelism: u32,
    /// Length of the derived key in bytes.
    pub output_len: usize,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            memory_kib: 65536,
            iterations: 3,
            parallelism: 1,
            output_len: DERIVED_KEY_SIZE,
        }
    }
}

impl KdfParams {
    /// Returns the parameters with the specified memory cost in KiB.
    pub fn with_memory_kib(mut self, memory_kib: u32) -> Self {
        self.memory_kib = memory_kib;
        self
    }

    /// Returns the parameters with the specified number of passes.
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    /// Returns the parameters with the specified number of lanes.
    pub fn with_parallelism(mut self, parallelism: u32) -> Self {
        self.parallelism = parallelism;
        self
    }

    /// Returns the parameters with the specified derived key length in bytes.
    pub fn with_output_len(mut self, output_len: usize) -> Self {
        self.output_len = output_len;
        self
    }
}

/// Hashes a password for storage.
///
/// Draws a fresh random salt, derives a key with Argon2id under the given
/// parameters, and encodes both as `<salt hex>:<derived key hex>`.
///
/// # Arguments
///
/// * `password` - Password to hash
/// * `params` - Cost parameters for the derivation
///
/// # Returns
///
/// The stored-form hash string.
///
/// # Errors
///
/// Returns [`CryptoError::RandomnessFailure`] if the OS randomness source
/// fails, or [`CryptoError::DerivationFailed`] if the parameters are
/// rejected by the KDF.
///
/// # Examples
///
/// ```
/// use chitin::password::{hash_password, KdfParams};
///
/// let stored = hash_password("correct horse battery staple", &KdfParams::default()).unwrap();
/// assert!(stored.contains(':'));
/// ```
pub fn hash_password(password: &str, params: &KdfParams) -> Result<String> {
    let salt: [u8; SALT_SIZE] = random::generate_random_bytes()?;
    let derived = derive_key(password, &salt, params)?;
    Ok(format!(
        "{}{}{}",
        hex::encode(salt),
        DELIMITER,
        hex::encode(derived.as_slice())
    ))
}

/// Verifies a password against a stored hash.
///
/// Re-derives the key from the candidate password and the stored salt, then
/// compares it to the stored key in constant time. The comparison does not
/// leak where the two keys first differ.
///
/// This function never returns an error. A malformed stored string, a
/// derivation failure, and a wrong password all yield `false`, so callers
/// cannot distinguish them.
///
/// # Arguments
///
/// * `password` - Candidate password
/// * `stored` - Stored hash produced by [`hash_password`]
/// * `params` - Cost parameters used when the hash was produced
///
/// # Examples
///
/// ```
/// use chitin::password::{hash_password, verify_password, KdfParams};
///
/// let params = KdfParams::default();
/// let stored = hash_password("Secret123!", &params).unwrap();
/// assert!(verify_password("Secret123!", &stored, &params));
/// assert!(!verify_password("WrongPassword", &stored, &params));
/// ```
pub fn verify_password(password: &str, stored: &str, params: &KdfParams) -> bool {
    let (salt, expected) = match parse_stored(stored) {
        Some(parts) => parts,
        None => {
            debug!("stored password hash is malformed; rejecting verification");
            return false;
        }
    };
    let derived = match derive_key(password, &salt, params) {
        Ok(derived) => derived,
        Err(_) => {
            debug!("key derivation failed during password verification");
            return false;
        }
    };
    bool::from(derived.as_slice().ct_eq(expected.as_slice()))
}

/// Splits a stored hash into its raw salt and expected key.
///
/// Returns `None` for anything that is not two hex fields joined by the
/// delimiter.
fn parse_stored(stored: &str) -> Option<(Vec<u8>, Vec<u8>)> {
    let (salt_hex, key_hex) = stored.split_once(DELIMITER)?;
    let salt = hex::decode(salt_hex).ok()?;
    let expected = hex::decode(key_hex).ok()?;
    Some((salt, expected))
}

/// Runs Argon2id over the password and salt, producing `params.output_len`
/// bytes of key material.
fn derive_key(password: &str, salt: &[u8], params: &KdfParams) -> Result<Zeroizing<Vec<u8>>> {
    let argon_params = Params::new(
        params.memory_kib,
        params.iterations,
        params.parallelism,
        Some(params.output_len),
    )
    .map_err(|e| CryptoError::DerivationFailed(e.to_string()))?;
    let argon = Argon2::new(Algorithm::Argon2id, Version::V0x13, argon_params);
    let mut derived = Zeroizing::new(vec![0u8; params.output_len]);
    argon
        .hash_password_into(password.as_bytes(), salt, &mut derived)
        .map_err(|e| CryptoError::DerivationFailed(e.to_string()))?;
    Ok(derived)
}
