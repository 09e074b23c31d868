//! Cryptographically secure random byte generation.
//!
//! Every salt, IV, key, and token in this crate is drawn from the operating
//! system CSPRNG through this module. Nothing here falls back to a userspace
//! generator: if the OS source fails, the caller gets
//! [`CryptoError::RandomnessFailure`] and must treat the operation as failed.

use crate::error::{CryptoError, Result};

/// Fills the provided buffer with cryptographically secure random bytes.
///
/// # Arguments
///
/// * `dest` - Buffer to fill with random bytes
///
/// # Errors
///
/// Returns [`CryptoError::RandomnessFailure`] if the OS randomness source
/// is unavailable. Retrying with the same arguments will not help.
///
/// # Examples
///
/// ```
/// use chitin::random::fill_random;
///
/// let mut salt = [0u8; 16];
/// fill_random(&mut salt).unwrap();
/// ```
pub fn fill_random(dest: &mut [u8]) -> Result<()> {
    getrandom::getrandom(dest).map_err(|e| CryptoError::RandomnessFailure(e.to_string()))
}

/// Generates a fixed-size array of cryptographically secure random bytes.
///
/// The array length is a const generic, so salt and IV sizes are checked at
/// compile time.
///
/// # Examples
///
/// ```
/// use chitin::random::generate_random_bytes;
///
/// let iv: [u8; 16] = generate_random_bytes().unwrap();
/// assert_eq!(iv.len(), 16);
/// ```
pub fn generate_random_bytes<const N: usize>() -> Result<[u8; N]> {
    let mut bytes = [0u8; N];
    fill_random(&mut bytes)?;
    Ok(bytes)
}

/// Generates a heap-allocated buffer of cryptographically secure random bytes.
///
/// Used where the caller picks the length at runtime, such as verification
/// codes of configurable size.
///
/// # Arguments
///
/// * `len` - Number of random bytes to generate
///
/// # Errors
///
/// Returns [`CryptoError::RandomnessFailure`] if the OS randomness source
/// is unavailable.
pub fn random_vec(len: usize) -> Result<Vec<u8>> {
    let mut bytes = vec![0u8; len];
    fill_random(&mut bytes)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_random() {
        let mut buf = [0u8; 32];
        fill_random(&mut buf).unwrap();
        // A 32-byte all-zero draw has probability 2^-256.
        assert_ne!(buf, [0u8; 32]);
    }

    #[test]
    fn test_fill_random_empty_buffer() {
        let mut buf = [0u8; 0];
        assert!(fill_random(&mut buf).is_ok());
    }

    #[test]
    fn test_generate_random_bytes_distinct_draws() {
        let a: [u8; 16] = generate_random_bytes().unwrap();
        let b: [u8; 16] = generate_random_bytes().unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_random_vec_length() {
        for len in [0, 1, 16, 32, 64] {
            let v = random_vec(len).unwrap();
            assert_eq!(v.len(), len);
        }
    }

    #[test]
    fn test_random_vec_distinct_draws() {
        let a = random_vec(32).unwrap();
        let b = random_vec(32).unwrap();
        assert_ne!(a, b);
    }
}
