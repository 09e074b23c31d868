//! Error types for cryptographic operations.

use thiserror::Error;

/// Errors that can occur during cryptographic operations.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Authenticated decryption failed.
    ///
    /// Covers a wrong key, a tampered ciphertext, a tampered tag, and a
    /// mismatched IV. The variant carries no detail so callers cannot tell
    /// these cases apart.
    #[error("authentication failed: ciphertext could not be verified")]
    AuthenticationFailed,

    /// The provided key has an invalid length.
    #[error("invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength {
        /// Expected key length in bytes.
        expected: usize,
        /// Actual key length provided.
        actual: usize,
    },

    /// The provided IV has an invalid length.
    #[error("invalid IV length: expected {expected} bytes, got {actual}")]
    InvalidIvLength {
        /// Expected IV length in bytes.
        expected: usize,
        /// Actual IV length provided.
        actual: usize,
    },

    /// The provided authentication tag has an invalid length.
    #[error("invalid tag length: expected {expected} bytes, got {actual}")]
    InvalidTagLength {
        /// Expected tag length in bytes.
        expected: usize,
        /// Actual tag length provided.
        actual: usize,
    },

    /// An input could not be parsed or processed.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Password key derivation failed inside the KDF.
    #[error("key derivation failed: {0}")]
    DerivationFailed(String),

    /// The operating system randomness source failed.
    ///
    /// This is not recoverable by retrying with different arguments.
    #[error("randomness generation failed: {0}")]
    RandomnessFailure(String),
}

/// Result type for cryptographic operations.
pub type Result<T> = std::result::Result<T, CryptoError>;
