//! Stateless credential and sensitive-field protection primitives.
//!
//! Every operation is a pure function of its explicit inputs plus draws
//! from the OS randomness source. There is no shared mutable state, so
//! all operations are safe to call concurrently from many threads or
//! tasks without synchronization.
//!
//! - [`password`]: Argon2id password hashing with per-call random salts
//! - [`aead`]: AES-256-GCM encryption for sensitive stored fields
//! - [`mac`]: HMAC-SHA256 signing and verification
//! - [`token`]: keys, bearer API keys, PII pseudonyms, and secure codes
//! - [`random`]: OS-backed random byte generation
//! - [`error`]: shared error type for all modules
//!
//! Verification operations return `bool` and never raise, so a wrong
//! credential is an ordinary outcome rather than an exceptional path.
//! Generation and decryption operations return [`error::Result`] with
//! typed failures.

#![deny(missing_docs)]
#![deny(clippy::all)]

pub mod aead;
pub mod error;
pub mod mac;
pub mod password;
pub mod random;
pub mod token;
