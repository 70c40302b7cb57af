//! Error types for hashing, verification and registry lookups.

use thiserror::Error;

/// Errors that can occur while configuring, hashing or verifying.
///
/// Messages never carry secret material (passwords, keys, salts or digests).
#[derive(Debug, Error)]
pub enum HashError {
    /// Input was required but empty.
    #[error("input must not be empty")]
    EmptyInput,

    /// A key of the wrong length was supplied.
    #[error("invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    /// A combined buffer was too short to contain its salt.
    #[error("invalid buffer length: expected at least {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// The expected hash is not valid Base64 or hex.
    #[error("invalid hash format: {0}")]
    FormatInvalid(String),

    /// The password does not satisfy the configured policy.
    #[error("password policy violation: {0}")]
    PolicyViolation(String),

    /// Verification ran but the recomputed digest differs.
    #[error("hash mismatch")]
    Mismatch,

    /// Password verification ran but the password is wrong.
    #[error("incorrect password")]
    Incorrect,

    /// No algorithm is registered under the requested key.
    #[error("unknown hash algorithm: {0}")]
    UnknownAlgorithm(String),

    /// The underlying primitive rejected the configured parameters.
    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    /// The operating system random source failed.
    #[error("entropy source failure: {0}")]
    Entropy(String),

    /// Reading a stream failed while hashing.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration file could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(String),
}

impl HashError {
    /// Returns `true` when verification completed and the digests differ.
    ///
    /// This is the expected negative outcome of a check rather than a fault.
    pub fn is_mismatch(&self) -> bool {
        matches!(self, Self::Mismatch | Self::Incorrect)
    }
}

/// Convenience Result type for hashkit operations.
pub type Result<T> = std::result::Result<T, HashError>;
