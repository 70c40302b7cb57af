//! Argon2id hashing.
//!
//! Argon2id is the winner of the Password Hashing Competition and is
//! memory-hard, so it's the algorithm to reach for when the input is
//! a password. It's deliberately slow; don't use it for content hashing.
//!
//! [`Argon2idAdapter::hash`] returns `Base64(salt || digest)` with a fresh
//! 32-byte salt unless one was configured. Argon2 can't run without a salt,
//! so the unsalted entry points ([`HashAlgorithm::digest`] and the Base64 hash
//! helpers) derive with a fixed all-zero salt of the same length.
//!
//! ## Examples
//!
//! ```rust
//! use hashkit::{Argon2idAdapter, HashAlgorithm};
//!
//! // Low cost parameters keep the example fast.
//! let argon = Argon2idAdapter::new()
//!     .with_memory_size(8 * 1024)
//!     .with_iterations(1)
//!     .with_degree_of_parallelism(1);
//!
//! let stored = argon.hash("correct horse").unwrap();
//! assert!(argon.verify("correct horse", &stored).is_ok());
//! assert!(argon.verify("battery staple", &stored).is_err());
//! ```

use argon2::{Algorithm, Argon2, Params, Version};
use serde::{Deserialize, Serialize};

use super::{HashAlgorithm, salted_hash, salted_verify};
use crate::error::{HashError, Result};
use crate::salt::SALT_LEN;

/// Default number of passes over memory.
pub const DEFAULT_ITERATIONS: u32 = 4;

/// Default memory cost in KiB (1 GiB).
pub const DEFAULT_MEMORY_COST_KIB: u32 = 1_048_576;

/// Default degree of parallelism.
pub const DEFAULT_PARALLELISM: u32 = 8;

/// Default output length in bytes.
pub const DEFAULT_OUTPUT_LEN: usize = 16;

/// Argon2id cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Argon2Params {
    /// Number of passes over memory (time cost).
    pub iterations: u32,
    /// Memory cost in KiB.
    pub memory_kib: u32,
    /// Degree of parallelism (lanes).
    pub parallelism: u32,
    /// Output length in bytes.
    pub hash_size: usize,
}

impl Default for Argon2Params {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            memory_kib: DEFAULT_MEMORY_COST_KIB,
            parallelism: DEFAULT_PARALLELISM,
            hash_size: DEFAULT_OUTPUT_LEN,
        }
    }
}

impl Argon2Params {
    /// Derives `hash_size` bytes from `password` and `salt`.
    ///
    /// ## Errors
    ///
    /// Returns `HashError::InvalidParams` if the primitive rejects the cost
    /// parameters, the output size, or a salt shorter than 8 bytes.
    pub fn derive(&self, password: &[u8], salt: &[u8]) -> Result<Vec<u8>> {
        let params = Params::new(
            self.memory_kib,
            self.iterations,
            self.parallelism,
            Some(self.hash_size),
        )
        .map_err(|e| HashError::InvalidParams(e.to_string()))?;

        tracing::debug!(
            memory_kib = self.memory_kib,
            iterations = self.iterations,
            parallelism = self.parallelism,
            hash_size = self.hash_size,
            "deriving argon2id digest"
        );

        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
        let mut output = vec![0u8; self.hash_size];
        argon2
            .hash_password_into(password, salt, &mut output)
            .map_err(|e| HashError::InvalidParams(e.to_string()))?;
        Ok(output)
    }
}

/// Argon2id behind the common hashing contract.
#[derive(Debug, Clone, Default)]
pub struct Argon2idAdapter {
    params: Argon2Params,
    salt: Option<Vec<u8>>,
}

impl Argon2idAdapter {
    /// Creates an adapter with the default cost parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `salt` for every subsequent `hash` call instead of a fresh one.
    pub fn with_salt(mut self, salt: &[u8]) -> Self {
        self.salt = Some(salt.to_vec());
        self
    }

    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.params.iterations = iterations;
        self
    }

    /// Memory cost in KiB.
    pub fn with_memory_size(mut self, memory_kib: u32) -> Self {
        self.params.memory_kib = memory_kib;
        self
    }

    pub fn with_degree_of_parallelism(mut self, parallelism: u32) -> Self {
        self.params.parallelism = parallelism;
        self
    }

    pub fn with_hash_size(mut self, hash_size: usize) -> Self {
        self.params.hash_size = hash_size;
        self
    }

    /// Replaces all cost parameters at once.
    pub fn with_params(mut self, params: Argon2Params) -> Self {
        self.params = params;
        self
    }

    pub fn params(&self) -> &Argon2Params {
        &self.params
    }

    /// Salt length expected inside a combined buffer.
    fn salt_len(&self) -> usize {
        self.salt.as_ref().map_or(SALT_LEN, Vec::len)
    }
}

impl HashAlgorithm for Argon2idAdapter {
    fn name(&self) -> &'static str {
        "argon2id"
    }

    fn digest(&self, data: &[u8]) -> Result<Vec<u8>> {
        self.params.derive(data, &[0u8; SALT_LEN])
    }

    fn hash(&self, input: &str) -> Result<String> {
        tracing::debug!(algorithm = self.name(), "hashing input");
        salted_hash(self.salt.as_deref(), input, |salt, input| {
            self.params.derive(input, salt)
        })
    }

    fn verify(&self, input: &str, expected: &str) -> Result<()> {
        tracing::debug!(algorithm = self.name(), "verifying input");
        salted_verify(self.salt_len(), input, expected, |salt, input| {
            self.params.derive(input, salt)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::from_base64;

    fn cheap() -> Argon2idAdapter {
        Argon2idAdapter::new()
            .with_memory_size(1024)
            .with_iterations(1)
            .with_degree_of_parallelism(1)
    }

    #[test]
    fn test_defaults() {
        let params = Argon2Params::default();
        assert_eq!(params.iterations, 4);
        assert_eq!(params.memory_kib, 1_048_576);
        assert_eq!(params.parallelism, 8);
        assert_eq!(params.hash_size, 16);
    }

    #[test]
    fn test_hash_layout() {
        let encoded = cheap().hash("password").unwrap();
        let combined = from_base64(&encoded).unwrap();
        assert_eq!(combined.len(), SALT_LEN + DEFAULT_OUTPUT_LEN);
    }

    #[test]
    fn test_hash_unique_salts() {
        let argon = cheap();
        assert_ne!(argon.hash("same").unwrap(), argon.hash("same").unwrap());
    }

    #[test]
    fn test_fixed_salt_deterministic() {
        let argon = cheap().with_salt(&[42u8; SALT_LEN]);
        assert_eq!(argon.hash("input").unwrap(), argon.hash("input").unwrap());
    }

    #[test]
    fn test_verify() {
        let argon = cheap();
        let stored = argon.hash("correct").unwrap();
        assert!(argon.verify("correct", &stored).is_ok());
        assert!(matches!(
            argon.verify("wrong", &stored),
            Err(HashError::Mismatch)
        ));
    }

    #[test]
    fn test_verify_invalid_format() {
        assert!(matches!(
            cheap().verify("input", "%%%"),
            Err(HashError::FormatInvalid(_))
        ));
    }

    #[test]
    fn test_custom_hash_size() {
        let encoded = cheap().with_hash_size(32).hash("input").unwrap();
        assert_eq!(from_base64(&encoded).unwrap().len(), SALT_LEN + 32);
    }

    #[test]
    fn test_invalid_params() {
        let result = cheap().with_degree_of_parallelism(0).hash("input");
        assert!(matches!(result, Err(HashError::InvalidParams(_))));
    }

    #[test]
    fn test_salt_too_short() {
        let result = cheap().with_salt(&[1, 2, 3]).hash("input");
        assert!(matches!(result, Err(HashError::InvalidParams(_))));
    }

    #[test]
    fn test_base64_hash_is_unsalted() {
        let argon = cheap();
        let a = argon.encode_to_base64_hash(b"data").unwrap();
        assert_eq!(a, argon.encode_to_base64_hash(b"data").unwrap());
        assert!(argon.verify_base64_hash(b"data", &a).is_ok());
        assert!(argon.verify_base64_hash(b"other", &a).is_err());
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(cheap().hash(""), Err(HashError::EmptyInput)));
        assert!(matches!(
            cheap().encode_to_base64_hash(b""),
            Err(HashError::EmptyInput)
        ));
    }
}
