//! Salted BLAKE2b hashing.
//!
//! The salt is prepended to the input, `blake2b(salt || input)`, rather than
//! passed through BLAKE2's native salt parameter. Output size is variable
//! between 1 and 64 bytes; the default is 32.

use blake2::Blake2bVar;
use blake2::digest::{Update, VariableOutput};

use super::{HashAlgorithm, salted_hash, salted_verify};
use crate::error::{HashError, Result};
use crate::salt::SALT_LEN;

/// Default digest length in bytes.
pub const DEFAULT_OUTPUT_LEN: usize = 32;

/// Largest digest BLAKE2b can produce.
pub const MAX_OUTPUT_LEN: usize = 64;

/// BLAKE2b digest of the concatenation of `parts`.
///
/// ## Errors
///
/// Returns `HashError::InvalidParams` unless `size` is between 1 and 64.
pub fn blake2b_digest(parts: &[&[u8]], size: usize) -> Result<Vec<u8>> {
    if !(1..=MAX_OUTPUT_LEN).contains(&size) {
        return Err(HashError::InvalidParams(format!(
            "blake2b output size {size} not in 1..={MAX_OUTPUT_LEN}"
        )));
    }
    let mut hasher =
        Blake2bVar::new(size).map_err(|e| HashError::InvalidParams(e.to_string()))?;
    for part in parts {
        hasher.update(part);
    }
    let mut output = vec![0u8; size];
    hasher
        .finalize_variable(&mut output)
        .map_err(|e| HashError::InvalidParams(e.to_string()))?;
    Ok(output)
}

/// BLAKE2b behind the common hashing contract.
#[derive(Debug, Clone)]
pub struct Blake2bAdapter {
    hash_size: usize,
    salt: Option<Vec<u8>>,
}

impl Default for Blake2bAdapter {
    fn default() -> Self {
        Self {
            hash_size: DEFAULT_OUTPUT_LEN,
            salt: None,
        }
    }
}

impl Blake2bAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `salt` for every subsequent `hash` call instead of a fresh one.
    pub fn with_salt(mut self, salt: &[u8]) -> Self {
        self.salt = Some(salt.to_vec());
        self
    }

    pub fn with_hash_size(mut self, hash_size: usize) -> Self {
        self.hash_size = hash_size;
        self
    }

    pub fn hash_size(&self) -> usize {
        self.hash_size
    }

    fn salt_len(&self) -> usize {
        self.salt.as_ref().map_or(SALT_LEN, Vec::len)
    }
}

impl HashAlgorithm for Blake2bAdapter {
    fn name(&self) -> &'static str {
        "blake2b"
    }

    fn digest(&self, data: &[u8]) -> Result<Vec<u8>> {
        blake2b_digest(&[data], self.hash_size)
    }

    fn hash(&self, input: &str) -> Result<String> {
        tracing::debug!(algorithm = self.name(), hash_size = self.hash_size, "hashing input");
        salted_hash(self.salt.as_deref(), input, |salt, input| {
            blake2b_digest(&[salt, input], self.hash_size)
        })
    }

    fn verify(&self, input: &str, expected: &str) -> Result<()> {
        tracing::debug!(algorithm = self.name(), "verifying input");
        salted_verify(self.salt_len(), input, expected, |salt, input| {
            blake2b_digest(&[salt, input], self.hash_size)
        })
    }
}
