//! xxHash utilities for fast, non-cryptographic hashing.
//!
//! Use it for content hashing, change detection and cache keys. 8-byte
//! output (XXH64) is the default; a 4-byte output selects XXH32, which
//! takes the low 32 bits of the seed. Digests are rendered big-endian.
//!
//! ## Examples
//!
//! ```rust
//! use hashkit::{HashAlgorithm, XxHashAdapter, xx_hash};
//!
//! let hash = XxHashAdapter::new().hash("Hello, World!").unwrap();
//! assert_eq!(hash, format!("{:016x}", xx_hash("Hello, World!")));
//! ```

use xxhash_rust::xxh32::xxh32;
use xxhash_rust::xxh64::xxh64;

use super::HashAlgorithm;
use crate::error::{HashError, Result};

/// Default output length in bytes (XXH64).
pub const DEFAULT_OUTPUT_LEN: usize = 8;

/// Computes XXH64 of the input string with seed 0.
#[inline]
pub fn xx_hash(data: &str) -> u64 {
    xxh64(data.as_bytes(), 0)
}

/// Computes XXH64 of the input bytes with seed 0.
#[inline]
pub fn xx_hash_bytes(data: &[u8]) -> u64 {
    xxh64(data, 0)
}

#[derive(Debug, Clone, Copy)]
pub struct XxHashAdapter {
    seed: u64,
    hash_size: usize,
}

impl Default for XxHashAdapter {
    fn default() -> Self {
        Self {
            seed: 0,
            hash_size: DEFAULT_OUTPUT_LEN,
        }
    }
}

impl XxHashAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// 8 for XXH64, 4 for XXH32.
    pub fn with_hash_size(mut self, hash_size: usize) -> Self {
        self.hash_size = hash_size;
        self
    }
}

impl HashAlgorithm for XxHashAdapter {
    fn name(&self) -> &'static str {
        "xxhash"
    }

    fn digest(&self, data: &[u8]) -> Result<Vec<u8>> {
        match self.hash_size {
            8 => Ok(xxh64(data, self.seed).to_be_bytes().to_vec()),
            4 => Ok(xxh32(data, self.seed as u32).to_be_bytes().to_vec()),
            other => Err(HashError::InvalidParams(format!(
                "xxhash output size must be 4 or 8, got {other}"
            ))),
        }
    }
}
