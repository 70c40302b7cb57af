//! MurmurHash3, unsalted and seedable.
//!
//! A 4-byte output selects the x86 32-bit variant (the default); a 16-byte
//! output selects the x64 128-bit variant. Digests are rendered big-endian.
//! The seed is a `u32` in both variants, so only the low 32 bits of a
//! `with_seed` value are used.

use std::io::Cursor;

use super::HashAlgorithm;
use crate::error::{HashError, Result};

/// Default output length in bytes (32-bit variant).
pub const DEFAULT_OUTPUT_LEN: usize = 4;

#[derive(Debug, Clone, Copy)]
pub struct Murmur3Adapter {
    seed: u32,
    hash_size: usize,
}

impl Default for Murmur3Adapter {
    fn default() -> Self {
        Self {
            seed: 0,
            hash_size: DEFAULT_OUTPUT_LEN,
        }
    }
}

impl Murmur3Adapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses the low 32 bits of `seed`.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed as u32;
        self
    }

    /// 4 for the 32-bit variant, 16 for the 128-bit variant.
    pub fn with_hash_size(mut self, hash_size: usize) -> Self {
        self.hash_size = hash_size;
        self
    }
}

impl HashAlgorithm for Murmur3Adapter {
    fn name(&self) -> &'static str {
        "murmur3"
    }

    fn digest(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut cursor = Cursor::new(data);
        match self.hash_size {
            4 => Ok(murmur3::murmur3_32(&mut cursor, self.seed)?
                .to_be_bytes()
                .to_vec()),
            16 => Ok(murmur3::murmur3_x64_128(&mut cursor, self.seed)?
                .to_be_bytes()
                .to_vec()),
            other => Err(HashError::InvalidParams(format!(
                "murmur3 output size must be 4 or 16, got {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_vector() {
        // MurmurHash3_x86_32("hello", seed 0)
        assert_eq!(Murmur3Adapter::new().hash("hello").unwrap(), "248bfa47");
    }

    #[test]
    fn test_hex_width() {
        assert_eq!(Murmur3Adapter::new().hash("anything").unwrap().len(), 8);
        assert_eq!(
            Murmur3Adapter::new()
                .with_hash_size(16)
                .hash("anything")
                .unwrap()
                .len(),
            32
        );
    }

    #[test]
    fn test_seed_changes_digest() {
        let a = Murmur3Adapter::new().with_seed(1).hash("data").unwrap();
        let b = Murmur3Adapter::new().with_seed(2).hash("data").unwrap();
        assert_ne!(a, b);
        assert_eq!(a, Murmur3Adapter::new().with_seed(1).hash("data").unwrap());
    }

    #[test]
    fn test_seed_uses_low_bits() {
        let low = Murmur3Adapter::new().with_seed(7).hash("data").unwrap();
        let wide = Murmur3Adapter::new()
            .with_seed((1u64 << 32) | 7)
            .hash("data")
            .unwrap();
        assert_eq!(low, wide);
    }

    #[test]
    fn test_unsupported_size() {
        assert!(matches!(
            Murmur3Adapter::new().with_hash_size(8).hash("data"),
            Err(HashError::InvalidParams(_))
        ));
    }
}
