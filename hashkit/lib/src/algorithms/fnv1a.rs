//! FNV-1a, unsalted and unseeded.
//!
//! An 8-byte output selects FNV-1a 64 (the default); a 4-byte output selects
//! FNV-1a 32. Digests are rendered big-endian.

use const_fnv1a_hash::{fnv1a_hash_32, fnv1a_hash_64};

use super::HashAlgorithm;
use crate::error::{HashError, Result};

/// Default output length in bytes (64-bit variant).
pub const DEFAULT_OUTPUT_LEN: usize = 8;

#[derive(Debug, Clone, Copy)]
pub struct Fnv1aAdapter {
    hash_size: usize,
}

impl Default for Fnv1aAdapter {
    fn default() -> Self {
        Self {
            hash_size: DEFAULT_OUTPUT_LEN,
        }
    }
}

impl Fnv1aAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 4 for FNV-1a 32, 8 for FNV-1a 64.
    pub fn with_hash_size(mut self, hash_size: usize) -> Self {
        self.hash_size = hash_size;
        self
    }
}

impl HashAlgorithm for Fnv1aAdapter {
    fn name(&self) -> &'static str {
        "fnv1a"
    }

    fn digest(&self, data: &[u8]) -> Result<Vec<u8>> {
        match self.hash_size {
            8 => Ok(fnv1a_hash_64(data, None).to_be_bytes().to_vec()),
            4 => Ok(fnv1a_hash_32(data, None).to_be_bytes().to_vec()),
            other => Err(HashError::InvalidParams(format!(
                "fnv1a output size must be 4 or 8, got {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_vectors() {
        assert_eq!(Fnv1aAdapter::new().hash("a").unwrap(), "af63dc4c8601ec8c");
        assert_eq!(
            Fnv1aAdapter::new().with_hash_size(4).hash("a").unwrap(),
            "e40c292c"
        );
    }

    #[test]
    fn test_unsupported_size() {
        assert!(matches!(
            Fnv1aAdapter::new().with_hash_size(16).hash("a"),
            Err(HashError::InvalidParams(_))
        ));
    }

    #[test]
    fn test_base64_round_trip() {
        let fnv = Fnv1aAdapter::new();
        let encoded = fnv.encode_to_base64_hash(b"payload").unwrap();
        assert!(fnv.verify_base64_hash(b"payload", &encoded).is_ok());
        assert!(
            fnv.verify_base64_hash(b"paylaod", &encoded)
                .unwrap_err()
                .is_mismatch()
        );
    }
}
