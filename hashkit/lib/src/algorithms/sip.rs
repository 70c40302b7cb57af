//! Keyed SipHash-2-4.
//!
//! SipHash needs a caller-supplied 16-byte key. [`SipHashAdapter::new`]
//! validates it up front; an adapter created through the registry starts
//! without a key and fails every hash call with `InvalidKeyLength` until
//! [`SipHashAdapter::with_key`] is called. Output is 8 bytes by default, or
//! 16 bytes with SipHash128.

use std::fmt;
use std::hash::Hasher;

use siphasher::sip::SipHasher24;
use siphasher::sip128::{Hasher128, SipHasher24 as SipHasher128};

use super::HashAlgorithm;
use crate::error::{HashError, Result};

/// Required key length in bytes.
pub const KEY_LEN: usize = 16;

/// Default output length in bytes.
pub const DEFAULT_OUTPUT_LEN: usize = 8;

#[derive(Clone)]
pub struct SipHashAdapter {
    key: Option<[u8; KEY_LEN]>,
    hash_size: usize,
}

impl SipHashAdapter {
    /// Creates a keyed adapter.
    ///
    /// ## Errors
    ///
    /// Returns `HashError::InvalidKeyLength` unless `key` is exactly 16 bytes.
    pub fn new(key: &[u8]) -> Result<Self> {
        Self::unkeyed().with_key(key)
    }

    /// An adapter with no key yet; hashing fails until a key is set.
    pub fn unkeyed() -> Self {
        Self {
            key: None,
            hash_size: DEFAULT_OUTPUT_LEN,
        }
    }

    /// Sets the key.
    ///
    /// ## Errors
    ///
    /// Returns `HashError::InvalidKeyLength` unless `key` is exactly 16 bytes.
    pub fn with_key(mut self, key: &[u8]) -> Result<Self> {
        let key: [u8; KEY_LEN] = key.try_into().map_err(|_| HashError::InvalidKeyLength {
            expected: KEY_LEN,
            actual: key.len(),
        })?;
        self.key = Some(key);
        Ok(self)
    }

    /// 8 for SipHash-2-4, 16 for SipHash128-2-4.
    pub fn with_hash_size(mut self, hash_size: usize) -> Self {
        self.hash_size = hash_size;
        self
    }

    pub fn has_key(&self) -> bool {
        self.key.is_some()
    }
}

// Keep the key out of debug output.
impl fmt::Debug for SipHashAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SipHashAdapter")
            .field("key", &self.key.map(|_| "<redacted>"))
            .field("hash_size", &self.hash_size)
            .finish()
    }
}

impl HashAlgorithm for SipHashAdapter {
    fn name(&self) -> &'static str {
        "siphash"
    }

    fn digest(&self, data: &[u8]) -> Result<Vec<u8>> {
        let key = self.key.as_ref().ok_or(HashError::InvalidKeyLength {
            expected: KEY_LEN,
            actual: 0,
        })?;
        match self.hash_size {
            8 => {
                let mut hasher = SipHasher24::new_with_key(key);
                hasher.write(data);
                Ok(hasher.finish().to_be_bytes().to_vec())
            }
            16 => {
                let mut hasher = SipHasher128::new_with_key(key);
                hasher.write(data);
                Ok(hasher.finish128().as_bytes().to_vec())
            }
            other => Err(HashError::InvalidParams(format!(
                "siphash output size must be 8 or 16, got {other}"
            ))),
        }
    }
}
