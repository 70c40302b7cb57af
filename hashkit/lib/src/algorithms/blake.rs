//! BLAKE3 hashing.
//!
//! [`Blake3Adapter`] is the plain unsalted, unkeyed hash: every configuration
//! call is a no-op and the output is always 32 bytes.
//!
//! [`ExtendedBlake3Adapter`] satisfies the same contract and adds incremental
//! hashing, keyed MACs, key derivation and hashing of `Read` streams.
//!
//! ## Examples
//!
//! ```rust
//! use hashkit::{Blake3Adapter, ExtendedBlake3Adapter, HashAlgorithm};
//!
//! let hash = Blake3Adapter.hash("Hello World").unwrap();
//! assert_eq!(hash.len(), 64); // 32 bytes = 64 hex chars
//!
//! let extended = ExtendedBlake3Adapter::new();
//! let mut hasher = extended.incremental().unwrap();
//! hasher.update(b"Hello ").update(b"World");
//! assert_eq!(hasher.finalize_hex().unwrap(), hash);
//! ```

use std::io::Read;

use super::{HashAlgorithm, require_input};
use crate::encoding::{digests_match, from_hex, to_hex};
use crate::error::{HashError, Result};

/// Default BLAKE3 output length in bytes.
pub const DEFAULT_OUTPUT_LEN: usize = 32;

/// BLAKE3 key length for MACs.
pub const KEY_LEN: usize = 32;

/// Computes BLAKE3 hash of the input string and returns it as a hex string.
#[inline]
pub fn blake3_hash(data: &str) -> String {
    blake3::hash(data.as_bytes()).to_hex().to_string()
}

/// Computes BLAKE3 hash of the input bytes and returns the raw 32-byte hash.
#[inline]
pub fn blake3_hash_bytes(data: &[u8]) -> [u8; 32] {
    *blake3::hash(data).as_bytes()
}

/// Plain BLAKE3 behind the common hashing contract.
#[derive(Debug, Clone, Copy, Default)]
pub struct Blake3Adapter;

impl HashAlgorithm for Blake3Adapter {
    fn name(&self) -> &'static str {
        "blake3"
    }

    fn digest(&self, data: &[u8]) -> Result<Vec<u8>> {
        Ok(blake3_hash_bytes(data).to_vec())
    }
}

/// BLAKE3 with incremental, keyed, derivation and streaming operations.
#[derive(Debug, Clone, Copy)]
pub struct ExtendedBlake3Adapter {
    hash_size: usize,
}

impl Default for ExtendedBlake3Adapter {
    fn default() -> Self {
        Self {
            hash_size: DEFAULT_OUTPUT_LEN,
        }
    }
}

impl ExtendedBlake3Adapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Output length in bytes, read from the extendable output.
    pub fn with_hash_size(mut self, hash_size: usize) -> Self {
        self.hash_size = hash_size;
        self
    }

    pub fn hash_size(&self) -> usize {
        self.hash_size
    }

    /// Starts an incremental hash that produces this adapter's output length.
    ///
    /// ## Errors
    ///
    /// Returns `HashError::InvalidParams` for a zero output size.
    pub fn incremental(&self) -> Result<IncrementalHasher> {
        check_size(self.hash_size)?;
        Ok(IncrementalHasher {
            inner: blake3::Hasher::new(),
            hash_size: self.hash_size,
        })
    }

    /// Hashes everything read from `reader`, returning lowercase hex.
    ///
    /// ## Errors
    ///
    /// - `HashError::Io` if reading fails
    /// - `HashError::InvalidParams` for a zero output size
    /// - `HashError::EmptyInput` if the stream yields no bytes
    pub fn hash_reader<R: Read>(&self, mut reader: R) -> Result<String> {
        let mut hasher = self.incremental()?;
        hasher.inner.update_reader(&mut reader)?;
        tracing::trace!(bytes = hasher.inner.count(), "hashed stream");
        hasher.finalize_hex()
    }

    /// Keyed BLAKE3 MAC over `data`, returned as lowercase hex.
    ///
    /// ## Errors
    ///
    /// - `HashError::InvalidKeyLength` unless `key` is exactly 32 bytes
    /// - `HashError::EmptyInput` if `data` is empty
    pub fn mac(&self, key: &[u8], data: &[u8]) -> Result<String> {
        require_input(data)?;
        let key = mac_key(key)?;
        check_size(self.hash_size)?;
        let mut hasher = blake3::Hasher::new_keyed(&key);
        hasher.update(data);
        Ok(to_hex(&finalize(&hasher, self.hash_size)))
    }

    /// Recomputes the MAC and compares it with `expected` in constant time.
    pub fn verify_mac(&self, key: &[u8], data: &[u8], expected: &str) -> Result<()> {
        let expected = from_hex(expected)?;
        let actual = from_hex(&self.mac(key, data)?)?;
        if digests_match(&actual, &expected) {
            Ok(())
        } else {
            Err(HashError::Mismatch)
        }
    }

    /// Derives `len` bytes of key material bound to `context`.
    ///
    /// `context` should be a hardcoded, globally unique, application-specific
    /// string.
    ///
    /// ## Errors
    ///
    /// Returns `HashError::EmptyInput` for empty material and
    /// `HashError::InvalidParams` for a zero length.
    pub fn derive_key(&self, context: &str, material: &[u8], len: usize) -> Result<Vec<u8>> {
        require_input(material)?;
        check_size(len)?;
        let mut hasher = blake3::Hasher::new_derive_key(context);
        hasher.update(material);
        Ok(finalize(&hasher, len))
    }
}

impl HashAlgorithm for ExtendedBlake3Adapter {
    fn name(&self) -> &'static str {
        "extended_blake3"
    }

    fn digest(&self, data: &[u8]) -> Result<Vec<u8>> {
        check_size(self.hash_size)?;
        let mut hasher = blake3::Hasher::new();
        hasher.update(data);
        Ok(finalize(&hasher, self.hash_size))
    }
}

/// Incremental BLAKE3 hasher returned by [`ExtendedBlake3Adapter::incremental`].
#[derive(Debug, Clone)]
pub struct IncrementalHasher {
    inner: blake3::Hasher,
    hash_size: usize,
}

impl IncrementalHasher {
    pub fn update(&mut self, data: &[u8]) -> &mut Self {
        self.inner.update(data);
        self
    }

    /// Finalizes without consuming, so more data may still be appended.
    ///
    /// ## Errors
    ///
    /// Returns `HashError::EmptyInput` if nothing has been written yet.
    pub fn finalize_bytes(&self) -> Result<Vec<u8>> {
        if self.inner.count() == 0 {
            return Err(HashError::EmptyInput);
        }
        Ok(finalize(&self.inner, self.hash_size))
    }

    pub fn finalize_hex(&self) -> Result<String> {
        self.finalize_bytes().map(|d| to_hex(&d))
    }
}

fn finalize(hasher: &blake3::Hasher, len: usize) -> Vec<u8> {
    let mut output = vec![0u8; len];
    hasher.finalize_xof().fill(&mut output);
    output
}

fn check_size(len: usize) -> Result<()> {
    if len == 0 {
        Err(HashError::InvalidParams("blake3 output size must be at least 1".into()))
    } else {
        Ok(())
    }
}

fn mac_key(key: &[u8]) -> Result<[u8; KEY_LEN]> {
    key.try_into().map_err(|_| HashError::InvalidKeyLength {
        expected: KEY_LEN,
        actual: key.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_blake3_hash_deterministic() {
        assert_eq!(
            Blake3Adapter.hash("Hello World").unwrap(),
            Blake3Adapter.hash("Hello World").unwrap()
        );
    }

    #[test]
    fn test_blake3_known_value() {
        // BLAKE3 empty string hash is well-defined
        assert!(to_hex(&blake3_hash_bytes(b"")).starts_with("af1349"));
    }

    #[test]
    fn test_blake3_hex_matches_bytes() {
        let content = "Hello, World!";
        assert_eq!(blake3_hash(content), to_hex(&blake3_hash_bytes(content.as_bytes())));
        assert_eq!(Blake3Adapter.hash(content).unwrap(), blake3_hash(content));
    }

    #[test]
    fn test_blake3_verify() {
        let hash = Blake3Adapter.hash("data").unwrap();
        assert!(Blake3Adapter.verify("data", &hash).is_ok());
        assert!(matches!(
            Blake3Adapter.verify("date", &hash),
            Err(HashError::Mismatch)
        ));
        assert!(matches!(
            Blake3Adapter.verify("data", "not hex"),
            Err(HashError::FormatInvalid(_))
        ));
    }

    #[test]
    fn test_blake3_verify_accepts_uppercase_hex() {
        let hash = Blake3Adapter.hash("data").unwrap().to_uppercase();
        assert!(Blake3Adapter.verify("data", &hash).is_ok());
    }

    #[test]
    fn test_extended_default_matches_plain() {
        let extended = ExtendedBlake3Adapter::new();
        assert_eq!(
            extended.hash("same input").unwrap(),
            Blake3Adapter.hash("same input").unwrap()
        );
    }

    #[test]
    fn test_extended_xof_prefix() {
        let long = ExtendedBlake3Adapter::new().with_hash_size(64);
        let digest = long.digest(b"xof").unwrap();
        assert_eq!(digest.len(), 64);
        assert_eq!(&digest[..32], &blake3_hash_bytes(b"xof"));
    }

    #[test]
    fn test_incremental_matches_one_shot() {
        let extended = ExtendedBlake3Adapter::new();
        let mut hasher = extended.incremental().unwrap();
        hasher.update(b"part one, ").update(b"part two");
        assert_eq!(
            hasher.finalize_hex().unwrap(),
            extended.hash("part one, part two").unwrap()
        );
    }

    #[test]
    fn test_incremental_rejects_zero_size_and_empty() {
        let zero = ExtendedBlake3Adapter::new().with_hash_size(0);
        assert!(matches!(zero.incremental(), Err(HashError::InvalidParams(_))));

        let hasher = ExtendedBlake3Adapter::new().incremental().unwrap();
        assert!(matches!(hasher.finalize_bytes(), Err(HashError::EmptyInput)));
    }

    #[test]
    fn test_hash_reader_rejects_empty_stream() {
        let extended = ExtendedBlake3Adapter::new();
        assert!(matches!(
            extended.hash_reader(Cursor::new(Vec::<u8>::new())),
            Err(HashError::EmptyInput)
        ));
        assert!(matches!(
            extended.with_hash_size(0).hash_reader(Cursor::new(b"data".to_vec())),
            Err(HashError::InvalidParams(_))
        ));
    }

    #[test]
    fn test_hash_reader_matches_one_shot() {
        let extended = ExtendedBlake3Adapter::new();
        let data = "streamed content ".repeat(1000);
        assert_eq!(
            extended.hash_reader(Cursor::new(data.as_bytes())).unwrap(),
            extended.hash(&data).unwrap()
        );
    }

    #[test]
    fn test_mac() {
        let extended = ExtendedBlake3Adapter::new();
        let key = [9u8; KEY_LEN];
        let mac = extended.mac(&key, b"message").unwrap();
        assert_eq!(
            mac,
            blake3::keyed_hash(&key, b"message").to_hex().to_string()
        );
        assert!(extended.verify_mac(&key, b"message", &mac).is_ok());
        assert!(matches!(
            extended.verify_mac(&[8u8; KEY_LEN], b"message", &mac),
            Err(HashError::Mismatch)
        ));
    }

    #[test]
    fn test_mac_key_length() {
        let result = ExtendedBlake3Adapter::new().mac(&[1u8; 16], b"message");
        assert!(matches!(
            result,
            Err(HashError::InvalidKeyLength {
                expected: 32,
                actual: 16
            })
        ));
    }

    #[test]
    fn test_derive_key() {
        let extended = ExtendedBlake3Adapter::new();
        let key = extended
            .derive_key("hashkit 2026-10 session keys", b"material", 32)
            .unwrap();
        assert_eq!(
            key.as_slice(),
            &blake3::derive_key("hashkit 2026-10 session keys", b"material")
        );
        let other = extended
            .derive_key("hashkit 2026-10 other keys", b"material", 32)
            .unwrap();
        assert_ne!(key, other);
        assert_eq!(
            extended.derive_key("ctx", b"material", 48).unwrap().len(),
            48
        );
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(matches!(
            ExtendedBlake3Adapter::new().with_hash_size(0).hash("x"),
            Err(HashError::InvalidParams(_))
        ));
    }
}
