//! Hash algorithm adapters.
//!
//! Every adapter wraps exactly one primitive behind [`HashAlgorithm`]. The
//! trait's provided methods cover the unsalted algorithms, which return
//! lowercase hex from [`HashAlgorithm::hash`]. Salted adapters (Argon2id and
//! Blake2b) override `hash` and `verify` to emit and consume
//! `Base64(salt || digest)` instead.
//!
//! | Adapter | Salted | `hash` output |
//! |---------|--------|---------------|
//! | [`Argon2idAdapter`] | yes | Base64 |
//! | [`Blake2bAdapter`] | yes | Base64 |
//! | [`Blake3Adapter`] | no | hex |
//! | [`ExtendedBlake3Adapter`] | no | hex |
//! | [`Murmur3Adapter`] | no | hex |
//! | [`XxHashAdapter`] | no | hex |
//! | [`Fnv1aAdapter`] | no | hex |
//! | [`SipHashAdapter`] | no (keyed) | hex |

pub mod argon;
pub mod blake;
pub mod blake2b;
pub mod fnv1a;
pub mod murmur;
pub mod sip;
pub mod xx;

pub use argon::{Argon2Params, Argon2idAdapter};
pub use blake::{Blake3Adapter, ExtendedBlake3Adapter, IncrementalHasher};
pub use blake2b::Blake2bAdapter;
pub use fnv1a::Fnv1aAdapter;
pub use murmur::Murmur3Adapter;
pub use sip::SipHashAdapter;
pub use xx::XxHashAdapter;

use crate::encoding::{check, from_base64, from_hex, to_base64, to_hex};
use crate::error::{HashError, Result};
use crate::salt::{SALT_LEN, combine, generate_salt, split};

/// The contract shared by every hash algorithm.
///
/// Empty input is rejected with `HashError::EmptyInput` on every entry point,
/// for every algorithm.
pub trait HashAlgorithm {
    /// Short algorithm name used in log events.
    fn name(&self) -> &'static str;

    /// Unsalted digest of raw bytes under the current configuration.
    fn digest(&self, data: &[u8]) -> Result<Vec<u8>>;

    /// Hashes `input`, returning lowercase hex for unsalted algorithms.
    fn hash(&self, input: &str) -> Result<String> {
        require_input(input.as_bytes())?;
        tracing::debug!(algorithm = self.name(), "hashing input");
        self.digest(input.as_bytes()).map(|d| to_hex(&d))
    }

    /// Recomputes the hash of `input` and compares it with `expected`.
    ///
    /// ## Errors
    ///
    /// - `HashError::FormatInvalid` if `expected` can't be decoded
    /// - `HashError::Mismatch` if the digests differ
    fn verify(&self, input: &str, expected: &str) -> Result<()> {
        require_input(input.as_bytes())?;
        tracing::debug!(algorithm = self.name(), "verifying input");
        let expected = from_hex(expected)?;
        check(&self.digest(input.as_bytes())?, &expected)
    }

    /// Unsalted digest of `data`, Base64 encoded.
    fn encode_to_base64_hash(&self, data: &[u8]) -> Result<String> {
        require_input(data)?;
        self.digest(data).map(|d| to_base64(&d))
    }

    /// Recomputes [`HashAlgorithm::encode_to_base64_hash`] and compares.
    fn verify_base64_hash(&self, data: &[u8], expected: &str) -> Result<()> {
        require_input(data)?;
        let expected = from_base64(expected)?;
        check(&self.digest(data)?, &expected)
    }
}

pub(crate) fn require_input(data: &[u8]) -> Result<()> {
    if data.is_empty() {
        Err(HashError::EmptyInput)
    } else {
        Ok(())
    }
}

/// `Base64(salt || f(salt, input))`, using `salt` or a fresh one.
pub(crate) fn salted_hash<F>(salt: Option<&[u8]>, input: &str, derive: F) -> Result<String>
where
    F: Fn(&[u8], &[u8]) -> Result<Vec<u8>>,
{
    require_input(input.as_bytes())?;
    let generated;
    let salt = match salt {
        Some(salt) => salt,
        None => {
            generated = generate_salt(SALT_LEN)?;
            generated.as_slice()
        }
    };
    let digest = derive(salt, input.as_bytes())?;
    Ok(to_base64(&combine(salt, &digest)))
}

/// Splits `expected` at `salt_len`, re-derives with the embedded salt and compares.
pub(crate) fn salted_verify<F>(
    salt_len: usize,
    input: &str,
    expected: &str,
    derive: F,
) -> Result<()>
where
    F: Fn(&[u8], &[u8]) -> Result<Vec<u8>>,
{
    require_input(input.as_bytes())?;
    let combined = from_base64(expected)?;
    let (salt, digest) =
        split(&combined, salt_len).map_err(|e| HashError::FormatInvalid(e.to_string()))?;
    check(&derive(salt, input.as_bytes())?, digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xor_derive(salt: &[u8], input: &[u8]) -> Result<Vec<u8>> {
        Ok(input
            .iter()
            .zip(salt.iter().cycle())
            .map(|(a, b)| a ^ b)
            .collect())
    }

    #[test]
    fn test_salted_hash_embeds_given_salt() {
        let salt = [7u8; SALT_LEN];
        let encoded = salted_hash(Some(&salt[..]), "abc", xor_derive).unwrap();
        let combined = from_base64(&encoded).unwrap();
        assert_eq!(&combined[..SALT_LEN], &salt);
        assert_eq!(combined.len(), SALT_LEN + 3);
    }

    #[test]
    fn test_salted_verify_round_trip() {
        let encoded = salted_hash(None, "abc", xor_derive).unwrap();
        assert!(salted_verify(SALT_LEN, "abc", &encoded, xor_derive).is_ok());
        assert!(matches!(
            salted_verify(SALT_LEN, "abd", &encoded, xor_derive),
            Err(HashError::Mismatch)
        ));
    }

    #[test]
    fn test_salted_verify_short_buffer_is_format_error() {
        let short = to_base64(&[1, 2, 3]);
        assert!(matches!(
            salted_verify(SALT_LEN, "abc", &short, xor_derive),
            Err(HashError::FormatInvalid(_))
        ));
    }

    #[test]
    fn test_salted_hash_rejects_empty() {
        assert!(matches!(
            salted_hash(None, "", xor_derive),
            Err(HashError::EmptyInput)
        ));
    }
}
