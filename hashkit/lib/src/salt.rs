//! Salt generation and `salt || digest` packing.
//!
//! A combined buffer is the salt immediately followed by the digest. It
//! carries no length prefix or algorithm tag, so the verifier must know the
//! salt length up front. Every salted path in this crate uses [`SALT_LEN`].
//!
//! ## Examples
//!
//! ```rust
//! use hashkit::salt::{SALT_LEN, combine, generate_salt, split};
//!
//! let salt = generate_salt(SALT_LEN).unwrap();
//! let combined = combine(&salt, b"digest");
//!
//! let (s, d) = split(&combined, SALT_LEN).unwrap();
//! assert_eq!(s, salt.as_slice());
//! assert_eq!(d, b"digest");
//! ```

use rand::RngCore;
use rand::rngs::OsRng;

use crate::error::{HashError, Result};

/// Salt length in bytes for the Argon2id and Blake2b paths.
pub const SALT_LEN: usize = 32;

/// Fills `size` bytes from the operating system CSPRNG.
///
/// ## Errors
///
/// Returns `HashError::Entropy` if the random source fails. There is no
/// fallback source, so callers should treat this as fatal.
pub fn generate_salt(size: usize) -> Result<Vec<u8>> {
    let mut salt = vec![0u8; size];
    OsRng.try_fill_bytes(&mut salt).map_err(|e| {
        tracing::warn!(size, "operating system random source failed");
        HashError::Entropy(e.to_string())
    })?;
    Ok(salt)
}

/// Concatenates `salt` and `hash` into a single buffer.
pub fn combine(salt: &[u8], hash: &[u8]) -> Vec<u8> {
    let mut combined = Vec::with_capacity(salt.len() + hash.len());
    combined.extend_from_slice(salt);
    combined.extend_from_slice(hash);
    combined
}

/// Splits a combined buffer into `(salt, hash)` at `salt_len`.
///
/// ## Errors
///
/// Returns `HashError::InvalidLength` if `combined` is shorter than `salt_len`.
pub fn split(combined: &[u8], salt_len: usize) -> Result<(&[u8], &[u8])> {
    if combined.len() < salt_len {
        return Err(HashError::InvalidLength {
            expected: salt_len,
            actual: combined.len(),
        });
    }
    Ok(combined.split_at(salt_len))
}
