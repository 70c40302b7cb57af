//! Text encodings for digests and full-length digest comparison.
//!
//! Salted output and `encode_to_base64_hash` use standard padded Base64.
//! Unsalted `hash` output is lowercase hex without a prefix. The two are kept
//! apart per operation and never mixed.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use subtle::ConstantTimeEq;

use crate::error::{HashError, Result};

/// Encodes bytes as standard padded Base64.
pub fn to_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decodes standard padded Base64.
///
/// ## Errors
///
/// Returns `HashError::FormatInvalid` if `text` is not valid Base64.
pub fn from_base64(text: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(text)
        .map_err(|e| HashError::FormatInvalid(format!("not valid base64: {e}")))
}

/// Encodes bytes as lowercase hex.
pub fn to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Decodes hex text. Upper and lower case digits are both accepted.
///
/// ## Errors
///
/// Returns `HashError::FormatInvalid` if `text` is not valid hex.
pub fn from_hex(text: &str) -> Result<Vec<u8>> {
    hex::decode(text).map_err(|e| HashError::FormatInvalid(format!("not valid hex: {e}")))
}

/// Compares two digests without an early exit on the first differing byte.
///
/// A length difference returns `false` immediately; lengths are not secret.
pub fn digests_match(actual: &[u8], expected: &[u8]) -> bool {
    actual.ct_eq(expected).into()
}

/// Maps a comparison result onto the adapter verification outcome.
pub(crate) fn check(actual: &[u8], expected: &[u8]) -> Result<()> {
    if digests_match(actual, expected) {
        Ok(())
    } else {
        Err(HashError::Mismatch)
    }
}
