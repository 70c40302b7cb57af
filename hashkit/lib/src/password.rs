//! Password hashing with a built-in length policy.
//!
//! Passwords are checked against a [`PasswordPolicy`], salted with 32 fresh
//! random bytes, hashed with Argon2id (16-byte digest) or Blake2b (32-byte
//! digest), and stored as `Base64(salt || digest)`.
//!
//! The stored form has no algorithm tag or salt-length prefix. Verifiers must
//! use the same [`PasswordAlgorithm`] and the fixed [`SALT_LEN`].
//!
//! ## Examples
//!
//! ```rust
//! use hashkit::{Argon2Params, PasswordHashingService};
//!
//! // Lower the Argon2 cost to keep the example fast.
//! let service = PasswordHashingService::argon2id().with_argon2_params(Argon2Params {
//!     iterations: 1,
//!     memory_kib: 8 * 1024,
//!     parallelism: 1,
//!     hash_size: 16,
//! });
//!
//! let credential = service.hash_password("longenough1").unwrap();
//! assert!(service.verify_password("longenough1", credential.hash()).is_ok());
//! assert!(service.verify_password("longenough2", credential.hash()).is_err());
//!
//! assert!(service.hash_password("short").is_err());
//! ```

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::algorithms::Argon2Params;
use crate::algorithms::blake2b::{self, blake2b_digest};
use crate::encoding::{digests_match, from_base64, to_base64};
use crate::error::{HashError, Result};
use crate::salt::{SALT_LEN, combine, generate_salt, split};

/// Default minimum password length in characters.
pub const DEFAULT_MIN_LENGTH: usize = 8;

/// Digest used for passwords.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum PasswordAlgorithm {
    #[default]
    Argon2id,
    Blake2b,
}

/// Minimum-length password policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordPolicy {
    /// Minimum length in Unicode scalar values.
    pub min_length: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: DEFAULT_MIN_LENGTH,
        }
    }
}

impl PasswordPolicy {
    /// ## Errors
    ///
    /// Returns `HashError::PolicyViolation` for empty or too-short passwords.
    pub fn check(&self, password: &str) -> Result<()> {
        if password.is_empty() {
            return Err(HashError::PolicyViolation("password must not be empty".into()));
        }
        let length = password.chars().count();
        if length < self.min_length {
            return Err(HashError::PolicyViolation(format!(
                "password must be at least {} characters",
                self.min_length
            )));
        }
        Ok(())
    }
}

/// A stored password hash together with the salt it was made with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashedCredential {
    hash: String,
    salt: Vec<u8>,
}

impl HashedCredential {
    /// `Base64(salt || digest)`, the form to store.
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Raw salt, for diagnostics and audit.
    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    pub fn into_hash(self) -> String {
        self.hash
    }
}

/// Hashes and verifies passwords.
#[derive(Debug, Clone)]
pub struct PasswordHashingService {
    algorithm: PasswordAlgorithm,
    policy: PasswordPolicy,
    argon2: Argon2Params,
    blake2b_hash_size: usize,
}

impl Default for PasswordHashingService {
    fn default() -> Self {
        Self::new(PasswordAlgorithm::default())
    }
}

impl PasswordHashingService {
    pub fn new(algorithm: PasswordAlgorithm) -> Self {
        Self {
            algorithm,
            policy: PasswordPolicy::default(),
            argon2: Argon2Params::default(),
            blake2b_hash_size: blake2b::DEFAULT_OUTPUT_LEN,
        }
    }

    pub fn argon2id() -> Self {
        Self::new(PasswordAlgorithm::Argon2id)
    }

    pub fn blake2b() -> Self {
        Self::new(PasswordAlgorithm::Blake2b)
    }

    pub fn with_policy(mut self, policy: PasswordPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Argon2id cost parameters; unused by the Blake2b variant.
    pub fn with_argon2_params(mut self, params: Argon2Params) -> Self {
        self.argon2 = params;
        self
    }

    /// Blake2b digest length; unused by the Argon2id variant.
    pub fn with_blake2b_hash_size(mut self, hash_size: usize) -> Self {
        self.blake2b_hash_size = hash_size;
        self
    }

    pub fn algorithm(&self) -> PasswordAlgorithm {
        self.algorithm
    }

    pub fn policy(&self) -> &PasswordPolicy {
        &self.policy
    }

    /// Checks the policy, then hashes `password` under a fresh salt.
    ///
    /// ## Errors
    ///
    /// - `HashError::PolicyViolation` if the password fails the policy
    /// - `HashError::Entropy` if no salt could be generated
    /// - `HashError::InvalidParams` if the configured parameters are rejected
    pub fn hash_password(&self, password: &str) -> Result<HashedCredential> {
        self.policy.check(password)?;
        tracing::debug!(algorithm = %self.algorithm, "hashing password");

        let salt = generate_salt(SALT_LEN)?;
        let digest = self.derive(password, &salt)?;
        let hash = to_base64(&combine(&salt, &digest));
        Ok(HashedCredential { hash, salt })
    }

    /// Verifies `password` against a stored `Base64(salt || digest)`.
    ///
    /// ## Errors
    ///
    /// - `HashError::FormatInvalid` if `expected` isn't Base64 or is too short
    /// - `HashError::Incorrect` if the password doesn't match
    pub fn verify_password(&self, password: &str, expected: &str) -> Result<()> {
        tracing::debug!(algorithm = %self.algorithm, "verifying password");

        let combined = from_base64(expected)?;
        let (salt, digest) =
            split(&combined, SALT_LEN).map_err(|e| HashError::FormatInvalid(e.to_string()))?;
        let actual = self.derive(password, salt)?;
        if digests_match(&actual, digest) {
            Ok(())
        } else {
            Err(HashError::Incorrect)
        }
    }

    fn derive(&self, password: &str, salt: &[u8]) -> Result<Vec<u8>> {
        match self.algorithm {
            PasswordAlgorithm::Argon2id => self.argon2.derive(password.as_bytes(), salt),
            PasswordAlgorithm::Blake2b => {
                blake2b_digest(&[salt, password.as_bytes()], self.blake2b_hash_size)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap_argon() -> PasswordHashingService {
        PasswordHashingService::argon2id().with_argon2_params(Argon2Params {
            iterations: 1,
            memory_kib: 1024,
            parallelism: 1,
            hash_size: 16,
        })
    }

    #[test]
    fn test_policy_rejects_short() {
        let service = PasswordHashingService::blake2b();
        assert!(matches!(
            service.hash_password("short"),
            Err(HashError::PolicyViolation(_))
        ));
        assert!(matches!(
            service.hash_password(""),
            Err(HashError::PolicyViolation(_))
        ));
        assert!(service.hash_password("longenough1").is_ok());
    }

    #[test]
    fn test_policy_counts_characters() {
        let policy = PasswordPolicy::default();
        // 7 characters, 14 bytes
        assert!(policy.check("ééééééé").is_err());
        assert!(policy.check("éééééééé").is_ok());
        assert!(policy.check("パスワード🔐").is_err());
    }

    #[test]
    fn test_custom_policy() {
        let service =
            PasswordHashingService::blake2b().with_policy(PasswordPolicy { min_length: 3 });
        assert!(service.hash_password("abc").is_ok());
        assert!(service.hash_password("ab").is_err());
    }

    #[test]
    fn test_argon2_layout() {
        let credential = cheap_argon().hash_password("longenough1").unwrap();
        let combined = from_base64(credential.hash()).unwrap();
        assert_eq!(combined.len(), SALT_LEN + 16);
        assert_eq!(&combined[..SALT_LEN], credential.salt());
    }

    #[test]
    fn test_blake2b_layout() {
        let credential = PasswordHashingService::blake2b()
            .hash_password("longenough1")
            .unwrap();
        let combined = from_base64(credential.hash()).unwrap();
        assert_eq!(combined.len(), SALT_LEN + 32);
    }

    #[test]
    fn test_round_trip_both_algorithms() {
        for service in [cheap_argon(), PasswordHashingService::blake2b()] {
            let credential = service.hash_password("correct horse").unwrap();
            assert!(service.verify_password("correct horse", credential.hash()).is_ok());
            assert!(matches!(
                service.verify_password("battery staple", credential.hash()),
                Err(HashError::Incorrect)
            ));
        }
    }

    #[test]
    fn test_salt_uniqueness() {
        let service = PasswordHashingService::blake2b();
        let a = service.hash_password("same password").unwrap();
        let b = service.hash_password("same password").unwrap();
        assert_ne!(a.salt(), b.salt());
        assert_ne!(a.hash(), b.hash());
    }

    #[test]
    fn test_verify_invalid_base64() {
        assert!(matches!(
            PasswordHashingService::blake2b().verify_password("password1", "***"),
            Err(HashError::FormatInvalid(_))
        ));
    }

    #[test]
    fn test_verify_truncated_buffer() {
        let short = to_base64(&[0u8; 10]);
        assert!(matches!(
            PasswordHashingService::blake2b().verify_password("password1", &short),
            Err(HashError::FormatInvalid(_))
        ));
    }

    #[test]
    fn test_corrupted_digest_is_incorrect() {
        let service = PasswordHashingService::blake2b();
        let credential = service.hash_password("longenough1").unwrap();
        let mut combined = from_base64(credential.hash()).unwrap();
        combined[SALT_LEN] ^= 0x01;
        let corrupted = to_base64(&combined);
        assert!(matches!(
            service.verify_password("longenough1", &corrupted),
            Err(HashError::Incorrect)
        ));
    }

    #[test]
    fn test_algorithm_names() {
        assert_eq!(PasswordAlgorithm::Argon2id.to_string(), "argon2id");
        assert_eq!("BLAKE2B".parse::<PasswordAlgorithm>().unwrap(), PasswordAlgorithm::Blake2b);
    }

    #[tracing_test::traced_test]
    #[test]
    fn test_password_never_logged() {
        let service = PasswordHashingService::blake2b();
        let credential = service.hash_password("hunter2hunter2").unwrap();
        service
            .verify_password("hunter2hunter2", credential.hash())
            .unwrap();

        assert!(logs_contain("hashing password"));
        assert!(logs_contain("verifying password"));
        assert!(!logs_contain("hunter2hunter2"));
        assert!(!logs_contain(credential.hash()));
    }

    #[test]
    fn test_zero_blake2b_size_is_rejected() {
        let service = PasswordHashingService::blake2b().with_blake2b_hash_size(0);
        assert!(matches!(
            service.hash_password("longenough1"),
            Err(HashError::InvalidParams(_))
        ));

        // A stored value holding only a salt must never verify.
        let salt_only = to_base64(&[4u8; SALT_LEN]);
        assert!(matches!(
            service.verify_password("totally-different", &salt_only),
            Err(HashError::InvalidParams(_))
        ));
    }

    #[test]
    fn test_cross_algorithm_does_not_verify() {
        let credential = PasswordHashingService::blake2b()
            .hash_password("longenough1")
            .unwrap();
        assert!(
            cheap_argon()
                .verify_password("longenough1", credential.hash())
                .unwrap_err()
                .is_mismatch()
        );
    }
}
