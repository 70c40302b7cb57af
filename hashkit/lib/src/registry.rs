//! Name-keyed registry over the closed set of algorithms.
//!
//! [`create_service`] maps a case-insensitive key onto a fresh
//! [`HashService`]. The service is then configured with chained builder calls
//! and used through the [`HashAlgorithm`] contract. Configuration calls that
//! mean nothing for the selected algorithm are accepted and ignored, so call
//! sites can swap algorithms by changing only the key.
//!
//! ## Examples
//!
//! ```rust
//! use hashkit::{HashAlgorithm, create_service};
//!
//! let service = create_service("XXHASH").unwrap().with_seed(42).with_iterations(3);
//! let hash = service.hash("content").unwrap();
//! assert!(service.verify("content", &hash).is_ok());
//!
//! assert!(create_service("md5").is_err());
//! ```

use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

use crate::algorithms::{
    Argon2Params, Argon2idAdapter, Blake2bAdapter, Blake3Adapter, ExtendedBlake3Adapter,
    Fnv1aAdapter, HashAlgorithm, Murmur3Adapter, SipHashAdapter, XxHashAdapter,
};
use crate::error::{HashError, Result};

/// Registry keys.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum Algorithm {
    #[strum(serialize = "argon2")]
    Argon2,
    #[strum(serialize = "blake2")]
    Blake2,
    #[strum(serialize = "blake3")]
    Blake3,
    #[strum(serialize = "fnv1a")]
    Fnv1a,
    #[strum(serialize = "murmur3")]
    Murmur3,
    #[strum(serialize = "siphash")]
    SipHash,
    #[strum(serialize = "xxhash")]
    XxHash,
    #[strum(serialize = "extended_blake3")]
    ExtendedBlake3,
}

impl Algorithm {
    /// Every registered algorithm, in key order.
    pub fn all() -> Vec<Algorithm> {
        Algorithm::iter().collect()
    }

    /// The registry key.
    pub fn key(self) -> &'static str {
        self.into()
    }

    /// `true` when `hash` emits `Base64(salt || digest)` rather than hex.
    pub fn is_salted(self) -> bool {
        matches!(self, Algorithm::Argon2 | Algorithm::Blake2)
    }

    /// Builds a new, default-configured service.
    pub fn create(self) -> HashService {
        match self {
            Algorithm::Argon2 => HashService::Argon2(Argon2idAdapter::new()),
            Algorithm::Blake2 => HashService::Blake2(Blake2bAdapter::new()),
            Algorithm::Blake3 => HashService::Blake3(Blake3Adapter),
            Algorithm::Fnv1a => HashService::Fnv1a(Fnv1aAdapter::new()),
            Algorithm::Murmur3 => HashService::Murmur3(Murmur3Adapter::new()),
            Algorithm::SipHash => HashService::SipHash(SipHashAdapter::unkeyed()),
            Algorithm::XxHash => HashService::XxHash(XxHashAdapter::new()),
            Algorithm::ExtendedBlake3 => HashService::ExtendedBlake3(ExtendedBlake3Adapter::new()),
        }
    }
}

/// Looks up `key` and returns a brand-new service for it.
///
/// Matching is ASCII case-insensitive and exact: no trimming, no prefixes,
/// no default algorithm.
///
/// ## Errors
///
/// Returns `HashError::UnknownAlgorithm` for keys that aren't registered.
pub fn create_service(key: &str) -> Result<HashService> {
    let algorithm: Algorithm = key
        .parse()
        .map_err(|_| HashError::UnknownAlgorithm(key.to_string()))?;
    tracing::debug!(algorithm = algorithm.key(), "creating hash service");
    Ok(algorithm.create())
}

/// Keys accepted by [`create_service`].
pub fn available_algorithms() -> Vec<&'static str> {
    Algorithm::iter().map(Algorithm::key).collect()
}

/// A configured instance of one registered algorithm.
#[derive(Debug, Clone)]
pub enum HashService {
    Argon2(Argon2idAdapter),
    Blake2(Blake2bAdapter),
    Blake3(Blake3Adapter),
    Fnv1a(Fnv1aAdapter),
    Murmur3(Murmur3Adapter),
    SipHash(SipHashAdapter),
    XxHash(XxHashAdapter),
    ExtendedBlake3(ExtendedBlake3Adapter),
}

macro_rules! dispatch {
    ($service:expr, $adapter:ident => $call:expr) => {
        match $service {
            HashService::Argon2($adapter) => $call,
            HashService::Blake2($adapter) => $call,
            HashService::Blake3($adapter) => $call,
            HashService::Fnv1a($adapter) => $call,
            HashService::Murmur3($adapter) => $call,
            HashService::SipHash($adapter) => $call,
            HashService::XxHash($adapter) => $call,
            HashService::ExtendedBlake3($adapter) => $call,
        }
    };
}

impl HashService {
    pub fn algorithm(&self) -> Algorithm {
        match self {
            HashService::Argon2(_) => Algorithm::Argon2,
            HashService::Blake2(_) => Algorithm::Blake2,
            HashService::Blake3(_) => Algorithm::Blake3,
            HashService::Fnv1a(_) => Algorithm::Fnv1a,
            HashService::Murmur3(_) => Algorithm::Murmur3,
            HashService::SipHash(_) => Algorithm::SipHash,
            HashService::XxHash(_) => Algorithm::XxHash,
            HashService::ExtendedBlake3(_) => Algorithm::ExtendedBlake3,
        }
    }

    /// Salt for Argon2id and Blake2b; ignored elsewhere.
    pub fn with_salt(self, salt: &[u8]) -> Self {
        match self {
            HashService::Argon2(a) => HashService::Argon2(a.with_salt(salt)),
            HashService::Blake2(a) => HashService::Blake2(a.with_salt(salt)),
            other => other,
        }
    }

    /// Time cost for Argon2id; ignored elsewhere.
    pub fn with_iterations(self, iterations: u32) -> Self {
        match self {
            HashService::Argon2(a) => HashService::Argon2(a.with_iterations(iterations)),
            other => other,
        }
    }

    /// Memory cost in KiB for Argon2id; ignored elsewhere.
    pub fn with_memory_size(self, memory_kib: u32) -> Self {
        match self {
            HashService::Argon2(a) => HashService::Argon2(a.with_memory_size(memory_kib)),
            other => other,
        }
    }

    /// Lanes for Argon2id; ignored elsewhere.
    pub fn with_degree_of_parallelism(self, parallelism: u32) -> Self {
        match self {
            HashService::Argon2(a) => {
                HashService::Argon2(a.with_degree_of_parallelism(parallelism))
            }
            other => other,
        }
    }

    /// Replaces every Argon2id cost parameter; ignored elsewhere.
    pub fn with_argon2_params(self, params: Argon2Params) -> Self {
        match self {
            HashService::Argon2(a) => HashService::Argon2(a.with_params(params)),
            other => other,
        }
    }

    /// Output size in bytes.
    ///
    /// Honoured by Argon2id, Blake2b, extended Blake3, MurmurHash3 (4|16),
    /// xxHash (4|8), SipHash (8|16) and FNV-1a (4|8). Plain Blake3 ignores it.
    /// Sizes the primitive doesn't support fail at hash time.
    pub fn with_hash_size(self, hash_size: usize) -> Self {
        match self {
            HashService::Argon2(a) => HashService::Argon2(a.with_hash_size(hash_size)),
            HashService::Blake2(a) => HashService::Blake2(a.with_hash_size(hash_size)),
            HashService::ExtendedBlake3(a) => {
                HashService::ExtendedBlake3(a.with_hash_size(hash_size))
            }
            HashService::Murmur3(a) => HashService::Murmur3(a.with_hash_size(hash_size)),
            HashService::XxHash(a) => HashService::XxHash(a.with_hash_size(hash_size)),
            HashService::SipHash(a) => HashService::SipHash(a.with_hash_size(hash_size)),
            HashService::Fnv1a(a) => HashService::Fnv1a(a.with_hash_size(hash_size)),
            other @ HashService::Blake3(_) => other,
        }
    }

    /// Seed for MurmurHash3 and xxHash; ignored elsewhere.
    pub fn with_seed(self, seed: u64) -> Self {
        match self {
            HashService::Murmur3(a) => HashService::Murmur3(a.with_seed(seed)),
            HashService::XxHash(a) => HashService::XxHash(a.with_seed(seed)),
            other => other,
        }
    }

    /// Key for SipHash; ignored elsewhere.
    ///
    /// ## Errors
    ///
    /// Returns `HashError::InvalidKeyLength` when the service is SipHash and
    /// `key` isn't exactly 16 bytes.
    pub fn with_key(self, key: &[u8]) -> Result<Self> {
        match self {
            HashService::SipHash(a) => a.with_key(key).map(HashService::SipHash),
            other => Ok(other),
        }
    }

    /// The extended Blake3 adapter, when that's the selected algorithm.
    pub fn as_extended_blake3(&self) -> Option<&ExtendedBlake3Adapter> {
        match self {
            HashService::ExtendedBlake3(a) => Some(a),
            _ => None,
        }
    }
}

impl HashAlgorithm for HashService {
    fn name(&self) -> &'static str {
        dispatch!(self, a => a.name())
    }

    fn digest(&self, data: &[u8]) -> Result<Vec<u8>> {
        dispatch!(self, a => a.digest(data))
    }

    fn hash(&self, input: &str) -> Result<String> {
        dispatch!(self, a => a.hash(input))
    }

    fn verify(&self, input: &str, expected: &str) -> Result<()> {
        dispatch!(self, a => a.verify(input, expected))
    }

    fn encode_to_base64_hash(&self, data: &[u8]) -> Result<String> {
        dispatch!(self, a => a.encode_to_base64_hash(data))
    }

    fn verify_base64_hash(&self, data: &[u8], expected: &str) -> Result<()> {
        dispatch!(self, a => a.verify_base64_hash(data, expected))
    }
}
