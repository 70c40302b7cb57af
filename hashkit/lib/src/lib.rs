//! Interchangeable hash algorithms behind one contract.
//!
//! Every algorithm implements [`HashAlgorithm`]: `hash`, `verify`,
//! `encode_to_base64_hash` and `verify_base64_hash`. The registry maps a key
//! onto a fresh [`HashService`] so call sites can swap algorithms by name, and
//! [`PasswordHashingService`] adds a length policy and salt handling on top of
//! Argon2id or Blake2b.
//!
//! ## Algorithms
//!
//! | Key | Algorithm | `hash` output |
//! |-----|-----------|---------------|
//! | `argon2` | Argon2id | Base64(salt ‖ digest) |
//! | `blake2` | BLAKE2b, `hash(salt ‖ input)` | Base64(salt ‖ digest) |
//! | `blake3` | BLAKE3 | hex |
//! | `extended_blake3` | BLAKE3 + incremental, MAC, KDF, streams | hex |
//! | `fnv1a` | FNV-1a 64 / 32 | hex |
//! | `murmur3` | MurmurHash3 x86_32 / x64_128 | hex |
//! | `siphash` | SipHash-2-4 (16-byte key) | hex |
//! | `xxhash` | XXH64 / XXH32 | hex |
//!
//! ## When to Use Which
//!
//! - **xxHash, MurmurHash3, FNV-1a**: fast, non-cryptographic. Cache keys,
//!   change detection, deduplication.
//! - **SipHash**: keyed, short inputs, hash-flooding resistance.
//! - **BLAKE3, BLAKE2b**: cryptographic integrity and fingerprints.
//! - **Argon2id**: passwords. Deliberately slow.
//!
//! ## Examples
//!
//! ```rust
//! use hashkit::{HashAlgorithm, PasswordHashingService, create_service};
//!
//! // Swap the algorithm by changing the key only
//! let service = create_service("blake3").unwrap();
//! let digest = service.hash("Hello World").unwrap();
//! assert!(service.verify("Hello World", &digest).is_ok());
//!
//! // Passwords go through the password service
//! let passwords = PasswordHashingService::blake2b();
//! let credential = passwords.hash_password("longenough1").unwrap();
//! assert!(passwords.verify_password("longenough1", credential.hash()).is_ok());
//! ```

pub mod algorithms;
pub mod config;
pub mod encoding;
mod error;
pub mod password;
pub mod registry;
pub mod salt;

pub use algorithms::argon::{
    DEFAULT_ITERATIONS, DEFAULT_MEMORY_COST_KIB, DEFAULT_OUTPUT_LEN, DEFAULT_PARALLELISM,
};
pub use algorithms::blake::{blake3_hash, blake3_hash_bytes};
pub use algorithms::xx::{xx_hash, xx_hash_bytes};
pub use algorithms::{
    Argon2Params, Argon2idAdapter, Blake2bAdapter, Blake3Adapter, ExtendedBlake3Adapter,
    Fnv1aAdapter, HashAlgorithm, IncrementalHasher, Murmur3Adapter, SipHashAdapter,
    XxHashAdapter,
};
pub use config::HashingConfig;
pub use error::{HashError, Result};
pub use password::{HashedCredential, PasswordAlgorithm, PasswordHashingService, PasswordPolicy};
pub use registry::{Algorithm, HashService, available_algorithms, create_service};
pub use salt::SALT_LEN;
