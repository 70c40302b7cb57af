//! TOML configuration for cost parameters and the password service.
//!
//! Every section and field is optional; anything missing takes the library
//! default.
//!
//! ```toml
//! [argon2]
//! iterations = 4
//! memory_kib = 1048576
//! parallelism = 8
//! hash_size = 16
//!
//! [blake2b]
//! hash_size = 32
//!
//! [password]
//! algorithm = "argon2id"
//! min_length = 8
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::algorithms::Argon2Params;
use crate::algorithms::blake2b;
use crate::error::{HashError, Result};
use crate::password::{
    DEFAULT_MIN_LENGTH, PasswordAlgorithm, PasswordHashingService, PasswordPolicy,
};
use crate::registry::HashService;

/// Environment variable naming a config file, used when no path is given.
pub const CONFIG_ENV: &str = "HASHKIT_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HashingConfig {
    pub argon2: Argon2Params,
    pub blake2b: Blake2bSettings,
    pub password: PasswordSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Blake2bSettings {
    pub hash_size: usize,
}

impl Default for Blake2bSettings {
    fn default() -> Self {
        Self {
            hash_size: blake2b::DEFAULT_OUTPUT_LEN,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PasswordSettings {
    pub algorithm: PasswordAlgorithm,
    pub min_length: usize,
}

impl Default for PasswordSettings {
    fn default() -> Self {
        Self {
            algorithm: PasswordAlgorithm::default(),
            min_length: DEFAULT_MIN_LENGTH,
        }
    }
}

impl HashingConfig {
    /// Parses TOML text.
    ///
    /// ## Errors
    ///
    /// Returns `HashError::Config` for malformed TOML or unknown keys.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| HashError::Config(e.to_string()))
    }

    /// Reads and parses a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| HashError::Config(format!("failed to read '{}': {e}", path.display())))?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded hashing config");
        Ok(config)
    }

    /// Loads `path`, else the file named by `HASHKIT_CONFIG`, else defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// A password service configured from the `[password]`, `[argon2]` and
    /// `[blake2b]` sections.
    pub fn password_service(&self) -> PasswordHashingService {
        PasswordHashingService::new(self.password.algorithm)
            .with_policy(PasswordPolicy {
                min_length: self.password.min_length,
            })
            .with_argon2_params(self.argon2)
            .with_blake2b_hash_size(self.blake2b.hash_size)
    }

    /// Applies the configured cost parameters to a registry service.
    ///
    /// Only Argon2id and Blake2b services have configurable costs here; others
    /// are returned unchanged.
    pub fn apply(&self, service: HashService) -> HashService {
        match service {
            HashService::Argon2(_) => service.with_argon2_params(self.argon2),
            HashService::Blake2(_) => service.with_hash_size(self.blake2b.hash_size),
            other => other,
        }
    }
}
