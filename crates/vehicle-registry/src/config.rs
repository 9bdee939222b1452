//! Configuration management for the vehicle registry.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::store::{CorruptPolicy, SeedPolicy};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "vehicle-registry";

/// Default database file name.
const DATABASE_FILE_NAME: &str = "registry.db";

/// Prefix for environment variable overrides.
const ENV_PREFIX: &str = "VREG_";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `VREG_`, sections split on `__`)
/// 2. TOML config file at `~/.config/vehicle-registry/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Registry behaviour.
    pub registry: RegistryConfig,
    /// Admin gate.
    pub admin: AdminConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the database file.
    /// Defaults to `~/.local/share/vehicle-registry/registry.db`
    pub database_path: Option<PathBuf>,
    /// Key under which the vehicle list is stored.
    pub storage_key: String,
}

/// Registry-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Short registry name, used as the export filename prefix.
    pub name: String,
    /// Contents installed when nothing is stored yet.
    pub seed: SeedPolicy,
    /// Handling of an undecodable stored list.
    pub on_corrupt: CorruptPolicy,
}

/// Admin gate configuration.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Shared password required for update, delete, and import.
    pub password: String,
}

impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: None, // Will be resolved to default at runtime
            storage_key: "vnr-parking-vehicles".to_string(),
        }
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            name: "vnr".to_string(),
            seed: SeedPolicy::Sample,
            on_corrupt: CorruptPolicy::Fail,
        }
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            password: "vnr2024".to_string(),
        }
    }
}

impl AdminConfig {
    /// Whether `candidate` matches the configured password.
    #[must_use]
    pub fn verify(&self, candidate: &str) -> bool {
        let expected = self.password.as_bytes();
        let given = candidate.as_bytes();
        expected.len() == given.len()
            && expected
                .iter()
                .zip(given)
                .fold(0u8, |acc, (a, b)| acc | (a ^ b))
                == 0
    }

    /// Check `candidate` against the configured password.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AdminAuth`] on mismatch.
    pub fn authorize(&self, candidate: &str) -> Result<()> {
        if self.verify(candidate) {
            Ok(())
        } else {
            Err(Error::AdminAuth)
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.storage.storage_key.trim().is_empty() {
            return Err(Error::ConfigValidation {
                message: "storage_key must not be empty".to_string(),
            });
        }

        let name = &self.registry.name;
        if name.trim().is_empty() {
            return Err(Error::ConfigValidation {
                message: "registry name must not be empty".to_string(),
            });
        }
        if name.contains(['/', '\\']) {
            return Err(Error::ConfigValidation {
                message: format!("registry name must not contain path separators: {name}"),
            });
        }

        if self.admin.password.is_empty() {
            return Err(Error::ConfigValidation {
                message: "admin password must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }
}
