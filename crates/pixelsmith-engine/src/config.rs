//! Engine configuration

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use pixelsmith_sessions::RegistryConfig;

/// Tunables for the edit engine
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Session registry settings
    pub registry: RegistryConfig,
    /// Root directory for the filesystem sink
    pub storage_root: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            registry: RegistryConfig::default(),
            storage_root: PathBuf::from("static/uploads"),
        }
    }
}

impl EngineConfig {
    /// Parse a configuration from TOML
    pub fn from_toml_str(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }
}
