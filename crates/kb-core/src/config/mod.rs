//! Engine configuration. Every section deserializes with defaults so a
//! partial (or empty) TOML document is always valid.

pub mod cache_config;
pub mod defaults;
pub mod embedding_config;
pub mod intent_config;
pub mod normalization_config;
pub mod observability_config;
pub mod retrieval_config;
pub mod storage_config;

use serde::{Deserialize, Serialize};

pub use cache_config::CacheConfig;
pub use embedding_config::EmbeddingConfig;
pub use intent_config::{CategoryWeight, IntentConfig};
pub use normalization_config::NormalizationConfig;
pub use observability_config::ObservabilityConfig;
pub use retrieval_config::RetrievalConfig;
pub use storage_config::StorageConfig;

/// Root configuration for the knowledge retrieval engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KbConfig {
    pub storage: StorageConfig,
    pub embedding: EmbeddingConfig,
    pub retrieval: RetrievalConfig,
    pub cache: CacheConfig,
    pub normalization: NormalizationConfig,
    pub intents: IntentConfig,
    pub observability: ObservabilityConfig,
}

impl KbConfig {
    /// Parse a TOML document. Missing sections and fields take defaults.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Read and parse a TOML file.
    pub fn from_file(path: &std::path::Path) -> crate::errors::KbResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            crate::errors::KbError::ConfigError(format!("{}: {e}", path.display()))
        })?;
        let config = Self::from_toml(&raw)
            .map_err(|e| crate::errors::KbError::ConfigError(e.to_string()))?;
        config.retrieval.validate()?;
        Ok(config)
    }
}
