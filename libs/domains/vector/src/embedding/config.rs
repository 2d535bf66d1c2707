use std::path::PathBuf;

use core_config::{ConfigError, FromEnv};

use crate::models::EmbeddingModel;

/// Local embedding model configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmbeddingConfig {
    pub model: EmbeddingModel,
    /// Where model files are downloaded; the backend default when unset
    pub cache_dir: Option<PathBuf>,
}

impl EmbeddingConfig {
    pub fn new(model: EmbeddingModel) -> Self {
        Self {
            model,
            cache_dir: None,
        }
    }

    pub fn with_cache_dir(mut self, cache_dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(cache_dir.into());
        self
    }
}

impl FromEnv for EmbeddingConfig {
    /// - EMBEDDING_MODEL: defaults to Xenova/all-MiniLM-L6-v2
    /// - EMBEDDING_CACHE_DIR: optional
    fn from_env() -> Result<Self, ConfigError> {
        let model = match std::env::var("EMBEDDING_MODEL") {
            Ok(raw) if !raw.is_empty() => {
                raw.parse().map_err(|e| ConfigError::ParseError {
                    key: "EMBEDDING_MODEL".to_string(),
                    details: format!("{}", e),
                })?
            }
            _ => EmbeddingModel::default(),
        };

        let cache_dir = std::env::var("EMBEDDING_CACHE_DIR")
            .ok()
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from);

        Ok(Self { model, cache_dir })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedding_config_defaults() {
        temp_env::with_vars(
            [("EMBEDDING_MODEL", None::<&str>), ("EMBEDDING_CACHE_DIR", None)],
            || {
                let config = EmbeddingConfig::from_env().unwrap();
                assert_eq!(config, EmbeddingConfig::default());
                assert_eq!(config.model.model_id(), "Xenova/all-MiniLM-L6-v2");
            },
        );
    }

    #[test]
    fn test_embedding_config_custom() {
        temp_env::with_vars(
            [
                ("EMBEDDING_MODEL", Some("BAAI/bge-base-en-v1.5")),
                ("EMBEDDING_CACHE_DIR", Some("/var/cache/models")),
            ],
            || {
                let config = EmbeddingConfig::from_env().unwrap();
                assert_eq!(config.model, EmbeddingModel::BgeBaseEnV15);
                assert_eq!(config.cache_dir, Some(PathBuf::from("/var/cache/models")));
            },
        );
    }

    #[test]
    fn test_embedding_config_unknown_model() {
        temp_env::with_var("EMBEDDING_MODEL", Some("not-a-model"), || {
            let err = EmbeddingConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("EMBEDDING_MODEL"));
        });
    }
}
