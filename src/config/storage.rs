//! Storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;
use crate::domain::sleep::{DEFAULT_HISTORY_LIMIT, MAX_HISTORY_LIMIT};

/// Where preferences and history are kept
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Directory holding the JSON files of the file backend
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Number of calculations kept per user
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

/// Storage backend selection
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    #[default]
    File,
}

impl StorageConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(1..=MAX_HISTORY_LIMIT).contains(&self.history_limit) {
            return Err(ValidationError::InvalidHistoryLimit {
                min: 1,
                max: MAX_HISTORY_LIMIT,
                actual: self.history_limit,
            });
        }
        if self.backend == StorageBackend::File && self.data_dir.as_os_str().is_empty() {
            return Err(ValidationError::EmptyDataDir);
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            data_dir: default_data_dir(),
            history_limit: default_history_limit(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_defaults() {
        let config = StorageConfig::default();
        assert_eq!(config.backend, StorageBackend::File);
        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert_eq!(config.history_limit, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_history_limit_bounds() {
        for limit in [0, 51] {
            let config = StorageConfig {
                history_limit: limit,
                ..Default::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ValidationError::InvalidHistoryLimit { actual, .. }) if actual == limit
            ));
        }
    }

    #[test]
    fn test_memory_backend_ignores_data_dir() {
        let config = StorageConfig {
            backend: StorageBackend::Memory,
            data_dir: PathBuf::new(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());

        let config = StorageConfig {
            data_dir: PathBuf::new(),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::EmptyDataDir));
    }
}
