//! File-based Sleep Store Adapter
//!
//! Stores each key as a JSON file on disk, wrapped in a small envelope
//! carrying the write time and format version:
//!
//! ```text
//! <base>/sleep_app_sleep_history_<user>.json
//! { "value": [...], "timestamp": "2024-06-14T21:03:00Z", "version": "1.0" }
//! ```

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::sleep::{CalculationRecord, SleepHistory, UserPreferences};
use crate::ports::{history_key, preferences_key, SleepStore, StorageError};

/// Prefix shared by every file this store writes.
pub const STORAGE_PREFIX: &str = "sleep_app_";

/// Envelope format version.
pub const STORAGE_VERSION: &str = "1.0";

#[derive(Debug, Serialize, Deserialize)]
struct Envelope<T> {
    value: T,
    timestamp: Timestamp,
    version: String,
}

/// File-based storage for preferences and history
#[derive(Debug, Clone)]
pub struct FileSleepStore {
    base_path: PathBuf,
}

impl FileSleepStore {
    /// Create a new file store rooted at `base_path`
    ///
    /// The directory is created on first write.
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Path of the file holding `key`
    fn key_path(&self, key: &str) -> PathBuf {
        self.base_path.join(format!("{}{}.json", STORAGE_PREFIX, key))
    }

    async fn read_value<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let path = self.key_path(key);
        let json = match fs::read_to_string(&path).await {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StorageError::Io(e.to_string())),
        };

        let envelope: Envelope<T> =
            serde_json::from_str(&json).map_err(|e| StorageError::Deserialization {
                key: key.to_string(),
                reason: e.to_string(),
            })?;

        if envelope.version != STORAGE_VERSION {
            tracing::debug!(key, version = %envelope.version, "Reading value written by another version");
        }

        Ok(Some(envelope.value))
    }

    async fn write_value<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| StorageError::Io(e.to_string()))?;

        let envelope = Envelope {
            value,
            timestamp: Timestamp::now(),
            version: STORAGE_VERSION.to_string(),
        };
        let json =
            serde_json::to_string_pretty(&envelope).map_err(|e| StorageError::Serialization {
                key: key.to_string(),
                reason: e.to_string(),
            })?;

        fs::write(self.key_path(key), json)
            .await
            .map_err(|e| StorageError::Io(e.to_string()))
    }

    async fn remove_value(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.key_path(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Io(e.to_string())),
        }
    }
}

#[async_trait]
impl SleepStore for FileSleepStore {
    async fn load_preferences(
        &self,
        user_id: Option<&UserId>,
    ) -> Result<UserPreferences, StorageError> {
        Ok(self
            .read_value(&preferences_key(user_id))
            .await?
            .unwrap_or_default())
    }

    async fn save_preferences(
        &self,
        user_id: Option<&UserId>,
        preferences: &UserPreferences,
    ) -> Result<(), StorageError> {
        self.write_value(&preferences_key(user_id), preferences).await
    }

    async fn load_history(
        &self,
        user_id: &UserId,
        capacity: usize,
    ) -> Result<SleepHistory, StorageError> {
        let entries: Vec<CalculationRecord> = self
            .read_value(&history_key(user_id))
            .await?
            .unwrap_or_default();
        Ok(SleepHistory::from_entries(capacity, entries))
    }

    async fn save_history(
        &self,
        user_id: &UserId,
        history: &SleepHistory,
    ) -> Result<(), StorageError> {
        self.write_value(&history_key(user_id), &history.entries())
            .await
    }

    async fn clear_user_data(&self, user_id: &UserId) -> Result<(), StorageError> {
        self.remove_value(&preferences_key(Some(user_id))).await?;
        self.remove_value(&history_key(user_id)).await?;
        tracing::info!(user_id = %user_id, "Cleared stored data for user");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "file"
    }
}
