//! Sleep Store Port - Interface for persisting preferences and history.
//!
//! The store is a simple key-value collaborator: preferences are kept per
//! user (or device-wide for anonymous use) and history per signed-in user.

use async_trait::async_trait;

use crate::domain::foundation::UserId;
use crate::domain::sleep::{SleepError, SleepHistory, UserPreferences};

/// Errors that can occur during store operations
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Failed to serialize value for '{key}': {reason}")]
    Serialization { key: String, reason: String },

    #[error("Failed to deserialize value for '{key}': {reason}")]
    Deserialization { key: String, reason: String },

    #[error("IO error: {0}")]
    Io(String),
}

impl From<StorageError> for SleepError {
    fn from(err: StorageError) -> Self {
        SleepError::storage(err.to_string())
    }
}

/// Port for loading and saving user-facing state
#[async_trait]
pub trait SleepStore: Send + Sync {
    /// Load preferences, falling back to defaults when nothing is stored.
    ///
    /// `None` addresses the device-wide (signed-out) preferences.
    async fn load_preferences(
        &self,
        user_id: Option<&UserId>,
    ) -> Result<UserPreferences, StorageError>;

    /// Save preferences, replacing what was stored.
    async fn save_preferences(
        &self,
        user_id: Option<&UserId>,
        preferences: &UserPreferences,
    ) -> Result<(), StorageError>;

    /// Load a user's history, empty when nothing is stored.
    ///
    /// Stored records beyond `capacity` are dropped (oldest first).
    async fn load_history(
        &self,
        user_id: &UserId,
        capacity: usize,
    ) -> Result<SleepHistory, StorageError>;

    /// Save a user's history.
    async fn save_history(
        &self,
        user_id: &UserId,
        history: &SleepHistory,
    ) -> Result<(), StorageError>;

    /// Remove all preferences and history stored for a user.
    async fn clear_user_data(&self, user_id: &UserId) -> Result<(), StorageError>;

    /// Backend name for logging.
    fn name(&self) -> &'static str;
}

/// Storage key for preferences.
pub fn preferences_key(user_id: Option<&UserId>) -> String {
    match user_id {
        Some(id) => format!("user_preferences_{}", id),
        None => "user_preferences".to_string(),
    }
}

/// Storage key for a user's history.
pub fn history_key(user_id: &UserId) -> String {
    format!("sleep_history_{}", user_id)
}
