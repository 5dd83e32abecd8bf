//! In-Memory Sleep Store Adapter
//!
//! Keeps preferences and history in memory.
//! Used by tests and when file storage is disabled.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::UserId;
use crate::domain::sleep::{CalculationRecord, SleepHistory, UserPreferences};
use crate::ports::{history_key, preferences_key, SleepStore, StorageError};

/// In-memory storage for preferences and history
#[derive(Debug, Clone, Default)]
pub struct InMemorySleepStore {
    preferences: Arc<RwLock<HashMap<String, UserPreferences>>>,
    histories: Arc<RwLock<HashMap<String, Vec<CalculationRecord>>>>,
}

impl InMemorySleepStore {
    /// Create a new in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all stored data (useful for tests)
    pub async fn clear(&self) {
        self.preferences.write().await.clear();
        self.histories.write().await.clear();
    }

    /// Number of stored keys across preferences and history
    pub async fn len(&self) -> usize {
        self.preferences.read().await.len() + self.histories.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl SleepStore for InMemorySleepStore {
    async fn load_preferences(
        &self,
        user_id: Option<&UserId>,
    ) -> Result<UserPreferences, StorageError> {
        let preferences = self.preferences.read().await;
        Ok(preferences
            .get(&preferences_key(user_id))
            .cloned()
            .unwrap_or_default())
    }

    async fn save_preferences(
        &self,
        user_id: Option<&UserId>,
        preferences: &UserPreferences,
    ) -> Result<(), StorageError> {
        self.preferences
            .write()
            .await
            .insert(preferences_key(user_id), preferences.clone());
        Ok(())
    }

    async fn load_history(
        &self,
        user_id: &UserId,
        capacity: usize,
    ) -> Result<SleepHistory, StorageError> {
        let histories = self.histories.read().await;
        let entries = histories
            .get(&history_key(user_id))
            .cloned()
            .unwrap_or_default();
        Ok(SleepHistory::from_entries(capacity, entries))
    }

    async fn save_history(
        &self,
        user_id: &UserId,
        history: &SleepHistory,
    ) -> Result<(), StorageError> {
        self.histories
            .write()
            .await
            .insert(history_key(user_id), history.entries().to_vec());
        Ok(())
    }

    async fn clear_user_data(&self, user_id: &UserId) -> Result<(), StorageError> {
        self.preferences
            .write()
            .await
            .remove(&preferences_key(Some(user_id)));
        self.histories.write().await.remove(&history_key(user_id));
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sleep::{CalculationDirection, Mood};

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn history_with(values: &[&str]) -> SleepHistory {
        let mut history = SleepHistory::default();
        for value in values {
            history.record(CalculationRecord::new(
                Mood::Neutral,
                CalculationDirection::WakeTimes,
                *value,
            ));
        }
        history
    }

    #[tokio::test]
    async fn test_memory_store_defaults_when_empty() {
        let store = InMemorySleepStore::new();

        let prefs = store.load_preferences(None).await.unwrap();
        assert_eq!(prefs, UserPreferences::default());

        let history = store.load_history(&user("a"), 10).await.unwrap();
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn test_memory_store_preferences_are_per_user() {
        let store = InMemorySleepStore::new();
        let alice = user("alice");

        let prefs = UserPreferences::default().with_mood(Mood::Happy);
        store.save_preferences(Some(&alice), &prefs).await.unwrap();

        assert_eq!(
            store.load_preferences(Some(&alice)).await.unwrap().mood,
            Mood::Happy
        );
        assert_eq!(store.load_preferences(None).await.unwrap().mood, Mood::Neutral);
        assert_eq!(
            store.load_preferences(Some(&user("bob"))).await.unwrap().mood,
            Mood::Neutral
        );
    }

    #[tokio::test]
    async fn test_memory_store_history_round_trip() {
        let store = InMemorySleepStore::new();
        let alice = user("alice");

        store
            .save_history(&alice, &history_with(&["22:00", "23:00"]))
            .await
            .unwrap();

        let loaded = store.load_history(&alice, 10).await.unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.entries()[0].input_value, "23:00");

        let trimmed = store.load_history(&alice, 1).await.unwrap();
        assert_eq!(trimmed.len(), 1);
    }

    #[tokio::test]
    async fn test_memory_store_clear_user_data() {
        let store = InMemorySleepStore::new();
        let alice = user("alice");
        let bob = user("bob");

        store
            .save_preferences(Some(&alice), &UserPreferences::default())
            .await
            .unwrap();
        store.save_history(&alice, &history_with(&["22:00"])).await.unwrap();
        store.save_history(&bob, &history_with(&["21:00"])).await.unwrap();
        assert_eq!(store.len().await, 3);

        store.clear_user_data(&alice).await.unwrap();

        assert_eq!(store.len().await, 1);
        assert!(store.load_history(&alice, 10).await.unwrap().is_empty());
        assert_eq!(store.load_history(&bob, 10).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_memory_store_clones_share_state() {
        let store = InMemorySleepStore::new();
        let other = store.clone();

        let handle = tokio::spawn(async move {
            other
                .save_preferences(None, &UserPreferences::default().with_mood(Mood::Sad))
                .await
                .unwrap();
        });
        handle.await.unwrap();

        assert_eq!(store.load_preferences(None).await.unwrap().mood, Mood::Sad);
        store.clear().await;
        assert!(store.is_empty().await);
    }
}
