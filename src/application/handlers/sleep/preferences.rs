//! Preference handlers - reading and saving user preferences.

use std::sync::Arc;

use super::track_best_effort;
use crate::domain::foundation::UserId;
use crate::domain::sleep::{PreferenceUpdate, SleepError, UserPreferences};
use crate::ports::{SleepStore, UsageEvent, UsageTracker, EVENT_PREFERENCES_SAVED};

/// Query handler for current preferences (defaults when none are stored).
pub struct GetPreferencesHandler {
    store: Arc<dyn SleepStore>,
}

impl GetPreferencesHandler {
    pub fn new(store: Arc<dyn SleepStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, user_id: Option<&UserId>) -> Result<UserPreferences, SleepError> {
        Ok(self.store.load_preferences(user_id).await?)
    }
}

/// Command to save preferences. Only signed-in users can save.
#[derive(Debug, Clone)]
pub struct SavePreferencesCommand {
    pub user_id: Option<UserId>,
    pub update: PreferenceUpdate,
}

/// Handler for saving preferences.
pub struct SavePreferencesHandler {
    store: Arc<dyn SleepStore>,
    usage_tracker: Arc<dyn UsageTracker>,
}

impl SavePreferencesHandler {
    pub fn new(store: Arc<dyn SleepStore>, usage_tracker: Arc<dyn UsageTracker>) -> Self {
        Self {
            store,
            usage_tracker,
        }
    }

    pub async fn handle(&self, cmd: SavePreferencesCommand) -> Result<UserPreferences, SleepError> {
        let user_id = cmd.user_id.ok_or(SleepError::SignInRequired)?;

        let current = self.store.load_preferences(Some(&user_id)).await?;
        let updated = cmd.update.apply_to(current).touched();
        updated.validate()?;

        self.store.save_preferences(Some(&user_id), &updated).await?;
        tracing::info!(user_id = %user_id, "Preferences saved");

        track_best_effort(
            self.usage_tracker.as_ref(),
            UsageEvent::new(EVENT_PREFERENCES_SAVED),
        )
        .await;

        Ok(updated)
    }
}
