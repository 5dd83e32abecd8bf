//! SelectMoodHandler - Command handler for changing the selected mood.

use std::sync::Arc;

use super::track_best_effort;
use crate::domain::foundation::UserId;
use crate::domain::sleep::{Mood, MoodKey, MoodSelection, SleepError};
use crate::ports::{SleepStore, UsageEvent, UsageTracker, EVENT_MOOD_SELECTED};

/// Command to move or set the mood selection.
#[derive(Debug, Clone)]
pub struct SelectMoodCommand {
    pub user_id: Option<UserId>,
    pub key: MoodKey,
}

/// Result of a mood change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectMoodResult {
    pub mood: Mood,
    pub changed: bool,
}

/// Handler for mood selection. The chosen mood is remembered as a preference.
pub struct SelectMoodHandler {
    store: Arc<dyn SleepStore>,
    usage_tracker: Arc<dyn UsageTracker>,
}

impl SelectMoodHandler {
    pub fn new(store: Arc<dyn SleepStore>, usage_tracker: Arc<dyn UsageTracker>) -> Self {
        Self {
            store,
            usage_tracker,
        }
    }

    pub async fn handle(&self, cmd: SelectMoodCommand) -> Result<SelectMoodResult, SleepError> {
        let user_id = cmd.user_id.as_ref();
        let preferences = self.store.load_preferences(user_id).await?;

        let previous = preferences.mood;
        let mut selection = MoodSelection::new(previous);
        let changed = selection.apply(cmd.key);
        let mood = selection.current();

        self.store
            .save_preferences(user_id, &preferences.with_mood(mood))
            .await?;
        tracing::info!(mood = mood.as_str(), changed, "Mood selected");

        track_best_effort(
            self.usage_tracker.as_ref(),
            UsageEvent::new(EVENT_MOOD_SELECTED)
                .with_property("mood", mood.as_str())
                .with_property("previous_mood", previous.as_str()),
        )
        .await;

        Ok(SelectMoodResult { mood, changed })
    }
}
