//! ClearUserDataHandler - Command handler for wiping a user's stored data.

use std::sync::Arc;

use super::track_best_effort;
use crate::domain::foundation::UserId;
use crate::domain::sleep::SleepError;
use crate::ports::{SleepStore, UsageEvent, UsageTracker, EVENT_HISTORY_CLEARED};

/// Handler that removes a user's preferences and history.
pub struct ClearUserDataHandler {
    store: Arc<dyn SleepStore>,
    usage_tracker: Arc<dyn UsageTracker>,
}

impl ClearUserDataHandler {
    pub fn new(store: Arc<dyn SleepStore>, usage_tracker: Arc<dyn UsageTracker>) -> Self {
        Self {
            store,
            usage_tracker,
        }
    }

    pub async fn handle(&self, user_id: &UserId) -> Result<(), SleepError> {
        self.store.clear_user_data(user_id).await?;

        track_best_effort(
            self.usage_tracker.as_ref(),
            UsageEvent::new(EVENT_HISTORY_CLEARED),
        )
        .await;

        Ok(())
    }
}
