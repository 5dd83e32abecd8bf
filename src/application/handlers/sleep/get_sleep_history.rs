//! GetSleepHistoryHandler - Query handler for a user's past calculations.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::sleep::{SleepError, SleepHistory};
use crate::ports::SleepStore;

/// Handler for reading calculation history.
pub struct GetSleepHistoryHandler {
    store: Arc<dyn SleepStore>,
    history_limit: usize,
}

impl GetSleepHistoryHandler {
    pub fn new(store: Arc<dyn SleepStore>, history_limit: usize) -> Self {
        Self {
            store,
            history_limit,
        }
    }

    pub async fn handle(&self, user_id: &UserId) -> Result<SleepHistory, SleepError> {
        Ok(self.store.load_history(user_id, self.history_limit).await?)
    }
}
