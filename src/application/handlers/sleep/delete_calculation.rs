//! DeleteCalculationHandler - Command handler for removing one history entry.

use std::sync::Arc;

use super::track_best_effort;
use crate::domain::foundation::{RecordId, UserId};
use crate::domain::sleep::SleepError;
use crate::ports::{SleepStore, UsageEvent, UsageTracker, EVENT_CALCULATION_DELETED};

/// Command to delete a calculation from a user's history.
#[derive(Debug, Clone)]
pub struct DeleteCalculationCommand {
    pub user_id: UserId,
    pub record_id: RecordId,
}

/// Handler for deleting a single calculation record.
pub struct DeleteCalculationHandler {
    store: Arc<dyn SleepStore>,
    usage_tracker: Arc<dyn UsageTracker>,
    history_limit: usize,
}

impl DeleteCalculationHandler {
    pub fn new(
        store: Arc<dyn SleepStore>,
        usage_tracker: Arc<dyn UsageTracker>,
        history_limit: usize,
    ) -> Self {
        Self {
            store,
            usage_tracker,
            history_limit,
        }
    }

    /// # Errors
    ///
    /// Returns `SleepError::CalculationNotFound` when the id is not in the
    /// user's history. Nothing is written in that case.
    pub async fn handle(&self, cmd: DeleteCalculationCommand) -> Result<(), SleepError> {
        let mut history = self
            .store
            .load_history(&cmd.user_id, self.history_limit)
            .await?;

        if !history.remove(&cmd.record_id) {
            return Err(SleepError::CalculationNotFound { id: cmd.record_id });
        }

        self.store.save_history(&cmd.user_id, &history).await?;
        tracing::info!(
            user_id = %cmd.user_id,
            record_id = %cmd.record_id,
            remaining = history.len(),
            "Calculation deleted"
        );

        track_best_effort(
            self.usage_tracker.as_ref(),
            UsageEvent::new(EVENT_CALCULATION_DELETED),
        )
        .await;

        Ok(())
    }
}
