//! SubmitFeedbackHandler - Command handler for user feedback.

use std::sync::Arc;

use super::track_best_effort;
use crate::domain::foundation::UserId;
use crate::domain::sleep::{Feedback, FeedbackType, SleepError};
use crate::ports::{UsageEvent, UsageTracker, EVENT_FEEDBACK_SUBMITTED};

/// Command to submit feedback. Anonymous feedback is accepted.
#[derive(Debug, Clone)]
pub struct SubmitFeedbackCommand {
    pub user_id: Option<UserId>,
    pub kind: FeedbackType,
    pub message: String,
}

/// Handler that records feedback in the log and reports its type.
pub struct SubmitFeedbackHandler {
    usage_tracker: Arc<dyn UsageTracker>,
}

impl SubmitFeedbackHandler {
    pub fn new(usage_tracker: Arc<dyn UsageTracker>) -> Self {
        Self { usage_tracker }
    }

    pub async fn handle(&self, cmd: SubmitFeedbackCommand) -> Result<Feedback, SleepError> {
        let feedback = Feedback::new(cmd.kind, &cmd.message, cmd.user_id)?;

        tracing::info!(
            feedback_type = feedback.kind.as_str(),
            user = feedback.user.as_ref().map(UserId::as_str).unwrap_or("anonymous"),
            message = %feedback.message,
            "Feedback submitted"
        );

        // Only the type leaves the process; the message stays in the log.
        track_best_effort(
            self.usage_tracker.as_ref(),
            UsageEvent::new(EVENT_FEEDBACK_SUBMITTED).with_property("type", feedback.kind.as_str()),
        )
        .await;

        Ok(feedback)
    }
}
