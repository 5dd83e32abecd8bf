//! Sleep command and query handlers.

mod calculate_sleep_times;
mod clear_user_data;
mod delete_calculation;
mod export_user_data;
mod get_sleep_history;
mod import_user_data;
mod preferences;
mod select_mood;
mod submit_feedback;

pub use calculate_sleep_times::{
    CalculateSleepTimesCommand, CalculateSleepTimesHandler, CalculationOutcome,
};
pub use clear_user_data::ClearUserDataHandler;
pub use delete_calculation::{DeleteCalculationCommand, DeleteCalculationHandler};
pub use export_user_data::{DataExport, ExportUserDataHandler, EXPORT_VERSION};
pub use get_sleep_history::GetSleepHistoryHandler;
pub use import_user_data::{ImportSummary, ImportUserDataCommand, ImportUserDataHandler};
pub use preferences::{GetPreferencesHandler, SavePreferencesCommand, SavePreferencesHandler};
pub use select_mood::{SelectMoodCommand, SelectMoodHandler, SelectMoodResult};
pub use submit_feedback::{SubmitFeedbackCommand, SubmitFeedbackHandler};

use crate::ports::{UsageEvent, UsageTracker};

/// Tracks `event`, logging instead of failing when the tracker errors.
pub(crate) async fn track_best_effort(tracker: &dyn UsageTracker, event: UsageEvent) {
    let name = event.name.clone();
    if let Err(e) = tracker.track(event).await {
        tracing::warn!(event = %name, error = %e, "Usage tracking failed");
    }
}
