//! CalculateSleepTimesHandler - Command handler for one calculator request.

use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;

use super::track_best_effort;
use crate::domain::foundation::{RecordId, UserId};
use crate::domain::sleep::{
    CalculationDirection, CalculationRecord, ClockMoment, Mood, SleepCycleCalculator,
    SleepCycleOption, SleepError,
};
use crate::ports::{SleepStore, UsageEvent, UsageTracker, EVENT_SLEEP_CALCULATION};

/// Command to calculate bed or wake times.
///
/// Exactly one of `current_time` / `wake_time` must be set; blank strings
/// count as unset.
#[derive(Debug, Clone)]
pub struct CalculateSleepTimesCommand {
    pub user_id: Option<UserId>,
    pub mood: Mood,
    /// `HH:MM` the user goes to bed.
    pub current_time: Option<String>,
    /// `HH:MM` the user wants to wake up.
    pub wake_time: Option<String>,
    /// Calendar date the entered time refers to.
    pub anchor_date: NaiveDate,
}

/// Result of a successful calculation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationOutcome {
    pub direction: CalculationDirection,
    pub anchor: ClockMoment,
    pub options: Vec<SleepCycleOption>,
    pub mood: Mood,
    pub suggestion: &'static str,
    /// Id of the history record, when one was stored.
    pub recorded: Option<RecordId>,
}

/// Handler for sleep-time calculations.
pub struct CalculateSleepTimesHandler {
    store: Arc<dyn SleepStore>,
    usage_tracker: Arc<dyn UsageTracker>,
    history_limit: usize,
}

impl CalculateSleepTimesHandler {
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

    pub async fn handle(
        &self,
        cmd: CalculateSleepTimesCommand,
    ) -> Result<CalculationOutcome, SleepError> {
        // 1. Work out which direction was asked for
        let (direction, input) = select_input(cmd.current_time, cmd.wake_time)?;
        let anchor = ClockMoment::parse_hhmm(&input, cmd.anchor_date)?;

        // 2. Pure calculation
        let options = SleepCycleCalculator::calculate(direction, anchor);
        tracing::debug!(
            direction = direction.as_str(),
            anchor = %anchor.to_hhmm(),
            first = %options.first().map(|o| o.formatted_time()).unwrap_or_default(),
            "Calculated sleep cycle options"
        );

        // 3. Remember the request for signed-in users
        let recorded = match &cmd.user_id {
            Some(user_id) => {
                self.record_history(user_id, cmd.mood, direction, anchor.to_hhmm())
                    .await
            }
            None => None,
        };

        // 4. Usage analytics
        track_best_effort(
            self.usage_tracker.as_ref(),
            UsageEvent::new(EVENT_SLEEP_CALCULATION)
                .with_property("mood", cmd.mood.as_str())
                .with_property("input_type", direction.as_str()),
        )
        .await;

        Ok(CalculationOutcome {
            direction,
            anchor,
            options,
            mood: cmd.mood,
            suggestion: cmd.mood.suggestion(),
            recorded,
        })
    }

    /// History is best-effort; a storage failure never hides the results.
    async fn record_history(
        &self,
        user_id: &UserId,
        mood: Mood,
        direction: CalculationDirection,
        input_value: String,
    ) -> Option<RecordId> {
        let record = CalculationRecord::new(mood, direction, input_value);
        let id = record.id;

        let result = async {
            let mut history = self.store.load_history(user_id, self.history_limit).await?;
            history.record(record);
            self.store.save_history(user_id, &history).await
        }
        .await;

        match result {
            Ok(()) => Some(id),
            Err(e) => {
                tracing::warn!(user_id = %user_id, error = %e, "Failed to save calculation history");
                None
            }
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn select_input(
    current_time: Option<String>,
    wake_time: Option<String>,
) -> Result<(CalculationDirection, String), SleepError> {
    match (non_blank(current_time), non_blank(wake_time)) {
        (None, None) => Err(SleepError::MissingTime),
        (Some(_), Some(_)) => Err(SleepError::ConflictingTimes),
        (Some(current), None) => Ok((CalculationDirection::WakeTimes, current)),
        (None, Some(wake)) => Ok((CalculationDirection::SleepTimes, wake)),
    }
}
