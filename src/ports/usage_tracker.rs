//! UsageTracker port - Interface for recording product usage events.
//!
//! Tracking is best-effort: callers log failures and carry on.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::foundation::Timestamp;

/// Event name for a completed calculation.
pub const EVENT_SLEEP_CALCULATION: &str = "sleep_calculation";
/// Event name for a mood change.
pub const EVENT_MOOD_SELECTED: &str = "mood_selected";
/// Event name for an explicit preferences save.
pub const EVENT_PREFERENCES_SAVED: &str = "preferences_saved";
/// Event name for a user wiping their stored data.
pub const EVENT_HISTORY_CLEARED: &str = "history_cleared";
/// Event name for a single history entry being removed.
pub const EVENT_CALCULATION_DELETED: &str = "calculation_deleted";
/// Event name for restoring an earlier export.
pub const EVENT_DATA_IMPORTED: &str = "data_imported";
/// Event name for submitted feedback.
pub const EVENT_FEEDBACK_SUBMITTED: &str = "feedback_submitted";

/// A single usage event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageEvent {
    pub name: String,
    pub properties: BTreeMap<String, String>,
    pub occurred_at: Timestamp,
}

impl UsageEvent {
    /// Creates an event with no properties.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: BTreeMap::new(),
            occurred_at: Timestamp::now(),
        }
    }

    /// Adds a property.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

/// Errors from usage tracking backends.
#[derive(Debug, thiserror::Error)]
pub enum UsageTrackerError {
    #[error("Usage tracking unavailable: {0}")]
    Unavailable(String),
}

/// Port for recording usage events.
#[async_trait]
pub trait UsageTracker: Send + Sync {
    /// Record one event.
    async fn track(&self, event: UsageEvent) -> Result<(), UsageTrackerError>;

    /// Tracker name for logging.
    fn name(&self) -> &'static str;
}
