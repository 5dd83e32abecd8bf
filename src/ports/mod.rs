//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `SleepStore` - Preferences and calculation history persistence
//! - `UsageTracker` - Best-effort usage analytics

mod sleep_store;
mod usage_tracker;

pub use sleep_store::{history_key, preferences_key, SleepStore, StorageError};
pub use usage_tracker::{
    UsageEvent, UsageTracker, UsageTrackerError, EVENT_CALCULATION_DELETED, EVENT_DATA_IMPORTED,
    EVENT_FEEDBACK_SUBMITTED, EVENT_HISTORY_CLEARED, EVENT_MOOD_SELECTED,
    EVENT_PREFERENCES_SAVED, EVENT_SLEEP_CALCULATION,
};
