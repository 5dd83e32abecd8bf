//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `storage` - Preference and history stores (in-memory, JSON files)
//! - `analytics` - Usage trackers (tracing, in-memory)

pub mod analytics;
pub mod storage;

pub use analytics::{InMemoryUsageTracker, TracingUsageTracker};
pub use storage::{FileSleepStore, InMemorySleepStore};
