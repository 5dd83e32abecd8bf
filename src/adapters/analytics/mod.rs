//! Analytics Adapters
//!
//! Implementations of the UsageTracker port.
//!
//! - **TracingUsageTracker** - Emits each event as a structured log record
//! - **InMemoryUsageTracker** - Keeps the most recent events in memory

mod in_memory_usage_tracker;
mod tracing_usage_tracker;

pub use in_memory_usage_tracker::{InMemoryUsageTracker, MAX_TRACKED_EVENTS};
pub use tracing_usage_tracker::TracingUsageTracker;
