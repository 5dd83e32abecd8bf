//! Usage tracker that writes events to the tracing subscriber.

use async_trait::async_trait;

use crate::ports::{UsageEvent, UsageTracker, UsageTrackerError};

/// Logs usage events under the `should_i_sleep::usage` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingUsageTracker;

impl TracingUsageTracker {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl UsageTracker for TracingUsageTracker {
    async fn track(&self, event: UsageEvent) -> Result<(), UsageTrackerError> {
        let properties = serde_json::to_string(&event.properties)
            .map_err(|e| UsageTrackerError::Unavailable(e.to_string()))?;

        tracing::info!(
            target: "should_i_sleep::usage",
            event = %event.name,
            properties = %properties,
            occurred_at = %event.occurred_at.to_rfc3339(),
            "usage event"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "tracing"
    }
}
