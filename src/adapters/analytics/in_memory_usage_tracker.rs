//! In-memory usage tracker with a bounded event buffer.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::ports::{UsageEvent, UsageTracker, UsageTrackerError};

/// Number of events kept; older ones are dropped.
pub const MAX_TRACKED_EVENTS: usize = 100;

#[derive(Debug, Default)]
struct UsageLog {
    events: VecDeque<UsageEvent>,
    total: u64,
}

/// Keeps the last [`MAX_TRACKED_EVENTS`] events and a running total.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUsageTracker {
    log: Arc<RwLock<UsageLog>>,
}

impl InMemoryUsageTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events currently held, oldest first.
    pub async fn events(&self) -> Vec<UsageEvent> {
        self.log.read().await.events.iter().cloned().collect()
    }

    /// Names of held events, oldest first.
    pub async fn event_names(&self) -> Vec<String> {
        self.log
            .read()
            .await
            .events
            .iter()
            .map(|e| e.name.clone())
            .collect()
    }

    /// Events tracked since creation, including dropped ones.
    pub async fn total_events(&self) -> u64 {
        self.log.read().await.total
    }
}

#[async_trait]
impl UsageTracker for InMemoryUsageTracker {
    async fn track(&self, event: UsageEvent) -> Result<(), UsageTrackerError> {
        let mut log = self.log.write().await;
        log.events.push_back(event);
        while log.events.len() > MAX_TRACKED_EVENTS {
            log.events.pop_front();
        }
        log.total += 1;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
