//! Calculation history - newest-first, bounded list of past requests.

use serde::{Deserialize, Serialize};

use super::calculator::CalculationDirection;
use super::mood::Mood;
use crate::domain::foundation::{RecordId, Timestamp};

/// How many records a history keeps unless configured otherwise.
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// Hard ceiling on stored records per user.
pub const MAX_HISTORY_LIMIT: usize = 50;

/// One remembered calculation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationRecord {
    pub id: RecordId,
    pub timestamp: Timestamp,
    pub mood: Mood,
    pub input_type: CalculationDirection,
    /// Anchor time as entered, `HH:MM`.
    pub input_value: String,
}

impl CalculationRecord {
    pub fn new(mood: Mood, input_type: CalculationDirection, input_value: impl Into<String>) -> Self {
        Self {
            id: RecordId::new(),
            timestamp: Timestamp::now(),
            mood,
            input_type,
            input_value: input_value.into(),
        }
    }
}

/// Bounded history, most recent record first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SleepHistory {
    capacity: usize,
    entries: Vec<CalculationRecord>,
}

impl SleepHistory {
    /// Creates an empty history. Capacity is clamped to `1..=MAX_HISTORY_LIMIT`.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.clamp(1, MAX_HISTORY_LIMIT),
            entries: Vec::new(),
        }
    }

    /// Rebuilds a history from stored records, keeping the newest `capacity`.
    pub fn from_entries(capacity: usize, entries: Vec<CalculationRecord>) -> Self {
        let mut history = Self::new(capacity);
        history.entries = entries;
        history.entries.truncate(history.capacity);
        history
    }

    /// Adds `record` at the front, dropping the oldest beyond capacity.
    pub fn record(&mut self, record: CalculationRecord) {
        self.entries.insert(0, record);
        self.entries.truncate(self.capacity);
    }

    /// Removes a record by id. Returns true if one was removed.
    pub fn remove(&mut self, id: &RecordId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|r| &r.id != id);
        self.entries.len() != before
    }

    pub fn entries(&self) -> &[CalculationRecord] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<CalculationRecord> {
        self.entries
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SleepHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(value: &str) -> CalculationRecord {
        CalculationRecord::new(Mood::Neutral, CalculationDirection::WakeTimes, value)
    }

    #[test]
    fn newest_record_comes_first() {
        let mut history = SleepHistory::default();
        history.record(record("22:00"));
        history.record(record("23:00"));

        let values: Vec<&str> = history.entries().iter().map(|r| r.input_value.as_str()).collect();
        assert_eq!(values, vec!["23:00", "22:00"]);
    }

    #[test]
    fn oldest_records_drop_beyond_capacity() {
        let mut history = SleepHistory::new(3);
        for hour in 0..5 {
            history.record(record(&format!("{:02}:00", hour)));
        }

        assert_eq!(history.len(), 3);
        assert_eq!(history.entries()[0].input_value, "04:00");
        assert_eq!(history.entries()[2].input_value, "02:00");
    }

    #[test]
    fn capacity_is_clamped() {
        assert_eq!(SleepHistory::new(0).capacity(), 1);
        assert_eq!(SleepHistory::new(500).capacity(), MAX_HISTORY_LIMIT);
        assert_eq!(SleepHistory::default().capacity(), DEFAULT_HISTORY_LIMIT);
    }

    #[test]
    fn from_entries_truncates() {
        let entries: Vec<_> = (0..15).map(|i| record(&format!("{:02}:00", i))).collect();
        let history = SleepHistory::from_entries(10, entries);
        assert_eq!(history.len(), 10);
        assert_eq!(history.entries()[0].input_value, "00:00");
    }

    #[test]
    fn remove_deletes_by_id() {
        let mut history = SleepHistory::default();
        let keep = record("21:00");
        let dropped = record("22:00");
        let dropped_id = dropped.id;
        history.record(keep);
        history.record(dropped);

        assert!(history.remove(&dropped_id));
        assert!(!history.remove(&dropped_id));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn record_serializes_with_camel_case_fields() {
        let json = serde_json::to_value(record("07:00")).unwrap();
        assert_eq!(json["inputType"], "current_time");
        assert_eq!(json["inputValue"], "07:00");
        assert_eq!(json["mood"], "neutral");
        assert!(json["timestamp"].is_string());
    }
}
