//! Sleep cycle counts and the computed options built from them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

use super::clock::ClockMoment;
use crate::domain::foundation::ValidationError;

/// Number of complete sleep cycles in a suggestion (always 3 to 6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct CycleCount(u8);

impl CycleCount {
    pub const MIN: u8 = 3;
    pub const MAX: u8 = 6;

    /// Every valid count, ascending.
    pub const ALL: [CycleCount; 4] = [CycleCount(3), CycleCount(4), CycleCount(5), CycleCount(6)];

    /// Creates a cycle count, rejecting values outside 3..=6.
    pub fn new(value: u8) -> Result<Self, ValidationError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ValidationError::out_of_range(
                "cycle_count",
                Self::MIN as i32,
                Self::MAX as i32,
                value as i32,
            ));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// Hours of sleep covered by this many 90-minute cycles.
    pub fn hours(&self) -> f64 {
        f64::from(self.0) * 1.5
    }

    /// Hours rendered with exactly one decimal digit, e.g. `"4.5"`, `"6.0"`.
    pub fn hours_label(&self) -> String {
        format!("{:.1}", self.hours())
    }
}

impl TryFrom<u8> for CycleCount {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CycleCount> for u8 {
    fn from(count: CycleCount) -> Self {
        count.0
    }
}

impl fmt::Display for CycleCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One suggested bed or wake time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SleepCycleOption {
    pub time: ClockMoment,
    pub cycle_count: CycleCount,
}

impl SleepCycleOption {
    pub fn new(time: ClockMoment, cycle_count: CycleCount) -> Self {
        Self { time, cycle_count }
    }

    /// The suggested time in `H:MM AM|PM` form.
    pub fn formatted_time(&self) -> String {
        self.time.format_12h()
    }

    pub fn hours(&self) -> f64 {
        self.cycle_count.hours()
    }

    pub fn hours_label(&self) -> String {
        self.cycle_count.hours_label()
    }

    /// One-line description, e.g. `3 sleep cycles (4.5 hours)`.
    pub fn summary(&self) -> String {
        format!(
            "{} sleep cycles ({} hours)",
            self.cycle_count,
            self.hours_label()
        )
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OptionView {
    time: String,
    cycle_count: u8,
    hours: String,
    date: NaiveDate,
}

impl Serialize for SleepCycleOption {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        OptionView {
            time: self.formatted_time(),
            cycle_count: self.cycle_count.value(),
            hours: self.hours_label(),
            date: self.time.date(),
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_count_accepts_three_to_six() {
        for n in 3..=6 {
            assert_eq!(CycleCount::new(n).unwrap().value(), n);
        }
    }

    #[test]
    fn cycle_count_rejects_out_of_range() {
        for n in [0, 1, 2, 7, 255] {
            assert!(matches!(
                CycleCount::new(n),
                Err(ValidationError::OutOfRange { .. })
            ));
        }
    }

    #[test]
    fn hours_label_has_one_decimal() {
        let labels: Vec<String> = CycleCount::ALL.iter().map(|c| c.hours_label()).collect();
        assert_eq!(labels, vec!["4.5", "6.0", "7.5", "9.0"]);
    }

    #[test]
    fn cycle_count_deserialization_validates() {
        assert_eq!(serde_json::from_str::<CycleCount>("4").unwrap().value(), 4);
        assert!(serde_json::from_str::<CycleCount>("2").is_err());
    }

    #[test]
    fn option_serializes_display_fields() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 11).unwrap();
        let option = SleepCycleOption::new(
            ClockMoment::new(date, 2, 45).unwrap(),
            CycleCount::new(3).unwrap(),
        );

        let json = serde_json::to_value(option).unwrap();
        assert_eq!(json["time"], "2:45 AM");
        assert_eq!(json["cycleCount"], 3);
        assert_eq!(json["hours"], "4.5");
        assert_eq!(json["date"], "2024-03-11");
        assert_eq!(option.summary(), "3 sleep cycles (4.5 hours)");
    }
}
