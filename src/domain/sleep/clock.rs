//! ClockMoment value object - a wall-clock time on a calendar date.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::errors::SleepError;
use crate::domain::foundation::ValidationError;

/// A point on the local wall-clock timeline.
///
/// Offsets are applied linearly (`NaiveDateTime + Duration`), so adding
/// minutes rolls over midnight, month ends and year ends and always carries
/// the right calendar date. No time-zone rules are applied.
///
/// Construction refuses the first and last day chrono can represent, so
/// any offset shorter than one day from a constructed moment stays in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "NaiveDateTime", into = "NaiveDateTime")]
pub struct ClockMoment(NaiveDateTime);

impl ClockMoment {
    /// Creates a moment at `hour:minute:00` on `date`.
    ///
    /// # Errors
    ///
    /// Returns `SleepError::InvalidTimeFormat` when hour > 23 or minute > 59,
    /// and `SleepError::Validation` when `date` is outside the supported range.
    pub fn new(date: NaiveDate, hour: u32, minute: u32) -> Result<Self, SleepError> {
        let time = NaiveTime::from_hms_opt(hour, minute, 0)
            .ok_or_else(|| SleepError::invalid_time(format!("{}:{:02}", hour, minute)))?;
        Self::on(date, time)
    }

    fn on(date: NaiveDate, time: NaiveTime) -> Result<Self, SleepError> {
        ensure_supported(date)?;
        Ok(Self(date.and_time(time)))
    }

    /// Parses a 24-hour `HH:MM` string anchored to `anchor_date`.
    ///
    /// The hour may be one or two digits, the minute must be two digits.
    /// Leading and trailing whitespace is ignored.
    ///
    /// # Errors
    ///
    /// Returns `SleepError::InvalidTimeFormat` for anything else, including
    /// out-of-range values such as `24:00` or `7:60`.
    pub fn parse_hhmm(input: &str, anchor_date: NaiveDate) -> Result<Self, SleepError> {
        let time = parse_wall_time(input)?;
        Self::on(anchor_date, time)
    }

    /// Calendar date of this moment.
    pub fn date(&self) -> NaiveDate {
        self.0.date()
    }

    /// Wall-clock time of this moment.
    pub fn time(&self) -> NaiveTime {
        self.0.time()
    }

    /// Moves the moment forward by `minutes` (negative moves backward).
    ///
    /// # Panics
    ///
    /// Panics if the result leaves chrono's representable range, which
    /// cannot happen for offsets shorter than one day.
    pub fn plus_minutes(&self, minutes: i64) -> Self {
        Self(self.0 + Duration::minutes(minutes))
    }

    /// Moves the moment backward by `minutes`.
    pub fn minus_minutes(&self, minutes: i64) -> Self {
        Self(self.0 - Duration::minutes(minutes))
    }

    /// Signed number of whole minutes from `other` to `self`.
    pub fn minutes_since(&self, other: &ClockMoment) -> i64 {
        self.0.signed_duration_since(other.0).num_minutes()
    }

    /// Renders `H:MM AM` / `H:MM PM` (12-hour clock, midnight and noon as 12).
    pub fn format_12h(&self) -> String {
        let hour = self.0.hour();
        let suffix = if hour >= 12 { "PM" } else { "AM" };
        let display_hour = match hour % 12 {
            0 => 12,
            h => h,
        };
        format!("{}:{:02} {}", display_hour, self.0.minute(), suffix)
    }

    /// Renders the 24-hour `HH:MM` form accepted by [`ClockMoment::parse_hhmm`].
    pub fn to_hhmm(&self) -> String {
        format!("{:02}:{:02}", self.0.hour(), self.0.minute())
    }

    /// Whole days between this moment's date and `reference`.
    pub fn day_offset_from(&self, reference: NaiveDate) -> i64 {
        (self.date() - reference).num_days()
    }

    /// Human label for the day relative to `reference`.
    pub fn day_label(&self, reference: NaiveDate) -> String {
        match self.day_offset_from(reference) {
            0 => "today".to_string(),
            1 => "tomorrow".to_string(),
            -1 => "yesterday".to_string(),
            n if n > 0 => format!("+{} days", n),
            n => format!("{} days", n),
        }
    }
}

/// Rejects the first and last representable dates.
fn ensure_supported(date: NaiveDate) -> Result<(), SleepError> {
    if date.pred_opt().is_none() || date.succ_opt().is_none() {
        return Err(ValidationError::invalid_format(
            "date",
            format!("{} is outside the supported calendar range", date),
        )
        .into());
    }
    Ok(())
}

impl TryFrom<NaiveDateTime> for ClockMoment {
    type Error = SleepError;

    fn try_from(value: NaiveDateTime) -> Result<Self, Self::Error> {
        Self::on(value.date(), value.time())
    }
}

impl From<ClockMoment> for NaiveDateTime {
    fn from(moment: ClockMoment) -> Self {
        moment.0
    }
}

/// Parses a 24-hour `HH:MM` wall-clock time without attaching a date.
///
/// Same rules as [`ClockMoment::parse_hhmm`].
pub fn parse_wall_time(input: &str) -> Result<NaiveTime, SleepError> {
    let invalid = || SleepError::invalid_time(input);

    let (hour, minute) = input.trim().split_once(':').ok_or_else(invalid)?;
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(hour) || hour.len() > 2 || !all_digits(minute) || minute.len() != 2 {
        return Err(invalid());
    }

    let hour: u32 = hour.parse().map_err(|_| invalid())?;
    let minute: u32 = minute.parse().map_err(|_| invalid())?;
    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(invalid)
}

impl fmt::Display for ClockMoment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_12h())
    }
}
