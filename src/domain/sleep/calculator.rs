//! Sleep Cycle Calculator - bed and wake times aligned to whole sleep cycles.
//!
//! Waking at the end of a cycle rather than in the middle of one is what
//! makes a suggestion useful, so every result is the anchor time shifted by
//! a whole number of 90-minute cycles plus the time it takes to fall asleep.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::clock::ClockMoment;
use super::cycle_option::{CycleCount, SleepCycleOption};

/// Average length of one sleep cycle.
pub const SLEEP_CYCLE_MINUTES: i64 = 90;

/// Assumed time between lying down and the first cycle starting.
pub const FALL_ASLEEP_MINUTES: i64 = 15;

/// Which way a calculation runs from its anchor time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CalculationDirection {
    /// Anchor is when the user goes to bed; results are wake times.
    #[serde(rename = "current_time")]
    WakeTimes,
    /// Anchor is when the user wants to wake; results are bed times.
    #[serde(rename = "wake_time")]
    SleepTimes,
}

impl CalculationDirection {
    /// Storage/analytics tag (`current_time` or `wake_time`).
    pub fn as_str(&self) -> &'static str {
        match self {
            CalculationDirection::WakeTimes => "current_time",
            CalculationDirection::SleepTimes => "wake_time",
        }
    }

    pub fn heading(&self) -> &'static str {
        match self {
            CalculationDirection::WakeTimes => "Optimal Wake Times",
            CalculationDirection::SleepTimes => "Optimal Sleep Times",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            CalculationDirection::WakeTimes => {
                "If you go to sleep now, try to wake up at one of these times:"
            }
            CalculationDirection::SleepTimes => {
                "To wake up refreshed at your desired time, try to fall asleep at one of these times:"
            }
        }
    }
}

impl fmt::Display for CalculationDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str().replace('_', " "))
    }
}

/// Stateless calculator; all methods are pure.
pub struct SleepCycleCalculator;

impl SleepCycleCalculator {
    /// Wake times for someone lying down at `sleep_start`.
    ///
    /// Returns four options for 3, 4, 5 and 6 cycles, earliest first.
    pub fn compute_wake_times(sleep_start: ClockMoment) -> Vec<SleepCycleOption> {
        let asleep_at = sleep_start.plus_minutes(FALL_ASLEEP_MINUTES);

        CycleCount::ALL
            .iter()
            .map(|&count| {
                let cycles = i64::from(count.value());
                SleepCycleOption::new(asleep_at.plus_minutes(cycles * SLEEP_CYCLE_MINUTES), count)
            })
            .collect()
    }

    /// Bed times for someone who wants to wake at `wake_target`.
    ///
    /// Returns four options, earliest bed time first, so cycle counts run
    /// 6, 5, 4, 3.
    pub fn compute_sleep_times(wake_target: ClockMoment) -> Vec<SleepCycleOption> {
        CycleCount::ALL
            .iter()
            .rev()
            .map(|&count| {
                let cycles = i64::from(count.value());
                let lead = cycles * SLEEP_CYCLE_MINUTES + FALL_ASLEEP_MINUTES;
                SleepCycleOption::new(wake_target.minus_minutes(lead), count)
            })
            .collect()
    }

    /// Runs the calculation for `direction`.
    pub fn calculate(direction: CalculationDirection, anchor: ClockMoment) -> Vec<SleepCycleOption> {
        match direction {
            CalculationDirection::WakeTimes => Self::compute_wake_times(anchor),
            CalculationDirection::SleepTimes => Self::compute_sleep_times(anchor),
        }
    }
}
