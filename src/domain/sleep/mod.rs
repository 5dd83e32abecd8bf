//! Sleep module - cycle arithmetic and the host-side values around it.
//!
//! # Components
//!
//! - `ClockMoment` - wall-clock time on a calendar date with linear offsets
//! - `SleepCycleCalculator` - wake times from a bed time and bed times from a wake time
//! - `SleepCycleOption` / `CycleCount` - one suggestion and its 3..=6 cycle count
//! - `Mood` / `MoodSelection` - mood selector and personalized tips
//! - `SleepHistory` - bounded newest-first list of past calculations
//! - `UserPreferences` - remembered settings
//! - `Feedback` - a user's bug report, feature request or comment
//!
//! Everything here is pure; persistence goes through `ports::SleepStore`.

mod calculator;
mod clock;
mod cycle_option;
mod errors;
mod feedback;
mod history;
mod mood;
mod preferences;

pub use calculator::{
    CalculationDirection, SleepCycleCalculator, FALL_ASLEEP_MINUTES, SLEEP_CYCLE_MINUTES,
};
pub use clock::{parse_wall_time, ClockMoment};
pub use cycle_option::{CycleCount, SleepCycleOption};
pub use errors::SleepError;
pub use feedback::{Feedback, FeedbackType, MAX_FEEDBACK_LENGTH};
pub use history::{CalculationRecord, SleepHistory, DEFAULT_HISTORY_LIMIT, MAX_HISTORY_LIMIT};
pub use mood::{Mood, MoodKey, MoodSelection};
pub use preferences::{PreferenceUpdate, Theme, UserPreferences};
