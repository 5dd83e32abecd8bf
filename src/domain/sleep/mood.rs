//! Mood selection and the tip shown alongside each calculation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// How the user feels right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    #[default]
    Neutral,
    Anxious,
    Tired,
    Stressed,
    Happy,
    Sad,
}

impl Mood {
    /// Every mood in selector order.
    pub const ALL: [Mood; 6] = [
        Mood::Neutral,
        Mood::Anxious,
        Mood::Tired,
        Mood::Stressed,
        Mood::Happy,
        Mood::Sad,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Neutral => "neutral",
            Mood::Anxious => "anxious",
            Mood::Tired => "tired",
            Mood::Stressed => "stressed",
            Mood::Happy => "happy",
            Mood::Sad => "sad",
        }
    }

    /// Personalized tip for this mood.
    pub fn suggestion(&self) -> &'static str {
        match self {
            Mood::Neutral => "Maintain a consistent sleep schedule for best results.",
            Mood::Anxious => {
                "Try a calming routine before bed: deep breathing, meditation, or gentle stretches."
            }
            Mood::Tired => {
                "Consider a short nap earlier in the day and avoid caffeine late in the afternoon."
            }
            Mood::Stressed => {
                "Practice relaxation techniques like progressive muscle relaxation or journaling before sleep."
            }
            Mood::Happy => {
                "Keep up the good mood! A light evening walk can help maintain your energy balance."
            }
            Mood::Sad => {
                "Try to get some natural light during the day and avoid screens 1 hour before bedtime."
            }
        }
    }

    fn index(&self) -> usize {
        Self::ALL.iter().position(|m| m == self).unwrap_or(0)
    }

    /// Next mood in selector order, wrapping after the last.
    pub fn next(&self) -> Mood {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Previous mood in selector order, wrapping before the first.
    pub fn previous(&self) -> Mood {
        let len = Self::ALL.len();
        Self::ALL[(self.index() + len - 1) % len]
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Mood {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.as_str() == wanted)
            .ok_or_else(|| ValidationError::invalid_format("mood", format!("unknown mood '{}'", s)))
    }
}

/// A key press or click on the mood selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoodKey {
    Next,
    Previous,
    Select(Mood),
}

/// Single-choice selector over [`Mood::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoodSelection {
    current: Mood,
}

impl MoodSelection {
    pub fn new(current: Mood) -> Self {
        Self { current }
    }

    pub fn current(&self) -> Mood {
        self.current
    }

    /// Applies `key` and reports whether the selection changed.
    pub fn apply(&mut self, key: MoodKey) -> bool {
        let next = match key {
            MoodKey::Next => self.current.next(),
            MoodKey::Previous => self.current.previous(),
            MoodKey::Select(mood) => mood,
        };
        let changed = next != self.current;
        self.current = next;
        changed
    }
}
