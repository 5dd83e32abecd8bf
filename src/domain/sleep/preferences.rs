//! User preferences remembered between runs.

use serde::{Deserialize, Serialize};

use super::clock::parse_wall_time;
use super::mood::Mood;
use crate::domain::foundation::{Timestamp, ValidationError};

/// Display theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Theme {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(ValidationError::invalid_format(
                "theme",
                format!("expected 'light' or 'dark', got '{}'", s),
            )),
        }
    }
}

/// Per-user (or device-wide) preferences.
///
/// Unknown or missing fields fall back to their defaults when loading, so
/// records written by older versions still deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserPreferences {
    pub mood: Mood,
    pub theme: Theme,
    pub notifications: bool,
    pub auto_set_current_time: bool,
    /// Target sleep length in whole hours.
    #[serde(rename = "preferredSleepDuration")]
    pub preferred_sleep_hours: u8,
    pub bedtime_reminder: bool,
    /// Reminder wall-clock time, `HH:MM`.
    pub reminder_time: String,
    pub last_updated: Option<Timestamp>,
}

impl UserPreferences {
    /// Checks field-level constraints.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(1..=24).contains(&self.preferred_sleep_hours) {
            return Err(ValidationError::out_of_range(
                "preferred_sleep_hours",
                1,
                24,
                self.preferred_sleep_hours as i32,
            ));
        }
        parse_wall_time(&self.reminder_time)
            .map_err(|e| ValidationError::invalid_format("reminder_time", e.to_string()))?;
        Ok(())
    }

    /// Copy with a new mood, stamped as updated now.
    pub fn with_mood(&self, mood: Mood) -> Self {
        Self {
            mood,
            last_updated: Some(Timestamp::now()),
            ..self.clone()
        }
    }

    /// Copy stamped as updated now.
    pub fn touched(self) -> Self {
        Self {
            last_updated: Some(Timestamp::now()),
            ..self
        }
    }
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            mood: Mood::Neutral,
            theme: Theme::Light,
            notifications: true,
            auto_set_current_time: false,
            preferred_sleep_hours: 8,
            bedtime_reminder: false,
            reminder_time: "22:00".to_string(),
            last_updated: None,
        }
    }
}

/// Partial change to preferences; `None` fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreferenceUpdate {
    pub mood: Option<Mood>,
    pub theme: Option<Theme>,
    pub notifications: Option<bool>,
    pub auto_set_current_time: Option<bool>,
    pub preferred_sleep_hours: Option<u8>,
    pub bedtime_reminder: Option<bool>,
    pub reminder_time: Option<String>,
}

impl PreferenceUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merges this update over `current`.
    pub fn apply_to(self, current: UserPreferences) -> UserPreferences {
        UserPreferences {
            mood: self.mood.unwrap_or(current.mood),
            theme: self.theme.unwrap_or(current.theme),
            notifications: self.notifications.unwrap_or(current.notifications),
            auto_set_current_time: self
                .auto_set_current_time
                .unwrap_or(current.auto_set_current_time),
            preferred_sleep_hours: self
                .preferred_sleep_hours
                .unwrap_or(current.preferred_sleep_hours),
            bedtime_reminder: self.bedtime_reminder.unwrap_or(current.bedtime_reminder),
            reminder_time: self.reminder_time.unwrap_or(current.reminder_time),
            last_updated: current.last_updated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let prefs = UserPreferences::default();
        assert_eq!(prefs.mood, Mood::Neutral);
        assert_eq!(prefs.theme, Theme::Light);
        assert!(prefs.notifications);
        assert_eq!(prefs.preferred_sleep_hours, 8);
        assert_eq!(prefs.reminder_time, "22:00");
        assert!(prefs.validate().is_ok());
    }

    #[test]
    fn rejects_bad_reminder_time() {
        let prefs = UserPreferences {
            reminder_time: "25:00".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            prefs.validate(),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn rejects_zero_sleep_hours() {
        let prefs = UserPreferences {
            preferred_sleep_hours: 0,
            ..Default::default()
        };
        assert!(matches!(
            prefs.validate(),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn with_mood_stamps_update() {
        let prefs = UserPreferences::default().with_mood(Mood::Tired);
        assert_eq!(prefs.mood, Mood::Tired);
        assert!(prefs.last_updated.is_some());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let prefs: UserPreferences = serde_json::from_str(r#"{"mood":"happy"}"#).unwrap();
        assert_eq!(prefs.mood, Mood::Happy);
        assert_eq!(prefs.reminder_time, "22:00");
        assert!(prefs.notifications);
    }

    #[test]
    fn reads_stored_sleep_duration() {
        let prefs: UserPreferences =
            serde_json::from_str(r#"{"preferredSleepDuration":7,"theme":"dark"}"#).unwrap();
        assert_eq!(prefs.preferred_sleep_hours, 7);
        assert_eq!(prefs.theme, Theme::Dark);
    }

    #[test]
    fn update_overrides_only_given_fields() {
        let update = PreferenceUpdate {
            theme: Some(Theme::Dark),
            reminder_time: Some("21:30".to_string()),
            ..Default::default()
        };
        assert!(!update.is_empty());

        let current = UserPreferences::default().with_mood(Mood::Happy);
        let merged = update.apply_to(current.clone());
        assert_eq!(merged.theme, Theme::Dark);
        assert_eq!(merged.reminder_time, "21:30");
        assert_eq!(merged.mood, Mood::Happy);
        assert_eq!(merged.last_updated, current.last_updated);
        assert!(PreferenceUpdate::default().is_empty());
    }

    #[test]
    fn theme_parses_and_displays() {
        assert_eq!("Dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert_eq!(Theme::Light.to_string(), "light");
        assert!("sepia".parse::<Theme>().is_err());
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(UserPreferences::default()).unwrap();
        assert_eq!(json["autoSetCurrentTime"], false);
        assert_eq!(json["preferredSleepDuration"], 8);
        assert!(json.get("preferredSleepHours").is_none());
        assert_eq!(json["reminderTime"], "22:00");
    }
}
