//! Integration tests for the calculator flow.
//!
//! These tests drive the application handlers against the file store:
//! 1. A signed-in user picks a mood and calculates bed/wake times
//! 2. Each calculation lands in the user's history, newest first
//! 3. Preferences and history survive a fresh store on the same directory
//! 4. Export and clear see the same data
//! 5. Deleting one record and importing an export survive a reopen

use chrono::NaiveDate;
use std::sync::Arc;
use tempfile::TempDir;

use should_i_sleep::adapters::{FileSleepStore, InMemoryUsageTracker};
use should_i_sleep::application::{
    CalculateSleepTimesCommand, CalculateSleepTimesHandler, ClearUserDataHandler, DataExport,
    DeleteCalculationCommand, DeleteCalculationHandler, ExportUserDataHandler,
    GetPreferencesHandler, GetSleepHistoryHandler, ImportUserDataCommand, ImportUserDataHandler,
    SavePreferencesCommand, SavePreferencesHandler, SelectMoodCommand, SelectMoodHandler,
};
use should_i_sleep::domain::foundation::{ErrorCode, UserId};
use should_i_sleep::domain::sleep::{
    CalculationDirection, Mood, MoodKey, PreferenceUpdate, SleepError, Theme,
};
use should_i_sleep::ports::{
    SleepStore, EVENT_CALCULATION_DELETED, EVENT_DATA_IMPORTED, EVENT_HISTORY_CLEARED,
    EVENT_MOOD_SELECTED, EVENT_PREFERENCES_SAVED, EVENT_SLEEP_CALCULATION,
};

// =============================================================================
// Test Infrastructure
// =============================================================================

struct Harness {
    dir: TempDir,
    store: Arc<FileSleepStore>,
    tracker: Arc<InMemoryUsageTracker>,
}

impl Harness {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(FileSleepStore::new(dir.path()));
        Self {
            dir,
            store,
            tracker: Arc::new(InMemoryUsageTracker::new()),
        }
    }

    /// A second store over the same directory, as a later process would see it.
    fn reopen(&self) -> Arc<FileSleepStore> {
        Arc::new(FileSleepStore::new(self.dir.path()))
    }

    fn calculator(&self) -> CalculateSleepTimesHandler {
        CalculateSleepTimesHandler::new(self.store.clone(), self.tracker.clone(), 10)
    }
}

fn alice() -> UserId {
    UserId::new("alice").unwrap()
}

fn june_14() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 14).unwrap()
}

fn command(mood: Mood, current: Option<&str>, wake: Option<&str>) -> CalculateSleepTimesCommand {
    CalculateSleepTimesCommand {
        user_id: Some(alice()),
        mood,
        current_time: current.map(str::to_string),
        wake_time: wake.map(str::to_string),
        anchor_date: june_14(),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn bed_time_calculation_lists_wake_times_across_midnight() {
    let harness = Harness::new();

    let outcome = harness
        .calculator()
        .handle(command(Mood::Neutral, Some("22:30"), None))
        .await
        .unwrap();

    assert_eq!(outcome.direction, CalculationDirection::WakeTimes);
    let times: Vec<String> = outcome.options.iter().map(|o| o.formatted_time()).collect();
    assert_eq!(times, vec!["3:15 AM", "4:45 AM", "6:15 AM", "7:45 AM"]);
    assert!(outcome
        .options
        .iter()
        .all(|o| o.time.date() == NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()));
    assert_eq!(
        outcome.suggestion,
        "Maintain a consistent sleep schedule for best results."
    );
    assert!(outcome.recorded.is_some());
}

#[tokio::test]
async fn wake_time_calculation_lists_bed_times_longest_first() {
    let harness = Harness::new();

    let outcome = harness
        .calculator()
        .handle(command(Mood::Tired, None, Some("07:00")))
        .await
        .unwrap();

    assert_eq!(outcome.direction, CalculationDirection::SleepTimes);
    let summary: Vec<(String, u8)> = outcome
        .options
        .iter()
        .map(|o| (o.formatted_time(), o.cycle_count.value()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("9:45 PM".to_string(), 6),
            ("11:15 PM".to_string(), 5),
            ("12:45 AM".to_string(), 4),
            ("2:15 AM".to_string(), 3),
        ]
    );
}

#[tokio::test]
async fn input_errors_carry_codes_and_track_nothing() {
    let harness = Harness::new();
    let calculator = harness.calculator();

    let missing = calculator
        .handle(command(Mood::Neutral, Some("  "), None))
        .await
        .unwrap_err();
    assert_eq!(missing, SleepError::MissingTime);

    let both = calculator
        .handle(command(Mood::Neutral, Some("22:00"), Some("07:00")))
        .await
        .unwrap_err();
    assert_eq!(both.code(), ErrorCode::ConflictingTimes);

    let garbage = calculator
        .handle(command(Mood::Neutral, Some("25:00"), None))
        .await
        .unwrap_err();
    assert_eq!(garbage.code(), ErrorCode::InvalidTimeFormat);

    assert_eq!(harness.tracker.total_events().await, 0);
    assert!(harness.store.load_history(&alice(), 10).await.unwrap().is_empty());
}

#[tokio::test]
async fn full_session_persists_across_store_instances() {
    let harness = Harness::new();

    // Mood and preferences
    let mood = SelectMoodHandler::new(harness.store.clone(), harness.tracker.clone())
        .handle(SelectMoodCommand {
            user_id: Some(alice()),
            key: MoodKey::Select(Mood::Stressed),
        })
        .await
        .unwrap();
    assert_eq!(mood.mood, Mood::Stressed);

    SavePreferencesHandler::new(harness.store.clone(), harness.tracker.clone())
        .handle(SavePreferencesCommand {
            user_id: Some(alice()),
            update: PreferenceUpdate {
                theme: Some(Theme::Dark),
                preferred_sleep_hours: Some(7),
                ..Default::default()
            },
        })
        .await
        .unwrap();

    // Two calculations
    let calculator = harness.calculator();
    calculator
        .handle(command(Mood::Stressed, Some("23:00"), None))
        .await
        .unwrap();
    calculator
        .handle(command(Mood::Stressed, None, Some("06:30")))
        .await
        .unwrap();

    // A fresh store sees everything
    let reopened = harness.reopen();
    let prefs = GetPreferencesHandler::new(reopened.clone())
        .handle(Some(&alice()))
        .await
        .unwrap();
    assert_eq!(prefs.mood, Mood::Stressed);
    assert_eq!(prefs.theme, Theme::Dark);
    assert_eq!(prefs.preferred_sleep_hours, 7);

    let history = GetSleepHistoryHandler::new(reopened.clone(), 10)
        .handle(&alice())
        .await
        .unwrap();
    let inputs: Vec<(CalculationDirection, &str)> = history
        .entries()
        .iter()
        .map(|r| (r.input_type, r.input_value.as_str()))
        .collect();
    assert_eq!(
        inputs,
        vec![
            (CalculationDirection::SleepTimes, "06:30"),
            (CalculationDirection::WakeTimes, "23:00"),
        ]
    );

    // Export mirrors the store
    let export = ExportUserDataHandler::new(reopened.clone(), 10)
        .handle(Some(alice()))
        .await
        .unwrap();
    let json = serde_json::to_value(&export).unwrap();
    assert_eq!(json["preferences"]["theme"], "dark");
    assert_eq!(json["sleepHistory"].as_array().unwrap().len(), 2);

    // Clear wipes both
    ClearUserDataHandler::new(reopened.clone(), harness.tracker.clone())
        .handle(&alice())
        .await
        .unwrap();
    assert!(reopened.load_history(&alice(), 10).await.unwrap().is_empty());
    assert_eq!(
        reopened.load_preferences(Some(&alice())).await.unwrap().theme,
        Theme::Light
    );

    assert_eq!(
        harness.tracker.event_names().await,
        vec![
            EVENT_MOOD_SELECTED,
            EVENT_PREFERENCES_SAVED,
            EVENT_SLEEP_CALCULATION,
            EVENT_SLEEP_CALCULATION,
            EVENT_HISTORY_CLEARED,
        ]
    );
}

#[tokio::test]
async fn history_is_capped_at_configured_limit() {
    let harness = Harness::new();
    let calculator = CalculateSleepTimesHandler::new(harness.store.clone(), harness.tracker.clone(), 3);

    for hour in 18..23 {
        calculator
            .handle(command(Mood::Happy, Some(&format!("{}:00", hour)), None))
            .await
            .unwrap();
    }

    let history = GetSleepHistoryHandler::new(harness.store.clone(), 3)
        .handle(&alice())
        .await
        .unwrap();
    let inputs: Vec<&str> = history.entries().iter().map(|r| r.input_value.as_str()).collect();
    assert_eq!(inputs, vec!["22:00", "21:00", "20:00"]);
}

#[tokio::test]
async fn anonymous_calculation_keeps_no_history() {
    let harness = Harness::new();

    let outcome = harness
        .calculator()
        .handle(CalculateSleepTimesCommand {
            user_id: None,
            ..command(Mood::Sad, Some("21:00"), None)
        })
        .await
        .unwrap();

    assert!(outcome.recorded.is_none());
    assert_eq!(harness.tracker.event_names().await, vec![EVENT_SLEEP_CALCULATION]);
}

#[tokio::test]
async fn deleted_calculation_stays_deleted_after_reopen() {
    let harness = Harness::new();
    let calculator = harness.calculator();

    let kept = calculator
        .handle(command(Mood::Neutral, Some("22:00"), None))
        .await
        .unwrap()
        .recorded
        .unwrap();
    let dropped = calculator
        .handle(command(Mood::Neutral, None, Some("07:30")))
        .await
        .unwrap()
        .recorded
        .unwrap();

    DeleteCalculationHandler::new(harness.store.clone(), harness.tracker.clone(), 10)
        .handle(DeleteCalculationCommand {
            user_id: alice(),
            record_id: dropped,
        })
        .await
        .unwrap();

    let history = harness.reopen().load_history(&alice(), 10).await.unwrap();
    let ids: Vec<_> = history.entries().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![kept]);
    assert_eq!(
        harness.tracker.event_names().await.last().map(String::as_str),
        Some(EVENT_CALCULATION_DELETED)
    );
}

#[tokio::test]
async fn export_file_restores_into_a_fresh_directory() {
    let source = Harness::new();
    SavePreferencesHandler::new(source.store.clone(), source.tracker.clone())
        .handle(SavePreferencesCommand {
            user_id: Some(alice()),
            update: PreferenceUpdate {
                preferred_sleep_hours: Some(9),
                ..Default::default()
            },
        })
        .await
        .unwrap();
    source
        .calculator()
        .handle(command(Mood::Anxious, Some("23:15"), None))
        .await
        .unwrap();

    let export = ExportUserDataHandler::new(source.store.clone(), 10)
        .handle(Some(alice()))
        .await
        .unwrap();
    let file = source.dir.path().join("export.json");
    std::fs::write(&file, serde_json::to_string_pretty(&export).unwrap()).unwrap();

    let target = Harness::new();
    let data: DataExport =
        serde_json::from_str(&std::fs::read_to_string(&file).unwrap()).unwrap();
    let summary = ImportUserDataHandler::new(target.store.clone(), target.tracker.clone(), 10)
        .handle(ImportUserDataCommand {
            user_id: Some(alice()),
            data,
        })
        .await
        .unwrap();
    assert_eq!(summary.history_records, 1);

    let reopened = target.reopen();
    assert_eq!(
        reopened
            .load_preferences(Some(&alice()))
            .await
            .unwrap()
            .preferred_sleep_hours,
        9
    );
    let history = reopened.load_history(&alice(), 10).await.unwrap();
    assert_eq!(history.entries()[0].input_value, "23:15");
    assert_eq!(history.entries()[0].mood, Mood::Anxious);
    assert_eq!(target.tracker.event_names().await, vec![EVENT_DATA_IMPORTED]);
}
