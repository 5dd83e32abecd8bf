//! ImportUserDataHandler - Command handler restoring a data export.

use std::sync::Arc;

use super::export_user_data::{DataExport, EXPORT_VERSION};
use super::track_best_effort;
use crate::domain::foundation::{UserId, ValidationError};
use crate::domain::sleep::{SleepError, SleepHistory};
use crate::ports::{SleepStore, UsageEvent, UsageTracker, EVENT_DATA_IMPORTED};

/// Command to write an export back into the store.
///
/// The target is `user_id`, not the user named inside the export.
#[derive(Debug, Clone)]
pub struct ImportUserDataCommand {
    pub user_id: Option<UserId>,
    pub data: DataExport,
}

/// What an import wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    /// History records stored; always 0 for a device-wide import.
    pub history_records: usize,
}

/// Handler for data imports.
pub struct ImportUserDataHandler {
    store: Arc<dyn SleepStore>,
    usage_tracker: Arc<dyn UsageTracker>,
    history_limit: usize,
}

impl ImportUserDataHandler {
    pub fn new(
        store: Arc<dyn SleepStore>,
        usage_tracker: Arc<dyn UsageTracker>,
        history_limit: usize,
    ) -> Self {
        Self {
            store,
            usage_tracker,
            history_limit,
        }
    }

    /// Validates the export, then replaces stored preferences and, for a
    /// signed-in user, history.
    ///
    /// # Errors
    ///
    /// Returns `SleepError::Validation` for a missing or unsupported
    /// `version` or invalid preferences. Nothing is written in that case.
    pub async fn handle(&self, cmd: ImportUserDataCommand) -> Result<ImportSummary, SleepError> {
        let data = cmd.data;
        check_version(&data.version)?;
        data.preferences.validate()?;

        let user_id = cmd.user_id.as_ref();
        self.store.save_preferences(user_id, &data.preferences).await?;

        let history_records = match (user_id, data.sleep_history) {
            (Some(id), Some(entries)) => {
                let history = SleepHistory::from_entries(self.history_limit, entries);
                self.store.save_history(id, &history).await?;
                history.len()
            }
            (None, Some(entries)) => {
                tracing::warn!(
                    skipped = entries.len(),
                    "Ignoring history in device-wide import"
                );
                0
            }
            (_, None) => 0,
        };
        tracing::info!(
            user_id = user_id.map(UserId::as_str).unwrap_or("device"),
            history_records,
            "User data imported"
        );

        track_best_effort(
            self.usage_tracker.as_ref(),
            UsageEvent::new(EVENT_DATA_IMPORTED)
                .with_property("history_records", history_records.to_string()),
        )
        .await;

        Ok(ImportSummary { history_records })
    }
}

fn check_version(version: &str) -> Result<(), ValidationError> {
    if version.trim().is_empty() {
        return Err(ValidationError::empty_field("version"));
    }
    if version != EXPORT_VERSION {
        return Err(ValidationError::invalid_format(
            "version",
            format!("unsupported export version '{}'", version),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemorySleepStore, InMemoryUsageTracker};
    use crate::application::handlers::sleep::ExportUserDataHandler;
    use crate::domain::foundation::ErrorCode;
    use crate::domain::sleep::{
        CalculationDirection, CalculationRecord, Mood, Theme, UserPreferences,
    };

    fn alice() -> UserId {
        UserId::new("alice").unwrap()
    }

    fn handler(
        store: Arc<InMemorySleepStore>,
        tracker: Arc<InMemoryUsageTracker>,
    ) -> ImportUserDataHandler {
        ImportUserDataHandler::new(store, tracker, 10)
    }

    /// An export of a store where alice has a dark theme and two records.
    async fn alice_export() -> DataExport {
        let source = Arc::new(InMemorySleepStore::new());
        let prefs = UserPreferences {
            theme: Theme::Dark,
            mood: Mood::Tired,
            ..Default::default()
        };
        source.save_preferences(Some(&alice()), &prefs).await.unwrap();

        let mut history = SleepHistory::default();
        for time in ["06:30", "07:15"] {
            history.record(CalculationRecord::new(
                Mood::Tired,
                CalculationDirection::SleepTimes,
                time,
            ));
        }
        source.save_history(&alice(), &history).await.unwrap();

        ExportUserDataHandler::new(source, 10)
            .handle(Some(alice()))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn restores_an_export_into_an_empty_store() {
        let export = alice_export().await;
        let expected = export.sleep_history.clone().unwrap();
        let store = Arc::new(InMemorySleepStore::new());
        let tracker = Arc::new(InMemoryUsageTracker::new());

        let summary = handler(store.clone(), tracker.clone())
            .handle(ImportUserDataCommand {
                user_id: Some(alice()),
                data: export,
            })
            .await
            .unwrap();

        assert_eq!(summary.history_records, 2);
        let prefs = store.load_preferences(Some(&alice())).await.unwrap();
        assert_eq!(prefs.theme, Theme::Dark);
        assert_eq!(prefs.mood, Mood::Tired);
        assert_eq!(
            store.load_history(&alice(), 10).await.unwrap().entries(),
            expected.as_slice()
        );
        assert_eq!(tracker.event_names().await, vec![EVENT_DATA_IMPORTED]);
    }

    #[tokio::test]
    async fn reads_exports_from_json() {
        let json = serde_json::to_string(&alice_export().await).unwrap();
        let data: DataExport = serde_json::from_str(&json).unwrap();
        let store = Arc::new(InMemorySleepStore::new());

        handler(store.clone(), Arc::new(InMemoryUsageTracker::new()))
            .handle(ImportUserDataCommand {
                user_id: Some(UserId::new("bob").unwrap()),
                data,
            })
            .await
            .unwrap();

        let bob = UserId::new("bob").unwrap();
        assert_eq!(store.load_history(&bob, 10).await.unwrap().len(), 2);
        assert!(store.load_history(&alice(), 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn device_wide_import_writes_preferences_only() {
        let store = Arc::new(InMemorySleepStore::new());

        let summary = handler(store.clone(), Arc::new(InMemoryUsageTracker::new()))
            .handle(ImportUserDataCommand {
                user_id: None,
                data: alice_export().await,
            })
            .await
            .unwrap();

        assert_eq!(summary.history_records, 0);
        assert_eq!(store.load_preferences(None).await.unwrap().theme, Theme::Dark);
        assert!(store.load_history(&alice(), 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn rejects_unknown_or_missing_version() {
        let store = Arc::new(InMemorySleepStore::new());
        let tracker = Arc::new(InMemoryUsageTracker::new());
        let handler = handler(store.clone(), tracker.clone());

        for (version, code) in [("2.0", ErrorCode::InvalidFormat), ("", ErrorCode::EmptyField)] {
            let mut data = alice_export().await;
            data.version = version.to_string();

            let err = handler
                .handle(ImportUserDataCommand {
                    user_id: Some(alice()),
                    data,
                })
                .await
                .unwrap_err();
            assert_eq!(err.code(), code);
        }

        assert!(store.is_empty().await);
        assert_eq!(tracker.total_events().await, 0);
    }

    #[tokio::test]
    async fn rejects_invalid_preferences() {
        let store = Arc::new(InMemorySleepStore::new());
        let mut data = alice_export().await;
        data.preferences.reminder_time = "9pm".to_string();

        let err = handler(store.clone(), Arc::new(InMemoryUsageTracker::new()))
            .handle(ImportUserDataCommand {
                user_id: Some(alice()),
                data,
            })
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::InvalidFormat);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn oversized_history_keeps_newest_records() {
        let store = Arc::new(InMemorySleepStore::new());
        let data = alice_export().await;
        let newest = data.sleep_history.as_ref().unwrap()[0].clone();

        let summary =
            ImportUserDataHandler::new(store.clone(), Arc::new(InMemoryUsageTracker::new()), 1)
                .handle(ImportUserDataCommand {
                    user_id: Some(alice()),
                    data,
                })
                .await
                .unwrap();

        assert_eq!(summary.history_records, 1);
        assert_eq!(store.load_history(&alice(), 10).await.unwrap().entries(), &[newest]);
    }
}
