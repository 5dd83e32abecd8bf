//! ExportUserDataHandler - Query handler producing a portable data export.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::sleep::{CalculationRecord, SleepError, UserPreferences};
use crate::ports::SleepStore;

/// Export format version.
pub const EXPORT_VERSION: &str = "1.0";

/// Everything stored for one user (or the device, when signed out).
///
/// The same shape is read back by `ImportUserDataHandler`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataExport {
    pub version: String,
    pub export_date: Timestamp,
    pub user_id: Option<UserId>,
    pub preferences: UserPreferences,
    /// Only present for signed-in users.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleep_history: Option<Vec<CalculationRecord>>,
}

/// Handler for data exports.
pub struct ExportUserDataHandler {
    store: Arc<dyn SleepStore>,
    history_limit: usize,
}

impl ExportUserDataHandler {
    pub fn new(store: Arc<dyn SleepStore>, history_limit: usize) -> Self {
        Self {
            store,
            history_limit,
        }
    }

    pub async fn handle(&self, user_id: Option<UserId>) -> Result<DataExport, SleepError> {
        let preferences = self.store.load_preferences(user_id.as_ref()).await?;

        let sleep_history = match &user_id {
            Some(id) => Some(
                self.store
                    .load_history(id, self.history_limit)
                    .await?
                    .into_entries(),
            ),
            None => None,
        };

        Ok(DataExport {
            version: EXPORT_VERSION.to_string(),
            export_date: Timestamp::now(),
            user_id,
            preferences,
            sleep_history,
        })
    }
}
