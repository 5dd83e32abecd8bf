//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod sleep;

pub use sleep::{
    // Commands
    CalculateSleepTimesCommand, DeleteCalculationCommand, ImportUserDataCommand,
    SavePreferencesCommand, SelectMoodCommand, SubmitFeedbackCommand,
    // Handlers
    CalculateSleepTimesHandler, ClearUserDataHandler, DeleteCalculationHandler,
    ExportUserDataHandler, GetPreferencesHandler, GetSleepHistoryHandler, ImportUserDataHandler,
    SavePreferencesHandler, SelectMoodHandler, SubmitFeedbackHandler,
    // Results
    CalculationOutcome, DataExport, ImportSummary, SelectMoodResult, EXPORT_VERSION,
};
