//! Sleep-calculation error types.

use thiserror::Error;

use crate::domain::foundation::{ErrorCode, RecordId, ValidationError};

/// Errors surfaced by sleep calculations and the handlers around them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SleepError {
    /// Input did not match a valid `HH:MM` 24-hour time.
    #[error("Invalid time '{input}': expected HH:MM with hour 0-23 and minute 0-59")]
    InvalidTimeFormat { input: String },

    #[error("Please enter either current time or desired wake time.")]
    MissingTime,

    #[error("Please enter only one time field.")]
    ConflictingTimes,

    #[error("Please sign in to save preferences")]
    SignInRequired,

    #[error("No calculation with id {id} in history")]
    CalculationNotFound { id: RecordId },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl SleepError {
    pub fn invalid_time(input: impl Into<String>) -> Self {
        SleepError::InvalidTimeFormat {
            input: input.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        SleepError::Storage(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            SleepError::InvalidTimeFormat { .. } => ErrorCode::InvalidTimeFormat,
            SleepError::MissingTime => ErrorCode::MissingTime,
            SleepError::ConflictingTimes => ErrorCode::ConflictingTimes,
            SleepError::SignInRequired => ErrorCode::SignInRequired,
            SleepError::CalculationNotFound { .. } => ErrorCode::NotFound,
            SleepError::Validation(err) => err.code(),
            SleepError::Storage(_) => ErrorCode::StorageError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_time_mentions_input() {
        let err = SleepError::invalid_time("25:00");
        assert!(err.to_string().contains("25:00"));
        assert_eq!(err.code(), ErrorCode::InvalidTimeFormat);
    }

    #[test]
    fn validation_errors_keep_their_code() {
        let err: SleepError = ValidationError::empty_field("user_id").into();
        assert_eq!(err.code(), ErrorCode::EmptyField);
        assert_eq!(err.to_string(), "Field 'user_id' cannot be empty");
    }

    #[test]
    fn missing_calculation_names_the_id() {
        let id: RecordId = "550e8400-e29b-41d4-a716-446655440000".parse().unwrap();
        let err = SleepError::CalculationNotFound { id };
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert!(err.to_string().contains("550e8400"));
        assert_eq!(ErrorCode::NotFound.to_string(), "NOT_FOUND");
    }

    #[test]
    fn input_messages_match_host_wording() {
        assert_eq!(
            SleepError::MissingTime.to_string(),
            "Please enter either current time or desired wake time."
        );
        assert_eq!(
            SleepError::ConflictingTimes.to_string(),
            "Please enter only one time field."
        );
    }
}
