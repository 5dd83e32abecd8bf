//! User feedback about the app.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, UserId, ValidationError};

/// Longest accepted feedback message, in characters.
pub const MAX_FEEDBACK_LENGTH: usize = 2000;

/// What the feedback is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackType {
    Bug,
    Feature,
    #[default]
    General,
}

impl FeedbackType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackType::Bug => "bug",
            FeedbackType::Feature => "feature",
            FeedbackType::General => "general",
        }
    }
}

impl std::fmt::Display for FeedbackType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FeedbackType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bug" => Ok(FeedbackType::Bug),
            "feature" => Ok(FeedbackType::Feature),
            "general" => Ok(FeedbackType::General),
            _ => Err(ValidationError::invalid_format(
                "feedback_type",
                format!("expected 'bug', 'feature' or 'general', got '{}'", s),
            )),
        }
    }
}

/// A submitted piece of feedback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    #[serde(rename = "type")]
    pub kind: FeedbackType,
    pub message: String,
    pub timestamp: Timestamp,
    /// `None` for anonymous feedback.
    pub user: Option<UserId>,
}

impl Feedback {
    /// Creates feedback with a trimmed message.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` when the message is blank or longer than
    /// [`MAX_FEEDBACK_LENGTH`] characters.
    pub fn new(
        kind: FeedbackType,
        message: &str,
        user: Option<UserId>,
    ) -> Result<Self, ValidationError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(ValidationError::empty_field("message"));
        }
        let length = message.chars().count();
        if length > MAX_FEEDBACK_LENGTH {
            return Err(ValidationError::out_of_range(
                "message",
                1,
                MAX_FEEDBACK_LENGTH as i32,
                length.min(i32::MAX as usize) as i32,
            ));
        }

        Ok(Self {
            kind,
            message: message.to_string(),
            timestamp: Timestamp::now(),
            user,
        })
    }
}
