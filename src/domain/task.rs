//! Task domain model
//!
//! A task is a short line of text that is either pending or completed.
//! Only the completion flag changes after creation.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::id::TaskId;

/// Maximum task text length in characters, counted after trimming
pub const MAX_TEXT_LEN: usize = 200;

/// Rejected task text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Task text cannot be empty")]
    Empty,

    #[error("Task text cannot be longer than 200 characters")]
    TooLong,
}

impl ValidationError {
    /// Stable machine-readable kind
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::Empty => "empty",
            ValidationError::TooLong => "too_long",
        }
    }
}

/// Trims `text` and checks it against the length rules
pub fn validate_text(text: &str) -> Result<&str, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty);
    }
    if trimmed.chars().count() > MAX_TEXT_LEN {
        return Err(ValidationError::TooLong);
    }
    Ok(trimmed)
}

/// A single task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,

    text: String,

    #[serde(default)]
    completed: bool,

    /// Audit only, list order never depends on it
    created_at: DateTime<Utc>,
}

impl Task {
    /// Creates a pending task after validating its text
    pub fn new(id: TaskId, text: &str, created_at: DateTime<Utc>) -> Result<Self, ValidationError> {
        let text = validate_text(text)?;
        Ok(Self {
            id,
            text: text.to_string(),
            completed: false,
            // Millisecond precision, matching the persisted ISO-8601 format
            created_at: created_at.trunc_subsecs(3),
        })
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns true if the stored text satisfies the creation rules
    pub fn is_valid(&self) -> bool {
        matches!(validate_text(&self.text), Ok(t) if t == self.text)
    }

    /// Flips the completion flag
    pub(crate) fn toggle(&mut self) {
        self.completed = !self.completed;
    }
}
