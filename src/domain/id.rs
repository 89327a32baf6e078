//! Task identifiers
//!
//! IDs are plain integers derived from the creation time in milliseconds.
//! The generator never hands out the same value twice: when two tasks are
//! created within the same millisecond, the second one gets `last + 1`.
//! Once `last` reaches `i64::MAX` it has nothing left to issue and returns
//! `None`; the caller has to find a free value itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum IdError {
    #[error("Invalid task ID: expected a positive integer, got '{0}'")]
    InvalidTaskId(String),
}

/// Task ID, serialized as a bare JSON number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(i64);

impl TaskId {
    /// Wraps a raw value
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw integer value
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Delegate so width and alignment flags apply
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for TaskId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.parse::<i64>() {
            Ok(value) if value > 0 => Ok(Self(value)),
            _ => Err(IdError::InvalidTaskId(s.to_string())),
        }
    }
}

/// Monotonic source of task IDs
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    /// Creates a generator with no history
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a generator that only issues IDs greater than `after`
    pub fn after(after: TaskId) -> Self {
        Self { last: after.0 }
    }

    /// Issues the next ID for a task created at `now`, or `None` when exhausted
    pub fn next_at(&mut self, now: DateTime<Utc>) -> Option<TaskId> {
        let id = now.timestamp_millis().max(self.last.checked_add(1)?);
        self.last = id;
        Some(TaskId(id))
    }
}
