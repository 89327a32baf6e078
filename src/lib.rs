//! todo-cli - A local task list manager
//!
//! Tasks are short lines of text kept newest-first. They can be completed,
//! deleted and filtered, and are saved as JSON in a per-user data directory.
//! The same list is available through one-shot commands and an interactive
//! terminal UI.

pub mod domain;
pub mod storage;
pub mod cli;

pub use domain::{Filter, Stats, Task, TaskId, TaskStore, Theme, ValidationError};
