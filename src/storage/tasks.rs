//! Task list persistence under the `tasks` key
//!
//! Loading never fails: a missing or unreadable file is an empty list.
//! Saving is best-effort: errors are logged and the session carries on.

use crate::domain::{Task, TaskPersistence};

use super::KvStore;

/// Key the task list is stored under
pub const TASKS_KEY: &str = "tasks";

/// File-backed [`TaskPersistence`]
#[derive(Debug, Clone)]
pub struct TaskFile {
    kv: KvStore,
}

impl TaskFile {
    pub fn new(kv: KvStore) -> Self {
        Self { kv }
    }

    pub fn kv(&self) -> &KvStore {
        &self.kv
    }
}

impl TaskPersistence for TaskFile {
    fn load(&self) -> Vec<Task> {
        match self.kv.get::<Vec<Task>>(TASKS_KEY) {
            Ok(Some(tasks)) => {
                tracing::debug!(count = tasks.len(), "Loaded tasks");
                tasks
            }
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(
                    path = %self.kv.path_for(TASKS_KEY).display(),
                    "Ignoring unreadable task list: {:#}",
                    e
                );
                Vec::new()
            }
        }
    }

    fn save(&self, tasks: &[Task]) {
        if let Err(e) = self.kv.set(TASKS_KEY, tasks) {
            tracing::warn!("Failed to save tasks: {:#}", e);
        }
    }
}
