//! The task list and its derived views
//!
//! [`TaskStore`] owns the ordered collection (newest first) and is the only
//! place tasks are mutated. Every successful mutation is handed to a
//! [`TaskPersistence`] implementation; persistence is best-effort and can
//! never fail an operation.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::Rc;

use chrono::Utc;
use serde::Serialize;

use super::filter::Filter;
use super::id::{IdGenerator, TaskId};
use super::task::{Task, ValidationError};

/// Where a task list is loaded from and saved to
pub trait TaskPersistence {
    /// Returns the saved tasks, or an empty list if nothing usable is stored
    fn load(&self) -> Vec<Task>;

    /// Saves the full list. Failures are reported by the implementation, not the caller.
    fn save(&self, tasks: &[Task]);
}

/// Aggregate counts over the whole collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Stats {
    pub total: usize,
    pub completed: usize,
    pub remaining: usize,
}

impl Stats {
    /// Clearing only makes sense when something is completed
    pub fn clear_enabled(&self) -> bool {
        self.completed > 0
    }
}

/// In-memory task list with persistence hooks
pub struct TaskStore<P: TaskPersistence> {
    tasks: Vec<Task>,
    ids: IdGenerator,
    persistence: P,
}

impl<P: TaskPersistence> TaskStore<P> {
    /// Loads the saved list, dropping entries that break the list invariants
    pub fn open(persistence: P) -> Self {
        let loaded = persistence.load();
        let loaded_len = loaded.len();

        let mut seen = HashSet::new();
        let tasks: Vec<Task> = loaded
            .into_iter()
            .filter(|task| task.id().value() > 0 && task.is_valid() && seen.insert(task.id()))
            .collect();

        if tasks.len() != loaded_len {
            tracing::warn!(
                dropped = loaded_len - tasks.len(),
                "Ignoring saved tasks with duplicate or non-positive ids or invalid text"
            );
        }

        let ids = match tasks.iter().map(Task::id).max() {
            Some(max) => IdGenerator::after(max),
            None => IdGenerator::new(),
        };

        Self {
            tasks,
            ids,
            persistence,
        }
    }

    /// Validates `text` and puts a new task at the front of the list
    pub fn add_task(&mut self, text: &str) -> Result<Task, ValidationError> {
        let now = Utc::now();
        let id = match self.ids.next_at(now) {
            Some(id) => id,
            None => self.unused_id(),
        };
        let task = Task::new(id, text, now)?;

        self.tasks.insert(0, task.clone());
        self.persist();
        tracing::debug!(id = %task.id(), "Added task");

        Ok(task)
    }

    /// Flips completion. Unknown IDs are ignored and return false.
    pub fn toggle_complete(&mut self, id: TaskId) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id() == id) else {
            tracing::debug!(%id, "Toggle ignored, no such task");
            return false;
        };

        task.toggle();
        self.persist();
        true
    }

    /// Removes a task. Unknown IDs are ignored and return false.
    pub fn delete_task(&mut self, id: TaskId) -> bool {
        let len_before = self.tasks.len();
        self.tasks.retain(|t| t.id() != id);

        let removed = self.tasks.len() != len_before;
        if removed {
            self.persist();
        } else {
            tracing::debug!(%id, "Delete ignored, no such task");
        }
        removed
    }

    /// Removes every completed task and returns how many were removed
    pub fn clear_completed(&mut self) -> usize {
        let len_before = self.tasks.len();
        self.tasks.retain(|t| !t.is_completed());

        let removed = len_before - self.tasks.len();
        if removed > 0 {
            self.persist();
        }
        removed
    }

    /// Tasks visible under `filter`, in list order
    pub fn filtered_view(&self, filter: Filter) -> Vec<&Task> {
        self.tasks.iter().filter(|t| filter.matches(t)).collect()
    }

    pub fn stats(&self) -> Stats {
        let total = self.tasks.len();
        let completed = self.tasks.iter().filter(|t| t.is_completed()).count();
        Stats {
            total,
            completed,
            remaining: total - completed,
        }
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id() == id)
    }

    /// All tasks, newest first
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Smallest positive ID no task holds
    fn unused_id(&self) -> TaskId {
        let taken: HashSet<i64> = self.tasks.iter().map(|t| t.id().value()).collect();
        let value = (1..).find(|v| !taken.contains(v)).unwrap_or(1);
        TaskId::new(value)
    }

    fn persist(&self) {
        self.persistence.save(&self.tasks);
    }
}

/// Persistence that keeps the last saved list in memory
///
/// Clones share the same storage, so a test can keep a handle while the
/// store owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryPersistence {
    saved: Rc<RefCell<Vec<Task>>>,
    saves: Rc<Cell<usize>>,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with `tasks` already saved
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        let persistence = Self::default();
        *persistence.saved.borrow_mut() = tasks;
        persistence
    }

    /// The most recently saved list
    pub fn saved(&self) -> Vec<Task> {
        self.saved.borrow().clone()
    }

    /// Number of times `save` was called
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl TaskPersistence for MemoryPersistence {
    fn load(&self) -> Vec<Task> {
        self.saved()
    }

    fn save(&self, tasks: &[Task]) {
        *self.saved.borrow_mut() = tasks.to_vec();
        self.saves.set(self.saves.get() + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::task::MAX_TEXT_LEN;
    use proptest::prelude::*;

    fn empty_store() -> (TaskStore<MemoryPersistence>, MemoryPersistence) {
        let persistence = MemoryPersistence::new();
        (TaskStore::open(persistence.clone()), persistence)
    }

    fn texts(view: &[&Task]) -> Vec<String> {
        view.iter().map(|t| t.text().to_string()).collect()
    }

    #[test]
    fn add_prepends_and_persists() {
        let (mut store, persistence) = empty_store();

        store.add_task("Buy milk").unwrap();
        let walk = store.add_task("Walk dog").unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.filtered_view(Filter::All)[0].id(), walk.id());
        assert_eq!(persistence.save_count(), 2);
        assert_eq!(persistence.saved(), store.tasks());
    }

    #[test]
    fn add_returns_pending_trimmed_task() {
        let (mut store, _) = empty_store();

        let task = store.add_task("  Buy milk  ").unwrap();
        assert_eq!(task.text(), "Buy milk");
        assert!(!task.is_completed());
        assert_eq!(store.get(task.id()), Some(&task));
    }

    #[test]
    fn add_rejects_empty_text() {
        let (mut store, persistence) = empty_store();

        assert_eq!(store.add_task(""), Err(ValidationError::Empty));
        assert_eq!(store.add_task("   "), Err(ValidationError::Empty));

        assert!(store.is_empty());
        assert_eq!(persistence.save_count(), 0);
    }

    #[test]
    fn add_enforces_length_limit() {
        let (mut store, _) = empty_store();

        let over = "x".repeat(MAX_TEXT_LEN + 1);
        assert_eq!(store.add_task(&over), Err(ValidationError::TooLong));
        assert!(store.is_empty());

        let exact = "x".repeat(MAX_TEXT_LEN);
        assert!(store.add_task(&exact).is_ok());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn rapid_adds_get_unique_ids() {
        let (mut store, _) = empty_store();

        for i in 0..100 {
            store.add_task(&format!("Task {}", i)).unwrap();
        }

        let ids: HashSet<_> = store.tasks().iter().map(Task::id).collect();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn toggle_twice_restores_state() {
        let (mut store, persistence) = empty_store();
        let task = store.add_task("Buy milk").unwrap();

        assert!(store.toggle_complete(task.id()));
        assert!(store.get(task.id()).unwrap().is_completed());

        assert!(store.toggle_complete(task.id()));
        assert!(!store.get(task.id()).unwrap().is_completed());
        assert_eq!(persistence.save_count(), 3);
    }

    #[test]
    fn toggle_unknown_id_is_noop() {
        let (mut store, persistence) = empty_store();
        store.add_task("Buy milk").unwrap();
        let before = store.tasks().to_vec();

        assert!(!store.toggle_complete(TaskId::new(1)));
        assert_eq!(store.tasks(), before.as_slice());
        assert_eq!(persistence.save_count(), 1);
    }

    #[test]
    fn delete_removes_task() {
        let (mut store, persistence) = empty_store();
        let milk = store.add_task("Buy milk").unwrap();
        store.add_task("Walk dog").unwrap();

        assert!(store.delete_task(milk.id()));
        assert_eq!(texts(&store.filtered_view(Filter::All)), ["Walk dog"]);
        assert_eq!(persistence.saved().len(), 1);
    }

    #[test]
    fn delete_unknown_id_does_not_persist() {
        let (mut store, persistence) = empty_store();
        store.add_task("Buy milk").unwrap();

        assert!(!store.delete_task(TaskId::new(1)));
        assert_eq!(store.len(), 1);
        assert_eq!(persistence.save_count(), 1);
    }

    #[test]
    fn delete_then_toggle_is_silent() {
        let (mut store, _) = empty_store();
        let task = store.add_task("Buy milk").unwrap();

        assert!(store.delete_task(task.id()));
        assert!(!store.toggle_complete(task.id()));
        assert!(!store.delete_task(task.id()));
    }

    #[test]
    fn clear_completed_keeps_pending_order() {
        let (mut store, _) = empty_store();
        let ids: Vec<_> = ["one", "two", "three", "four", "five"]
            .iter()
            .map(|t| store.add_task(t).unwrap().id())
            .collect();

        store.toggle_complete(ids[1]);
        store.toggle_complete(ids[3]);

        assert_eq!(store.clear_completed(), 2);
        assert_eq!(
            texts(&store.filtered_view(Filter::All)),
            ["five", "three", "one"]
        );
    }

    #[test]
    fn clear_completed_without_completed_does_not_persist() {
        let (mut store, persistence) = empty_store();
        store.add_task("Buy milk").unwrap();

        assert_eq!(store.clear_completed(), 0);
        assert_eq!(persistence.save_count(), 1);
    }

    #[test]
    fn filtered_views_preserve_order() {
        let (mut store, _) = empty_store();
        let a = store.add_task("a").unwrap();
        store.add_task("b").unwrap();
        let c = store.add_task("c").unwrap();
        store.add_task("d").unwrap();

        store.toggle_complete(a.id());
        store.toggle_complete(c.id());

        assert_eq!(texts(&store.filtered_view(Filter::All)), ["d", "c", "b", "a"]);
        assert_eq!(texts(&store.filtered_view(Filter::Completed)), ["c", "a"]);
        assert_eq!(texts(&store.filtered_view(Filter::Pending)), ["d", "b"]);
    }

    #[test]
    fn stats_counts() {
        let (mut store, _) = empty_store();
        assert_eq!(store.stats(), Stats::default());
        assert!(!store.stats().clear_enabled());

        let task = store.add_task("a").unwrap();
        store.add_task("b").unwrap();
        store.toggle_complete(task.id());

        let stats = store.stats();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.remaining, 1);
        assert!(stats.clear_enabled());
    }

    #[test]
    fn buy_milk_walk_dog_scenario() {
        let (mut store, _) = empty_store();

        let milk = store.add_task("Buy milk").unwrap();
        store.add_task("Walk dog").unwrap();
        store.toggle_complete(milk.id());

        assert_eq!(texts(&store.filtered_view(Filter::Pending)), ["Walk dog"]);
        assert_eq!(texts(&store.filtered_view(Filter::Completed)), ["Buy milk"]);
        assert_eq!(
            store.stats(),
            Stats {
                total: 2,
                completed: 1,
                remaining: 1
            }
        );
    }

    #[test]
    fn reopen_restores_saved_list() {
        let (mut store, persistence) = empty_store();
        let milk = store.add_task("Buy milk").unwrap();
        store.add_task("Walk dog").unwrap();
        store.toggle_complete(milk.id());

        let reopened = TaskStore::open(persistence.clone());
        assert_eq!(reopened.tasks(), store.tasks());
    }

    #[test]
    fn open_drops_duplicate_and_invalid_entries() {
        let json = r#"[
            {"id":3,"text":"newest","completed":false,"createdAt":"2025-01-01T00:00:02Z"},
            {"id":2,"text":"   ","completed":false,"createdAt":"2025-01-01T00:00:01Z"},
            {"id":3,"text":"dup","completed":true,"createdAt":"2025-01-01T00:00:01Z"},
            {"id":1,"text":"oldest","completed":true,"createdAt":"2025-01-01T00:00:00Z"}
        ]"#;
        let tasks: Vec<Task> = serde_json::from_str(json).unwrap();
        let store = TaskStore::open(MemoryPersistence::with_tasks(tasks));

        assert_eq!(texts(&store.filtered_view(Filter::All)), ["newest", "oldest"]);
    }

    #[test]
    fn new_ids_exceed_loaded_ids() {
        let far_future = Utc::now().timestamp_millis() + 1_000_000;
        let json = format!(
            r#"[{{"id":{},"text":"loaded","completed":false,"createdAt":"2025-01-01T00:00:00Z"}}]"#,
            far_future
        );
        let tasks: Vec<Task> = serde_json::from_str(&json).unwrap();
        let mut store = TaskStore::open(MemoryPersistence::with_tasks(tasks));

        let added = store.add_task("new").unwrap();
        assert!(added.id().value() > far_future);
    }

    #[test]
    fn add_after_max_id_stays_unique() {
        let json = format!(
            r#"[{{"id":{},"text":"loaded","completed":false,"createdAt":"2025-01-01T00:00:00Z"}}]"#,
            i64::MAX
        );
        let tasks: Vec<Task> = serde_json::from_str(&json).unwrap();
        let mut store = TaskStore::open(MemoryPersistence::with_tasks(tasks));

        let first = store.add_task("first").unwrap();
        let second = store.add_task("second").unwrap();

        let ids: HashSet<_> = store.tasks().iter().map(Task::id).collect();
        assert_eq!(ids.len(), 3);
        assert!(first.id().value() > 0);
        assert!(second.id().value() > 0);

        // Each id addresses exactly its own task
        assert!(store.toggle_complete(first.id()));
        assert_eq!(store.filtered_view(Filter::Completed).len(), 1);
        assert!(store.delete_task(second.id()));
        assert_eq!(texts(&store.filtered_view(Filter::All)), ["first", "loaded"]);
    }

    #[test]
    fn open_drops_non_positive_ids() {
        let json = r#"[
            {"id":5,"text":"kept","completed":false,"createdAt":"2025-01-01T00:00:02Z"},
            {"id":0,"text":"zero","completed":false,"createdAt":"2025-01-01T00:00:01Z"},
            {"id":-3,"text":"negative","completed":true,"createdAt":"2025-01-01T00:00:00Z"}
        ]"#;
        let tasks: Vec<Task> = serde_json::from_str(json).unwrap();
        let store = TaskStore::open(MemoryPersistence::with_tasks(tasks));

        assert_eq!(texts(&store.filtered_view(Filter::All)), ["kept"]);
    }

    proptest! {
        #[test]
        fn stats_identity_holds(ops in proptest::collection::vec((0u8..4, 0usize..8), 0..40)) {
            let (mut store, _) = empty_store();

            for (op, pick) in ops {
                let target = store.tasks().get(pick).map(Task::id).unwrap_or(TaskId::new(1));
                match op {
                    0 => { store.add_task(&format!("task {}", pick)).unwrap(); }
                    1 => { store.toggle_complete(target); }
                    2 => { store.delete_task(target); }
                    _ => { store.clear_completed(); }
                }

                let stats = store.stats();
                prop_assert_eq!(stats.total, stats.completed + stats.remaining);
                prop_assert_eq!(stats.total, store.len());
                prop_assert_eq!(stats.completed, store.filtered_view(Filter::Completed).len());
                prop_assert_eq!(stats.remaining, store.filtered_view(Filter::Pending).len());
            }
        }

        #[test]
        fn valid_text_always_added_first(text in "[a-zA-Z0-9 ]{0,200}") {
            let (mut store, _) = empty_store();
            store.add_task("existing").unwrap();

            match store.add_task(&text) {
                Ok(task) => {
                    prop_assert!(!text.trim().is_empty());
                    prop_assert_eq!(store.len(), 2);
                    prop_assert_eq!(store.filtered_view(Filter::All)[0].id(), task.id());
                }
                Err(err) => {
                    prop_assert_eq!(err, ValidationError::Empty);
                    prop_assert_eq!(store.len(), 1);
                }
            }
        }

        #[test]
        fn toggle_pair_is_identity(count in 1usize..10, pick in 0usize..10) {
            let (mut store, _) = empty_store();
            for i in 0..count {
                store.add_task(&format!("task {}", i)).unwrap();
            }
            let before = store.tasks().to_vec();
            let id = before[pick % count].id();

            prop_assert!(store.toggle_complete(id));
            prop_assert!(store.toggle_complete(id));
            prop_assert_eq!(store.tasks(), before.as_slice());
        }
    }
}
