//! Domain models for the task list
//!
//! Contains the core logic without any I/O concerns.

mod filter;
mod id;
mod store;
mod task;

pub use filter::{Filter, SelectorError, Theme};
pub use id::{IdError, IdGenerator, TaskId};
pub use store::{MemoryPersistence, Stats, TaskPersistence, TaskStore};
pub use task::{validate_text, Task, ValidationError, MAX_TEXT_LEN};
