//! # Storage Layer
//!
//! Persistence for the task list and theme, one JSON file per key.
//!
//! ## Storage Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Tasks | JSON array, newest first | `{data_dir}/tasks.json` |
//! | Theme | JSON string (`"dark"`/`"light"`) | `{data_dir}/theme.json` |
//! | Config | TOML | `{config_dir}/config.toml` |
//!
//! ## Failure Handling
//!
//! - [`TaskFile`] treats missing or corrupt data as an empty list
//! - Failed writes are logged and never reach the caller
//! - All writes are atomic (temp file + rename) under an `fs2` lock
//!
//! ## Key Types
//!
//! - [`Workspace`] - Entry point: resolves the data directory
//! - [`KvStore`] - Raw key-value access
//! - [`TaskFile`] - Task list persistence
//! - [`ThemeFile`] - Theme persistence and fallback rules
//! - [`Config`] - User configuration

mod config;
mod kv;
mod tasks;
mod theme;
mod workspace;

pub use config::{Config, ConfigError, OutputFormat, ThemeConfig};
pub use kv::KvStore;
pub use tasks::{TaskFile, TASKS_KEY};
pub use theme::{system_theme, theme_from_colorfgbg, ThemeFile, THEME_KEY};
pub use workspace::Workspace;
