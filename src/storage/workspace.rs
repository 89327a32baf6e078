//! Workspace management
//!
//! Resolves the data directory and provides access to stores.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::{system_theme, Config, KvStore, TaskFile, ThemeFile};
use crate::domain::TaskStore;

/// Data directory plus the configuration that located it
pub struct Workspace {
    root: PathBuf,
    config: Config,
}

impl Workspace {
    /// Opens a workspace with an already loaded configuration
    pub fn with_config(config: Config, data_dir: Option<&Path>) -> Result<Self> {
        let root = config.resolve_data_dir(data_dir)?;

        fs::create_dir_all(&root)
            .with_context(|| format!("Failed to create data directory: {}", root.display()))?;

        tracing::debug!(root = %root.display(), "Opened workspace");
        Ok(Self { root, config })
    }

    /// Returns the data directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the key-value store for this workspace
    pub fn kv(&self) -> KvStore {
        KvStore::new(&self.root)
    }

    /// Returns the task list persistence
    pub fn task_file(&self) -> TaskFile {
        TaskFile::new(self.kv())
    }

    /// Returns the theme persistence, aware of the ambient preference
    pub fn theme_file(&self) -> ThemeFile {
        let system = self.config.theme.system.or_else(system_theme);
        ThemeFile::new(self.kv(), system)
    }

    /// Loads the task list
    pub fn open_tasks(&self) -> TaskStore<TaskFile> {
        TaskStore::open(self.task_file())
    }
}
