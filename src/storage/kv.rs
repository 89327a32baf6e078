//! Key-value storage backed by one JSON file per key
//!
//! Key `tasks` lives in `{dir}/tasks.json`, key `theme` in `{dir}/theme.json`.
//! Uses file locking for concurrent access safety.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Directory of JSON values addressed by key
#[derive(Debug, Clone)]
pub struct KvStore {
    dir: PathBuf,
}

impl KvStore {
    /// Creates a store rooted at `dir`. Nothing is created until the first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the directory holding the values
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the file backing `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    /// Reads the raw contents for `key`, or `None` if it was never written
    pub fn read_raw(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }

        let mut file = File::open(&path)
            .with_context(|| format!("Failed to open {}", path.display()))?;

        // Acquire shared lock for reading
        file.lock_shared()
            .with_context(|| format!("Failed to acquire read lock on {}", path.display()))?;

        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        // Lock is released when file is dropped
        Ok(Some(contents))
    }

    /// Replaces the contents for `key` atomically
    pub fn write_raw(&self, key: &str, contents: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create directory: {}", self.dir.display()))?;

        let path = self.path_for(key);
        let temp_path = path.with_extension("json.tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

            file.lock_exclusive()
                .with_context(|| format!("Failed to acquire write lock on {}", temp_path.display()))?;

            let mut writer = BufWriter::new(&file);
            writer
                .write_all(contents.as_bytes())
                .with_context(|| format!("Failed to write {}", temp_path.display()))?;
            writer
                .flush()
                .with_context(|| format!("Failed to flush {}", temp_path.display()))?;
        }

        fs::rename(&temp_path, &path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                temp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }

    /// Reads and decodes the value for `key`
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.read_raw(key)? {
            Some(contents) => {
                let value = serde_json::from_str(&contents)
                    .with_context(|| format!("Failed to parse value for key '{}'", key))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Encodes and writes the value for `key`
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let contents = serde_json::to_string_pretty(value)
            .with_context(|| format!("Failed to serialize value for key '{}'", key))?;
        self.write_raw(key, &contents)
    }
}
