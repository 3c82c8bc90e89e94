//! Key-value persistence for board state.
//!
//! The engine reads and writes whole string blobs under fixed keys. Nothing is
//! transactional: a blob is either replaced completely or left alone.

use crate::error::{KanbanError, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Key of the current-format board state blob
pub const BOARDS_KEY: &str = "kanban-boards";

/// Key of the tag registry blob
pub const TAGS_KEY: &str = "kanban-tags";

/// Key of the legacy flat `{todo, doing, done}` task map (read only)
pub const LEGACY_TASKS_KEY: &str = "kanban-tasks";

/// A string blob store keyed by name
pub trait StorageAdapter {
    /// Read a blob; `Ok(None)` when nothing is stored under the key
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Replace the blob stored under the key
    fn save(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-memory store, for tests and embedding
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an entry
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl StorageAdapter for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Directory-backed store: one `<key>.json` file per key
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file holding a key
    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(KanbanError::storage(key, "keys may only contain [A-Za-z0-9_-]"));
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl StorageAdapter for FileStorage {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        atomic_write(&path, value.as_bytes())
    }
}

/// Write a file atomically (temp file + rename)
fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    // Write to temp file in same directory
    let temp_path = path.with_extension("json.tmp");
    fs::write(&temp_path, content)?;

    // Rename (atomic on same filesystem)
    fs::rename(&temp_path, path)?;

    Ok(())
}
