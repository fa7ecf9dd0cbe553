//! Key/value storage backends
//!
//! Values are plain strings, mirroring the browser `localStorage` contract.
//! Callers that store structured data serialize it to JSON themselves.

use crate::storage::error::StorageResult;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Storage key for the persisted theme preference
pub const THEME_KEY: &str = "theme";

/// Storage key for the tracked keyword list (JSON array of strings)
pub const TRACKED_KEYWORDS_KEY: &str = "trackedKeywords";

/// File name used by [`FileStorage`] inside its data directory
const STORAGE_FILE: &str = "local_storage.json";

/// String key/value storage that persists across sessions
pub trait LocalStorage: Send {
    /// Read a value, `None` if the key was never written
    fn get_item(&self, key: &str) -> Option<String>;

    /// Write a value, replacing any previous one
    fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()>;

    /// Delete a value; deleting a missing key is not an error
    fn remove_item(&mut self, key: &str) -> StorageResult<()>;
}

/// JSON-file backed storage
///
/// The file is re-read on every access, so several handles pointing at the
/// same directory (e.g. the keyword and theme stores) never overwrite each
/// other's keys with stale copies.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Create a storage handle rooted at `data_dir`
    ///
    /// The directory is created lazily on first write.
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir.as_ref().join(STORAGE_FILE),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> BTreeMap<String, String> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return BTreeMap::new(),
            Err(e) => {
                tracing::warn!(path = ?self.path, error = %e, "Failed to read local storage");
                return BTreeMap::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(path = ?self.path, error = %e, "Local storage is corrupt, starting empty");
                BTreeMap::new()
            }
        }
    }

    fn write_all(&self, items: &BTreeMap<String, String>) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(items)?;
        let tmp_path = self.path.with_extension("json.tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.path)?;

        Ok(())
    }
}

impl LocalStorage for FileStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.read_all().remove(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()> {
        let mut items = self.read_all();
        items.insert(key.to_string(), value.to_string());
        self.write_all(&items)?;
        tracing::debug!(key, "Local storage item written");
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> StorageResult<()> {
        let mut items = self.read_all();
        if items.remove(key).is_some() {
            self.write_all(&items)?;
        }
        Ok(())
    }
}

/// In-memory storage; nothing survives the process
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: BTreeMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a key, for seeding state in tests
    pub fn with_item(mut self, key: &str, value: &str) -> Self {
        self.items.insert(key.to_string(), value.to_string());
        self
    }
}

impl LocalStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> StorageResult<()> {
        self.items.remove(key);
        Ok(())
    }
}
