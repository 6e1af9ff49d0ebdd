//! Key-value storage for opaque store snapshots.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::utils::paths::get_snapshot_dir;

/// Durable home for a serialized snapshot, addressed by key.
pub trait SnapshotStore: Send {
    /// Returns `None` when nothing has been saved under `key`.
    fn load(&self, key: &str) -> Result<Option<String>>;

    fn save(&self, key: &str, blob: &str) -> Result<()>;
}

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    dir: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store rooted at `~/.daily-companion/state`.
    pub fn default_location() -> Result<Self> {
        Ok(Self::new(get_snapshot_dir()?))
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
        Ok(Some(content))
    }

    fn save(&self, key: &str, blob: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create {}", self.dir.display()))?;

        // Write to a sibling temp file and rename so a crash never leaves a torn snapshot
        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(blob.as_bytes())?;
        tmp.persist(self.path_for(key))
            .with_context(|| format!("Failed to persist snapshot {}", key))?;
        Ok(())
    }
}

/// In-process store for tests.
#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, blob: &str) -> Self {
        let store = Self::default();
        if let Ok(mut entries) = store.entries.lock() {
            entries.insert(key.to_string(), blob.to_string());
        }
        store
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.get(key))
    }

    fn save(&self, key: &str, blob: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| anyhow::anyhow!("snapshot store lock poisoned"))?;
        entries.insert(key.to_string(), blob.to_string());
        Ok(())
    }
}

impl<T: SnapshotStore + Sync> SnapshotStore for std::sync::Arc<T> {
    fn load(&self, key: &str) -> Result<Option<String>> {
        (**self).load(key)
    }

    fn save(&self, key: &str, blob: &str) -> Result<()> {
        (**self).save(key, blob)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_missing_key_is_none() {
        let temp = TempDir::new().unwrap();
        let store = FileSnapshotStore::new(temp.path());
        assert!(store.load("dashboard-storage").unwrap().is_none());
    }

    #[test]
    fn test_file_store_save_then_load() {
        let temp = TempDir::new().unwrap();
        let store = FileSnapshotStore::new(temp.path().join("state"));

        store.save("dashboard-storage", r#"{"a":1}"#).unwrap();
        assert_eq!(
            store.load("dashboard-storage").unwrap().as_deref(),
            Some(r#"{"a":1}"#)
        );
        assert!(temp.path().join("state").join("dashboard-storage.json").exists());

        store.save("dashboard-storage", r#"{"a":2}"#).unwrap();
        assert_eq!(
            store.load("dashboard-storage").unwrap().as_deref(),
            Some(r#"{"a":2}"#)
        );
    }

    #[test]
    fn test_memory_store() {
        let store = MemorySnapshotStore::new();
        assert!(store.load("k").unwrap().is_none());
        store.save("k", "v").unwrap();
        assert_eq!(store.load("k").unwrap().as_deref(), Some("v"));

        let seeded = MemorySnapshotStore::with_entry("k", "seed");
        assert_eq!(seeded.get("k").as_deref(), Some("seed"));
    }
}
