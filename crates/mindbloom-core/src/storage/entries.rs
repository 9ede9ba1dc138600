//! Check-in entry persistence.
//!
//! The whole entry list is stored as one JSON array. Callers treat failures
//! as non-fatal; see [`crate::MoodGarden`].

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::StorageError;
use crate::mood::MoodEntry;

pub const DEFAULT_ENTRIES_FILE: &str = "mindbloom_entries.json";

/// Load/save collaborator for the entry list.
pub trait EntryStore: Send {
    /// Load all entries. `Ok(None)` means nothing has been stored yet.
    fn load(&self) -> Result<Option<Vec<MoodEntry>>, StorageError>;

    /// Replace the stored entries with `entries`.
    fn save(&mut self, entries: &[MoodEntry]) -> Result<(), StorageError>;
}

/// Entries as a JSON file in the data directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<data_dir>/<file_name>`.
    pub fn in_data_dir(file_name: &str) -> Result<Self, StorageError> {
        Ok(Self::new(super::data_dir()?.join(file_name)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EntryStore for JsonFileStore {
    fn load(&self) -> Result<Option<Vec<MoodEntry>>, StorageError> {
        let data = match std::fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StorageError::ReadFailed {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        let entries = serde_json::from_slice(&data).map_err(|source| StorageError::Corrupt {
            path: self.path.clone(),
            source,
        })?;
        Ok(Some(entries))
    }

    fn save(&mut self, entries: &[MoodEntry]) -> Result<(), StorageError> {
        let data = serde_json::to_vec_pretty(entries).map_err(|source| StorageError::Corrupt {
            path: self.path.clone(),
            source,
        })?;
        // Write-then-rename: readers never see a partial file.
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, data)
            .and_then(|_| std::fs::rename(&tmp, &self.path))
            .map_err(|source| StorageError::WriteFailed {
                path: self.path.clone(),
                source,
            })
    }
}

/// In-memory store. Clones share the same backing list, so a test can keep a
/// handle and inspect what was saved.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryInner>>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    entries: Option<Vec<MoodEntry>>,
    fail_saves: bool,
    save_count: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<MoodEntry>) -> Self {
        let store = Self::default();
        store.lock().entries = Some(entries);
        store
    }

    /// Make every subsequent save fail.
    pub fn set_fail_saves(&self, fail: bool) {
        self.lock().fail_saves = fail;
    }

    pub fn saved(&self) -> Option<Vec<MoodEntry>> {
        self.lock().entries.clone()
    }

    pub fn save_count(&self) -> usize {
        self.lock().save_count
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl EntryStore for MemoryStore {
    fn load(&self) -> Result<Option<Vec<MoodEntry>>, StorageError> {
        Ok(self.lock().entries.clone())
    }

    fn save(&mut self, entries: &[MoodEntry]) -> Result<(), StorageError> {
        let mut inner = self.lock();
        if inner.fail_saves {
            return Err(StorageError::Unavailable("memory store set to fail".into()));
        }
        inner.entries = Some(entries.to_vec());
        inner.save_count += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mood::{MoodLevel, WellnessFactor};
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn sample() -> Vec<MoodEntry> {
        let ts = Utc.with_ymd_and_hms(2024, 2, 29, 7, 45, 0).unwrap();
        vec![
            MoodEntry::new(ts, MoodLevel::High, [WellnessFactor::Sleep].into(), "rested"),
            MoodEntry::new(ts, MoodLevel::Low, Default::default(), ""),
        ]
    }

    #[test]
    fn missing_file_loads_as_none() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp_dir.path().join("entries.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn json_file_persists_entries() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("entries.json");
        let mut store = JsonFileStore::new(&path);
        let entries = sample();
        store.save(&entries).unwrap();

        let reopened = JsonFileStore::new(&path);
        assert_eq!(reopened.load().unwrap(), Some(entries));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn stored_record_shape() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("entries.json");
        let mut store = JsonFileStore::new(&path);
        store.save(&sample()).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let first = &raw[0];
        assert_eq!(first["mood"], 4);
        assert_eq!(first["factors"], serde_json::json!(["sleep"]));
        assert_eq!(first["note"], "rested");
        assert_eq!(first["timestamp"], "2024-02-29T07:45:00Z");
        assert!(first["id"].as_str().is_some());
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("entries.json");
        std::fs::write(&path, "{ not json").unwrap();
        let store = JsonFileStore::new(&path);
        assert!(matches!(store.load(), Err(StorageError::Corrupt { .. })));
    }

    #[test]
    fn save_into_missing_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = JsonFileStore::new(temp_dir.path().join("nope/entries.json"));
        assert!(matches!(
            store.save(&sample()),
            Err(StorageError::WriteFailed { .. })
        ));
    }

    #[test]
    fn memory_store_clones_share_state() {
        let store = MemoryStore::new();
        let mut writer = store.clone();
        writer.save(&sample()).unwrap();
        assert_eq!(store.saved().map(|e| e.len()), Some(2));
        assert_eq!(store.save_count(), 1);

        store.set_fail_saves(true);
        assert!(writer.save(&[]).is_err());
        assert_eq!(store.saved().map(|e| e.len()), Some(2));
    }
}
