// Local key-value storage
// Stored at ~/.local/share/portfolio-theme/local_storage.json

use std::cell::Cell;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use xdg::BaseDirectories;

/// File name of the storage area inside the data directory
pub const STORAGE_FILE_NAME: &str = "local_storage.json";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("storage area {} is corrupt: {1}", .0.display())]
    Corrupt(PathBuf, #[source] serde_json::Error),

    #[error("failed to serialize storage area: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("storage is unavailable")]
    Unavailable,
}

/// A string-keyed store of string values, shaped like a browser storage area
pub trait PreferenceStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Storage area kept as one JSON object in a file
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default storage area under the XDG data directory
    pub fn default_path() -> Option<PathBuf> {
        let pgm = env!("CARGO_PKG_NAME");
        let xdg_dirs = BaseDirectories::with_prefix(pgm);
        let data_home = xdg_dirs.get_data_home()?;
        Some(data_home.join(STORAGE_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_area(&self) -> Result<BTreeMap<String, String>, StorageError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let contents = fs::read_to_string(&self.path).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })?;

        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&contents).map_err(|e| StorageError::Corrupt(self.path.clone(), e))
    }

    /// Read the area for modification. A corrupt area is replaced.
    fn read_area_for_write(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match self.read_area() {
            Err(StorageError::Corrupt(path, e)) => {
                tracing::warn!("Discarding corrupt storage area {}: {}", path.display(), e);
                Ok(BTreeMap::new())
            }
            other => other,
        }
    }

    fn write_area(&self, area: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| StorageError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        // Write to a sibling temp file, then rename over the area
        let temp = self.temp_path();
        let json = serde_json::to_string_pretty(area)?;
        fs::write(&temp, json).map_err(|source| StorageError::Io {
            path: temp.clone(),
            source,
        })?;
        fs::rename(&temp, &self.path).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })
    }

    fn temp_path(&self) -> PathBuf {
        let mut temp = self.path.clone().into_os_string();
        temp.push(".tmp");
        PathBuf::from(temp)
    }
}

impl PreferenceStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut area = self.read_area()?;
        Ok(area.remove(key))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut area = self.read_area_for_write()?;
        area.insert(key.to_string(), value.to_string());
        self.write_area(&area)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        let mut area = self.read_area_for_write()?;
        if area.remove(key).is_some() {
            self.write_area(&area)?;
        }
        Ok(())
    }
}

/// In-memory storage that counts every access.
///
/// Marking it unavailable makes every call fail, like a browser with storage
/// disabled or over quota.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
    reads: Cell<usize>,
    writes: usize,
    unavailable: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-seeded with one item. Seeding is not counted as a write.
    pub fn with_item(key: &str, value: &str) -> Self {
        let mut storage = Self::default();
        storage.items.insert(key.to_string(), value.to_string());
        storage
    }

    pub fn set_unavailable(&mut self, unavailable: bool) {
        self.unavailable = unavailable;
    }

    /// Raw stored value, bypassing the access counters
    pub fn item(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(String::as_str)
    }

    pub fn reads(&self) -> usize {
        self.reads.get()
    }

    pub fn writes(&self) -> usize {
        self.writes
    }

    /// Total number of calls made through `PreferenceStorage`
    pub fn interactions(&self) -> usize {
        self.reads() + self.writes
    }
}

impl PreferenceStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.reads.set(self.reads.get() + 1);
        if self.unavailable {
            return Err(StorageError::Unavailable);
        }
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.writes += 1;
        if self.unavailable {
            return Err(StorageError::Unavailable);
        }
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.writes += 1;
        if self.unavailable {
            return Err(StorageError::Unavailable);
        }
        self.items.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_storage_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("area.json"));
        assert_eq!(storage.get_item("k").unwrap(), None);
    }

    #[test]
    fn test_file_storage_set_get_remove() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("area.json");
        let mut storage = FileStorage::new(&path);

        storage.set_item("a", "1").unwrap();
        storage.set_item("b", r#"{"theme":"neon"}"#).unwrap();
        assert!(path.exists());

        let reopened = FileStorage::new(&path);
        assert_eq!(reopened.get_item("a").unwrap().as_deref(), Some("1"));
        assert_eq!(reopened.get_item("b").unwrap().as_deref(), Some(r#"{"theme":"neon"}"#));

        storage.remove_item("a").unwrap();
        assert_eq!(storage.get_item("a").unwrap(), None);
        assert!(storage.get_item("b").unwrap().is_some());
    }

    #[test]
    fn test_file_storage_corrupt_area() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("area.json");
        fs::write(&path, "{{{ garbage").unwrap();

        let mut storage = FileStorage::new(&path);
        assert!(matches!(storage.get_item("k"), Err(StorageError::Corrupt(_, _))));

        // Writing replaces the corrupt area
        storage.set_item("k", "v").unwrap();
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_file_storage_empty_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("area.json");
        fs::write(&path, "").unwrap();
        assert_eq!(FileStorage::new(&path).get_item("k").unwrap(), None);
    }

    #[test]
    fn test_file_storage_write_replaces_area_atomically() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("area.json");
        let mut storage = FileStorage::new(&path);
        storage.set_item("other", "kept").unwrap();
        storage.set_item("k", "v1").unwrap();
        assert!(!dir.path().join("area.json.tmp").exists());

        // A failed write leaves the existing area intact
        fs::create_dir(dir.path().join("area.json.tmp")).unwrap();
        assert!(matches!(storage.set_item("k", "v2"), Err(StorageError::Io { .. })));
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("v1"));
        assert_eq!(storage.get_item("other").unwrap().as_deref(), Some("kept"));
    }

    #[test]
    fn test_file_storage_unwritable_location() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "file, not a directory").unwrap();

        let mut storage = FileStorage::new(blocker.join("area.json"));
        assert!(matches!(storage.set_item("k", "v"), Err(StorageError::Io { .. })));
    }

    #[test]
    fn test_memory_storage_counts_access() {
        let mut storage = MemoryStorage::with_item("k", "v");
        assert_eq!(storage.interactions(), 0);
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("v"));
        storage.set_item("k", "w").unwrap();
        assert_eq!(storage.reads(), 1);
        assert_eq!(storage.writes(), 1);
        assert_eq!(storage.item("k"), Some("w"));
    }

    #[test]
    fn test_memory_storage_unavailable() {
        let mut storage = MemoryStorage::with_item("k", "v");
        storage.set_unavailable(true);
        assert!(matches!(storage.get_item("k"), Err(StorageError::Unavailable)));
        assert!(matches!(storage.set_item("k", "w"), Err(StorageError::Unavailable)));
        assert_eq!(storage.item("k"), Some("v"));
    }
}
