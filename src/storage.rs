//! Key-value persistence used by the workout store.

use crate::dlog;
use crate::error::{MaptyError, Result};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// String values under string keys, mirroring browser local storage.
pub trait KeyValueStorage {
    /// `Ok(None)` when nothing is stored under `key`.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Replace whatever is stored under `key`.
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;

    /// Removing a missing key is not an error.
    fn remove_item(&mut self, key: &str) -> Result<()>;
}

/// One `<key>.json` file per key inside a data directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

fn unavailable(path: &Path, source: io::Error) -> MaptyError {
    MaptyError::StorageUnavailable {
        location: path.display().to_string(),
        source,
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(unavailable(&path, e)),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|e| unavailable(&self.dir, e))?;

        // Write beside the target and rename so readers never see a partial value.
        let path = self.path_for(key);
        let tmp = self.dir.join(format!(".{key}.json.tmp"));
        fs::write(&tmp, value).map_err(|e| unavailable(&tmp, e))?;
        fs::rename(&tmp, &path).map_err(|e| unavailable(&path, e))?;

        dlog!("storage_set key={key} bytes={} path={}", value.len(), path.display());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => {
                dlog!("storage_remove key={key} path={}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(unavailable(&path, e)),
        }
    }
}

/// In-process storage with an optional byte quota.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
    quota_bytes: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes that would push the total stored size past `quota_bytes` fail.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            items: HashMap::new(),
            quota_bytes: Some(quota_bytes),
        }
    }

    fn used_bytes_without(&self, key: &str) -> usize {
        self.items
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        if let Some(quota) = self.quota_bytes {
            let needed = self.used_bytes_without(key) + key.len() + value.len();
            if needed > quota {
                return Err(MaptyError::StorageUnavailable {
                    location: format!("memory:{key}"),
                    source: io::Error::other(format!(
                        "quota exceeded: {needed} bytes needed, {quota} allowed"
                    )),
                });
            }
        }
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.items.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_storage_round_trips_and_survives_reopen() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nested").join("data");

        let mut s = FileStorage::new(&dir);
        assert_eq!(s.get_item("workouts").unwrap(), None);

        s.set_item("workouts", "[1,2]").unwrap();
        s.set_item("workouts", "[3]").unwrap();

        let reopened = FileStorage::new(&dir);
        assert_eq!(reopened.get_item("workouts").unwrap().as_deref(), Some("[3]"));
        assert!(!dir.join(".workouts.json.tmp").exists());
    }

    #[test]
    fn file_storage_remove_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let mut s = FileStorage::new(tmp.path());

        s.remove_item("workouts").unwrap();
        s.set_item("workouts", "[]").unwrap();
        s.remove_item("workouts").unwrap();
        s.remove_item("workouts").unwrap();
        assert_eq!(s.get_item("workouts").unwrap(), None);
    }

    #[test]
    fn file_storage_reports_unwritable_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("not-a-dir");
        fs::write(&blocker, "x").unwrap();

        let mut s = FileStorage::new(&blocker);
        let err = s.set_item("workouts", "[]").unwrap_err();
        assert!(matches!(err, MaptyError::StorageUnavailable { .. }));
    }

    #[test]
    fn memory_quota_rejects_oversized_writes_and_keeps_old_value() {
        let mut s = MemoryStorage::with_quota(16);
        s.set_item("k", "small").unwrap();

        let err = s.set_item("k", "this value is far too large").unwrap_err();
        assert!(matches!(err, MaptyError::StorageUnavailable { .. }));
        assert_eq!(s.get_item("k").unwrap().as_deref(), Some("small"));
    }
}
