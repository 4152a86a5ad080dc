use std::collections::BTreeMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::StoreError;

use super::Storage;

/// Store backed by one JSON object file (`{"key": "value", ...}`).
///
/// Every call goes to disk: reads parse the whole file, writes replace it
/// by renaming a fully written temp file into place. Two processes sharing
/// a file get last-write-wins. A file that does not parse reads as empty
/// but is never written over.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }

    /// Parse the whole file. A corrupt file is an error here so that no
    /// write can replace it with a near-empty map.
    fn load(&self) -> Result<BTreeMap<String, String>, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(err) => return Err(self.io_error(err)),
        };

        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&contents).map_err(|source| StoreError::Corrupt {
            path: self.path.display().to_string(),
            source,
        })
    }

    fn save(&self, items: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(|e| self.io_error(e))?;

        let contents = serde_json::to_string_pretty(items).map_err(|source| {
            StoreError::Serialize {
                key: self.path.display().to_string(),
                source,
            }
        })?;

        // The data file is only ever replaced by a rename; a crash mid-write
        // leaves the previous contents in place.
        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| self.io_error(e))?;
        tmp.write_all(contents.as_bytes())
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|e| self.io_error(e))?;
        tmp.persist(&self.path).map_err(|e| self.io_error(e.error))?;
        Ok(())
    }
}

impl Storage for JsonFileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        match self.load() {
            Ok(mut items) => Ok(items.remove(key)),
            Err(StoreError::Corrupt { path, source }) => {
                tracing::warn!(%path, error = %source, "data file is corrupt, reading it as empty");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut items = self.load()?;
        items.insert(key.to_string(), value.to_string());
        self.save(&items)
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        let mut items = self.load()?;
        if items.remove(key).is_some() {
            self.save(&items)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("data.json"));

        assert_eq!(store.get_item("admin-password").unwrap(), None);
    }

    #[test]
    fn values_survive_a_new_handle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("data.json");

        JsonFileStore::new(&path).set_item("admin-password", "hunter22").unwrap();
        let reopened = JsonFileStore::new(&path);

        assert_eq!(
            reopened.get_item("admin-password").unwrap().as_deref(),
            Some("hunter22")
        );
    }

    #[test]
    fn corrupt_file_reads_as_empty_but_is_not_clobbered() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        let torn = r#"{"admin-password":"hunter22","project-inquiries":"[{\"id"#;
        fs::write(&path, torn).unwrap();
        let store = JsonFileStore::new(&path);

        assert_eq!(store.get_item("admin-password").unwrap(), None);
        assert_matches!(
            store.set_item("admin-authenticated", "true"),
            Err(StoreError::Corrupt { .. })
        );
        assert_matches!(
            store.remove_item("admin-password"),
            Err(StoreError::Corrupt { .. })
        );
        assert_eq!(fs::read_to_string(&path).unwrap(), torn);
    }

    #[test]
    fn save_leaves_no_temp_files_behind() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("data.json"));
        store.set_item("a", "1").unwrap();
        store.set_item("a", "2").unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("data.json")]);
        assert_eq!(store.get_item("a").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn remove_deletes_only_that_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("data.json"));
        store.set_item("a", "1").unwrap();
        store.set_item("b", "2").unwrap();

        store.remove_item("a").unwrap();

        assert_eq!(store.get_item("a").unwrap(), None);
        assert_eq!(store.get_item("b").unwrap().as_deref(), Some("2"));
    }
}
