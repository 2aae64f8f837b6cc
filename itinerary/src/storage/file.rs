//! Directory-backed key-value store.

use std::io::Write as _;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use super::error::StorageError;
use super::kv::{KeyValueStore, Write};

/// A store keeping one file per key in a directory.
///
/// Values are written to a temporary file in the same directory and then
/// renamed over the destination, so a reader never sees a partial value.
/// In a batch every new value is fully written before any of them is
/// renamed into place.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// A store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory holding the store's files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'.' | b'-' | b'_'));
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(key))
    }

    fn ensure_dir(&self) -> Result<(), StorageError> {
        if !self.dir.exists() {
            std::fs::create_dir_all(&self.dir).map_err(|e| StorageError::io(&self.dir, e))?;
        }
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::io(path, e)),
        }
    }

    fn commit(&self, batch: &[Write<'_>]) -> Result<(), StorageError> {
        // Validate every key before touching the disk.
        let paths = batch
            .iter()
            .map(|write| self.path_for(write.key()))
            .collect::<Result<Vec<_>, _>>()?;

        self.ensure_dir()?;

        let mut staged = Vec::new();
        for (write, path) in batch.iter().zip(&paths) {
            if let Write::Put { value, .. } = write {
                let mut file =
                    NamedTempFile::new_in(&self.dir).map_err(|e| StorageError::io(&self.dir, e))?;
                file.write_all(value.as_bytes())
                    .and_then(|()| file.as_file().sync_all())
                    .map_err(|e| StorageError::io(file.path(), e))?;
                staged.push((file, path));
            }
        }

        // Everything is on disk; publish.
        let mut staged = staged.into_iter();
        for (write, path) in batch.iter().zip(&paths) {
            match write {
                Write::Put { .. } => {
                    if let Some((file, target)) = staged.next() {
                        file.persist(target)
                            .map_err(|e| StorageError::io(target, e.error))?;
                    }
                }
                Write::Delete { .. } => match std::fs::remove_file(path) {
                    Ok(()) => {}
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                    Err(e) => return Err(StorageError::io(path, e)),
                },
            }
        }

        debug!(dir = %self.dir.display(), writes = batch.len(), "committed batch");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn set_and_get() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store.set("itinerary.trips", "[]".to_string()).unwrap();
        assert_eq!(
            store.get("itinerary.trips").unwrap().as_deref(),
            Some("[]")
        );
        assert!(dir.path().join("itinerary.trips").exists());
    }

    #[test]
    fn missing_key_is_none() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("never-created"));
        assert_eq!(store.get("anything").unwrap(), None);
    }

    #[test]
    fn creates_directory_on_write() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("nested").join("dir");
        let store = FileStore::new(&nested);

        store.set("k", "v".to_string()).unwrap();
        assert!(nested.join("k").exists());
    }

    #[test]
    fn overwrite_leaves_no_temp_files() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store.set("k", "first".to_string()).unwrap();
        store.set("k", "second".to_string()).unwrap();

        assert_eq!(store.get("k").unwrap().as_deref(), Some("second"));
        let files: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn delete_removes_file() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store.set("k", "v".to_string()).unwrap();
        store.remove("k").unwrap();
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn rejects_path_like_keys() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());

        for key in ["", "../escape", "a/b", ".hidden", "sp ace"] {
            assert!(
                matches!(
                    store.set(key, "v".to_string()),
                    Err(StorageError::InvalidKey(_))
                ),
                "{key:?} should be rejected"
            );
        }
    }

    #[test]
    fn bad_key_in_batch_writes_nothing() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());

        let result = store.commit(&[
            Write::Put {
                key: "good",
                value: "v".to_string(),
            },
            Write::Put {
                key: "../bad",
                value: "v".to_string(),
            },
        ]);

        assert!(result.is_err());
        assert_eq!(store.get("good").unwrap(), None);
    }
}
