//! Flat key-value text stores.

use std::collections::HashMap;
use std::sync::Mutex;

use super::error::StorageError;

/// One write in a [`KeyValueStore::commit`] batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Write<'a> {
    /// Store `value` under `key`, replacing any previous value.
    Put { key: &'a str, value: String },
    /// Remove `key` if present.
    Delete { key: &'a str },
}

impl Write<'_> {
    pub fn key(&self) -> &str {
        match self {
            Write::Put { key, .. } | Write::Delete { key } => *key,
        }
    }
}

/// A store of text values addressed by string keys.
///
/// `commit` applies a batch all-or-nothing: when it returns an error the
/// store still holds exactly what it held before.
pub trait KeyValueStore: Send + Sync {
    /// Read the value under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Apply a batch of writes.
    fn commit(&self, batch: &[Write<'_>]) -> Result<(), StorageError>;

    /// Store a single value.
    fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        self.commit(&[Write::Put { key, value }])
    }

    /// Remove a single value.
    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.commit(&[Write::Delete { key }])
    }
}

/// An in-memory store with an optional size limit.
///
/// The size of the store is the total byte length of its keys and values.
/// A commit that would take it over the limit fails with
/// [`StorageError::QuotaExceeded`] and changes nothing.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    limit: Option<usize>,
}

impl MemoryStore {
    /// An unbounded store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding at most `bytes` of keys and values.
    pub fn with_limit(bytes: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            limit: Some(bytes),
        }
    }

    /// Current size in bytes.
    pub fn size(&self) -> usize {
        size_of_entries(&self.lock())
    }

    /// Number of keys stored.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // A panic while holding the lock cannot leave the map half-written:
        // commits swap in a fully built map.
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.lock().get(key).cloned())
    }

    fn commit(&self, batch: &[Write<'_>]) -> Result<(), StorageError> {
        let mut entries = self.lock();
        let mut next = entries.clone();
        for write in batch {
            match write {
                Write::Put { key, value } => {
                    next.insert((*key).to_string(), value.clone());
                }
                Write::Delete { key } => {
                    next.remove(*key);
                }
            }
        }

        if let Some(limit) = self.limit {
            let needed = size_of_entries(&next);
            if needed > limit {
                return Err(StorageError::QuotaExceeded { needed, limit });
            }
        }

        *entries = next;
        Ok(())
    }
}

fn size_of_entries(entries: &HashMap<String, String>) -> usize {
    entries.iter().map(|(k, v)| k.len() + v.len()).sum()
}
