use crate::backend::{Exportable, Importable, StorageBackend};
use crate::errors::Result;
use crate::merge::{apply_update, UpdateStrategy};
use parking_lot::Mutex;
use prefkit_core::{RawDict, RawValue, StorageValue};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// In-process backend holding values exactly as they were written
///
/// Every access takes the same exclusive lock. Reads never coerce between
/// kinds.
pub struct MemoryStorage {
    storage: Mutex<RawDict>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::with_contents(RawDict::new())
    }

    #[must_use]
    pub fn with_contents(contents: RawDict) -> Self {
        Self {
            storage: Mutex::new(contents),
        }
    }

    /// Start from typed values
    #[must_use]
    pub fn from_values(values: BTreeMap<String, StorageValue>) -> Self {
        Self::with_contents(
            values
                .into_iter()
                .map(|(key, value)| (key, RawValue::from(value)))
                .collect(),
        )
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.storage.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.storage.lock().is_empty()
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MemoryStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryStorage")
            .field("keys", &self.storage.lock().len())
            .finish()
    }
}

impl StorageBackend for MemoryStorage {
    fn name(&self) -> &str {
        "memory"
    }

    fn raw(&self, key: &str) -> Option<RawValue> {
        self.storage.lock().get(key).cloned()
    }

    fn set_raw(&self, key: &str, value: Option<RawValue>) {
        let mut storage = self.storage.lock();
        match value {
            Some(value) => {
                storage.insert(key.to_owned(), value);
            }
            None => {
                storage.remove(key);
            }
        }
    }

    fn contains(&self, key: &str) -> bool {
        self.storage.lock().contains_key(key)
    }

    fn keys(&self) -> Vec<String> {
        self.storage.lock().keys().cloned().collect()
    }

    fn remove_all(&self) {
        let mut storage = self.storage.lock();
        tracing::debug!("Clearing {} key(s) from memory storage", storage.len());
        storage.clear();
    }

    fn snapshot(&self) -> RawDict {
        self.storage.lock().clone()
    }

    fn as_importable(&self) -> Option<&dyn Importable> {
        Some(self)
    }

    fn as_exportable(&self) -> Option<&dyn Exportable> {
        Some(self)
    }
}

impl Exportable for MemoryStorage {
    fn export_dictionary(&self) -> Result<RawDict> {
        Ok(self.snapshot())
    }
}

impl Importable for MemoryStorage {
    fn load(&self, contents: RawDict, strategy: &UpdateStrategy) -> Result<BTreeSet<String>> {
        let mut storage = self.storage.lock();
        apply_update(&mut storage, contents, strategy)
    }
}
