use crate::backend::{Exportable, Importable, StorageBackend};
use crate::config::SuiteConfig;
use crate::errors::Result;
use crate::merge::{apply_update, UpdateStrategy};
use crate::suite::{box_value, Suite};
use prefkit_core::{RawDict, RawValue, ValueKind};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Backend delegating to a shared [`Suite`]
///
/// Adds no locking of its own; the suite serializes access internally.
/// Reads go through the suite's coercing getters, so typed reads of a stored
/// number succeed even when the stored width differs.
#[derive(Debug, Clone)]
pub struct SuiteStorage {
    suite: Arc<Suite>,
}

impl SuiteStorage {
    pub fn new(suite: Arc<Suite>) -> Self {
        Self { suite }
    }

    pub fn volatile(domain: impl Into<String>) -> Self {
        Self::new(Arc::new(Suite::volatile(domain)))
    }

    pub fn open(config: &SuiteConfig) -> Result<Self> {
        Ok(Self::new(Arc::new(Suite::open(config)?)))
    }

    pub fn suite(&self) -> &Arc<Suite> {
        &self.suite
    }
}

impl StorageBackend for SuiteStorage {
    fn name(&self) -> &str {
        self.suite.domain()
    }

    fn raw(&self, key: &str) -> Option<RawValue> {
        self.suite.object(key)
    }

    fn set_raw(&self, key: &str, value: Option<RawValue>) {
        self.suite.set_object(key, value);
    }

    fn typed(&self, key: &str, kind: ValueKind) -> Option<RawValue> {
        self.suite.coerced(key, kind)
    }

    /// Stored values only, like [`StorageBackend::keys`]
    fn contains(&self, key: &str) -> bool {
        self.suite.has_stored(key)
    }

    fn keys(&self) -> Vec<String> {
        self.suite.keys()
    }

    fn remove_all(&self) {
        self.suite.remove_all();
    }

    fn snapshot(&self) -> RawDict {
        self.suite.dictionary_representation()
    }

    fn as_importable(&self) -> Option<&dyn Importable> {
        Some(self)
    }

    fn as_exportable(&self) -> Option<&dyn Exportable> {
        Some(self)
    }
}

impl Exportable for SuiteStorage {
    /// Includes registered defaults
    fn export_dictionary(&self) -> Result<RawDict> {
        Ok(self.suite.dictionary_representation())
    }
}

impl Importable for SuiteStorage {
    fn load(&self, contents: RawDict, strategy: &UpdateStrategy) -> Result<BTreeSet<String>> {
        let boxed = contents
            .into_iter()
            .map(|(key, value)| (key, box_value(value)))
            .collect();
        self.suite.edit(|values| apply_update(values, boxed, strategy))?
    }
}
