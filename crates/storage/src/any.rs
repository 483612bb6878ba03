use crate::backend::{Exportable, Importable, StorageBackend};
use crate::errors::{Error, Result};
use crate::merge::UpdateStrategy;
use prefkit_core::{RawDict, RawValue, ValueKind};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// Type-erased, cheaply cloned handle to any backend
///
/// Exporting and importing always compile; they fail with
/// [`Error::ExportUnsupported`] or [`Error::ImportUnsupported`] when the
/// wrapped backend lacks the capability, without touching its contents.
#[derive(Clone)]
pub struct AnyStorage {
    inner: Arc<dyn StorageBackend>,
}

impl AnyStorage {
    pub fn new<B: StorageBackend + 'static>(backend: B) -> Self {
        Self {
            inner: Arc::new(backend),
        }
    }

    pub fn from_arc(inner: Arc<dyn StorageBackend>) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &Arc<dyn StorageBackend> {
        &self.inner
    }
}

impl fmt::Debug for AnyStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyStorage")
            .field("backend", &self.inner.name())
            .finish()
    }
}

impl StorageBackend for AnyStorage {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn raw(&self, key: &str) -> Option<RawValue> {
        self.inner.raw(key)
    }

    fn set_raw(&self, key: &str, value: Option<RawValue>) {
        self.inner.set_raw(key, value);
    }

    fn typed(&self, key: &str, kind: ValueKind) -> Option<RawValue> {
        self.inner.typed(key, kind)
    }

    fn contains(&self, key: &str) -> bool {
        self.inner.contains(key)
    }

    fn keys(&self) -> Vec<String> {
        self.inner.keys()
    }

    fn remove_all(&self) {
        self.inner.remove_all();
    }

    fn snapshot(&self) -> RawDict {
        self.inner.snapshot()
    }

    fn as_importable(&self) -> Option<&dyn Importable> {
        Some(self)
    }

    fn as_exportable(&self) -> Option<&dyn Exportable> {
        Some(self)
    }
}

impl Exportable for AnyStorage {
    fn export_dictionary(&self) -> Result<RawDict> {
        match self.inner.as_exportable() {
            Some(exportable) => exportable.export_dictionary(),
            None => Err(Error::export_unsupported(self.inner.name())),
        }
    }
}

impl Importable for AnyStorage {
    fn load(&self, contents: RawDict, strategy: &UpdateStrategy) -> Result<BTreeSet<String>> {
        match self.inner.as_importable() {
            Some(importable) => importable.load(contents, strategy),
            None => Err(Error::import_unsupported(self.inner.name())),
        }
    }
}
