//! Named collections of settings over one backend
//!
//! A [`Schema`] records which field uses which storage key and routes reads
//! and writes through one of two access modes.
//!
//! In [`AccessMode::CachedReadWriteThrough`] the first read of a key fills a
//! private cache and every later read is served from it. A write stores the
//! encoded value and caches what the backend decodes afterwards, so a lossy
//! codec never leaves the cache ahead of the backend. Changes made to the
//! backend behind the schema's back are not observed until
//! [`Schema::invalidate_cache`] is called.
//!
//! Only descriptors registered on the builder belong to a schema. Reading or
//! writing any other key panics in debug builds.

use crate::backend::{StorageBackend, StorageExt};
use crate::errors::{Error, Result};
use parking_lot::Mutex;
use prefkit_core::{KeyDescriptor, StorageKind, StoredOf, ValueOf};
use std::any::Any;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

/// How a schema reaches its backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccessMode {
    /// Every read and write goes to the backend
    #[default]
    Direct,
    /// Reads are cached after the first one, writes go to both
    CachedReadWriteThrough,
}

type CachedValue = Box<dyn Any + Send + Sync>;

/// Builder registering fields before a [`Schema`] is created
pub struct SchemaBuilder {
    storage: Arc<dyn StorageBackend>,
    mode: AccessMode,
    fields: Vec<(String, String)>,
}

impl SchemaBuilder {
    pub fn mode(mut self, mode: AccessMode) -> Self {
        self.mode = mode;
        self
    }

    /// Register `descriptor` under a field name
    pub fn field<K: KeyDescriptor>(mut self, name: impl Into<String>, descriptor: &K) -> Self {
        self.fields.push((name.into(), descriptor.key().to_owned()));
        self
    }

    /// Fail on a repeated field name or a storage key shared by two fields
    pub fn build(self) -> Result<Schema> {
        let mut fields = BTreeMap::new();
        let mut owners: HashMap<String, String> = HashMap::new();
        for (field, key) in self.fields {
            if fields.contains_key(&field) {
                return Err(Error::DuplicateField { field });
            }
            if let Some(existing) = owners.get(&key) {
                return Err(Error::DuplicateKey {
                    key,
                    field,
                    existing: existing.clone(),
                });
            }
            owners.insert(key.clone(), field.clone());
            fields.insert(field, key);
        }

        Ok(Schema {
            storage: self.storage,
            mode: self.mode,
            fields,
            cache: Mutex::new(HashMap::new()),
        })
    }
}

/// Registered settings bound to a backend
pub struct Schema {
    storage: Arc<dyn StorageBackend>,
    mode: AccessMode,
    fields: BTreeMap<String, String>,
    cache: Mutex<HashMap<String, CachedValue>>,
}

impl Schema {
    pub fn builder(storage: Arc<dyn StorageBackend>) -> SchemaBuilder {
        SchemaBuilder {
            storage,
            mode: AccessMode::default(),
            fields: Vec::new(),
        }
    }

    pub fn storage(&self) -> &Arc<dyn StorageBackend> {
        &self.storage
    }

    pub fn mode(&self) -> AccessMode {
        self.mode
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn key_for(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Whether some registered field stores under `key`
    pub fn is_registered(&self, key: &str) -> bool {
        self.fields.values().any(|registered| registered == key)
    }

    pub fn get<K>(&self, descriptor: &K) -> K::Output
    where
        K: KeyDescriptor,
        StoredOf<K>: StorageKind,
        ValueOf<K>: Clone + Send + Sync + 'static,
    {
        debug_assert!(
            self.is_registered(descriptor.key()),
            "'{}' is not a field of this schema",
            descriptor.key()
        );
        if self.mode == AccessMode::Direct {
            return self.storage.read(descriptor);
        }

        let mut cache = self.cache.lock();
        let cached = cache
            .get(descriptor.key())
            .and_then(|entry| entry.downcast_ref::<Option<ValueOf<K>>>())
            .cloned();
        let value = match cached {
            Some(value) => value,
            None => {
                let value = self.storage.decoded(descriptor);
                tracing::trace!("Caching '{}' from {}", descriptor.key(), self.storage.name());
                cache.insert(descriptor.key().to_owned(), Box::new(value.clone()));
                value
            }
        };
        descriptor.resolve(value)
    }

    /// Write through the descriptor; `false` when the value failed to encode
    pub fn set<K>(&self, descriptor: &K, input: K::Input) -> bool
    where
        K: KeyDescriptor,
        StoredOf<K>: StorageKind,
        ValueOf<K>: Clone + Send + Sync + 'static,
    {
        debug_assert!(
            self.is_registered(descriptor.key()),
            "'{}' is not a field of this schema",
            descriptor.key()
        );
        if self.mode == AccessMode::Direct {
            return self.storage.write(descriptor, input);
        }

        // Held across the backend write so cache and backend stay in step.
        let mut cache = self.cache.lock();
        let written = self.storage.write(descriptor, input);
        if written {
            let stored = self.storage.decoded(descriptor);
            cache.insert(descriptor.key().to_owned(), Box::new(stored));
        }
        written
    }

    /// Forget every cached value
    pub fn invalidate_cache(&self) {
        self.cache.lock().clear();
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("storage", &self.storage.name())
            .field("mode", &self.mode)
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}
