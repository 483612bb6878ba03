//! The storage backend contract and typed access on top of it

use crate::errors::Result;
use crate::merge::UpdateStrategy;
use prefkit_core::{
    Codec, KeyDescriptor, RawDict, RawValue, StorageKind, StoredOf, Timestamp, ValueKind, ValueOf,
};
use std::collections::BTreeSet;

/// A key/value store of untyped values
///
/// Implementations own their contents and are shared between threads, so
/// every method takes `&self`. Getters never fail: a missing key and a value
/// of the wrong kind both read as `None`.
pub trait StorageBackend: Send + Sync {
    /// Name used in diagnostics
    fn name(&self) -> &str;

    fn raw(&self, key: &str) -> Option<RawValue>;

    /// Store a value, or remove the key when `value` is `None`
    fn set_raw(&self, key: &str, value: Option<RawValue>);

    /// Read a value for use as `kind`
    ///
    /// Stores that coerce between kinds on read override this. Everything
    /// else hands back the stored value and lets the caller reject it.
    fn typed(&self, key: &str, _kind: ValueKind) -> Option<RawValue> {
        self.raw(key)
    }

    fn contains(&self, key: &str) -> bool {
        self.raw(key).is_some()
    }

    fn keys(&self) -> Vec<String>;

    fn remove_all(&self);

    /// Copy of the whole contents
    fn snapshot(&self) -> RawDict;

    fn int(&self, key: &str) -> Option<i64> {
        self.typed(key, ValueKind::Int).as_ref().and_then(i64::from_raw)
    }

    fn string(&self, key: &str) -> Option<String> {
        self.typed(key, ValueKind::Str).as_ref().and_then(String::from_raw)
    }

    fn bool(&self, key: &str) -> Option<bool> {
        self.typed(key, ValueKind::Bool).as_ref().and_then(bool::from_raw)
    }

    fn f64(&self, key: &str) -> Option<f64> {
        self.typed(key, ValueKind::F64).as_ref().and_then(f64::from_raw)
    }

    fn f32(&self, key: &str) -> Option<f32> {
        self.typed(key, ValueKind::F32).as_ref().and_then(f32::from_raw)
    }

    fn bytes(&self, key: &str) -> Option<Vec<u8>> {
        self.typed(key, ValueKind::Bytes).as_ref().and_then(Vec::<u8>::from_raw)
    }

    fn timestamp(&self, key: &str) -> Option<Timestamp> {
        self.typed(key, ValueKind::Time).as_ref().and_then(Timestamp::from_raw)
    }

    /// Untyped array, elements may be of mixed kinds
    fn array(&self, key: &str) -> Option<Vec<RawValue>> {
        match self.typed(key, ValueKind::List)? {
            RawValue::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Untyped dictionary, values may be of mixed kinds
    fn dictionary(&self, key: &str) -> Option<RawDict> {
        match self.typed(key, ValueKind::Map)? {
            RawValue::Dict(entries) => Some(entries),
            _ => None,
        }
    }

    fn as_importable(&self) -> Option<&dyn Importable> {
        None
    }

    fn as_exportable(&self) -> Option<&dyn Exportable> {
        None
    }
}

/// A backend whose whole contents can be read out as one dictionary
pub trait Exportable: Send + Sync {
    fn export_dictionary(&self) -> Result<RawDict>;
}

/// A backend that can merge a dictionary of external contents
pub trait Importable: Send + Sync {
    /// Merge `contents` and return the keys that changed
    fn load(&self, contents: RawDict, strategy: &UpdateStrategy) -> Result<BTreeSet<String>>;
}

/// Typed and descriptor-based access for every backend
pub trait StorageExt: StorageBackend {
    fn get<T: StorageKind>(&self, key: &str) -> Option<T> {
        self.typed(key, T::KIND).as_ref().and_then(T::from_raw)
    }

    /// Store a typed value; `None` removes the key
    fn set<T: StorageKind>(&self, key: &str, value: Option<T>) {
        self.set_raw(key, value.map(|value| RawValue::from(value.into_value())));
    }

    fn remove(&self, key: &str) {
        self.set_raw(key, None);
    }

    /// The decoded value for a descriptor, `None` when absent or undecodable
    fn decoded<K>(&self, descriptor: &K) -> Option<ValueOf<K>>
    where
        K: KeyDescriptor,
        StoredOf<K>: StorageKind,
    {
        let stored = self.get::<StoredOf<K>>(descriptor.key())?;
        descriptor.codec().decode(&stored)
    }

    fn read<K>(&self, descriptor: &K) -> K::Output
    where
        K: KeyDescriptor,
        StoredOf<K>: StorageKind,
    {
        descriptor.resolve(self.decoded(descriptor))
    }

    /// Encode and store a value, removing the key for `None`
    ///
    /// Returns `false` and leaves the stored value untouched when the codec
    /// cannot encode `value`.
    fn write_decoded<K>(&self, descriptor: &K, value: Option<ValueOf<K>>) -> bool
    where
        K: KeyDescriptor,
        StoredOf<K>: StorageKind,
    {
        let Some(value) = value else {
            self.remove(descriptor.key());
            return true;
        };
        match descriptor.codec().encode(&value) {
            Some(stored) => {
                self.set(descriptor.key(), Some(stored));
                true
            }
            None => {
                tracing::warn!(
                    "Value for key '{}' could not be encoded, leaving '{}' unchanged",
                    descriptor.key(),
                    self.name()
                );
                false
            }
        }
    }

    fn write<K>(&self, descriptor: &K, input: K::Input) -> bool
    where
        K: KeyDescriptor,
        StoredOf<K>: StorageKind,
    {
        self.write_decoded(descriptor, descriptor.accept(input))
    }
}

impl<B: StorageBackend + ?Sized> StorageExt for B {}
