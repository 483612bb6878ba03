//! Key descriptors
//!
//! A descriptor binds a storage key to the codec used for it and, for
//! [`DefaultedKey`], the value reported when nothing usable is stored.
//! Descriptors are immutable and are usually built once per setting.

use crate::codec::{Atomic, Codec, FnCodec};
use crate::kind::StorageKind;

/// Logical value type of a descriptor
pub type ValueOf<K> = <<K as KeyDescriptor>::Codec as Codec>::Value;

/// Stored type of a descriptor
pub type StoredOf<K> = <<K as KeyDescriptor>::Codec as Codec>::Stored;

/// Binding of a key name to a codec
pub trait KeyDescriptor: Send + Sync {
    type Codec: Codec;
    /// What reads return
    type Output;
    /// What writes accept
    type Input;

    fn key(&self) -> &str;

    fn codec(&self) -> &Self::Codec;

    /// Turn a decoded value, `None` when absent or undecodable, into a read result
    fn resolve(&self, decoded: Option<ValueOf<Self>>) -> Self::Output;

    /// Turn a write argument into the value to store, `None` meaning remove
    fn accept(&self, input: Self::Input) -> Option<ValueOf<Self>>;

    /// Decode a stored value and resolve it
    fn read_stored(&self, stored: Option<&StoredOf<Self>>) -> Self::Output {
        self.resolve(stored.and_then(|stored| self.codec().decode(stored)))
    }
}

/// Descriptor without a default: absent values read as `None`
#[derive(Debug, Clone)]
pub struct OptionalKey<C> {
    key: String,
    codec: C,
}

impl<C: Codec> OptionalKey<C> {
    pub fn new(key: impl Into<String>, codec: C) -> Self {
        Self {
            key: key.into(),
            codec,
        }
    }

    /// Attach a default, producing a [`DefaultedKey`] for the same key
    pub fn with_default(self, default: C::Value) -> DefaultedKey<C> {
        DefaultedKey {
            key: self.key,
            codec: self.codec,
            default,
        }
    }
}

impl<T: StorageKind> OptionalKey<Atomic<T>> {
    /// Descriptor for a value stored as-is
    pub fn atomic(key: impl Into<String>) -> Self {
        Self::new(key, Atomic::new())
    }
}

impl<V, S> OptionalKey<FnCodec<V, S>> {
    /// Descriptor with an ad-hoc pair of conversion closures
    pub fn with<E, D>(key: impl Into<String>, encode: E, decode: D) -> Self
    where
        E: Fn(&V) -> Option<S> + Send + Sync + 'static,
        D: Fn(&S) -> Option<V> + Send + Sync + 'static,
    {
        Self {
            key: key.into(),
            codec: FnCodec::new(encode, decode),
        }
    }
}

impl<C: Codec> KeyDescriptor for OptionalKey<C> {
    type Codec = C;
    type Output = Option<C::Value>;
    type Input = Option<C::Value>;

    fn key(&self) -> &str {
        &self.key
    }

    fn codec(&self) -> &C {
        &self.codec
    }

    fn resolve(&self, decoded: Option<C::Value>) -> Option<C::Value> {
        decoded
    }

    fn accept(&self, input: Option<C::Value>) -> Option<C::Value> {
        input
    }
}

/// Descriptor with a default
///
/// Reads return the default when the key is absent and when the stored value
/// does not decode. Writes take a plain value, so a defaulted key can only be
/// reset by writing the default back.
#[derive(Debug, Clone)]
pub struct DefaultedKey<C: Codec> {
    key: String,
    codec: C,
    default: C::Value,
}

impl<C: Codec> DefaultedKey<C> {
    pub fn new(key: impl Into<String>, codec: C, default: C::Value) -> Self {
        Self {
            key: key.into(),
            codec,
            default,
        }
    }

    pub fn default_value(&self) -> &C::Value {
        &self.default
    }
}

impl<T: StorageKind> DefaultedKey<Atomic<T>> {
    /// Defaulted descriptor for a value stored as-is
    pub fn atomic(key: impl Into<String>, default: T) -> Self {
        Self::new(key, Atomic::new(), default)
    }
}

impl<C> KeyDescriptor for DefaultedKey<C>
where
    C: Codec,
    C::Value: Clone + Send + Sync,
{
    type Codec = C;
    type Output = C::Value;
    type Input = C::Value;

    fn key(&self) -> &str {
        &self.key
    }

    fn codec(&self) -> &C {
        &self.codec
    }

    fn resolve(&self, decoded: Option<C::Value>) -> C::Value {
        decoded.unwrap_or_else(|| self.default.clone())
    }

    fn accept(&self, input: C::Value) -> Option<C::Value> {
        Some(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{BoolAsString, IntegerAsInteger};

    #[test]
    fn test_optional_key_reads_none_when_absent() {
        let key = OptionalKey::<Atomic<String>>::atomic("name");
        assert_eq!(key.key(), "name");
        assert_eq!(key.read_stored(None), None);
        assert_eq!(key.read_stored(Some(&"x".to_string())), Some("x".to_string()));
    }

    #[test]
    fn test_defaulted_key_falls_back_when_absent() {
        let key = DefaultedKey::atomic("count", 5_i64);
        assert_eq!(key.read_stored(None), 5);
        assert_eq!(key.read_stored(Some(&9)), 9);
    }

    #[test]
    fn test_defaulted_key_falls_back_when_undecodable() {
        let key = DefaultedKey::new("flag", BoolAsString::default(), true);
        assert!(key.read_stored(Some(&"maybe".to_string())));
        assert!(!key.read_stored(Some(&"false".to_string())));
    }

    #[test]
    fn test_optional_none_means_remove() {
        let key = OptionalKey::new("byte", IntegerAsInteger::<u8>::new());
        assert_eq!(key.accept(None), None);
        assert_eq!(key.accept(Some(3)), Some(3));
        assert_eq!(key.read_stored(Some(&1000)), None);
    }

    #[test]
    fn test_closure_descriptor() {
        let key = OptionalKey::with(
            "celsius",
            |fahrenheit: &f64| Some((fahrenheit - 32.0) * 5.0 / 9.0),
            |celsius: &f64| Some(celsius * 9.0 / 5.0 + 32.0),
        );
        assert_eq!(key.codec().encode(&212.0), Some(100.0));
        assert_eq!(key.read_stored(Some(&0.0)), Some(32.0));
    }

    #[test]
    fn test_with_default_keeps_key_and_codec() {
        let key = OptionalKey::<Atomic<i64>>::atomic("n").with_default(1);
        assert_eq!(key.key(), "n");
        assert_eq!(*key.default_value(), 1);
        assert_eq!(key.read_stored(None), 1);
    }
}
