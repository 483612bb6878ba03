//! Bidirectional value transforms
//!
//! A [`Codec`] converts a logical value into something a backend can store and
//! back again. Both directions are partial: storage can hold values of an
//! unexpected shape, so failures surface as `None` rather than errors.
//!
//! Codecs compose with [`Codec::then`]. The stored type of the first codec must
//! be the value type of the next one, which the compiler checks at the seam.

mod boolean;
mod collection;
mod data;
mod date;
mod integer;
mod json;
mod raw;
mod url_string;

pub use self::boolean::{BoolAsInteger, BoolAsString, BoolStringFormat, IntegerDecodeRule, TextCase};
pub use self::collection::{ElementPolicy, ListOf, MapOf};
pub use self::data::{Base64, Base64Variant, CompressionAlgorithm, Compressed};
pub use self::date::Iso8601;
pub use self::integer::{IntegerAsInteger, IntegerAsString};
pub use self::json::{JsonBytes, JsonString};
pub use self::raw::{RawRepr, RawRepresentable};
pub use self::url_string::UrlString;

use crate::kind::StorageKind;
use std::fmt;
use std::marker::PhantomData;

/// A paired encode/decode transform
pub trait Codec: Send + Sync {
    /// Logical type handed to callers
    type Value;
    /// Type written to storage
    type Stored;

    fn encode(&self, value: &Self::Value) -> Option<Self::Stored>;

    fn decode(&self, stored: &Self::Stored) -> Option<Self::Value>;

    /// Chain `next` after this codec
    fn then<Next>(self, next: Next) -> Pipeline<Self, Next>
    where
        Self: Sized,
        Next: Codec<Value = Self::Stored>,
    {
        Pipeline::new(self, next)
    }
}

/// Two codecs run back to back
///
/// Encoding runs `first` then `second`; decoding runs them in reverse.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pipeline<A, B> {
    first: A,
    second: B,
}

impl<A, B> Pipeline<A, B>
where
    A: Codec,
    B: Codec<Value = A::Stored>,
{
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }

    pub fn first(&self) -> &A {
        &self.first
    }

    pub fn second(&self) -> &B {
        &self.second
    }
}

impl<A, B> Codec for Pipeline<A, B>
where
    A: Codec,
    B: Codec<Value = A::Stored>,
{
    type Value = A::Value;
    type Stored = B::Stored;

    fn encode(&self, value: &Self::Value) -> Option<Self::Stored> {
        let intermediate = self.first.encode(value)?;
        self.second.encode(&intermediate)
    }

    fn decode(&self, stored: &Self::Stored) -> Option<Self::Value> {
        let intermediate = self.second.decode(stored)?;
        self.first.decode(&intermediate)
    }
}

type EncodeFn<V, S> = dyn Fn(&V) -> Option<S> + Send + Sync;
type DecodeFn<V, S> = dyn Fn(&S) -> Option<V> + Send + Sync;

/// Codec built from a pair of closures
pub struct FnCodec<V, S> {
    encode: Box<EncodeFn<V, S>>,
    decode: Box<DecodeFn<V, S>>,
}

impl<V, S> FnCodec<V, S> {
    pub fn new<E, D>(encode: E, decode: D) -> Self
    where
        E: Fn(&V) -> Option<S> + Send + Sync + 'static,
        D: Fn(&S) -> Option<V> + Send + Sync + 'static,
    {
        Self {
            encode: Box::new(encode),
            decode: Box::new(decode),
        }
    }
}

impl<V, S> fmt::Debug for FnCodec<V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnCodec").finish_non_exhaustive()
    }
}

impl<V, S> Codec for FnCodec<V, S> {
    type Value = V;
    type Stored = S;

    fn encode(&self, value: &V) -> Option<S> {
        (self.encode)(value)
    }

    fn decode(&self, stored: &S) -> Option<V> {
        (self.decode)(stored)
    }
}

/// Identity codec for types a backend stores as-is
pub struct Atomic<T>(PhantomData<fn() -> T>);

impl<T> Atomic<T> {
    #[must_use]
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for Atomic<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Atomic<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Atomic<T> {}

impl<T> fmt::Debug for Atomic<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Atomic<{}>", std::any::type_name::<T>())
    }
}

impl<T: StorageKind> Codec for Atomic<T> {
    type Value = T;
    type Stored = T;

    fn encode(&self, value: &T) -> Option<T> {
        Some(value.clone())
    }

    fn decode(&self, stored: &T) -> Option<T> {
        Some(stored.clone())
    }
}
