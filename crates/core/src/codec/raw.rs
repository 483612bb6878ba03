use super::Codec;
use std::fmt;
use std::marker::PhantomData;

/// A type with a lossless mapping onto an underlying raw value
///
/// Typically a field-less enum backed by integers or strings.
pub trait RawRepresentable: Sized {
    type Raw;

    fn raw_value(&self) -> Self::Raw;

    /// `None` when no case matches `raw`
    fn from_raw_value(raw: &Self::Raw) -> Option<Self>;
}

/// Stores a [`RawRepresentable`] as its raw value
pub struct RawRepr<T>(PhantomData<fn() -> T>);

impl<T> RawRepr<T> {
    #[must_use]
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for RawRepr<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for RawRepr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RawRepr<{}>", std::any::type_name::<T>())
    }
}

impl<T: RawRepresentable> Codec for RawRepr<T> {
    type Value = T;
    type Stored = T::Raw;

    fn encode(&self, value: &T) -> Option<T::Raw> {
        Some(value.raw_value())
    }

    fn decode(&self, stored: &T::Raw) -> Option<T> {
        T::from_raw_value(stored)
    }
}
