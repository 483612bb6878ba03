use super::Codec;
use std::fmt::{self, Display};
use std::marker::PhantomData;
use std::str::FromStr;

/// Stores any primitive integer as the platform `i64`
///
/// Values outside the `i64` range fail to encode, stored values outside the
/// target range fail to decode.
pub struct IntegerAsInteger<N>(PhantomData<fn() -> N>);

impl<N> IntegerAsInteger<N> {
    #[must_use]
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<N> Default for IntegerAsInteger<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> fmt::Debug for IntegerAsInteger<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IntegerAsInteger<{}>", std::any::type_name::<N>())
    }
}

impl<N> Codec for IntegerAsInteger<N>
where
    N: Copy + TryFrom<i64> + TryInto<i64>,
{
    type Value = N;
    type Stored = i64;

    fn encode(&self, value: &N) -> Option<i64> {
        (*value).try_into().ok()
    }

    fn decode(&self, stored: &i64) -> Option<N> {
        N::try_from(*stored).ok()
    }
}

/// Stores any primitive integer as its decimal text
pub struct IntegerAsString<N>(PhantomData<fn() -> N>);

impl<N> IntegerAsString<N> {
    #[must_use]
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<N> Default for IntegerAsString<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> fmt::Debug for IntegerAsString<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IntegerAsString<{}>", std::any::type_name::<N>())
    }
}

impl<N> Codec for IntegerAsString<N>
where
    N: Copy + Display + FromStr,
{
    type Value = N;
    type Stored = String;

    fn encode(&self, value: &N) -> Option<String> {
        Some(value.to_string())
    }

    fn decode(&self, stored: &String) -> Option<N> {
        stored.parse().ok()
    }
}
