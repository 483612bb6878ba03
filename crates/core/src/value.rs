//! The value model persisted by storage backends
//!
//! [`StorageValue`] is the closed set of kinds a backend can physically hold.
//! Lists and maps are homogeneous. Anything mixed, or anything still carrying
//! an undecided [`NumberBox`], lives in the untyped [`RawValue`] instead.

use crate::errors::{Error, Result};
use crate::number::NumberBox;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::fmt;

/// Point in time stored by backends
pub type Timestamp = DateTime<Utc>;

/// String keyed table of untyped values
pub type RawDict = BTreeMap<String, RawValue>;

/// Kind tag of a [`StorageValue`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Int,
    Str,
    Bool,
    F64,
    F32,
    Bytes,
    Time,
    List,
    Map,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Int => "integer",
            ValueKind::Str => "string",
            ValueKind::Bool => "boolean",
            ValueKind::F64 => "double",
            ValueKind::F32 => "float",
            ValueKind::Bytes => "data",
            ValueKind::Time => "date",
            ValueKind::List => "array",
            ValueKind::Map => "dictionary",
        };
        f.write_str(name)
    }
}

/// A value a backend can persist
#[derive(Debug, Clone, PartialEq)]
pub enum StorageValue {
    Int(i64),
    Str(String),
    Bool(bool),
    F64(f64),
    F32(f32),
    Bytes(Vec<u8>),
    Time(Timestamp),
    List(Vec<StorageValue>),
    Map(BTreeMap<String, StorageValue>),
}

impl StorageValue {
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            StorageValue::Int(_) => ValueKind::Int,
            StorageValue::Str(_) => ValueKind::Str,
            StorageValue::Bool(_) => ValueKind::Bool,
            StorageValue::F64(_) => ValueKind::F64,
            StorageValue::F32(_) => ValueKind::F32,
            StorageValue::Bytes(_) => ValueKind::Bytes,
            StorageValue::Time(_) => ValueKind::Time,
            StorageValue::List(_) => ValueKind::List,
            StorageValue::Map(_) => ValueKind::Map,
        }
    }

    /// Build a list, rejecting mixed element kinds
    pub fn list(items: Vec<StorageValue>) -> Result<Self> {
        ensure_homogeneous(items.iter())?;
        Ok(StorageValue::List(items))
    }

    /// Build a map, rejecting mixed value kinds
    pub fn map(entries: BTreeMap<String, StorageValue>) -> Result<Self> {
        ensure_homogeneous(entries.values())?;
        Ok(StorageValue::Map(entries))
    }

    /// Whether every nested container holds a single element kind
    #[must_use]
    pub fn is_homogeneous(&self) -> bool {
        match self {
            StorageValue::List(items) => ensure_homogeneous(items.iter()).is_ok(),
            StorageValue::Map(entries) => ensure_homogeneous(entries.values()).is_ok(),
            _ => true,
        }
    }
}

fn ensure_homogeneous<'a>(mut values: impl Iterator<Item = &'a StorageValue>) -> Result<()> {
    let Some(first) = values.next() else {
        return Ok(());
    };
    let expected = first.kind();
    if !first.is_homogeneous() {
        return Err(nested_error(first));
    }
    for value in values {
        if value.kind() != expected {
            return Err(Error::heterogeneous(expected, value.kind()));
        }
        if !value.is_homogeneous() {
            return Err(nested_error(value));
        }
    }
    Ok(())
}

fn nested_error(value: &StorageValue) -> Error {
    let inner = match value {
        StorageValue::List(items) => ensure_homogeneous(items.iter()),
        StorageValue::Map(entries) => ensure_homogeneous(entries.values()),
        _ => Ok(()),
    };
    match inner {
        Err(error) => error,
        Ok(()) => Error::heterogeneous(value.kind(), value.kind()),
    }
}

macro_rules! storage_value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for StorageValue {
                fn from(value: $ty) -> Self {
                    StorageValue::$variant(value)
                }
            }
        )*
    };
}

storage_value_from! {
    i64 => Int,
    String => Str,
    bool => Bool,
    f64 => F64,
    f32 => F32,
    Vec<u8> => Bytes,
    Timestamp => Time,
}

impl From<&str> for StorageValue {
    fn from(value: &str) -> Self {
        StorageValue::Str(value.to_owned())
    }
}

/// Untyped value used where containers mix kinds or numbers are still boxed
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Int(i64),
    Str(String),
    Bool(bool),
    F64(f64),
    F32(f32),
    Bytes(Vec<u8>),
    Time(Timestamp),
    Number(NumberBox),
    Array(Vec<RawValue>),
    Dict(RawDict),
}

impl RawValue {
    /// Human readable kind, used in diagnostics
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            RawValue::Int(_) => "integer",
            RawValue::Str(_) => "string",
            RawValue::Bool(_) => "boolean",
            RawValue::F64(_) => "double",
            RawValue::F32(_) => "float",
            RawValue::Bytes(_) => "data",
            RawValue::Time(_) => "date",
            RawValue::Number(_) => "number",
            RawValue::Array(_) => "array",
            RawValue::Dict(_) => "dictionary",
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            RawValue::Str(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&[RawValue]> {
        match self {
            RawValue::Array(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_dict(&self) -> Option<&RawDict> {
        match self {
            RawValue::Dict(entries) => Some(entries),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_number(&self) -> Option<&NumberBox> {
        match self {
            RawValue::Number(number) => Some(number),
            _ => None,
        }
    }
}

impl From<StorageValue> for RawValue {
    fn from(value: StorageValue) -> Self {
        match value {
            StorageValue::Int(v) => RawValue::Int(v),
            StorageValue::Str(v) => RawValue::Str(v),
            StorageValue::Bool(v) => RawValue::Bool(v),
            StorageValue::F64(v) => RawValue::F64(v),
            StorageValue::F32(v) => RawValue::F32(v),
            StorageValue::Bytes(v) => RawValue::Bytes(v),
            StorageValue::Time(v) => RawValue::Time(v),
            StorageValue::List(items) => {
                RawValue::Array(items.into_iter().map(RawValue::from).collect())
            }
            StorageValue::Map(entries) => RawValue::Dict(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, RawValue::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<NumberBox> for RawValue {
    fn from(value: NumberBox) -> Self {
        RawValue::Number(value)
    }
}

impl TryFrom<RawValue> for StorageValue {
    type Error = Error;

    fn try_from(value: RawValue) -> Result<Self> {
        match value {
            RawValue::Int(v) => Ok(StorageValue::Int(v)),
            RawValue::Str(v) => Ok(StorageValue::Str(v)),
            RawValue::Bool(v) => Ok(StorageValue::Bool(v)),
            RawValue::F64(v) => Ok(StorageValue::F64(v)),
            RawValue::F32(v) => Ok(StorageValue::F32(v)),
            RawValue::Bytes(v) => Ok(StorageValue::Bytes(v)),
            RawValue::Time(v) => Ok(StorageValue::Time(v)),
            RawValue::Number(_) => Err(Error::untyped("number")),
            RawValue::Array(items) => {
                let items = items
                    .into_iter()
                    .map(StorageValue::try_from)
                    .collect::<Result<Vec<_>>>()?;
                StorageValue::list(items)
            }
            RawValue::Dict(entries) => {
                let entries = entries
                    .into_iter()
                    .map(|(key, value)| Ok((key, StorageValue::try_from(value)?)))
                    .collect::<Result<BTreeMap<_, _>>>()?;
                StorageValue::map(entries)
            }
        }
    }
}
