//! Rust types that map onto a single [`StorageValue`] kind

use crate::number::NumberBox;
use crate::value::{RawValue, StorageValue, Timestamp, ValueKind};
use std::collections::BTreeMap;

/// A Rust type a backend can store directly
///
/// `Vec<u8>` is the blob kind. Other `Vec<T>` and `BTreeMap<String, T>` are
/// homogeneous lists and maps of another storage kind.
///
/// Reading from a [`RawValue`] never coerces between kinds. The one exception
/// is unboxing a [`NumberBox`], which succeeds when the boxed number is exactly
/// representable in the requested numeric kind.
pub trait StorageKind: Sized + Clone + Send + Sync + 'static {
    /// Tag of the kind this type is stored as
    const KIND: ValueKind;

    fn into_value(self) -> StorageValue;

    fn from_value(value: StorageValue) -> Option<Self>;

    fn from_raw(raw: &RawValue) -> Option<Self>;

    fn to_raw(&self) -> RawValue {
        RawValue::from(self.clone().into_value())
    }
}

fn unbox<T>(raw: &RawValue, f: impl FnOnce(&NumberBox) -> Option<T>) -> Option<T> {
    match raw {
        RawValue::Number(number) if !number.is_boolean() => f(number),
        _ => None,
    }
}

impl StorageKind for i64 {
    const KIND: ValueKind = ValueKind::Int;

    fn into_value(self) -> StorageValue {
        StorageValue::Int(self)
    }

    fn from_value(value: StorageValue) -> Option<Self> {
        match value {
            StorageValue::Int(v) => Some(v),
            _ => None,
        }
    }

    fn from_raw(raw: &RawValue) -> Option<Self> {
        match raw {
            RawValue::Int(v) => Some(*v),
            other => unbox(other, NumberBox::to_i64),
        }
    }
}

impl StorageKind for String {
    const KIND: ValueKind = ValueKind::Str;

    fn into_value(self) -> StorageValue {
        StorageValue::Str(self)
    }

    fn from_value(value: StorageValue) -> Option<Self> {
        match value {
            StorageValue::Str(v) => Some(v),
            _ => None,
        }
    }

    fn from_raw(raw: &RawValue) -> Option<Self> {
        raw.as_str().map(str::to_owned)
    }
}

impl StorageKind for bool {
    const KIND: ValueKind = ValueKind::Bool;

    fn into_value(self) -> StorageValue {
        StorageValue::Bool(self)
    }

    fn from_value(value: StorageValue) -> Option<Self> {
        match value {
            StorageValue::Bool(v) => Some(v),
            _ => None,
        }
    }

    fn from_raw(raw: &RawValue) -> Option<Self> {
        match raw {
            RawValue::Bool(v) => Some(*v),
            RawValue::Number(number) => number.to_bool(),
            _ => None,
        }
    }
}

impl StorageKind for f64 {
    const KIND: ValueKind = ValueKind::F64;

    fn into_value(self) -> StorageValue {
        StorageValue::F64(self)
    }

    fn from_value(value: StorageValue) -> Option<Self> {
        match value {
            StorageValue::F64(v) => Some(v),
            _ => None,
        }
    }

    fn from_raw(raw: &RawValue) -> Option<Self> {
        match raw {
            RawValue::F64(v) => Some(*v),
            other => unbox(other, NumberBox::to_f64),
        }
    }
}

impl StorageKind for f32 {
    const KIND: ValueKind = ValueKind::F32;

    fn into_value(self) -> StorageValue {
        StorageValue::F32(self)
    }

    fn from_value(value: StorageValue) -> Option<Self> {
        match value {
            StorageValue::F32(v) => Some(v),
            _ => None,
        }
    }

    fn from_raw(raw: &RawValue) -> Option<Self> {
        match raw {
            RawValue::F32(v) => Some(*v),
            other => unbox(other, NumberBox::to_f32),
        }
    }
}

impl StorageKind for Vec<u8> {
    const KIND: ValueKind = ValueKind::Bytes;

    fn into_value(self) -> StorageValue {
        StorageValue::Bytes(self)
    }

    fn from_value(value: StorageValue) -> Option<Self> {
        match value {
            StorageValue::Bytes(v) => Some(v),
            _ => None,
        }
    }

    fn from_raw(raw: &RawValue) -> Option<Self> {
        match raw {
            RawValue::Bytes(v) => Some(v.clone()),
            _ => None,
        }
    }
}

impl StorageKind for Timestamp {
    const KIND: ValueKind = ValueKind::Time;

    fn into_value(self) -> StorageValue {
        StorageValue::Time(self)
    }

    fn from_value(value: StorageValue) -> Option<Self> {
        match value {
            StorageValue::Time(v) => Some(v),
            _ => None,
        }
    }

    fn from_raw(raw: &RawValue) -> Option<Self> {
        match raw {
            RawValue::Time(v) => Some(*v),
            _ => None,
        }
    }
}

impl<T: StorageKind> StorageKind for Vec<T> {
    const KIND: ValueKind = ValueKind::List;

    fn into_value(self) -> StorageValue {
        StorageValue::List(self.into_iter().map(StorageKind::into_value).collect())
    }

    fn from_value(value: StorageValue) -> Option<Self> {
        match value {
            StorageValue::List(items) => items.into_iter().map(T::from_value).collect(),
            _ => None,
        }
    }

    fn from_raw(raw: &RawValue) -> Option<Self> {
        raw.as_array()?.iter().map(T::from_raw).collect()
    }
}

impl<T: StorageKind> StorageKind for BTreeMap<String, T> {
    const KIND: ValueKind = ValueKind::Map;

    fn into_value(self) -> StorageValue {
        StorageValue::Map(
            self.into_iter()
                .map(|(key, value)| (key, value.into_value()))
                .collect(),
        )
    }

    fn from_value(value: StorageValue) -> Option<Self> {
        match value {
            StorageValue::Map(entries) => entries
                .into_iter()
                .map(|(key, value)| T::from_value(value).map(|v| (key, v)))
                .collect(),
            _ => None,
        }
    }

    fn from_raw(raw: &RawValue) -> Option<Self> {
        raw.as_dict()?
            .iter()
            .map(|(key, value)| T::from_raw(value).map(|v| (key.clone(), v)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_coercion_between_kinds() {
        assert_eq!(i64::from_raw(&RawValue::Str("1".into())), None);
        assert_eq!(String::from_raw(&RawValue::Int(1)), None);
        assert_eq!(f64::from_raw(&RawValue::F32(1.5)), None);
        assert_eq!(bool::from_raw(&RawValue::Int(1)), None);
    }

    #[test]
    fn test_number_boxes_unbox_exactly() {
        let boxed = RawValue::Number(NumberBox::from_i64(123));
        assert_eq!(i64::from_raw(&boxed), Some(123));
        assert_eq!(f64::from_raw(&boxed), Some(123.0));

        let float = RawValue::Number(NumberBox::from_f64(123.5));
        assert_eq!(i64::from_raw(&float), None);
        assert_eq!(f32::from_raw(&float), Some(123.5));
    }

    #[test]
    fn test_boolean_boxes_are_not_integers() {
        let boxed = RawValue::Number(NumberBox::boolean(true));
        assert_eq!(bool::from_raw(&boxed), Some(true));
        assert_eq!(i64::from_raw(&boxed), None);
    }

    #[test]
    fn test_list_reads_are_all_or_nothing() {
        let raw = RawValue::Array(vec![
            RawValue::Str("a".into()),
            RawValue::Int(1),
        ]);
        assert_eq!(Vec::<String>::from_raw(&raw), None);

        let raw = RawValue::Array(vec![RawValue::Str("a".into()), RawValue::Str("b".into())]);
        assert_eq!(
            Vec::<String>::from_raw(&raw),
            Some(vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn test_blob_is_not_a_list_of_integers() {
        let raw = RawValue::Bytes(vec![1, 2]);
        assert_eq!(Vec::<u8>::from_raw(&raw), Some(vec![1, 2]));
        assert_eq!(Vec::<i64>::from_raw(&raw), None);
    }

    #[test]
    fn test_map_round_trip_through_value() {
        let mut map = BTreeMap::new();
        map.insert("x".to_string(), 1.5_f64);
        let value = map.clone().into_value();
        assert_eq!(BTreeMap::<String, f64>::from_value(value), Some(map));
    }
}
