use super::Codec;
use std::collections::BTreeMap;

/// What a collection codec does with an element that fails to convert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ElementPolicy {
    /// One failing element fails the whole collection
    #[default]
    Strict,
    /// Failing elements are dropped and the rest is kept
    Lossy,
}

impl ElementPolicy {
    fn collect<I, O>(self, items: impl Iterator<Item = I>, f: impl Fn(I) -> Option<O>) -> Option<Vec<O>> {
        match self {
            ElementPolicy::Strict => items.map(f).collect(),
            ElementPolicy::Lossy => Some(items.filter_map(f).collect()),
        }
    }
}

/// Applies an element codec to every item of a list
#[derive(Debug, Clone, Copy, Default)]
pub struct ListOf<C> {
    element: C,
    policy: ElementPolicy,
}

impl<C: Codec> ListOf<C> {
    pub fn new(element: C) -> Self {
        Self {
            element,
            policy: ElementPolicy::Strict,
        }
    }

    /// Drop elements that fail instead of failing the list
    pub fn lossy(element: C) -> Self {
        Self {
            element,
            policy: ElementPolicy::Lossy,
        }
    }

    pub fn policy(&self) -> ElementPolicy {
        self.policy
    }
}

impl<C: Codec> Codec for ListOf<C> {
    type Value = Vec<C::Value>;
    type Stored = Vec<C::Stored>;

    fn encode(&self, value: &Self::Value) -> Option<Self::Stored> {
        self.policy.collect(value.iter(), |item| self.element.encode(item))
    }

    fn decode(&self, stored: &Self::Stored) -> Option<Self::Value> {
        self.policy.collect(stored.iter(), |item| self.element.decode(item))
    }
}

/// Applies an element codec to every value of a string keyed map
#[derive(Debug, Clone, Copy, Default)]
pub struct MapOf<C> {
    element: C,
    policy: ElementPolicy,
}

impl<C: Codec> MapOf<C> {
    pub fn new(element: C) -> Self {
        Self {
            element,
            policy: ElementPolicy::Strict,
        }
    }

    /// Drop entries that fail instead of failing the map
    pub fn lossy(element: C) -> Self {
        Self {
            element,
            policy: ElementPolicy::Lossy,
        }
    }

    pub fn policy(&self) -> ElementPolicy {
        self.policy
    }
}

impl<C: Codec> Codec for MapOf<C> {
    type Value = BTreeMap<String, C::Value>;
    type Stored = BTreeMap<String, C::Stored>;

    fn encode(&self, value: &Self::Value) -> Option<Self::Stored> {
        let entries = self.policy.collect(value.iter(), |(key, item)| {
            self.element.encode(item).map(|encoded| (key.clone(), encoded))
        })?;
        Some(entries.into_iter().collect())
    }

    fn decode(&self, stored: &Self::Stored) -> Option<Self::Value> {
        let entries = self.policy.collect(stored.iter(), |(key, item)| {
            self.element.decode(item).map(|decoded| (key.clone(), decoded))
        })?;
        Some(entries.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{IntegerAsString, JsonString};
    use serde::{Deserialize, Serialize};

    #[test]
    fn test_strict_list_fails_as_a_whole() {
        let codec = ListOf::new(IntegerAsString::<u8>::new());
        let stored = vec!["1".to_string(), "x".to_string(), "3".to_string()];
        assert_eq!(codec.decode(&stored), None);
        assert_eq!(
            codec.encode(&vec![1, 2]),
            Some(vec!["1".to_string(), "2".to_string()])
        );
    }

    #[test]
    fn test_lossy_list_drops_failures() {
        let codec = ListOf::lossy(IntegerAsString::<u8>::new());
        let stored = vec!["1".to_string(), "x".to_string(), "300".to_string(), "3".to_string()];
        assert_eq!(codec.decode(&stored), Some(vec![1, 3]));
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[test]
    fn test_map_of_json_elements() {
        let codec = MapOf::new(JsonString::<Point>::new());
        let mut value = BTreeMap::new();
        value.insert("origin".to_string(), Point { x: 0, y: 0 });
        value.insert("corner".to_string(), Point { x: 5, y: 8 });

        let stored = codec.encode(&value).unwrap();
        assert_eq!(stored["corner"], r#"{"x":5,"y":8}"#);
        assert_eq!(codec.decode(&stored), Some(value));
    }

    #[test]
    fn test_lossy_map_drops_failures() {
        let codec = MapOf::lossy(JsonString::<Point>::new());
        let mut stored = BTreeMap::new();
        stored.insert("good".to_string(), r#"{"x":1,"y":2}"#.to_string());
        stored.insert("bad".to_string(), "garbage".to_string());

        let decoded = codec.decode(&stored).unwrap();
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded["good"], Point { x: 1, y: 2 });

        let strict = MapOf::new(JsonString::<Point>::new());
        assert_eq!(strict.decode(&stored), None);
    }
}
