//! Locations of leaves inside a nested dictionary

use std::fmt;

/// One step from a container to its child
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// Full path of a value from the root dictionary
///
/// Renders as `key8[1].keyB`. The root path renders as an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct KeyPath {
    segments: Vec<PathSegment>,
}

impl KeyPath {
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Path of the map entry `key` below this one
    #[must_use]
    pub fn key(&self, key: impl Into<String>) -> Self {
        self.with(PathSegment::Key(key.into()))
    }

    /// Path of the array element `index` below this one
    #[must_use]
    pub fn index(&self, index: usize) -> Self {
        self.with(PathSegment::Index(index))
    }

    /// Map keys only, skipping array indices
    ///
    /// Lets a strategy match a field regardless of which array element it
    /// sits in: `key8[1].keyB` gives `["key8", "keyB"]`.
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                PathSegment::Key(key) => Some(key.as_str()),
                PathSegment::Index(_) => None,
            })
            .collect()
    }

    /// Last map key on the path
    #[must_use]
    pub fn last_key(&self) -> Option<&str> {
        self.segments.iter().rev().find_map(|segment| match segment {
            PathSegment::Key(key) => Some(key.as_str()),
            PathSegment::Index(_) => None,
        })
    }

    fn with(&self, segment: PathSegment) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend_from_slice(&self.segments);
        segments.push(segment);
        Self { segments }
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if position == 0 => f.write_str(key)?,
                PathSegment::Key(key) => write!(f, ".{key}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

impl<S: Into<String>> FromIterator<S> for KeyPath {
    /// Path made of map keys only
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().map(|key| PathSegment::Key(key.into())).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let path = KeyPath::root().key("key8").index(1).key("keyB");
        assert_eq!(path.to_string(), "key8[1].keyB");
        assert_eq!(KeyPath::root().to_string(), "");
        assert_eq!(KeyPath::root().key("a").index(0).index(2).to_string(), "a[0][2]");
    }

    #[test]
    fn test_keys_skip_indices() {
        let path = KeyPath::root().key("key8").index(1).key("keyB");
        assert_eq!(path.keys(), ["key8", "keyB"]);
        assert_eq!(path.last_key(), Some("keyB"));
        assert_eq!(KeyPath::root().index(3).last_key(), None);
    }

    #[test]
    fn test_from_keys() {
        let path: KeyPath = ["key10", "keyC"].into_iter().collect();
        assert_eq!(path, KeyPath::root().key("key10").key("keyC"));
        assert!(!path.is_root());
    }
}
