use crate::errors::Result;
use crate::path::KeyPath;
use prefkit_core::{RawDict, RawValue};

/// Rewrites one leaf found by [`walk_dict`]
pub(crate) trait LeafMapper {
    fn map_leaf(&self, path: &KeyPath, value: RawValue) -> Result<RawValue>;
}

/// Rebuild `dict`, passing every non-container value through `mapper`
///
/// Stops at the first failing leaf.
pub(crate) fn walk_dict<M: LeafMapper + ?Sized>(
    mapper: &M,
    path: &KeyPath,
    dict: RawDict,
) -> Result<RawDict> {
    dict.into_iter()
        .map(|(key, value)| {
            let child = path.key(key.as_str());
            Ok((key, walk_value(mapper, &child, value)?))
        })
        .collect()
}

fn walk_value<M: LeafMapper + ?Sized>(mapper: &M, path: &KeyPath, value: RawValue) -> Result<RawValue> {
    match value {
        RawValue::Dict(entries) => Ok(RawValue::Dict(walk_dict(mapper, path, entries)?)),
        RawValue::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| walk_value(mapper, &path.index(index), item))
            .collect::<Result<Vec<_>>>()
            .map(RawValue::Array),
        leaf => mapper.map_leaf(path, leaf),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Records every path it sees and upper-cases strings
    #[derive(Default)]
    struct Recorder {
        paths: RefCell<Vec<String>>,
    }

    impl LeafMapper for Recorder {
        fn map_leaf(&self, path: &KeyPath, value: RawValue) -> Result<RawValue> {
            self.paths.borrow_mut().push(path.to_string());
            Ok(match value {
                RawValue::Str(s) => RawValue::Str(s.to_uppercase()),
                other => other,
            })
        }
    }

    #[test]
    fn test_walk_visits_leaves_with_paths() {
        let mut inner = RawDict::new();
        inner.insert("keyA".into(), RawValue::Str("a".into()));
        inner.insert("keyB".into(), RawValue::Int(234));
        let mut dict = RawDict::new();
        dict.insert(
            "key8".into(),
            RawValue::Array(vec![
                RawValue::Array(vec![RawValue::Str("s".into())]),
                RawValue::Dict(inner),
            ]),
        );
        dict.insert("key9".into(), RawValue::Bool(true));

        let recorder = Recorder::default();
        let out = walk_dict(&recorder, &KeyPath::root(), dict).unwrap();

        assert_eq!(
            *recorder.paths.borrow(),
            vec!["key8[0][0]", "key8[1].keyA", "key8[1].keyB", "key9"]
        );
        let key8 = out["key8"].as_array().unwrap();
        assert_eq!(key8[0], RawValue::Array(vec![RawValue::Str("S".into())]));
        assert_eq!(key8[1].as_dict().unwrap()["keyA"], RawValue::Str("A".into()));
    }

    #[test]
    fn test_empty_containers_are_kept() {
        let mut dict = RawDict::new();
        dict.insert("list".into(), RawValue::Array(Vec::new()));
        dict.insert("map".into(), RawValue::Dict(RawDict::new()));

        let recorder = Recorder::default();
        let out = walk_dict(&recorder, &KeyPath::root(), dict.clone()).unwrap();
        assert_eq!(out, dict);
        assert!(recorder.paths.borrow().is_empty());
    }
}
