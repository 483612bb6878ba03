//! Conflict policies for loading external contents into a backend

use crate::errors::{BoxError, Error, Result};
use prefkit_core::{RawDict, RawValue};
use std::collections::BTreeSet;
use std::fmt;

/// Decision returned by an update predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueUpdate {
    PreserveOld,
    TakeNew,
}

/// `predicate(key, old, new)` for a colliding key
pub type UpdatePredicate =
    dyn Fn(&str, &RawValue, &RawValue) -> std::result::Result<ValueUpdate, BoxError> + Send + Sync;

/// How incoming contents are merged into existing contents
pub enum UpdateStrategy {
    /// Drop every existing key, then insert the incoming ones
    Reinitializing,
    /// Insert incoming keys, overwriting on collision
    Updating,
    /// Ask the predicate for every collision; new keys are inserted directly
    UpdatingWithPredicate(Box<UpdatePredicate>),
}

impl UpdateStrategy {
    pub fn with_predicate<F>(predicate: F) -> Self
    where
        F: Fn(&str, &RawValue, &RawValue) -> std::result::Result<ValueUpdate, BoxError>
            + Send
            + Sync
            + 'static,
    {
        UpdateStrategy::UpdatingWithPredicate(Box::new(predicate))
    }
}

impl fmt::Debug for UpdateStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateStrategy::Reinitializing => f.write_str("Reinitializing"),
            UpdateStrategy::Updating => f.write_str("Updating"),
            UpdateStrategy::UpdatingWithPredicate(_) => f.write_str("UpdatingWithPredicate(..)"),
        }
    }
}

/// Merge `contents` into `target` and return the keys that changed
///
/// Keys are visited in sorted order. When the predicate fails the merge stops
/// at that key: keys before it stay applied, the rest are left alone.
pub fn apply_update(
    target: &mut RawDict,
    contents: RawDict,
    strategy: &UpdateStrategy,
) -> Result<BTreeSet<String>> {
    let mut changed = BTreeSet::new();
    match strategy {
        UpdateStrategy::Reinitializing => {
            target.clear();
            changed.extend(contents.keys().cloned());
            target.extend(contents);
        }
        UpdateStrategy::Updating => {
            for (key, value) in contents {
                if target.get(&key) != Some(&value) {
                    changed.insert(key.clone());
                    target.insert(key, value);
                }
            }
        }
        UpdateStrategy::UpdatingWithPredicate(predicate) => {
            for (key, value) in contents {
                let decision = match target.get(&key) {
                    Some(existing) => predicate(&key, existing, &value).map_err(|source| {
                        Error::Predicate {
                            key: key.clone(),
                            source,
                        }
                    })?,
                    None => ValueUpdate::TakeNew,
                };
                if decision == ValueUpdate::TakeNew {
                    changed.insert(key.clone());
                    target.insert(key, value);
                }
            }
        }
    }
    tracing::debug!("Merged with {:?}: {} key(s) changed", strategy, changed.len());
    Ok(changed)
}
