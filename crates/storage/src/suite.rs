//! An emulated platform preference suite
//!
//! A [`Suite`] behaves like a per-application defaults database: numbers are
//! boxed on write so their original width is lost, typed getters coerce
//! between kinds, and a registration domain supplies fallback values for
//! absent keys. A suite may be volatile or backed by an XML property list.

use crate::config::{Persistence, SuiteConfig};
use crate::errors::{Error, Result};
use crate::persist::write_atomic;
use parking_lot::RwLock;
use prefkit_core::{NumberBox, RawDict, RawValue, ValueKind};
use prefkit_format::{Format, PlistFormat};
use std::path::{Path, PathBuf};

#[derive(Debug, Default)]
struct SuiteState {
    values: RawDict,
    registered: RawDict,
    dirty: bool,
}

/// A named preference domain
#[derive(Debug)]
pub struct Suite {
    domain: String,
    path: Option<PathBuf>,
    persistence: Persistence,
    state: RwLock<SuiteState>,
}

impl Suite {
    /// A suite that only lives in memory
    pub fn volatile(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            path: None,
            persistence: Persistence::Manual,
            state: RwLock::new(SuiteState::default()),
        }
    }

    /// Open the suite described by `config`, reading its file when present
    pub fn open(config: &SuiteConfig) -> Result<Self> {
        let path = config.file_path();
        let values = read_file(&path)?;
        tracing::debug!(
            "Opened suite '{}' with {} key(s) from {}",
            config.domain,
            values.len(),
            path.display()
        );
        Ok(Self {
            domain: config.domain.clone(),
            path: Some(path),
            persistence: config.persistence,
            state: RwLock::new(SuiteState {
                values,
                ..SuiteState::default()
            }),
        })
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn persistence(&self) -> Persistence {
        self.persistence
    }

    /// Stored value for `key`, falling back to the registration domain
    pub fn object(&self, key: &str) -> Option<RawValue> {
        let state = self.state.read();
        state
            .values
            .get(key)
            .or_else(|| state.registered.get(key))
            .cloned()
    }

    /// Store a value, boxing numbers, or remove it when `value` is `None`
    pub fn set_object(&self, key: &str, value: Option<RawValue>) {
        let result = self.edit(|values| match value {
            Some(value) => {
                values.insert(key.to_owned(), box_value(value));
            }
            None => {
                values.remove(key);
            }
        });
        if let Err(e) = result {
            tracing::warn!("Failed to persist suite '{}' after writing '{}': {}", self.domain, key, e);
        }
    }

    pub fn remove_object(&self, key: &str) {
        self.set_object(key, None);
    }

    /// Remove every stored key; registered defaults stay
    pub fn remove_all(&self) {
        let result = self.edit(|values| {
            tracing::debug!("Clearing {} key(s) from suite", values.len());
            values.clear();
        });
        if let Err(e) = result {
            tracing::warn!("Failed to persist suite '{}' after clearing: {}", self.domain, e);
        }
    }

    /// Keys with a stored value
    pub fn keys(&self) -> Vec<String> {
        self.state.read().values.keys().cloned().collect()
    }

    /// Whether `key` has a stored value; registered defaults do not count
    pub fn has_stored(&self, key: &str) -> bool {
        self.state.read().values.contains_key(key)
    }

    /// Fallback values consulted for absent keys; never persisted
    pub fn register_defaults(&self, defaults: RawDict) {
        let mut state = self.state.write();
        state
            .registered
            .extend(defaults.into_iter().map(|(key, value)| (key, box_value(value))));
    }

    /// Registered defaults overlaid with the stored values
    pub fn dictionary_representation(&self) -> RawDict {
        let state = self.state.read();
        let mut merged = state.registered.clone();
        merged.extend(state.values.iter().map(|(key, value)| (key.clone(), value.clone())));
        merged
    }

    /// Stored values only
    pub fn persistent_domain(&self) -> RawDict {
        self.state.read().values.clone()
    }

    /// Mutate the stored values in one step
    ///
    /// With immediate persistence the file is written once afterwards. The
    /// closure sees values exactly as stored, so anything it inserts should
    /// already be boxed with [`box_value`].
    pub fn edit<R>(&self, f: impl FnOnce(&mut RawDict) -> R) -> Result<R> {
        let mut state = self.state.write();
        let result = f(&mut state.values);
        state.dirty = true;
        if self.persistence == Persistence::Immediate {
            self.persist_locked(&mut state)?;
        }
        Ok(result)
    }

    /// Write pending changes to disk
    pub fn synchronize(&self) -> Result<()> {
        let mut state = self.state.write();
        if !state.dirty {
            return Ok(());
        }
        self.persist_locked(&mut state)
    }

    /// Replace the stored values with the file contents, discarding pending changes
    pub fn reload(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let values = read_file(path)?;
        let mut state = self.state.write();
        state.values = values;
        state.dirty = false;
        tracing::debug!("Reloaded suite '{}' from {}", self.domain, path.display());
        Ok(())
    }

    fn persist_locked(&self, state: &mut SuiteState) -> Result<()> {
        let Some(path) = &self.path else {
            state.dirty = false;
            return Ok(());
        };
        let bytes = PlistFormat.serialize(&state.values)?;
        write_atomic(path, &bytes)?;
        state.dirty = false;
        tracing::debug!("Persisted suite '{}' to {}", self.domain, path.display());
        Ok(())
    }

    /// Value for `key` coerced to `kind`
    ///
    /// Scalar kinds read a present but unconvertible value as zero, `false`
    /// or an empty conversion; object kinds (data, date, array, dictionary)
    /// only read values of their own kind. Absent keys read as `None`.
    pub fn coerced(&self, key: &str, kind: ValueKind) -> Option<RawValue> {
        coerce(&self.object(key)?, kind)
    }

    pub fn integer(&self, key: &str) -> Option<i64> {
        match self.coerced(key, ValueKind::Int)? {
            RawValue::Int(value) => Some(value),
            _ => None,
        }
    }

    pub fn boolean(&self, key: &str) -> Option<bool> {
        match self.coerced(key, ValueKind::Bool)? {
            RawValue::Bool(value) => Some(value),
            _ => None,
        }
    }

    pub fn double(&self, key: &str) -> Option<f64> {
        match self.coerced(key, ValueKind::F64)? {
            RawValue::F64(value) => Some(value),
            _ => None,
        }
    }

    pub fn string(&self, key: &str) -> Option<String> {
        match self.coerced(key, ValueKind::Str)? {
            RawValue::Str(value) => Some(value),
            _ => None,
        }
    }
}

fn read_file(path: &Path) -> Result<RawDict> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(PlistFormat.parse(&bytes)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(RawDict::new()),
        Err(e) => Err(Error::io(path, "read suite", e)),
    }
}

/// Box numbers and booleans the way the suite stores them, recursively
pub fn box_value(value: RawValue) -> RawValue {
    match value {
        RawValue::Int(v) => RawValue::Number(NumberBox::from_i64(v)),
        RawValue::Bool(v) => RawValue::Number(NumberBox::boolean(v)),
        RawValue::F64(v) => RawValue::Number(NumberBox::from_f64(v)),
        RawValue::F32(v) => RawValue::Number(NumberBox::from_f32(v)),
        RawValue::Array(items) => RawValue::Array(items.into_iter().map(box_value).collect()),
        RawValue::Dict(entries) => RawValue::Dict(
            entries
                .into_iter()
                .map(|(key, value)| (key, box_value(value)))
                .collect(),
        ),
        other => other,
    }
}

fn coerce(value: &RawValue, kind: ValueKind) -> Option<RawValue> {
    let coerced = match kind {
        ValueKind::Int => RawValue::Int(integer_of(value)),
        ValueKind::F64 => RawValue::F64(double_of(value)),
        ValueKind::F32 => RawValue::F32(double_of(value) as f32),
        ValueKind::Bool => RawValue::Bool(bool_of(value)),
        ValueKind::Str => match value {
            RawValue::Str(_) => value.clone(),
            RawValue::Number(number) => RawValue::Str(number.to_string()),
            RawValue::Int(v) => RawValue::Str(v.to_string()),
            RawValue::F64(v) => RawValue::Str(v.to_string()),
            RawValue::F32(v) => RawValue::Str(v.to_string()),
            RawValue::Bool(v) => RawValue::Str(i64::from(*v).to_string()),
            _ => return None,
        },
        ValueKind::Bytes => matches!(value, RawValue::Bytes(_)).then(|| value.clone())?,
        ValueKind::Time => matches!(value, RawValue::Time(_)).then(|| value.clone())?,
        ValueKind::List => matches!(value, RawValue::Array(_)).then(|| value.clone())?,
        ValueKind::Map => matches!(value, RawValue::Dict(_)).then(|| value.clone())?,
    };
    Some(coerced)
}

fn integer_of(value: &RawValue) -> i64 {
    match value {
        RawValue::Number(number) => number.as_i64_lossy(),
        RawValue::Int(v) => *v,
        RawValue::Bool(v) => i64::from(*v),
        RawValue::F64(v) => *v as i64,
        RawValue::F32(v) => *v as i64,
        RawValue::Str(text) => {
            let text = text.trim();
            text.parse::<i64>()
                .ok()
                .or_else(|| text.parse::<f64>().ok().map(|v| v as i64))
                .unwrap_or(0)
        }
        _ => 0,
    }
}

fn double_of(value: &RawValue) -> f64 {
    match value {
        RawValue::Number(number) => number.as_f64_lossy(),
        RawValue::Int(v) => *v as f64,
        RawValue::Bool(v) => f64::from(u8::from(*v)),
        RawValue::F64(v) => *v,
        RawValue::F32(v) => f64::from(*v),
        RawValue::Str(text) => text.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

fn bool_of(value: &RawValue) -> bool {
    match value {
        RawValue::Number(number) => number.as_bool_lossy(),
        RawValue::Int(v) => *v != 0,
        RawValue::Bool(v) => *v,
        RawValue::F64(v) => *v != 0.0,
        RawValue::F32(v) => *v != 0.0,
        RawValue::Str(text) => {
            let text = text.trim();
            text.eq_ignore_ascii_case("yes")
                || text.eq_ignore_ascii_case("true")
                || text.parse::<i64>().map(|v| v != 0).unwrap_or(false)
        }
        _ => false,
    }
}
