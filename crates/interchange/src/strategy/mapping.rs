use super::walk::{walk_dict, LeafMapper};
use super::{ExportStrategy, ImportStrategy};
use crate::classify::NumericClassifier;
use crate::errors::{Error, Result};
use crate::path::KeyPath;
use prefkit_core::{NumberBox, RawDict, RawValue, Timestamp};

/// Per-leaf import hooks
///
/// Every hook defaults to keeping the value as it is, except
/// [`import_number`](Self::import_number) which runs the
/// [`NumericClassifier`]. Override only the hooks for the leaves that need
/// translating, matching on the path to target specific fields:
///
/// ```
/// use prefkit_core::RawValue;
/// use prefkit_interchange::{KeyPath, MappingImportStrategy, Result};
///
/// struct Uppercase;
///
/// impl MappingImportStrategy for Uppercase {
///     fn import_string(&self, path: &KeyPath, value: String) -> Result<RawValue> {
///         if path.keys() == ["name"] {
///             return Ok(RawValue::Str(value.to_uppercase()));
///         }
///         Ok(RawValue::Str(value))
///     }
/// }
/// ```
pub trait MappingImportStrategy: Send + Sync {
    /// Leave float boxes untouched instead of picking `F32` or `F64`
    ///
    /// Has no effect when [`import_number`](Self::import_number) is overridden.
    fn type_erase_ambiguous_floats(&self) -> bool {
        false
    }

    fn import_int(&self, _path: &KeyPath, value: i64) -> Result<RawValue> {
        Ok(RawValue::Int(value))
    }

    fn import_string(&self, _path: &KeyPath, value: String) -> Result<RawValue> {
        Ok(RawValue::Str(value))
    }

    fn import_bool(&self, _path: &KeyPath, value: bool) -> Result<RawValue> {
        Ok(RawValue::Bool(value))
    }

    fn import_f64(&self, _path: &KeyPath, value: f64) -> Result<RawValue> {
        Ok(RawValue::F64(value))
    }

    fn import_f32(&self, _path: &KeyPath, value: f32) -> Result<RawValue> {
        Ok(RawValue::F32(value))
    }

    fn import_number(&self, path: &KeyPath, value: NumberBox) -> Result<RawValue> {
        NumericClassifier::new(self.type_erase_ambiguous_floats())
            .classify(&value)
            .map(RawValue::from)
            .map_err(|reason| Error::unplaceable(path, reason))
    }

    fn import_bytes(&self, _path: &KeyPath, value: Vec<u8>) -> Result<RawValue> {
        Ok(RawValue::Bytes(value))
    }

    fn import_time(&self, _path: &KeyPath, value: Timestamp) -> Result<RawValue> {
        Ok(RawValue::Time(value))
    }
}

/// Per-leaf export hooks; every hook defaults to keeping the value
pub trait MappingExportStrategy: Send + Sync {
    fn export_int(&self, _path: &KeyPath, value: i64) -> Result<RawValue> {
        Ok(RawValue::Int(value))
    }

    fn export_string(&self, _path: &KeyPath, value: String) -> Result<RawValue> {
        Ok(RawValue::Str(value))
    }

    fn export_bool(&self, _path: &KeyPath, value: bool) -> Result<RawValue> {
        Ok(RawValue::Bool(value))
    }

    fn export_f64(&self, _path: &KeyPath, value: f64) -> Result<RawValue> {
        Ok(RawValue::F64(value))
    }

    fn export_f32(&self, _path: &KeyPath, value: f32) -> Result<RawValue> {
        Ok(RawValue::F32(value))
    }

    fn export_number(&self, _path: &KeyPath, value: NumberBox) -> Result<RawValue> {
        Ok(RawValue::Number(value))
    }

    fn export_bytes(&self, _path: &KeyPath, value: Vec<u8>) -> Result<RawValue> {
        Ok(RawValue::Bytes(value))
    }

    fn export_time(&self, _path: &KeyPath, value: Timestamp) -> Result<RawValue> {
        Ok(RawValue::Time(value))
    }
}

struct ImportLeaves<'a, S: ?Sized>(&'a S);

impl<S: MappingImportStrategy + ?Sized> LeafMapper for ImportLeaves<'_, S> {
    fn map_leaf(&self, path: &KeyPath, value: RawValue) -> Result<RawValue> {
        match value {
            RawValue::Int(v) => self.0.import_int(path, v),
            RawValue::Str(v) => self.0.import_string(path, v),
            RawValue::Bool(v) => self.0.import_bool(path, v),
            RawValue::F64(v) => self.0.import_f64(path, v),
            RawValue::F32(v) => self.0.import_f32(path, v),
            RawValue::Number(v) => self.0.import_number(path, v),
            RawValue::Bytes(v) => self.0.import_bytes(path, v),
            RawValue::Time(v) => self.0.import_time(path, v),
            container @ (RawValue::Array(_) | RawValue::Dict(_)) => Ok(container),
        }
    }
}

struct ExportLeaves<'a, S: ?Sized>(&'a S);

impl<S: MappingExportStrategy + ?Sized> LeafMapper for ExportLeaves<'_, S> {
    fn map_leaf(&self, path: &KeyPath, value: RawValue) -> Result<RawValue> {
        match value {
            RawValue::Int(v) => self.0.export_int(path, v),
            RawValue::Str(v) => self.0.export_string(path, v),
            RawValue::Bool(v) => self.0.export_bool(path, v),
            RawValue::F64(v) => self.0.export_f64(path, v),
            RawValue::F32(v) => self.0.export_f32(path, v),
            RawValue::Number(v) => self.0.export_number(path, v),
            RawValue::Bytes(v) => self.0.export_bytes(path, v),
            RawValue::Time(v) => self.0.export_time(path, v),
            container @ (RawValue::Array(_) | RawValue::Dict(_)) => Ok(container),
        }
    }
}

impl<S: MappingImportStrategy + ?Sized> ImportStrategy for S {
    fn prepare_for_import(&self, contents: RawDict) -> Result<RawDict> {
        walk_dict(&ImportLeaves(self), &KeyPath::root(), contents)
    }
}

impl<S: MappingExportStrategy + ?Sized> ExportStrategy for S {
    fn prepare_for_export(&self, contents: RawDict) -> Result<RawDict> {
        walk_dict(&ExportLeaves(self), &KeyPath::root(), contents)
    }
}
