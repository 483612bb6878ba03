use super::mapping::{MappingExportStrategy, MappingImportStrategy};
use crate::errors::Result;
use crate::path::KeyPath;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use prefkit_core::codec::Iso8601;
use prefkit_core::{RawValue, Timestamp};

/// Classifies every number box and keeps all other leaves
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TypedImportStrategy {
    pub type_erase_ambiguous_floats: bool,
}

impl TypedImportStrategy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep float boxes as they were parsed
    #[must_use]
    pub fn type_erasing_floats() -> Self {
        Self {
            type_erase_ambiguous_floats: true,
        }
    }
}

impl MappingImportStrategy for TypedImportStrategy {
    fn type_erase_ambiguous_floats(&self) -> bool {
        self.type_erase_ambiguous_floats
    }
}

/// Rewrites the leaves a target format cannot hold
///
/// With nothing enabled every leaf is kept, which suits property lists.
/// [`json_compatible`](Self::json_compatible) turns blobs into standard
/// base64 strings and timestamps into ISO-8601 strings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TypedExportStrategy {
    pub blobs_as_base64: bool,
    pub times_as_iso8601: bool,
}

impl TypedExportStrategy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn json_compatible() -> Self {
        Self {
            blobs_as_base64: true,
            times_as_iso8601: true,
        }
    }

    #[must_use]
    pub fn blobs_as_base64(mut self, enabled: bool) -> Self {
        self.blobs_as_base64 = enabled;
        self
    }

    #[must_use]
    pub fn times_as_iso8601(mut self, enabled: bool) -> Self {
        self.times_as_iso8601 = enabled;
        self
    }
}

impl MappingExportStrategy for TypedExportStrategy {
    fn export_bytes(&self, _path: &KeyPath, value: Vec<u8>) -> Result<RawValue> {
        if self.blobs_as_base64 {
            return Ok(RawValue::Str(STANDARD.encode(value)));
        }
        Ok(RawValue::Bytes(value))
    }

    fn export_time(&self, _path: &KeyPath, value: Timestamp) -> Result<RawValue> {
        if self.times_as_iso8601 {
            return Ok(RawValue::Str(Iso8601::format(&value)));
        }
        Ok(RawValue::Time(value))
    }
}
