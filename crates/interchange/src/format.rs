//! Format adapters paired with the strategy applied around them

use crate::errors::Result;
use crate::strategy::{
    ExportStrategy, ImportStrategy, PassthroughExportStrategy, PassthroughImportStrategy,
    TypedExportStrategy, TypedImportStrategy,
};
use prefkit_core::RawDict;
use prefkit_format::{Format, JsonFormat, PlistFormat};
use std::fmt;
use std::path::Path;

/// Reads serialized contents into a dictionary ready to merge into a store
pub struct ImportFormat {
    format: Box<dyn Format>,
    strategy: Box<dyn ImportStrategy>,
}

impl ImportFormat {
    pub fn new(format: impl Format + 'static, strategy: impl ImportStrategy + 'static) -> Self {
        Self {
            format: Box::new(format),
            strategy: Box::new(strategy),
        }
    }

    /// JSON has no blob or date kinds, so callers usually supply a strategy
    /// that knows which strings hold them
    pub fn json(strategy: impl ImportStrategy + 'static) -> Self {
        Self::new(JsonFormat::new(), strategy)
    }

    /// JSON with numbers classified and strings left as strings
    #[must_use]
    pub fn json_typed() -> Self {
        Self::json(TypedImportStrategy::new())
    }

    /// Property list contents passed through unchanged
    #[must_use]
    pub fn plist() -> Self {
        Self::plist_with(PassthroughImportStrategy)
    }

    pub fn plist_with(strategy: impl ImportStrategy + 'static) -> Self {
        Self::new(PlistFormat::new(), strategy)
    }

    #[must_use]
    pub fn format_name(&self) -> &'static str {
        self.format.name()
    }

    pub fn read_bytes(&self, bytes: &[u8]) -> Result<RawDict> {
        let parsed = self.format.parse(bytes)?;
        self.prepare(parsed)
    }

    pub fn read_str(&self, text: &str) -> Result<RawDict> {
        let parsed = self.format.parse_str(text)?;
        self.prepare(parsed)
    }

    pub fn read_file(&self, path: &Path) -> Result<RawDict> {
        let parsed = self.format.parse_file(path)?;
        self.prepare(parsed)
    }

    fn prepare(&self, parsed: RawDict) -> Result<RawDict> {
        tracing::debug!(
            "Preparing {} top-level key(s) parsed from {}",
            parsed.len(),
            self.format.name()
        );
        self.strategy.prepare_for_import(parsed)
    }
}

impl fmt::Debug for ImportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImportFormat")
            .field("format", &self.format.name())
            .finish_non_exhaustive()
    }
}

/// Writes a store's contents out in a serialization format
pub struct ExportFormat {
    format: Box<dyn Format>,
    strategy: Box<dyn ExportStrategy>,
}

impl ExportFormat {
    pub fn new(format: impl Format + 'static, strategy: impl ExportStrategy + 'static) -> Self {
        Self {
            format: Box::new(format),
            strategy: Box::new(strategy),
        }
    }

    pub fn json(strategy: impl ExportStrategy + 'static) -> Self {
        Self::new(JsonFormat::new(), strategy)
    }

    /// Indented JSON with blobs and timestamps written as strings
    #[must_use]
    pub fn json_typed() -> Self {
        Self::new(JsonFormat::pretty(), TypedExportStrategy::json_compatible())
    }

    #[must_use]
    pub fn plist() -> Self {
        Self::plist_with(PassthroughExportStrategy)
    }

    pub fn plist_with(strategy: impl ExportStrategy + 'static) -> Self {
        Self::new(PlistFormat::new(), strategy)
    }

    #[must_use]
    pub fn format_name(&self) -> &'static str {
        self.format.name()
    }

    pub fn write_bytes(&self, contents: RawDict) -> Result<Vec<u8>> {
        let prepared = self.strategy.prepare_for_export(contents)?;
        Ok(self.format.serialize(&prepared)?)
    }

    pub fn write_string(&self, contents: RawDict) -> Result<String> {
        let prepared = self.strategy.prepare_for_export(contents)?;
        Ok(self.format.serialize_string(&prepared)?)
    }

    /// Serialize and atomically replace `path`
    pub fn write_file(&self, contents: RawDict, path: &Path) -> Result<()> {
        let bytes = self.write_bytes(contents)?;
        prefkit_storage::persist::write_atomic(path, &bytes)?;
        tracing::debug!("Exported {} to {}", self.format.name(), path.display());
        Ok(())
    }
}

impl fmt::Debug for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExportFormat")
            .field("format", &self.format.name())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use prefkit_core::{NumberBox, RawValue};

    #[test]
    fn test_plist_passthrough_keeps_boxes() {
        let text = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<plist version=\"1.0\"><dict><key>n</key><integer>5</integer></dict></plist>";
        let dict = ImportFormat::plist().read_str(text).unwrap();
        assert_eq!(dict["n"], RawValue::Number(NumberBox::from_i64(5)));
    }

    #[test]
    fn test_json_typed_classifies() {
        let dict = ImportFormat::json_typed()
            .read_str(r#"{"n": 5, "f": 1.5, "b": true}"#)
            .unwrap();
        assert_eq!(dict["n"], RawValue::Int(5));
        assert_eq!(dict["f"], RawValue::F64(1.5));
        assert_eq!(dict["b"], RawValue::Bool(true));
    }

    #[test]
    fn test_parse_errors_surface_as_format_errors() {
        let err = ImportFormat::json_typed().read_str("[1, 2]").unwrap_err();
        assert!(matches!(
            err,
            Error::Format(prefkit_format::Error::InvalidRoot { .. })
        ));
        let err = ImportFormat::json_typed().read_str("{").unwrap_err();
        assert!(matches!(err, Error::Format(prefkit_format::Error::Parse { .. })));
    }

    #[test]
    fn test_json_export_rejects_blobs_without_strategy() {
        let mut dict = RawDict::new();
        dict.insert("blob".into(), RawValue::Bytes(vec![1]));

        let err = ExportFormat::json(PassthroughExportStrategy)
            .write_string(dict.clone())
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Format(prefkit_format::Error::Unrepresentable { .. })
        ));

        let text = ExportFormat::json_typed().write_string(dict).unwrap();
        assert!(text.contains("\"AQ==\""));
    }

    #[test]
    fn test_write_file_replaces_atomically() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("out").join("prefs.plist");
        let mut dict = RawDict::new();
        dict.insert("a".into(), RawValue::Str("x".into()));

        ExportFormat::plist().write_file(dict.clone(), &path).unwrap();
        assert_eq!(ImportFormat::plist().read_file(&path).unwrap(), dict);
    }
}
