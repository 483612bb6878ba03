//! Format adapters for serialized preference dictionaries
//!
//! An adapter only moves between bytes and a nested [`RawDict`]. It never
//! decides what kind a value "really" is: numbers come back as
//! [`NumberBox`](prefkit_core::NumberBox)es and are left for an import
//! strategy to classify.

pub mod errors;
mod json;
mod path;
mod plist;

pub use self::errors::{Error, Result};
pub use self::json::JsonFormat;
pub use self::plist::PlistFormat;

use prefkit_core::RawDict;
use std::path::Path;

/// Parse and serialize a whole dictionary in one serialization format
pub trait Format: Send + Sync {
    /// Short format name used in diagnostics
    fn name(&self) -> &'static str;

    fn parse(&self, bytes: &[u8]) -> Result<RawDict>;

    fn serialize(&self, dict: &RawDict) -> Result<Vec<u8>>;

    fn parse_str(&self, text: &str) -> Result<RawDict> {
        self.parse(text.as_bytes())
    }

    fn serialize_string(&self, dict: &RawDict) -> Result<String> {
        let bytes = self.serialize(dict)?;
        String::from_utf8(bytes).map_err(|e| Error::Utf8(e.utf8_error()))
    }

    fn parse_file(&self, path: &Path) -> Result<RawDict> {
        let bytes = std::fs::read(path).map_err(|e| Error::io(path, "read", e))?;
        tracing::debug!("Parsing {} bytes of {} from {}", bytes.len(), self.name(), path.display());
        self.parse(&bytes)
    }
}

impl<F: Format + ?Sized> Format for Box<F> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn parse(&self, bytes: &[u8]) -> Result<RawDict> {
        (**self).parse(bytes)
    }

    fn serialize(&self, dict: &RawDict) -> Result<Vec<u8>> {
        (**self).serialize(dict)
    }
}
