//! Building stores straight from serialized contents

use crate::errors::Result;
use crate::format::ImportFormat;
use prefkit_storage::MemoryStorage;
use std::path::Path;

/// Stores that can start out from an import
pub trait Initializable: Sized {
    fn from_bytes(bytes: &[u8], format: &ImportFormat) -> Result<Self>;

    fn from_string(text: &str, format: &ImportFormat) -> Result<Self>;

    fn from_file(path: &Path, format: &ImportFormat) -> Result<Self>;
}

impl Initializable for MemoryStorage {
    fn from_bytes(bytes: &[u8], format: &ImportFormat) -> Result<Self> {
        Ok(MemoryStorage::with_contents(format.read_bytes(bytes)?))
    }

    fn from_string(text: &str, format: &ImportFormat) -> Result<Self> {
        Ok(MemoryStorage::with_contents(format.read_str(text)?))
    }

    fn from_file(path: &Path, format: &ImportFormat) -> Result<Self> {
        Ok(MemoryStorage::with_contents(format.read_file(path)?))
    }
}
