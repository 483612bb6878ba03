//! Loading into and exporting out of stores through a format

use crate::errors::Result;
use crate::format::{ExportFormat, ImportFormat};
use prefkit_storage::{Exportable, Importable, UpdateStrategy};
use std::collections::BTreeSet;
use std::path::Path;

/// Merge serialized contents into an importable store
///
/// Every method returns the keys whose value actually changed.
pub trait LoadExt: Importable {
    fn load_bytes(
        &self,
        bytes: &[u8],
        format: &ImportFormat,
        update: &UpdateStrategy,
    ) -> Result<BTreeSet<String>> {
        let contents = format.read_bytes(bytes)?;
        Ok(self.load(contents, update)?)
    }

    fn load_str(
        &self,
        text: &str,
        format: &ImportFormat,
        update: &UpdateStrategy,
    ) -> Result<BTreeSet<String>> {
        let contents = format.read_str(text)?;
        Ok(self.load(contents, update)?)
    }

    fn load_file(
        &self,
        path: &Path,
        format: &ImportFormat,
        update: &UpdateStrategy,
    ) -> Result<BTreeSet<String>> {
        let contents = format.read_file(path)?;
        let changed = self.load(contents, update)?;
        tracing::debug!("Loaded {} changed key(s) from {}", changed.len(), path.display());
        Ok(changed)
    }
}

impl<T: Importable + ?Sized> LoadExt for T {}

/// Serialize an exportable store
pub trait ExportExt: Exportable {
    fn export_bytes(&self, format: &ExportFormat) -> Result<Vec<u8>> {
        format.write_bytes(self.export_dictionary()?)
    }

    fn export_string(&self, format: &ExportFormat) -> Result<String> {
        format.write_string(self.export_dictionary()?)
    }

    fn export_file(&self, path: &Path, format: &ExportFormat) -> Result<()> {
        format.write_file(self.export_dictionary()?, path)
    }
}

impl<T: Exportable + ?Sized> ExportExt for T {}
