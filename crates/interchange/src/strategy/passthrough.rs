use super::{ExportStrategy, ImportStrategy};
use crate::errors::Result;
use prefkit_core::RawDict;

/// Hands parsed contents to the store without any conversion
///
/// Number boxes stay boxed; backends unbox them on read.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughImportStrategy;

impl ImportStrategy for PassthroughImportStrategy {
    fn prepare_for_import(&self, contents: RawDict) -> Result<RawDict> {
        Ok(contents)
    }
}

/// Hands store contents to the format without any conversion
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughExportStrategy;

impl ExportStrategy for PassthroughExportStrategy {
    fn prepare_for_export(&self, contents: RawDict) -> Result<RawDict> {
        Ok(contents)
    }
}
