//! Strategies translating between store contents and format contents
//!
//! Format adapters only read and write structure. Deciding that a string is
//! really a base64 blob, or that a boxed number is a boolean, is the job of
//! the strategy handed to an [`ImportFormat`](crate::ImportFormat) or
//! [`ExportFormat`](crate::ExportFormat).
//!
//! Strategies come in two layers. [`ImportStrategy`] and [`ExportStrategy`]
//! transform a whole dictionary at once. [`MappingImportStrategy`] and
//! [`MappingExportStrategy`] are per-leaf hooks receiving the leaf's full
//! [`KeyPath`](crate::KeyPath); anything implementing them is a whole
//! dictionary strategy through a recursive walk.

mod mapping;
mod passthrough;
mod typed;
mod walk;

pub use self::mapping::{MappingExportStrategy, MappingImportStrategy};
pub use self::passthrough::{PassthroughExportStrategy, PassthroughImportStrategy};
pub use self::typed::{TypedExportStrategy, TypedImportStrategy};

use crate::errors::Result;
use prefkit_core::RawDict;

/// Prepares parsed contents before they are merged into a store
pub trait ImportStrategy: Send + Sync {
    fn prepare_for_import(&self, contents: RawDict) -> Result<RawDict>;
}

/// Prepares a store's contents before they are serialized
pub trait ExportStrategy: Send + Sync {
    fn prepare_for_export(&self, contents: RawDict) -> Result<RawDict>;
}
