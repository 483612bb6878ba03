//! Import and export of whole `prefkit` stores
//!
//! ## Key Components
//!
//! - **`format`**: [`ImportFormat`] and [`ExportFormat`], a format adapter
//!   paired with a strategy
//! - **`strategy`**: passthrough, typed and per-leaf mapping strategies
//! - **`classify`**: [`NumericClassifier`], recovering kinds from number boxes
//! - **`path`**: [`KeyPath`], the location of a leaf handed to strategy hooks
//! - **`ext`**: [`LoadExt`] and [`ExportExt`] on importable and exportable stores
//! - **`init`**: [`Initializable`] stores built from serialized contents
//!
//! ```
//! use prefkit_interchange::{ExportExt, ExportFormat, ImportFormat, LoadExt};
//! use prefkit_storage::{MemoryStorage, StorageBackend, UpdateStrategy};
//!
//! let storage = MemoryStorage::new();
//! storage
//!     .load_str(r#"{"volume": 7}"#, &ImportFormat::json_typed(), &UpdateStrategy::Updating)
//!     .unwrap();
//! assert_eq!(storage.int("volume"), Some(7));
//!
//! let plist = storage.export_string(&ExportFormat::plist()).unwrap();
//! assert!(plist.contains("<integer>7</integer>"));
//! ```

pub mod classify;
pub mod errors;
pub mod ext;
pub mod format;
pub mod init;
pub mod path;
pub mod strategy;

pub use self::{
    classify::{Classified, ClassifyError, NumericClassifier},
    errors::{Error, Result},
    ext::{ExportExt, LoadExt},
    format::{ExportFormat, ImportFormat},
    init::Initializable,
    path::{KeyPath, PathSegment},
    strategy::{
        ExportStrategy, ImportStrategy, MappingExportStrategy, MappingImportStrategy,
        PassthroughExportStrategy, PassthroughImportStrategy, TypedExportStrategy,
        TypedImportStrategy,
    },
};
