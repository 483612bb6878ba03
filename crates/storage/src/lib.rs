//! Storage backends for `prefkit`
//!
//! ## Key Components
//!
//! - **`backend`**: the [`StorageBackend`] contract and [`StorageExt`] typed access
//! - **`memory`**: [`MemoryStorage`], a lock-guarded in-process map
//! - **`suite`**: [`Suite`], an emulated platform preference domain, and its
//!   backend [`SuiteStorage`]
//! - **`any`**: [`AnyStorage`], a type-erased backend handle
//! - **`merge`**: [`UpdateStrategy`] conflict policies for loading contents
//! - **`schema`**: [`Schema`], registered fields with direct or cached access
//! - **`config`**: [`SuiteConfig`] resolution from defaults, environment and builder

pub mod any;
pub mod backend;
pub mod config;
pub mod errors;
pub mod memory;
pub mod merge;
pub mod persist;
pub mod schema;
pub mod suite;
pub mod suite_storage;

pub use self::{
    any::AnyStorage,
    backend::{Exportable, Importable, StorageBackend, StorageExt},
    config::{Persistence, SuiteConfig, SuiteConfigBuilder},
    errors::{BoxError, Error, Result},
    memory::MemoryStorage,
    merge::{apply_update, UpdatePredicate, UpdateStrategy, ValueUpdate},
    schema::{AccessMode, Schema, SchemaBuilder},
    suite::Suite,
    suite_storage::SuiteStorage,
};
