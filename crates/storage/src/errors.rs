use std::path::PathBuf;

/// Result type alias for storage operations
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error returned by user supplied callbacks
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised by storage backends and schemas
///
/// Getters never fail; these only come out of whole-store operations,
/// persistence and configuration.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("storage '{backend}' does not support exporting its contents")]
    ExportUnsupported { backend: String },

    #[error("storage '{backend}' does not support importing contents")]
    ImportUnsupported { backend: String },

    /// The merge predicate failed for a key; later keys were not processed
    #[error("update predicate failed for key '{key}': {source}")]
    Predicate {
        key: String,
        #[source]
        source: BoxError,
    },

    #[error("I/O error during {operation} on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        operation: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Format(#[from] prefkit_format::Error),

    #[error("field '{field}' is registered more than once")]
    DuplicateField { field: String },

    #[error("fields '{existing}' and '{field}' both use storage key '{key}'")]
    DuplicateKey {
        key: String,
        field: String,
        existing: String,
    },

    #[error("invalid configuration: {message}")]
    Config { message: String },
}

impl Error {
    #[must_use]
    pub fn export_unsupported(backend: impl Into<String>) -> Self {
        Error::ExportUnsupported {
            backend: backend.into(),
        }
    }

    #[must_use]
    pub fn import_unsupported(backend: impl Into<String>) -> Self {
        Error::ImportUnsupported {
            backend: backend.into(),
        }
    }

    #[must_use]
    pub fn io(path: impl Into<PathBuf>, operation: &'static str, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            operation,
            source,
        }
    }

    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
        }
    }
}
