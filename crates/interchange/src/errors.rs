use crate::classify::ClassifyError;
use crate::path::KeyPath;

/// Result type alias for import and export operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while moving whole stores in and out of a format
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Format(#[from] prefkit_format::Error),

    #[error(transparent)]
    Storage(#[from] prefkit_storage::Error),

    /// Neither a strategy hook nor the classifier could place a leaf
    #[error("cannot place value at '{path}': {reason}")]
    Unplaceable {
        path: String,
        #[source]
        reason: ClassifyError,
    },

    /// A caller supplied strategy hook rejected a leaf
    #[error("strategy failed at '{path}': {message}")]
    Strategy { path: String, message: String },
}

impl Error {
    #[must_use]
    pub fn unplaceable(path: &KeyPath, reason: ClassifyError) -> Self {
        Error::Unplaceable {
            path: path.to_string(),
            reason,
        }
    }

    #[must_use]
    pub fn strategy(path: &KeyPath, message: impl Into<String>) -> Self {
        Error::Strategy {
            path: path.to_string(),
            message: message.into(),
        }
    }
}
