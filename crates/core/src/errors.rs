use crate::value::ValueKind;

/// Result type alias for value model operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building typed storage values
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A list or map mixed element kinds
    #[error("heterogeneous container: expected every element to be {expected}, found {found}")]
    Heterogeneous { expected: ValueKind, found: ValueKind },

    /// An untyped value has no typed storage representation
    #[error("untyped {kind} value cannot be represented as a storage value")]
    Untyped { kind: &'static str },
}

impl Error {
    /// Create a heterogeneous container error
    #[must_use]
    pub fn heterogeneous(expected: ValueKind, found: ValueKind) -> Self {
        Error::Heterogeneous { expected, found }
    }

    /// Create an untyped value error
    #[must_use]
    pub fn untyped(kind: &'static str) -> Self {
        Error::Untyped { kind }
    }
}
