use std::path::PathBuf;

/// Result type alias for format adapters
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while parsing or serializing a serialized dictionary
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Source bytes are not well-formed for the format
    #[error("malformed {format} input: {message}")]
    Parse {
        format: &'static str,
        message: String,
    },

    /// Source parsed, but its root is not a dictionary
    #[error("{format} root must be a dictionary, found {found}")]
    InvalidRoot {
        format: &'static str,
        found: &'static str,
    },

    /// A value the format has no representation for
    #[error("{format} cannot represent the {kind} value at '{path}'")]
    Unrepresentable {
        format: &'static str,
        path: String,
        kind: &'static str,
    },

    #[error("input is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("I/O error during {operation} on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        operation: &'static str,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    #[must_use]
    pub fn parse(format: &'static str, message: impl Into<String>) -> Self {
        Error::Parse {
            format,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn invalid_root(format: &'static str, found: &'static str) -> Self {
        Error::InvalidRoot { format, found }
    }

    #[must_use]
    pub fn unrepresentable(format: &'static str, path: impl Into<String>, kind: &'static str) -> Self {
        Error::Unrepresentable {
            format,
            path: path.into(),
            kind,
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
}
