use std::io;

use thiserror::Error;

/// Library-wide error type for repository tree operations.
#[derive(Debug, Error)]
pub enum TreeError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// Path does not exist at the pinned ref.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Content was requested from a directory.
    #[error("Is a directory: {0}")]
    IsADirectory(String),

    /// Network failure or a response the provider could not interpret.
    #[error("Remote request failed: {message}")]
    Transport { message: String, status: Option<u16> },

    /// Project identifier is invalid.
    #[error("Invalid project identifier '{0}': must be a numeric id or a namespace/name path")]
    InvalidProject(String),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),
}

impl TreeError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        TreeError::Configuration(message.into())
    }

    pub fn transport<S: Into<String>>(message: S, status: Option<u16>) -> Self {
        TreeError::Transport { message: message.into(), status }
    }

    /// Provide an `io::ErrorKind` view for callers that funnel into `std::io`.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            TreeError::Io(err) => err.kind(),
            TreeError::Configuration(_)
            | TreeError::InvalidProject(_)
            | TreeError::TomlParseError(_) => io::ErrorKind::InvalidInput,
            TreeError::NotFound(_) => io::ErrorKind::NotFound,
            TreeError::IsADirectory(_) => io::ErrorKind::IsADirectory,
            TreeError::Transport { .. } => io::ErrorKind::Other,
        }
    }
}

impl From<TreeError> for io::Error {
    fn from(err: TreeError) -> Self {
        match err {
            TreeError::Io(inner) => inner,
            other => io::Error::new(other.kind(), other),
        }
    }
}
