//! Error types for migration scaffolding.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// The main error type for scaffolding operations.
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// No migration name was given.
    #[error("'migrationName' is required.")]
    EmptyName,

    /// A target directory could not be provisioned.
    #[error("Failed to create migration directory at {}: {source}", path.display())]
    DirCreateFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A migration artifact could not be persisted.
    #[error("Failed to write {}: {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Config file unreadable or malformed.
    #[error("Configuration error in {}: {message}", path.display())]
    Config { path: PathBuf, message: String },
}

impl ScaffoldError {
    pub fn dir_create(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::DirCreateFailed {
            path: path.into(),
            source,
        }
    }

    pub fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::WriteFailed {
            path: path.into(),
            source,
        }
    }

    pub fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Short machine-readable name of the failure kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::EmptyName => "EmptyName",
            Self::DirCreateFailed { .. } => "DirCreateFailed",
            Self::WriteFailed { .. } => "WriteFailed",
            Self::Config { .. } => "Config",
        }
    }
}

/// Result type alias for scaffolding operations.
pub type ScaffoldResult<T> = Result<T, ScaffoldError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            ScaffoldError::EmptyName.to_string(),
            "'migrationName' is required."
        );

        let err = ScaffoldError::dir_create(
            "migrations/dev",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(
            err.to_string(),
            "Failed to create migration directory at migrations/dev: denied"
        );
        assert_eq!(err.kind(), "DirCreateFailed");
    }

    #[test]
    fn test_write_error_keeps_source() {
        use std::error::Error as _;

        let err = ScaffoldError::write("m/x.js", io::Error::other("disk full"));
        assert_eq!(err.kind(), "WriteFailed");
        assert_eq!(err.source().map(|s| s.to_string()), Some("disk full".into()));
    }
}
