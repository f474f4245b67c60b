//! Error types for rpsl-resolve

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the command line layer.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO error on a named file
    #[error("IO error on {}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error on stdin/stdout
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// No emitter with this name
    #[error("Unknown emitter '{0}'")]
    UnknownEmitter(String),

    /// Argument not accepted by the selected emitter
    #[error("Emitter {emitter} does not accept argument '{argument}': {reason}")]
    InvalidEmitterArgument {
        emitter: &'static str,
        argument: String,
        reason: String,
    },

    /// Output serialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ResolveError {
    /// Creates a file IO error.
    pub fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::File {
            path: path.into(),
            source,
        }
    }

    /// Creates an invalid emitter argument error.
    pub fn invalid_argument(
        emitter: &'static str,
        argument: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidEmitterArgument {
            emitter,
            argument: argument.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for rpsl-resolve operations
pub type Result<T> = std::result::Result<T, ResolveError>;
