//! Error types for the report vault core library.

use thiserror::Error;

/// Result type alias using the library's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the report vault library.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Archive validation error
    #[error("Archive error: {0}")]
    Archive(#[from] ArchiveError),

    /// Storage error
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Archive validation failures, raised before any network activity.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// File missing or unreadable
    #[error("Cannot read archive {path}: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// File present but not a well-formed zip archive
    #[error("{path} is not a valid zip archive: {message}")]
    Malformed { path: String, message: String },
}

/// Storage-specific errors
#[derive(Error, Debug)]
pub enum StorageError {
    /// The bucket has no lifecycle configuration yet. Expected on first use;
    /// callers treat it as an empty rule set rather than a failure.
    #[error("No lifecycle configuration on bucket")]
    NoLifecycleConfiguration,

    /// Storage backend error
    #[error("Backend error: {0}")]
    Backend(String),
}
