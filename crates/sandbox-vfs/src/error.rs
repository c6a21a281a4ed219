//! Error types for the VFS layer.

use serde::{Deserialize, Serialize};

/// Errors from VFS operations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VfsError {
    /// Path not found
    NotFound,

    /// Path already exists
    AlreadyExists,

    /// Not a directory
    NotADirectory,

    /// Not a file
    NotAFile,

    /// Directory not empty
    DirectoryNotEmpty,

    /// The root directory cannot be removed, moved or replaced
    PermissionDenied,

    /// Invalid path for the requested operation
    InvalidPath(String),

    /// Storage backend error
    Storage(String),
}

impl VfsError {
    /// Create an invalid path error with message.
    pub fn invalid_path(msg: impl Into<String>) -> Self {
        Self::InvalidPath(msg.into())
    }

    /// Create a storage error with message.
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Short POSIX-style reason phrase, as printed by shell commands.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::NotFound => "No such file or directory",
            Self::AlreadyExists => "File exists",
            Self::NotADirectory => "Not a directory",
            Self::NotAFile => "Is a directory",
            Self::DirectoryNotEmpty => "Directory not empty",
            Self::PermissionDenied => "Operation not permitted",
            Self::InvalidPath(_) => "Invalid argument",
            Self::Storage(_) => "Input/output error",
        }
    }
}

impl std::fmt::Display for VfsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPath(msg) => write!(f, "invalid path: {}", msg),
            Self::Storage(msg) => write!(f, "storage error: {}", msg),
            other => f.write_str(other.reason()),
        }
    }
}

impl std::error::Error for VfsError {}

/// Errors from the persistence backend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageError {
    /// The backing store could not be reached
    Unavailable(String),

    /// Persisted data could not be encoded or decoded
    Serialization(String),

    /// Writing an entry failed
    Write { key: String, reason: String },
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(msg) => write!(f, "storage unavailable: {}", msg),
            Self::Serialization(msg) => write!(f, "serialization error: {}", msg),
            Self::Write { key, reason } => write!(f, "failed to write '{}': {}", key, reason),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<StorageError> for VfsError {
    fn from(e: StorageError) -> Self {
        VfsError::Storage(e.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::Serialization(e.to_string())
    }
}

/// Result type alias for VFS operations
pub type VfsResult<T> = Result<T, VfsError>;
