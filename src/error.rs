use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for git-release operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("not a git repository (or any parent): {}", .path.display())]
    NotARepository { path: PathBuf },

    #[error("HEAD does not point at a named branch")]
    DetachedHead,

    #[error("remote '{name}' is not configured in this repository")]
    RemoteNotConfigured { name: String },

    #[error("tag '{name}' already exists")]
    TagAlreadyExists { name: String },

    #[error("cannot create an annotated tag: no tagger identity from flags or git config")]
    MissingIdentity,

    #[error("remote '{remote}' rejected tag '{name}': {reason}")]
    RemoteTagConflict {
        name: String,
        remote: String,
        reason: String,
    },

    #[error("failed to push tag '{name}' to '{remote}': {reason}")]
    PushFailed {
        name: String,
        remote: String,
        reason: String,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("internal error: {0}")]
    Internal(String),

    #[error("git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-release
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }

    /// Create an internal error with context
    pub fn internal(msg: impl Into<String>) -> Self {
        ReleaseError::Internal(msg.into())
    }

    /// True for errors raised after the local tag already exists, i.e. the
    /// release was created but not distributed.
    pub fn is_push_failure(&self) -> bool {
        matches!(
            self,
            ReleaseError::PushFailed { .. } | ReleaseError::RemoteTagConflict { .. }
        )
    }
}
