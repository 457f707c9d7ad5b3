//! Workflow error types.

use std::path::PathBuf;

use thiserror::Error;

/// Workflow-related errors.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// A required argument was missing; raised before any I/O.
    #[error("invalid argument: {0}")]
    Validation(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] gitsync_config::ConfigError),

    /// The hosting API client could not be set up.
    #[error("hosting API client error")]
    Hosting(#[source] gitsync_hosting::HostingError),

    /// The existence check against the hosting API failed.
    #[error("failed to check whether the remote repository exists")]
    RemoteCheck(#[source] gitsync_hosting::HostingError),

    /// The hosting API did not create the remote repository.
    #[error("failed to create the remote repository")]
    RemoteCreate(#[source] gitsync_hosting::HostingError),

    /// The hosting API did not delete the remote repository.
    #[error("failed to delete the remote repository")]
    RemoteDelete(#[source] gitsync_hosting::HostingError),

    /// The working folder could not be created.
    #[error("failed to create working folder {path}")]
    LocalFolder {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A git command failed.
    #[error("git error: {0}")]
    Git(#[from] gitsync_git::GitError),

    /// `sync` failed; wraps the step that failed.
    #[error("sync failed: {0}")]
    Sync(#[source] Box<WorkflowError>),

    /// The operation is deliberately not provided.
    #[error("{0} is not implemented")]
    NotImplemented(&'static str),
}

impl WorkflowError {
    /// Returns the git error at the root of this error, if any.
    #[must_use]
    pub fn git_error(&self) -> Option<&gitsync_git::GitError> {
        match self {
            Self::Git(err) => Some(err),
            Self::Sync(inner) => inner.git_error(),
            _ => None,
        }
    }
}

/// Result type for workflow operations.
pub type WorkflowResult<T> = Result<T, WorkflowError>;
