//! Error types for the hosting client.

/// Result type for hosting operations.
pub type HostingResult<T> = Result<T, HostingError>;

/// Hosting API error types.
#[derive(Debug, thiserror::Error)]
pub enum HostingError {
    /// A required argument was empty.
    #[error("{operation} requires {missing}")]
    Validation {
        operation: &'static str,
        missing: &'static str,
    },

    /// The existence check could not be performed.
    #[error("failed to check remote repository {repo}")]
    Check {
        repo: String,
        #[source]
        source: reqwest::Error,
    },

    /// A request could not be sent or its response read.
    #[error("request to {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The provider refused to create the repository.
    #[error("failed to create remote repository {repo}: {status} {message}")]
    Create {
        repo: String,
        status: u16,
        message: String,
    },

    /// The provider refused to delete the repository.
    #[error("failed to delete remote repository {repo}: {status} {message}")]
    Delete {
        repo: String,
        status: u16,
        message: String,
    },

    /// The HTTP client could not be built.
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),
}
