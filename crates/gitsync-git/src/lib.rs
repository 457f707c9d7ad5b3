//! Git command layer for gitsync.
//!
//! This crate shells out to the system `git` binary:
//! - Process spawning behind the [`GitRunner`] trait
//! - Typed single-command repository operations
//! - Working-tree status classification and commit messages

mod error;
mod message;
mod repository;
mod runner;
mod status;

pub use error::{GitError, GitResult, GitStep};
pub use message::{SERVICE_COMMIT_MESSAGE, created_message, update_message};
pub use repository::{CommitOutcome, RemoteLink, Repository};
pub use runner::{GitOutput, GitRunner, SystemGit};
pub use status::WorkingTreeStatus;
