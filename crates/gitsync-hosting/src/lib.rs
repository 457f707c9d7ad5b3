//! Hosting provider API client for gitsync.
//!
//! This crate provisions remote repositories:
//! - Existence checks
//! - Creation under an organization
//! - Deletion

mod api;
mod error;
mod github;

pub use api::HostingApi;
pub use error::{HostingError, HostingResult};
pub use github::{CreateRepoRequest, GitHubClient, RepoSettings};
