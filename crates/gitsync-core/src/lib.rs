//! Repository synchronization workflow for gitsync.
//!
//! This crate keeps a tenant's working directory and its remote repository
//! in agreement, provisioning the remote through the hosting API when needed.

mod error;
mod folder;
mod push;
mod workflow;

#[cfg(test)]
mod test_support;

pub use error::{WorkflowError, WorkflowResult};
pub use folder::ensure_working_folder;
pub use push::PushStage;
pub use workflow::SyncWorkflow;
