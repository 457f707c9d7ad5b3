//! Push command.

use anyhow::{Context, Result};
use gitsync_core::SyncWorkflow;

use super::block_on;

/// Runs the push command.
pub fn run(workflow: &mut SyncWorkflow) -> Result<()> {
    block_on(workflow.push())?.context("failed to push")?;

    println!("Pushed to {}", workflow.config().remote.url);
    Ok(())
}
