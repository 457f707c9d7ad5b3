//! Pull command.

use anyhow::Result;
use gitsync_core::SyncWorkflow;

use super::block_on;

/// Runs the pull command.
pub fn run(workflow: &mut SyncWorkflow) -> Result<()> {
    block_on(workflow.pull())??;
    Ok(())
}
