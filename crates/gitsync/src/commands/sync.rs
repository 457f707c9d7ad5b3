//! Sync command.

use anyhow::Result;
use gitsync_core::SyncWorkflow;

use super::block_on;

/// Runs the sync command.
pub fn run(workflow: &mut SyncWorkflow) -> Result<()> {
    block_on(workflow.sync())??;

    println!("Synchronized {}", workflow.config().source_dir.display());
    Ok(())
}
