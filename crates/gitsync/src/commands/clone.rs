//! Clone command.

use anyhow::{Context, Result};
use gitsync_core::SyncWorkflow;

use super::block_on;

/// Runs the clone command.
pub fn run(workflow: &mut SyncWorkflow) -> Result<()> {
    block_on(workflow.clone_or_pull())?.context("failed to clone or pull")?;

    println!("Updated {}", workflow.config().source_dir.display());
    Ok(())
}
