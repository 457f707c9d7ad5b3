//! Init command.

use anyhow::{Context, Result};
use clap::Args;
use gitsync_core::SyncWorkflow;

use super::block_on;

/// Arguments for the init command.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Hosting API access token
    #[arg(long, env = "GITSYNC_TOKEN", hide_env_values = true)]
    pub token: String,
}

/// Runs the init command.
pub fn run(workflow: &mut SyncWorkflow, args: &InitArgs) -> Result<()> {
    block_on(workflow.init(&args.token))?.context("failed to provision repository")?;

    println!(
        "Provisioned {} in {}",
        workflow.config().remote.url,
        workflow.config().source_dir.display()
    );
    Ok(())
}
