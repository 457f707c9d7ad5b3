//! Deprovision command.

use anyhow::{Context, Result};
use clap::Args;
use gitsync_core::SyncWorkflow;

use super::block_on;

/// Arguments for the deprovision command.
#[derive(Debug, Args)]
pub struct DeprovisionArgs {
    /// Hosting API access token
    #[arg(long, env = "GITSYNC_TOKEN", hide_env_values = true)]
    pub token: String,
}

/// Runs the deprovision command.
pub fn run(workflow: &mut SyncWorkflow, args: &DeprovisionArgs) -> Result<()> {
    let location = workflow.location()?;
    block_on(workflow.deprovision(&args.token))?
        .with_context(|| format!("failed to delete {location}"))?;

    println!("Deleted {location}");
    Ok(())
}
