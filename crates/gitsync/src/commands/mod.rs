//! Command implementations.

use std::future::Future;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use gitsync_config::{WorkflowConfig, find_and_load_config, load_config};
use gitsync_core::SyncWorkflow;
use tracing::debug;

pub mod clone;
pub mod deprovision;
pub mod init;
pub mod pull;
pub mod push;
pub mod sync;

/// Builds the workflow from the configuration file and CLI overrides.
pub fn load_workflow(config: Option<&Path>, source_dir: Option<PathBuf>) -> Result<SyncWorkflow> {
    let mut options = match config {
        Some(path) => {
            load_config(path).with_context(|| format!("failed to load {}", path.display()))?
        }
        None => find_and_load_config().context("failed to find gitsync.toml")?,
    };

    if source_dir.is_some() {
        options.source_dir = source_dir;
    }

    let config = WorkflowConfig::from_options(options).context("invalid configuration")?;
    debug!(
        source_dir = %config.source_dir.display(),
        remote = %config.remote.url,
        "configuration resolved"
    );
    SyncWorkflow::with_defaults(config).context("failed to set up workflow")
}

/// Runs a workflow future to completion on a fresh runtime.
pub fn block_on<F: Future>(future: F) -> Result<F::Output> {
    let rt = tokio::runtime::Runtime::new().context("failed to create async runtime")?;
    Ok(rt.block_on(future))
}
