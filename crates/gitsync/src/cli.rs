//! CLI definition.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// Keep tenant working directories in sync with their Git remotes.
#[derive(Debug, Parser)]
#[command(name = "gitsync")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (defaults to the nearest gitsync.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the working directory from the configuration
    #[arg(long, global = true)]
    pub source_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Provision the remote repository and the local clone
    Init(commands::init::InitArgs),

    /// Pull remote changes, then push local ones
    Sync,

    /// Clone into a new working folder, or pull into an existing one
    Clone,

    /// Initialize, link and push the working folder
    Push,

    /// Not implemented; use `sync` or `clone`
    Pull,

    /// Delete the remote repository
    Deprovision(commands::deprovision::DeprovisionArgs),
}

impl Cli {
    /// Runs the CLI command.
    pub fn run(self) -> Result<()> {
        let mut workflow = commands::load_workflow(self.config.as_deref(), self.source_dir)?;

        match self.command {
            Commands::Init(args) => commands::init::run(&mut workflow, &args),
            Commands::Sync => commands::sync::run(&mut workflow),
            Commands::Clone => commands::clone::run(&mut workflow),
            Commands::Push => commands::push::run(&mut workflow),
            Commands::Pull => commands::pull::run(&mut workflow),
            Commands::Deprovision(args) => commands::deprovision::run(&mut workflow, &args),
        }
    }
}
