//! Bootstrap-and-push sequence.

use std::fmt;

use chrono::{DateTime, Utc};
use gitsync_config::RemoteDescriptor;
use gitsync_git::{CommitOutcome, Repository, created_message, update_message};
use tracing::{debug, info};

use crate::WorkflowResult;

/// Position in the push sequence.
///
/// Each stage names what has been achieved; advancing from a stage runs
/// exactly one step. Any failure ends the sequence at the current stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushStage {
    NoRepo,
    Initialized,
    RemoteLinked,
    BranchEnsured,
    Fetched,
    Reset,
    Staged,
    Committed,
    Pushed,
}

impl fmt::Display for PushStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NoRepo => "no-repo",
            Self::Initialized => "initialized",
            Self::RemoteLinked => "remote-linked",
            Self::BranchEnsured => "branch-ensured",
            Self::Fetched => "fetched",
            Self::Reset => "reset",
            Self::Staged => "staged",
            Self::Committed => "committed",
            Self::Pushed => "pushed",
        };
        f.write_str(name)
    }
}

/// Drives a working directory from [`PushStage::NoRepo`] to [`PushStage::Pushed`].
pub(crate) struct PushSequence<'a> {
    repo: &'a Repository,
    remote: &'a RemoteDescriptor,
    now: DateTime<Utc>,
}

impl<'a> PushSequence<'a> {
    pub(crate) fn new(repo: &'a Repository, remote: &'a RemoteDescriptor, now: DateTime<Utc>) -> Self {
        Self { repo, remote, now }
    }

    /// Runs every remaining stage and returns the final one.
    pub(crate) async fn run(&self) -> WorkflowResult<PushStage> {
        let mut stage = PushStage::NoRepo;
        while stage != PushStage::Pushed {
            let next = self.advance(stage).await?;
            debug!(from = %stage, to = %next, "push stage");
            stage = next;
        }
        Ok(stage)
    }

    async fn advance(&self, stage: PushStage) -> WorkflowResult<PushStage> {
        let next = match stage {
            PushStage::NoRepo => {
                if !self.repo.is_initialized() {
                    self.repo.init(&self.remote.branch).await?;
                }
                PushStage::Initialized
            }
            PushStage::Initialized => {
                self.repo.ensure_remote(self.remote).await?;
                PushStage::RemoteLinked
            }
            PushStage::RemoteLinked => {
                if self.repo.branch_exists(self.remote).await? {
                    PushStage::BranchEnsured
                } else {
                    // The initial push delivers the whole working tree.
                    self.create_branch().await?;
                    PushStage::Pushed
                }
            }
            PushStage::BranchEnsured => {
                self.repo.fetch(self.remote).await?;
                PushStage::Fetched
            }
            PushStage::Fetched => {
                self.repo.reset_soft(self.remote).await?;
                PushStage::Reset
            }
            PushStage::Reset => {
                self.repo.add_all().await?;
                PushStage::Staged
            }
            PushStage::Staged => {
                if self.repo.commit(&update_message(self.now)).await?
                    == CommitOutcome::NothingToCommit
                {
                    debug!("no local changes since the remote tip");
                }
                PushStage::Committed
            }
            PushStage::Committed => {
                self.repo.push(self.remote).await?;
                PushStage::Pushed
            }
            PushStage::Pushed => PushStage::Pushed,
        };
        Ok(next)
    }

    async fn create_branch(&self) -> WorkflowResult<()> {
        info!(branch = %self.remote.branch, "remote branch missing, creating it");
        self.repo.add_all().await?;
        self.repo.commit(&created_message(self.now)).await?;
        self.repo.push(self.remote).await?;
        Ok(())
    }
}
