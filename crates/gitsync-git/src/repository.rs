//! Git working-directory wrapper.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use gitsync_config::RemoteDescriptor;
use tracing::{debug, info};

use crate::{GitOutput, GitResult, GitRunner, GitStep, WorkingTreeStatus};

/// How [`Repository::ensure_remote`] left the remote configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteLink {
    /// The remote did not exist and was added.
    Added,
    /// The remote pointed elsewhere and was repointed.
    Updated,
    /// The remote already pointed at the configured URL.
    Unchanged,
}

/// Result of [`Repository::commit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// A new commit was created.
    Committed,
    /// The index matched `HEAD`; git created nothing.
    NothingToCommit,
}

/// A local working directory driven through the `git` binary.
///
/// Every operation issues exactly one git command, except
/// [`Repository::init`] which also sets `HEAD` and
/// [`Repository::ensure_remote`] which reads the URL before writing it.
#[derive(Clone)]
pub struct Repository {
    workdir: PathBuf,
    runner: Arc<dyn GitRunner>,
}

impl Repository {
    /// Wraps `workdir`; nothing is checked until a command runs.
    #[must_use]
    pub fn new(workdir: impl Into<PathBuf>, runner: Arc<dyn GitRunner>) -> Self {
        Self {
            workdir: workdir.into(),
            runner,
        }
    }

    /// Returns the working directory.
    #[must_use]
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Returns whether repository metadata (`.git`) is present.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.workdir.join(".git").exists()
    }

    async fn run(&self, step: GitStep, args: &[&str]) -> GitResult<GitOutput> {
        self.runner.run(&self.workdir, args).await?.check(step)
    }

    /// Runs `git init` and points `HEAD` at `branch`.
    ///
    /// The first commit lands on `branch` regardless of the host's
    /// `init.defaultBranch`.
    ///
    /// # Errors
    ///
    /// Returns an error if either command fails.
    pub async fn init(&self, branch: &str) -> GitResult<()> {
        info!(workdir = %self.workdir.display(), %branch, "initializing repository");
        self.run(GitStep::Init, &["init"]).await?;

        let head = format!("refs/heads/{branch}");
        self.run(GitStep::Init, &["symbolic-ref", "HEAD", &head])
            .await?;
        Ok(())
    }

    /// Runs `git clone <url> .`.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn clone_from(&self, url: &str) -> GitResult<()> {
        info!(workdir = %self.workdir.display(), %url, "cloning");
        self.run(GitStep::Clone, &["clone", url, "."]).await?;
        Ok(())
    }

    /// Runs `git pull <remote> <branch>`.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn pull(&self, remote: &RemoteDescriptor) -> GitResult<()> {
        info!(workdir = %self.workdir.display(), remote = %remote.name, "pulling");
        self.run(GitStep::Pull, &["pull", &remote.name, &remote.branch])
            .await?;
        Ok(())
    }

    /// Runs `git fetch <remote>`.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn fetch(&self, remote: &RemoteDescriptor) -> GitResult<()> {
        debug!(remote = %remote.name, "fetching");
        self.run(GitStep::Fetch, &["fetch", &remote.name]).await?;
        Ok(())
    }

    /// Returns the configured URL of remote `name`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if git cannot be spawned or fails for any reason
    /// other than a missing key.
    pub async fn remote_url(&self, name: &str) -> GitResult<Option<String>> {
        let key = format!("remote.{name}.url");
        let output = self.runner.run(&self.workdir, &["config", "--get", &key]).await?;

        // exit 1: key not set
        if output.code == Some(1) {
            return Ok(None);
        }

        let output = output.check(GitStep::ConfigGet)?;
        let url = output.stdout.trim();
        Ok((!url.is_empty()).then(|| url.to_string()))
    }

    /// Runs `git remote add <name> <url>`.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn add_remote(&self, remote: &RemoteDescriptor) -> GitResult<()> {
        self.run(GitStep::RemoteAdd, &["remote", "add", &remote.name, &remote.url])
            .await?;
        Ok(())
    }

    /// Runs `git remote set-url <name> <url>`.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn set_remote_url(&self, remote: &RemoteDescriptor) -> GitResult<()> {
        self.run(
            GitStep::RemoteSetUrl,
            &["remote", "set-url", &remote.name, &remote.url],
        )
        .await?;
        Ok(())
    }

    /// Points remote `name` at the configured URL, adding it if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if reading or writing the remote fails.
    pub async fn ensure_remote(&self, remote: &RemoteDescriptor) -> GitResult<RemoteLink> {
        match self.remote_url(&remote.name).await? {
            None => {
                self.add_remote(remote).await?;
                info!(remote = %remote.name, url = %remote.url, "added remote");
                Ok(RemoteLink::Added)
            }
            Some(url) if url != remote.url => {
                self.set_remote_url(remote).await?;
                info!(remote = %remote.name, url = %remote.url, "updated remote url");
                Ok(RemoteLink::Updated)
            }
            Some(_) => Ok(RemoteLink::Unchanged),
        }
    }

    /// Returns whether the remote has the configured branch (`git ls-remote`).
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn branch_exists(&self, remote: &RemoteDescriptor) -> GitResult<bool> {
        let output = self
            .run(GitStep::LsRemote, &["ls-remote", &remote.name, &remote.branch])
            .await?;
        Ok(!output.stdout.trim().is_empty())
    }

    /// Runs `git reset --soft <remote>/<branch>`.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn reset_soft(&self, remote: &RemoteDescriptor) -> GitResult<()> {
        let target = remote.tracking_ref();
        self.run(GitStep::Reset, &["reset", "--soft", &target]).await?;
        Ok(())
    }

    /// Runs `git add --all .`.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn add_all(&self) -> GitResult<()> {
        self.run(GitStep::Add, &["add", "--all", "."]).await?;
        Ok(())
    }

    /// Runs `git commit -m <message>`.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails for any reason other than an
    /// empty change set.
    pub async fn commit(&self, message: &str) -> GitResult<CommitOutcome> {
        let output = self
            .runner
            .run(&self.workdir, &["commit", "-m", message])
            .await?;

        if !output.success() && output.stdout.contains("nothing to commit") {
            debug!("nothing to commit");
            return Ok(CommitOutcome::NothingToCommit);
        }

        output.check(GitStep::Commit)?;
        Ok(CommitOutcome::Committed)
    }

    /// Runs `git push <remote> <branch>`.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn push(&self, remote: &RemoteDescriptor) -> GitResult<()> {
        info!(remote = %remote.name, url = %remote.url, "pushing");
        self.run(GitStep::Push, &["push", &remote.name, &remote.branch])
            .await?;
        Ok(())
    }

    /// Runs `git status` and classifies the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn status(&self) -> GitResult<WorkingTreeStatus> {
        let output = self.run(GitStep::Status, &["status"]).await?;
        Ok(WorkingTreeStatus::parse(&output.stdout))
    }
}
