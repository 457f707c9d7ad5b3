//! Repository synchronization workflow.

use std::sync::Arc;

use chrono::Utc;
use gitsync_config::{RemoteLocation, WorkflowConfig};
use gitsync_git::{GitRunner, Repository, SERVICE_COMMIT_MESSAGE, SystemGit, WorkingTreeStatus};
use gitsync_hosting::{GitHubClient, HostingApi};
use tracing::{debug, info};

use crate::push::PushSequence;
use crate::{WorkflowError, WorkflowResult, ensure_working_folder};

/// Keeps one working directory and its remote repository in agreement.
///
/// Every operation takes `&mut self`: git working trees have no locking, so
/// operations on one instance must not overlap. Two instances pointed at the
/// same directory are not coordinated.
pub struct SyncWorkflow {
    config: WorkflowConfig,
    repo: Repository,
    hosting: Arc<dyn HostingApi>,
    provisioned: bool,
}

impl SyncWorkflow {
    /// Creates a workflow using the given git runner and hosting API.
    #[must_use]
    pub fn new(
        config: WorkflowConfig,
        git: Arc<dyn GitRunner>,
        hosting: Arc<dyn HostingApi>,
    ) -> Self {
        let repo = Repository::new(config.source_dir.clone(), git);
        Self {
            config,
            repo,
            hosting,
            provisioned: false,
        }
    }

    /// Creates a workflow using the system `git` and a GitHub client for
    /// the configured API host.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_defaults(config: WorkflowConfig) -> WorkflowResult<Self> {
        let hosting = GitHubClient::new(config.api_host.clone()).map_err(WorkflowError::Hosting)?;
        Ok(Self::new(config, Arc::new(SystemGit::new()), Arc::new(hosting)))
    }

    /// Returns the resolved configuration.
    #[must_use]
    pub fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    /// Returns whether `init` has completed on this instance.
    #[must_use]
    pub fn is_provisioned(&self) -> bool {
        self.provisioned
    }

    /// Returns the remote's organization and repository on the hosting provider.
    ///
    /// # Errors
    ///
    /// Returns an error if the remote URL does not name an organization and
    /// repository.
    pub fn location(&self) -> WorkflowResult<RemoteLocation> {
        self.config
            .remote
            .location()
            .map_err(|e| WorkflowError::Validation(e.to_string()))
    }

    fn tenant(&self) -> &str {
        self.config.tenant_id.as_deref().unwrap_or_default()
    }

    /// Provisions the remote repository and the local clone, once per instance.
    ///
    /// Creates the remote when it does not exist, then clones into a new
    /// folder (or after creating the remote) and pulls otherwise. A remote
    /// created here is left in place if a later step fails.
    ///
    /// # Errors
    ///
    /// Returns the first failing step's error.
    pub async fn init(&mut self, access_token: &str) -> WorkflowResult<()> {
        if self.provisioned {
            debug!(tenant = self.tenant(), "already provisioned");
            return Ok(());
        }

        let location = self.location()?;
        require_token(access_token)?;

        let exists = self
            .hosting
            .exists_remote_repo(&location.organization, &location.repository)
            .await
            .map_err(WorkflowError::RemoteCheck)?;

        let created_remote = if exists {
            false
        } else {
            info!(tenant = self.tenant(), repo = %location, "remote repository missing, creating it");
            self.hosting
                .create_remote_repo(&location.organization, &location.repository, access_token)
                .await
                .map_err(WorkflowError::RemoteCreate)?;
            true
        };

        let created_folder = ensure_working_folder(&self.config.source_dir).await?;

        if created_folder || created_remote {
            self.repo.clone_from(&self.config.remote.url).await?;
        } else {
            self.repo.pull(&self.config.remote).await?;
        }

        self.provisioned = true;
        info!(tenant = self.tenant(), repo = %location, "provisioned");
        Ok(())
    }

    /// Pulls remote changes, then pushes local ones.
    ///
    /// Progress made before a failure (a completed pull, a local commit) is
    /// kept.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Sync`] wrapping the failing step's error.
    pub async fn sync(&mut self) -> WorkflowResult<()> {
        self.sync_steps()
            .await
            .map_err(|e| WorkflowError::Sync(Box::new(e)))
    }

    async fn sync_steps(&self) -> WorkflowResult<()> {
        self.sync_from_remote().await?;

        match self.repo.status().await? {
            WorkingTreeStatus::Clean => {
                debug!(tenant = self.tenant(), "nothing to sync");
            }
            WorkingTreeStatus::Ahead => {
                self.repo.push(&self.config.remote).await?;
            }
            WorkingTreeStatus::Dirty => {
                self.repo.add_all().await?;
                self.repo.commit(SERVICE_COMMIT_MESSAGE).await?;
                self.repo.push(&self.config.remote).await?;
            }
        }

        Ok(())
    }

    async fn sync_from_remote(&self) -> WorkflowResult<()> {
        if ensure_working_folder(&self.config.source_dir).await? {
            self.repo.clone_from(&self.config.remote.url).await?;
        } else {
            self.repo.pull(&self.config.remote).await?;
        }
        Ok(())
    }

    /// Ensures the working folder exists, then clones into it if it was just
    /// created or pulls otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the folder cannot be created or git fails.
    pub async fn clone_or_pull(&mut self) -> WorkflowResult<()> {
        self.sync_from_remote().await
    }

    /// Initializes, links and pushes the working folder to the remote branch.
    ///
    /// # Errors
    ///
    /// Returns the first failing step's error.
    pub async fn push(&mut self) -> WorkflowResult<()> {
        ensure_working_folder(&self.config.source_dir).await?;

        let stage = PushSequence::new(&self.repo, &self.config.remote, Utc::now())
            .run()
            .await?;

        info!(tenant = self.tenant(), %stage, "push complete");
        Ok(())
    }

    /// Not provided; use [`SyncWorkflow::clone_or_pull`] or [`SyncWorkflow::sync`].
    ///
    /// # Errors
    ///
    /// Always returns [`WorkflowError::NotImplemented`].
    #[allow(clippy::unused_async)]
    pub async fn pull(&mut self) -> WorkflowResult<()> {
        Err(WorkflowError::NotImplemented("pull"))
    }

    /// Deletes the remote repository. The working folder is left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the remote URL has no hosting location, the token
    /// is empty, or the hosting API refuses.
    pub async fn deprovision(&mut self, access_token: &str) -> WorkflowResult<()> {
        let location = self.location()?;
        require_token(access_token)?;

        self.hosting
            .delete_remote_repo(&location.organization, &location.repository, access_token)
            .await
            .map_err(WorkflowError::RemoteDelete)?;

        info!(tenant = self.tenant(), repo = %location, "deprovisioned");
        Ok(())
    }
}

fn require_token(access_token: &str) -> WorkflowResult<()> {
    if access_token.trim().is_empty() {
        return Err(WorkflowError::Validation(
            "an access token is required".to_string(),
        ));
    }
    Ok(())
}
