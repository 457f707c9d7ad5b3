//! Test doubles for the git runner and the hosting API.

use std::collections::{HashMap, VecDeque};
use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use gitsync_git::{GitOutput, GitResult, GitRunner};
use gitsync_hosting::{HostingApi, HostingError, HostingResult};

/// Git runner answering from a script keyed by subcommand.
///
/// Unscripted commands succeed with empty output. Scripted answers are
/// consumed in order; the last one for a subcommand is repeated.
#[derive(Default)]
pub(crate) struct ScriptedGit {
    responses: Mutex<HashMap<String, VecDeque<GitOutput>>>,
    commands: Mutex<Vec<String>>,
}

impl ScriptedGit {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(&self, subcommand: &str, output: GitOutput) {
        self.responses
            .lock()
            .unwrap()
            .entry(subcommand.to_string())
            .or_default()
            .push_back(output);
    }

    /// Every command run so far, as `args.join(" ")`.
    pub(crate) fn commands(&self) -> Vec<String> {
        self.commands.lock().unwrap().clone()
    }
}

#[async_trait]
impl GitRunner for ScriptedGit {
    async fn run(&self, _cwd: &Path, args: &[&str]) -> GitResult<GitOutput> {
        self.commands.lock().unwrap().push(args.join(" "));

        let mut responses = self.responses.lock().unwrap();
        let output = match responses.get_mut(args[0]) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) => queue.front().cloned().unwrap_or_default(),
            None => GitOutput::ok(""),
        };
        Ok(output)
    }
}

/// Hosting API double recording every call.
#[derive(Default)]
pub(crate) struct RecordingHosting {
    pub(crate) exists: bool,
    pub(crate) fail_check: bool,
    pub(crate) fail_create: bool,
    pub(crate) fail_delete: bool,
    pub(crate) calls: Mutex<Vec<String>>,
}

impl RecordingHosting {
    pub(crate) fn existing() -> Self {
        Self {
            exists: true,
            ..Self::default()
        }
    }

    pub(crate) fn missing() -> Self {
        Self::default()
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl HostingApi for RecordingHosting {
    async fn exists_remote_repo(
        &self,
        organization: &str,
        repository: &str,
    ) -> HostingResult<bool> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("exists {organization}/{repository}"));
        if self.fail_check {
            return Err(HostingError::Validation {
                operation: "existence check",
                missing: "a reachable API",
            });
        }
        Ok(self.exists)
    }

    async fn create_remote_repo(
        &self,
        organization: &str,
        repository: &str,
        access_token: &str,
    ) -> HostingResult<()> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("create {organization}/{repository} {access_token}"));
        if self.fail_create {
            return Err(HostingError::Create {
                repo: format!("{organization}/{repository}"),
                status: 422,
                message: "Repository creation failed.".to_string(),
            });
        }
        Ok(())
    }

    async fn delete_remote_repo(
        &self,
        organization: &str,
        repository: &str,
        access_token: &str,
    ) -> HostingResult<()> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("delete {organization}/{repository} {access_token}"));
        if self.fail_delete {
            return Err(HostingError::Delete {
                repo: format!("{organization}/{repository}"),
                status: 403,
                message: "Must have admin rights to Repository.".to_string(),
            });
        }
        Ok(())
    }
}
