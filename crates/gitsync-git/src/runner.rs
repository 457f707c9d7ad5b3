//! Process runner for the `git` binary.

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::{GitError, GitResult, GitStep};

/// Captured result of one git invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitOutput {
    /// Exit code, `None` when the process was killed by a signal.
    pub code: Option<i32>,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
}

impl GitOutput {
    /// Creates a successful output with the given stdout.
    #[must_use]
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Creates a failed output with the given exit code and stderr.
    #[must_use]
    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Returns whether the command exited with status 0.
    #[must_use]
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Converts a non-zero exit into a [`GitError::Command`] tagged with `step`.
    ///
    /// # Errors
    ///
    /// Returns an error if the command did not exit with status 0.
    pub fn check(self, step: GitStep) -> GitResult<Self> {
        if self.success() {
            Ok(self)
        } else {
            Err(GitError::Command {
                step,
                code: self.code,
                stderr: self.stderr.trim().to_string(),
            })
        }
    }
}

/// Runs git commands inside a working directory.
#[async_trait]
pub trait GitRunner: Send + Sync {
    /// Runs `git <args>` with `cwd` as the working directory.
    ///
    /// A non-zero exit is not an error at this level; callers decide.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned.
    async fn run(&self, cwd: &Path, args: &[&str]) -> GitResult<GitOutput>;
}

/// Runs the system `git` binary through Tokio.
#[derive(Debug, Clone, Default)]
pub struct SystemGit {
    env: Vec<(String, String)>,
}

impl SystemGit {
    /// Creates a runner with the inherited environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an environment variable passed to every git invocation.
    #[must_use]
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }
}

#[async_trait]
impl GitRunner for SystemGit {
    async fn run(&self, cwd: &Path, args: &[&str]) -> GitResult<GitOutput> {
        let mut cmd = Command::new("git");
        cmd.args(args).current_dir(cwd);

        cmd.env("GIT_TERMINAL_PROMPT", "0");
        // Status and commit output is matched as English text.
        cmd.env("LC_ALL", "C");
        for (k, v) in &self.env {
            cmd.env(k, v);
        }

        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        debug!(cwd = %cwd.display(), ?args, "spawning git");

        let output = cmd.output().await.map_err(GitError::Spawn)?;

        let output = GitOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        debug!(code = ?output.code, "git exited");
        Ok(output)
    }
}
