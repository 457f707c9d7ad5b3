//! Git error types.

use std::fmt;

use thiserror::Error;

/// A single git command issued by gitsync.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GitStep {
    Init,
    Clone,
    Pull,
    Fetch,
    RemoteAdd,
    RemoteSetUrl,
    ConfigGet,
    LsRemote,
    Reset,
    Add,
    Commit,
    Push,
    Status,
}

impl GitStep {
    /// Returns the command line as a user would type it.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Init => "git init",
            Self::Clone => "git clone",
            Self::Pull => "git pull",
            Self::Fetch => "git fetch",
            Self::RemoteAdd => "git remote add",
            Self::RemoteSetUrl => "git remote set-url",
            Self::ConfigGet => "git config --get",
            Self::LsRemote => "git ls-remote",
            Self::Reset => "git reset --soft",
            Self::Add => "git add --all",
            Self::Commit => "git commit",
            Self::Push => "git push",
            Self::Status => "git status",
        }
    }
}

impl fmt::Display for GitStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Git-related errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// The git binary could not be started.
    #[error("failed to spawn git")]
    Spawn(#[source] std::io::Error),

    /// A git command exited with a non-zero status.
    #[error("{step} failed ({}): {stderr}", exit_code(.code.as_ref()))]
    Command {
        step: GitStep,
        code: Option<i32>,
        stderr: String,
    },
}

impl GitError {
    /// Returns the failed step, if the error came from a git command.
    #[must_use]
    pub fn step(&self) -> Option<GitStep> {
        match self {
            Self::Command { step, .. } => Some(*step),
            _ => None,
        }
    }
}

fn exit_code(code: Option<&i32>) -> String {
    code.map_or_else(|| "killed by signal".to_string(), |c| format!("exit code {c}"))
}

/// Result type for git operations.
pub type GitResult<T> = Result<T, GitError>;
