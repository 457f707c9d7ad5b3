//! Working-tree status classification.

/// What `git status` says about the working tree relative to the remote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkingTreeStatus {
    /// No local changes and nothing to push.
    Clean,
    /// No local changes, but commits not yet pushed.
    Ahead,
    /// Uncommitted local changes.
    Dirty,
}

const CLEAN_MARKERS: [&str; 2] = [
    "nothing to commit, working directory clean",
    "nothing to commit, working tree clean",
];

const AHEAD_MARKER: &str = "Your branch is ahead of";

impl WorkingTreeStatus {
    /// Classifies the human-readable output of `git status`.
    #[must_use]
    pub fn parse(output: &str) -> Self {
        let clean = CLEAN_MARKERS.iter().any(|m| output.contains(m));

        if !clean {
            Self::Dirty
        } else if output.contains(AHEAD_MARKER) {
            Self::Ahead
        } else {
            Self::Clean
        }
    }
}
