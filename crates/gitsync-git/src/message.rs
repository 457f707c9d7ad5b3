//! Machine-generated commit messages.

use chrono::{DateTime, SecondsFormat, Utc};

/// Message used when `sync` commits local changes.
pub const SERVICE_COMMIT_MESSAGE: &str = "service commit";

/// Returns `Update <timestamp>`, used by `push`.
#[must_use]
pub fn update_message(now: DateTime<Utc>) -> String {
    format!("Update {}", iso8601(now))
}

/// Returns `Created <timestamp>`, used for the commit that creates a branch.
#[must_use]
pub fn created_message(now: DateTime<Utc>) -> String {
    format!("Created {}", iso8601(now))
}

fn iso8601(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}
