//! Configuration for gitsync.
//!
//! This crate resolves the remote descriptor and workflow options, either
//! programmatically or from a `gitsync.toml` file.

mod error;
mod loader;
mod remote;
mod schema;

pub use error::{ConfigError, ConfigResult};
pub use loader::{CONFIG_FILE_NAME, find_and_load_config, find_and_load_config_from, load_config};
pub use remote::{DEFAULT_BRANCH, DEFAULT_REMOTE_NAME, RemoteDescriptor, RemoteLocation, RemoteSpec};
pub use schema::{ConfigOptions, DEFAULT_API_HOST, DEFAULT_SOURCE_DIR, WorkflowConfig};
