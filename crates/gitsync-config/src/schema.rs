//! Configuration schema.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{ConfigError, ConfigResult, RemoteDescriptor, RemoteSpec};

/// Working directory used when none is configured.
pub const DEFAULT_SOURCE_DIR: &str = "./tmp/engine_db";

/// Hosting API base URL used when none is configured.
pub const DEFAULT_API_HOST: &str = "https://api.github.com";

/// Caller-supplied options, as found in `gitsync.toml` or built in code.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigOptions {
    /// Local working directory.
    #[serde(default)]
    pub source_dir: Option<PathBuf>,

    /// Remote repository.
    #[serde(default)]
    pub remote: Option<RemoteSpec>,

    /// Hosting API base URL.
    #[serde(default)]
    pub api_host: Option<String>,

    /// Tenant owning the working directory.
    #[serde(default)]
    pub tenant_id: Option<String>,

    /// Host the tenant is served from.
    #[serde(default)]
    pub tenant_host: Option<String>,
}

impl ConfigOptions {
    /// Creates options for the given remote.
    #[must_use]
    pub fn new(remote: impl Into<RemoteSpec>) -> Self {
        Self {
            remote: Some(remote.into()),
            ..Self::default()
        }
    }

    /// Sets the working directory.
    #[must_use]
    pub fn source_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.source_dir = Some(dir.into());
        self
    }

    /// Sets the hosting API base URL.
    #[must_use]
    pub fn api_host(mut self, host: impl Into<String>) -> Self {
        self.api_host = Some(host.into());
        self
    }

    /// Sets the tenant identifier.
    #[must_use]
    pub fn tenant_id(mut self, tenant: impl Into<String>) -> Self {
        self.tenant_id = Some(tenant.into());
        self
    }
}

/// Fully resolved workflow configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowConfig {
    /// Absolute path of the local working directory.
    pub source_dir: PathBuf,
    /// Remote kept in sync with the working directory.
    pub remote: RemoteDescriptor,
    /// Hosting API base URL, without a trailing slash.
    pub api_host: String,
    /// Tenant owning the working directory.
    pub tenant_id: Option<String>,
    /// Host the tenant is served from.
    pub tenant_host: Option<String>,
}

impl WorkflowConfig {
    /// Resolves options against `cwd`, filling defaults.
    ///
    /// A relative `source_dir` is joined onto `cwd`; an absolute one is kept.
    ///
    /// # Errors
    ///
    /// Returns an error if no remote URL was supplied.
    pub fn resolve(options: ConfigOptions, cwd: &Path) -> ConfigResult<Self> {
        let remote = options
            .remote
            .ok_or_else(|| ConfigError::Invalid("remote url is required".to_string()))
            .and_then(RemoteDescriptor::from_spec)?;

        let source_dir = options
            .source_dir
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SOURCE_DIR));
        let source_dir = if source_dir.is_absolute() {
            source_dir
        } else {
            cwd.join(source_dir)
        };

        let api_host = options
            .api_host
            .filter(|h| !h.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_HOST.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            source_dir,
            remote,
            api_host,
            tenant_id: options.tenant_id,
            tenant_host: options.tenant_host,
        })
    }

    /// Resolves options against the process's current directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be read or no remote
    /// URL was supplied.
    pub fn from_options(options: ConfigOptions) -> ConfigResult<Self> {
        let cwd = std::env::current_dir()?;
        Self::resolve(options, &cwd)
    }
}
