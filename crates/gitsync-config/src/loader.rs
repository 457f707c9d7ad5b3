//! Configuration loader.

use std::path::Path;

use tracing::debug;

use crate::{ConfigError, ConfigOptions, ConfigResult};

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "gitsync.toml";

/// Loads options from the given path.
///
/// A relative `source_dir` in the file is taken relative to the file's own
/// directory, so a tenant's working folder does not move with the caller's
/// current directory.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_config(path: impl AsRef<Path>) -> ConfigResult<ConfigOptions> {
    let path = path.as_ref();
    debug!(?path, "loading configuration");

    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let mut options: ConfigOptions = toml::from_str(&content)?;

    if let (Some(dir), Some(base)) = (options.source_dir.as_mut(), path.parent())
        && dir.is_relative()
    {
        *dir = base.join(&*dir);
        debug!(source_dir = %dir.display(), "anchored source_dir to config file");
    }

    Ok(options)
}

/// Finds and loads options from the current directory or parents.
///
/// # Errors
///
/// Returns an error if no configuration file is found or it cannot be parsed.
pub fn find_and_load_config() -> ConfigResult<ConfigOptions> {
    let current_dir = std::env::current_dir()?;
    find_and_load_config_from(&current_dir)
}

/// Finds and loads options starting from the given directory.
///
/// Walks up the directory tree until a configuration file is found.
///
/// # Errors
///
/// Returns an error if no configuration file is found or it cannot be parsed.
pub fn find_and_load_config_from(start_dir: impl AsRef<Path>) -> ConfigResult<ConfigOptions> {
    let start_dir = start_dir.as_ref();
    let mut dir = start_dir;

    loop {
        let config_path = dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return load_config(config_path);
        }

        match dir.parent() {
            Some(parent) => dir = parent,
            None => break,
        }
    }

    Err(ConfigError::NotFound(start_dir.join(CONFIG_FILE_NAME)))
}
