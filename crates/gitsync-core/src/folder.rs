//! Local working folder.

use std::path::Path;

use tracing::info;

use crate::{WorkflowError, WorkflowResult};

/// Creates `dir` (and missing parents) if it does not exist.
///
/// Returns `true` when the folder was created by this call.
///
/// # Errors
///
/// Returns an error if the folder cannot be inspected or created.
pub async fn ensure_working_folder(dir: &Path) -> WorkflowResult<bool> {
    let folder_error = |source| WorkflowError::LocalFolder {
        path: dir.to_path_buf(),
        source,
    };

    if tokio::fs::try_exists(dir).await.map_err(folder_error)? {
        return Ok(false);
    }

    info!(path = %dir.display(), "creating working folder");
    tokio::fs::create_dir_all(dir).await.map_err(folder_error)?;
    Ok(true)
}
