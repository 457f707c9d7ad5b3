//! Hosting provider abstraction.

use async_trait::async_trait;

use crate::HostingResult;

/// Repository provisioning operations offered by a hosting provider.
#[async_trait]
pub trait HostingApi: Send + Sync {
    /// Returns whether `organization/repository` exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the arguments are empty or the request cannot be made.
    async fn exists_remote_repo(&self, organization: &str, repository: &str)
    -> HostingResult<bool>;

    /// Creates `repository` under `organization`.
    ///
    /// # Errors
    ///
    /// Returns an error if the arguments are empty or the provider refuses.
    async fn create_remote_repo(
        &self,
        organization: &str,
        repository: &str,
        access_token: &str,
    ) -> HostingResult<()>;

    /// Deletes `organization/repository`.
    ///
    /// # Errors
    ///
    /// Returns an error if the arguments are empty or the provider refuses.
    async fn delete_remote_repo(
        &self,
        organization: &str,
        repository: &str,
        access_token: &str,
    ) -> HostingResult<()>;
}
