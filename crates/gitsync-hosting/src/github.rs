//! GitHub REST API backend.

use async_trait::async_trait;
use reqwest::Response;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{HostingApi, HostingError, HostingResult};

const ACCEPT: &str = "application/vnd.github.v3+json";

/// Message GitHub returns for a repository that does not exist.
const NOT_FOUND_MESSAGE: &str = "Not Found";

/// Default description given to newly created repositories.
const DEFAULT_DESCRIPTION: &str = "Tenant content repository";

/// Body of `POST /orgs/{org}/repos`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateRepoRequest {
    pub name: String,
    pub description: String,
    pub homepage: String,
    pub private: bool,
    pub has_issues: bool,
    pub has_wiki: bool,
    pub has_downloads: bool,
}

/// Error or status body returned by the API.
#[derive(Debug, Default, Deserialize)]
struct ApiMessage {
    #[serde(default)]
    message: Option<String>,
}

/// Metadata applied to repositories this client creates.
#[derive(Debug, Clone, Default)]
pub struct RepoSettings {
    /// Repository description.
    pub description: Option<String>,
    /// Repository homepage; `https://github.com/{org}` when unset.
    pub homepage: Option<String>,
}

impl RepoSettings {
    fn request(&self, organization: &str, repository: &str) -> CreateRepoRequest {
        CreateRepoRequest {
            name: repository.to_string(),
            description: self
                .description
                .clone()
                .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
            homepage: self
                .homepage
                .clone()
                .unwrap_or_else(|| format!("https://github.com/{organization}")),
            private: false,
            has_issues: true,
            has_wiki: true,
            has_downloads: true,
        }
    }
}

/// Client for the GitHub (or GitHub Enterprise) repository API.
pub struct GitHubClient {
    client: reqwest::Client,
    api_host: String,
    settings: RepoSettings,
}

impl GitHubClient {
    /// Creates a client for the API rooted at `api_host`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(api_host: impl Into<String>) -> HostingResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(HostingError::Client)?;

        Ok(Self {
            client,
            api_host: api_host.into().trim_end_matches('/').to_string(),
            settings: RepoSettings::default(),
        })
    }

    /// Sets the metadata used when creating repositories.
    #[must_use]
    pub fn with_settings(mut self, settings: RepoSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Returns the API base URL.
    #[must_use]
    pub fn api_host(&self) -> &str {
        &self.api_host
    }

    fn repo_url(&self, organization: &str, repository: &str) -> String {
        format!("{}/repos/{organization}/{repository}", self.api_host)
    }
}

fn require(
    operation: &'static str,
    organization: &str,
    repository: &str,
    access_token: Option<&str>,
) -> HostingResult<()> {
    let missing = if organization.trim().is_empty() {
        Some("an organization")
    } else if repository.trim().is_empty() {
        Some("a repository name")
    } else if access_token.is_some_and(|t| t.trim().is_empty()) {
        Some("an access token")
    } else {
        None
    };

    match missing {
        Some(missing) => Err(HostingError::Validation { operation, missing }),
        None => Ok(()),
    }
}

/// Reads the `message` field of an error body, falling back to the status text.
async fn failure_message(response: Response) -> String {
    let status = response.status();
    let body: ApiMessage = response.json().await.unwrap_or_default();
    body.message.unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string()
    })
}

#[async_trait]
impl HostingApi for GitHubClient {
    async fn exists_remote_repo(
        &self,
        organization: &str,
        repository: &str,
    ) -> HostingResult<bool> {
        require("existence check", organization, repository, None)?;

        let url = self.repo_url(organization, repository);
        let check_error = |source| HostingError::Check {
            repo: format!("{organization}/{repository}"),
            source,
        };

        debug!(%url, "checking remote repository");
        let response = self
            .client
            .get(&url)
            .header("Accept", ACCEPT)
            .send()
            .await
            .map_err(check_error)?;

        let status = response.status();
        let body = response.text().await.map_err(check_error)?;
        let message: ApiMessage = serde_json::from_str(&body).unwrap_or_default();

        let exists = message.message.as_deref() != Some(NOT_FOUND_MESSAGE);
        if exists && !status.is_success() {
            warn!(%status, %organization, %repository, "existence check returned non-success status");
        }

        debug!(%organization, %repository, exists, "remote repository checked");
        Ok(exists)
    }

    async fn create_remote_repo(
        &self,
        organization: &str,
        repository: &str,
        access_token: &str,
    ) -> HostingResult<()> {
        require("create", organization, repository, Some(access_token))?;

        let url = format!("{}/orgs/{organization}/repos", self.api_host);
        let body = self.settings.request(organization, repository);

        debug!(%url, "creating remote repository");
        let response = self
            .client
            .post(&url)
            .header("Accept", ACCEPT)
            .header("Authorization", format!("token {access_token}"))
            .json(&body)
            .send()
            .await
            .map_err(|source| HostingError::Request {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(HostingError::Create {
                repo: format!("{organization}/{repository}"),
                status: status.as_u16(),
                message: failure_message(response).await,
            });
        }

        info!(%organization, %repository, "created remote repository");
        Ok(())
    }

    async fn delete_remote_repo(
        &self,
        organization: &str,
        repository: &str,
        access_token: &str,
    ) -> HostingResult<()> {
        require("delete", organization, repository, Some(access_token))?;

        let url = self.repo_url(organization, repository);

        debug!(%url, "deleting remote repository");
        let response = self
            .client
            .delete(&url)
            .header("Accept", ACCEPT)
            .header("Authorization", format!("token {access_token}"))
            .send()
            .await
            .map_err(|source| HostingError::Request {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(HostingError::Delete {
                repo: format!("{organization}/{repository}"),
                status: status.as_u16(),
                message: failure_message(response).await,
            });
        }

        info!(%organization, %repository, "deleted remote repository");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client(server: &MockServer) -> GitHubClient {
        GitHubClient::new(server.uri()).unwrap()
    }

    #[tokio::test]
    async fn test_exists_true() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/acme/tenant-a"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "name": "tenant-a", "full_name": "acme/tenant-a" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let exists = client(&server)
            .await
            .exists_remote_repo("acme", "tenant-a")
            .await
            .unwrap();
        assert!(exists);
    }

    #[tokio::test]
    async fn test_exists_false_on_not_found_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/acme/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "message": "Not Found",
                "documentation_url": "https://docs.github.com/rest"
            })))
            .mount(&server)
            .await;

        let exists = client(&server)
            .await
            .exists_remote_repo("acme", "missing")
            .await
            .unwrap();
        assert!(!exists);
    }

    #[tokio::test]
    async fn test_exists_true_on_other_messages() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/acme/private"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({ "message": "Bad credentials" })),
            )
            .mount(&server)
            .await;

        let exists = client(&server)
            .await
            .exists_remote_repo("acme", "private")
            .await
            .unwrap();
        assert!(exists);
    }

    #[tokio::test]
    async fn test_exists_network_failure() {
        let client = GitHubClient::new("http://127.0.0.1:1").unwrap();
        let result = client.exists_remote_repo("acme", "tenant-a").await;
        assert!(matches!(result, Err(HostingError::Check { .. })));
    }

    #[tokio::test]
    async fn test_exists_validation() {
        let client = GitHubClient::new("http://127.0.0.1:1").unwrap();
        let result = client.exists_remote_repo("", "tenant-a").await;
        assert!(matches!(
            result,
            Err(HostingError::Validation {
                missing: "an organization",
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_create_sends_body_and_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/orgs/acme/repos"))
            .and(header("Authorization", "token s3cret"))
            .and(body_json(json!({
                "name": "tenant-a",
                "description": "Tenant content repository",
                "homepage": "https://github.com/acme",
                "private": false,
                "has_issues": true,
                "has_wiki": true,
                "has_downloads": true
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "name": "tenant-a" })))
            .expect(1)
            .mount(&server)
            .await;

        client(&server)
            .await
            .create_remote_repo("acme", "tenant-a", "s3cret")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_create_custom_settings() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/orgs/acme/repos"))
            .and(body_json(json!({
                "name": "tenant-a",
                "description": "Content for tenant A",
                "homepage": "https://a.example.com",
                "private": false,
                "has_issues": true,
                "has_wiki": true,
                "has_downloads": true
            })))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let settings = RepoSettings {
            description: Some("Content for tenant A".to_string()),
            homepage: Some("https://a.example.com".to_string()),
        };
        client(&server)
            .await
            .with_settings(settings)
            .create_remote_repo("acme", "tenant-a", "s3cret")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_create_failure_carries_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/orgs/acme/repos"))
            .respond_with(ResponseTemplate::new(422).set_body_json(json!({
                "message": "Repository creation failed."
            })))
            .mount(&server)
            .await;

        let err = client(&server)
            .await
            .create_remote_repo("acme", "tenant-a", "s3cret")
            .await
            .unwrap_err();
        match err {
            HostingError::Create {
                repo,
                status,
                message,
            } => {
                assert_eq!(repo, "acme/tenant-a");
                assert_eq!(status, 422);
                assert_eq!(message, "Repository creation failed.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_requires_token() {
        let client = GitHubClient::new("http://127.0.0.1:1").unwrap();
        let result = client.create_remote_repo("acme", "tenant-a", "").await;
        assert!(matches!(
            result,
            Err(HostingError::Validation {
                operation: "create",
                missing: "an access token"
            })
        ));
    }

    #[tokio::test]
    async fn test_delete() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/repos/acme/tenant-a"))
            .and(header("Authorization", "token s3cret"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        client(&server)
            .await
            .delete_remote_repo("acme", "tenant-a", "s3cret")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_delete_forbidden() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/repos/acme/tenant-a"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let err = client(&server)
            .await
            .delete_remote_repo("acme", "tenant-a", "s3cret")
            .await
            .unwrap_err();
        match err {
            HostingError::Delete {
                status, message, ..
            } => {
                assert_eq!(status, 403);
                assert_eq!(message, "Forbidden");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_api_host_trailing_slash() {
        let client = GitHubClient::new("https://api.github.com/").unwrap();
        assert_eq!(client.api_host(), "https://api.github.com");
        assert_eq!(
            client.repo_url("acme", "tenant-a"),
            "https://api.github.com/repos/acme/tenant-a"
        );
    }
}
