//! HTTP implementation of [`GitHubApi`] on top of `reqwest`.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use tracing::debug;

use super::models::{Artifact, ArtifactList, Release, ReleaseAsset};
use super::{Credential, GitHubApi};
use crate::constants::{
    GITHUB_ACCEPT, GITHUB_API_URL, GITHUB_API_VERSION, GITHUB_API_VERSION_HEADER, USER_AGENT,
};
use crate::core::ReleaseError;

/// GitHub REST API client.
///
/// Every request carries the pinned `Accept` media type, the
/// `X-GitHub-Api-Version` header and a `User-Agent`. Authenticated calls add
/// a bearer `Authorization` header from the [`Credential`] they are given.
/// Each call is a single attempt: any non-2xx status becomes
/// [`ReleaseError::HttpStatus`].
///
/// # Examples
///
/// ```rust,no_run
/// use release_kit::github::{GitHubApi, GitHubClient};
///
/// # async fn example() -> anyhow::Result<()> {
/// let client = GitHubClient::new()?;
/// let release = client.latest_release("haohanyang/mongodb-datasource").await?;
/// println!("latest: {}", release.tag_name);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    base_url: String,
}

impl GitHubClient {
    /// Client for `https://api.github.com`.
    pub fn new() -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self::from_http(http))
    }

    /// Wraps an existing `reqwest` client, pointed at the public API.
    ///
    /// GitHub rejects requests without a `User-Agent`, so `http` should set one.
    pub fn from_http(http: reqwest::Client) -> Self {
        Self {
            http,
            base_url: GITHUB_API_URL.to_string(),
        }
    }

    /// Points the client at another API root (GitHub Enterprise, test servers).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// The API root requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the artifacts listing for `repo` (`owner/name`).
    pub fn artifacts_url(&self, repo: &str) -> String {
        format!("{}/repos/{}/actions/artifacts", self.base_url, repo)
    }

    /// URL of the latest release of `repo` (`owner/name`).
    pub fn latest_release_url(&self, repo: &str) -> String {
        format!("{}/repos/{}/releases/latest", self.base_url, repo)
    }

    async fn get(
        &self,
        url: &str,
        credential: Option<&Credential>,
        operation: &str,
    ) -> Result<reqwest::Response> {
        debug!("GET {}", url);

        let mut request = self
            .http
            .get(url)
            .header(ACCEPT, GITHUB_ACCEPT)
            .header(GITHUB_API_VERSION_HEADER, GITHUB_API_VERSION);
        if let Some(credential) = credential {
            request = request.bearer_auth(credential.secret());
        }

        let response = request.send().await.map_err(|e| ReleaseError::NetworkError {
            operation: operation.to_string(),
            reason: e.to_string(),
        })?;

        let status = response.status();
        debug!("{} -> {}", url, status);
        if !status.is_success() {
            return Err(ReleaseError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            }
            .into());
        }

        Ok(response)
    }

    async fn get_bytes(
        &self,
        url: &str,
        credential: Option<&Credential>,
        operation: &str,
    ) -> Result<Vec<u8>> {
        let response = self.get(url, credential, operation).await?;
        let body = response.bytes().await.map_err(|e| ReleaseError::NetworkError {
            operation: operation.to_string(),
            reason: e.to_string(),
        })?;

        debug!("Downloaded {} bytes from {}", body.len(), url);
        Ok(body.to_vec())
    }
}

#[async_trait]
impl GitHubApi for GitHubClient {
    async fn list_artifacts(&self, repo: &str, credential: &Credential) -> Result<Vec<Artifact>> {
        let url = self.artifacts_url(repo);
        let list: ArtifactList = self
            .get(&url, Some(credential), "artifact listing")
            .await?
            .json()
            .await
            .with_context(|| format!("Failed to parse artifact listing from {url}"))?;

        Ok(list.artifacts)
    }

    async fn download_artifact(
        &self,
        artifact: &Artifact,
        credential: &Credential,
    ) -> Result<Vec<u8>> {
        self.get_bytes(&artifact.archive_download_url, Some(credential), "artifact download").await
    }

    async fn latest_release(&self, repo: &str) -> Result<Release> {
        let url = self.latest_release_url(repo);
        self.get(&url, None, "latest release lookup")
            .await?
            .json()
            .await
            .with_context(|| format!("Failed to parse release from {url}"))
    }

    async fn download_asset(&self, asset: &ReleaseAsset) -> Result<Vec<u8>> {
        self.get_bytes(&asset.browser_download_url, None, "release asset download").await
    }
}
