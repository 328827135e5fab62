//! GitHub API access for artifacts and releases.
//!
//! The release tools only need four calls, collected in the [`GitHubApi`]
//! trait so the fetch and bootstrap flows can run against a fake in tests:
//!
//! | Call                  | Endpoint                                   | Auth   |
//! |-----------------------|--------------------------------------------|--------|
//! | `list_artifacts`      | `GET /repos/{repo}/actions/artifacts`      | bearer |
//! | `download_artifact`   | `archive_download_url` of an artifact      | bearer |
//! | `latest_release`      | `GET /repos/{repo}/releases/latest`        | none   |
//! | `download_asset`      | `browser_download_url` of a release asset  | none   |
//!
//! [`GitHubClient`] is the `reqwest` implementation.

pub mod client;
pub mod models;

use anyhow::Result;
use async_trait::async_trait;
use std::fmt;

use crate::core::ReleaseError;

pub use client::GitHubClient;
pub use models::{Artifact, ArtifactList, Release, ReleaseAsset};

/// The GitHub calls used by the release tools.
#[async_trait]
pub trait GitHubApi: Send + Sync {
    /// Artifacts of `repo` in the order the API returns them.
    async fn list_artifacts(&self, repo: &str, credential: &Credential) -> Result<Vec<Artifact>>;

    /// Raw zip bytes of `artifact`.
    async fn download_artifact(&self, artifact: &Artifact, credential: &Credential)
    -> Result<Vec<u8>>;

    /// The latest published release of `repo`.
    async fn latest_release(&self, repo: &str) -> Result<Release>;

    /// Raw bytes of a release asset.
    async fn download_asset(&self, asset: &ReleaseAsset) -> Result<Vec<u8>>;
}

/// A GitHub personal access token.
///
/// Never empty. The token is only exposed through [`Credential::secret`] and
/// is redacted from `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wraps a token, rejecting empty or whitespace-only values.
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into().trim().to_string();
        (!token.is_empty()).then_some(Self(token))
    }

    /// Resolves the credential from an already merged argument/environment value.
    ///
    /// `variable` names the environment variable consulted, for the error message.
    pub fn resolve(value: Option<&str>, variable: &str) -> Result<Self, ReleaseError> {
        value.and_then(Self::new).ok_or_else(|| ReleaseError::MissingCredential {
            variable: variable.to_string(),
        })
    }

    /// The raw token.
    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}
