//! Artifact Fetcher: download the latest CI artifact and unpack it locally.
//!
//! The flow is strictly sequential:
//!
//! 1. Resolve the [`Credential`]; nothing touches the network without one.
//! 2. List the repository's Actions artifacts.
//! 3. Pick one according to [`ArtifactSelection`].
//! 4. Download it, replace the target directory and extract into it.
//!
//! An empty listing is reported as [`ReleaseError::NoArtifacts`] and leaves
//! the target directory untouched.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{debug, info};

use crate::archive;
use crate::constants::{CREDENTIAL_ENV, DEFAULT_REPOSITORY, PLUGIN_DIR};
use crate::core::ReleaseError;
use crate::github::{Artifact, Credential, GitHubApi};
use crate::utils::fs::recreate_dir;

/// Which artifact of the listing to download.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ArtifactSelection {
    /// The first artifact in API order.
    #[default]
    First,
    /// The artifact with the latest `created_at`, skipping expired ones.
    /// Entries without a timestamp sort before any timestamped one; ties keep
    /// list order.
    Newest,
}

impl ArtifactSelection {
    /// Picks an artifact, or `None` for an empty listing.
    pub fn select<'a>(&self, artifacts: &'a [Artifact]) -> Option<&'a Artifact> {
        match self {
            Self::First => artifacts.first(),
            Self::Newest => artifacts.iter().filter(|a| !a.expired).reduce(|best, candidate| {
                if candidate.created_at > best.created_at {
                    candidate
                } else {
                    best
                }
            }),
        }
    }
}

/// Inputs of [`fetch_latest_artifact`].
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Token from the command line or `GITHUB_PAT`, already merged
    pub token: Option<String>,
    /// `owner/name` of the repository
    pub repo: String,
    /// Directory replaced by the artifact's contents
    pub output_dir: PathBuf,
    pub selection: ArtifactSelection,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            token: None,
            repo: DEFAULT_REPOSITORY.to_string(),
            output_dir: PathBuf::from(PLUGIN_DIR),
            selection: ArtifactSelection::First,
        }
    }
}

/// Downloads the selected artifact of `config.repo` into `config.output_dir`.
///
/// Returns the directory the artifact was extracted into. On success it holds
/// exactly the archive's entries; anything there before is removed.
///
/// # Errors
///
/// - [`ReleaseError::MissingCredential`] before any API call
/// - [`ReleaseError::NoArtifacts`] when the listing is empty
/// - transport errors from the API, archive and filesystem errors from extraction
pub async fn fetch_latest_artifact(api: &dyn GitHubApi, config: &FetchConfig) -> Result<PathBuf> {
    let credential = Credential::resolve(config.token.as_deref(), CREDENTIAL_ENV)?;

    info!("Listing artifacts of {}", config.repo);
    let artifacts = api
        .list_artifacts(&config.repo, &credential)
        .await
        .context("Failed to list artifacts")?;
    debug!("{} artifact(s) listed", artifacts.len());

    let artifact = config.selection.select(&artifacts).ok_or_else(|| ReleaseError::NoArtifacts {
        repo: config.repo.clone(),
    })?;

    info!("Downloading artifact {} ({})", artifact.name, artifact.archive_download_url);
    let bytes = api
        .download_artifact(artifact, &credential)
        .await
        .with_context(|| format!("Failed to download artifact {}", artifact.name))?;
    let download = archive::spool(&bytes)?;

    recreate_dir(&config.output_dir)?;
    archive::extract_zip(download.path(), &config.output_dir)?;

    info!("Extracted artifact into {}", config.output_dir.display());
    Ok(config.output_dir.clone())
}
