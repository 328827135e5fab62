//! `fetch-artifact`: download the latest GitHub Actions artifact.
//!
//! ```bash
//! # Token from the environment
//! GITHUB_PAT=ghp_... fetch-artifact
//!
//! # Token as argument, newest artifact, custom directory
//! fetch-artifact ghp_... --newest --output dist
//! ```

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use super::GlobalArgs;
use crate::artifacts::{ArtifactSelection, FetchConfig, fetch_latest_artifact};
use crate::constants::{DEFAULT_REPOSITORY, GITHUB_API_URL, PLUGIN_DIR};
use crate::github::GitHubClient;

/// Download the latest GitHub Actions artifact of the plugin repository and
/// unpack it into a fresh directory.
#[derive(Parser, Debug)]
#[command(name = "fetch-artifact", version)]
pub struct FetchArtifactCommand {
    /// GitHub personal access token; takes precedence over `GITHUB_PAT`
    #[arg(value_name = "TOKEN", env = "GITHUB_PAT", hide_env_values = true)]
    token: Option<String>,

    /// Repository to fetch from (`owner/name`)
    #[arg(long, default_value = DEFAULT_REPOSITORY)]
    repo: String,

    /// Directory to unpack into; replaced entirely
    #[arg(short, long, default_value = PLUGIN_DIR)]
    output: PathBuf,

    /// Pick the most recently created unexpired artifact instead of the first listed
    #[arg(long)]
    newest: bool,

    /// GitHub API root
    #[arg(long, env = "GITHUB_API_URL", default_value = GITHUB_API_URL, hide = true)]
    api_url: String,

    #[command(flatten)]
    pub global: GlobalArgs,
}

impl FetchArtifactCommand {
    /// Inputs for [`fetch_latest_artifact`].
    pub fn config(&self) -> FetchConfig {
        FetchConfig {
            token: self.token.clone(),
            repo: self.repo.clone(),
            output_dir: self.output.clone(),
            selection: if self.newest {
                ArtifactSelection::Newest
            } else {
                ArtifactSelection::First
            },
        }
    }

    pub async fn execute(self) -> Result<()> {
        let client = GitHubClient::new()?.with_base_url(&self.api_url);
        fetch_latest_artifact(&client, &self.config()).await?;
        Ok(())
    }
}
