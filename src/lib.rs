//! release-kit - release tooling for the MongoDB data source Grafana plugin
//!
//! Three small, independent command-line tools share this library:
//!
//! - `fetch-artifact` downloads the latest GitHub Actions artifact of the
//!   plugin repository and unpacks it into `mongodb-datasource/`
//! - `bootstrap-release` installs the latest published release into
//!   `mongodb-datasource/` and starts the local Docker Compose stack
//! - `update-plugin-metadata` writes build provenance (links, version,
//!   update date) into `src/plugin.json`
//!
//! Each tool is a short, strictly sequential run: a few HTTP calls, an archive
//! extraction or a JSON edit, driven by CLI flags and CI environment variables
//! that are read once into a config struct.
//!
//! # Core Modules
//!
//! ## Operations
//! - [`artifacts`] - Artifact Fetcher
//! - [`release`] - Release Bootstrapper
//! - [`metadata`] - Metadata Updater and the plugin descriptor model
//!
//! ## External Systems
//! - [`github`] - GitHub REST API client behind the [`github::GitHubApi`] trait
//! - [`git`] - HEAD commit timestamp behind [`git::CommitTimestampSource`]
//! - [`compose`] - Docker Compose launcher behind [`compose::StackLauncher`]
//! - [`command`] - Subprocess builder used by `git` and `compose`
//!
//! ## Supporting Modules
//! - [`archive`] - Zip extraction from spooled temporary files
//! - [`cli`] - Command structs of the three binaries and logging setup
//! - [`constants`] - Repository, paths and API constants
//! - [`core`] - Error types, user-facing error rendering and exit codes
//! - [`utils`] - File system helpers
//!
//! # Example
//!
//! ```rust,no_run
//! use release_kit::artifacts::{FetchConfig, fetch_latest_artifact};
//! use release_kit::github::GitHubClient;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = GitHubClient::new()?;
//! let config = FetchConfig {
//!     token: std::env::var("GITHUB_PAT").ok(),
//!     ..FetchConfig::default()
//! };
//! let dir = fetch_latest_artifact(&client, &config).await?;
//! println!("artifact unpacked into {}", dir.display());
//! # Ok(())
//! # }
//! ```

pub mod archive;
pub mod artifacts;
pub mod cli;
pub mod command;
pub mod compose;
pub mod constants;
pub mod core;
pub mod git;
pub mod github;
pub mod metadata;
pub mod release;
pub mod utils;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
