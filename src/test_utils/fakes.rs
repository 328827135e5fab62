//! In-memory stand-ins for the external-tool traits.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::compose::StackLauncher;
use crate::core::ReleaseError;
use crate::git::CommitTimestampSource;
use crate::github::{Artifact, Credential, GitHubApi, Release, ReleaseAsset};

/// Scripted [`GitHubApi`] that records every call it receives.
///
/// Downloads are served from bodies registered per URL; unknown URLs and a
/// missing release answer with a `404` [`ReleaseError::HttpStatus`].
#[derive(Default)]
pub struct FakeGitHub {
    artifacts: Vec<Artifact>,
    release: Option<Release>,
    bodies: HashMap<String, Vec<u8>>,
    calls: Mutex<Vec<String>>,
}

impl FakeGitHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lists `artifact` (after any added before) and serves `body` for its download URL.
    #[must_use]
    pub fn with_artifact(mut self, artifact: Artifact, body: Vec<u8>) -> Self {
        self.bodies.insert(artifact.archive_download_url.clone(), body);
        self.artifacts.push(artifact);
        self
    }

    /// Lists `artifact` without serving a body, so downloading it answers `404`.
    #[must_use]
    pub fn with_listed_artifact(mut self, artifact: Artifact) -> Self {
        self.artifacts.push(artifact);
        self
    }

    /// Publishes an empty latest release with the given tag.
    #[must_use]
    pub fn with_release(mut self, tag: &str) -> Self {
        self.release = Some(Release {
            tag_name: tag.to_string(),
            assets: Vec::new(),
        });
        self
    }

    /// Attaches `asset` to the latest release (creating `v0.0.0` if needed).
    #[must_use]
    pub fn with_release_asset(mut self, asset: ReleaseAsset, body: Vec<u8>) -> Self {
        self.bodies.insert(asset.browser_download_url.clone(), body);
        self.release
            .get_or_insert_with(|| Release {
                tag_name: "v0.0.0".to_string(),
                assets: Vec::new(),
            })
            .assets
            .push(asset);
        self
    }

    /// Calls received so far, e.g. `list_artifacts o/r`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn body(&self, url: &str) -> Result<Vec<u8>> {
        self.bodies.get(url).cloned().ok_or_else(|| not_found(url))
    }
}

fn not_found(url: &str) -> anyhow::Error {
    ReleaseError::HttpStatus {
        url: url.to_string(),
        status: 404,
    }
    .into()
}

#[async_trait]
impl GitHubApi for FakeGitHub {
    async fn list_artifacts(&self, repo: &str, _credential: &Credential) -> Result<Vec<Artifact>> {
        self.record(format!("list_artifacts {repo}"));
        Ok(self.artifacts.clone())
    }

    async fn download_artifact(
        &self,
        artifact: &Artifact,
        _credential: &Credential,
    ) -> Result<Vec<u8>> {
        self.record(format!("download_artifact {}", artifact.archive_download_url));
        self.body(&artifact.archive_download_url)
    }

    async fn latest_release(&self, repo: &str) -> Result<Release> {
        self.record(format!("latest_release {repo}"));
        self.release.clone().ok_or_else(|| not_found(&format!("/repos/{repo}/releases/latest")))
    }

    async fn download_asset(&self, asset: &ReleaseAsset) -> Result<Vec<u8>> {
        self.record(format!("download_asset {}", asset.browser_download_url));
        self.body(&asset.browser_download_url)
    }
}

/// [`StackLauncher`] that records invocations instead of running Docker.
#[derive(Default)]
pub struct RecordingLauncher {
    calls: Mutex<Vec<(PathBuf, PathBuf)>>,
    exit_code: Option<i32>,
}

impl RecordingLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Launcher whose every `up` fails as if compose exited with `code`.
    pub fn failing(code: i32) -> Self {
        Self {
            calls: Mutex::default(),
            exit_code: Some(code),
        }
    }

    /// `(work_dir, compose_file)` of every `up` call.
    pub fn calls(&self) -> Vec<(PathBuf, PathBuf)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl StackLauncher for RecordingLauncher {
    async fn up(&self, work_dir: &Path, compose_file: &Path) -> Result<()> {
        self.calls.lock().unwrap().push((work_dir.to_path_buf(), compose_file.to_path_buf()));

        match self.exit_code {
            Some(code) => Err(ReleaseError::CommandFailed {
                command: format!("docker compose -f {} up -d", compose_file.display()),
                code: Some(code),
                stderr: String::new(),
            }
            .into()),
            None => Ok(()),
        }
    }
}

/// [`CommitTimestampSource`] pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedCommitTime(pub DateTime<Utc>);

impl FixedCommitTime {
    /// Commit time `seconds` after the unix epoch.
    pub fn at(seconds: i64) -> Self {
        Self(DateTime::from_timestamp(seconds, 0).expect("timestamp in range"))
    }
}

#[async_trait]
impl CommitTimestampSource for FixedCommitTime {
    async fn head_commit_time(&self) -> Result<DateTime<Utc>> {
        Ok(self.0)
    }
}
