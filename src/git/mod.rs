//! Reading commit information from the local git checkout.
//!
//! The Metadata Updater needs one fact from version control: when the HEAD
//! commit was committed. That lookup sits behind [`CommitTimestampSource`] so
//! tests can substitute a fixed clock; [`GitCommitTimestamp`] is the real
//! implementation, shelling out to the system `git` like the rest of the
//! tooling does.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

use crate::command::ToolCommand;
use crate::core::ReleaseError;

/// Source of the HEAD commit's committer timestamp.
#[async_trait]
pub trait CommitTimestampSource: Send + Sync {
    /// Committer time of the current HEAD commit.
    async fn head_commit_time(&self) -> Result<DateTime<Utc>>;
}

/// [`CommitTimestampSource`] backed by `git show -s --format=%ct`.
#[derive(Debug, Clone)]
pub struct GitCommitTimestamp {
    repo_dir: PathBuf,
}

impl GitCommitTimestamp {
    /// Reads commits from the repository containing `repo_dir`.
    pub fn new(repo_dir: impl AsRef<Path>) -> Self {
        Self {
            repo_dir: repo_dir.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl CommitTimestampSource for GitCommitTimestamp {
    async fn head_commit_time(&self) -> Result<DateTime<Utc>> {
        let raw = ToolCommand::new("git")
            .args(["show", "-s", "--format=%ct"])
            .current_dir(&self.repo_dir)
            .with_context("commit timestamp")
            .execute_stdout()
            .await?;

        parse_commit_timestamp(&raw)
    }
}

/// Parses the output of `git show -s --format=%ct` (seconds since the epoch).
pub fn parse_commit_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    let invalid = || ReleaseError::InvalidCommitTimestamp {
        value: raw.trim().to_string(),
    };

    let seconds: i64 = raw.trim().parse().map_err(|_| invalid())?;
    let time = DateTime::from_timestamp(seconds, 0).ok_or_else(invalid)?;
    Ok(time)
}

/// Calendar date (`YYYY-MM-DD`) of `time` in UTC.
pub fn format_update_date(time: DateTime<Utc>) -> String {
    time.format("%Y-%m-%d").to_string()
}
