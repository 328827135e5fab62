//! Git test helper utilities
//!
//! Creates throwaway repositories whose commits carry pinned committer
//! timestamps, so date formatting can be asserted exactly.

use anyhow::{Context, Result, bail};
use std::path::PathBuf;
use std::process::Command;

/// Git command wrapper for tests.
///
/// Identity and dates are passed through the environment, so tests never
/// depend on the user's global git configuration.
pub struct TestGit {
    repo_path: PathBuf,
}

impl TestGit {
    fn run_git_command(
        &self,
        args: &[&str],
        committer_date: Option<&str>,
        action: &str,
    ) -> Result<std::process::Output> {
        let mut command = Command::new("git");
        command
            .args(args)
            .current_dir(&self.repo_path)
            .env("GIT_AUTHOR_NAME", "Test User")
            .env("GIT_AUTHOR_EMAIL", "test@release-kit.example")
            .env("GIT_COMMITTER_NAME", "Test User")
            .env("GIT_COMMITTER_EMAIL", "test@release-kit.example");
        if let Some(date) = committer_date {
            command.env("GIT_AUTHOR_DATE", date).env("GIT_COMMITTER_DATE", date);
        }

        let output = command.output().with_context(|| action.to_string())?;
        if !output.status.success() {
            bail!("{} failed: {}", action, String::from_utf8_lossy(&output.stderr));
        }

        Ok(output)
    }

    /// Create a new TestGit instance for the given repository path
    pub fn new(repo_path: impl Into<PathBuf>) -> Self {
        Self {
            repo_path: repo_path.into(),
        }
    }

    /// Initialize a new git repository
    pub fn init(&self) -> Result<()> {
        self.run_git_command(&["init", "-q"], None, "Failed to initialize git repository")?;
        Ok(())
    }

    /// Commit everything in the working tree with the given raw git date
    /// (e.g. `"1709640000 +0100"`).
    pub fn commit_all_at(&self, message: &str, date: &str) -> Result<()> {
        self.run_git_command(&["add", "-A"], None, "Failed to stage files")?;
        self.run_git_command(
            &["commit", "-q", "--allow-empty", "-m", message],
            Some(date),
            "Failed to commit",
        )?;
        Ok(())
    }
}
