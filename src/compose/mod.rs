//! Starting the local Grafana stack with Docker Compose.
//!
//! [`StackLauncher`] is the seam between the Release Bootstrapper and the
//! container tooling; [`DockerCompose`] runs
//! `sudo docker compose -f <file> up -d` in the working directory.

use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;

use crate::command::ToolCommand;

/// Brings up a compose stack.
#[async_trait]
pub trait StackLauncher: Send + Sync {
    /// Starts the stack described by `compose_file` in detached mode, from `work_dir`.
    async fn up(&self, work_dir: &Path, compose_file: &Path) -> Result<()>;
}

/// [`StackLauncher`] that shells out to the Docker CLI.
#[derive(Debug, Clone)]
pub struct DockerCompose {
    /// Prefix the invocation with `sudo`
    elevated: bool,
    /// Docker executable
    docker: String,
}

impl Default for DockerCompose {
    fn default() -> Self {
        Self {
            elevated: true,
            docker: "docker".to_string(),
        }
    }
}

impl DockerCompose {
    /// Launcher using `sudo docker`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether to run through `sudo`.
    #[must_use]
    pub fn elevated(mut self, elevated: bool) -> Self {
        self.elevated = elevated;
        self
    }

    /// Builds the command without running it.
    pub fn command(&self, work_dir: &Path, compose_file: &Path) -> ToolCommand {
        let compose_args = [
            "compose".to_string(),
            "-f".to_string(),
            compose_file.display().to_string(),
            "up".to_string(),
            "-d".to_string(),
        ];

        let cmd = if self.elevated {
            ToolCommand::new("sudo").arg(&self.docker)
        } else {
            ToolCommand::new(&self.docker)
        };

        cmd.args(compose_args).current_dir(work_dir).inherit_stdio().with_context("compose up")
    }
}

#[async_trait]
impl StackLauncher for DockerCompose {
    async fn up(&self, work_dir: &Path, compose_file: &Path) -> Result<()> {
        let cmd = self.command(work_dir, compose_file);
        tracing::info!("Starting stack: {}", cmd.command_line());
        cmd.execute_success().await
    }
}
