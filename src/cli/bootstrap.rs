//! `bootstrap-release`: install the latest release and start the local stack.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use super::GlobalArgs;
use crate::compose::DockerCompose;
use crate::constants::{COMPOSE_FILE, DEFAULT_REPOSITORY, GITHUB_API_URL};
use crate::github::GitHubClient;
use crate::release::{BootstrapConfig, bootstrap_release};

/// Download the latest published release of the plugin, unpack it into
/// `mongodb-datasource/` and start the Docker Compose stack.
#[derive(Parser, Debug)]
#[command(name = "bootstrap-release", version)]
pub struct BootstrapReleaseCommand {
    /// Repository to install from (`owner/name`)
    #[arg(long, default_value = DEFAULT_REPOSITORY)]
    repo: String,

    /// Working directory holding the compose file
    #[arg(short = 'C', long = "dir", default_value = ".")]
    work_dir: PathBuf,

    /// Compose file, relative to the working directory
    #[arg(short = 'f', long, default_value = COMPOSE_FILE)]
    compose_file: PathBuf,

    /// Run `docker` directly instead of through `sudo`
    #[arg(long)]
    no_sudo: bool,

    /// Stop after unpacking; do not start the stack
    #[arg(long)]
    no_start: bool,

    /// GitHub API root
    #[arg(long, env = "GITHUB_API_URL", default_value = GITHUB_API_URL, hide = true)]
    api_url: String,

    #[command(flatten)]
    pub global: GlobalArgs,
}

impl BootstrapReleaseCommand {
    /// Inputs for [`bootstrap_release`].
    pub fn config(&self) -> BootstrapConfig {
        BootstrapConfig {
            repo: self.repo.clone(),
            work_dir: self.work_dir.clone(),
            compose_file: self.compose_file.clone(),
            start_stack: !self.no_start,
        }
    }

    /// The compose launcher selected by the flags.
    pub fn launcher(&self) -> DockerCompose {
        DockerCompose::new().elevated(!self.no_sudo)
    }

    pub async fn execute(self) -> Result<()> {
        let client = GitHubClient::new()?.with_base_url(&self.api_url);
        bootstrap_release(&client, &self.launcher(), &self.config()).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_defaults() {
        let cmd = BootstrapReleaseCommand::try_parse_from(["bootstrap-release"]).unwrap();
        let config = cmd.config();

        assert_eq!(config.repo, "haohanyang/mongodb-datasource");
        assert_eq!(config.work_dir, PathBuf::from("."));
        assert!(config.start_stack);
        assert_eq!(
            cmd.launcher().command(&config.work_dir, &config.compose_file).command_line(),
            "sudo docker compose -f docker-compose.prod.yaml up -d"
        );
    }

    #[test]
    fn test_options() {
        let cmd = BootstrapReleaseCommand::try_parse_from([
            "bootstrap-release",
            "--dir",
            "/srv/grafana",
            "-f",
            "stack.yaml",
            "--no-sudo",
            "--no-start",
        ])
        .unwrap();
        let config = cmd.config();

        assert_eq!(config.work_dir, PathBuf::from("/srv/grafana"));
        assert!(!config.start_stack);
        assert_eq!(
            cmd.launcher().command(Path::new("/srv/grafana"), &config.compose_file).command_line(),
            "docker compose -f stack.yaml up -d"
        );
    }
}
