//! `update-plugin-metadata`: stamp `src/plugin.json` with build provenance.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use super::GlobalArgs;
use crate::git::GitCommitTimestamp;
use crate::metadata::{MetadataConfig, Provenance, update_plugin_metadata};

/// Write CI provenance (links, version, update date) into `src/plugin.json`.
///
/// Reads `GITHUB_REPOSITORY`, `GITHUB_SHA`, `GITHUB_RUN_ID` and
/// `GITHUB_REF_NAME`, all of which must be set.
#[derive(Parser, Debug)]
#[command(name = "update-plugin-metadata", version)]
pub struct UpdateMetadataCommand {
    /// Project root containing `src/plugin.json` and `package.json`
    #[arg(short = 'C', long, default_value = ".")]
    project_dir: PathBuf,

    /// Print the merged descriptor instead of writing it
    #[arg(long)]
    dry_run: bool,

    #[command(flatten)]
    pub global: GlobalArgs,
}

impl UpdateMetadataCommand {
    /// Inputs for [`update_plugin_metadata`], with provenance from the environment.
    pub fn config(&self) -> Result<MetadataConfig> {
        Ok(MetadataConfig {
            project_dir: self.project_dir.clone(),
            provenance: Provenance::from_env()?,
            dry_run: self.dry_run,
        })
    }

    pub async fn execute(self) -> Result<()> {
        let config = self.config()?;
        let commits = GitCommitTimestamp::new(&config.project_dir);
        let descriptor = update_plugin_metadata(&config, &commits).await?;

        if config.dry_run {
            println!("{}", serde_json::to_string_pretty(&descriptor)?);
        }
        Ok(())
    }
}
