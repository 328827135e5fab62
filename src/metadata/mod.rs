//! Metadata Updater: stamp build provenance into the plugin descriptor.
//!
//! Given the CI [`Provenance`] and the HEAD commit time, rewrites
//! `src/plugin.json` so that:
//!
//! - `info.links` lists the source repository, the commit and the CI run
//! - `info.version` is the `package.json` version, suffixed with the short
//!   commit SHA outside the release branch
//! - `info.updated` is the commit date (`YYYY-MM-DD`, UTC)
//!
//! All other descriptor keys are carried through unchanged.

pub mod descriptor;
pub mod provenance;

pub use descriptor::{PackageDescriptor, PluginDescriptor, PluginInfo, PluginLink};
pub use provenance::{Provenance, compute_version};

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{debug, info};

use crate::constants::{PACKAGE_DESCRIPTOR_PATH, PLUGIN_DESCRIPTOR_PATH};
use crate::git::{CommitTimestampSource, format_update_date};
use crate::utils::fs::{read_json_file, write_json_file};

/// Inputs of [`update_plugin_metadata`].
#[derive(Debug, Clone)]
pub struct MetadataConfig {
    /// Project root holding `src/plugin.json` and `package.json`
    pub project_dir: PathBuf,
    pub provenance: Provenance,
    /// Compute the merged descriptor without writing it
    pub dry_run: bool,
}

impl MetadataConfig {
    pub fn plugin_descriptor_path(&self) -> PathBuf {
        self.project_dir.join(PLUGIN_DESCRIPTOR_PATH)
    }

    pub fn package_descriptor_path(&self) -> PathBuf {
        self.project_dir.join(PACKAGE_DESCRIPTOR_PATH)
    }
}

impl PluginDescriptor {
    /// Replaces links, version and update date from the build provenance.
    pub fn apply_provenance(
        &mut self,
        provenance: &Provenance,
        package_version: &str,
        updated: String,
    ) {
        self.info.links = provenance.links();
        self.info.version = Some(provenance.plugin_version(package_version));
        self.info.updated = Some(updated);
    }
}

/// Merges build provenance into the plugin descriptor and writes it back.
///
/// Returns the merged descriptor. The file is replaced in one step, so a
/// failure leaves the previous contents intact. With `dry_run` nothing is
/// written.
pub async fn update_plugin_metadata(
    config: &MetadataConfig,
    commits: &dyn CommitTimestampSource,
) -> Result<PluginDescriptor> {
    let committed =
        commits.head_commit_time().await.context("Failed to read the HEAD commit time")?;
    let updated = format_update_date(committed);
    debug!("HEAD committed at {} (updated: {})", committed, updated);

    let plugin_path = config.plugin_descriptor_path();
    let mut descriptor: PluginDescriptor = read_json_file(&plugin_path)?;
    let package: PackageDescriptor = read_json_file(&config.package_descriptor_path())?;

    descriptor.apply_provenance(&config.provenance, &package.version, updated);
    debug!("Merged plugin descriptor:\n{}", serde_json::to_string_pretty(&descriptor)?);

    if config.dry_run {
        info!("Dry run, leaving {} unchanged", plugin_path.display());
    } else {
        write_json_file(&plugin_path, &descriptor, true)?;
        info!(
            "Updated {} to version {}",
            plugin_path.display(),
            descriptor.info.version.as_deref().unwrap_or_default()
        );
    }

    Ok(descriptor)
}
