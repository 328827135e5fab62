//! Release Bootstrapper: unpack the latest published release and start the stack.
//!
//! Runs in a working directory that holds the compose file. The latest
//! release's zip assets unpack to a single archive root named after the plugin
//! id ([`ARCHIVE_ROOT`]), which is renamed to the local plugin directory
//! ([`PLUGIN_DIR`]) that the compose stack mounts.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::archive;
use crate::compose::StackLauncher;
use crate::constants::{
    ARCHIVE_ROOT, COMPOSE_FILE, DEFAULT_REPOSITORY, EXECUTABLE_MODE, EXECUTABLE_PATTERN,
    PLUGIN_DIR, ZIP_CONTENT_TYPE,
};
use crate::core::ReleaseError;
use crate::github::GitHubApi;
use crate::utils::fs::{find_files, remove_dir_all, set_mode};

/// Inputs of [`bootstrap_release`].
#[derive(Debug, Clone)]
pub struct BootstrapConfig {
    /// `owner/name` of the repository
    pub repo: String,
    /// Directory the release is unpacked into and the stack started from
    pub work_dir: PathBuf,
    /// Compose file, relative to `work_dir` unless absolute
    pub compose_file: PathBuf,
    /// Launch the compose stack after unpacking
    pub start_stack: bool,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            repo: DEFAULT_REPOSITORY.to_string(),
            work_dir: PathBuf::from("."),
            compose_file: PathBuf::from(COMPOSE_FILE),
            start_stack: true,
        }
    }
}

/// Installs the latest release of `config.repo` into `config.work_dir` and
/// optionally starts the compose stack.
///
/// Returns the plugin directory. Every zip asset of the release is extracted
/// in listing order; the archive root is cleared before each one, so with
/// several assets the plugin directory ends up holding exactly the last one.
///
/// # Errors
///
/// - [`ReleaseError::NoReleaseAsset`] when the release has no zip asset
/// - [`ReleaseError::ArchiveRootMissing`] when the archives lack [`ARCHIVE_ROOT`]
/// - [`ReleaseError::CommandFailed`] when the compose command fails; the
///   unpacked files stay in place
pub async fn bootstrap_release(
    api: &dyn GitHubApi,
    launcher: &dyn StackLauncher,
    config: &BootstrapConfig,
) -> Result<PathBuf> {
    let plugin_dir = config.work_dir.join(PLUGIN_DIR);
    let archive_root = config.work_dir.join(ARCHIVE_ROOT);

    remove_dir_all(&plugin_dir)?;

    let release = api
        .latest_release(&config.repo)
        .await
        .context("Failed to look up the latest release")?;
    debug!("Latest release of {} is {}", config.repo, release.tag_name);

    let assets: Vec<_> = release.assets_of_type(ZIP_CONTENT_TYPE).collect();
    if assets.is_empty() {
        return Err(ReleaseError::NoReleaseAsset {
            repo: config.repo.clone(),
            content_type: ZIP_CONTENT_TYPE.to_string(),
        }
        .into());
    }
    if assets.len() > 1 {
        warn!(
            "Release {} has {} zip assets; only the contents of the last one are kept",
            release.tag_name,
            assets.len()
        );
    }

    for asset in assets {
        info!("Downloading {}", asset.name);
        let bytes = api
            .download_asset(asset)
            .await
            .with_context(|| format!("Failed to download release asset {}", asset.name))?;
        let download = archive::spool(&bytes)?;

        info!("Extracting files to {}", plugin_dir.display());
        remove_dir_all(&archive_root)?;
        archive::extract_zip(download.path(), &config.work_dir)?;
    }

    if !archive_root.is_dir() {
        return Err(ReleaseError::ArchiveRootMissing {
            path: archive_root.display().to_string(),
        }
        .into());
    }
    std::fs::rename(&archive_root, &plugin_dir).map_err(|e| {
        let reason = e.to_string();
        anyhow::Error::new(e).context(ReleaseError::FileSystemError {
            operation: "rename".to_string(),
            path: archive_root.display().to_string(),
            reason,
        })
    })?;

    for executable in find_files(&plugin_dir, EXECUTABLE_PATTERN)? {
        debug!("Marking {} executable", executable.display());
        set_mode(&executable, EXECUTABLE_MODE)?;
    }

    if config.start_stack {
        launcher.up(&config.work_dir, &config.compose_file).await?;
    } else {
        info!("Skipping stack start");
    }

    Ok(plugin_dir)
}
