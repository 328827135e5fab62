//! Locating files by name pattern and adjusting their permissions.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Finds regular files directly inside `dir` whose name matches a glob `pattern`.
///
/// The search is not recursive. Results are sorted so callers act on files in
/// a stable order. A missing directory yields an empty list.
///
/// # Examples
///
/// ```rust,no_run
/// use release_kit::utils::fs::find_files;
/// use std::path::Path;
///
/// # fn example() -> anyhow::Result<()> {
/// let binaries = find_files(Path::new("mongodb-datasource"), "gpx_mongodb_datasource_*")?;
/// # Ok(())
/// # }
/// ```
pub fn find_files(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let matcher = glob::Pattern::new(pattern)
        .with_context(|| format!("Invalid file pattern: {pattern}"))?;

    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?
    {
        let path = entry?.path();
        if path.is_file()
            && let Some(name) = path.file_name()
            && matcher.matches(&name.to_string_lossy())
        {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Sets the Unix permission bits of `path` to `mode`.
///
/// On platforms without Unix permissions this only checks that the file exists.
pub fn set_mode(path: &Path, mode: u32) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        fs::set_permissions(path, fs::Permissions::from_mode(mode)).with_context(|| {
            format!("Failed to set permissions {mode:o} on: {}", path.display())
        })?;
    }

    #[cfg(not(unix))]
    {
        let _ = mode;
        fs::metadata(path).with_context(|| format!("File not found: {}", path.display()))?;
    }

    Ok(())
}
