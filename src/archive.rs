//! Unpacking downloaded zip archives.
//!
//! Downloads are spooled to a [`tempfile::NamedTempFile`] and extracted from
//! there. The temporary file is deleted when it goes out of scope, whether the
//! extraction succeeded or not.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{Seek, SeekFrom, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::core::ReleaseError;
use crate::utils::fs::ensure_dir;

/// Writes `bytes` to a fresh temporary file, rewound to the start.
pub fn spool(bytes: &[u8]) -> Result<NamedTempFile> {
    let mut temp = NamedTempFile::new().context("Failed to create temporary download file")?;
    temp.write_all(bytes).context("Failed to write temporary download file")?;
    temp.flush()?;
    temp.as_file_mut().seek(SeekFrom::Start(0))?;

    debug!("Spooled {} bytes to {}", bytes.len(), temp.path().display());
    Ok(temp)
}

/// Extracts every entry of the zip at `archive` into `dest`.
///
/// Existing files with the same names are overwritten; other files in `dest`
/// are left alone. Entries whose paths would escape `dest` are rejected by
/// the zip reader.
pub fn extract_zip(archive: &Path, dest: &Path) -> Result<()> {
    let file = File::open(archive)
        .with_context(|| format!("Failed to open archive: {}", archive.display()))?;
    extract_from(file, archive, dest)
}

/// Spools `bytes` to a temporary file and extracts it into `dest`.
pub fn unpack_bytes(bytes: &[u8], dest: &Path) -> Result<()> {
    let temp = spool(bytes)?;
    extract_zip(temp.path(), dest)
}

fn extract_from(file: File, archive: &Path, dest: &Path) -> Result<()> {
    let to_error = |e: zip::result::ZipError| ReleaseError::ArchiveError {
        path: archive.display().to_string(),
        reason: e.to_string(),
    };

    let mut zip = zip::ZipArchive::new(file).map_err(to_error)?;
    debug!("Extracting {} entries into {}", zip.len(), dest.display());

    ensure_dir(dest)?;
    zip.extract(dest).map_err(to_error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{build_zip, list_tree};
    use tempfile::tempdir;

    #[test]
    fn test_unpack_bytes() {
        let temp = tempdir().unwrap();
        let bytes = build_zip(&[("plugin.json", "{}"), ("img/logo.svg", "<svg/>")]);

        unpack_bytes(&bytes, temp.path()).unwrap();
        assert_eq!(list_tree(temp.path()), vec!["img/logo.svg", "plugin.json"]);
        assert_eq!(std::fs::read_to_string(temp.path().join("plugin.json")).unwrap(), "{}");
    }

    #[test]
    fn test_unpack_creates_destination() {
        let temp = tempdir().unwrap();
        let dest = temp.path().join("new/dir");

        unpack_bytes(&build_zip(&[("a.txt", "a")]), &dest).unwrap();
        assert!(dest.join("a.txt").is_file());
    }

    #[test]
    fn test_invalid_archive() {
        let temp = tempdir().unwrap();
        let err = unpack_bytes(b"definitely not a zip", temp.path()).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ReleaseError>(),
            Some(ReleaseError::ArchiveError { .. })
        ));
    }

    #[test]
    fn test_spool_file_is_removed_on_drop() {
        let temp = spool(b"payload").unwrap();
        let path = temp.path().to_path_buf();
        assert_eq!(std::fs::read(&path).unwrap(), b"payload");

        drop(temp);
        assert!(!path.exists());
    }
}
