//! Fixture builders: zip archives, API models and plugin project layouts.

use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;

use crate::constants::{PACKAGE_DESCRIPTOR_PATH, PLUGIN_DESCRIPTOR_PATH, ZIP_CONTENT_TYPE};
use crate::github::{Artifact, ReleaseAsset};

/// Builds an in-memory zip holding `(path, contents)` entries.
///
/// Parent directories are implied by the `/`-separated entry paths.
pub fn build_zip(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (name, contents) in entries {
        writer.start_file(*name, SimpleFileOptions::default()).unwrap();
        writer.write_all(contents.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// Relative paths (with `/` separators) of every file under `root`, sorted.
///
/// Panics when `root` or anything below it cannot be read.
pub fn list_tree(root: &Path) -> Vec<String> {
    let mut files: Vec<String> = WalkDir::new(root)
        .into_iter()
        .map(|entry| entry.unwrap())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| {
            let relative = entry.path().strip_prefix(root).unwrap();
            let parts: Vec<_> =
                relative.components().map(|c| c.as_os_str().to_string_lossy()).collect();
            parts.join("/")
        })
        .collect();
    files.sort();
    files
}

/// An artifact listing entry downloading from `url`.
pub fn artifact(id: u64, url: &str, created_at: Option<&str>) -> Artifact {
    Artifact {
        id,
        name: format!("artifact-{id}"),
        archive_download_url: url.to_string(),
        expired: false,
        created_at: created_at.map(|t| t.parse().unwrap()),
    }
}

/// A zip release asset downloading from `url`.
pub fn zip_asset(name: &str, url: &str) -> ReleaseAsset {
    ReleaseAsset {
        name: name.to_string(),
        content_type: ZIP_CONTENT_TYPE.to_string(),
        browser_download_url: url.to_string(),
    }
}

/// A representative `src/plugin.json`, compactly formatted.
pub fn sample_plugin_json() -> &'static str {
    r#"{"$schema":"https://raw.githubusercontent.com/grafana/grafana/main/docs/sources/developers/plugins/plugin.schema.json","type":"datasource","name":"MongoDB","id":"haohanyang-mongodb-datasource","metrics":true,"backend":true,"executable":"gpx_mongodb_datasource","info":{"description":"MongoDB data source for Grafana","author":{"name":"Haohan Yang"},"keywords":["datasource","mongodb"],"logos":{"small":"img/logo.svg","large":"img/logo.svg"},"links":[{"name":"Placeholder","url":"https://example.com"}],"screenshots":[],"version":"%VERSION%","updated":"%TODAY%"},"dependencies":{"grafanaDependency":">=10.4.0","plugins":[]}}"#
}

/// A throwaway plugin checkout: `src/plugin.json` and `package.json` in a temp dir.
pub struct PluginProject {
    dir: TempDir,
}

impl PluginProject {
    /// Project with [`sample_plugin_json`] and a `package.json` at `version`.
    pub fn new(version: &str) -> Self {
        Self::with_descriptor(sample_plugin_json(), version)
    }

    /// Project with a custom `plugin.json` body.
    pub fn with_descriptor(plugin_json: &str, version: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("src")).unwrap();
        std::fs::write(dir.path().join(PLUGIN_DESCRIPTOR_PATH), plugin_json).unwrap();
        std::fs::write(
            dir.path().join(PACKAGE_DESCRIPTOR_PATH),
            format!(r#"{{"name":"mongodb-datasource","version":"{version}","private":true}}"#),
        )
        .unwrap();

        Self {
            dir,
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn plugin_json_path(&self) -> PathBuf {
        self.dir.path().join(PLUGIN_DESCRIPTOR_PATH)
    }

    /// Current bytes of `src/plugin.json`.
    pub fn plugin_json_bytes(&self) -> Vec<u8> {
        std::fs::read(self.plugin_json_path()).unwrap()
    }

    /// `src/plugin.json` parsed as a JSON value.
    pub fn plugin_json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.plugin_json_bytes()).unwrap()
    }
}
