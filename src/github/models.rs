//! Response shapes of the GitHub REST API endpoints the tools call.
//!
//! Only the fields the tools read are modelled; serde ignores the rest.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of `GET /repos/{owner}/{repo}/actions/artifacts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactList {
    pub artifacts: Vec<Artifact>,
}

/// A workflow run artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub name: String,
    /// Authenticated URL of the zipped artifact
    pub archive_download_url: String,
    /// Expired artifacts are listed but can no longer be downloaded
    #[serde(default)]
    pub expired: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body of `GET /repos/{owner}/{repo}/releases/latest`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    #[serde(default)]
    pub tag_name: String,
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
}

/// A file attached to a release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseAsset {
    pub name: String,
    pub content_type: String,
    pub browser_download_url: String,
}

impl Release {
    /// Assets with the given content type, in the order the API listed them.
    pub fn assets_of_type<'a>(
        &'a self,
        content_type: &'a str,
    ) -> impl Iterator<Item = &'a ReleaseAsset> + 'a {
        self.assets.iter().filter(move |asset| asset.content_type == content_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_list_ignores_unknown_fields() {
        let json = r#"{
            "total_count": 2,
            "artifacts": [
                {
                    "id": 11,
                    "node_id": "MDg6QXJ0aWZhY3QxMQ==",
                    "name": "mongodb-datasource",
                    "size_in_bytes": 556,
                    "archive_download_url": "https://api.github.com/repos/o/r/actions/artifacts/11/zip",
                    "expired": false,
                    "created_at": "2024-03-05T12:00:00Z"
                },
                {
                    "archive_download_url": "https://api.github.com/repos/o/r/actions/artifacts/10/zip"
                }
            ]
        }"#;

        let list: ArtifactList = serde_json::from_str(json).unwrap();
        assert_eq!(list.artifacts.len(), 2);
        assert!(!list.artifacts[0].expired);
        assert_eq!(list.artifacts[0].id, 11);
        assert_eq!(list.artifacts[0].created_at.unwrap().to_rfc3339(), "2024-03-05T12:00:00+00:00");
        assert_eq!(list.artifacts[1].name, "");
        assert!(list.artifacts[1].created_at.is_none());
    }

    #[test]
    fn test_artifact_list_requires_artifacts() {
        assert!(serde_json::from_str::<ArtifactList>(r#"{"total_count": 0}"#).is_err());
    }

    #[test]
    fn test_release_assets_of_type() {
        let json = r#"{
            "tag_name": "v1.2.3",
            "assets": [
                {"name": "plugin.zip", "content_type": "application/zip", "browser_download_url": "https://x/1"},
                {"name": "plugin.zip.sha1", "content_type": "text/plain", "browser_download_url": "https://x/2"},
                {"name": "other.zip", "content_type": "application/zip", "browser_download_url": "https://x/3"}
            ]
        }"#;

        let release: Release = serde_json::from_str(json).unwrap();
        let names: Vec<_> =
            release.assets_of_type("application/zip").map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["plugin.zip", "other.zip"]);
    }
}
