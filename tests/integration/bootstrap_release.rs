use predicates::prelude::*;
use release_kit::test_utils::{build_zip, list_tree};
use tempfile::TempDir;
use wiremock::MockServer;

use crate::common::{header_value, received, release_tool, respond};

const RELEASE_PATH: &str = "/repos/haohanyang/mongodb-datasource/releases/latest";

fn release_json(server: &MockServer) -> String {
    serde_json::json!({
        "tag_name": "v0.4.0",
        "assets": [
            {
                "name": "haohanyang-mongodb-datasource-0.4.0.zip",
                "content_type": "application/zip",
                "browser_download_url": format!("{}/assets/plugin.zip", server.uri()),
            },
            {
                "name": "haohanyang-mongodb-datasource-0.4.0.zip.md5",
                "content_type": "text/plain",
                "browser_download_url": format!("{}/assets/plugin.zip.md5", server.uri()),
            }
        ]
    })
    .to_string()
}

#[tokio::test]
async fn test_installs_latest_release() {
    let temp = TempDir::new().unwrap();
    let stale = temp.path().join("mongodb-datasource");
    std::fs::create_dir_all(&stale).unwrap();
    std::fs::write(stale.join("stale.js"), "old").unwrap();

    let server = MockServer::start().await;
    respond(&server, RELEASE_PATH, 200, release_json(&server)).await;
    respond(
        &server,
        "/assets/plugin.zip",
        200,
        build_zip(&[
            ("haohanyang-mongodb-datasource/plugin.json", "{}"),
            ("haohanyang-mongodb-datasource/module.js", "js"),
            ("haohanyang-mongodb-datasource/gpx_mongodb_datasource_linux_amd64", "elf"),
        ]),
    )
    .await;

    release_tool("bootstrap-release", temp.path())
        .args(["--no-start", "--api-url", &server.uri()])
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "Downloading haohanyang-mongodb-datasource-0.4.0.zip",
        ));

    assert_eq!(
        list_tree(&stale),
        vec!["gpx_mongodb_datasource_linux_amd64", "module.js", "plugin.json"]
    );
    assert!(!temp.path().join("haohanyang-mongodb-datasource").exists());

    // Only the zip asset is downloaded, without credentials
    let requests = received(&server).await;
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].url.path(), "/assets/plugin.zip");
    assert!(requests.iter().all(|r| header_value(r, "authorization").is_none()));

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(stale.join("gpx_mongodb_datasource_linux_amd64"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o755);
    }
}

#[tokio::test]
async fn test_work_dir_option() {
    let temp = TempDir::new().unwrap();
    let server = MockServer::start().await;
    respond(&server, RELEASE_PATH, 200, release_json(&server)).await;
    respond(
        &server,
        "/assets/plugin.zip",
        200,
        build_zip(&[("haohanyang-mongodb-datasource/plugin.json", "{}")]),
    )
    .await;

    let work_dir = temp.path().join("deploy");
    std::fs::create_dir_all(&work_dir).unwrap();

    release_tool("bootstrap-release", temp.path())
        .args(["--no-start", "--dir", "deploy", "--api-url", &server.uri()])
        .assert()
        .success();

    assert_eq!(list_tree(&work_dir.join("mongodb-datasource")), vec!["plugin.json"]);
    assert!(!temp.path().join("mongodb-datasource").exists());
}

#[tokio::test]
async fn test_release_without_zip_asset() {
    let temp = TempDir::new().unwrap();
    let server = MockServer::start().await;
    respond(&server, RELEASE_PATH, 200, r#"{"tag_name":"v0.4.0","assets":[]}"#).await;

    release_tool("bootstrap-release", temp.path())
        .args(["--no-start", "--api-url", &server.uri()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("has no application/zip asset"));
}

#[tokio::test]
async fn test_missing_release() {
    let temp = TempDir::new().unwrap();
    let server = MockServer::start().await;

    release_tool("bootstrap-release", temp.path())
        .args(["--no-start", "--api-url", &server.uri()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("HTTP 404"));
}
