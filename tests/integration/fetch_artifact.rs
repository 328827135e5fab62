use predicates::prelude::*;
use release_kit::test_utils::{build_zip, list_tree};
use tempfile::TempDir;
use wiremock::MockServer;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common::{header_value, received, release_tool, respond};

const ARTIFACTS_PATH: &str = "/repos/haohanyang/mongodb-datasource/actions/artifacts";

fn artifact_listing(server: &MockServer, ids: &[u64]) -> String {
    let artifacts: Vec<_> = ids
        .iter()
        .map(|id| {
            serde_json::json!({
                "id": id,
                "name": "mongodb-datasource",
                "archive_download_url": format!("{}/download/{id}.zip", server.uri()),
                "expired": false,
            })
        })
        .collect();
    serde_json::json!({"total_count": ids.len(), "artifacts": artifacts}).to_string()
}

#[tokio::test]
async fn test_missing_token_fails_before_any_request() {
    let temp = TempDir::new().unwrap();
    let server = MockServer::start().await;

    release_tool("fetch-artifact", temp.path())
        .args(["--api-url", &server.uri()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("GITHUB_PAT"));

    assert!(received(&server).await.is_empty());
    assert!(!temp.path().join("mongodb-datasource").exists());
}

#[tokio::test]
async fn test_empty_token_counts_as_missing() {
    let temp = TempDir::new().unwrap();
    let server = MockServer::start().await;

    release_tool("fetch-artifact", temp.path())
        .args(["--api-url", &server.uri()])
        .env("GITHUB_PAT", "   ")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("GitHub token not set"));

    assert!(received(&server).await.is_empty());
}

#[tokio::test]
async fn test_downloads_and_replaces_target_directory() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("mongodb-datasource");
    std::fs::create_dir_all(&target).unwrap();
    std::fs::write(target.join("unrelated.txt"), "old build").unwrap();

    let server = MockServer::start().await;
    respond(&server, ARTIFACTS_PATH, 200, artifact_listing(&server, &[2, 1])).await;
    respond(
        &server,
        "/download/2.zip",
        200,
        build_zip(&[("plugin.json", "{}"), ("gpx_mongodb_datasource_linux_amd64", "elf")]),
    )
    .await;
    respond(&server, "/download/1.zip", 200, build_zip(&[("older.txt", "")])).await;

    release_tool("fetch-artifact", temp.path())
        .args(["--api-url", &server.uri()])
        .env("GITHUB_PAT", "ghp_test")
        .assert()
        .success();

    assert_eq!(list_tree(&target), vec!["gpx_mongodb_datasource_linux_amd64", "plugin.json"]);

    let requests = received(&server).await;
    assert_eq!(requests.len(), 2);
    for request in &requests {
        assert_eq!(header_value(request, "authorization"), Some("Bearer ghp_test"));
        assert_eq!(header_value(request, "x-github-api-version"), Some("2022-11-28"));
        assert!(header_value(request, "user-agent").unwrap().starts_with("release-kit/"));
    }
    assert_eq!(requests[1].url.path(), "/download/2.zip");
}

#[tokio::test]
async fn test_argument_token_beats_environment() {
    let temp = TempDir::new().unwrap();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ARTIFACTS_PATH))
        .and(header("authorization", "Bearer from-arg"))
        .respond_with(ResponseTemplate::new(200).set_body_string(artifact_listing(&server, &[1])))
        .expect(1)
        .mount(&server)
        .await;
    respond(&server, "/download/1.zip", 200, build_zip(&[("a.txt", "a")])).await;

    release_tool("fetch-artifact", temp.path())
        .args(["from-arg", "--api-url", &server.uri(), "--output", "out"])
        .env("GITHUB_PAT", "from-env")
        .assert()
        .success();

    assert_eq!(list_tree(&temp.path().join("out")), vec!["a.txt"]);
}

#[tokio::test]
async fn test_no_artifacts() {
    let temp = TempDir::new().unwrap();
    let server = MockServer::start().await;
    respond(&server, ARTIFACTS_PATH, 200, r#"{"total_count":0,"artifacts":[]}"#).await;

    release_tool("fetch-artifact", temp.path())
        .args(["ghp_test", "--api-url", &server.uri()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No artifacts found"));

    assert!(!temp.path().join("mongodb-datasource").exists());
}

#[tokio::test]
async fn test_unauthorized_listing() {
    let temp = TempDir::new().unwrap();
    let server = MockServer::start().await;
    respond(&server, ARTIFACTS_PATH, 401, r#"{"message":"Bad credentials"}"#).await;

    release_tool("fetch-artifact", temp.path())
        .args(["bad-token", "--api-url", &server.uri()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("HTTP 401"))
        .stderr(predicate::str::contains("bad-token").not());
}

#[test]
fn test_help_lists_options() {
    let temp = TempDir::new().unwrap();
    release_tool("fetch-artifact", temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--newest"))
        .stdout(predicate::str::contains("--output"))
        .stdout(predicate::str::contains("--api-url").not());
}
