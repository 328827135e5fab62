use predicates::prelude::*;
use release_kit::test_utils::{PluginProject, TestGit};

use crate::common::{provenance_env, release_tool};

/// Plugin project committed to a fresh repository at 2024-03-05 23:30 UTC.
fn committed_project(version: &str) -> PluginProject {
    let project = PluginProject::new(version);
    let git = TestGit::new(project.path());
    git.init().unwrap();
    // Local date at +0100 would already be 2024-03-06
    git.commit_all_at("release", "1709681400 +0100").unwrap();
    project
}

#[test]
fn test_master_build() {
    let project = committed_project("1.2.3");

    let mut cmd = release_tool("update-plugin-metadata", project.path());
    provenance_env(&mut cmd, "master").assert().success();

    let descriptor = project.plugin_json();
    let info = &descriptor["info"];
    assert_eq!(info["version"], "1.2.3");
    assert_eq!(info["updated"], "2024-03-05");
    assert_eq!(
        info["links"],
        serde_json::json!([
            {"name": "Source", "url": "https://github.com/haohanyang/mongodb-datasource"},
            {"name": "Commit", "url": "https://github.com/haohanyang/mongodb-datasource/commit/abcdef1234567890"},
            {"name": "Build", "url": "https://github.com/haohanyang/mongodb-datasource/actions/runs/9876543210"}
        ])
    );
    assert_eq!(info["description"], "MongoDB data source for Grafana");
    assert_eq!(descriptor["dependencies"]["grafanaDependency"], ">=10.4.0");
}

#[test]
fn test_feature_branch_build() {
    let project = committed_project("1.2.3");

    let mut cmd = release_tool("update-plugin-metadata", project.path());
    provenance_env(&mut cmd, "feature-x").assert().success();

    assert_eq!(project.plugin_json()["info"]["version"], "1.2.3-abcdef1");
}

#[test]
fn test_missing_variable_leaves_descriptor_untouched() {
    let project = committed_project("1.2.3");
    let before = project.plugin_json_bytes();

    for missing in ["GITHUB_REPOSITORY", "GITHUB_SHA", "GITHUB_RUN_ID", "GITHUB_REF_NAME"] {
        let mut cmd = release_tool("update-plugin-metadata", project.path());
        provenance_env(&mut cmd, "master")
            .env_remove(missing)
            .assert()
            .code(1)
            .stderr(predicate::str::contains(format!("Environment variable {missing} is not set")));

        assert_eq!(project.plugin_json_bytes(), before);
    }
}

#[test]
fn test_dry_run_prints_descriptor() {
    let project = committed_project("2.0.0");
    let before = project.plugin_json_bytes();

    let mut cmd = release_tool("update-plugin-metadata", project.path());
    provenance_env(&mut cmd, "master")
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""version": "2.0.0""#));

    assert_eq!(project.plugin_json_bytes(), before);
}

#[test]
fn test_project_dir_option() {
    let project = committed_project("1.0.0");
    let elsewhere = tempfile::TempDir::new().unwrap();

    let mut cmd = release_tool("update-plugin-metadata", elsewhere.path());
    provenance_env(&mut cmd, "master")
        .arg("--project-dir")
        .arg(project.path())
        .assert()
        .success();

    assert_eq!(project.plugin_json()["info"]["version"], "1.0.0");
}

#[test]
fn test_outside_git_repository() {
    let project = PluginProject::new("1.2.3");
    let before = project.plugin_json_bytes();

    let mut cmd = release_tool("update-plugin-metadata", project.path());
    provenance_env(&mut cmd, "master")
        .env("GIT_CEILING_DIRECTORIES", project.path().parent().unwrap())
        .assert()
        .failure()
        .stderr(predicate::str::contains("git show"));

    assert_eq!(project.plugin_json_bytes(), before);
}
