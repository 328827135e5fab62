//! Common helpers for the release-kit integration tests
//!
//! Every binary runs with a scrubbed environment: the GitHub Actions
//! variables, credentials, API overrides and proxy settings of the machine
//! running the tests must not leak into the command under test.

// Not every helper is used by every test module
#![allow(dead_code)]

use assert_cmd::Command;
use std::path::Path;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

/// Variables removed from every command's environment.
const SCRUBBED_VARS: &[&str] = &[
    "GITHUB_PAT",
    "GITHUB_API_URL",
    "GITHUB_REPOSITORY",
    "GITHUB_SHA",
    "GITHUB_RUN_ID",
    "GITHUB_REF_NAME",
    "RUST_LOG",
    "HTTP_PROXY",
    "HTTPS_PROXY",
    "ALL_PROXY",
    "http_proxy",
    "https_proxy",
    "all_proxy",
];

/// Command for one of the crate's binaries, run from `cwd`.
pub fn release_tool(bin: &str, cwd: &Path) -> Command {
    let mut cmd = Command::cargo_bin(bin).unwrap();
    for var in SCRUBBED_VARS {
        cmd.env_remove(var);
    }
    cmd.env("NO_COLOR", "1").current_dir(cwd);
    cmd
}

/// CI provenance variables as GitHub Actions would export them.
pub fn provenance_env<'a>(cmd: &'a mut Command, branch: &str) -> &'a mut Command {
    cmd.env("GITHUB_REPOSITORY", "haohanyang/mongodb-datasource")
        .env("GITHUB_SHA", "abcdef1234567890")
        .env("GITHUB_RUN_ID", "9876543210")
        .env("GITHUB_REF_NAME", branch)
}

/// Serves `body` with `status` for `GET` requests to `route`.
pub async fn respond(server: &MockServer, route: &str, status: u16, body: impl Into<Vec<u8>>) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_bytes(body.into()))
        .mount(server)
        .await;
}

/// Requests the mock API has received so far, oldest first.
pub async fn received(server: &MockServer) -> Vec<Request> {
    server.received_requests().await.unwrap()
}

/// Value of `name` on `request`, if present.
pub fn header_value<'a>(request: &'a Request, name: &str) -> Option<&'a str> {
    request.headers.get(name).and_then(|value| value.to_str().ok())
}
