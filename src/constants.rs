//! Fixed names, paths and endpoints shared by the release tools.
//!
//! Everything here describes the single repository these tools serve. Values
//! that callers may want to override (repository, directories) are only the
//! defaults; the CLI exposes flags for them.

/// Repository the artifacts and releases are fetched from.
pub const DEFAULT_REPOSITORY: &str = "haohanyang/mongodb-datasource";

/// Base URL of the GitHub REST API.
pub const GITHUB_API_URL: &str = "https://api.github.com";

/// Media type pinned in the `Accept` header of every API call.
pub const GITHUB_ACCEPT: &str = "application/vnd.github+json";

/// Value of the `X-GitHub-Api-Version` header.
pub const GITHUB_API_VERSION: &str = "2022-11-28";

/// Header carrying [`GITHUB_API_VERSION`].
pub const GITHUB_API_VERSION_HEADER: &str = "X-GitHub-Api-Version";

/// `User-Agent` sent with every request. GitHub rejects requests without one.
pub const USER_AGENT: &str = concat!("release-kit/", env!("CARGO_PKG_VERSION"));

/// Environment variable holding the personal access token for the artifact API.
pub const CREDENTIAL_ENV: &str = "GITHUB_PAT";

/// Directory the plugin is unpacked into, relative to the working directory.
pub const PLUGIN_DIR: &str = "mongodb-datasource";

/// Top-level directory inside the release zip (the plugin id).
pub const ARCHIVE_ROOT: &str = "haohanyang-mongodb-datasource";

/// Content type identifying zip release assets.
pub const ZIP_CONTENT_TYPE: &str = "application/zip";

/// Glob matching the plugin backend executables inside [`PLUGIN_DIR`].
pub const EXECUTABLE_PATTERN: &str = "gpx_mongodb_datasource_*";

/// Permission bits applied to the plugin backend executables.
pub const EXECUTABLE_MODE: u32 = 0o755;

/// Compose file used to start the local Grafana stack.
pub const COMPOSE_FILE: &str = "docker-compose.prod.yaml";

/// Plugin descriptor, relative to the project root.
pub const PLUGIN_DESCRIPTOR_PATH: &str = "src/plugin.json";

/// Package descriptor holding the plugin version, relative to the project root.
pub const PACKAGE_DESCRIPTOR_PATH: &str = "package.json";

/// Branch whose builds carry the bare package version.
pub const RELEASE_BRANCH: &str = "master";

/// Number of commit SHA characters appended to pre-release versions.
pub const SHORT_SHA_LEN: usize = 7;

// CI provenance variables, as exported by GitHub Actions
pub const ENV_REPOSITORY: &str = "GITHUB_REPOSITORY";
pub const ENV_SHA: &str = "GITHUB_SHA";
pub const ENV_RUN_ID: &str = "GITHUB_RUN_ID";
pub const ENV_REF_NAME: &str = "GITHUB_REF_NAME";
