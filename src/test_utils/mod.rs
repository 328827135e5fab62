//! Test utilities for release-kit
//!
//! Helpers shared by the unit tests and by the binary-level tests under
//! `tests/` (which enable them through the `test-utils` feature):
//! - fakes for the external-tool traits ([`FakeGitHub`], [`RecordingLauncher`],
//!   [`FixedCommitTime`])
//! - fixture builders for zip archives and plugin project directories
//! - [`TestGit`] for creating throwaway repositories with pinned commit times
//!
//! # Example
//!
//! ```rust,no_run
//! use release_kit::test_utils::{PluginProject, build_zip, list_tree};
//!
//! let project = PluginProject::new("1.2.3");
//! let archive = build_zip(&[("plugin.json", "{}")]);
//! assert!(!archive.is_empty());
//! assert_eq!(list_tree(project.path()), vec!["package.json", "src/plugin.json"]);
//! ```

pub mod fakes;
pub mod fixtures;
pub mod git_helper;

pub use fakes::{FakeGitHub, FixedCommitTime, RecordingLauncher};
pub use fixtures::{
    PluginProject, artifact, build_zip, list_tree, sample_plugin_json, zip_asset,
};
pub use git_helper::TestGit;
