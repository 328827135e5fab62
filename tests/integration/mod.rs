//! Integration test suite for release-kit
//!
//! Runs the three binaries end to end against temporary directories, a local
//! mock of the GitHub API and throwaway git repositories.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **fetch_artifact**: credential handling, listing, download and extraction
//! - **bootstrap_release**: release lookup, unpacking and permissions (`--no-start`)
//! - **update_metadata**: provenance variables, git timestamp and descriptor rewrite

#[path = "../common/mod.rs"]
mod common;

mod bootstrap_release;
mod fetch_artifact;
mod update_metadata;
