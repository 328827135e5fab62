//! Build provenance taken from the CI environment.

use crate::constants::{
    ENV_REF_NAME, ENV_REPOSITORY, ENV_RUN_ID, ENV_SHA, RELEASE_BRANCH, SHORT_SHA_LEN,
};
use crate::core::ReleaseError;

use super::descriptor::PluginLink;

/// Identifying data about the CI build, all non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provenance {
    /// `owner/name`
    pub repository: String,
    pub sha: String,
    pub run_id: String,
    pub branch: String,
}

impl Provenance {
    /// Reads the GitHub Actions variables of the current process.
    pub fn from_env() -> Result<Self, ReleaseError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the four variables through `lookup`, in a fixed order.
    ///
    /// The first unset or empty variable is reported as
    /// [`ReleaseError::MissingEnvVar`].
    pub fn from_lookup(
        mut lookup: impl FnMut(&str) -> Option<String>,
    ) -> Result<Self, ReleaseError> {
        let mut required = |name: &str| {
            lookup(name).filter(|value| !value.is_empty()).ok_or_else(|| {
                ReleaseError::MissingEnvVar {
                    name: name.to_string(),
                }
            })
        };

        Ok(Self {
            repository: required(ENV_REPOSITORY)?,
            sha: required(ENV_SHA)?,
            run_id: required(ENV_RUN_ID)?,
            branch: required(ENV_REF_NAME)?,
        })
    }

    /// `Source`, `Commit` and `Build` links, in that order.
    pub fn links(&self) -> Vec<PluginLink> {
        let repo_url = format!("https://github.com/{}", self.repository);
        vec![
            PluginLink::new("Source", repo_url.clone()),
            PluginLink::new("Commit", format!("{repo_url}/commit/{}", self.sha)),
            PluginLink::new("Build", format!("{repo_url}/actions/runs/{}", self.run_id)),
        ]
    }

    /// Plugin version for a build of `package_version` on this branch.
    pub fn plugin_version(&self, package_version: &str) -> String {
        compute_version(package_version, &self.branch, &self.sha)
    }
}

/// Release-branch builds carry the bare version; every other branch gets
/// `-{short sha}` appended.
pub fn compute_version(version: &str, branch: &str, sha: &str) -> String {
    if branch == RELEASE_BRANCH {
        version.to_string()
    } else {
        let short = sha.get(..SHORT_SHA_LEN).unwrap_or(sha);
        format!("{version}-{short}")
    }
}
