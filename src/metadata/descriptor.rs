//! Typed views of `src/plugin.json` and `package.json`.
//!
//! Only the fields the updater writes are modelled. Everything else is kept
//! in `#[serde(flatten)]` pass-through maps so a load/save cycle never drops a
//! key the plugin build or Grafana relies on.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The plugin descriptor (`src/plugin.json`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginDescriptor {
    pub info: PluginInfo,

    /// All top-level keys besides `info`
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The `info` object of the plugin descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginInfo {
    #[serde(default)]
    pub links: Vec<PluginLink>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Release date, `YYYY-MM-DD`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,

    /// Description, author, logos, keywords, ...
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An entry of `info.links`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginLink {
    pub name: String,
    pub url: String,
}

impl PluginLink {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// The package descriptor (`package.json`); only `version` is read.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PackageDescriptor {
    pub version: String,
}
