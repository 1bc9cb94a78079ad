//! Content location configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_resources_root() -> PathBuf {
    PathBuf::from("src/main/resources")
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ContentConfig {
    /// Root that manifest and question resource paths are relative to.
    #[serde(default = "default_resources_root")]
    pub resources_root: PathBuf,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            resources_root: default_resources_root(),
        }
    }
}
