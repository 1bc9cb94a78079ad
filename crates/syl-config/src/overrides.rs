//! Explicit overrides (command-line flags), the highest-priority layer.

use std::path::PathBuf;

use serde::Serialize;

/// Values supplied explicitly by the caller. `None` leaves lower layers intact.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigOverrides {
    pub database: DatabaseOverrides,
    pub content: ContentOverrides,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DatabaseOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ContentOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources_root: Option<PathBuf>,
}
