//! # syl-config
//!
//! Layered configuration loading for Syllabus using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Explicit overrides (command-line flags)
//! 2. Environment variables: `SYLLABUS_*` with `__` as separator, plus the
//!    short aliases `DB_HOST`, `DB_PORT`, `DB_NAME`, `DB_USER`, `DB_PASSWORD`
//!    and `SPRING_DATASOURCE_URL|USERNAME|PASSWORD`
//! 3. An explicit `--config` file (TOML, or `.properties`)
//! 4. Project-level `.syllabus/config.toml`
//! 5. User-level `~/.config/syllabus/config.toml`
//! 6. Built-in defaults
//!
//! # Usage
//!
//! ```no_run
//! use syl_config::{ConfigOverrides, SylConfig};
//!
//! let config = SylConfig::load_with_dotenv(None, &ConfigOverrides::default()).expect("config");
//! let params = config.database.resolve().expect("connection params");
//! println!("target: {}", params.target());
//! ```

mod content;
mod database;
mod error;
mod overrides;
mod properties;
mod url_layer;

pub use content::ContentConfig;
pub use database::{ConnectionParams, DatabaseConfig, UrlParts, parse_database_url};
pub use error::ConfigError;
pub use overrides::{ConfigOverrides, ContentOverrides, DatabaseOverrides};
pub use properties::parse_properties;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use properties::PropertiesLayer;
use url_layer::ExpandUrl;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SylConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub content: ContentConfig,
}

impl SylConfig {
    /// Load configuration from all sources.
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if an explicit config file is missing or
    /// unreadable, or if the merged values fail to extract.
    pub fn load(
        config_file: Option<&Path>,
        overrides: &ConfigOverrides,
    ) -> Result<Self, ConfigError> {
        Self::figment(config_file, overrides)?
            .extract()
            .map_err(ConfigError::from)
    }

    /// Load `.env` from the current directory (if any), then [`Self::load`].
    ///
    /// # Errors
    ///
    /// See [`Self::load`].
    pub fn load_with_dotenv(
        config_file: Option<&Path>,
        overrides: &ConfigOverrides,
    ) -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load(config_file, overrides)
    }

    /// Build the figment provider chain.
    ///
    /// Each layer's `database.url` is expanded into that layer's `host`,
    /// `port` and `name` before merging, so a URL from a higher layer
    /// replaces a lower layer's target.
    ///
    /// Public so tests can inspect the figment directly.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::FileNotFound` if `config_file` does not exist and
    /// `ConfigError::Io` if a properties file cannot be read.
    pub fn figment(
        config_file: Option<&Path>,
        overrides: &ConfigOverrides,
    ) -> Result<Figment, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(ExpandUrl(Toml::file(global_path)));
            }
        }

        let local_path = PathBuf::from(".syllabus/config.toml");
        if local_path.exists() {
            figment = figment.merge(ExpandUrl(Toml::file(local_path)));
        }

        if let Some(path) = config_file {
            if !path.exists() {
                return Err(ConfigError::FileNotFound {
                    path: path.to_path_buf(),
                });
            }
            figment = if is_properties_file(path) {
                figment.merge(ExpandUrl(Serialized::defaults(PropertiesLayer::read(path)?)))
            } else {
                figment.merge(ExpandUrl(Toml::file(path)))
            };
        }

        figment = figment
            .merge(ExpandUrl(Env::prefixed("SYLLABUS_").split("__")))
            .merge(ExpandUrl(short_env_aliases()))
            .merge(ExpandUrl(Serialized::defaults(overrides)));

        Ok(figment)
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("syllabus").join("config.toml"))
    }
}

fn is_properties_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("properties"))
}

/// Unprefixed variables shared with the application's own deployment.
fn short_env_aliases() -> Env {
    Env::raw().filter_map(|key| {
        let mapped = match key.as_str().to_ascii_uppercase().as_str() {
            "DB_HOST" => "database.host",
            "DB_PORT" => "database.port",
            "DB_NAME" => "database.name",
            "DB_USER" => "database.user",
            "DB_PASSWORD" => "database.password",
            "SPRING_DATASOURCE_URL" => "database.url",
            "SPRING_DATASOURCE_USERNAME" => "database.user",
            "SPRING_DATASOURCE_PASSWORD" => "database.password",
            _ => return None,
        };
        Some(mapped.into())
    })
}
