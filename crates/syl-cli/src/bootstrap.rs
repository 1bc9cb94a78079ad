use anyhow::Context;
use syl_config::{ConfigOverrides, ConnectionParams, SylConfig};
use syl_db::CourseDb;

use crate::cli::GlobalFlags;

/// Load `.env` and the layered config, with `overrides` on top.
pub fn load_config(flags: &GlobalFlags, overrides: &ConfigOverrides) -> anyhow::Result<SylConfig> {
    SylConfig::load_with_dotenv(flags.connection.config.as_deref(), overrides)
        .context("failed to load configuration")
}

/// Resolve connection parameters. Fails before any database work when a
/// required field is missing or the URL is malformed.
pub fn connection_params(config: &SylConfig) -> anyhow::Result<ConnectionParams> {
    let params = config
        .database
        .resolve()
        .context("invalid database configuration")?;
    tracing::debug!(scheme = %params.scheme, target = %params.target(), "resolved connection");
    Ok(params)
}

pub async fn open_db(params: &ConnectionParams) -> anyhow::Result<CourseDb> {
    CourseDb::connect(params)
        .await
        .with_context(|| format!("failed to open database at {}", params.target()))
}
