use std::path::PathBuf;

use clap::{Args, ValueEnum};
use syl_config::{ConfigOverrides, ContentOverrides, DatabaseOverrides};

/// Shared output mode across all commands.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Raw,
}

/// Connection flags. Each one overrides the config file and environment.
#[derive(Clone, Debug, Default, Args)]
pub struct ConnectionArgs {
    /// Config file: TOML, or an `application.properties` with
    /// `spring.datasource.*` keys
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Database host
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Database port
    #[arg(long, global = true)]
    pub port: Option<u16>,

    /// Database name (file path for local databases)
    #[arg(long, global = true)]
    pub database: Option<String>,

    /// Database user
    #[arg(long, global = true)]
    pub user: Option<String>,

    /// Database password (auth token for libSQL servers)
    #[arg(long, global = true)]
    pub password: Option<String>,
}

/// Global flags available before or after subcommands.
#[derive(Clone, Debug)]
pub struct GlobalFlags {
    pub format: OutputFormat,
    pub quiet: bool,
    pub connection: ConnectionArgs,
}

impl GlobalFlags {
    /// Config overrides from the connection flags plus an optional
    /// resources root.
    #[must_use]
    pub fn overrides(&self, resources_root: Option<PathBuf>) -> ConfigOverrides {
        ConfigOverrides {
            database: DatabaseOverrides {
                url: None,
                host: self.connection.host.clone(),
                port: self.connection.port,
                name: self.connection.database.clone(),
                user: self.connection.user.clone(),
                password: self.connection.password.clone(),
            },
            content: ContentOverrides { resources_root },
        }
    }
}
