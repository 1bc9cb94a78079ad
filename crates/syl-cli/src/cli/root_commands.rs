use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Create the course and account tables if they do not exist.
    Schema(SchemaArgs),
    /// Import a course directory into the database.
    Import(ImportArgs),
    /// Delete account data, for one user or for everyone.
    Cleanup(CleanupArgs),
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Print the DDL instead of executing it.
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Clone, Debug, Args)]
pub struct ImportArgs {
    /// Course id; also used to locate the default course directory.
    #[arg(long)]
    pub course_id: String,

    /// Course directory (defaults to `<resources-root>/courses/<course-id>`).
    #[arg(long)]
    pub course_dir: Option<PathBuf>,

    /// Root that manifest and question Markdown paths are relative to.
    #[arg(long)]
    pub resources_root: Option<PathBuf>,

    /// Load the course and print the plan without connecting.
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Clone, Debug, Args)]
pub struct CleanupArgs {
    /// Only delete rows owned by this user id.
    #[arg(long)]
    pub user_id: Option<String>,

    /// Print the planned statements without executing them.
    #[arg(long)]
    pub dry_run: bool,
}
