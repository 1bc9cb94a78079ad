use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Schema(args) => commands::schema::handle(&args, flags).await,
        Commands::Import(args) => commands::import::handle(&args, flags).await,
        Commands::Cleanup(args) => commands::cleanup::handle(&args, flags).await,
    }
}
