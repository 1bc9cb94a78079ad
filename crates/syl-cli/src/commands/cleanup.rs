use serde::Serialize;
use syl_db::CleanupPlan;

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::CleanupArgs;
use crate::output::output;
use crate::progress::Progress;
use crate::ui;

#[derive(Debug, Serialize)]
struct CleanupDryRunResponse {
    dry_run: bool,
    target: String,
    statements: Vec<String>,
}

/// Handle `syl cleanup`.
pub async fn handle(args: &CleanupArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let config = bootstrap::load_config(flags, &flags.overrides(None))?;
    let params = bootstrap::connection_params(&config)?;
    let plan = CleanupPlan::new(args.user_id.as_deref());

    if args.dry_run {
        return output(
            &CleanupDryRunResponse {
                dry_run: true,
                target: params.target(),
                statements: plan.statements.iter().map(|s| s.preview()).collect(),
            },
            flags.format,
        );
    }

    let db = bootstrap::open_db(&params).await?;
    let progress = Progress::spinner(&format!("Cleaning up {}", params.target()));
    let outcomes = match db.run_cleanup(&plan).await {
        Ok(outcomes) => outcomes,
        Err(error) => {
            progress.finish_err("cleanup rolled back");
            return Err(error.into());
        }
    };
    progress.finish_clear();

    ui::note("Done.");
    output(&outcomes, flags.format)
}
