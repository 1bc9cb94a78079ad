use syl_core::responses::SchemaResponse;
use syl_db::schema;

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;
use crate::output::output;
use crate::progress::Progress;
use crate::ui;

/// Handle `syl schema`.
pub async fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    if args.dry_run {
        println!("{}", render_script(&schema::statements()));
        return Ok(());
    }

    let config = bootstrap::load_config(flags, &flags.overrides(None))?;
    let params = bootstrap::connection_params(&config)?;
    let db = bootstrap::open_db(&params).await?;

    let progress = Progress::spinner(&format!("Creating tables in {}", params.target()));
    let statements = match db.apply_schema().await {
        Ok(count) => count,
        Err(error) => {
            progress.finish_err("schema bootstrap failed");
            return Err(error.into());
        }
    };
    progress.finish_clear();

    ui::note(&format!("Done. Created/verified {statements} statements."));
    output(&SchemaResponse { statements }, flags.format)
}

/// Statements terminated with `;` and separated by blank lines.
fn render_script(statements: &[&str]) -> String {
    statements
        .iter()
        .map(|statement| format!("{statement};"))
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_separates_statements_with_blank_lines() {
        let script = render_script(&["CREATE TABLE a (x)", "CREATE TABLE b (y)"]);
        assert_eq!(script, "CREATE TABLE a (x);\n\nCREATE TABLE b (y);");
    }

    #[test]
    fn script_covers_the_whole_schema() {
        let script = render_script(&schema::statements());
        for table in schema::SCHEMA {
            assert!(
                script.contains(&format!("CREATE TABLE IF NOT EXISTS {} (", table.name)),
                "{}",
                table.name
            );
        }
    }
}
