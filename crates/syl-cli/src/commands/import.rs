use std::path::{Path, PathBuf};

use anyhow::Context;
use syl_content::{default_course_dir, load_course};
use syl_core::responses::ImportPlan;

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::ImportArgs;
use crate::output::output;
use crate::progress::Progress;
use crate::ui;

/// Handle `syl import`.
///
/// `--dry-run` only reads files: it needs no connection settings and never
/// opens the database.
pub async fn handle(args: &ImportArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let config = bootstrap::load_config(flags, &flags.overrides(args.resources_root.clone()))?;
    let resources_root = config.content.resources_root.clone();
    let course_dir = course_dir(args, &resources_root);

    let model = load_course(&course_dir, &resources_root, Some(args.course_id.as_str()))
        .with_context(|| format!("failed to load course from {}", course_dir.display()))?;

    if args.dry_run {
        return output(&ImportPlan::from_model(&model), flags.format);
    }

    let params = bootstrap::connection_params(&config)?;
    let db = bootstrap::open_db(&params).await?;

    let progress = Progress::spinner(&format!(
        "Importing {} into {}",
        model.course.course_id,
        params.target()
    ));
    let report = match db.sync_course(&model).await {
        Ok(report) => report,
        Err(error) => {
            progress.finish_err("import rolled back");
            return Err(error).with_context(|| {
                format!("import of {} failed; no changes were committed", model.course.course_id)
            });
        }
    };
    progress.finish_clear();

    ui::note("Done.");
    output(&report, flags.format)
}

fn course_dir(args: &ImportArgs, resources_root: &Path) -> PathBuf {
    args.course_dir
        .clone()
        .unwrap_or_else(|| default_course_dir(resources_root, &args.course_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(course_dir: Option<&str>) -> ImportArgs {
        ImportArgs {
            course_id: "py-101".into(),
            course_dir: course_dir.map(PathBuf::from),
            resources_root: None,
            dry_run: true,
        }
    }

    #[test]
    fn course_dir_defaults_under_resources_root() {
        assert_eq!(
            course_dir(&args(None), Path::new("res")),
            PathBuf::from("res/courses/py-101")
        );
    }

    #[test]
    fn explicit_course_dir_wins() {
        assert_eq!(
            course_dir(&args(Some("/tmp/course")), Path::new("res")),
            PathBuf::from("/tmp/course")
        );
    }
}
