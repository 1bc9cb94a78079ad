//! # syl-content
//!
//! Builds an in-memory [`CourseModel`] from a course directory without
//! touching the database.
//!
//! Expected layout:
//!
//! ```text
//! <course_dir>/course.json                  manifest: course metadata + chapter tree
//! <course_dir>/questions/chapter-N-qM.json  one file per question
//! <resources_root>/<markdownPath>           subchapter / question Markdown
//! <resources_root>/courses/<id>/questions/chapter-N-eM.md   explanations
//! ```
//!
//! Only a missing or unparsable manifest fails the load. Every deeper
//! problem (missing Markdown, malformed entries, bad question files)
//! degrades to empty content or a skipped entry, logged at `warn`.

pub mod error;
mod files;
pub mod manifest;
pub mod questions;
mod values;

use std::path::{Path, PathBuf};

use syl_core::entities::CourseModel;

pub use error::LoadError;
use questions::QuestionContext;

/// Default course directory: `<resources_root>/courses/<course_id>`.
#[must_use]
pub fn default_course_dir(resources_root: &Path, course_id: &str) -> PathBuf {
    resources_root.join("courses").join(course_id)
}

/// Load a course directory into a [`CourseModel`].
///
/// The course id comes from `course_id_override`, then the manifest `id`,
/// then the directory name.
///
/// # Errors
///
/// Returns [`LoadError`] if the manifest is missing, unreadable, or not a
/// JSON object.
pub fn load_course(
    course_dir: &Path,
    resources_root: &Path,
    course_id_override: Option<&str>,
) -> Result<CourseModel, LoadError> {
    let manifest_map = manifest::read_manifest(course_dir)?;
    let course_id = manifest::resolve_course_id(&manifest_map, course_dir, course_id_override)?;
    tracing::info!(course_id, dir = %course_dir.display(), "loading course");

    let mut model = CourseModel::new(manifest::course_from_manifest(&manifest_map, course_id));
    model.chapters = manifest::chapters_from_manifest(&manifest_map, resources_root);
    model.questions = questions::load_questions(&QuestionContext {
        course_id: &model.course.course_id,
        course_dir,
        resources_root,
    });

    tracing::info!(
        chapters = model.chapters.len(),
        subchapters = model.subchapter_count(),
        questions = model.questions.len(),
        "course loaded"
    );
    Ok(model)
}
