//! Plan and report types printed by `syl` commands.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::CourseModel;

/// Row counts an import would write, computed from the model alone.
///
/// Printed by `syl import --dry-run`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImportPlan {
    pub course_id: String,
    pub chapters: usize,
    pub subchapters: usize,
    pub questions: usize,
    pub slots: usize,
    pub slot_options: usize,
    pub question_options: usize,
}

impl ImportPlan {
    #[must_use]
    pub fn from_model(model: &CourseModel) -> Self {
        Self {
            course_id: model.course.course_id.clone(),
            chapters: model.chapters.len(),
            subchapters: model.subchapter_count(),
            questions: model.questions.len(),
            slots: model.slot_count(),
            slot_options: model.slot_option_count(),
            question_options: model.question_option_count(),
        }
    }
}

/// Upserts issued by one committed synchronization run, per entity kind.
///
/// `chapters` includes chapters synthesized for orphaned questions, which are
/// also counted separately in `synthesized_chapters`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SyncReport {
    pub course_id: String,
    pub chapters: usize,
    pub synthesized_chapters: usize,
    pub subchapters: usize,
    pub questions: usize,
    pub question_options: usize,
    pub slots: usize,
    pub slot_options: usize,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Outcome of one statement of a cleanup batch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CleanupOutcome {
    pub statement: String,
    pub params: Vec<String>,
    pub affected_rows: u64,
}

/// Response from `syl schema`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SchemaResponse {
    pub statements: usize,
}
