use serde::{Deserialize, Serialize};

use super::{Chapter, Question};

/// Course-level metadata. Natural key: `course_id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Course {
    pub course_id: String,
    pub title: String,
    pub description: Option<String>,
    pub language: Option<String>,
    pub cover_image_url: Option<String>,
    /// Target-audience metadata, kept as serialized JSON text.
    pub target_students_json: Option<String>,
    pub published: bool,
}

impl Course {
    /// A course carrying only its id; the title defaults to the id.
    #[must_use]
    pub fn new(course_id: impl Into<String>) -> Self {
        let course_id = course_id.into();
        Self {
            title: course_id.clone(),
            course_id,
            description: None,
            language: None,
            cover_image_url: None,
            target_students_json: None,
            published: true,
        }
    }
}

/// Everything the loader read from one course directory.
///
/// Questions are kept apart from the chapter tree: they come from a separate
/// directory scan and may reference chapters the manifest never declared.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CourseModel {
    pub course: Course,
    pub chapters: Vec<Chapter>,
    pub questions: Vec<Question>,
}

impl CourseModel {
    #[must_use]
    pub const fn new(course: Course) -> Self {
        Self {
            course,
            chapters: Vec::new(),
            questions: Vec::new(),
        }
    }

    #[must_use]
    pub fn subchapter_count(&self) -> usize {
        self.chapters.iter().map(|c| c.subchapters.len()).sum()
    }

    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.questions.iter().map(|q| q.slots.len()).sum()
    }

    #[must_use]
    pub fn slot_option_count(&self) -> usize {
        self.questions
            .iter()
            .flat_map(|q| q.slots.iter())
            .map(|s| s.options.len())
            .sum()
    }

    #[must_use]
    pub fn question_option_count(&self) -> usize {
        self.questions.iter().map(|q| q.options.len()).sum()
    }
}
