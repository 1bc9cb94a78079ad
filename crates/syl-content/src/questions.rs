//! Question file scanning.
//!
//! Questions live in `<course_dir>/questions/chapter-<N>-q<M>.json`, one file
//! per question, independently of the manifest's chapter tree.

use std::path::{Path, PathBuf};

use globset::{Glob, GlobMatcher};
use serde_json::{Map, Value};
use syl_core::entities::{AnswerOption, Question, QuestionSlot};
use syl_core::ids;

use crate::files::{read_optional_text, resolve_resource};
use crate::values::{array_field, safe_int, string_field, truthy};

pub const QUESTIONS_DIR: &str = "questions";
const QUESTION_FILE_GLOB: &str = "chapter-*-q*.json";

/// Where question files, explanations, and Markdown are looked up.
#[derive(Debug, Clone, Copy)]
pub struct QuestionContext<'a> {
    pub course_id: &'a str,
    pub course_dir: &'a Path,
    pub resources_root: &'a Path,
}

impl QuestionContext<'_> {
    /// `<resources_root>/courses/<course_id>/questions/chapter-<n>-e<m>.md`
    #[must_use]
    pub fn explanation_path(&self, chapter_number: i64, question_number: i64) -> PathBuf {
        self.resources_root
            .join("courses")
            .join(self.course_id)
            .join(QUESTIONS_DIR)
            .join(ids::explanation_file_name(chapter_number, question_number))
    }
}

/// Load every question file under the course's questions directory, in
/// file-name order. Files that yield no chapter/question numbers, are not
/// valid JSON, or are not JSON objects are skipped.
pub fn load_questions(ctx: &QuestionContext<'_>) -> Vec<Question> {
    let dir = ctx.course_dir.join(QUESTIONS_DIR);
    let mut files = question_files(&dir);
    files.sort();

    files
        .iter()
        .filter_map(|path| question_from_file(ctx, path))
        .collect()
}

fn question_matcher() -> Option<GlobMatcher> {
    Glob::new(QUESTION_FILE_GLOB)
        .map(|glob| glob.compile_matcher())
        .ok()
}

fn question_files(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        tracing::debug!(dir = %dir.display(), "no questions directory");
        return Vec::new();
    };
    let Some(matcher) = question_matcher() else {
        return Vec::new();
    };
    entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| path.file_name().is_some_and(|name| matcher.is_match(name)))
        .collect()
}

/// Parse `chapter-<N>-q<M>.json` into `(N, M)`. Both numbers or neither.
#[must_use]
pub fn numbers_from_file_name(file_name: &str) -> Option<(i64, i64)> {
    let stem = file_name.strip_prefix("chapter-")?.strip_suffix(".json")?;
    let (chapter, question) = stem.split_once("-q")?;
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(chapter) || !all_digits(question) {
        return None;
    }
    Some((chapter.parse().ok()?, question.parse().ok()?))
}

fn question_from_file(ctx: &QuestionContext<'_>, path: &Path) -> Option<Question> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) => {
            tracing::warn!(path = %path.display(), %error, "skipping unreadable question file");
            return None;
        }
    };
    let payload = match serde_json::from_str::<Value>(&raw) {
        Ok(Value::Object(map)) => map,
        Ok(_) => {
            tracing::warn!(path = %path.display(), "skipping question file that is not a JSON object");
            return None;
        }
        Err(error) => {
            tracing::warn!(path = %path.display(), %error, "skipping question file with invalid JSON");
            return None;
        }
    };

    let from_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .and_then(numbers_from_file_name);
    let chapter_number = safe_int(payload.get("chapterId")).or(from_name.map(|(c, _)| c));
    let question_number = safe_int(payload.get("questionNumber")).or(from_name.map(|(_, q)| q));
    let (Some(chapter_number), Some(question_number)) = (chapter_number, question_number) else {
        tracing::warn!(path = %path.display(), "skipping question file without chapter/question numbers");
        return None;
    };

    Some(build_question(ctx, &payload, chapter_number, question_number))
}

fn build_question(
    ctx: &QuestionContext<'_>,
    payload: &Map<String, Value>,
    chapter_number: i64,
    question_number: i64,
) -> Question {
    let question_path = resolve_resource(
        ctx.resources_root,
        string_field(payload, "questionContentPath"),
    );
    let explanation_path = ctx.explanation_path(chapter_number, question_number);

    let slots = array_field(payload, "slotOptions")
        .iter()
        .enumerate()
        .map(|(position, slot)| QuestionSlot {
            slot_index: i64::try_from(position).unwrap_or(i64::MAX),
            options: match slot.as_array() {
                Some(entries) => options_from(entries, question_number),
                None => {
                    tracing::warn!(chapter_number, question_number, position, "slot is not an array, importing it without options");
                    Vec::new()
                }
            },
        })
        .collect();

    Question {
        chapter_number,
        question_number,
        question_uid: ids::question_uid(chapter_number, question_number),
        question_markdown: read_optional_text(question_path.as_deref()),
        explanation_markdown: read_optional_text(Some(&explanation_path)),
        options: options_from(array_field(payload, "options"), question_number),
        slots,
    }
}

/// Convert option entries, skipping any entry that is not an object.
fn options_from(entries: &[Value], question_number: i64) -> Vec<AnswerOption> {
    let mut options = Vec::with_capacity(entries.len());
    for entry in entries {
        let Some(entry) = entry.as_object() else {
            tracing::warn!(question_number, "skipping option entry that is not an object");
            continue;
        };
        options.push(AnswerOption {
            option_index: safe_int(entry.get("optionIndex")).unwrap_or(0),
            content: option_content(entry.get("optionContent")),
            is_correct: truthy(entry.get("isCorrect")),
        });
    }
    options
}

fn option_content(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}
